//! Plot-style drawing of a render snapshot onto a canvas.

use super::canvas::Canvas;
use crate::simulator::RenderSnapshot;

/// Half side of the robot glyph, in world units.
pub const ROBOT_HALF_SIZE: f32 = 0.3;
/// Length of the heading arrow, in world units.
pub const HEADING_LENGTH: f32 = 0.8;
/// World units drawn per unit of speed.
pub const VELOCITY_SCALE: f32 = 0.5;

pub const GLYPH_BODY: char = '#';
pub const GLYPH_CENTRE: char = '@';
pub const GLYPH_HEADING: char = '*';
pub const GLYPH_VELOCITY: char = '~';
pub const GLYPH_GOAL_LINE: char = '.';
pub const GLYPH_GOAL: char = 'G';

/// Clears `canvas` and draws the robot, its vectors and its goal.
///
/// Later layers overwrite earlier ones: goal line, velocity, heading,
/// body, centre, goal marker.
pub fn draw_snapshot(canvas: &mut Canvas, snapshot: &RenderSnapshot) {
    canvas.clear();
    let pos = (snapshot.x, snapshot.y);

    if let Some(detail) = snapshot.detail {
        canvas.line(pos, (detail.goal_x, detail.goal_y), GLYPH_GOAL_LINE);
    }

    let velocity_tip = (
        pos.0 + snapshot.vx * VELOCITY_SCALE,
        pos.1 + snapshot.vy * VELOCITY_SCALE,
    );
    canvas.line(pos, velocity_tip, GLYPH_VELOCITY);

    let (s, c) = snapshot.angle.sin_cos();
    let heading_tip = (pos.0 + c * HEADING_LENGTH, pos.1 + s * HEADING_LENGTH);
    canvas.line(pos, heading_tip, GLYPH_HEADING);

    canvas.rotated_square(pos.0, pos.1, ROBOT_HALF_SIZE, snapshot.angle, GLYPH_BODY);
    canvas.point(pos.0, pos.1, GLYPH_CENTRE);

    if let Some(detail) = snapshot.detail {
        canvas.point(detail.goal_x, detail.goal_y, GLYPH_GOAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::canvas::PlotView;
    use crate::simulator::GoalDetail;

    fn full_snapshot() -> RenderSnapshot {
        RenderSnapshot {
            x: 5.0,
            y: 5.0,
            angle: 0.0,
            vx: 2.0,
            vy: 0.0,
            detail: Some(GoalDetail {
                omega: 0.0,
                goal_x: 2.0,
                goal_y: 8.0,
                goal_angle: 0.0,
            }),
        }
    }

    #[test]
    fn draws_every_layer() {
        let mut canvas = Canvas::new(PlotView::default());
        draw_snapshot(&mut canvas, &full_snapshot());
        assert_eq!(canvas.cell(20, 10), Some(GLYPH_CENTRE));
        assert_eq!(canvas.cell(8, 4), Some(GLYPH_GOAL));
        for glyph in [GLYPH_BODY, GLYPH_HEADING, GLYPH_VELOCITY, GLYPH_GOAL_LINE] {
            assert!(canvas.count(glyph) > 0, "missing {glyph:?}");
        }
    }

    #[test]
    fn minimal_snapshot_has_no_goal() {
        let mut canvas = Canvas::new(PlotView::default());
        let snap = RenderSnapshot::minimal(5.0, 5.0, 1.0, 0.0, 0.0);
        draw_snapshot(&mut canvas, &snap);
        assert_eq!(canvas.count(GLYPH_GOAL), 0);
        assert_eq!(canvas.count(GLYPH_GOAL_LINE), 0);
        assert!(canvas.count(GLYPH_BODY) > 0);
    }

    #[test]
    fn far_goal_and_fast_robot_still_draw() {
        let mut canvas = Canvas::new(PlotView::default());
        let snap = RenderSnapshot {
            vx: -1e12,
            detail: Some(GoalDetail {
                omega: 0.0,
                goal_x: 1e12,
                goal_y: 1e12,
                goal_angle: 0.0,
            }),
            ..full_snapshot()
        };
        draw_snapshot(&mut canvas, &snap);
        assert_eq!(canvas.cell(20, 10), Some(GLYPH_CENTRE));
        assert_eq!(canvas.count(GLYPH_GOAL), 0);
        assert!(canvas.count(GLYPH_GOAL_LINE) > 0);
        assert!(canvas.count(GLYPH_VELOCITY) > 0);
    }

    #[test]
    fn redraw_replaces_previous_frame() {
        let mut canvas = Canvas::new(PlotView::default());
        draw_snapshot(&mut canvas, &full_snapshot());
        let moved = RenderSnapshot {
            x: 1.0,
            y: 1.0,
            ..full_snapshot()
        };
        draw_snapshot(&mut canvas, &moved);
        assert_ne!(canvas.cell(20, 10), Some(GLYPH_CENTRE));
        assert_eq!(canvas.cell(4, 18), Some(GLYPH_CENTRE));
        assert_eq!(canvas.count(GLYPH_CENTRE), 1);
    }
}
