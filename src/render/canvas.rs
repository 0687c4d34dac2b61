//! Character canvas used by the plot renderer.

/// World-space window mapped onto a grid of character cells.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlotView {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
    /// Cells per row.
    pub cols: usize,
    /// Number of rows.
    pub rows: usize,
}

impl PlotView {
    /// A view over `[0, width] × [0, height]`.
    ///
    /// Rows are half as dense as columns since terminal cells are tall.
    pub fn for_world(width: f32, height: f32) -> Self {
        Self {
            x_min: 0.0,
            x_max: width,
            y_min: 0.0,
            y_max: height,
            cols: 41,
            rows: 21,
        }
    }
}

impl Default for PlotView {
    fn default() -> Self {
        Self::for_world(10.0, 10.0)
    }
}

/// A reusable grid of characters in world coordinates (y up).
#[derive(Debug, Clone)]
pub struct Canvas {
    view: PlotView,
    cells: Vec<char>,
    frames: u64,
}

impl Canvas {
    pub const BLANK: char = ' ';

    /// Allocates a blank canvas.
    pub fn new(view: PlotView) -> Self {
        let cols = view.cols.max(2);
        let rows = view.rows.max(2);
        Self {
            view: PlotView { cols, rows, ..view },
            cells: vec![Self::BLANK; cols * rows],
            frames: 0,
        }
    }

    pub fn view(&self) -> &PlotView {
        &self.view
    }

    /// Number of frames started on this canvas.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Blanks every cell and starts a new frame.
    pub fn clear(&mut self) {
        self.cells.fill(Self::BLANK);
        self.frames += 1;
    }

    /// Character at `(col, row)`, row 0 at the top.
    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        (col < self.view.cols && row < self.view.rows)
            .then(|| self.cells[row * self.view.cols + col])
    }

    /// Fractional cell coordinates of a world point.
    fn to_cell(&self, x: f32, y: f32) -> (f32, f32) {
        let v = &self.view;
        let col = (x - v.x_min) / (v.x_max - v.x_min) * (v.cols - 1) as f32;
        let row = (v.y_max - y) / (v.y_max - v.y_min) * (v.rows - 1) as f32;
        (col, row)
    }

    /// Liang-Barsky clip of a cell-space segment to the grid.
    ///
    /// Returns `None` when the segment misses the grid entirely.
    fn clip(&self, from: (f32, f32), to: (f32, f32)) -> Option<((f32, f32), (f32, f32))> {
        let (x0, y0) = from;
        let (dx, dy) = (to.0 - x0, to.1 - y0);
        let max_col = self.view.cols as f32 - 0.5;
        let max_row = self.view.rows as f32 - 0.5;

        let (mut t0, mut t1) = (0.0_f32, 1.0_f32);
        for (p, q) in [
            (-dx, x0 + 0.5),
            (dx, max_col - x0),
            (-dy, y0 + 0.5),
            (dy, max_row - y0),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
            } else if p < 0.0 {
                t0 = t0.max(q / p);
            } else {
                t1 = t1.min(q / p);
            }
        }
        (t0 <= t1).then(|| ((x0 + t0 * dx, y0 + t0 * dy), (x0 + t1 * dx, y0 + t1 * dy)))
    }

    fn put_cell(&mut self, col: f32, row: f32, glyph: char) {
        let (c, r) = (col.round(), row.round());
        if !(c.is_finite() && r.is_finite()) || c < 0.0 || r < 0.0 {
            return;
        }
        let (c, r) = (c as usize, r as usize);
        if c < self.view.cols && r < self.view.rows {
            self.cells[r * self.view.cols + c] = glyph;
        }
    }

    /// Plots a single world point. Points outside the view are dropped.
    pub fn point(&mut self, x: f32, y: f32, glyph: char) {
        let (c, r) = self.to_cell(x, y);
        self.put_cell(c, r, glyph);
    }

    /// Draws a world-space segment, clipped to the view.
    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), glyph: char) {
        let start = self.to_cell(from.0, from.1);
        let end = self.to_cell(to.0, to.1);
        if ![start.0, start.1, end.0, end.1].iter().all(|v| v.is_finite()) {
            return;
        }
        let Some(((c0, r0), (c1, r1))) = self.clip(start, end) else {
            return;
        };
        let steps = (c1 - c0).abs().max((r1 - r0).abs()).ceil();
        if !steps.is_finite() {
            return;
        }
        let steps = steps.max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.put_cell(c0 + (c1 - c0) * t, r0 + (r1 - r0) * t, glyph);
        }
    }

    /// Draws the outline of a square of side `2 * half` centred at `(x, y)`
    /// and rotated by `angle` radians.
    pub fn rotated_square(&mut self, x: f32, y: f32, half: f32, angle: f32, glyph: char) {
        let (s, c) = angle.sin_cos();
        let corners = [(-half, -half), (half, -half), (half, half), (-half, half)]
            .map(|(dx, dy)| (x + dx * c - dy * s, y + dx * s + dy * c));
        for k in 0..corners.len() {
            self.line(corners[k], corners[(k + 1) % corners.len()], glyph);
        }
    }

    /// Renders the grid framed by a border, one line per row.
    pub fn to_frame(&self) -> String {
        let cols = self.view.cols;
        let border: String = std::iter::once('+')
            .chain(std::iter::repeat('-').take(cols))
            .chain(std::iter::once('+'))
            .collect();

        let mut out = String::with_capacity((cols + 3) * (self.view.rows + 2));
        out.push_str(&border);
        out.push('\n');
        for row in self.cells.chunks(cols) {
            out.push('|');
            out.extend(row.iter());
            out.push('|');
            out.push('\n');
        }
        out.push_str(&border);
        out.push('\n');
        out
    }

    /// Number of cells holding `glyph`.
    pub fn count(&self, glyph: char) -> usize {
        self.cells.iter().filter(|c| **c == glyph).count()
    }
}

impl std::fmt::Display for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_frame())
    }
}
