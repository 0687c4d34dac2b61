//! Rendering of simulator snapshots.
//!
//! [`RenderMode::Text`] prints one line per call. [`RenderMode::Plot`] draws a
//! character-canvas figure; the canvas is created on the first render, reused
//! and redrawn on later ones, and released on close.

pub mod canvas;
pub mod plot;

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

pub use canvas::{Canvas, PlotView};

use crate::error::{EnvError, Result};
use crate::simulator::RenderSnapshot;

/// How [`crate::SwerveEnv::render`] displays state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderMode {
    /// Rendering disabled.
    #[default]
    None,
    /// One printed line per render.
    Text,
    /// 2D figure of robot, vectors and goal.
    Plot,
}

impl FromStr for RenderMode {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "" => Ok(RenderMode::None),
            "text" | "ansi" => Ok(RenderMode::Text),
            "plot" | "human" => Ok(RenderMode::Plot),
            other => Err(EnvError::InvalidConfig(format!(
                "unknown render mode '{other}'"
            ))),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::None => write!(f, "none"),
            RenderMode::Text => write!(f, "text"),
            RenderMode::Plot => write!(f, "plot"),
        }
    }
}

/// Writes snapshots to a sink according to a [`RenderMode`].
pub struct Renderer {
    mode: RenderMode,
    view: PlotView,
    sink: Box<dyn Write + Send>,
    canvas: Option<Canvas>,
}

impl Renderer {
    /// A renderer writing to stdout.
    pub fn new(mode: RenderMode) -> Self {
        Self::with_sink(mode, Box::new(io::stdout()))
    }

    /// A renderer writing to `sink`.
    pub fn with_sink(mode: RenderMode, sink: Box<dyn Write + Send>) -> Self {
        Self {
            mode,
            view: PlotView::default(),
            sink,
            canvas: None,
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Sets the plot window. Takes effect when the canvas is next created.
    pub fn set_view(&mut self, view: PlotView) {
        self.view = view;
    }

    /// The plot canvas, once the first plot render has created it.
    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    /// Displays one snapshot.
    pub fn render(&mut self, snapshot: &RenderSnapshot) -> Result<()> {
        match self.mode {
            RenderMode::None => {}
            RenderMode::Text => {
                writeln!(self.sink, "{snapshot}")?;
            }
            RenderMode::Plot => {
                let view = self.view;
                let canvas = self.canvas.get_or_insert_with(|| Canvas::new(view));
                plot::draw_snapshot(canvas, snapshot);
                let mut frame = canvas.to_frame();
                frame.push_str(&snapshot.to_string());
                frame.push('\n');
                self.sink.write_all(frame.as_bytes())?;
            }
        }
        self.sink.flush()?;
        Ok(())
    }

    /// Drops the canvas and flushes the sink.
    pub fn close(&mut self) -> Result<()> {
        self.canvas = None;
        self.sink.flush()?;
        Ok(())
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("mode", &self.mode)
            .field("view", &self.view)
            .field("canvas", &self.canvas.is_some())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod test_sink {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    /// In-memory sink whose contents stay readable after being boxed.
    #[derive(Clone, Default)]
    pub struct SharedSink(pub Arc<Mutex<Vec<u8>>>);

    impl SharedSink {
        pub fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Sink whose flush always fails.
    pub struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink gone"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_sink::SharedSink;
    use super::*;

    #[test]
    fn parse_render_modes() {
        assert_eq!("text".parse::<RenderMode>().unwrap(), RenderMode::Text);
        assert_eq!("HUMAN".parse::<RenderMode>().unwrap(), RenderMode::Plot);
        assert_eq!("none".parse::<RenderMode>().unwrap(), RenderMode::None);
        assert!("rgb_array".parse::<RenderMode>().is_err());
    }

    #[test]
    fn text_mode_prints_one_line() {
        let sink = SharedSink::default();
        let mut renderer = Renderer::with_sink(RenderMode::Text, Box::new(sink.clone()));
        renderer
            .render(&RenderSnapshot::minimal(1.0, 2.0, 0.0, 0.5, 0.0))
            .unwrap();
        assert_eq!(sink.contents(), "x: 1, y: 2, angle: 0, vx: 0.5, vy: 0\n");
        assert!(renderer.canvas().is_none());
    }

    #[test]
    fn none_mode_is_silent() {
        let sink = SharedSink::default();
        let mut renderer = Renderer::with_sink(RenderMode::None, Box::new(sink.clone()));
        renderer
            .render(&RenderSnapshot::minimal(1.0, 2.0, 0.0, 0.0, 0.0))
            .unwrap();
        assert!(sink.contents().is_empty());
    }

    #[test]
    fn plot_canvas_created_once_and_reused() {
        let sink = SharedSink::default();
        let mut renderer = Renderer::with_sink(RenderMode::Plot, Box::new(sink.clone()));
        assert!(renderer.canvas().is_none());

        let snap = RenderSnapshot::minimal(5.0, 5.0, 0.0, 0.0, 0.0);
        renderer.render(&snap).unwrap();
        renderer.render(&snap).unwrap();
        renderer.render(&snap).unwrap();

        assert_eq!(renderer.canvas().unwrap().frames(), 3);
        assert_eq!(sink.contents().matches("x: 5").count(), 3);
    }

    #[test]
    fn close_releases_canvas() {
        let sink = SharedSink::default();
        let mut renderer = Renderer::with_sink(RenderMode::Plot, Box::new(sink));
        renderer
            .render(&RenderSnapshot::minimal(5.0, 5.0, 0.0, 0.0, 0.0))
            .unwrap();
        renderer.close().unwrap();
        assert!(renderer.canvas().is_none());
    }

    #[test]
    fn custom_view_sizes_canvas() {
        let mut renderer = Renderer::with_sink(RenderMode::Plot, Box::new(io::sink()));
        renderer.set_view(PlotView {
            cols: 11,
            rows: 5,
            ..PlotView::default()
        });
        renderer
            .render(&RenderSnapshot::minimal(5.0, 5.0, 0.0, 0.0, 0.0))
            .unwrap();
        assert_eq!(renderer.canvas().unwrap().view().cols, 11);
    }
}
