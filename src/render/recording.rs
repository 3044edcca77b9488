//! In-memory drawing surface that records every call.
//!
//! Used by the headless CLI and by tests to assert on paint output and on
//! how often a frame actually repaints.

use super::backend::DrawSurface;
use super::colors::palette;
use super::paint::OutlineRect;

/// One recorded drawing operation, with the style in effect at the time.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    ClearRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    },
    FillRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: String,
    },
    BeginPath,
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    },
    /// Strokes every rectangle accumulated since the last `BeginPath`
    Stroke {
        rects: Vec<OutlineRect>,
        color: String,
        width: f64,
    },
    FillText {
        text: String,
        x: f64,
        y: f64,
        color: String,
    },
    SetFont(String),
}

/// Borrowed view of a recorded stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeRef<'a> {
    pub rects: &'a [OutlineRect],
    pub color: &'a str,
    pub width: f64,
}

/// Recording surface
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
    path: Vec<OutlineRect>,
    fill_style: String,
    stroke_style: String,
    line_width: f64,
    font: String,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            path: Vec::new(),
            fill_style: palette::BLACK.to_string(),
            stroke_style: palette::BLACK.to_string(),
            line_width: 1.0,
            font: "10px sans-serif".to_string(),
        }
    }

    /// Change the surface size, as a browser resize would.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the command log.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Current font
    pub fn font(&self) -> &str {
        &self.font
    }

    /// Number of full-surface clears, i.e. frames that repainted.
    pub fn clear_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::ClearRect { .. }))
            .count()
    }

    /// Text draws as `(text, x, y)`.
    pub fn texts(&self) -> Vec<(String, f64, f64)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, x, y, .. } => Some((text.clone(), *x, *y)),
                _ => None,
            })
            .collect()
    }

    pub fn strokes(&self) -> Vec<StrokeRef<'_>> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Stroke {
                    rects,
                    color,
                    width,
                } => Some(StrokeRef {
                    rects,
                    color,
                    width: *width,
                }),
                _ => None,
            })
            .collect()
    }

    /// Filled rectangles as `(rect, color)`.
    pub fn fills(&self) -> Vec<(OutlineRect, &str)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { x, y, w, h, color } => Some((
                    OutlineRect {
                        x: *x,
                        y: *y,
                        w: *w,
                        h: *h,
                    },
                    color.as_str(),
                )),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(DrawCommand::ClearRect { x, y, w, h });
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            w,
            h,
            color: self.fill_style.clone(),
        });
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.commands.push(DrawCommand::BeginPath);
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.path.push(OutlineRect { x, y, w, h });
        self.commands.push(DrawCommand::Rect { x, y, w, h });
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke {
            rects: self.path.clone(),
            color: self.stroke_style.clone(),
            width: self.line_width,
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
            color: self.fill_style.clone(),
        });
    }

    fn set_fill_style(&mut self, color: &str) {
        color.clone_into(&mut self.fill_style);
    }

    fn set_stroke_style(&mut self, color: &str) {
        color.clone_into(&mut self.stroke_style);
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn set_font(&mut self, font: &str) {
        font.clone_into(&mut self.font);
        self.commands.push(DrawCommand::SetFont(self.font.clone()));
    }
}
