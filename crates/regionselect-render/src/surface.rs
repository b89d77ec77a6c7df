//! Drawing surface that records paint operations.

use kurbo::{Arc, BezPath, Point, Rect, Shape, Size, Vec2};
use peniko::Color;
use regionselect_core::{BBox, DrawingSurface, SerializableColor};
use serde::{Deserialize, Serialize};

/// Flattening tolerance for arcs.
const ARC_TOLERANCE: f64 = 0.1;

/// One recorded paint operation.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Clear(Rect),
    Fill { path: BezPath, color: Color },
    Stroke { path: BezPath, color: Color, width: f64 },
}

impl DrawCommand {
    /// Plain-data description of the command.
    pub fn summary(&self) -> CommandSummary {
        match self {
            DrawCommand::Clear(rect) => CommandSummary {
                kind: "clear".to_string(),
                bounds: BBox::from(*rect),
                color: None,
                width: None,
            },
            DrawCommand::Fill { path, color } => CommandSummary {
                kind: "fill".to_string(),
                bounds: BBox::from(path.bounding_box()),
                color: Some(SerializableColor::from(*color)),
                width: None,
            },
            DrawCommand::Stroke { path, color, width } => CommandSummary {
                kind: "stroke".to_string(),
                bounds: BBox::from(path.bounding_box()),
                color: Some(SerializableColor::from(*color)),
                width: Some(*width),
            },
        }
    }
}

/// Serialisable description of a [`DrawCommand`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandSummary {
    pub kind: String,
    pub bounds: BBox,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<SerializableColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

/// A [`DrawingSurface`] that keeps a display list instead of pixels.
///
/// Clearing the whole surface drops every command recorded before it.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Size,
    commands: Vec<DrawCommand>,
    path: BezPath,
    fill_color: Color,
    stroke_color: Color,
    stroke_width: f64,
    cleared: bool,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
            path: BezPath::new(),
            fill_color: Color::from_rgba8(0, 0, 0, 255),
            stroke_color: Color::from_rgba8(0, 0, 0, 255),
            stroke_width: 1.0,
            cleared: false,
        }
    }

    /// Start a new frame: the layer may be cleared again.
    pub fn begin_frame(&mut self) {
        self.cleared = false;
    }

    /// Commands recorded since the last full clear.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn summaries(&self) -> Vec<CommandSummary> {
        self.commands.iter().map(DrawCommand::summary).collect()
    }

    /// Path under construction.
    pub fn current_path(&self) -> &BezPath {
        &self.path
    }

    fn full_rect(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.size)
    }
}

impl DrawingSurface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear_rect(&mut self, rect: Rect) {
        let full = self.full_rect();
        let covers =
            rect.x0 <= full.x0 && rect.y0 <= full.y0 && rect.x1 >= full.x1 && rect.y1 >= full.y1;
        if covers {
            self.commands.clear();
        }
        self.commands.push(DrawCommand::Clear(rect));
    }

    fn begin_path(&mut self) {
        self.path = BezPath::new();
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, sweep: f64) {
        let arc = Arc::new(center, Vec2::new(radius, radius), start_angle, sweep, 0.0);
        if self.path.elements().is_empty() {
            self.path.extend(arc.path_elements(ARC_TOLERANCE));
        } else {
            // Connect the current point to the arc start, as canvas paths do.
            let start = center + Vec2::from_angle(start_angle) * radius;
            self.path.line_to(start);
            self.path.extend(arc.append_iter(ARC_TOLERANCE));
        }
    }

    fn close_path(&mut self) {
        if !self.path.elements().is_empty() {
            self.path.close_path();
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_stroke(&mut self, color: Color, width: f64) {
        self.stroke_color = color;
        self.stroke_width = width;
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill {
            path: self.path.clone(),
            color: self.fill_color,
        });
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke {
            path: self.path.clone(),
            color: self.stroke_color,
            width: self.stroke_width,
        });
    }

    fn is_cleared(&self) -> bool {
        self.cleared
    }

    fn set_cleared(&mut self, cleared: bool) {
        self.cleared = cleared;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    fn circle(surface: &mut RecordingSurface, center: Point, radius: f64) {
        surface.begin_path();
        surface.arc(center, radius, 0.0, TAU);
        surface.close_path();
        surface.fill();
        surface.stroke();
    }

    #[test]
    fn test_records_fill_and_stroke() {
        let mut surface = RecordingSurface::new(Size::new(200.0, 100.0));
        surface.set_fill_color(Color::from_rgba8(0, 255, 0, 128));
        surface.set_stroke(Color::from_rgba8(0, 255, 0, 255), 3.0);
        circle(&mut surface, Point::new(50.0, 50.0), 10.0);

        let summaries = surface.summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].kind, "fill");
        assert_eq!(summaries[0].color, Some(SerializableColor::new(0, 255, 0, 128)));
        assert_eq!(summaries[1].kind, "stroke");
        assert_eq!(summaries[1].width, Some(3.0));

        let bounds = summaries[1].bounds;
        assert!((bounds.x - 40.0).abs() < ARC_TOLERANCE);
        assert!((bounds.y - 40.0).abs() < ARC_TOLERANCE);
        assert!((bounds.w - 20.0).abs() < ARC_TOLERANCE);
        assert!((bounds.h - 20.0).abs() < ARC_TOLERANCE);
    }

    #[test]
    fn test_full_clear_drops_history() {
        let mut surface = RecordingSurface::new(Size::new(200.0, 100.0));
        circle(&mut surface, Point::new(50.0, 50.0), 10.0);
        surface.clear_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(surface.commands().len(), 3);

        surface.clear_rect(Rect::new(0.0, 0.0, 200.0, 100.0));
        assert_eq!(surface.commands().len(), 1);
        assert!(matches!(surface.commands()[0], DrawCommand::Clear(_)));
    }

    #[test]
    fn test_begin_frame_resets_cleared_flag() {
        let mut surface = RecordingSurface::new(Size::new(10.0, 10.0));
        assert!(!surface.is_cleared());
        surface.set_cleared(true);
        assert!(surface.is_cleared());
        surface.begin_frame();
        assert!(!surface.is_cleared());
    }

    #[test]
    fn test_begin_path_discards_previous_path() {
        let mut surface = RecordingSurface::new(Size::new(10.0, 10.0));
        surface.begin_path();
        surface.arc(Point::new(5.0, 5.0), 2.0, 0.0, TAU);
        assert!(!surface.current_path().elements().is_empty());
        surface.begin_path();
        assert!(surface.current_path().elements().is_empty());
    }

    #[test]
    fn test_second_arc_connects_to_first() {
        let mut surface = RecordingSurface::new(Size::new(10.0, 10.0));
        surface.begin_path();
        surface.arc(Point::new(0.0, 0.0), 1.0, 0.0, TAU / 4.0);
        let before = surface.current_path().elements().len();
        surface.arc(Point::new(5.0, 0.0), 1.0, 0.0, TAU / 4.0);
        assert!(surface.current_path().elements().len() > before + 1);
        assert!(matches!(surface.current_path().elements()[before], kurbo::PathEl::LineTo(_)));
    }
}
