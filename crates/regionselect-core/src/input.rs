//! Pointer and lifecycle input delivered by the host view.

use crate::region::Region;
use kurbo::Point;
use std::fmt;

/// Completion callback receiving the finished region.
pub type RegionCallback = Box<dyn FnOnce(Region)>;

/// One host event, in surface coordinates.
pub enum PointerInput {
    /// Begin a new gesture, optionally with a completion callback.
    Start { callback: Option<RegionCallback> },
    /// Pointer pressed.
    Down(Point),
    /// Pointer moved.
    Move(Point),
    /// Frame paint request.
    Draw,
    /// Pointer released.
    Up(Point),
    /// Pointer left the surface.
    Out(Point),
}

impl PointerInput {
    /// Start a gesture that reports its region to `callback`.
    pub fn start_with(callback: impl FnOnce(Region) + 'static) -> Self {
        Self::Start {
            callback: Some(Box::new(callback)),
        }
    }

    /// Start a gesture without a completion callback.
    pub fn start() -> Self {
        Self::Start { callback: None }
    }

    /// Pointer coordinates carried by this input, if any.
    pub fn coo(&self) -> Option<Point> {
        match self {
            Self::Down(p) | Self::Move(p) | Self::Up(p) | Self::Out(p) => Some(*p),
            Self::Start { .. } | Self::Draw => None,
        }
    }

    /// Event name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start { .. } => "start",
            Self::Down(_) => "mousedown",
            Self::Move(_) => "mousemove",
            Self::Draw => "draw",
            Self::Up(_) => "mouseup",
            Self::Out(_) => "mouseout",
        }
    }
}

impl fmt::Debug for PointerInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start { callback } => f
                .debug_struct("Start")
                .field("callback", &callback.is_some())
                .finish(),
            other => match other.coo() {
                Some(p) => write!(f, "{}({}, {})", other.name(), p.x, p.y),
                None => f.write_str(other.name()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coo() {
        assert_eq!(PointerInput::Down(Point::new(1.0, 2.0)).coo(), Some(Point::new(1.0, 2.0)));
        assert_eq!(PointerInput::Out(Point::new(3.0, 4.0)).coo(), Some(Point::new(3.0, 4.0)));
        assert!(PointerInput::Draw.coo().is_none());
        assert!(PointerInput::start().coo().is_none());
    }

    #[test]
    fn test_debug_hides_callback() {
        let input = PointerInput::start_with(|_| {});
        assert_eq!(format!("{:?}", input), "Start { callback: true }");
        assert_eq!(format!("{:?}", PointerInput::Draw), "draw");
        assert_eq!(format!("{:?}", PointerInput::Up(Point::new(3.0, 4.0))), "mouseup(3, 4)");
    }
}
