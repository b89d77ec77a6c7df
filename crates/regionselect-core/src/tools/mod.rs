//! Selection gestures.
//!
//! Every gesture is a [`Selector`]: it turns host [`PointerInput`] into
//! named events for its own state machine and reports a
//! [`Region`](crate::region::Region) when the gesture finishes.

mod circle;

pub use circle::{CircleSelector, CircleState, GestureData};

use crate::input::PointerInput;

/// Contract shared by all selection gestures.
pub trait Selector {
    /// Label of the regions this selector produces.
    fn label(&self) -> &'static str;

    /// Forward one host input to the gesture.
    ///
    /// Returns `false` when the input is not valid in the current state; the
    /// input is then dropped without side effects.
    fn handle(&mut self, input: PointerInput) -> bool;

    /// Check if a gesture is in progress (started and not yet finished).
    fn is_active(&self) -> bool;

    /// Begin a new gesture reporting to `callback`.
    fn start(&mut self, callback: Option<crate::input::RegionCallback>) -> bool {
        self.handle(PointerInput::Start { callback })
    }
}
