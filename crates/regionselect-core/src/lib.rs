//! regionselect Core Library
//!
//! Platform-agnostic state machine engine and selection gestures. Hosts feed
//! pointer events into a [`Selector`]; on release the selector reports a
//! shape-agnostic [`Region`].

pub mod fsm;
pub mod input;
pub mod region;
pub mod style;
pub mod tools;
pub mod view;

pub use fsm::{Fsm, FsmError, Handler, TransitionTable};
pub use input::{PointerInput, RegionCallback};
pub use region::{BBox, Region, RegionSummary};
pub use style::{SelectorStyle, SerializableColor, StyleError};
pub use tools::{CircleSelector, CircleState, Selector};
pub use view::{CallbackRegistry, CursorKind, DrawingSurface, InteractionMode, View, ViewEvent};
