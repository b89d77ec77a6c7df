//! regionselect Render Library
//!
//! Host-side pieces for driving selectors without a window: a drawing surface
//! that records a display list, a scene of selectable points and a view that
//! ties them together.

mod headless;
mod scene;
mod surface;

pub use headless::HeadlessView;
pub use scene::{ObjectId, Scene, SceneObject};
pub use surface::{CommandSummary, DrawCommand, RecordingSurface};
