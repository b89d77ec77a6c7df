//! regionselect Application
//!
//! Replays scripted pointer gestures through a circle selector over a
//! headless view and reports the outcome.

mod replay;

pub use replay::{ReplayReport, ReplayScript, ScriptError, ScriptEvent, load_script, replay};
