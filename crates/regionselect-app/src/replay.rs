//! Scripted gesture replay.

use kurbo::{Point, Size};
use regionselect_core::{
    CircleSelector, FsmError, PointerInput, RegionSummary, Selector, SelectorStyle, StyleError,
};
use regionselect_render::{CommandSummary, HeadlessView, SceneObject};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use thiserror::Error;

/// Script loading and replay errors.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Script parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid style: {0}")]
    Style(#[from] StyleError),
    #[error("Selector setup failed: {0}")]
    Setup(#[from] FsmError),
}

/// One scripted host event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScriptEvent {
    /// Start a gesture whose region is recorded in the report.
    Start,
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    Out { x: f64, y: f64 },
    /// Paint request sent straight to the selector.
    Draw,
    /// Host frame tick: drains pending redraws and paints.
    Frame,
}

fn default_width() -> f64 {
    800.0
}

fn default_height() -> f64 {
    600.0
}

/// A replayable session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub style: SelectorStyle,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default)]
    pub objects: Vec<SceneObject>,
    pub events: Vec<ScriptEvent>,
}

impl ReplayScript {
    /// Parse and validate a script from JSON.
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        let script: Self = serde_json::from_str(json)?;
        script.style.validate()?;
        Ok(script)
    }
}

/// Outcome of a replay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    /// Regions reported to completion callbacks, in order.
    pub regions: Vec<RegionSummary>,
    /// Objects delivered to the view's select callback, one entry per gesture.
    pub selected: Vec<Vec<SceneObject>>,
    /// Events the selector rejected in its state at the time.
    pub ignored: usize,
    pub final_state: String,
    /// Selection layer display list at the end of the replay.
    pub commands: Vec<CommandSummary>,
}

/// Load a script from a JSON file.
pub fn load_script(path: &Path) -> Result<ReplayScript, ScriptError> {
    let json = fs::read_to_string(path)?;
    ReplayScript::from_json(&json)
}

/// Run `script` through a circle selector over a headless view.
pub fn replay(script: &ReplayScript) -> Result<ReplayReport, ScriptError> {
    script.style.validate()?;

    let mut view = HeadlessView::with_scene(
        Size::new(script.width, script.height),
        script.objects.iter().cloned().collect(),
    );
    let selected = Rc::new(RefCell::new(Vec::new()));
    let sink = selected.clone();
    view.on_select(move |objects| sink.borrow_mut().push(objects.to_vec()));

    let regions = Rc::new(RefCell::new(Vec::new()));
    let mut selector = CircleSelector::new(view, script.style.clone())?;
    let mut ignored = 0;

    for event in &script.events {
        let accepted = match *event {
            ScriptEvent::Start => {
                let sink = regions.clone();
                selector.start_with(move |region| sink.borrow_mut().push(region.summary()))
            }
            ScriptEvent::Down { x, y } => selector.handle(PointerInput::Down(Point::new(x, y))),
            ScriptEvent::Move { x, y } => selector.handle(PointerInput::Move(Point::new(x, y))),
            ScriptEvent::Up { x, y } => selector.handle(PointerInput::Up(Point::new(x, y))),
            ScriptEvent::Out { x, y } => selector.handle(PointerInput::Out(Point::new(x, y))),
            ScriptEvent::Draw => selector.handle(PointerInput::Draw),
            ScriptEvent::Frame => {
                if selector.view_mut().take_redraw() && !selector.handle(PointerInput::Draw) {
                    // Nothing to paint: wipe the previous frame's overlay.
                    selector.view_mut().clear_layer();
                }
                true
            }
        };
        if !accepted {
            log::debug!("Ignored {:?} in state {:?}", event, selector.state());
            ignored += 1;
        }
    }

    let report = ReplayReport {
        regions: regions.borrow().clone(),
        selected: selected.borrow().clone(),
        ignored,
        final_state: format!("{:?}", selector.state()),
        commands: selector.view().recording().summaries(),
    };
    log::info!(
        "Replayed {} event(s): {} region(s), {} ignored",
        script.events.len(),
        report.regions.len(),
        report.ignored
    );
    Ok(report)
}
