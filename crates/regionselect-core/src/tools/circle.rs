//! Circle selection gesture.
//!
//! Press to anchor the centre, drag to set the radius, release (or leave the
//! surface) to report a circular [`Region`].

use super::Selector;
use crate::fsm::{Fsm, FsmError, TransitionTable};
use crate::input::{PointerInput, RegionCallback};
use crate::region::{CIRCLE_LABEL, Region};
use crate::style::SelectorStyle;
use crate::view::{CursorKind, InteractionMode, View, ViewEvent};
use kurbo::{Point, Rect};
use std::f64::consts::TAU;

/// States of the circle gesture. Each state is also the event that enters it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CircleState {
    /// Never started.
    Off,
    Start,
    MouseDown,
    MouseMove,
    Draw,
    MouseUp,
    MouseOut,
}

impl CircleState {
    /// Event name carried by a host input.
    pub fn event_for(input: &PointerInput) -> Self {
        match input {
            PointerInput::Start { .. } => Self::Start,
            PointerInput::Down(_) => Self::MouseDown,
            PointerInput::Move(_) => Self::MouseMove,
            PointerInput::Draw => Self::Draw,
            PointerInput::Up(_) => Self::MouseUp,
            PointerInput::Out(_) => Self::MouseOut,
        }
    }
}

/// Data local to one gesture. Replaced wholesale on every start.
#[derive(Default)]
pub struct GestureData {
    /// Anchor (circle centre).
    pub start_coo: Option<Point>,
    /// Latest pointer position.
    pub coo: Option<Point>,
    callback: Option<RegionCallback>,
}

impl GestureData {
    fn new(callback: Option<RegionCallback>) -> Self {
        Self {
            start_coo: None,
            coo: None,
            callback,
        }
    }

    /// Current radius, if a drag is under way.
    pub fn radius(&self) -> Option<f64> {
        let anchor = self.start_coo?;
        let coo = self.coo.unwrap_or(anchor);
        let dx = coo.x - anchor.x;
        let dy = coo.y - anchor.y;
        Some((dx * dx + dy * dy).sqrt())
    }
}

/// Everything the handlers touch.
struct SelectionContext<V> {
    view: V,
    style: SelectorStyle,
    gesture: GestureData,
}

type CircleFsm<V> = Fsm<CircleState, SelectionContext<V>, PointerInput>;

fn start<V: View>(_: &mut CircleFsm<V>, ctx: &mut SelectionContext<V>, input: PointerInput) {
    let PointerInput::Start { callback } = input else {
        return;
    };
    ctx.view.set_cursor(CursorKind::Crosshair);
    ctx.view.show_reticle(false);
    ctx.gesture = GestureData::new(callback);
    ctx.view.set_mode(InteractionMode::Select);
}

fn mousedown<V: View>(_: &mut CircleFsm<V>, ctx: &mut SelectionContext<V>, input: PointerInput) {
    if let Some(coo) = input.coo() {
        ctx.gesture.start_coo = Some(coo);
        ctx.gesture.coo = Some(coo);
    }
}

fn mousemove<V: View>(_: &mut CircleFsm<V>, ctx: &mut SelectionContext<V>, input: PointerInput) {
    if let Some(coo) = input.coo() {
        ctx.gesture.coo = Some(coo);
    }
    ctx.view.request_redraw();
}

fn draw<V: View>(_: &mut CircleFsm<V>, ctx: &mut SelectionContext<V>, _: PointerInput) {
    let (Some(anchor), Some(r)) = (ctx.gesture.start_coo, ctx.gesture.radius()) else {
        return;
    };

    let style = &ctx.style;
    let surface = ctx.view.surface();
    // Several selectors may share the layer; clear it once per frame.
    if !surface.is_cleared() {
        let size = surface.size();
        surface.clear_rect(Rect::from_origin_size(Point::ZERO, size));
        surface.set_cleared(true);
    }

    surface.begin_path();
    surface.arc(anchor, r, 0.0, TAU);
    surface.close_path();
    surface.set_fill_color(style.fill_color());
    surface.fill();
    surface.set_stroke(style.stroke_color(), style.line_width);
    surface.stroke();
}

/// Registered for both `MouseUp` and `MouseOut`.
fn finish<V: View>(_: &mut CircleFsm<V>, ctx: &mut SelectionContext<V>, input: PointerInput) {
    if let Some(coo) = input.coo() {
        ctx.gesture.coo = Some(coo);
    }

    let region = match (ctx.gesture.start_coo, ctx.gesture.radius()) {
        (Some(anchor), Some(r)) => Some(Region::circle(anchor, r)),
        _ => None,
    };

    if let Some(region) = &region {
        log::debug!("Circle selection finished on {}: {:?}", input.name(), region);
        if let Some(callback) = ctx.gesture.callback.take() {
            callback(region.clone());
        }
    }

    ctx.view.show_reticle(true);
    ctx.view.set_cursor(CursorKind::Default);

    if let Some(region) = &region {
        if ctx.view.callbacks().contains(ViewEvent::Select) {
            let objects = ctx.view.select_objects(region);
            log::debug!("{} object(s) inside the selection", objects.len());
            ctx.view.callbacks().emit(ViewEvent::Select, &objects);
        }
    }

    ctx.view.set_mode(InteractionMode::Pan);
    ctx.view.request_redraw();
}

fn transitions<V: View>() -> TransitionTable<CircleState, SelectionContext<V>, PointerInput> {
    use CircleState::*;

    let mut table = TransitionTable::new()
        .on(Off, Start, start::<V>)
        .on(Start, Start, start::<V>)
        .on(Start, MouseDown, mousedown::<V>)
        .on(MouseUp, Start, start::<V>)
        .on(MouseOut, Start, start::<V>);

    for dragging in [MouseDown, MouseMove, Draw] {
        table = table
            .on(dragging, Start, start::<V>)
            .on(dragging, MouseMove, mousemove::<V>)
            .on(dragging, Draw, draw::<V>)
            .on(dragging, MouseUp, finish::<V>)
            .on(dragging, MouseOut, finish::<V>);
    }
    table
}

/// Circle selection gesture bound to a view.
pub struct CircleSelector<V: View> {
    fsm: CircleFsm<V>,
    ctx: SelectionContext<V>,
}

impl<V: View> CircleSelector<V> {
    /// Create an idle selector painting with `style`.
    pub fn new(view: V, style: SelectorStyle) -> Result<Self, FsmError> {
        Ok(Self {
            fsm: Fsm::new(CircleState::Off, transitions())?,
            ctx: SelectionContext {
                view,
                style,
                gesture: GestureData::default(),
            },
        })
    }

    /// Begin a gesture reporting to `callback`.
    pub fn start_with(&mut self, callback: impl FnOnce(Region) + 'static) -> bool {
        self.handle(PointerInput::start_with(callback))
    }

    pub fn state(&self) -> CircleState {
        self.fsm.state()
    }

    /// Gesture-local data of the current (or last) gesture.
    pub fn gesture(&self) -> &GestureData {
        &self.ctx.gesture
    }

    pub fn style(&self) -> &SelectorStyle {
        &self.ctx.style
    }

    pub fn view(&self) -> &V {
        &self.ctx.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.ctx.view
    }

    pub fn into_view(self) -> V {
        self.ctx.view
    }
}

impl<V: View> Selector for CircleSelector<V> {
    fn label(&self) -> &'static str {
        CIRCLE_LABEL
    }

    fn handle(&mut self, input: PointerInput) -> bool {
        let event = CircleState::event_for(&input);
        self.fsm.dispatch(&mut self.ctx, event, input)
    }

    fn is_active(&self) -> bool {
        matches!(
            self.fsm.state(),
            CircleState::Start | CircleState::MouseDown | CircleState::MouseMove | CircleState::Draw
        )
    }
}
