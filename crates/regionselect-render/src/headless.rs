//! Window-less view implementation.

use crate::scene::{Scene, SceneObject};
use crate::surface::RecordingSurface;
use kurbo::{Point, Rect, Size};
use regionselect_core::{
    CallbackRegistry, CursorKind, DrawingSurface, InteractionMode, Region, View, ViewEvent,
};

/// A [`View`] that keeps its state in memory.
///
/// Redraw requests are counted rather than scheduled; the host drains them
/// with [`HeadlessView::take_redraw`] and runs a frame.
#[derive(Debug)]
pub struct HeadlessView {
    cursor: CursorKind,
    mode: InteractionMode,
    reticle_visible: bool,
    pending_redraws: usize,
    surface: RecordingSurface,
    scene: Scene,
    callbacks: CallbackRegistry<SceneObject>,
}

impl HeadlessView {
    /// Create a view over an empty scene.
    pub fn new(size: Size) -> Self {
        Self::with_scene(size, Scene::new())
    }

    pub fn with_scene(size: Size, scene: Scene) -> Self {
        Self {
            cursor: CursorKind::Default,
            mode: InteractionMode::Pan,
            reticle_visible: true,
            pending_redraws: 0,
            surface: RecordingSurface::new(size),
            scene,
            callbacks: CallbackRegistry::new(),
        }
    }

    pub fn cursor(&self) -> CursorKind {
        self.cursor
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn reticle_visible(&self) -> bool {
        self.reticle_visible
    }

    pub fn pending_redraws(&self) -> usize {
        self.pending_redraws
    }

    /// Consume pending redraw requests.
    ///
    /// Returns `true` if at least one was pending, in which case a new frame
    /// starts on the selection layer.
    pub fn take_redraw(&mut self) -> bool {
        if self.pending_redraws == 0 {
            return false;
        }
        self.pending_redraws = 0;
        self.surface.begin_frame();
        true
    }

    /// Clear the selection layer unless something already did this frame.
    pub fn clear_layer(&mut self) {
        if !self.surface.is_cleared() {
            let size = self.surface.size();
            self.surface.clear_rect(Rect::from_origin_size(Point::ZERO, size));
            self.surface.set_cleared(true);
        }
    }

    pub fn recording(&self) -> &RecordingSurface {
        &self.surface
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Register the `Select` callback.
    pub fn on_select(&mut self, callback: impl FnMut(&[SceneObject]) + 'static) {
        self.callbacks.register(ViewEvent::Select, callback);
    }
}

impl View for HeadlessView {
    type Object = SceneObject;

    fn set_cursor(&mut self, cursor: CursorKind) {
        self.cursor = cursor;
    }

    fn show_reticle(&mut self, visible: bool) {
        self.reticle_visible = visible;
    }

    fn set_mode(&mut self, mode: InteractionMode) {
        if self.mode != mode {
            log::debug!("View mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }

    fn request_redraw(&mut self) {
        self.pending_redraws += 1;
    }

    fn surface(&mut self) -> &mut dyn DrawingSurface {
        &mut self.surface
    }

    fn callbacks(&mut self) -> &mut CallbackRegistry<SceneObject> {
        &mut self.callbacks
    }

    fn select_objects(&self, region: &Region) -> Vec<SceneObject> {
        self.scene.inside(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regionselect_core::{CircleSelector, PointerInput, Selector, SelectorStyle};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn view() -> HeadlessView {
        let scene = [
            SceneObject::new("inside", Point::new(102.0, 101.0)),
            SceneObject::new("outside", Point::new(140.0, 100.0)),
        ]
        .into_iter()
        .collect();
        HeadlessView::with_scene(Size::new(400.0, 300.0), scene)
    }

    #[test]
    fn test_gesture_over_headless_view() {
        let mut view = view();
        let selected = Rc::new(RefCell::new(Vec::new()));
        let sink = selected.clone();
        view.on_select(move |objects| {
            sink.borrow_mut().extend(objects.iter().map(|o| o.name.clone()));
        });

        let mut sel = CircleSelector::new(view, SelectorStyle::default()).unwrap();
        sel.start(None);
        assert_eq!(sel.view().mode(), InteractionMode::Select);
        assert_eq!(sel.view().cursor(), CursorKind::Crosshair);
        assert!(!sel.view().reticle_visible());

        sel.handle(PointerInput::Down(Point::new(100.0, 100.0)));
        sel.handle(PointerInput::Move(Point::new(110.0, 100.0)));
        assert_eq!(sel.view().pending_redraws(), 1);

        // Frame loop: drain redraws, then paint.
        assert!(sel.view_mut().take_redraw());
        sel.handle(PointerInput::Draw);
        let kinds: Vec<_> = sel
            .view()
            .recording()
            .summaries()
            .into_iter()
            .map(|c| c.kind)
            .collect();
        assert_eq!(kinds, vec!["clear", "fill", "stroke"]);
        assert!(!sel.view_mut().take_redraw());

        sel.handle(PointerInput::Up(Point::new(110.0, 100.0)));
        let view = sel.into_view();
        assert_eq!(view.mode(), InteractionMode::Pan);
        assert_eq!(view.cursor(), CursorKind::Default);
        assert!(view.reticle_visible());
        assert_eq!(*selected.borrow(), vec!["inside".to_string()]);
    }

    #[test]
    fn test_repaint_in_new_frame_replaces_circle() {
        let mut sel = CircleSelector::new(view(), SelectorStyle::default()).unwrap();
        sel.start(None);
        sel.handle(PointerInput::Down(Point::new(100.0, 100.0)));
        sel.handle(PointerInput::Move(Point::new(105.0, 100.0)));
        sel.view_mut().take_redraw();
        sel.handle(PointerInput::Draw);
        sel.handle(PointerInput::Move(Point::new(120.0, 100.0)));
        sel.view_mut().take_redraw();
        sel.handle(PointerInput::Draw);

        let summaries = sel.view().recording().summaries();
        assert_eq!(summaries.len(), 3);
        let stroke = &summaries[2];
        assert!((stroke.bounds.w - 40.0).abs() < 0.1);
    }

    #[test]
    fn test_mouseout_region_selects_objects() {
        let mut sel = CircleSelector::new(view(), SelectorStyle::default()).unwrap();
        let region = Rc::new(RefCell::new(None));
        let sink = region.clone();
        sel.start_with(move |r| *sink.borrow_mut() = Some(r));
        sel.handle(PointerInput::Down(Point::new(100.0, 100.0)));
        sel.handle(PointerInput::Out(Point::new(100.0, 103.0)));

        let region = region.borrow();
        let region = region.as_ref().unwrap();
        assert_eq!(sel.view().select_objects(region).len(), 1);
        assert_eq!(sel.view().scene().len(), 2);
    }

    #[test]
    fn test_clear_layer_once_per_frame() {
        let mut view = view();
        view.request_redraw();
        assert!(view.take_redraw());
        view.clear_layer();
        view.clear_layer();
        assert_eq!(view.recording().commands().len(), 1);
        assert!(view.recording().is_cleared());
    }
}
