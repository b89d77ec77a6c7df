//! Contract between selectors and the host view.
//!
//! Selectors never paint or change pointer state directly; everything goes
//! through a [`View`] and the [`DrawingSurface`] it exposes.

use crate::region::Region;
use kurbo::{Point, Rect, Size};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Pointer interaction mode of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    /// Dragging pans the scene.
    #[default]
    Pan,
    /// Dragging is owned by a selector.
    Select,
}

/// Cursor shapes a selector may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CursorKind {
    #[default]
    Default,
    Crosshair,
}

/// Named view callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewEvent {
    /// A selection finished; receives the scene objects inside the region.
    Select,
}

/// 2D paint primitives of the selection layer.
pub trait DrawingSurface {
    /// Surface size in pixels.
    fn size(&self) -> Size;

    fn clear_rect(&mut self, rect: Rect);

    fn begin_path(&mut self);

    /// Append an arc of `sweep` radians starting at `start_angle`.
    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, sweep: f64);

    fn close_path(&mut self);

    fn set_fill_color(&mut self, color: Color);

    fn set_stroke(&mut self, color: Color, width: f64);

    /// Fill the current path.
    fn fill(&mut self);

    /// Stroke the current path.
    fn stroke(&mut self);

    /// Whether the layer was already cleared during the current frame.
    fn is_cleared(&self) -> bool;

    fn set_cleared(&mut self, cleared: bool);
}

/// Callback invoked with the objects of a view event.
pub type ViewCallback<O> = Box<dyn FnMut(&[O])>;

/// Callbacks registered on a view, keyed by event.
pub struct CallbackRegistry<O> {
    callbacks: HashMap<ViewEvent, ViewCallback<O>>,
}

impl<O> Default for CallbackRegistry<O> {
    fn default() -> Self {
        Self {
            callbacks: HashMap::new(),
        }
    }
}

impl<O> fmt::Debug for CallbackRegistry<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.callbacks.keys()).finish()
    }
}

impl<O> CallbackRegistry<O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for `event`, replacing any previous one.
    pub fn register(&mut self, event: ViewEvent, callback: impl FnMut(&[O]) + 'static) {
        self.callbacks.insert(event, Box::new(callback));
    }

    pub fn unregister(&mut self, event: ViewEvent) -> bool {
        self.callbacks.remove(&event).is_some()
    }

    pub fn contains(&self, event: ViewEvent) -> bool {
        self.callbacks.contains_key(&event)
    }

    /// Invoke the callback for `event`. Returns `false` if none is registered.
    pub fn emit(&mut self, event: ViewEvent, objects: &[O]) -> bool {
        match self.callbacks.get_mut(&event) {
            Some(callback) => {
                callback(objects);
                true
            }
            None => false,
        }
    }
}

/// The host view a selector drives.
pub trait View {
    /// Scene object reported to `Select` callbacks.
    type Object: Clone;

    fn set_cursor(&mut self, cursor: CursorKind);

    fn show_reticle(&mut self, visible: bool);

    fn set_mode(&mut self, mode: InteractionMode);

    /// Schedule a repaint. Fire and forget.
    fn request_redraw(&mut self);

    /// The selection layer.
    fn surface(&mut self) -> &mut dyn DrawingSurface;

    fn callbacks(&mut self) -> &mut CallbackRegistry<Self::Object>;

    /// Scene objects inside `region`.
    fn select_objects(&self, region: &Region) -> Vec<Self::Object>;
}

impl<V: View + ?Sized> View for &mut V {
    type Object = V::Object;

    fn set_cursor(&mut self, cursor: CursorKind) {
        (**self).set_cursor(cursor)
    }

    fn show_reticle(&mut self, visible: bool) {
        (**self).show_reticle(visible)
    }

    fn set_mode(&mut self, mode: InteractionMode) {
        (**self).set_mode(mode)
    }

    fn request_redraw(&mut self) {
        (**self).request_redraw()
    }

    fn surface(&mut self) -> &mut dyn DrawingSurface {
        (**self).surface()
    }

    fn callbacks(&mut self) -> &mut CallbackRegistry<Self::Object> {
        (**self).callbacks()
    }

    fn select_objects(&self, region: &Region) -> Vec<Self::Object> {
        (**self).select_objects(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_registry_emit() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry: CallbackRegistry<u32> = CallbackRegistry::new();

        assert!(!registry.emit(ViewEvent::Select, &[1]));

        let sink = seen.clone();
        registry.register(ViewEvent::Select, move |objects| {
            sink.borrow_mut().extend_from_slice(objects)
        });
        assert!(registry.contains(ViewEvent::Select));
        assert!(registry.emit(ViewEvent::Select, &[1, 2]));
        assert!(registry.emit(ViewEvent::Select, &[3]));
        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn test_registry_unregister() {
        let mut registry: CallbackRegistry<u32> = CallbackRegistry::new();
        registry.register(ViewEvent::Select, |_| {});
        assert!(registry.unregister(ViewEvent::Select));
        assert!(!registry.unregister(ViewEvent::Select));
        assert!(!registry.contains(ViewEvent::Select));
    }

    #[test]
    fn test_mode_serde() {
        assert_eq!(serde_json::to_string(&InteractionMode::Select).unwrap(), "\"select\"");
        assert_eq!(InteractionMode::default(), InteractionMode::Pan);
        assert_eq!(CursorKind::default(), CursorKind::Default);
    }
}
