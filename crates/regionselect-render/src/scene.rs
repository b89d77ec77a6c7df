//! Selectable scene objects.

use kurbo::Point;
use regionselect_core::Region;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for scene objects.
pub type ObjectId = Uuid;

/// A point-like object drawn on the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    #[serde(default = "Uuid::new_v4")]
    pub id: ObjectId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Position in surface coordinates.
    pub position: Point,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            position,
        }
    }
}

/// Objects rendered on the view, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        let id = object.id;
        self.objects.push(object);
        id
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let index = self.objects.iter().position(|o| o.id == id)?;
        Some(self.objects.remove(index))
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    /// Objects whose position lies inside `region`.
    pub fn inside(&self, region: &Region) -> Vec<SceneObject> {
        // Cheap bounding-box reject before the exact test.
        let bounds = region.bbox().to_rect();
        self.objects
            .iter()
            .filter(|o| within(bounds, o.position))
            .filter(|o| region.contains(o.position))
            .cloned()
            .collect()
    }
}

impl FromIterator<SceneObject> for Scene {
    fn from_iter<I: IntoIterator<Item = SceneObject>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

/// Closed-interval test; `Rect::contains` excludes the far edges.
fn within(bounds: kurbo::Rect, p: Point) -> bool {
    p.x >= bounds.x0 && p.x <= bounds.x1 && p.y >= bounds.y0 && p.y <= bounds.y1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        [
            SceneObject::new("a", Point::new(1.0, 1.0)),
            SceneObject::new("b", Point::new(4.0, 4.0)),
            SceneObject::new("c", Point::new(5.0, 0.0)),
            SceneObject::new("d", Point::new(50.0, 50.0)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_inside_circle() {
        let scene = scene();
        let region = Region::circle(Point::ZERO, 5.0);
        let names: Vec<_> = scene.inside(&region).into_iter().map(|o| o.name).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_add_remove() {
        let mut scene = Scene::new();
        assert!(scene.is_empty());
        let id = scene.add(SceneObject::new("x", Point::ZERO));
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.get(id).map(|o| o.name.as_str()), Some("x"));
        assert!(scene.remove(id).is_some());
        assert!(scene.remove(id).is_none());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_deserialize_assigns_id() {
        let a: SceneObject =
            serde_json::from_str(r#"{"name": "m31", "position": {"x": 1.0, "y": 2.0}}"#).unwrap();
        let b: SceneObject = serde_json::from_str(r#"{"position": {"x": 1.0, "y": 2.0}}"#).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.position, Point::new(1.0, 2.0));
        assert!(b.name.is_empty());
    }
}
