//! Region descriptors reported by selection gestures.
//!
//! A [`Region`] does not expose its shape. Consumers get a label, the named
//! geometric parameters, a membership test and a bounding box; the last two
//! are closures over the geometry captured when the region was built.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Label of regions built by [`Region::circle`].
pub const CIRCLE_LABEL: &str = "circle";

/// Axis-aligned bounding box (top-left corner plus size).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl BBox {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Get as a kurbo Rect.
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.w, self.y + self.h)
    }
}

impl From<Rect> for BBox {
    fn from(rect: Rect) -> Self {
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }
}

impl From<BBox> for Rect {
    fn from(bbox: BBox) -> Self {
        bbox.to_rect()
    }
}

type ContainsFn = Arc<dyn Fn(Point) -> bool + Send + Sync>;
type BBoxFn = Arc<dyn Fn() -> BBox + Send + Sync>;

/// Immutable, shape-agnostic selection result.
#[derive(Clone)]
pub struct Region {
    label: &'static str,
    params: Vec<(&'static str, f64)>,
    contains: ContainsFn,
    bbox: BBoxFn,
}

impl Region {
    /// Build a region from its parameters and geometry closures.
    ///
    /// Both closures must be pure functions of the captured geometry.
    pub fn new(
        label: &'static str,
        params: Vec<(&'static str, f64)>,
        contains: impl Fn(Point) -> bool + Send + Sync + 'static,
        bbox: impl Fn() -> BBox + Send + Sync + 'static,
    ) -> Self {
        Self {
            label,
            params,
            contains: Arc::new(contains),
            bbox: Arc::new(bbox),
        }
    }

    /// A disc of radius `r` centred on `center`.
    pub fn circle(center: Point, r: f64) -> Self {
        let (x, y) = (center.x, center.y);
        let r_sq = r * r;
        Self::new(
            CIRCLE_LABEL,
            vec![("x", x), ("y", y), ("r", r)],
            // Squared distance only; no square root per query.
            move |p| {
                let dx = p.x - x;
                let dy = p.y - y;
                dx * dx + dy * dy <= r_sq
            },
            move || BBox::new(x - r, y - r, 2.0 * r, 2.0 * r),
        )
    }

    /// Shape tag.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Named geometric parameters, in declaration order.
    pub fn params(&self) -> &[(&'static str, f64)] {
        &self.params
    }

    /// Look up one geometric parameter.
    pub fn param(&self, name: &str) -> Option<f64> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    /// Check if `point` lies inside the region (boundary included).
    pub fn contains(&self, point: Point) -> bool {
        (self.contains)(point)
    }

    /// Axis-aligned bounding box.
    pub fn bbox(&self) -> BBox {
        (self.bbox)()
    }

    /// Serialisable snapshot for hosts.
    pub fn summary(&self) -> RegionSummary {
        RegionSummary {
            label: self.label.to_string(),
            params: self
                .params
                .iter()
                .map(|(key, value)| (key.to_string(), *value))
                .collect(),
            bbox: self.bbox(),
        }
    }
}

impl PartialEq for Region {
    /// Regions are equal when they carry the same label and parameters.
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && self.params == other.params
    }
}

impl fmt::Debug for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Region")
            .field("label", &self.label)
            .field("params", &self.params)
            .field("bbox", &self.bbox())
            .finish()
    }
}

/// Plain-data view of a [`Region`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSummary {
    pub label: String,
    pub params: BTreeMap<String, f64>,
    pub bbox: BBox,
}
