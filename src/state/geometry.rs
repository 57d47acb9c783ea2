// Rect types, point math, and the per-session geometry cache.
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectSize {
    pub width: f64,
    pub height: f64,
}

/// Container/child rects handed to the constraint gate. Either side may be
/// absent when the element was never measured; arithmetic treats an absent
/// rect's extents as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeometrySnapshot {
    pub container: Option<RectSize>,
    pub child: Option<RectSize>,
}

/// Measurement seam between the engine and the live layout.
pub trait ElementProbe {
    fn container_rect(&self) -> Option<RectSize>;
    fn child_rect(&self) -> Option<RectSize>;
    /// Current on-screen center of the child, in client coordinates.
    /// Measured live on every call, never cached: the anchored-zoom pivot
    /// needs the post-transform position.
    fn child_center(&self) -> Option<[f64; 2]>;
}

/// Lazily captured rects, stable for one interaction session. Re-querying
/// layout on every move event is expensive and can drift while the element
/// itself moves, so the first measurement within a session wins.
#[derive(Default, Debug, Clone)]
pub struct RectCache {
    container: Option<RectSize>,
    child: Option<RectSize>,
}

impl RectCache {
    /// Cached rects, measuring through the probe at most once per session.
    pub fn snapshot(&mut self, probe: &dyn ElementProbe) -> GeometrySnapshot {
        if self.container.is_none() {
            self.container = probe.container_rect();
        }
        if self.child.is_none() {
            self.child = probe.child_rect();
        }
        GeometrySnapshot {
            container: self.container,
            child: self.child,
        }
    }

    pub fn clear(&mut self) {
        self.container = None;
        self.child = None;
    }
}

pub fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt()
}

pub fn midpoint(a: [f64; 2], b: [f64; 2]) -> [f64; 2] {
    [(a[0] + b[0]) / 2.0, (a[1] + b[1]) / 2.0]
}
