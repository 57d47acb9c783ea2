pub mod engine;
pub mod geometry;
pub mod pointer;
pub mod transform;

pub use engine::FreeScaleEngine;
pub use geometry::{ElementProbe, GeometrySnapshot, RectCache, RectSize};
pub use pointer::PointerSession;
pub use transform::TransformState;
