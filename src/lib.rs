//! Pan / zoom / rotate interaction engine for Yew.
//!
//! The [`use_free_scale`] hook tracks pointer, wheel and touch input over a
//! container/child element pair and composes a single CSS 2D transform.
//! Every proposed update passes a pluggable [`Constraint`] gate that can
//! reject or clamp it (scale limits, containment, anything else).
//!
//! The gesture math lives in [`FreeScaleEngine`], which is free of web-sys
//! and usable headless.

pub mod components;
pub mod constraint;
pub mod hook;
pub mod state;
pub mod util;

pub use constraint::{Action, ContainWithin, Constraint, FreeTransform, ScaleRange};
pub use hook::{UseFreeScaleHandle, UseFreeScaleOptions, use_free_scale};
pub use state::engine::{DEFAULT_SCALE_STEP, FreeScaleEngine};
pub use state::geometry::{ElementProbe, GeometrySnapshot, RectSize};
pub use state::transform::TransformState;
