//! The constraint gate every proposed transform passes through, plus the
//! shipped policies.

use serde::{Deserialize, Serialize};

use crate::state::geometry::GeometrySnapshot;
use crate::state::transform::TransformState;

/// Which gesture branch produced a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Move,
    Scale,
}

/// Decides whether a proposed transform is admitted. Return `proposed` to
/// accept, `*prev` to reject, or any synthesized value to clamp; the engine
/// applies the return value verbatim and performs no validation of its own.
pub trait Constraint {
    fn evaluate(
        &self,
        prev: &TransformState,
        proposed: TransformState,
        rects: &GeometrySnapshot,
        action: Action,
    ) -> TransformState;
}

impl<F> Constraint for F
where
    F: Fn(&TransformState, TransformState, &GeometrySnapshot, Action) -> TransformState,
{
    fn evaluate(
        &self,
        prev: &TransformState,
        proposed: TransformState,
        rects: &GeometrySnapshot,
        action: Action,
    ) -> TransformState {
        self(prev, proposed, rects, action)
    }
}

/// Default policy: accept everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct FreeTransform;

impl Constraint for FreeTransform {
    fn evaluate(
        &self,
        _prev: &TransformState,
        proposed: TransformState,
        _rects: &GeometrySnapshot,
        _action: Action,
    ) -> TransformState {
        proposed
    }
}

/// Rejects proposals whose scale leaves the open interval `(min, max)`.
#[derive(Clone, Copy, Debug)]
pub struct ScaleRange {
    pub min: f64,
    pub max: f64,
}

impl Constraint for ScaleRange {
    fn evaluate(
        &self,
        prev: &TransformState,
        proposed: TransformState,
        _rects: &GeometrySnapshot,
        _action: Action,
    ) -> TransformState {
        if proposed.scale <= self.min || proposed.scale >= self.max {
            *prev
        } else {
            proposed
        }
    }
}

/// Rejects proposals that would push the scaled child across the container
/// edge. Absent rects count as zero extent.
#[derive(Clone, Copy, Debug, Default)]
pub struct ContainWithin;

impl Constraint for ContainWithin {
    fn evaluate(
        &self,
        prev: &TransformState,
        proposed: TransformState,
        rects: &GeometrySnapshot,
        _action: Action,
    ) -> TransformState {
        let container_w = rects.container.map_or(0.0, |r| r.width);
        let container_h = rects.container.map_or(0.0, |r| r.height);
        let child_w = rects.child.map_or(0.0, |r| r.width);
        let child_h = rects.child.map_or(0.0, |r| r.height);

        // Translation magnitude plus the scaled half-extent must stay inside
        // the container's half-extent on both axes.
        let fits_x =
            proposed.trans_xy[0].abs() + child_w * proposed.scale / 2.0 < container_w / 2.0;
        let fits_y =
            proposed.trans_xy[1].abs() + child_h * proposed.scale / 2.0 < container_h / 2.0;

        if fits_x && fits_y { proposed } else { *prev }
    }
}
