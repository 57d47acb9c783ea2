// Gesture recognizer and transform state machine.
//
// Owns the canonical transform; every gesture proposal passes the constraint
// gate before it lands here. Free of web-sys so it can run headless in tests;
// the hook adapts DOM events into these calls.
use std::rc::Rc;

use crate::constraint::{Action, Constraint, FreeTransform};
use crate::state::geometry::{ElementProbe, RectCache, distance, midpoint};
use crate::state::pointer::PointerSession;
use crate::state::transform::TransformState;

pub const DEFAULT_SCALE_STEP: f64 = 0.1;

pub struct FreeScaleEngine {
    scale_step: f64,
    constraint: Rc<dyn Constraint>,
    transform: TransformState,
    session: PointerSession,
    rects: RectCache,
}

impl Default for FreeScaleEngine {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE_STEP, Rc::new(FreeTransform))
    }
}

impl FreeScaleEngine {
    pub fn new(scale_step: f64, constraint: Rc<dyn Constraint>) -> Self {
        Self {
            scale_step,
            constraint,
            transform: TransformState::default(),
            session: PointerSession::default(),
            rects: RectCache::default(),
        }
    }

    pub fn transform(&self) -> TransformState {
        self.transform
    }

    pub fn set_transform(&mut self, transform: TransformState) {
        self.transform = transform;
    }

    pub fn scale_step(&self) -> f64 {
        self.scale_step
    }

    pub fn is_locked(&self) -> bool {
        self.session.locked
    }

    pub fn set_constraint(&mut self, constraint: Rc<dyn Constraint>) {
        self.constraint = constraint;
    }

    /// Drop the cached rects so the next gate evaluation measures the live
    /// layout again. The cache is never invalidated on resize by itself.
    pub fn remeasure(&mut self) {
        self.rects.clear();
    }

    /// Place the child at the container's center. Skipped while either
    /// element is unmeasurable.
    pub fn center_child(&mut self, probe: &dyn ElementProbe) -> Option<TransformState> {
        let container = probe.container_rect()?;
        let child = probe.child_rect()?;
        self.transform.trans_xy = [
            (container.width - child.width) / 2.0,
            (container.height - child.height) / 2.0,
        ];
        Some(self.transform)
    }

    /// Primary-button press or single-touch start: lock a pan session.
    /// Starting a session invalidates the previous session's rect cache.
    pub fn pointer_down(&mut self, point: [f64; 2]) {
        self.rects.clear();
        self.session.lock(point);
    }

    /// Drag while locked: accumulate the delta into a `Move` proposal.
    /// Only the gate's translation is applied; scale and rotation stay put.
    pub fn pointer_move(
        &mut self,
        point: [f64; 2],
        probe: &dyn ElementProbe,
    ) -> Option<TransformState> {
        if !self.session.locked {
            return None;
        }
        let prev = self.transform;
        let delta = [
            point[0] - self.session.last_xy[0],
            point[1] - self.session.last_xy[1],
        ];
        self.session.last_xy = point;
        let proposed = TransformState {
            trans_xy: [prev.trans_xy[0] + delta[0], prev.trans_xy[1] + delta[1]],
            ..prev
        };
        let rects = self.rects.snapshot(probe);
        let accepted = self.constraint.evaluate(&prev, proposed, &rects, Action::Move);
        self.transform.trans_xy = accepted.trans_xy;
        Some(self.transform)
    }

    /// Release, wherever it lands in the document, always unlocks.
    pub fn pointer_up(&mut self) {
        self.session.unlock();
    }

    /// Wheel step over the container. A locked pan session suppresses it;
    /// a zero vertical delta is a no-op.
    pub fn wheel(
        &mut self,
        delta_y: f64,
        point: [f64; 2],
        probe: &dyn ElementProbe,
    ) -> Option<TransformState> {
        if delta_y == 0.0 || self.session.locked {
            return None;
        }
        let direc = if delta_y > 0.0 { -1.0 } else { 1.0 };
        self.scale_about(direc, self.scale_step, point, probe)
    }

    pub fn touch_start(&mut self, points: &[[f64; 2]]) {
        match points {
            [p] => self.pointer_down(*p),
            [p1, p2, ..] => {
                self.rects.clear();
                self.session.touch_pair = Some([*p1, *p2]);
            }
            [] => {}
        }
    }

    /// One contact pans (while locked); two contacts pinch. The recorded
    /// pair is refreshed on every move, so a pinch is a sequence of small
    /// relative steps rather than one computed against the original grip.
    pub fn touch_move(
        &mut self,
        points: &[[f64; 2]],
        probe: &dyn ElementProbe,
    ) -> Option<TransformState> {
        match points {
            [p] => self.pointer_move(*p, probe),
            [p1, p2, ..] => {
                let Some([q1, q2]) = self.session.touch_pair.replace([*p1, *p2]) else {
                    // No previous grip to compare against yet.
                    return None;
                };
                let prev_dist = distance(q1, q2);
                let dist = distance(*p1, *p2);
                if prev_dist == 0.0 {
                    return None;
                }
                let direc = if dist > prev_dist { 1.0 } else { -1.0 };
                let scale_delta = ((dist - prev_dist) / prev_dist).abs();
                self.scale_about(direc, scale_delta, midpoint(*p1, *p2), probe)
            }
            [] => None,
        }
    }

    pub fn touch_end(&mut self) {
        self.session.unlock();
    }

    /// Shared anchored-zoom path for wheel steps and pinch deltas. The
    /// translation adjustment keeps the target point visually stationary
    /// while the scale changes around the child's current center.
    fn scale_about(
        &mut self,
        direc: f64,
        scale_delta: f64,
        target: [f64; 2],
        probe: &dyn ElementProbe,
    ) -> Option<TransformState> {
        let center = probe.child_center()?;
        let prev = self.transform;
        let offset = [
            ((target[0] - center[0]) * direc / prev.scale) * scale_delta,
            ((target[1] - center[1]) * direc / prev.scale) * scale_delta,
        ];
        let proposed = TransformState {
            trans_xy: [prev.trans_xy[0] - offset[0], prev.trans_xy[1] - offset[1]],
            scale: prev.scale + direc * scale_delta,
            rotate: prev.rotate,
        };
        let rects = self.rects.snapshot(probe);
        self.transform = self
            .constraint
            .evaluate(&prev, proposed, &rects, Action::Scale);
        Some(self.transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::geometry::RectSize;

    struct FixedLayout {
        child_center: [f64; 2],
    }

    impl ElementProbe for FixedLayout {
        fn container_rect(&self) -> Option<RectSize> {
            Some(RectSize {
                width: 400.0,
                height: 300.0,
            })
        }

        fn child_rect(&self) -> Option<RectSize> {
            Some(RectSize {
                width: 100.0,
                height: 100.0,
            })
        }

        fn child_center(&self) -> Option<[f64; 2]> {
            Some(self.child_center)
        }
    }

    fn probe() -> FixedLayout {
        FixedLayout {
            child_center: [200.0, 150.0],
        }
    }

    #[test]
    fn pan_accumulates_deltas_while_locked() {
        let mut engine = FreeScaleEngine::default();
        engine.pointer_down([10.0, 10.0]);
        engine.pointer_move([15.0, 12.0], &probe());
        engine.pointer_move([20.0, 20.0], &probe());
        let last = engine.pointer_move([30.0, 5.0], &probe()).unwrap();
        assert_eq!(last.trans_xy, [20.0, -5.0]);
        assert_eq!(last.scale, 1.0);
        assert_eq!(last.rotate, 0.0);
    }

    #[test]
    fn move_without_lock_is_ignored() {
        let mut engine = FreeScaleEngine::default();
        assert!(engine.pointer_move([50.0, 50.0], &probe()).is_none());
        assert_eq!(engine.transform(), TransformState::default());
    }

    #[test]
    fn release_always_unlocks() {
        let mut engine = FreeScaleEngine::default();
        engine.pointer_down([0.0, 0.0]);
        assert!(engine.is_locked());
        // Release can arrive at the document level, far outside the child.
        engine.pointer_up();
        assert!(!engine.is_locked());
        assert!(engine.pointer_move([99.0, 99.0], &probe()).is_none());
    }

    #[test]
    fn wheel_is_suppressed_while_panning() {
        let mut engine = FreeScaleEngine::default();
        engine.pointer_down([0.0, 0.0]);
        assert!(engine.wheel(-120.0, [200.0, 150.0], &probe()).is_none());
        assert_eq!(engine.transform().scale, 1.0);
    }

    #[test]
    fn zero_wheel_delta_is_a_noop() {
        let mut engine = FreeScaleEngine::default();
        assert!(engine.wheel(0.0, [200.0, 150.0], &probe()).is_none());
    }

    #[test]
    fn wheel_at_child_center_steps_scale_only() {
        let mut engine = FreeScaleEngine::default();
        let next = engine.wheel(-120.0, [200.0, 150.0], &probe()).unwrap();
        assert_eq!(next.scale, 1.1);
        assert_eq!(next.trans_xy, [0.0, 0.0]);
        assert_eq!(next.rotate, 0.0);
    }

    #[test]
    fn wheel_zoom_direction_follows_delta_sign() {
        let mut engine = FreeScaleEngine::default();
        engine.wheel(120.0, [210.0, 160.0], &probe());
        assert!((engine.transform().scale - 0.9).abs() < 1e-12);
        engine.wheel(-120.0, [210.0, 160.0], &probe());
        engine.wheel(-120.0, [210.0, 160.0], &probe());
        assert!(engine.transform().scale > 1.0);
    }

    #[test]
    fn pinch_apart_zooms_in_and_refreshes_grip() {
        let mut engine = FreeScaleEngine::default();
        engine.touch_start(&[[100.0, 100.0], [200.0, 100.0]]);
        // Distance grows 100 -> 120: +20% relative step.
        let next = engine
            .touch_move(&[[90.0, 100.0], [210.0, 100.0]], &probe())
            .unwrap();
        assert!((next.scale - 1.2).abs() < 1e-12);
        // The grip was refreshed, so the next step is relative to 120:
        // 120 -> 132 is +10%, applied additively.
        let next = engine
            .touch_move(&[[84.0, 100.0], [216.0, 100.0]], &probe())
            .unwrap();
        assert!((next.scale - 1.3).abs() < 1e-12);
    }

    #[test]
    fn pinch_together_zooms_out() {
        let mut engine = FreeScaleEngine::default();
        engine.touch_start(&[[100.0, 100.0], [200.0, 100.0]]);
        let next = engine
            .touch_move(&[[110.0, 100.0], [190.0, 100.0]], &probe())
            .unwrap();
        assert!((next.scale - 0.8).abs() < 1e-12);
    }

    #[test]
    fn pinch_with_coincident_previous_points_is_skipped() {
        let mut engine = FreeScaleEngine::default();
        engine.touch_start(&[[100.0, 100.0], [100.0, 100.0]]);
        assert!(
            engine
                .touch_move(&[[90.0, 100.0], [110.0, 100.0]], &probe())
                .is_none()
        );
    }

    #[test]
    fn single_touch_pans_like_a_pointer() {
        let mut engine = FreeScaleEngine::default();
        engine.touch_start(&[[40.0, 40.0]]);
        let next = engine.touch_move(&[[48.0, 37.0]], &probe()).unwrap();
        assert_eq!(next.trans_xy, [8.0, -3.0]);
        engine.touch_end();
        assert!(engine.touch_move(&[[60.0, 60.0]], &probe()).is_none());
    }

    #[test]
    fn center_child_splits_the_difference() {
        let mut engine = FreeScaleEngine::default();
        let next = engine.center_child(&probe()).unwrap();
        assert_eq!(next.trans_xy, [150.0, 100.0]);
    }

    struct Unmeasurable;

    impl ElementProbe for Unmeasurable {
        fn container_rect(&self) -> Option<RectSize> {
            None
        }
        fn child_rect(&self) -> Option<RectSize> {
            None
        }
        fn child_center(&self) -> Option<[f64; 2]> {
            None
        }
    }

    #[test]
    fn unmeasurable_elements_skip_scaling() {
        let mut engine = FreeScaleEngine::default();
        assert!(engine.center_child(&Unmeasurable).is_none());
        assert!(engine.wheel(-120.0, [10.0, 10.0], &Unmeasurable).is_none());
        assert_eq!(engine.transform(), TransformState::default());
    }
}
