//! The `use_free_scale` hook: binds the engine to a container/child element
//! pair and mirrors accepted transforms into Yew render state.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlElement, MouseEvent, TouchEvent, WheelEvent};
use yew::prelude::*;

use crate::constraint::{Constraint, FreeTransform};
use crate::state::engine::{DEFAULT_SCALE_STEP, FreeScaleEngine};
use crate::state::geometry::{ElementProbe, RectSize};
use crate::state::transform::TransformState;

#[derive(Clone)]
pub struct UseFreeScaleOptions {
    /// Scale change per wheel event.
    pub scale_step: f64,
    /// Gate applied to every proposed transform.
    pub constraint: Rc<dyn Constraint>,
}

impl Default for UseFreeScaleOptions {
    fn default() -> Self {
        Self {
            scale_step: DEFAULT_SCALE_STEP,
            constraint: Rc::new(FreeTransform),
        }
    }
}

/// Measures the bound elements through `getBoundingClientRect`.
#[derive(Clone)]
struct DomProbe {
    container: NodeRef,
    child: NodeRef,
}

impl ElementProbe for DomProbe {
    fn container_rect(&self) -> Option<RectSize> {
        let rect = self.container.cast::<HtmlElement>()?.get_bounding_client_rect();
        Some(RectSize {
            width: rect.width(),
            height: rect.height(),
        })
    }

    fn child_rect(&self) -> Option<RectSize> {
        let rect = self.child.cast::<HtmlElement>()?.get_bounding_client_rect();
        Some(RectSize {
            width: rect.width(),
            height: rect.height(),
        })
    }

    fn child_center(&self) -> Option<[f64; 2]> {
        let rect = self.child.cast::<HtmlElement>()?.get_bounding_client_rect();
        Some([
            rect.left() + rect.width() / 2.0,
            rect.top() + rect.height() / 2.0,
        ])
    }
}

fn touch_points(e: &TouchEvent) -> Vec<[f64; 2]> {
    let touches = e.touches();
    (0..touches.length())
        .filter_map(|i| touches.item(i))
        .map(|t| [t.client_x() as f64, t.client_y() as f64])
        .collect()
}

/// Handle returned by [`use_free_scale`]. Cheap to clone; all clones share
/// the same engine cell and render state.
#[derive(Clone)]
pub struct UseFreeScaleHandle {
    pub container_ref: NodeRef,
    pub child_ref: NodeRef,
    state: UseStateHandle<TransformState>,
    engine: Rc<RefCell<FreeScaleEngine>>,
}

impl PartialEq for UseFreeScaleHandle {
    fn eq(&self, other: &Self) -> bool {
        self.container_ref == other.container_ref
            && self.child_ref == other.child_ref
            && *self.state == *other.state
    }
}

impl UseFreeScaleHandle {
    pub fn state(&self) -> TransformState {
        *self.state
    }

    /// Composed CSS transform string for the child's `style`.
    pub fn transform(&self) -> String {
        self.state.css_transform()
    }

    pub fn trans_xy(&self) -> [f64; 2] {
        self.state.trans_xy
    }

    pub fn scale(&self) -> f64 {
        self.state.scale
    }

    pub fn rotate(&self) -> f64 {
        self.state.rotate
    }

    pub fn set_trans_xy(&self, trans_xy: [f64; 2]) {
        self.apply(|t| t.trans_xy = trans_xy);
    }

    pub fn set_scale(&self, scale: f64) {
        self.apply(|t| t.scale = scale);
    }

    pub fn set_rotate(&self, rotate: f64) {
        self.apply(|t| t.rotate = rotate);
    }

    pub fn update_trans_xy(&self, f: impl FnOnce([f64; 2]) -> [f64; 2]) {
        self.apply(|t| t.trans_xy = f(t.trans_xy));
    }

    pub fn update_scale(&self, f: impl FnOnce(f64) -> f64) {
        self.apply(|t| t.scale = f(t.scale));
    }

    pub fn update_rotate(&self, f: impl FnOnce(f64) -> f64) {
        self.apply(|t| t.rotate = f(t.rotate));
    }

    /// Swap the constraint policy. Current state is left untouched; callers
    /// wanting a clean slate reset the setters themselves.
    pub fn set_constraint(&self, constraint: Rc<dyn Constraint>) {
        self.engine.borrow_mut().set_constraint(constraint);
    }

    /// Drop the cached container/child rects so the next constraint
    /// evaluation measures the live layout again (e.g. after a resize).
    pub fn remeasure(&self) {
        self.engine.borrow_mut().remeasure();
    }

    /// Re-center the child inside the container.
    pub fn center_child(&self) {
        let probe = DomProbe {
            container: self.container_ref.clone(),
            child: self.child_ref.clone(),
        };
        if let Some(next) = self.engine.borrow_mut().center_child(&probe) {
            self.state.set(next);
        }
    }

    fn apply(&self, f: impl FnOnce(&mut TransformState)) {
        let next = {
            let mut engine = self.engine.borrow_mut();
            let mut next = engine.transform();
            f(&mut next);
            engine.set_transform(next);
            next
        };
        self.state.set(next);
    }
}

/// Pan, zoom (wheel or pinch) and rotate a child element inside a bounding
/// container. Bind `container_ref` and `child_ref` to real elements; apply
/// `transform()` to the child's style.
#[hook]
pub fn use_free_scale(options: UseFreeScaleOptions) -> UseFreeScaleHandle {
    let container_ref = use_node_ref();
    let child_ref = use_node_ref();
    let state = use_state(TransformState::default);
    let engine = {
        let options = options.clone();
        use_mut_ref(move || FreeScaleEngine::new(options.scale_step, options.constraint))
    };
    let raf_id = use_mut_ref(|| None::<i32>);

    // Initial centering and listener wiring, once per mount. Skipped until
    // both elements are attached.
    {
        let container_ref = container_ref.clone();
        let child_ref = child_ref.clone();
        let state = state.clone();
        let engine = engine.clone();
        let raf_id = raf_id.clone();
        use_effect_with((), move |_| -> Box<dyn FnOnce()> {
            let window = web_sys::window().expect("no global `window` exists");
            let document = window.document().expect("should have a document on window");
            let (Some(container), Some(child)) = (
                container_ref.cast::<HtmlElement>(),
                child_ref.cast::<HtmlElement>(),
            ) else {
                return Box::new(|| ());
            };
            let probe = DomProbe {
                container: container_ref.clone(),
                child: child_ref.clone(),
            };

            // Start with the child centered in the container.
            if let Some(next) = engine.borrow_mut().center_child(&probe) {
                state.set(next);
            }

            // Pan application is coalesced to one pending frame; scheduling
            // a new one cancels the callback that has not fired yet.
            let apply_cb: Rc<Closure<dyn FnMut()>> = {
                let state = state.clone();
                let engine = engine.clone();
                let raf_id = raf_id.clone();
                Rc::new(Closure::wrap(Box::new(move || {
                    *raf_id.borrow_mut() = None;
                    state.set(engine.borrow().transform());
                }) as Box<dyn FnMut()>))
            };
            let schedule_apply: Rc<dyn Fn()> = {
                let window = window.clone();
                let raf_id = raf_id.clone();
                let apply_cb = apply_cb.clone();
                Rc::new(move || {
                    if let Some(id) = raf_id.borrow_mut().take() {
                        let _ = window.cancel_animation_frame(id);
                    }
                    if let Ok(id) =
                        window.request_animation_frame(apply_cb.as_ref().as_ref().unchecked_ref())
                    {
                        *raf_id.borrow_mut() = Some(id);
                    }
                })
            };

            // Wheel zoom over the container; discrete per event, applied
            // directly without frame coalescing.
            let wheel_cb = {
                let engine = engine.clone();
                let state = state.clone();
                let probe = probe.clone();
                Closure::wrap(Box::new(move |e: WheelEvent| {
                    e.prevent_default();
                    let next = engine.borrow_mut().wheel(
                        e.delta_y(),
                        [e.client_x() as f64, e.client_y() as f64],
                        &probe,
                    );
                    if let Some(next) = next {
                        state.set(next);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            container
                .add_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref())
                .ok();

            let mousedown_cb = {
                let engine = engine.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    if e.button() != 0 {
                        return;
                    }
                    engine
                        .borrow_mut()
                        .pointer_down([e.client_x() as f64, e.client_y() as f64]);
                }) as Box<dyn FnMut(_)>)
            };
            child
                .add_event_listener_with_callback("mousedown", mousedown_cb.as_ref().unchecked_ref())
                .ok();

            // Move and release listen on the document so a drag that leaves
            // the child keeps panning and still terminates.
            let mousemove_cb = {
                let engine = engine.clone();
                let probe = probe.clone();
                let schedule_apply = schedule_apply.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    if !engine.borrow().is_locked() {
                        return;
                    }
                    e.prevent_default();
                    let moved = engine
                        .borrow_mut()
                        .pointer_move([e.client_x() as f64, e.client_y() as f64], &probe);
                    if moved.is_some() {
                        schedule_apply();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            document
                .add_event_listener_with_callback("mousemove", mousemove_cb.as_ref().unchecked_ref())
                .ok();

            let mouseup_cb = {
                let engine = engine.clone();
                Closure::wrap(Box::new(move |_e: MouseEvent| {
                    engine.borrow_mut().pointer_up();
                }) as Box<dyn FnMut(_)>)
            };
            document
                .add_event_listener_with_callback("mouseup", mouseup_cb.as_ref().unchecked_ref())
                .ok();

            let touch_start_cb = {
                let engine = engine.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let points = touch_points(&e);
                    if points.is_empty() {
                        return;
                    }
                    e.prevent_default();
                    engine.borrow_mut().touch_start(&points);
                }) as Box<dyn FnMut(_)>)
            };
            container
                .add_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                )
                .ok();

            let touch_move_cb = {
                let engine = engine.clone();
                let state = state.clone();
                let probe = probe.clone();
                let schedule_apply = schedule_apply.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let points = touch_points(&e);
                    if points.is_empty() {
                        return;
                    }
                    e.prevent_default();
                    let next = engine.borrow_mut().touch_move(&points, &probe);
                    let Some(next) = next else {
                        return;
                    };
                    if points.len() == 1 {
                        // Single-touch pan coalesces like the mouse path.
                        schedule_apply();
                    } else {
                        state.set(next);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            document
                .add_event_listener_with_callback("touchmove", touch_move_cb.as_ref().unchecked_ref())
                .ok();

            let touch_end_cb = {
                let engine = engine.clone();
                Closure::wrap(Box::new(move |_e: TouchEvent| {
                    engine.borrow_mut().touch_end();
                }) as Box<dyn FnMut(_)>)
            };
            document
                .add_event_listener_with_callback("touchend", touch_end_cb.as_ref().unchecked_ref())
                .ok();
            document
                .add_event_listener_with_callback(
                    "touchcancel",
                    touch_end_cb.as_ref().unchecked_ref(),
                )
                .ok();

            let window_clone = window.clone();
            Box::new(move || {
                let _ = container.remove_event_listener_with_callback(
                    "wheel",
                    wheel_cb.as_ref().unchecked_ref(),
                );
                let _ = child.remove_event_listener_with_callback(
                    "mousedown",
                    mousedown_cb.as_ref().unchecked_ref(),
                );
                let _ = document.remove_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                );
                let _ = document.remove_event_listener_with_callback(
                    "mouseup",
                    mouseup_cb.as_ref().unchecked_ref(),
                );
                let _ = container.remove_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                );
                let _ = document.remove_event_listener_with_callback(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                );
                let _ = document.remove_event_listener_with_callback(
                    "touchend",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                let _ = document.remove_event_listener_with_callback(
                    "touchcancel",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                if let Some(id) = raf_id.borrow_mut().take() {
                    let _ = window_clone.cancel_animation_frame(id);
                }
                // Keep closures in scope until here so they aren't dropped early.
                let _keep_alive = (
                    wheel_cb,
                    mousedown_cb,
                    mousemove_cb,
                    mouseup_cb,
                    touch_start_cb,
                    touch_move_cb,
                    touch_end_cb,
                    apply_cb,
                );
            })
        });
    }

    UseFreeScaleHandle {
        container_ref,
        child_ref,
        state,
        engine,
    }
}
