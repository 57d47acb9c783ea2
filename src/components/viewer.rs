use std::rc::Rc;

use yew::prelude::*;

use crate::components::controls::TransformControls;
use crate::constraint::{ContainWithin, Constraint, FreeTransform, ScaleRange};
use crate::hook::{UseFreeScaleOptions, use_free_scale};
use crate::util::clog;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Policy {
    Free,
    LimitScale,
    ContainerLimit,
}

impl Policy {
    const ALL: [Policy; 3] = [Policy::Free, Policy::LimitScale, Policy::ContainerLimit];

    fn label(self) -> &'static str {
        match self {
            Policy::Free => "free",
            Policy::LimitScale => "limit scale",
            Policy::ContainerLimit => "container limit",
        }
    }

    fn constraint(self) -> Rc<dyn Constraint> {
        match self {
            Policy::Free => Rc::new(FreeTransform),
            Policy::LimitScale => Rc::new(ScaleRange { min: 0.3, max: 3.0 }),
            Policy::ContainerLimit => Rc::new(ContainWithin),
        }
    }
}

/// Demo viewer: drag the child to pan, wheel or pinch over the container to
/// zoom, pick a constraint policy, rotate/reset by button.
#[function_component(FreeScaleViewer)]
pub fn free_scale_viewer() -> Html {
    let policy = use_state(|| Policy::Free);
    let handle = use_free_scale(UseFreeScaleOptions::default());

    let select_policy = {
        let policy = policy.clone();
        let handle = handle.clone();
        move |next: Policy| {
            let policy = policy.clone();
            let handle = handle.clone();
            Callback::from(move |_: Event| {
                // Switching policies starts from a clean slate, as the
                // previous policy may have let the state somewhere the new
                // one would never admit.
                handle.set_rotate(0.0);
                handle.set_scale(1.0);
                handle.set_trans_xy([0.0, 0.0]);
                handle.set_constraint(next.constraint());
                clog(&format!("constraint -> {}", next.label()));
                policy.set(next);
            })
        }
    };

    let on_rotate = {
        let handle = handle.clone();
        Callback::from(move |_| handle.update_rotate(|prev| prev + 30.0))
    };
    let on_reset = {
        let handle = handle.clone();
        Callback::from(move |_| {
            handle.set_rotate(0.0);
            handle.set_scale(1.0);
            handle.set_trans_xy([0.0, 0.0]);
        })
    };

    html! {
        <div style="padding:12px;">
            <div
                ref={handle.container_ref.clone()}
                style="position:relative; width:600px; height:400px; overflow:hidden; background:#0e1116; border:1px solid #30363d; border-radius:8px; touch-action:none;"
            >
                <div
                    ref={handle.child_ref.clone()}
                    style={format!(
                        "width:160px; height:120px; background:#1f6feb; border-radius:4px; display:flex; align-items:center; justify-content:center; color:#fff; user-select:none; cursor:grab; transform:{};",
                        handle.transform()
                    )}
                >
                    {"content"}
                </div>
            </div>
            <div style="display:flex; gap:12px; align-items:center; margin-top:8px;">
                { for Policy::ALL.iter().map(|p| {
                    let p = *p;
                    html! {
                        <label style="display:flex; gap:4px; align-items:center;">
                            <input
                                type="radio"
                                checked={*policy == p}
                                onchange={select_policy(p)}
                            />
                            { p.label() }
                        </label>
                    }
                }) }
            </div>
            <TransformControls on_rotate={on_rotate} on_reset={on_reset} />
        </div>
    }
}
