use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct TransformControlsProps {
    pub on_rotate: Callback<()>,
    pub on_reset: Callback<()>,
}

/// Button row driving the hook's programmatic setters.
#[function_component(TransformControls)]
pub fn transform_controls(props: &TransformControlsProps) -> Html {
    let rotate = {
        let cb = props.on_rotate.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let reset = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="display:flex; gap:6px; align-items:center; margin-top:8px;">
        <button onclick={rotate}> {"rotate"} </button>
        <button onclick={reset}> {"reset"} </button>
    </div>}
}
