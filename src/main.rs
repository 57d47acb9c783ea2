use yew::prelude::*;

use yew_free_scale::components::FreeScaleViewer;

#[function_component(App)]
fn app() -> Html {
    html! {
        <div id="root">
            <FreeScaleViewer />
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
