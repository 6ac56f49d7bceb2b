use super::game_view::GameView;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    html! {<div id="app" style="font-family:sans-serif; color:#e6edf3;">
        <GameView />
    </div>}
}
