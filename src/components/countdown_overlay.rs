use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CountdownOverlayProps {
    pub value: Option<u8>,
}

#[function_component]
pub fn CountdownOverlay(props: &CountdownOverlayProps) -> Html {
    let Some(n) = props.value else {
        return html! {};
    };
    html! {
        <div id="countdown" style="position:absolute; bottom:10%; left:50%; transform:translateX(-50%); font-size:80px; font-weight:500; color:rgb(255, 255, 255); text-shadow:0 0 20px rgba(217, 0, 255, 0.6); pointer-events:none; z-index:999;">
            { n }
        </div>
    }
}
