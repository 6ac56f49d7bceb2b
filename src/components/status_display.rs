use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatusDisplayProps {
    pub message: AttrValue,
    pub level: u32,
    pub grid_size: u32,
    #[prop_or_default]
    pub error: Option<AttrValue>,
}

#[function_component(StatusDisplay)]
pub fn status_display(props: &StatusDisplayProps) -> Html {
    html! {<div style="position:absolute; top:12px; left:50%; transform:translateX(-50%); display:flex; flex-direction:column; align-items:center; gap:4px; text-shadow:0 0 6px rgba(0,0,0,0.8);">
        <div id="timer" style="font-size:20px; font-weight:600;">{ props.message.clone() }</div>
        <div style="font-size:12px; opacity:0.8;">{ format!("Level {} · {}x{}", props.level, props.grid_size, props.grid_size) }</div>
        { if let Some(err) = &props.error { html!{ <div style="font-size:12px; color:#f85149;">{ err.clone() }</div> } } else { html!{} } }
    </div>}
}
