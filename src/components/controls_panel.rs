use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub on_start: Callback<()>,
    pub on_complete: Callback<()>,
    pub on_hint: Callback<()>,
    /// Complete and Hint only make sense once the piece is on the board.
    pub can_submit: bool,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let start_cb = {
        let cb = props.on_start.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let complete_cb = {
        let cb = props.on_complete.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let hint_cb = {
        let cb = props.on_hint.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="position:absolute; bottom:16px; left:50%; transform:translateX(-50%); background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; display:flex; gap:8px;">
        <button id="startBtn" onclick={start_cb}>{"Start"}</button>
        <button id="completeBtn" onclick={complete_cb} disabled={!props.can_submit}>{"Complete"}</button>
        <button id="hintBtn" onclick={hint_cb} disabled={!props.can_submit}>{"Hint"}</button>
    </div>}
}
