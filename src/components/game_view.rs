use gloo_timers::callback::Timeout;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlCanvasElement, HtmlVideoElement};
use yew::prelude::*;

use crate::hands::HandTracker;
use crate::model::{Phase, PuzzleAction, PuzzleState};
use crate::render::{draw_overlay, draw_scene};
use crate::state::detect_pinch;
use crate::util::{context_2d, fresh_seed};

use super::{
    controls_panel::ControlsPanel, countdown_overlay::CountdownOverlay,
    status_display::StatusDisplay,
};

const LAYER_STYLE: &str =
    "position:absolute; top:0; left:0; width:100%; height:100%; object-fit:contain;";

#[function_component(GameView)]
pub fn game_view() -> Html {
    let video_ref = use_node_ref();
    let canvas_ref = use_node_ref();
    let overlay_ref = use_node_ref();
    let puzzle = use_reducer(PuzzleState::default);
    let puzzle_ref = use_mut_ref(|| puzzle.clone());
    let draw_ref = use_mut_ref(|| None::<Rc<dyn Fn()>>);
    let tracker_error = use_state(|| None::<String>);

    // Effect: keep the latest handle for callbacks and redraw on every accepted action
    {
        let puzzle_ref = puzzle_ref.clone();
        let current_handle = puzzle.clone();
        let draw_ref = draw_ref.clone();
        use_effect_with(puzzle.version, move |_| {
            *puzzle_ref.borrow_mut() = current_handle;
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
            || ()
        });
    }
    // Effect: game flow timer. A new key drops the pending Timeout, which cancels it.
    {
        let key = (puzzle.round, puzzle.phase, puzzle.countdown);
        let step = puzzle.pending_step();
        let dispatcher = puzzle.dispatcher();
        use_effect_with(key, move |&(round, _, _)| {
            let pending = step.map(|(step, delay_ms)| {
                log::debug!("round {}: {:?} in {}ms", round, step, delay_ms);
                Timeout::new(delay_ms, move || {
                    dispatcher.dispatch(step.into_action(round, fresh_seed()));
                })
            });
            move || drop(pending)
        });
    }
    // Main mount effect (sizing, drawing, hand tracking)
    {
        let video_ref = video_ref.clone();
        let canvas_ref = canvas_ref.clone();
        let overlay_ref = overlay_ref.clone();
        let puzzle_ref = puzzle_ref.clone();
        let draw_ref_setup = draw_ref.clone();
        let dispatcher = puzzle.dispatcher();
        let config = puzzle.config.clone();
        let tracker_error = tracker_error.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window();
            let video = video_ref.cast::<HtmlVideoElement>();
            let canvas = canvas_ref.cast::<HtmlCanvasElement>();
            let overlay = overlay_ref.cast::<HtmlCanvasElement>();
            let teardown: Option<Box<dyn FnOnce()>> = if let (
                Some(window),
                Some(video),
                Some(canvas),
                Some(overlay),
            ) = (window, video, canvas, overlay)
            {
                // Draw closure
                let draw_closure: Rc<dyn Fn()> = {
                    let canvas = canvas.clone();
                    let puzzle_ref = puzzle_ref.clone();
                    Rc::new(move || {
                        if !canvas.is_connected() {
                            return;
                        }
                        if let Some(ctx) = context_2d(&canvas) {
                            let handle = puzzle_ref.borrow();
                            draw_scene(&ctx, &handle);
                        }
                    })
                };
                *draw_ref_setup.borrow_mut() = Some(draw_closure.clone());

                // Canvases follow the video's intrinsic size
                let resize_cb = {
                    let video = video.clone();
                    let canvas = canvas.clone();
                    let overlay = overlay.clone();
                    let dispatcher = dispatcher.clone();
                    let config = config.clone();
                    Closure::wrap(Box::new(move |_e: web_sys::Event| {
                        let width = Some(video.video_width())
                            .filter(|w| *w > 0)
                            .unwrap_or(config.fallback_width);
                        let height = Some(video.video_height())
                            .filter(|h| *h > 0)
                            .unwrap_or(config.fallback_height);
                        canvas.set_width(width);
                        canvas.set_height(height);
                        overlay.set_width(width);
                        overlay.set_height(height);
                        dispatcher.dispatch(PuzzleAction::Resize {
                            width: width as f64,
                            height: height as f64,
                        });
                        // resizing wipes the bitmap even when the size is unchanged
                        draw_closure();
                    }) as Box<dyn FnMut(_)>)
                };
                window
                    .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                    .ok();
                video
                    .add_event_listener_with_callback(
                        "loadedmetadata",
                        resize_cb.as_ref().unchecked_ref(),
                    )
                    .ok();
                canvas.set_width(config.fallback_width);
                canvas.set_height(config.fallback_height);
                overlay.set_width(config.fallback_width);
                overlay.set_height(config.fallback_height);
                if let Some(f) = &*draw_ref_setup.borrow() {
                    f();
                }

                // Detector frames: overlay, pinch, drag
                let on_hands = {
                    let overlay = overlay.clone();
                    let dispatcher = dispatcher.clone();
                    let ratio = config.pinch_ratio;
                    move |hands: Vec<crate::state::Hand>| {
                        let w = overlay.width() as f64;
                        let h = overlay.height() as f64;
                        let pinch = detect_pinch(&hands, w, h, ratio);
                        if let Some(octx) = context_2d(&overlay) {
                            draw_overlay(&octx, w, h, &hands, pinch);
                        }
                        dispatcher.dispatch(PuzzleAction::Pinch(pinch));
                    }
                };
                let tracker = match HandTracker::start(
                    &video,
                    &config,
                    config.fallback_width,
                    config.fallback_height,
                    on_hands,
                ) {
                    Ok(t) => Some(t),
                    Err(e) => {
                        log::error!("hand tracking unavailable: {:?}", e);
                        tracker_error.set(Some("Hand tracking unavailable".to_string()));
                        None
                    }
                };

                // Cleanup
                let window_clone = window.clone();
                Some(Box::new(move || {
                    let _ = window_clone.remove_event_listener_with_callback(
                        "resize",
                        resize_cb.as_ref().unchecked_ref(),
                    );
                    let _ = video.remove_event_listener_with_callback(
                        "loadedmetadata",
                        resize_cb.as_ref().unchecked_ref(),
                    );
                    drop(tracker);
                }))
            } else {
                log::warn!("game view mounted without its video/canvas elements");
                None
            };
            move || {
                if let Some(f) = teardown {
                    f();
                }
            }
        });
    }

    let on_start: Callback<()> = {
        let puzzle = puzzle.clone();
        Callback::from(move |()| puzzle.dispatch(PuzzleAction::StartRound { seed: fresh_seed() }))
    };
    let on_complete: Callback<()> = {
        let puzzle = puzzle.clone();
        Callback::from(move |()| puzzle.dispatch(PuzzleAction::Check))
    };
    let on_hint: Callback<()> = {
        let puzzle = puzzle.clone();
        Callback::from(move |()| puzzle.dispatch(PuzzleAction::Hint))
    };

    let can_submit = matches!(puzzle.phase, Phase::Scattered | Phase::Peeking);
    let error = (*tracker_error).clone().map(AttrValue::from);

    html! {<div style="position:relative; width:100vw; height:100vh; background:#0e1116; overflow:hidden;">
        <video ref={video_ref.clone()} id="webcam" autoplay={true} playsinline={true} muted={true}
            style={format!("{} transform:scaleX(-1);", LAYER_STYLE)}></video>
        <canvas ref={canvas_ref.clone()} id="gameCanvas" style={LAYER_STYLE}></canvas>
        <canvas ref={overlay_ref.clone()} id="overlay" style={format!("{} pointer-events:none;", LAYER_STYLE)}></canvas>
        <StatusDisplay message={puzzle.status.message()} level={puzzle.level} grid_size={puzzle.grid_size} error={error} />
        <CountdownOverlay value={puzzle.countdown} />
        <ControlsPanel on_start={on_start} on_complete={on_complete} on_hint={on_hint} can_submit={can_submit} />
    </div>}
}
