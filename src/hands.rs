//! Bindings to the MediaPipe `Hands` detector and `Camera` helper, both loaded
//! as globals by `index.html`.
//!
//! [`HandTracker`] wires the webcam to the detector and hands every result,
//! already parsed into landmark lists, to a Rust callback. Dropping the
//! tracker stops the camera and releases the JS closures.

use js_sys::{Function, JSON, Object, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlVideoElement;

use crate::config::GameConfig;
use crate::state::{Hand, parse_hands};

const MODEL_CDN: &str = "https://cdn.jsdelivr.net/npm/@mediapipe/hands/";

#[wasm_bindgen]
extern "C" {
    #[derive(Clone)]
    type Hands;

    #[wasm_bindgen(catch, constructor)]
    fn new(config: &JsValue) -> Result<Hands, JsValue>;

    #[wasm_bindgen(method, js_name = setOptions)]
    fn set_options(this: &Hands, options: &JsValue);

    #[wasm_bindgen(method, js_name = onResults)]
    fn on_results(this: &Hands, callback: &Function);

    #[wasm_bindgen(method)]
    fn send(this: &Hands, inputs: &JsValue) -> Promise;

    #[wasm_bindgen(method)]
    fn close(this: &Hands) -> Promise;
}

#[wasm_bindgen]
extern "C" {
    #[derive(Clone)]
    type Camera;

    #[wasm_bindgen(catch, constructor)]
    fn new(video: &HtmlVideoElement, options: &JsValue) -> Result<Camera, JsValue>;

    #[wasm_bindgen(method)]
    fn start(this: &Camera) -> Promise;

    #[wasm_bindgen(method)]
    fn stop(this: &Camera) -> Promise;
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(key), value).map(|_| ())
}

/// Pull `multiHandLandmarks` out of a detector result. Anything unreadable
/// counts as "no hands".
fn hands_from_results(results: &JsValue) -> Vec<Hand> {
    let raw = match Reflect::get(results, &JsValue::from_str("multiHandLandmarks")) {
        Ok(v) if !v.is_undefined() && !v.is_null() => v,
        _ => return Vec::new(),
    };
    let json = match JSON::stringify(&raw) {
        Ok(s) => String::from(s),
        Err(e) => {
            log::debug!("landmarks not serializable: {:?}", e);
            return Vec::new();
        }
    };
    parse_hands(&json).unwrap_or_else(|e| {
        log::debug!("landmarks not parseable: {}", e);
        Vec::new()
    })
}

pub struct HandTracker {
    hands: Hands,
    camera: Camera,
    _locate_file: Closure<dyn FnMut(String) -> String>,
    _on_results: Closure<dyn FnMut(JsValue)>,
    _on_frame: Closure<dyn FnMut() -> Promise>,
    _on_camera_error: Closure<dyn FnMut(JsValue)>,
}

impl HandTracker {
    /// Create the detector, hook it to `video` and start the camera.
    /// `on_hands` runs once per processed frame.
    pub fn start(
        video: &HtmlVideoElement,
        config: &GameConfig,
        width: u32,
        height: u32,
        on_hands: impl FnMut(Vec<Hand>) + 'static,
    ) -> Result<Self, JsValue> {
        let locate_file = Closure::wrap(
            Box::new(|file: String| format!("{MODEL_CDN}{file}")) as Box<dyn FnMut(String) -> String>
        );
        let hands_config = Object::new();
        set(&hands_config, "locateFile", locate_file.as_ref())?;
        let hands = Hands::new(&hands_config)?;

        let options = serde_json::to_string(&config.detector)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        hands.set_options(&JSON::parse(&options)?);

        let on_results = {
            let mut on_hands = on_hands;
            Closure::wrap(Box::new(move |results: JsValue| {
                on_hands(hands_from_results(&results));
            }) as Box<dyn FnMut(JsValue)>)
        };
        hands.on_results(on_results.as_ref().unchecked_ref());

        let on_frame = {
            let hands = hands.clone();
            let video = video.clone();
            Closure::wrap(Box::new(move || {
                let inputs = Object::new();
                if set(&inputs, "image", &video).is_err() {
                    return Promise::resolve(&JsValue::UNDEFINED);
                }
                hands.send(&inputs)
            }) as Box<dyn FnMut() -> Promise>)
        };
        let camera_options = Object::new();
        set(&camera_options, "onFrame", on_frame.as_ref())?;
        set(&camera_options, "width", &JsValue::from(width))?;
        set(&camera_options, "height", &JsValue::from(height))?;
        let camera = Camera::new(video, &camera_options)?;

        let on_camera_error = Closure::wrap(Box::new(|err: JsValue| {
            log::error!("camera failed to start: {:?}", err);
        }) as Box<dyn FnMut(JsValue)>);
        let _ = camera.start().catch(&on_camera_error);
        log::info!("hand tracker started ({}x{})", width, height);

        Ok(Self {
            hands,
            camera,
            _locate_file: locate_file,
            _on_results: on_results,
            _on_frame: on_frame,
            _on_camera_error: on_camera_error,
        })
    }
}

impl Drop for HandTracker {
    fn drop(&mut self) {
        let _ = self.camera.stop();
        let _ = self.hands.close();
        log::info!("hand tracker stopped");
    }
}
