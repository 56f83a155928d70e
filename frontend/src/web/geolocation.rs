//! 浏览器定位封装
//!
//! 把 `navigator.geolocation.getCurrentPosition` 的回调包装成 Future。

use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::PositionOptions;

/// 定位选项
#[derive(Debug, Clone, Copy)]
pub struct GeoOptions {
    pub high_accuracy: bool,
    pub timeout_ms: u32,
    pub maximum_age_ms: u32,
}

fn js_message(value: &JsValue) -> String {
    Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}

fn read_f64(target: &JsValue, key: &str) -> Result<f64, String> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_f64())
        .ok_or_else(|| format!("position has no {}", key))
}

/// 获取当前位置，返回 (纬度, 经度)
///
/// 错误消息取自浏览器的 `GeolocationPositionError.message`。
pub async fn current_position(options: GeoOptions) -> Result<(f64, f64), String> {
    let geolocation = web_sys::window()
        .ok_or("window unavailable")?
        .navigator()
        .geolocation()
        .map_err(|e| js_message(&e))?;

    let opts = PositionOptions::new();
    opts.set_enable_high_accuracy(options.high_accuracy);
    opts.set_timeout(options.timeout_ms);
    opts.set_maximum_age(options.maximum_age_ms);

    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        if let Err(e) =
            geolocation.get_current_position_with_error_callback_and_options(&resolve, Some(&reject), &opts)
        {
            let _ = reject.call1(&JsValue::NULL, &e);
        }
    });

    let position = JsFuture::from(promise).await.map_err(|e| js_message(&e))?;
    let coords = Reflect::get(&position, &JsValue::from_str("coords")).map_err(|e| js_message(&e))?;
    Ok((read_f64(&coords, "latitude")?, read_f64(&coords, "longitude")?))
}
