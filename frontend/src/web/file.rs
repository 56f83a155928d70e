//! 文件读取封装
//!
//! 图片上传统一转成 data URI，直接用于预览和 AI 请求。

use js_sys::{Function, Promise};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, File, FileReader, HtmlInputElement};

/// 取出 `<input type="file">` change 事件中的第一个文件
pub fn first_file(ev: &Event) -> Option<File> {
    let input: HtmlInputElement = ev.target()?.dyn_into().ok()?;
    input.files()?.get(0)
}

/// 读取为 data URI
pub async fn read_as_data_url(file: File) -> Result<String, String> {
    let reader = FileReader::new().map_err(|e| format!("{:?}", e))?;

    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        let done = reader.clone();
        let onload = Closure::once_into_js(move || {
            let result = done.result().unwrap_or(JsValue::NULL);
            let _ = resolve.call1(&JsValue::NULL, &result);
        });
        let onerror = Closure::once_into_js(move || {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("file read failed"));
        });
        reader.set_onload(Some(onload.unchecked_ref()));
        reader.set_onerror(Some(onerror.unchecked_ref()));
    });

    reader
        .read_as_data_url(&file)
        .map_err(|e| format!("{:?}", e))?;

    JsFuture::from(promise)
        .await
        .map_err(|e| format!("{:?}", e))?
        .as_string()
        .ok_or_else(|| "file reader returned no text".to_string())
}

/// change 事件 -> data URI；没有选择文件时返回 `None`
pub async fn read_event_image(ev: Event) -> Option<String> {
    let file = first_file(&ev)?;
    match read_as_data_url(file).await {
        Ok(uri) => Some(uri),
        Err(e) => {
            log::warn!("[File] Could not read image: {}", e);
            None
        }
    }
}
