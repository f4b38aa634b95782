// Small helpers shared by components and state handles

pub fn format_time(secs: u32) -> String {
    let m = secs / 60;
    let s = secs % 60;
    if m > 0 {
        format!("{:01}:{:02}", m, s)
    } else {
        format!("{}s", s)
    }
}

#[cfg(target_arch = "wasm32")]
pub fn clog(msg: &str) {
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(msg));
}

#[cfg(target_arch = "wasm32")]
pub fn cwarn(msg: &str) {
    web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(msg));
}

// Native builds (unit tests) have no console to write to.
#[cfg(not(target_arch = "wasm32"))]
pub fn clog(msg: &str) {
    let _ = msg;
}

#[cfg(not(target_arch = "wasm32"))]
pub fn cwarn(msg: &str) {
    let _ = msg;
}

/// Render a JS error value for the console.
pub fn js_err(e: &wasm_bindgen::JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}
