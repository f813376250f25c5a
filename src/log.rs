/// Debug log output (forwarded to the JS console on wasm).
#[cfg(target_arch = "wasm32")]
pub fn debug(msg: &str) {
    web_sys::console::log_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn debug(msg: &str) {
    eprintln!("DEBUG: {msg}");
}
