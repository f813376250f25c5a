use wasm_bindgen::prelude::*;

pub mod api;
pub mod board;
pub mod game;
mod log;
pub mod types;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
