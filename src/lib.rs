#![cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

mod ambient;
mod card_stream;
mod constants;
mod dom;
mod frame;
mod render;
mod scanner;

pub use ambient::{mount_ambient, AmbientHandle};
pub use card_stream::{mount_card_stream, CardStreamHandle};
pub use scanner::{mount_scanner, ScannerHandle};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("hero-web starting");
    Ok(())
}
