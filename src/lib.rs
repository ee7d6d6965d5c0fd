//! Front end for a small interior-design showcase site.
//!
//! Loads the design gallery from a remote JSON document (with built-in
//! fallback entries), shows a detail overlay with WhatsApp and e-mail contact
//! links, turns the contact form into a prefilled WhatsApp chat, and handles
//! the mobile menu and same-page anchor scrolling.
//!
//! Everything except the browser glue (`dom`, `http`, `site`) builds and is
//! tested on the host.

pub mod config;
pub mod contact;
pub mod design;
pub mod error;
pub mod gallery;
pub mod modal;
pub mod nav;
pub mod scroll;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod http;
#[cfg(target_arch = "wasm32")]
mod site;

// ── Web entry‑point ──
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Redirect `log` macros & panic messages to the browser console
    console_log::init_with_level(log::Level::Debug).ok();
    console_error_panic_hook::set_once();

    site::start().map_err(|e| JsValue::from_str(&format!("{e:#}")))
}
