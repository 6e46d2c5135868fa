//! PLMS web server and UI.
//!
//! This crate provides the Leptos-based web interface of the PLMS
//! loan-management client: the pages, the chat assistant widget and the
//! EMI payment flow.

#![allow(non_snake_case)]

pub mod app;
pub mod components;
#[cfg(feature = "ssr")]
pub mod config;
pub mod error;
pub mod pages;
pub mod types;
pub mod user;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
