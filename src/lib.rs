rust_i18n::i18n!("locales", fallback = "en");

pub mod app;
pub mod config;
pub mod data;
pub mod diagram;
pub mod engine;
pub mod event;
pub mod logging;
pub mod session;
pub mod speech;
pub mod ui;

/// Locale codes with a bundled translation file.
pub fn available_locales() -> Vec<&'static str> {
    rust_i18n::available_locales!()
}
