use std::cell::RefCell;

use gloo::events::EventListener;
use wasm_bindgen::prelude::*;

use crate::config::GalleryConfig;
use crate::dom::{self, Gallery};

thread_local! {
    /// The gallery mounted on this page, kept alive until `unmount_gallery`.
    static MOUNTED: RefCell<Option<Gallery>> = const { RefCell::new(None) };
    /// Pending `DOMContentLoaded` hook when the script runs before parsing ends
    static READY_HOOK: RefCell<Option<EventListener>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let config = GalleryConfig::load_from_local_storage().unwrap_or_default();
    if console_log::init_with_level(config.log_level.to_level()).is_err() {
        log::debug!("Logger already initialized");
    }
    log::info!("Gallery WASM starting...");

    let Some(document) = dom::document() else {
        log::error!("No document available, gallery not mounted");
        return;
    };

    if document.ready_state() == "loading" {
        let hook = EventListener::once(&document, "DOMContentLoaded", move |_| mount(&config));
        READY_HOOK.with(|slot| *slot.borrow_mut() = Some(hook));
    } else {
        mount(&config);
    }
}

fn mount(config: &GalleryConfig) {
    let gallery = Gallery::mount(config);
    MOUNTED.with(|slot| *slot.borrow_mut() = gallery);
}

/// Remove every listener the gallery attached.
#[wasm_bindgen]
pub fn unmount_gallery() {
    READY_HOOK.with(|hook| hook.borrow_mut().take());
    let gallery = MOUNTED.with(|slot| slot.borrow_mut().take());
    drop(gallery);
}

/// Mount again, e.g. after the page swapped its gallery markup.
#[wasm_bindgen]
pub fn remount_gallery() {
    unmount_gallery();
    let config = GalleryConfig::load_from_local_storage().unwrap_or_default();
    mount(&config);
}

/// Validate and store a JSON configuration; applies on the next mount.
#[wasm_bindgen]
pub fn save_gallery_config(json: &str) -> Result<(), JsValue> {
    let config = GalleryConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    config
        .save_to_local_storage()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
