//! Browser bindings for the gallery page.
//!
//! Controllers here own their state and every listener they attach. State
//! lives behind `Rc<RefCell<_>>`; listener closures hold `Weak` references so
//! dropping a controller drops its listeners and frees the state.

mod lightbox;
mod view;

pub use lightbox::LightboxController;
pub use view::ViewController;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, NodeList};

use crate::config::GalleryConfig;
use crate::forms::InlineFormToggle;
use crate::ui_constants::ids;

// ============================================================================
// DOM helpers
// ============================================================================

/// The current document, if running in a window.
pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// Element with `id`, cast to `T`. `None` if missing or of another type.
pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// Create a `tag` element with the given class, cast to `T`.
pub fn create_element<T: JsCast>(document: &Document, tag: &str, class: &str) -> Result<T, JsValue> {
    let element = document.create_element(tag)?;
    if !class.is_empty() {
        element.set_class_name(class);
    }
    element.dyn_into::<T>().map_err(JsValue::from)
}

/// Set an inline style property, logging failures.
pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = element.style().set_property(property, value) {
        log::warn!("Failed to set {}={} on #{}: {:?}", property, value, element.id(), e);
    }
}

pub fn set_display(element: &HtmlElement, value: &str) {
    set_style(element, "display", value);
}

/// Add or remove a class.
pub fn set_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

pub fn clear_children(element: &Element) {
    element.set_inner_html("");
}

/// Collect a `NodeList` into elements, skipping non-element nodes.
pub fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Elements under `root` matching `selector`; empty on an invalid selector.
pub fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    match root.query_selector_all(selector) {
        Ok(list) => elements(list),
        Err(e) => {
            log::warn!("Bad selector {:?}: {:?}", selector, e);
            Vec::new()
        }
    }
}

// ============================================================================
// Gallery
// ============================================================================

/// Everything mounted on one page. Dropping it unbinds the page.
pub struct Gallery {
    _lightbox: Option<LightboxController>,
    _view: Option<ViewController>,
    _forms: Vec<InlineFormToggle>,
}

impl Gallery {
    /// Attach to whatever parts of the gallery page are present.
    pub fn mount(config: &GalleryConfig) -> Option<Self> {
        let document = document()?;

        let lightbox = LightboxController::mount(&document, config);
        if let (Some(lightbox), Some(root)) = (&lightbox, document.document_element()) {
            // Server-rendered set pages already carry their gallery images
            lightbox.bind_gallery(&root);
        }

        let view = ViewController::mount(&document, config, lightbox.clone());
        if let Some(view) = &view {
            view.load_sets();
        }

        let forms: Vec<_> = ids::FORM_TOGGLES
            .iter()
            .filter_map(|(button, form)| InlineFormToggle::bind(&document, button, form))
            .collect();

        log::info!(
            "Gallery mounted (lightbox: {}, sets view: {}, form toggles: {})",
            lightbox.is_some(),
            view.is_some(),
            forms.len()
        );

        Some(Self {
            _lightbox: lightbox,
            _view: view,
            _forms: forms,
        })
    }
}

impl Drop for Gallery {
    fn drop(&mut self) {
        log::info!("Gallery unmounted");
    }
}
