//! Show/hide toggles for the inline "add tag" and "add person" forms.
//!
//! Submission is plain HTML form posting; this only flips visibility and
//! focuses the first input when a form appears.

use crate::ui_constants::display;

/// `display` value a form should get when its button is clicked.
pub fn toggled_display(current: &str) -> &'static str {
    if current == display::FLEX {
        display::HIDDEN
    } else {
        display::FLEX
    }
}

#[cfg(target_arch = "wasm32")]
pub use binding::InlineFormToggle;

#[cfg(target_arch = "wasm32")]
mod binding {
    use gloo::events::EventListener;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Event, HtmlElement};

    use super::toggled_display;
    use crate::dom;
    use crate::ui_constants::display;

    /// A button bound to the form it reveals. Dropping it unbinds the button.
    pub struct InlineFormToggle {
        _listener: EventListener,
    }

    impl InlineFormToggle {
        /// Bind `button_id` to `form_id`. Returns `None` if either is missing.
        pub fn bind(document: &Document, button_id: &str, form_id: &str) -> Option<Self> {
            let button = document.get_element_by_id(button_id)?;
            let form: HtmlElement = dom::element_by_id(document, form_id)?;

            let listener = EventListener::new(&button, "click", move |_event: &Event| {
                let current = form.style().get_property_value("display").unwrap_or_default();
                let next = toggled_display(&current);
                dom::set_display(&form, next);

                if next == display::FLEX {
                    let input = form
                        .query_selector("input")
                        .ok()
                        .flatten()
                        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
                    if let Some(input) = input {
                        let _ = input.focus();
                    }
                }
            });

            log::debug!("Bound form toggle {} -> {}", button_id, form_id);
            Some(Self {
                _listener: listener,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_cycle() {
        assert_eq!(toggled_display(""), "flex");
        assert_eq!(toggled_display("none"), "flex");
        assert_eq!(toggled_display("flex"), "none");
        assert_eq!(toggled_display(toggled_display("flex")), "flex");
    }
}
