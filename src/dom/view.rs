//! Sets grid, tag bar and set detail binding.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlElement, HtmlImageElement, UrlSearchParams};

use super::{
    LightboxController, clear_children, create_element, element_by_id, query_all, set_class,
    set_display,
};
use crate::api::ApiClient;
use crate::config::GalleryConfig;
use crate::model::{ImageSet, SetId};
use crate::ui_constants::{
    BACK_LABEL, PERSON_QUERY_PARAM, TAG_QUERY_PARAM, attrs, classes, display, ids,
};
use crate::view::ViewState;

struct ViewElements {
    sets: HtmlElement,
    images: Option<HtmlElement>,
    tag_filters: Option<HtmlElement>,
    set_tags: Option<HtmlElement>,
    set_people: Option<HtmlElement>,
    set_description: Option<HtmlElement>,
    set_controls: Option<Element>,
    page_title: Option<Element>,
}

struct Inner {
    document: Document,
    elements: ViewElements,
    state: RefCell<ViewState>,
    api: ApiClient,
    lightbox: Option<LightboxController>,
    card_listeners: RefCell<Vec<EventListener>>,
    filter_listeners: RefCell<Vec<EventListener>>,
    detail_listeners: RefCell<Vec<EventListener>>,
}

/// Handle to the mounted sets view.
#[derive(Clone)]
pub struct ViewController {
    inner: Rc<Inner>,
}

impl ViewController {
    /// Bind `#sets-container` and its companions. Returns `None` on pages
    /// without a sets grid.
    pub fn mount(
        document: &Document,
        config: &GalleryConfig,
        lightbox: Option<LightboxController>,
    ) -> Option<Self> {
        let Some(sets) = element_by_id::<HtmlElement>(document, ids::SETS_CONTAINER) else {
            log::debug!("No #{} on page, sets view disabled", ids::SETS_CONTAINER);
            return None;
        };

        let elements = ViewElements {
            sets,
            images: element_by_id(document, ids::IMAGES_CONTAINER),
            tag_filters: element_by_id(document, ids::TAG_FILTERS),
            set_tags: element_by_id(document, ids::SET_TAGS),
            set_people: element_by_id(document, ids::SET_PEOPLE),
            set_description: element_by_id(document, ids::SET_DESCRIPTION),
            set_controls: document.get_element_by_id(ids::SET_CONTROLS),
            page_title: document.get_element_by_id(ids::PAGE_TITLE),
        };

        let initial_tag = query_param(TAG_QUERY_PARAM);
        let initial_person = query_param(PERSON_QUERY_PARAM);
        log::debug!(
            "Initial filters from URL: tag={:?} person={:?}",
            initial_tag,
            initial_person
        );

        let inner = Rc::new(Inner {
            document: document.clone(),
            elements,
            state: RefCell::new(ViewState::new(initial_tag).with_person(initial_person)),
            api: ApiClient::new(&config.api_base),
            lightbox,
            card_listeners: RefCell::new(Vec::new()),
            filter_listeners: RefCell::new(Vec::new()),
            detail_listeners: RefCell::new(Vec::new()),
        });
        log::info!("Sets view mounted against {}", inner.api.base());

        Some(Self { inner })
    }

    /// Fetch the set list and render the grid.
    pub fn load_sets(&self) {
        load_sets(&self.inner);
    }
}

/// Non-empty query parameter `name` of the current page URL.
fn query_param(name: &str) -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    UrlSearchParams::new_with_str(&search)
        .ok()?
        .get(name)
        .filter(|value| !value.is_empty())
}

// ============================================================================
// Data fetch
// ============================================================================

fn load_sets(inner: &Rc<Inner>) {
    let ticket = inner.state.borrow_mut().begin_sets_request();
    let api = inner.api.clone();
    let weak = Rc::downgrade(inner);

    spawn_local(async move {
        let result = api.fetch_sets().await;
        let Some(inner) = weak.upgrade() else {
            return;
        };
        match result {
            Ok(sets) => {
                let accepted = inner.state.borrow_mut().accept_sets(ticket, sets);
                if accepted {
                    inner.render_tag_filters();
                    inner.render_sets();
                }
            }
            Err(e) => log::error!("Failed to load sets: {}", e),
        }
    });
}

fn load_set(inner: &Rc<Inner>, id: SetId) {
    let ticket = inner.state.borrow_mut().begin_set_request();
    let api = inner.api.clone();
    let weak = Rc::downgrade(inner);
    log::debug!("Loading set '{}'", id);

    spawn_local(async move {
        let result = api.fetch_set(&id).await;
        let Some(inner) = weak.upgrade() else {
            return;
        };
        match result {
            Ok(set) => {
                let accepted = inner.state.borrow_mut().accept_set(ticket, set);
                if accepted {
                    inner.render_set_images();
                }
            }
            Err(e) => log::error!("Failed to load set '{}': {}", id, e),
        }
    });
}

/// Click listener that calls back into the controller if it still exists.
fn on_click<F>(inner: &Rc<Inner>, target: &Element, handler: F) -> EventListener
where
    F: Fn(&Rc<Inner>) + 'static,
{
    let weak: Weak<Inner> = Rc::downgrade(inner);
    EventListener::new(target, "click", move |_event: &Event| {
        if let Some(inner) = weak.upgrade() {
            handler(&inner);
        }
    })
}

/// Drop any inline `display` so the stylesheet decides.
fn show(element: &HtmlElement) {
    let _ = element.style().remove_property("display");
}

fn log_dom_error(what: &str, err: JsValue) {
    log::warn!("Failed to build {}: {:?}", what, err);
}

// ============================================================================
// Rendering
// ============================================================================

impl Inner {
    fn set_page_title(&self) {
        if let Some(title) = &self.elements.page_title {
            title.set_text_content(Some(self.state.borrow().page_title()));
        }
    }

    /// Replace the grid with one card per set passing the tag filter.
    fn render_sets(self: &Rc<Self>) {
        let sets: Vec<ImageSet> = self
            .state
            .borrow()
            .filtered_sets()
            .into_iter()
            .cloned()
            .collect();

        let grid = &self.elements.sets;
        clear_children(grid);
        let mut listeners = Vec::with_capacity(sets.len());
        for set in &sets {
            match self.build_card(set) {
                Ok(card) => {
                    if let Err(e) = grid.append_child(&card) {
                        log_dom_error("set card", e);
                        continue;
                    }
                    let id = set.id.clone();
                    listeners.push(on_click(self, &card, move |inner| {
                        load_set(inner, id.clone())
                    }));
                }
                Err(e) => log_dom_error("set card", e),
            }
        }
        *self.card_listeners.borrow_mut() = listeners;

        show(grid);
        self.set_page_title();
        log::debug!("Rendered {} set cards", sets.len());
    }

    fn build_card(&self, set: &ImageSet) -> Result<Element, JsValue> {
        let card: Element = create_element(&self.document, "div", classes::SET_CARD)?;
        card.set_attribute(attrs::DATA_SET_ID, set.id.as_str())?;

        if let Some(cover) = set.cover() {
            let img: HtmlImageElement = create_element(&self.document, "img", "")?;
            img.set_src(cover);
            img.set_alt(&set.title);
            card.append_child(&img)?;
        }

        let title: Element = create_element(&self.document, "h3", classes::SET_CARD_TITLE)?;
        title.set_text_content(Some(&set.title));
        card.append_child(&title)?;

        if !set.description.is_empty() {
            let description: Element =
                create_element(&self.document, "p", classes::SET_CARD_DESCRIPTION)?;
            description.set_text_content(Some(&set.description));
            card.append_child(&description)?;
        }

        let count: Element = create_element(&self.document, "span", classes::SET_CARD_COUNT)?;
        count.set_text_content(Some(&image_count_label(set.image_count())));
        card.append_child(&count)?;

        Ok(card)
    }

    /// Render "All" plus one button per tag across all sets.
    fn render_tag_filters(self: &Rc<Self>) {
        let Some(bar) = &self.elements.tag_filters else {
            return;
        };
        clear_children(bar);

        let labels = self.state.borrow().tag_labels();
        let mut listeners = Vec::with_capacity(labels.len());
        for label in labels {
            let button: Element = match create_element(&self.document, "button", classes::TAG_FILTER) {
                Ok(button) => button,
                Err(e) => {
                    log_dom_error("tag filter", e);
                    continue;
                }
            };
            button.set_text_content(Some(label.text()));
            if let Some(tag) = &label.tag {
                let _ = button.set_attribute(attrs::DATA_TAG, tag);
            }
            set_class(&button, classes::ACTIVE, label.active);
            if let Err(e) = bar.append_child(&button) {
                log_dom_error("tag filter", e);
                continue;
            }

            let tag = label.tag.clone();
            listeners.push(on_click(self, &button, move |inner| {
                inner.state.borrow_mut().select_tag(tag.clone());
                inner.render_sets();
                inner.update_active_tag();
            }));
        }
        *self.filter_listeners.borrow_mut() = listeners;
        show(bar);
    }

    /// Highlight the label of the active tag, or "All".
    fn update_active_tag(&self) {
        let Some(bar) = &self.elements.tag_filters else {
            return;
        };
        let active = self
            .state
            .borrow()
            .tag_labels()
            .into_iter()
            .find(|label| label.active)
            .and_then(|label| label.tag);

        for button in query_all(bar, &format!(".{}", classes::TAG_FILTER)) {
            let is_active = button.get_attribute(attrs::DATA_TAG) == active;
            set_class(&button, classes::ACTIVE, is_active);
        }
    }

    /// Switch to the detail view of the current set.
    fn render_set_images(self: &Rc<Self>) {
        let Some(set) = self.state.borrow().current_set().cloned() else {
            return;
        };

        set_display(&self.elements.sets, display::HIDDEN);
        if let Some(bar) = &self.elements.tag_filters {
            set_display(bar, display::HIDDEN);
        }
        self.set_page_title();

        if let Some(description) = &self.elements.set_description {
            description.set_text_content(Some(&set.description));
            if set.description.is_empty() {
                set_display(description, display::HIDDEN);
            } else {
                show(description);
            }
        }
        if let Some(tags) = &self.elements.set_tags {
            self.render_labels(tags, &set.tags, classes::SET_TAG);
        }
        if let Some(people) = &self.elements.set_people {
            self.render_labels(people, &set.people, classes::SET_PERSON);
        }

        let mut listeners = Vec::new();
        if let Some(controls) = &self.elements.set_controls {
            clear_children(controls);
            match create_element::<Element>(&self.document, "button", classes::BACK_BUTTON) {
                Ok(back) => {
                    back.set_text_content(Some(BACK_LABEL));
                    if controls.append_child(&back).is_ok() {
                        listeners.push(on_click(self, &back, |inner| {
                            // show_sets drops this listener, so run it after the handler returns
                            let weak = Rc::downgrade(inner);
                            spawn_local(async move {
                                if let Some(inner) = weak.upgrade() {
                                    inner.show_sets();
                                }
                            });
                        }));
                    }
                }
                Err(e) => log_dom_error("back button", e),
            }
        }
        *self.detail_listeners.borrow_mut() = listeners;

        let Some(container) = &self.elements.images else {
            log::warn!("No #{} on page, cannot show set images", ids::IMAGES_CONTAINER);
            return;
        };
        clear_children(container);
        for (index, src) in set.images.iter().enumerate() {
            match create_element::<HtmlImageElement>(&self.document, "img", classes::GALLERY_IMAGE) {
                Ok(img) => {
                    img.set_src(src);
                    img.set_alt(&format!("{} {}", set.title, index + 1));
                    let _ = img.set_attribute(attrs::DATA_SRC, src);
                    let _ = container.append_child(&img);
                }
                Err(e) => log_dom_error("gallery image", e),
            }
        }
        show(container);

        if let Some(lightbox) = &self.lightbox {
            lightbox.bind_gallery(container);
        }
    }

    /// Replace `container` with one `class` span per entry.
    fn render_labels(&self, container: &HtmlElement, labels: &[String], class: &str) {
        clear_children(container);
        for text in labels {
            match create_element::<Element>(&self.document, "span", class) {
                Ok(span) => {
                    span.set_text_content(Some(text));
                    let _ = container.append_child(&span);
                }
                Err(e) => log_dom_error(class, e),
            }
        }
        show(container);
    }

    /// Return to the grid and restore the global tag bar.
    fn show_sets(self: &Rc<Self>) {
        self.state.borrow_mut().show_sets();
        self.detail_listeners.borrow_mut().clear();

        if let Some(container) = &self.elements.images {
            clear_children(container);
            set_display(container, display::HIDDEN);
            if let Some(lightbox) = &self.lightbox {
                lightbox.bind_gallery(container);
            }
        }
        for element in [
            &self.elements.set_tags,
            &self.elements.set_people,
            &self.elements.set_description,
        ]
        .into_iter()
        .flatten()
        {
            clear_children(element);
            set_display(element, display::HIDDEN);
        }
        if let Some(controls) = &self.elements.set_controls {
            clear_children(controls);
        }

        self.render_tag_filters();
        self.render_sets();
    }
}

fn image_count_label(count: usize) -> String {
    if count == 1 {
        "1 image".to_string()
    } else {
        format!("{} images", count)
    }
}
