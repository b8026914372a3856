//! Lightbox overlay binding.
//!
//! Translates clicks, keys, wheel and drag events into [`LightboxState`]
//! calls and writes the resulting state back to the overlay elements.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlAnchorElement, HtmlElement, HtmlImageElement,
    KeyboardEvent, MouseEvent, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
    WheelEvent,
};

use super::{
    clear_children, create_element, element_by_id, query_all, set_class, set_display, set_style,
};
use crate::config::{GalleryConfig, ZoomConfig};
use crate::keybindings::{KeyBindings, LightboxAction};
use crate::lightbox::{GalleryImage, LightboxState};
use crate::ui_constants::{attrs, classes, cursor, display, ids};

/// Overlay elements looked up once at mount.
struct LightboxElements {
    overlay: HtmlElement,
    image: HtmlImageElement,
    counter: Option<Element>,
    download: Option<HtmlAnchorElement>,
    thumbnails: Option<Element>,
    fullscreen_button: Option<Element>,
}

struct Inner {
    document: Document,
    elements: LightboxElements,
    state: RefCell<LightboxState>,
    keybindings: KeyBindings,
    zoom: ZoomConfig,
    /// Overlay, keyboard and drag listeners, live for the controller's lifetime
    listeners: RefCell<Vec<EventListener>>,
    /// Click listeners on the current `.gallery-image` elements
    gallery_listeners: RefCell<Vec<EventListener>>,
    /// Click listeners on the current thumbnail strip
    thumb_listeners: RefCell<Vec<EventListener>>,
}

/// Handle to the mounted lightbox. Clones share the same overlay.
#[derive(Clone)]
pub struct LightboxController {
    inner: Rc<Inner>,
}

impl LightboxController {
    /// Bind the `#lightbox` overlay. Returns `None` if the page has none.
    pub fn mount(document: &Document, config: &GalleryConfig) -> Option<Self> {
        let Some(overlay) = element_by_id::<HtmlElement>(document, ids::LIGHTBOX) else {
            log::debug!("No #{} on page, lightbox disabled", ids::LIGHTBOX);
            return None;
        };
        let Some(image) = element_by_id::<HtmlImageElement>(document, ids::LIGHTBOX_IMAGE) else {
            log::warn!("#{} present without #{}, lightbox disabled", ids::LIGHTBOX, ids::LIGHTBOX_IMAGE);
            return None;
        };

        let elements = LightboxElements {
            overlay,
            image,
            counter: document.get_element_by_id(ids::LIGHTBOX_COUNTER),
            download: element_by_id(document, ids::LIGHTBOX_DOWNLOAD),
            thumbnails: document.get_element_by_id(ids::LIGHTBOX_THUMBNAILS),
            fullscreen_button: document.get_element_by_id(ids::LIGHTBOX_FULLSCREEN),
        };

        let inner = Rc::new(Inner {
            document: document.clone(),
            elements,
            state: RefCell::new(LightboxState::new(
                config.zoom.bounds(),
                config.preload_distance,
            )),
            keybindings: config.keybindings.clone(),
            zoom: config.zoom,
            listeners: RefCell::new(Vec::new()),
            gallery_listeners: RefCell::new(Vec::new()),
            thumb_listeners: RefCell::new(Vec::new()),
        });

        let listeners = bind_listeners(&inner);
        *inner.listeners.borrow_mut() = listeners;
        log::info!("Lightbox mounted");

        Some(Self { inner })
    }

    /// Rebuild the image list from `.gallery-image` elements under `root`
    /// and make each of them open the lightbox at its position.
    pub fn bind_gallery(&self, root: &Element) {
        let inner = &self.inner;
        inner.close();

        let mut images = Vec::new();
        let mut listeners = Vec::new();
        for element in query_all(root, &format!(".{}", classes::GALLERY_IMAGE)) {
            let Some(src) = element
                .get_attribute(attrs::DATA_SRC)
                .or_else(|| element.get_attribute("src"))
            else {
                continue;
            };

            let mut image = GalleryImage::new(src);
            if let Some(thumb) = element.get_attribute(attrs::DATA_THUMB) {
                image = image.with_thumb(thumb);
            }

            let index = images.len();
            listeners.push(listen(inner, &element, "click", true, move |inner, _event| {
                inner.open(index);
            }));
            images.push(image);
        }

        log::info!("Lightbox bound to {} gallery images", images.len());
        inner.state.borrow_mut().set_images(images);
        *inner.gallery_listeners.borrow_mut() = listeners;
        inner.rebuild_thumbnails();
    }
}

// ============================================================================
// Listener wiring
// ============================================================================

/// Attach `handler` to `target`, holding the controller weakly.
fn listen<F>(
    inner: &Rc<Inner>,
    target: &EventTarget,
    event_type: &'static str,
    passive: bool,
    handler: F,
) -> EventListener
where
    F: Fn(&Inner, &Event) + 'static,
{
    let weak: Weak<Inner> = Rc::downgrade(inner);
    let options = EventListenerOptions {
        phase: EventListenerPhase::Bubble,
        passive,
    };
    EventListener::new_with_options(target, event_type, options, move |event: &Event| {
        if let Some(inner) = weak.upgrade() {
            handler(&inner, event);
        }
    })
}

fn bind_listeners(inner: &Rc<Inner>) -> Vec<EventListener> {
    let overlay = inner.elements.overlay.clone();
    let image = inner.elements.image.clone();
    let document = inner.document.clone();
    let mut listeners = Vec::new();

    for button in query_all(&overlay, &format!(".{}", classes::LIGHTBOX_CLOSE)) {
        listeners.push(listen(inner, &button, "click", true, |inner, _| inner.close()));
    }
    for button in query_all(&overlay, &format!(".{}", classes::LIGHTBOX_NEXT)) {
        listeners.push(listen(inner, &button, "click", true, |inner, _| inner.next()));
    }
    for button in query_all(&overlay, &format!(".{}", classes::LIGHTBOX_PREV)) {
        listeners.push(listen(inner, &button, "click", true, |inner, _| inner.prev()));
    }
    if let Some(button) = inner.elements.fullscreen_button.clone() {
        listeners.push(listen(inner, &button, "click", true, |inner, _| {
            inner.toggle_fullscreen()
        }));
    }

    // Backdrop click closes; clicks on children bubble up with another target
    listeners.push(listen(inner, &overlay, "click", true, |inner, event| {
        let on_backdrop = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .is_some_and(|target| target.id() == ids::LIGHTBOX);
        if on_backdrop {
            inner.close();
        }
    }));

    listeners.push(listen(inner, &document, "keydown", false, |inner, event| {
        if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
            inner.on_key(event);
        }
    }));

    listeners.push(listen(inner, &overlay, "wheel", false, |inner, event| {
        if let Some(event) = event.dyn_ref::<WheelEvent>() {
            inner.on_wheel(event);
        }
    }));

    listeners.push(listen(inner, &image, "mousedown", false, |inner, event| {
        if let Some(event) = event.dyn_ref::<MouseEvent>() {
            if inner.begin_drag(event) {
                event.prevent_default();
            }
        }
    }));
    listeners.push(listen(inner, &document, "mousemove", true, |inner, event| {
        if let Some(event) = event.dyn_ref::<MouseEvent>() {
            inner.drag_to(event);
        }
    }));
    listeners.push(listen(inner, &document, "mouseup", true, |inner, _| inner.end_drag()));

    listeners
}

// ============================================================================
// Behaviour
// ============================================================================

impl Inner {
    fn open(&self, index: usize) {
        if !self.state.borrow_mut().open(index) {
            return;
        }
        set_display(&self.elements.overlay, display::FLEX);
        self.render_image();
    }

    fn close(&self) {
        self.exit_fullscreen();
        if self.state.borrow_mut().close() {
            log::debug!("Lightbox closed");
        }
        set_display(&self.elements.overlay, display::HIDDEN);
        self.render_transform();
    }

    fn next(&self) {
        if self.state.borrow_mut().next().is_some() {
            self.render_image();
        }
    }

    fn prev(&self) {
        if self.state.borrow_mut().prev().is_some() {
            self.render_image();
        }
    }

    fn is_open(&self) -> bool {
        self.state.borrow().is_open()
    }

    fn on_key(&self, event: &KeyboardEvent) {
        if !self.is_open() {
            return;
        }
        let Some(action) = self.keybindings.action_for_key(&event.key()) else {
            return;
        };
        event.prevent_default();
        match action {
            LightboxAction::Close => self.close(),
            LightboxAction::Next => self.next(),
            LightboxAction::Prev => self.prev(),
            LightboxAction::ToggleFullscreen => self.toggle_fullscreen(),
        }
    }

    fn on_wheel(&self, event: &WheelEvent) {
        if !self.is_open() || (self.zoom.wheel_requires_ctrl && !event.ctrl_key()) {
            return;
        }
        event.prevent_default();
        let zoom = self
            .state
            .borrow_mut()
            .zoom_by(self.zoom.wheel_delta(event.delta_y()));
        log::trace!("Lightbox zoom {}", zoom);
        self.render_transform();
    }

    fn begin_drag(&self, event: &MouseEvent) -> bool {
        let started = self
            .state
            .borrow_mut()
            .begin_drag(event.client_x() as f32, event.client_y() as f32);
        if started {
            self.render_transform();
        }
        started
    }

    fn drag_to(&self, event: &MouseEvent) {
        let moved = self
            .state
            .borrow_mut()
            .drag_to(event.client_x() as f32, event.client_y() as f32);
        if moved {
            self.render_transform();
        }
    }

    fn end_drag(&self) {
        if self.state.borrow_mut().end_drag() {
            self.render_transform();
        }
    }

    // ========================================================================
    // Fullscreen
    // ========================================================================

    fn is_fullscreen(&self) -> bool {
        self.document.fullscreen_element().is_some()
    }

    fn toggle_fullscreen(&self) {
        if self.is_fullscreen() {
            self.exit_fullscreen();
        } else if let Err(e) = self.elements.overlay.request_fullscreen() {
            log::warn!("Fullscreen request rejected: {:?}", e);
        }
    }

    fn exit_fullscreen(&self) {
        if self.is_fullscreen() {
            self.document.exit_fullscreen();
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Push the current image and everything derived from it to the DOM.
    fn render_image(&self) {
        let (image, counter, current, preload) = {
            let state = self.state.borrow();
            let Some(image) = state.current_image().cloned() else {
                return;
            };
            let preload: Vec<String> = state
                .preload_indices()
                .into_iter()
                .filter_map(|i| state.images().get(i).map(|img| img.src.clone()))
                .collect();
            (image, state.counter_text(), state.current_index(), preload)
        };

        self.elements.image.set_src(&image.src);
        self.render_transform();

        if let (Some(el), Some(text)) = (&self.elements.counter, counter) {
            el.set_text_content(Some(&text));
        }
        if let Some(link) = &self.elements.download {
            link.set_href(&image.src);
            link.set_download(image.file_name());
        }
        self.highlight_thumbnail(current);
        preload_images(&preload);
    }

    fn render_transform(&self) {
        let (transform, dragging, zoomed) = {
            let state = self.state.borrow();
            let transform = state.transform();
            (
                transform,
                state.is_dragging(),
                !transform.is_unzoomed(state.zoom_bounds()),
            )
        };
        let image: &HtmlElement = &self.elements.image;
        set_style(image, "transform", &transform.to_css());
        let pointer = if dragging {
            cursor::GRABBING
        } else if zoomed {
            cursor::GRAB
        } else {
            cursor::DEFAULT
        };
        set_style(image, "cursor", pointer);
    }

    fn rebuild_thumbnails(self: &Rc<Self>) {
        let Some(strip) = &self.elements.thumbnails else {
            return;
        };
        clear_children(strip);

        let thumbs: Vec<String> = self
            .state
            .borrow()
            .images()
            .iter()
            .map(|img| img.thumb_src().to_string())
            .collect();

        let mut listeners = Vec::with_capacity(thumbs.len());
        for (index, src) in thumbs.iter().enumerate() {
            let thumb = match create_element::<HtmlImageElement>(&self.document, "img", classes::LIGHTBOX_THUMB) {
                Ok(thumb) => thumb,
                Err(e) => {
                    log::warn!("Failed to create thumbnail: {:?}", e);
                    continue;
                }
            };
            thumb.set_src(src);
            let _ = thumb.set_attribute(attrs::DATA_INDEX, &index.to_string());
            if strip.append_child(&thumb).is_err() {
                continue;
            }
            listeners.push(listen(self, &thumb, "click", true, move |inner, _| {
                inner.open(index);
            }));
        }
        *self.thumb_listeners.borrow_mut() = listeners;
    }

    fn highlight_thumbnail(&self, current: usize) {
        let Some(strip) = &self.elements.thumbnails else {
            return;
        };
        for thumb in query_all(strip, &format!(".{}", classes::LIGHTBOX_THUMB)) {
            let is_current = thumb
                .get_attribute(attrs::DATA_INDEX)
                .and_then(|i| i.parse::<usize>().ok())
                == Some(current);
            set_class(&thumb, classes::ACTIVE, is_current);
            if is_current {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Nearest);
                options.set_inline(ScrollLogicalPosition::Center);
                thumb.scroll_into_view_with_scroll_into_view_options(&options);
            }
        }
    }
}

/// Start off-screen loads so neighbours are cached by the time they show.
fn preload_images(sources: &[String]) {
    for src in sources {
        match HtmlImageElement::new() {
            Ok(img) => {
                log::debug!("Preloading {}", src);
                img.set_src(src);
            }
            Err(e) => log::warn!("Failed to create preload image: {:?}", e),
        }
    }
}
