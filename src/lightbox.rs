//! Lightbox state machine.
//!
//! Owns the gallery image list, the current index and the pan/zoom transform.
//! The DOM layer calls into this and renders whatever it reports as changed.
//!
//! Invariants:
//! - `current < images.len()` whenever the list is non-empty
//! - every index change resets the transform to identity
//! - a drag only exists while the lightbox is open and zoomed in

use crate::transform::{DragAnchor, Transform, ZoomBounds};

/// Number of neighbours on each side preloaded by default.
pub const DEFAULT_PRELOAD_DISTANCE: usize = 1;

/// Largest preload distance a configuration may ask for.
pub const MAX_PRELOAD_DISTANCE: usize = 16;

/// Name used for the download link when a URL has no usable basename.
const FALLBACK_FILE_NAME: &str = "image";

/// One entry of the gallery image list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryImage {
    /// Full-size image URL
    pub src: String,
    /// Thumbnail URL, if different from `src`
    pub thumb: Option<String>,
}

impl GalleryImage {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            thumb: None,
        }
    }

    pub fn with_thumb(mut self, thumb: impl Into<String>) -> Self {
        self.thumb = Some(thumb.into());
        self
    }

    /// URL used for the thumbnail strip.
    pub fn thumb_src(&self) -> &str {
        self.thumb.as_deref().unwrap_or(&self.src)
    }

    /// File name offered by the download link.
    pub fn file_name(&self) -> &str {
        file_name_from_url(&self.src)
    }
}

/// Last path segment of `url`, ignoring query string and fragment.
pub fn file_name_from_url(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name,
        _ => FALLBACK_FILE_NAME,
    }
}

/// Index after `current`, wrapping at the end.
pub fn next_index(current: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (current + 1) % len }
}

/// Index before `current`, wrapping at the start.
pub fn prev_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    }
}

/// Whether the overlay is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightboxPhase {
    #[default]
    Closed,
    Open,
}

/// Interactive state of the lightbox overlay.
#[derive(Debug, Clone)]
pub struct LightboxState {
    images: Vec<GalleryImage>,
    current: usize,
    phase: LightboxPhase,
    transform: Transform,
    bounds: ZoomBounds,
    drag: Option<DragAnchor>,
    preload_distance: usize,
}

impl LightboxState {
    pub fn new(bounds: ZoomBounds, preload_distance: usize) -> Self {
        Self {
            images: Vec::new(),
            current: 0,
            phase: LightboxPhase::Closed,
            transform: Transform::identity(),
            bounds,
            drag: None,
            preload_distance,
        }
    }

    // ========================================================================
    // Image list
    // ========================================================================

    /// Replace the image list. Closes the overlay and rewinds to the start.
    pub fn set_images(&mut self, images: Vec<GalleryImage>) {
        self.images = images;
        self.current = 0;
        self.phase = LightboxPhase::Closed;
        self.reset_view();
    }

    pub fn images(&self) -> &[GalleryImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_image(&self) -> Option<&GalleryImage> {
        self.images.get(self.current)
    }

    // ========================================================================
    // Open / close
    // ========================================================================

    pub fn phase(&self) -> LightboxPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase == LightboxPhase::Open
    }

    /// Show the image at `index`. Returns `false` for an out-of-range index.
    pub fn open(&mut self, index: usize) -> bool {
        if index >= self.images.len() {
            log::warn!(
                "Lightbox open ignored: index {} out of {} images",
                index,
                self.images.len()
            );
            return false;
        }
        self.current = index;
        self.phase = LightboxPhase::Open;
        self.reset_view();
        log::debug!("Lightbox opened at {}", index);
        true
    }

    /// Hide the overlay. Returns whether it was open.
    pub fn close(&mut self) -> bool {
        self.drag = None;
        if self.phase == LightboxPhase::Closed {
            return false;
        }
        self.phase = LightboxPhase::Closed;
        true
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Advance to the next image, wrapping. Returns the new index.
    pub fn next(&mut self) -> Option<usize> {
        if self.images.is_empty() {
            return None;
        }
        self.go_to(next_index(self.current, self.images.len()))
    }

    /// Step back to the previous image, wrapping. Returns the new index.
    pub fn prev(&mut self) -> Option<usize> {
        if self.images.is_empty() {
            return None;
        }
        self.go_to(prev_index(self.current, self.images.len()))
    }

    fn go_to(&mut self, index: usize) -> Option<usize> {
        self.current = index;
        self.reset_view();
        log::debug!("Lightbox moved to {}", index);
        Some(index)
    }

    fn reset_view(&mut self) {
        self.transform = Transform::identity();
        self.drag = None;
    }

    // ========================================================================
    // Zoom and pan
    // ========================================================================

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn zoom_bounds(&self) -> ZoomBounds {
        self.bounds
    }

    /// Change zoom by `delta`, clamped. Returns the new zoom level.
    pub fn zoom_by(&mut self, delta: f32) -> f32 {
        self.transform = self.transform.zoom_by(delta, self.bounds);
        if self.transform.is_unzoomed(self.bounds) {
            self.drag = None;
        }
        self.transform.zoom
    }

    /// Start a pan drag. Ignored when closed or unzoomed.
    pub fn begin_drag(&mut self, cursor_x: f32, cursor_y: f32) -> bool {
        if !self.is_open() || self.transform.is_unzoomed(self.bounds) {
            return false;
        }
        self.drag = Some(DragAnchor::begin(&self.transform, cursor_x, cursor_y));
        true
    }

    /// Move the image with the cursor. Returns whether the pan changed.
    pub fn drag_to(&mut self, cursor_x: f32, cursor_y: f32) -> bool {
        let Some(anchor) = self.drag else {
            return false;
        };
        let (pan_x, pan_y) = anchor.pan_for(cursor_x, cursor_y);
        self.transform = self.transform.pan_to(pan_x, pan_y);
        true
    }

    /// Finish a drag. Returns whether one was active.
    pub fn end_drag(&mut self) -> bool {
        self.drag.take().is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    // ========================================================================
    // Derived view data
    // ========================================================================

    /// Position text, e.g. `"3 of 12"`.
    pub fn counter_text(&self) -> Option<String> {
        if self.images.is_empty() {
            None
        } else {
            Some(format!("{} of {}", self.current + 1, self.images.len()))
        }
    }

    /// Indices worth preloading around the current image, nearest first.
    ///
    /// Never contains the current index and never repeats an index, which
    /// matters for short lists where both directions wrap onto each other.
    pub fn preload_indices(&self) -> Vec<usize> {
        let len = self.images.len();
        let mut indices = Vec::new();
        if len < 2 {
            return indices;
        }

        // Past len / 2 steps both directions only revisit indices
        let steps = self.preload_distance.min(len / 2);
        let (mut forward, mut backward) = (self.current, self.current);
        for _ in 0..steps {
            forward = next_index(forward, len);
            backward = prev_index(backward, len);
            for idx in [forward, backward] {
                if idx != self.current && !indices.contains(&idx) {
                    indices.push(idx);
                }
            }
        }
        indices
    }
}

impl Default for LightboxState {
    fn default() -> Self {
        Self::new(ZoomBounds::default(), DEFAULT_PRELOAD_DISTANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(count: usize) -> LightboxState {
        let mut state = LightboxState::default();
        state.set_images(
            (0..count)
                .map(|i| GalleryImage::new(format!("/images/sets/demo/{:03}.jpg", i)))
                .collect(),
        );
        state
    }

    #[test]
    fn test_starts_closed() {
        let state = state_with(3);
        assert_eq!(state.phase(), LightboxPhase::Closed);
        assert!(!state.is_open());
    }

    #[test]
    fn test_open_and_close() {
        let mut state = state_with(3);
        assert!(state.open(1));
        assert!(state.is_open());
        assert_eq!(state.current_index(), 1);

        assert!(state.close());
        assert!(!state.close());
    }

    #[test]
    fn test_open_out_of_range() {
        let mut state = state_with(2);
        assert!(!state.open(2));
        assert!(!state.is_open());

        let mut empty = state_with(0);
        assert!(!empty.open(0));
    }

    #[test]
    fn test_prev_wraps_from_first() {
        let mut state = state_with(3);
        state.open(0);
        assert_eq!(state.prev(), Some(2));
        assert_eq!(state.counter_text().as_deref(), Some("3 of 3"));
    }

    #[test]
    fn test_next_wraps_from_last() {
        let mut state = state_with(3);
        state.open(2);
        assert_eq!(state.next(), Some(0));
        assert_eq!(state.counter_text().as_deref(), Some("1 of 3"));
    }

    #[test]
    fn test_cyclic_closure() {
        for len in 1..6 {
            for start in 0..len {
                let mut state = state_with(len);
                state.open(start);
                for _ in 0..len {
                    state.next();
                }
                assert_eq!(state.current_index(), start);
                for _ in 0..len {
                    state.prev();
                }
                assert_eq!(state.current_index(), start);
            }
        }
    }

    #[test]
    fn test_navigation_on_empty_list() {
        let mut state = state_with(0);
        assert_eq!(state.next(), None);
        assert_eq!(state.prev(), None);
        assert_eq!(state.counter_text(), None);
        assert!(state.current_image().is_none());
    }

    #[test]
    fn test_navigation_resets_transform() {
        let mut state = state_with(3);
        state.open(0);
        state.zoom_by(1.5);
        state.begin_drag(10.0, 10.0);
        state.drag_to(40.0, 25.0);
        assert_ne!(state.transform(), Transform::identity());

        state.next();
        assert_eq!(state.transform(), Transform::identity());
        assert!(!state.is_dragging());
    }

    #[test]
    fn test_zoom_stays_in_bounds() {
        let mut state = state_with(1);
        state.open(0);
        let deltas = [0.1, 2.0, 3.0, -0.4, 0.9, -10.0, 0.3, 7.5, -0.2];
        for delta in deltas {
            let zoom = state.zoom_by(delta);
            assert!((1.0..=5.0).contains(&zoom));
        }
    }

    #[test]
    fn test_zoom_six_steps_never_exceeds_max() {
        let mut state = state_with(1);
        state.open(0);
        state.zoom_by(3.5);
        for _ in 0..6 {
            state.zoom_by(0.1);
        }
        assert_eq!(state.transform().zoom, 5.0);
    }

    #[test]
    fn test_unzoom_clears_pan() {
        let mut state = state_with(2);
        state.open(0);
        state.zoom_by(0.5);
        assert!(state.begin_drag(0.0, 0.0));
        state.drag_to(-30.0, 12.0);
        assert_eq!(state.transform().pan_x, -30.0);

        state.zoom_by(-0.5);
        let t = state.transform();
        assert_eq!(t.zoom, 1.0);
        assert_eq!((t.pan_x, t.pan_y), (0.0, 0.0));
        assert!(!state.is_dragging());
    }

    #[test]
    fn test_drag_requires_zoom() {
        let mut state = state_with(2);
        state.open(0);
        assert!(!state.begin_drag(5.0, 5.0));
        assert!(!state.drag_to(50.0, 50.0));
        assert_eq!(state.transform(), Transform::identity());
    }

    #[test]
    fn test_drag_follows_cursor() {
        let mut state = state_with(1);
        state.open(0);
        state.zoom_by(1.0);
        state.begin_drag(100.0, 100.0);
        state.drag_to(120.0, 90.0);
        state.end_drag();

        // A second drag continues from the current pan
        state.begin_drag(0.0, 0.0);
        state.drag_to(5.0, 5.0);
        let t = state.transform();
        assert_eq!((t.pan_x, t.pan_y), (25.0, -5.0));
        assert!(state.end_drag());
        assert!(!state.end_drag());
    }

    #[test]
    fn test_close_ends_drag() {
        let mut state = state_with(1);
        state.open(0);
        state.zoom_by(1.0);
        state.begin_drag(0.0, 0.0);
        state.close();
        assert!(!state.is_dragging());
    }

    #[test]
    fn test_preload_indices() {
        let mut state = state_with(5);
        state.open(0);
        assert_eq!(state.preload_indices(), vec![1, 4]);

        state.open(3);
        assert_eq!(state.preload_indices(), vec![4, 2]);
    }

    #[test]
    fn test_preload_indices_short_lists() {
        let mut state = state_with(1);
        state.open(0);
        assert!(state.preload_indices().is_empty());

        let mut state = state_with(2);
        state.open(0);
        assert_eq!(state.preload_indices(), vec![1]);
    }

    #[test]
    fn test_preload_distance_two() {
        let mut state = LightboxState::new(ZoomBounds::default(), 2);
        state.set_images((0..4).map(|i| GalleryImage::new(i.to_string())).collect());
        state.open(0);
        assert_eq!(state.preload_indices(), vec![1, 3, 2]);
    }

    #[test]
    fn test_huge_preload_distance_stops_at_list_length() {
        let mut state = LightboxState::new(ZoomBounds::default(), usize::MAX);
        state.set_images((0..3).map(|i| GalleryImage::new(i.to_string())).collect());
        state.open(0);
        assert_eq!(state.preload_indices(), vec![1, 2]);

        state.set_images((0..6).map(|i| GalleryImage::new(i.to_string())).collect());
        state.open(2);
        assert_eq!(state.preload_indices(), vec![3, 1, 4, 0, 5]);
    }

    #[test]
    fn test_set_images_closes_and_rewinds() {
        let mut state = state_with(4);
        state.open(3);
        state.zoom_by(1.0);
        state.set_images(vec![GalleryImage::new("/x.jpg")]);

        assert!(!state.is_open());
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.transform(), Transform::identity());
    }

    #[test]
    fn test_file_name_from_url() {
        assert_eq!(file_name_from_url("/images/sets/a/001.jpg"), "001.jpg");
        assert_eq!(
            file_name_from_url("https://cdn.example.com/p/x.webp?w=200#top"),
            "x.webp"
        );
        assert_eq!(file_name_from_url("plain.png"), "plain.png");
        assert_eq!(file_name_from_url("/images/sets/a/"), "image");
    }

    #[test]
    fn test_thumb_falls_back_to_src() {
        let plain = GalleryImage::new("/full.jpg");
        assert_eq!(plain.thumb_src(), "/full.jpg");

        let thumbed = GalleryImage::new("/full.jpg").with_thumb("/thumb.jpg");
        assert_eq!(thumbed.thumb_src(), "/thumb.jpg");
        assert_eq!(thumbed.file_name(), "full.jpg");
    }
}
