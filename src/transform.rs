//! Pan/zoom transform for the lightbox image.
//!
//! Zoom is additive and clamped to a [`ZoomBounds`] range. Pan is a free 2D
//! offset in CSS pixels that only exists while the image is zoomed in: every
//! time zoom falls back to the lower bound the pan is dropped.

/// Smallest zoom level (image fits the viewport).
pub const MIN_ZOOM: f32 = 1.0;

/// Largest zoom level.
pub const MAX_ZOOM: f32 = 5.0;

/// Zoom values this close to the lower bound snap onto it.
const ZOOM_SNAP_EPSILON: f32 = 1e-4;

/// Inclusive zoom range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBounds {
    pub min: f32,
    pub max: f32,
}

impl ZoomBounds {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamp a zoom value into range, snapping float drift onto `min`.
    pub fn clamp(&self, zoom: f32) -> f32 {
        let zoom = zoom.clamp(self.min, self.max);
        if zoom - self.min < ZOOM_SNAP_EPSILON {
            self.min
        } else {
            zoom
        }
    }
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self::new(MIN_ZOOM, MAX_ZOOM)
    }
}

/// Represents pan/zoom transform state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub zoom: f32,
    pub pan_x: f32,
    pub pan_y: f32,
}

impl Transform {
    /// Create a new transform with the given zoom and pan.
    pub fn new(zoom: f32, pan_x: f32, pan_y: f32) -> Self {
        Self { zoom, pan_x, pan_y }
    }

    /// Create an identity transform (zoom=1, no pan).
    pub fn identity() -> Self {
        Self::new(MIN_ZOOM, 0.0, 0.0)
    }

    /// Whether the image is shown unzoomed.
    pub fn is_unzoomed(&self, bounds: ZoomBounds) -> bool {
        self.zoom <= bounds.min
    }

    /// Add `delta` to the zoom level, clamped to `bounds`.
    ///
    /// Landing on the lower bound resets the pan so the image re-centers.
    pub fn zoom_by(&self, delta: f32, bounds: ZoomBounds) -> Transform {
        let zoom = bounds.clamp(self.zoom + delta);
        if zoom == bounds.min {
            Transform::new(zoom, 0.0, 0.0)
        } else {
            Transform::new(zoom, self.pan_x, self.pan_y)
        }
    }

    /// Replace the pan offset, keeping the zoom.
    pub fn pan_to(&self, pan_x: f32, pan_y: f32) -> Transform {
        Transform::new(self.zoom, pan_x, pan_y)
    }

    /// CSS `transform` value for the lightbox image.
    pub fn to_css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.pan_x, self.pan_y, self.zoom
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Anchor captured when a pan drag starts.
///
/// Stores `cursor - pan` so that moving the cursor by `d` moves the image by
/// exactly `d`, with no jump on the first move event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    origin_x: f32,
    origin_y: f32,
}

impl DragAnchor {
    /// Start a drag at the given cursor position over `transform`.
    pub fn begin(transform: &Transform, cursor_x: f32, cursor_y: f32) -> Self {
        Self {
            origin_x: cursor_x - transform.pan_x,
            origin_y: cursor_y - transform.pan_y,
        }
    }

    /// Pan offset for the cursor's current position.
    pub fn pan_for(&self, cursor_x: f32, cursor_y: f32) -> (f32, f32) {
        (cursor_x - self.origin_x, cursor_y - self.origin_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_identity_transform() {
        let t = Transform::identity();
        assert_eq!(t.zoom, 1.0);
        assert_eq!(t.pan_x, 0.0);
        assert_eq!(t.pan_y, 0.0);
        assert!(t.is_unzoomed(ZoomBounds::default()));
    }

    #[test]
    fn test_zoom_by_clamps_at_max() {
        let bounds = ZoomBounds::default();
        let mut t = Transform::new(4.5, 0.0, 0.0);
        for _ in 0..6 {
            t = t.zoom_by(0.1, bounds);
        }
        assert_eq!(t.zoom, MAX_ZOOM);
    }

    #[test]
    fn test_zoom_by_clamps_at_min() {
        let bounds = ZoomBounds::default();
        let t = Transform::new(1.2, 0.0, 0.0).zoom_by(-3.0, bounds);
        assert_eq!(t.zoom, MIN_ZOOM);
    }

    #[test]
    fn test_zoom_back_to_min_resets_pan() {
        let bounds = ZoomBounds::default();
        let t = Transform::identity()
            .zoom_by(0.1, bounds)
            .pan_to(40.0, -25.0)
            .zoom_by(-0.1, bounds);

        assert_eq!(t.zoom, 1.0);
        assert_eq!(t.pan_x, 0.0);
        assert_eq!(t.pan_y, 0.0);
    }

    #[test]
    fn test_zoom_keeps_pan_while_zoomed() {
        let bounds = ZoomBounds::default();
        let t = Transform::new(2.0, 10.0, 20.0).zoom_by(0.5, bounds);
        assert!(approx_eq(t.zoom, 2.5));
        assert_eq!(t.pan_x, 10.0);
        assert_eq!(t.pan_y, 20.0);
    }

    #[test]
    fn test_float_drift_snaps_to_min() {
        let bounds = ZoomBounds::default();
        let mut t = Transform::identity();
        for _ in 0..7 {
            t = t.zoom_by(0.1, bounds);
        }
        t = t.pan_to(5.0, 5.0);
        for _ in 0..7 {
            t = t.zoom_by(-0.1, bounds);
        }
        assert_eq!(t.zoom, 1.0);
        assert_eq!((t.pan_x, t.pan_y), (0.0, 0.0));
    }

    #[test]
    fn test_drag_anchor_does_not_jump() {
        let t = Transform::new(2.0, 30.0, -10.0);
        let anchor = DragAnchor::begin(&t, 100.0, 100.0);

        // No movement yet: pan stays where it was
        assert_eq!(anchor.pan_for(100.0, 100.0), (30.0, -10.0));

        // Moving the cursor moves the image by the same amount
        assert_eq!(anchor.pan_for(115.0, 90.0), (45.0, -20.0));
    }

    #[test]
    fn test_css_output() {
        let t = Transform::new(2.5, 12.0, -4.0);
        assert_eq!(t.to_css(), "translate(12px, -4px) scale(2.5)");
        assert_eq!(
            Transform::identity().to_css(),
            "translate(0px, 0px) scale(1)"
        );
    }
}
