//! DOM contract of the gallery page.
//!
//! This module centralizes the element ids, class names and attributes the
//! server-rendered templates provide or the widget adds.

/// Element ids the page template provides.
pub mod ids {
    /// Lightbox overlay (backdrop)
    pub const LIGHTBOX: &str = "lightbox";
    /// Image shown inside the lightbox
    pub const LIGHTBOX_IMAGE: &str = "lightbox-image";
    /// "3 of 12" position text
    pub const LIGHTBOX_COUNTER: &str = "lightbox-counter";
    /// Download link for the current image
    pub const LIGHTBOX_DOWNLOAD: &str = "lightbox-download";
    /// Thumbnail strip
    pub const LIGHTBOX_THUMBNAILS: &str = "lightbox-thumbnails";
    /// Fullscreen toggle button
    pub const LIGHTBOX_FULLSCREEN: &str = "lightbox-fullscreen";

    /// Grid of set cards
    pub const SETS_CONTAINER: &str = "sets-container";
    /// Images of the selected set
    pub const IMAGES_CONTAINER: &str = "images-container";
    /// Global tag filter bar
    pub const TAG_FILTERS: &str = "tag-filters";
    /// Tags of the selected set
    pub const SET_TAGS: &str = "set-tags";
    /// People of the selected set
    pub const SET_PEOPLE: &str = "set-people";
    /// Description of the selected set
    pub const SET_DESCRIPTION: &str = "set-description";
    /// Back button area of the detail view
    pub const SET_CONTROLS: &str = "set-controls";
    /// Page heading
    pub const PAGE_TITLE: &str = "page-title";

    /// (button, form) pairs for the inline add forms
    pub const FORM_TOGGLES: &[(&str, &str)] = &[
        ("add-tag-button", "add-tag-form"),
        ("add-person-button", "add-person-form"),
    ];
}

/// Class names, without the leading dot.
pub mod classes {
    /// Clickable gallery image, source of the lightbox image list
    pub const GALLERY_IMAGE: &str = "gallery-image";
    pub const LIGHTBOX_CLOSE: &str = "lightbox-close";
    pub const LIGHTBOX_NEXT: &str = "lightbox-next";
    pub const LIGHTBOX_PREV: &str = "lightbox-prev";
    pub const LIGHTBOX_THUMB: &str = "lightbox-thumb";

    pub const SET_CARD: &str = "set-card";
    pub const SET_CARD_TITLE: &str = "set-card-title";
    pub const SET_CARD_COUNT: &str = "set-card-count";
    pub const SET_CARD_DESCRIPTION: &str = "set-card-description";
    pub const TAG_FILTER: &str = "tag-filter";
    pub const SET_TAG: &str = "set-tag";
    pub const SET_PERSON: &str = "set-person";
    pub const BACK_BUTTON: &str = "back-button";

    /// Highlight for the active tag label and the current thumbnail
    pub const ACTIVE: &str = "active";
}

/// Attribute names.
pub mod attrs {
    /// Full-size URL on a gallery image (falls back to `src`)
    pub const DATA_SRC: &str = "data-src";
    /// Thumbnail URL on a gallery image
    pub const DATA_THUMB: &str = "data-thumb";
    /// Position in the lightbox list, set on thumbnails
    pub const DATA_INDEX: &str = "data-index";
    /// Tag carried by a filter button (absent on "All")
    pub const DATA_TAG: &str = "data-tag";
    /// Set id carried by a grid card
    pub const DATA_SET_ID: &str = "data-set-id";
}

/// CSS `display` values.
pub mod display {
    pub const HIDDEN: &str = "none";
    /// Visible lightbox and revealed inline forms
    pub const FLEX: &str = "flex";
}

/// Cursor shown over the lightbox image.
pub mod cursor {
    pub const DEFAULT: &str = "default";
    pub const GRAB: &str = "grab";
    pub const GRABBING: &str = "grabbing";
}

/// Text of the back button in the detail view.
pub const BACK_LABEL: &str = "← Back to sets";

/// Query parameter that pre-selects a tag on page load.
pub const TAG_QUERY_PARAM: &str = "tag";

/// Query parameter that filters the grid by person when no tag is given.
pub const PERSON_QUERY_PARAM: &str = "person";
