//! Grid/detail view state and tag filtering.
//!
//! The page shows either the grid of all sets (filtered by the active tag, or
//! by a person when no tag is active) or the images of a single set. Fetch
//! responses are matched against the request that produced them so a slow,
//! older response never replaces the result of a newer one.

use crate::model::{ImageSet, TagFilter, TagLabel, collect_tags};

/// Page title shown above the grid.
pub const GRID_TITLE: &str = "Sets";

/// Which of the two views is showing.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewMode {
    /// Grid of set cards
    Grid,
    /// Images of one set
    Detail(ImageSet),
}

/// Handle for an in-flight fetch, compared against the latest issued one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Monotonic request counter for one kind of fetch.
#[derive(Debug, Clone, Default)]
struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    fn issue(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }
}

/// State behind the sets grid, the tag bar and the set detail view.
#[derive(Debug, Clone)]
pub struct ViewState {
    all_sets: Vec<ImageSet>,
    tags: Vec<String>,
    filter: TagFilter,
    person: Option<String>,
    mode: ViewMode,
    list_requests: RequestSequence,
    detail_requests: RequestSequence,
}

impl ViewState {
    /// Create an empty grid view, optionally pre-filtered by `initial_tag`.
    pub fn new(initial_tag: Option<String>) -> Self {
        let mut filter = TagFilter::all();
        filter.select(initial_tag);
        Self {
            all_sets: Vec::new(),
            tags: Vec::new(),
            filter,
            person: None,
            mode: ViewMode::Grid,
            list_requests: RequestSequence::default(),
            detail_requests: RequestSequence::default(),
        }
    }

    /// Also filter by `person` while no tag is active.
    pub fn with_person(mut self, person: Option<String>) -> Self {
        self.person = person;
        self
    }

    // ========================================================================
    // Set list
    // ========================================================================

    /// Register a new `GET /sets` request.
    pub fn begin_sets_request(&mut self) -> RequestTicket {
        self.list_requests.issue()
    }

    /// Store a fetched set list. Returns `false` if `ticket` is stale.
    ///
    /// An active tag that no set carries any more is dropped so the tag bar
    /// always has exactly one highlighted label.
    pub fn accept_sets(&mut self, ticket: RequestTicket, sets: Vec<ImageSet>) -> bool {
        if !self.list_requests.is_current(ticket) {
            log::debug!("Dropping stale set list response");
            return false;
        }
        self.tags = collect_tags(&sets);
        self.all_sets = sets;

        let unknown = self
            .filter
            .active()
            .filter(|active| !self.tags.iter().any(|t| t == *active));
        if let Some(active) = unknown {
            log::debug!("Active tag '{}' not present in any set, showing all", active);
            self.filter.select(None);
        }
        log::info!(
            "Loaded {} sets with {} distinct tags",
            self.all_sets.len(),
            self.tags.len()
        );
        true
    }

    pub fn all_sets(&self) -> &[ImageSet] {
        &self.all_sets
    }

    /// Union of tags across all sets, sorted.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    // ========================================================================
    // Tag filter
    // ========================================================================

    pub fn active_tag(&self) -> Option<&str> {
        self.filter.active()
    }

    pub fn active_person(&self) -> Option<&str> {
        self.person.as_deref()
    }

    /// Change the active tag (`None` = "All"). Clears the person filter.
    pub fn select_tag(&mut self, tag: Option<String>) {
        log::debug!("Tag filter set to {:?}", tag);
        self.person = None;
        self.filter.select(tag);
    }

    /// Sets passing the active tag filter, or the person filter when no
    /// tag is active.
    pub fn filtered_sets(&self) -> Vec<&ImageSet> {
        match (&self.person, self.filter.active()) {
            (Some(person), None) => self
                .all_sets
                .iter()
                .filter(|set| set.has_person(person))
                .collect(),
            _ => self.filter.apply(&self.all_sets),
        }
    }

    /// Labels for the tag bar, exactly one of them active.
    pub fn tag_labels(&self) -> Vec<TagLabel> {
        self.filter.labels(&self.tags)
    }

    // ========================================================================
    // Grid / detail
    // ========================================================================

    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    pub fn current_set(&self) -> Option<&ImageSet> {
        match &self.mode {
            ViewMode::Detail(set) => Some(set),
            ViewMode::Grid => None,
        }
    }

    /// Register a new `GET /sets/{id}` request.
    pub fn begin_set_request(&mut self) -> RequestTicket {
        self.detail_requests.issue()
    }

    /// Switch to the detail view of `set`. Returns `false` if `ticket` is
    /// stale or the user already went back to the grid.
    pub fn accept_set(&mut self, ticket: RequestTicket, set: ImageSet) -> bool {
        if !self.detail_requests.is_current(ticket) {
            log::debug!("Dropping stale response for set '{}'", set.id);
            return false;
        }
        log::info!("Showing set '{}' ({} images)", set.id, set.images.len());
        self.mode = ViewMode::Detail(set);
        true
    }

    /// Return to the grid. The active tag filter is kept.
    ///
    /// Also invalidates any detail request still in flight.
    pub fn show_sets(&mut self) {
        self.detail_requests.issue();
        self.mode = ViewMode::Grid;
    }

    /// Title for the page heading.
    pub fn page_title(&self) -> &str {
        match &self.mode {
            ViewMode::Grid => GRID_TITLE,
            ViewMode::Detail(set) => &set.title,
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(None)
    }
}
