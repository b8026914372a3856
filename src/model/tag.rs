//! Tag filter over the in-memory set list.
//!
//! One tag at a time can be active; no active tag means "All".

use std::collections::BTreeSet;

use super::ImageSet;

/// Label text of the catch-all filter button.
pub const ALL_LABEL: &str = "All";

/// Sorted union of every tag across `sets`.
pub fn collect_tags(sets: &[ImageSet]) -> Vec<String> {
    sets.iter()
        .flat_map(|set| set.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// One button in the tag filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagLabel {
    /// Tag this label selects, `None` for "All"
    pub tag: Option<String>,
    /// Whether this label is the highlighted one
    pub active: bool,
}

impl TagLabel {
    /// Text shown on the button.
    pub fn text(&self) -> &str {
        self.tag.as_deref().unwrap_or(ALL_LABEL)
    }
}

/// The active tag filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    active: Option<String>,
}

impl TagFilter {
    /// Filter that shows every set.
    pub fn all() -> Self {
        Self { active: None }
    }

    /// Filter that shows only sets tagged `tag`.
    pub fn tagged(tag: impl Into<String>) -> Self {
        Self {
            active: Some(tag.into()),
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn select(&mut self, tag: Option<String>) {
        self.active = tag;
    }

    /// Whether `set` passes the filter.
    pub fn matches(&self, set: &ImageSet) -> bool {
        match &self.active {
            Some(tag) => set.has_tag(tag),
            None => true,
        }
    }

    /// Sets passing the filter, in their original order.
    pub fn apply<'a>(&self, sets: &'a [ImageSet]) -> Vec<&'a ImageSet> {
        sets.iter().filter(|set| self.matches(set)).collect()
    }

    /// "All" followed by one label per tag, with exactly one marked active.
    ///
    /// An active tag that is not among `tags` is treated as "All".
    pub fn labels(&self, tags: &[String]) -> Vec<TagLabel> {
        let active = self
            .active
            .as_deref()
            .filter(|active| tags.iter().any(|t| t == *active));

        std::iter::once(TagLabel {
            tag: None,
            active: active.is_none(),
        })
        .chain(tags.iter().map(|tag| TagLabel {
            tag: Some(tag.clone()),
            active: active == Some(tag.as_str()),
        }))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sets() -> Vec<ImageSet> {
        vec![
            ImageSet::new("1", "One").with_tags(["portrait", "studio"]),
            ImageSet::new("2", "Two").with_tags(["landscape"]),
            ImageSet::new("3", "Three").with_tags(["portrait"]),
            ImageSet::new("4", "Four"),
        ]
    }

    fn ids(sets: &[&ImageSet]) -> Vec<String> {
        sets.iter().map(|s| s.id.to_string()).collect()
    }

    #[test]
    fn test_collect_tags_is_sorted_union() {
        assert_eq!(
            collect_tags(&sample_sets()),
            vec!["landscape", "portrait", "studio"]
        );
        assert!(collect_tags(&[]).is_empty());
    }

    #[test]
    fn test_filter_all_keeps_everything() {
        let sets = sample_sets();
        assert_eq!(TagFilter::all().apply(&sets).len(), sets.len());
    }

    #[test]
    fn test_filter_by_tag_is_exact_subset() {
        let sets = sample_sets();
        let filtered = TagFilter::tagged("portrait").apply(&sets);
        assert_eq!(ids(&filtered), vec!["1", "3"]);
        assert!(filtered.iter().all(|s| s.has_tag("portrait")));
    }

    #[test]
    fn test_filter_single_tag_scenario() {
        let sets = vec![
            ImageSet::new("1", "A").with_tags(["a"]),
            ImageSet::new("2", "B").with_tags(["b"]),
        ];
        assert_eq!(ids(&TagFilter::tagged("a").apply(&sets)), vec!["1"]);
    }

    #[test]
    fn test_labels_all_active_when_no_tag() {
        let tags = collect_tags(&sample_sets());
        let labels = TagFilter::all().labels(&tags);

        assert_eq!(labels.len(), tags.len() + 1);
        assert_eq!(labels[0].text(), ALL_LABEL);
        assert_eq!(labels.iter().filter(|l| l.active).count(), 1);
        assert!(labels[0].active);
    }

    #[test]
    fn test_labels_exactly_one_active() {
        let tags = collect_tags(&sample_sets());
        for tag in &tags {
            let labels = TagFilter::tagged(tag.as_str()).labels(&tags);
            let active: Vec<_> = labels.iter().filter(|l| l.active).collect();
            assert_eq!(active.len(), 1);
            assert_eq!(active[0].text(), tag.as_str());
        }
    }

    #[test]
    fn test_labels_unknown_tag_falls_back_to_all() {
        let tags = collect_tags(&sample_sets());
        let labels = TagFilter::tagged("missing").labels(&tags);
        assert!(labels[0].active);
        assert_eq!(labels.iter().filter(|l| l.active).count(), 1);
    }
}
