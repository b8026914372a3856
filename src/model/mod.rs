//! Data models for the gallery.

mod set;
mod tag;

pub use set::{ImageSet, SetId};
pub use tag::{ALL_LABEL, TagFilter, TagLabel, collect_tags};
