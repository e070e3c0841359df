//! Opaque identifier generation
//!
//! Every resume, collection entity, and custom section gets a
//! globally-unique string id at creation time. Ids are opaque to the
//! rest of the core: nothing parses them, nothing reuses them, and
//! deleting an entity never frees its id for reassignment.

use uuid::Uuid;

/// Prefix for custom section ids, so they are recognizable in
/// `custom_data` keys and menu section descriptors.
const CUSTOM_SECTION_PREFIX: &str = "custom";

/// Generate a new opaque id
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Generate an id for a user-created custom section
pub fn new_section_id() -> String {
    format!("{}-{}", CUSTOM_SECTION_PREFIX, new_id())
}

/// Check whether a section id names a custom section
pub fn is_custom_section(id: &str) -> bool {
    id.starts_with(CUSTOM_SECTION_PREFIX)
}
