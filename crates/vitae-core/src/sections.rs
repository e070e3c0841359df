//! Section order management
//!
//! The `menu_sections` list carries one ordering/visibility descriptor
//! per top-level section. Two invariants hold after every normalize:
//!
//! - the `basic` descriptor exists and sits at index 0 with `order = 0`
//! - all `order` values form the dense sequence `0..n`
//!
//! Every store entry point that replaces the descriptor list funnels
//! through [`normalize`], so the invariants cannot be bypassed.

use crate::models::MenuSection;

/// Id of the always-present, always-first section
pub const BASIC_SECTION: &str = "basic";

/// The standard section set a new resume starts with
pub fn default_sections() -> Vec<MenuSection> {
    let specs = [
        (BASIC_SECTION, "Basic Info", "user"),
        ("education", "Education", "graduation-cap"),
        ("experience", "Experience", "briefcase"),
        ("projects", "Projects", "folder-git"),
        ("skills", "Skills", "wrench"),
    ];

    normalize(
        specs
            .iter()
            .map(|(id, title, icon)| MenuSection::new(*id, *title, *icon))
            .collect(),
    )
}

/// Enforce the ordering invariant on an arbitrary descriptor list.
///
/// The first `basic` descriptor is pinned at position 0 (one is
/// synthesized if the input has none); remaining descriptors keep
/// their given relative order, duplicate `basic` entries are dropped,
/// and `order` is reassigned as the dense index.
pub fn normalize(sections: Vec<MenuSection>) -> Vec<MenuSection> {
    let mut basic: Option<MenuSection> = None;
    let mut rest: Vec<MenuSection> = Vec::with_capacity(sections.len());

    for section in sections {
        if section.id == BASIC_SECTION {
            if basic.is_none() {
                basic = Some(section);
            }
        } else {
            rest.push(section);
        }
    }

    let basic = basic
        .unwrap_or_else(|| MenuSection::new(BASIC_SECTION, "Basic Info", "user"));

    let mut result = Vec::with_capacity(rest.len() + 1);
    result.push(basic);
    result.extend(rest);

    for (index, section) in result.iter_mut().enumerate() {
        section.order = index as u32;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str) -> MenuSection {
        MenuSection::new(id, id, "")
    }

    #[test]
    fn test_default_sections_start_with_basic() {
        let sections = default_sections();
        assert_eq!(sections[0].id, BASIC_SECTION);
        assert_eq!(sections[0].order, 0);
        assert!(sections.iter().all(|s| s.enabled));
    }

    #[test]
    fn test_normalize_pins_basic_first() {
        let input = vec![section("projects"), section("basic"), section("skills")];
        let result = normalize(input);

        let ids: Vec<&str> = result.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["basic", "projects", "skills"]);

        let orders: Vec<u32> = result.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn test_normalize_orders_are_dense_for_any_input() {
        let input = vec![
            MenuSection {
                order: 17,
                ..section("experience")
            },
            MenuSection {
                order: 3,
                ..section("basic")
            },
            MenuSection {
                order: 99,
                ..section("education")
            },
        ];

        let result = normalize(input);
        let orders: Vec<u32> = result.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        assert_eq!(result[0].id, BASIC_SECTION);
    }

    #[test]
    fn test_normalize_synthesizes_missing_basic() {
        let input = vec![section("education"), section("skills")];
        let result = normalize(input);

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].id, BASIC_SECTION);
        assert_eq!(result[0].order, 0);
    }

    #[test]
    fn test_normalize_drops_duplicate_basic() {
        let input = vec![section("basic"), section("education"), section("basic")];
        let result = normalize(input);

        let basics = result.iter().filter(|s| s.id == BASIC_SECTION).count();
        assert_eq!(basics, 1);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_normalize_preserves_relative_order() {
        let input = vec![
            section("skills"),
            section("projects"),
            section("basic"),
            section("education"),
        ];
        let result = normalize(input);

        let ids: Vec<&str> = result.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["basic", "skills", "projects", "education"]);
    }

    #[test]
    fn test_normalize_empty_input() {
        let result = normalize(Vec::new());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, BASIC_SECTION);
    }
}
