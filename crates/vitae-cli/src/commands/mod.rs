//! Command handlers

pub mod config;
pub mod pages;
pub mod resume;
pub mod section;

use anyhow::{bail, Result};

use vitae_core::ResumeStore;

/// Resolve a user-supplied reference to a resume id.
///
/// Accepts a full id, a unique id prefix, or an exact title.
pub fn resolve_id(store: &ResumeStore, needle: &str) -> Result<String> {
    if store.get(needle).is_some() {
        return Ok(needle.to_string());
    }

    let by_title: Vec<&str> = store
        .resumes()
        .filter(|r| r.title == needle)
        .map(|r| r.id.as_str())
        .collect();
    if by_title.len() == 1 {
        return Ok(by_title[0].to_string());
    }
    if by_title.len() > 1 {
        bail!("Title '{}' matches multiple resumes; use an id", needle);
    }

    let by_prefix: Vec<&str> = store
        .resumes()
        .filter(|r| r.id.starts_with(needle))
        .map(|r| r.id.as_str())
        .collect();
    match by_prefix.len() {
        0 => bail!("Resume not found: {}", needle),
        1 => Ok(by_prefix[0].to_string()),
        _ => bail!("Id prefix '{}' is ambiguous", needle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_full_id_prefix_and_title() {
        let mut store = ResumeStore::new();
        let id = store.create(None);
        store.rename(&id, "Backend Engineer");

        assert_eq!(resolve_id(&store, &id).unwrap(), id);
        assert_eq!(resolve_id(&store, &id[..8]).unwrap(), id);
        assert_eq!(resolve_id(&store, "Backend Engineer").unwrap(), id);
    }

    #[test]
    fn test_resolve_unknown_reference_fails() {
        let store = ResumeStore::new();
        assert!(resolve_id(&store, "nope").is_err());
    }

    #[test]
    fn test_resolve_ambiguous_title_fails() {
        let mut store = ResumeStore::new();
        let a = store.create(None);
        let b = store.create(None);
        store.rename(&a, "Same Title");
        store.rename(&b, "Same Title");

        assert!(resolve_id(&store, "Same Title").is_err());
    }
}
