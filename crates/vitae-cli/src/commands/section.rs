//! Section command handlers

use anyhow::{bail, Result};

use vitae_core::{ResumeStore, BASIC_SECTION};

use crate::commands::resolve_id;
use crate::output::Output;

/// List the sections of a resume in render order
pub fn list(store: &ResumeStore, reference: String, output: &Output) -> Result<()> {
    let id = resolve_id(store, &reference)?;
    output.print_sections(store.get(&id).unwrap());
    Ok(())
}

/// Reorder sections. Sections named in `order` come first, in that
/// order; any unmentioned sections follow in their current order.
/// Basic info is always pinned to the top regardless.
pub fn reorder(
    store: &mut ResumeStore,
    reference: String,
    order: Vec<String>,
    output: &Output,
) -> Result<()> {
    let id = resolve_id(store, &reference)?;
    let current = store.get(&id).unwrap().menu_sections.clone();

    let mut reordered = Vec::with_capacity(current.len());
    for section_id in &order {
        match current.iter().find(|s| &s.id == section_id) {
            Some(section) => reordered.push(section.clone()),
            None => bail!("Unknown section: {}", section_id),
        }
    }
    for section in &current {
        if !order.contains(&section.id) {
            reordered.push(section.clone());
        }
    }

    store.reorder_sections(&id, reordered);
    output.success("Sections reordered");
    list(store, id, output)
}

/// Enable a section
pub fn enable(
    store: &mut ResumeStore,
    reference: String,
    section_id: String,
    output: &Output,
) -> Result<()> {
    set_enabled(store, reference, section_id, true, output)
}

/// Disable a section
pub fn disable(
    store: &mut ResumeStore,
    reference: String,
    section_id: String,
    output: &Output,
) -> Result<()> {
    set_enabled(store, reference, section_id, false, output)
}

fn set_enabled(
    store: &mut ResumeStore,
    reference: String,
    section_id: String,
    enabled: bool,
    output: &Output,
) -> Result<()> {
    if section_id == BASIC_SECTION && !enabled {
        bail!("The basic info section cannot be disabled");
    }

    let id = resolve_id(store, &reference)?;
    let mut sections = store.get(&id).unwrap().menu_sections.clone();

    let Some(section) = sections.iter_mut().find(|s| s.id == section_id) else {
        bail!("Unknown section: {}", section_id);
    };
    section.enabled = enabled;
    let title = section.title.clone();

    store.replace_sections(&id, sections);
    output.success(&format!(
        "{} section: {}",
        if enabled { "Enabled" } else { "Disabled" },
        title
    ));
    Ok(())
}
