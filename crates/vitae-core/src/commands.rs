//! Typed mutation commands
//!
//! Every legal change to a resume is one variant of [`Mutation`], so
//! the full mutation surface is enumerable and each variant can be
//! tested in isolation. The store applies a command, bumps
//! `updated_at`, and schedules a mirror write-through; there is no
//! open-ended partial-patch path.

use crate::models::{
    BasicInfo, CustomItem, Education, Experience, GlobalSettings, MenuSection, Project,
    VisibilityTarget,
};

/// A single mutation of one resume document
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Change the display title (and thereby the mirror file name)
    Rename { title: String },
    /// Point the document at a different visual template
    SetTemplate { template_id: Option<String> },
    /// Move the editing cursor; not structural
    SetActiveSection { section_id: String },
    /// Replace the basic info record
    UpdateBasic(BasicInfo),
    /// Create-or-replace an education entry by id
    UpsertEducation(Education),
    RemoveEducation { id: String },
    UpsertExperience(Experience),
    RemoveExperience { id: String },
    UpsertProject(Project),
    RemoveProject { id: String },
    /// Replace the skills rich-text blob
    SetSkillContent { content: String },
    /// Create a custom section: descriptor and data entry together
    AddCustomSection { title: String, icon: String },
    /// Remove a custom section: descriptor and data entry together
    RemoveCustomSection { section_id: String },
    UpsertCustomItem { section_id: String, item: CustomItem },
    RemoveCustomItem { section_id: String, id: String },
    /// Flip one entity's `visible` flag
    ToggleVisibility(VisibilityTarget),
    /// Re-pin `basic` and reassign dense orders from the given order
    ReorderSections(Vec<MenuSection>),
    /// Replace the descriptor list; normalized like a reorder
    ReplaceSections(Vec<MenuSection>),
    UpdateGlobalSettings(GlobalSettings),
}
