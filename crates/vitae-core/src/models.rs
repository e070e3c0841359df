//! Data models for vitae
//!
//! Defines the resume document and its section payloads. A [`Resume`]
//! is an immutable-by-replacement snapshot: the store swaps whole
//! documents in and out of its map, so these types are plain owned
//! data with no interior mutability.
//!
//! Wire format note: mirror files use camelCase field names
//! (`createdAt`, `menuSections`, ...), so files written by other
//! frontends of the same format re-import cleanly.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids;
use crate::sections;

/// Flat record of personal details shown in the `basic` section
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    /// Full name
    #[serde(default)]
    pub name: String,
    /// Headline under the name (e.g. "Systems Engineer")
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    /// Free-form summary paragraph
    #[serde(default)]
    pub summary: String,
    /// e.g. "open to offers"
    #[serde(default)]
    pub employment_status: String,
    /// Whether templates should render a photo placeholder
    #[serde(default)]
    pub show_photo: bool,
}

/// An education entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    /// Stable identifier, assigned once at creation
    pub id: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub major: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub description: String,
    /// Rendering flag, independent of the section's `enabled` state
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl Education {
    /// Create a new entry with a fresh id
    pub fn new(school: impl Into<String>) -> Self {
        Self {
            id: ids::new_id(),
            school: school.into(),
            major: String::new(),
            degree: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            description: String::new(),
            visible: true,
        }
    }
}

/// A work experience entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    /// Free-form date range ("2020.01 - present")
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub details: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl Experience {
    pub fn new(company: impl Into<String>) -> Self {
        Self {
            id: ids::new_id(),
            company: company.into(),
            position: String::new(),
            date: String::new(),
            details: String::new(),
            visible: true,
        }
    }
}

/// A project entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ids::new_id(),
            name: name.into(),
            role: String::new(),
            date: String::new(),
            description: String::new(),
            link: String::new(),
            visible: true,
        }
    }
}

/// An entry in a user-created custom section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomItem {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl CustomItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: ids::new_id(),
            title: title.into(),
            subtitle: String::new(),
            date: String::new(),
            description: String::new(),
            visible: true,
        }
    }
}

fn default_visible() -> bool {
    true
}

/// Ordering/visibility descriptor for a top-level section
///
/// Distinct from the section's content: disabling a section hides it
/// from the rendered sequence but its data stays in the document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuSection {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default = "default_visible")]
    pub enabled: bool,
    #[serde(default)]
    pub order: u32,
}

impl MenuSection {
    pub fn new(id: impl Into<String>, title: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            icon: icon.into(),
            enabled: true,
            order: 0,
        }
    }
}

/// Presentation settings, opaque to the core except for
/// `page_padding` which feeds the pagination engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettings {
    #[serde(default = "default_font_size")]
    pub base_font_size: f64,
    /// Inner page margin in px; pagination subtracts it from the
    /// printable A4 height
    #[serde(default = "default_page_padding")]
    pub page_padding: f64,
    #[serde(default = "default_line_height")]
    pub line_height: f64,
    #[serde(default = "default_section_spacing")]
    pub section_spacing: f64,
    #[serde(default = "default_theme_color")]
    pub theme_color: String,
}

fn default_font_size() -> f64 {
    16.0
}

fn default_page_padding() -> f64 {
    32.0
}

fn default_line_height() -> f64 {
    1.5
}

fn default_section_spacing() -> f64 {
    20.0
}

fn default_theme_color() -> String {
    "#2563eb".to_string()
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            base_font_size: default_font_size(),
            page_padding: default_page_padding(),
            line_height: default_line_height(),
            section_spacing: default_section_spacing(),
            theme_color: default_theme_color(),
        }
    }
}

/// One resume: full structured content plus metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    /// Opaque, immutable identifier
    pub id: String,
    /// Display title; also names the mirrored file (`{title}.json`)
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Visual template reference, opaque to the core
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub basic: BasicInfo,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Opaque rich-text blob for the skills section
    #[serde(default)]
    pub skill_content: String,
    /// Entries of user-created custom sections, keyed by section id.
    /// Ordered map so serialization is deterministic and re-writing an
    /// unchanged snapshot yields a byte-identical mirror file.
    #[serde(default)]
    pub custom_data: BTreeMap<String, Vec<CustomItem>>,
    #[serde(default)]
    pub menu_sections: Vec<MenuSection>,
    /// Editing cursor; not structural
    #[serde(default = "default_active_section")]
    pub active_section: String,
    #[serde(default)]
    pub global_settings: GlobalSettings,
}

fn default_active_section() -> String {
    sections::BASIC_SECTION.to_string()
}

impl Resume {
    /// Create a new resume seeded with the default skeleton: the
    /// standard section set and one example entry per collection.
    pub fn new(title: impl Into<String>, template_id: Option<String>) -> Self {
        let now = Utc::now();
        let mut education = Education::new("Example University");
        education.major = "Computer Science".to_string();
        education.degree = "B.Sc.".to_string();
        education.start_date = "2016.09".to_string();
        education.end_date = "2020.06".to_string();

        let mut experience = Experience::new("Example Corp");
        experience.position = "Software Engineer".to_string();
        experience.date = "2020.07 - present".to_string();
        experience.details = "Describe what you built and shipped.".to_string();

        let mut project = Project::new("Example Project");
        project.role = "Maintainer".to_string();
        project.description = "Describe the project and your part in it.".to_string();

        Self {
            id: ids::new_id(),
            title: title.into(),
            created_at: now,
            updated_at: now,
            template_id,
            basic: BasicInfo {
                name: "Your Name".to_string(),
                ..BasicInfo::default()
            },
            education: vec![education],
            experience: vec![experience],
            projects: vec![project],
            skill_content: String::new(),
            custom_data: BTreeMap::new(),
            menu_sections: sections::default_sections(),
            active_section: default_active_section(),
            global_settings: GlobalSettings::default(),
        }
    }

    /// Deep-copy into a new document: fresh id, fresh timestamps,
    /// title suffixed. The source is left untouched.
    pub fn duplicate(&self) -> Self {
        let now = Utc::now();
        Self {
            id: ids::new_id(),
            title: format!("{} (Copy)", self.title),
            created_at: now,
            updated_at: now,
            ..self.clone()
        }
    }

    /// Bump the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    // ==================== Field-scoped mutators ====================
    //
    // Upsert rule (uniform for all collections): replace in place when
    // an entry with the same id exists, preserving its position;
    // append otherwise. Removal filters by id; an absent id is a no-op.

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    pub fn set_template(&mut self, template_id: Option<String>) {
        self.template_id = template_id;
        self.touch();
    }

    pub fn set_active_section(&mut self, section_id: impl Into<String>) {
        self.active_section = section_id.into();
        self.touch();
    }

    pub fn update_basic(&mut self, basic: BasicInfo) {
        self.basic = basic;
        self.touch();
    }

    pub fn set_skill_content(&mut self, content: impl Into<String>) {
        self.skill_content = content.into();
        self.touch();
    }

    pub fn update_global_settings(&mut self, settings: GlobalSettings) {
        self.global_settings = settings;
        self.touch();
    }

    pub fn upsert_education(&mut self, entry: Education) {
        upsert_by_id(&mut self.education, entry, |e| &e.id);
        self.touch();
    }

    pub fn remove_education(&mut self, id: &str) {
        self.education.retain(|e| e.id != id);
        self.touch();
    }

    pub fn upsert_experience(&mut self, entry: Experience) {
        upsert_by_id(&mut self.experience, entry, |e| &e.id);
        self.touch();
    }

    pub fn remove_experience(&mut self, id: &str) {
        self.experience.retain(|e| e.id != id);
        self.touch();
    }

    pub fn upsert_project(&mut self, entry: Project) {
        upsert_by_id(&mut self.projects, entry, |p| &p.id);
        self.touch();
    }

    pub fn remove_project(&mut self, id: &str) {
        self.projects.retain(|p| p.id != id);
        self.touch();
    }

    /// Create a custom section: descriptor and data entry in one step,
    /// so neither can exist without the other. Returns the section id.
    pub fn add_custom_section(&mut self, title: impl Into<String>, icon: impl Into<String>) -> String {
        let section_id = ids::new_section_id();
        let mut descriptor = MenuSection::new(section_id.clone(), title, icon);
        descriptor.order = self.menu_sections.len() as u32;
        self.menu_sections.push(descriptor);
        self.menu_sections = sections::normalize(std::mem::take(&mut self.menu_sections));
        self.custom_data.insert(section_id.clone(), Vec::new());
        self.touch();
        section_id
    }

    /// Remove a custom section: descriptor and data together. The
    /// cursor falls back to `basic` if it pointed at this section.
    pub fn remove_custom_section(&mut self, section_id: &str) {
        self.menu_sections.retain(|s| s.id != section_id);
        self.menu_sections = sections::normalize(std::mem::take(&mut self.menu_sections));
        self.custom_data.remove(section_id);
        if self.active_section == section_id {
            self.active_section = default_active_section();
        }
        self.touch();
    }

    /// Upsert an item into a custom section. No-op if the section was
    /// never created (custom sections are created atomically with
    /// their data entry).
    pub fn upsert_custom_item(&mut self, section_id: &str, item: CustomItem) {
        if let Some(items) = self.custom_data.get_mut(section_id) {
            upsert_by_id(items, item, |i| &i.id);
            self.touch();
        }
    }

    pub fn remove_custom_item(&mut self, section_id: &str, id: &str) {
        if let Some(items) = self.custom_data.get_mut(section_id) {
            items.retain(|i| i.id != id);
            self.touch();
        }
    }

    /// Flip an entity's `visible` flag. Safe under rapid repeated
    /// calls: toggling twice restores the original state.
    pub fn toggle_visibility(&mut self, target: &VisibilityTarget) {
        let flipped = match target {
            VisibilityTarget::Education(id) => {
                flip_visible(self.education.iter_mut().find(|e| &e.id == id).map(|e| &mut e.visible))
            }
            VisibilityTarget::Experience(id) => {
                flip_visible(self.experience.iter_mut().find(|e| &e.id == id).map(|e| &mut e.visible))
            }
            VisibilityTarget::Project(id) => {
                flip_visible(self.projects.iter_mut().find(|p| &p.id == id).map(|p| &mut p.visible))
            }
            VisibilityTarget::Custom { section_id, id } => flip_visible(
                self.custom_data
                    .get_mut(section_id)
                    .and_then(|items| items.iter_mut().find(|i| &i.id == id))
                    .map(|i| &mut i.visible),
            ),
        };
        if flipped {
            self.touch();
        }
    }

    /// Re-pin `basic` at position 0 and reassign dense orders
    pub fn reorder_sections(&mut self, new_order: Vec<MenuSection>) {
        self.menu_sections = sections::normalize(new_order);
        self.touch();
    }

    /// Sections in their rendered order, disabled ones excluded
    pub fn rendered_sections(&self) -> Vec<&MenuSection> {
        let mut visible: Vec<&MenuSection> =
            self.menu_sections.iter().filter(|s| s.enabled).collect();
        visible.sort_by_key(|s| s.order);
        visible
    }
}

/// Addresses one entity's `visible` flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibilityTarget {
    Education(String),
    Experience(String),
    Project(String),
    Custom { section_id: String, id: String },
}

fn upsert_by_id<T, F>(items: &mut Vec<T>, item: T, id_of: F)
where
    F: Fn(&T) -> &str,
{
    match items.iter().position(|existing| id_of(existing) == id_of(&item)) {
        Some(pos) => items[pos] = item,
        None => items.push(item),
    }
}

fn flip_visible(flag: Option<&mut bool>) -> bool {
    match flag {
        Some(v) => {
            *v = !*v;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_resume_skeleton() {
        let resume = Resume::new("My Resume", None);
        assert_eq!(resume.title, "My Resume");
        assert_eq!(resume.education.len(), 1);
        assert_eq!(resume.experience.len(), 1);
        assert_eq!(resume.projects.len(), 1);
        assert_eq!(resume.active_section, "basic");
        assert_eq!(resume.menu_sections[0].id, "basic");
        assert_eq!(resume.menu_sections[0].order, 0);
    }

    #[test]
    fn test_upsert_education_appends_then_replaces() {
        let mut resume = Resume::new("Test", None);
        resume.education.clear();

        let mut entry = Education::new("X");
        entry.id = "e1".to_string();
        resume.upsert_education(entry.clone());
        assert_eq!(resume.education.len(), 1);
        assert_eq!(resume.education[0].school, "X");

        entry.school = "Y".to_string();
        resume.upsert_education(entry);
        assert_eq!(resume.education.len(), 1);
        assert_eq!(resume.education[0].school, "Y");
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let mut resume = Resume::new("Test", None);
        resume.experience.clear();

        let mut entry = Experience::new("Corp");
        entry.id = "x1".to_string();
        resume.upsert_experience(entry.clone());
        let snapshot = resume.experience.clone();

        resume.upsert_experience(entry);
        assert_eq!(resume.experience, snapshot);
    }

    #[test]
    fn test_upsert_preserves_position() {
        let mut resume = Resume::new("Test", None);
        resume.projects.clear();

        for name in ["a", "b", "c"] {
            let mut p = Project::new(name);
            p.id = name.to_string();
            resume.upsert_project(p);
        }

        let mut replacement = Project::new("b2");
        replacement.id = "b".to_string();
        resume.upsert_project(replacement);

        let names: Vec<&str> = resume.projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b2", "c"]);
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let mut resume = Resume::new("Test", None);
        let before = resume.education.len();
        resume.remove_education("no-such-id");
        assert_eq!(resume.education.len(), before);
    }

    #[test]
    fn test_deleted_id_is_never_reused() {
        let mut resume = Resume::new("Test", None);
        resume.education.clear();

        let entry = Education::new("X");
        let old_id = entry.id.clone();
        resume.upsert_education(entry);
        resume.remove_education(&old_id);

        let fresh = Education::new("Y");
        assert_ne!(fresh.id, old_id);
    }

    #[test]
    fn test_toggle_visibility_twice_restores() {
        let mut resume = Resume::new("Test", None);
        let id = resume.education[0].id.clone();
        let target = VisibilityTarget::Education(id);

        assert!(resume.education[0].visible);
        resume.toggle_visibility(&target);
        assert!(!resume.education[0].visible);
        resume.toggle_visibility(&target);
        assert!(resume.education[0].visible);
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let mut resume = Resume::new("Test", None);
        let before = resume.updated_at;
        resume.toggle_visibility(&VisibilityTarget::Project("missing".to_string()));
        assert_eq!(resume.updated_at, before);
    }

    #[test]
    fn test_custom_section_created_atomically() {
        let mut resume = Resume::new("Test", None);
        let section_id = resume.add_custom_section("Awards", "trophy");

        assert!(resume.custom_data.contains_key(&section_id));
        assert!(resume.menu_sections.iter().any(|s| s.id == section_id));
    }

    #[test]
    fn test_custom_section_removed_atomically() {
        let mut resume = Resume::new("Test", None);
        let section_id = resume.add_custom_section("Awards", "trophy");
        resume.set_active_section(section_id.clone());

        resume.remove_custom_section(&section_id);
        assert!(!resume.custom_data.contains_key(&section_id));
        assert!(!resume.menu_sections.iter().any(|s| s.id == section_id));
        assert_eq!(resume.active_section, "basic");
    }

    #[test]
    fn test_upsert_custom_item_requires_section() {
        let mut resume = Resume::new("Test", None);
        resume.upsert_custom_item("never-created", CustomItem::new("orphan"));
        assert!(resume.custom_data.is_empty());

        let section_id = resume.add_custom_section("Awards", "trophy");
        resume.upsert_custom_item(&section_id, CustomItem::new("Best Paper"));
        assert_eq!(resume.custom_data[&section_id].len(), 1);
    }

    #[test]
    fn test_duplicate_gets_fresh_identity() {
        let resume = Resume::new("Original", None);
        let copy = resume.duplicate();

        assert_ne!(copy.id, resume.id);
        assert_eq!(copy.title, "Original (Copy)");
        assert_eq!(copy.education, resume.education);
        assert!(copy.created_at >= resume.created_at);
    }

    #[test]
    fn test_rendered_sections_excludes_disabled() {
        let mut resume = Resume::new("Test", None);
        if let Some(s) = resume.menu_sections.iter_mut().find(|s| s.id == "projects") {
            s.enabled = false;
        }

        let rendered = resume.rendered_sections();
        assert!(rendered.iter().all(|s| s.id != "projects"));
        assert_eq!(rendered[0].id, "basic");
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut resume = Resume::new("Roundtrip", Some("classic".to_string()));
        let section_id = resume.add_custom_section("Awards", "trophy");
        resume.upsert_custom_item(&section_id, CustomItem::new("Best Paper"));

        let json = serde_json::to_string_pretty(&resume).unwrap();
        let loaded: Resume = serde_json::from_str(&json).unwrap();
        assert_eq!(resume, loaded);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let resume = Resume::new("Casing", None);
        let json = serde_json::to_string(&resume).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"menuSections\""));
        assert!(json.contains("\"skillContent\""));
        assert!(!json.contains("\"created_at\""));
    }
}
