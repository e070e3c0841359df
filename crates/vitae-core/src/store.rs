//! Resume document store
//!
//! The `ResumeStore` owns every resume document, keyed by id, and
//! tracks which one is active. It is an explicit, constructible state
//! container: the application root builds one (and tests build a
//! fresh one per case), there is no global singleton.
//!
//! ## Mutation path
//!
//! All writes go through the typed [`Mutation`] command set. A
//! committed mutation:
//! 1. replaces the whole document snapshot in the map (no in-place
//!    field mutation, so readers never see a torn document),
//! 2. bumps `updated_at`,
//! 3. pushes a fire-and-forget [`MirrorTask`] into the outbox.
//!
//! The mirror outcome is never awaited and never affects the
//! in-memory result. Operations referencing an unknown document id
//! are silent no-ops: the store favors availability over validation.
//!
//! ## Usage
//!
//! ```ignore
//! let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut store = ResumeStore::with_outbox(tx);
//!
//! let id = store.create(None);
//! store.rename(&id, "Backend Resume");
//! ```

use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::debug;

use crate::commands::Mutation;
use crate::mirror::MirrorTask;
use crate::models::{
    BasicInfo, CustomItem, Education, Experience, GlobalSettings, MenuSection, Project, Resume,
    VisibilityTarget,
};

/// In-memory store of all resume documents
pub struct ResumeStore {
    /// All documents, keyed by id
    resumes: HashMap<String, Resume>,
    /// Id of the document currently being edited/previewed
    active_id: Option<String>,
    /// Outbox for fire-and-forget mirror tasks; `None` in detached
    /// (mirror-less) stores
    outbox: Option<mpsc::UnboundedSender<MirrorTask>>,
}

impl ResumeStore {
    /// Create a detached store with no mirror outbox
    pub fn new() -> Self {
        Self {
            resumes: HashMap::new(),
            active_id: None,
            outbox: None,
        }
    }

    /// Create a store whose mutations queue mirror tasks on `outbox`
    pub fn with_outbox(outbox: mpsc::UnboundedSender<MirrorTask>) -> Self {
        Self {
            resumes: HashMap::new(),
            active_id: None,
            outbox: Some(outbox),
        }
    }

    // ==================== Reads ====================

    /// Get a document by id
    pub fn get(&self, id: &str) -> Option<&Resume> {
        self.resumes.get(id)
    }

    /// All documents, in no particular order
    pub fn resumes(&self) -> impl Iterator<Item = &Resume> {
        self.resumes.values()
    }

    /// Id of the active document, if any
    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    /// The active document snapshot
    ///
    /// Always read through the map, so it is identical to
    /// `get(active_id)` immediately after any mutation.
    pub fn active(&self) -> Option<&Resume> {
        self.active_id.as_deref().and_then(|id| self.resumes.get(id))
    }

    pub fn len(&self) -> usize {
        self.resumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resumes.is_empty()
    }

    // ==================== Lifecycle operations ====================

    /// Create a new document from the default skeleton, insert it,
    /// make it active, and schedule its first mirror write.
    /// Never fails.
    pub fn create(&mut self, template_id: Option<String>) -> String {
        let resume = Resume::new(default_title(&self.resumes), template_id);
        let id = resume.id.clone();
        self.schedule(MirrorTask::WriteThrough {
            resume: Box::new(resume.clone()),
            previous: None,
        });
        self.resumes.insert(id.clone(), resume);
        self.active_id = Some(id.clone());
        id
    }

    /// Make a document active; no-op when the id is unknown
    pub fn set_active(&mut self, id: &str) {
        if self.resumes.contains_key(id) {
            self.active_id = Some(id.to_string());
        } else {
            debug!(id, "set_active: unknown document id, ignoring");
        }
    }

    /// Deep-copy a document under a new id and fresh timestamps,
    /// insert and activate the copy. The source is untouched.
    pub fn duplicate(&mut self, id: &str) -> Option<String> {
        let copy = self.resumes.get(id)?.duplicate();
        let new_id = copy.id.clone();
        self.schedule(MirrorTask::WriteThrough {
            resume: Box::new(copy.clone()),
            previous: None,
        });
        self.resumes.insert(new_id.clone(), copy);
        self.active_id = Some(new_id.clone());
        Some(new_id)
    }

    /// Remove a document and schedule best-effort deletion of its
    /// mirrored file. Clears the active pointer if it pointed here.
    pub fn delete(&mut self, id: &str) {
        let Some(removed) = self.resumes.remove(id) else {
            debug!(id, "delete: unknown document id, ignoring");
            return;
        };
        if self.active_id.as_deref() == Some(id) {
            self.active_id = None;
        }
        self.schedule(MirrorTask::Delete {
            title: removed.title,
        });
    }

    /// Insert or overwrite a document from externally-read content.
    ///
    /// Bypasses the timestamp bump and the mirror write-back; used
    /// when re-hydrating from the directory, so hydration can never
    /// trigger a write loop.
    pub fn import(&mut self, resume: Resume) {
        self.resumes.insert(resume.id.clone(), resume);
    }

    // ==================== Mutation ====================

    /// Apply one typed mutation to a document.
    ///
    /// Bumps `updated_at`, replaces the snapshot, and schedules a
    /// write-through carrying both the previous and new snapshot so
    /// the mirror can clean up after a title change. No-op when the
    /// id is unknown.
    pub fn apply(&mut self, id: &str, mutation: Mutation) {
        self.mutate(id, |resume| match mutation {
            Mutation::Rename { title } => resume.set_title(title),
            Mutation::SetTemplate { template_id } => resume.set_template(template_id),
            Mutation::SetActiveSection { section_id } => resume.set_active_section(section_id),
            Mutation::UpdateBasic(basic) => resume.update_basic(basic),
            Mutation::UpsertEducation(entry) => resume.upsert_education(entry),
            Mutation::RemoveEducation { id } => resume.remove_education(&id),
            Mutation::UpsertExperience(entry) => resume.upsert_experience(entry),
            Mutation::RemoveExperience { id } => resume.remove_experience(&id),
            Mutation::UpsertProject(entry) => resume.upsert_project(entry),
            Mutation::RemoveProject { id } => resume.remove_project(&id),
            Mutation::SetSkillContent { content } => resume.set_skill_content(content),
            Mutation::AddCustomSection { title, icon } => {
                resume.add_custom_section(title, icon);
            }
            Mutation::RemoveCustomSection { section_id } => {
                resume.remove_custom_section(&section_id)
            }
            Mutation::UpsertCustomItem { section_id, item } => {
                resume.upsert_custom_item(&section_id, item)
            }
            Mutation::RemoveCustomItem { section_id, id } => {
                resume.remove_custom_item(&section_id, &id)
            }
            Mutation::ToggleVisibility(target) => resume.toggle_visibility(&target),
            Mutation::ReorderSections(order) => resume.reorder_sections(order),
            Mutation::ReplaceSections(sections) => resume.reorder_sections(sections),
            Mutation::UpdateGlobalSettings(settings) => resume.update_global_settings(settings),
        });
    }

    // ==================== Field-scoped sugar ====================

    pub fn rename(&mut self, id: &str, title: impl Into<String>) {
        self.apply(id, Mutation::Rename { title: title.into() });
    }

    pub fn set_template(&mut self, id: &str, template_id: Option<String>) {
        self.apply(id, Mutation::SetTemplate { template_id });
    }

    pub fn set_active_section(&mut self, id: &str, section_id: impl Into<String>) {
        self.apply(
            id,
            Mutation::SetActiveSection {
                section_id: section_id.into(),
            },
        );
    }

    pub fn update_basic(&mut self, id: &str, basic: BasicInfo) {
        self.apply(id, Mutation::UpdateBasic(basic));
    }

    pub fn upsert_education(&mut self, id: &str, entry: Education) {
        self.apply(id, Mutation::UpsertEducation(entry));
    }

    pub fn remove_education(&mut self, id: &str, entry_id: impl Into<String>) {
        self.apply(
            id,
            Mutation::RemoveEducation {
                id: entry_id.into(),
            },
        );
    }

    pub fn upsert_experience(&mut self, id: &str, entry: Experience) {
        self.apply(id, Mutation::UpsertExperience(entry));
    }

    pub fn remove_experience(&mut self, id: &str, entry_id: impl Into<String>) {
        self.apply(
            id,
            Mutation::RemoveExperience {
                id: entry_id.into(),
            },
        );
    }

    pub fn upsert_project(&mut self, id: &str, entry: Project) {
        self.apply(id, Mutation::UpsertProject(entry));
    }

    pub fn remove_project(&mut self, id: &str, entry_id: impl Into<String>) {
        self.apply(
            id,
            Mutation::RemoveProject {
                id: entry_id.into(),
            },
        );
    }

    pub fn set_skill_content(&mut self, id: &str, content: impl Into<String>) {
        self.apply(
            id,
            Mutation::SetSkillContent {
                content: content.into(),
            },
        );
    }

    /// Create a custom section (descriptor + data entry together) and
    /// return its id. `None` when the document id is unknown.
    pub fn add_custom_section(
        &mut self,
        id: &str,
        title: impl Into<String>,
        icon: impl Into<String>,
    ) -> Option<String> {
        let resume = self.resumes.get_mut(id)?;
        let previous = resume.clone();
        let section_id = resume.add_custom_section(title.into(), icon.into());
        let snapshot = resume.clone();
        self.schedule(MirrorTask::WriteThrough {
            resume: Box::new(snapshot),
            previous: Some(Box::new(previous)),
        });
        Some(section_id)
    }

    pub fn remove_custom_section(&mut self, id: &str, section_id: impl Into<String>) {
        self.apply(
            id,
            Mutation::RemoveCustomSection {
                section_id: section_id.into(),
            },
        );
    }

    pub fn upsert_custom_item(&mut self, id: &str, section_id: impl Into<String>, item: CustomItem) {
        self.apply(
            id,
            Mutation::UpsertCustomItem {
                section_id: section_id.into(),
                item,
            },
        );
    }

    pub fn remove_custom_item(
        &mut self,
        id: &str,
        section_id: impl Into<String>,
        item_id: impl Into<String>,
    ) {
        self.apply(
            id,
            Mutation::RemoveCustomItem {
                section_id: section_id.into(),
                id: item_id.into(),
            },
        );
    }

    /// Flip one entity's visibility. Accepts rapid repeated calls
    /// unconditionally; coalescing duplicate input events is the
    /// caller's concern (see `coalesce`).
    pub fn toggle_visibility(&mut self, id: &str, target: VisibilityTarget) {
        self.apply(id, Mutation::ToggleVisibility(target));
    }

    pub fn reorder_sections(&mut self, id: &str, new_order: Vec<MenuSection>) {
        self.apply(id, Mutation::ReorderSections(new_order));
    }

    pub fn replace_sections(&mut self, id: &str, sections: Vec<MenuSection>) {
        self.apply(id, Mutation::ReplaceSections(sections));
    }

    pub fn update_global_settings(&mut self, id: &str, settings: GlobalSettings) {
        self.apply(id, Mutation::UpdateGlobalSettings(settings));
    }

    // ==================== Internals ====================

    /// Run one mutation against a document and schedule its mirror
    /// write. The previous snapshot rides along for title-change
    /// detection.
    fn mutate<F>(&mut self, id: &str, f: F)
    where
        F: FnOnce(&mut Resume),
    {
        let Some(resume) = self.resumes.get_mut(id) else {
            debug!(id, "mutation on unknown document id, ignoring");
            return;
        };
        let previous = resume.clone();
        f(resume);
        let snapshot = resume.clone();
        self.schedule(MirrorTask::WriteThrough {
            resume: Box::new(snapshot),
            previous: Some(Box::new(previous)),
        });
    }

    /// Queue a mirror task, fire-and-forget. A closed outbox means
    /// the worker is gone; the task is dropped, which is exactly the
    /// "mirror disabled" behavior.
    fn schedule(&self, task: MirrorTask) {
        if let Some(outbox) = &self.outbox {
            if outbox.send(task).is_err() {
                debug!("mirror worker gone, dropping task");
            }
        }
    }
}

impl Default for ResumeStore {
    fn default() -> Self {
        Self::new()
    }
}

/// First free default title among the live documents. Titles double
/// as mirror file names, so a title still in use must never be handed
/// out again.
fn default_title(resumes: &HashMap<String, Resume>) -> String {
    let taken = |candidate: &str| resumes.values().any(|r| r.title == candidate);

    if !taken("Untitled Resume") {
        return "Untitled Resume".to_string();
    }
    let mut n = 2;
    loop {
        let candidate = format!("Untitled Resume {}", n);
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
