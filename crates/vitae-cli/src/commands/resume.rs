//! Resume command handlers

use anyhow::Result;

use vitae_core::ResumeStore;

use crate::commands::resolve_id;
use crate::output::Output;

/// Create a new resume
pub fn create(
    store: &mut ResumeStore,
    title: Option<String>,
    template: Option<String>,
    output: &Output,
) -> Result<()> {
    let id = store.create(template);
    if let Some(title) = title {
        store.rename(&id, title);
    }

    let resume = store.get(&id).unwrap();
    output.success(&format!("Created resume: {}", resume.title));
    output.print_resume(resume);
    Ok(())
}

/// List all resumes
pub fn list(store: &ResumeStore, output: &Output) -> Result<()> {
    let mut resumes: Vec<_> = store.resumes().collect();
    resumes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    output.print_resumes(&resumes, store.active_id());
    Ok(())
}

/// Show a single resume
pub fn show(store: &ResumeStore, reference: String, output: &Output) -> Result<()> {
    let id = resolve_id(store, &reference)?;
    output.print_resume(store.get(&id).unwrap());
    Ok(())
}

/// Rename a resume (also renames its mirrored file)
pub fn rename(
    store: &mut ResumeStore,
    reference: String,
    title: String,
    output: &Output,
) -> Result<()> {
    let id = resolve_id(store, &reference)?;
    store.rename(&id, title.clone());
    output.success(&format!("Renamed to: {}", title));
    Ok(())
}

/// Duplicate a resume
pub fn duplicate(store: &mut ResumeStore, reference: String, output: &Output) -> Result<()> {
    let id = resolve_id(store, &reference)?;
    // resolve_id guarantees the source exists
    let copy_id = store.duplicate(&id).unwrap();

    let copy = store.get(&copy_id).unwrap();
    output.success(&format!("Created copy: {}", copy.title));
    output.print_resume(copy);
    Ok(())
}

/// Delete a resume (also removes its mirrored file)
pub fn delete(store: &mut ResumeStore, reference: String, output: &Output) -> Result<()> {
    let id = resolve_id(store, &reference)?;
    let title = store.get(&id).unwrap().title.clone();
    store.delete(&id);
    output.success(&format!("Deleted: {}", title));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    #[test]
    fn test_create_with_title() {
        let mut store = ResumeStore::new();
        create(&mut store, Some("Platform Engineer".into()), None, &quiet()).unwrap();

        assert_eq!(store.len(), 1);
        let resume = store.resumes().next().unwrap();
        assert_eq!(resume.title, "Platform Engineer");
    }

    #[test]
    fn test_delete_by_title() {
        let mut store = ResumeStore::new();
        let id = store.create(None);
        store.rename(&id, "Doomed");

        delete(&mut store, "Doomed".into(), &quiet()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_duplicate_creates_copy() {
        let mut store = ResumeStore::new();
        let id = store.create(None);
        store.rename(&id, "Original");

        duplicate(&mut store, "Original".into(), &quiet()).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.resumes().any(|r| r.title == "Original (Copy)"));
    }
}
