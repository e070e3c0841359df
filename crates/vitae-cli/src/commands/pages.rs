//! Pagination command handler

use anyhow::Result;

use vitae_core::{page_break_offsets, page_count, ResumeStore};

use crate::commands::resolve_id;
use crate::output::{Output, OutputFormat};

/// Compute the page count and break offsets for a measured content
/// height, using the referenced resume's page padding (or the active
/// resume's, or the default when neither is given).
pub fn show(
    store: &ResumeStore,
    reference: Option<String>,
    height: f64,
    output: &Output,
) -> Result<()> {
    let padding = match reference {
        Some(reference) => {
            let id = resolve_id(store, &reference)?;
            store.get(&id).unwrap().global_settings.page_padding
        }
        None => store
            .active()
            .map(|r| r.global_settings.page_padding)
            .unwrap_or_else(|| vitae_core::GlobalSettings::default().page_padding),
    };

    let pages = page_count(height, padding);
    let offsets = page_break_offsets(height, padding);

    match output.format {
        OutputFormat::Human => {
            println!("Content height: {:.0}px  (padding {:.0}px)", height, padding);
            println!("Pages:          {}", pages);
            if offsets.is_empty() {
                println!("Breaks:         none");
            } else {
                println!("Breaks:");
                for (i, offset) in offsets.iter().enumerate() {
                    println!("  page {} ends at {:.1}px", i + 1, offset);
                }
            }
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "contentHeightPx": height,
                    "pagePaddingPx": padding,
                    "pageCount": pages,
                    "breakOffsetsPx": offsets
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", pages);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_without_resume_uses_default_padding() {
        let store = ResumeStore::new();
        let output = Output::new(OutputFormat::Quiet);
        show(&store, None, 5000.0, &output).unwrap();
    }

    #[test]
    fn test_show_unknown_resume_fails() {
        let store = ResumeStore::new();
        let output = Output::new(OutputFormat::Quiet);
        assert!(show(&store, Some("nope".into()), 5000.0, &output).is_err());
    }
}
