//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use vitae_core::Resume;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Check if output is in JSON mode
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a single resume
    pub fn print_resume(&self, resume: &Resume) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:       {}", resume.id);
                println!("Title:    {}", resume.title);
                println!(
                    "Template: {}",
                    resume.template_id.as_deref().unwrap_or("(default)")
                );
                println!("Created:  {}", resume.created_at.format("%Y-%m-%d %H:%M"));
                println!("Updated:  {}", resume.updated_at.format("%Y-%m-%d %H:%M"));
                println!();
                println!(
                    "Education: {}  Experience: {}  Projects: {}",
                    resume.education.len(),
                    resume.experience.len(),
                    resume.projects.len()
                );

                let sections = sections_in_order(resume);
                println!();
                println!("── Sections ({}) ──", sections.len());
                for section in sections {
                    let state = if section.enabled { " " } else { "✗" };
                    println!("{} {:2}  {} ({})", state, section.order, section.title, section.id);
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(resume).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", resume.id);
            }
        }
    }

    /// Print a list of resumes, marking the active one
    pub fn print_resumes(&self, resumes: &[&Resume], active_id: Option<&str>) {
        match self.format {
            OutputFormat::Human => {
                if resumes.is_empty() {
                    println!("No resumes found.");
                    return;
                }
                for resume in resumes {
                    let marker = if active_id == Some(resume.id.as_str()) {
                        "*"
                    } else {
                        " "
                    };
                    println!(
                        "{} {} | {} | {}",
                        marker,
                        &resume.id[..8.min(resume.id.len())],
                        truncate(&resume.title, 40),
                        resume.updated_at.format("%Y-%m-%d %H:%M")
                    );
                }
                println!("\n{} resume(s)", resumes.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(resumes).unwrap());
            }
            OutputFormat::Quiet => {
                for resume in resumes {
                    println!("{}", resume.id);
                }
            }
        }
    }

    /// Print the section list of a resume (disabled ones included)
    pub fn print_sections(&self, resume: &Resume) {
        let sections = sections_in_order(resume);
        match self.format {
            OutputFormat::Human => {
                println!("Sections for: {}", resume.title);
                println!();
                for section in sections {
                    let state = if section.enabled { "on " } else { "off" };
                    println!("{:2}  [{}]  {} ({})", section.order, state, section.title, section.id);
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&sections).unwrap());
            }
            OutputFormat::Quiet => {
                for section in sections {
                    println!("{}", section.id);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json | OutputFormat::Quiet => {}
        }
    }
}

/// All sections of a resume sorted by their assigned order
fn sections_in_order(resume: &Resume) -> Vec<&vitae_core::MenuSection> {
    let mut sections: Vec<_> = resume.menu_sections.iter().collect();
    sections.sort_by_key(|s| s.order);
    sections
}

/// Truncate a string to a maximum display length
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
