//! Vitae Core Library
//!
//! This crate provides the core functionality for Vitae, a local-first
//! resume builder: an in-memory document store, a best-effort directory
//! mirror, and the layout math behind the paged preview.
//!
//! # Architecture
//!
//! - **Store**: In-memory map of resume documents plus the active
//!   pointer; every mutation goes through a typed command
//! - **Mirror**: Fire-and-forget outbox that keeps `{title}.json`
//!   copies in a user-granted directory, never blocking a mutation
//! - **Pagination**: Pure A4 page-break math, recomputed behind a
//!   coalescing window as measurements stream in
//!
//! # Quick Start
//!
//! ```text
//! let mut store = ResumeStore::new();
//!
//! // Create a resume
//! let id = store.create("classic");
//!
//! // Mutate it
//! store.rename(&id, "Backend Engineer");
//! store.set_skill_content(&id, "<ul><li>Rust</li></ul>");
//!
//! // Read it back
//! let resume = store.get(&id).unwrap();
//! ```
//!
//! # Modules
//!
//! - `store`: Document store (main entry point)
//! - `models`: Resume data structures
//! - `commands`: Typed mutation set applied through the store
//! - `sections`: Section ordering rules
//! - `mirror`: Directory mirror (outbox worker + filesystem access)
//! - `pagination`: Page-break computation
//! - `coalesce`: Trailing-edge debounce for bursty event sources
//! - `config`: Application configuration

pub mod coalesce;
pub mod commands;
pub mod config;
pub mod ids;
pub mod mirror;
pub mod models;
pub mod pagination;
pub mod sections;
pub mod store;

pub use commands::Mutation;
pub use config::Config;
pub use models::{
    BasicInfo, CustomItem, Education, Experience, GlobalSettings, MenuSection, Project, Resume,
    VisibilityTarget,
};
pub use mirror::{DirectoryAccess, FsDirectory, MirrorError, MirrorTask};
pub use pagination::{page_break_offsets, page_count, page_height_px, Measurement};
pub use sections::BASIC_SECTION;
pub use store::ResumeStore;
