//! Kiln Core - Shared library for extension-project scaffolding CLIs
//!
//! This library provides the core functionality for scaffolding Maven-style
//! extension projects from template packs. It is designed to be used by CLI
//! binaries that share the same underlying generation logic but have
//! different product configurations.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Template rendering, staged-file
//!   operations, the module registry, runtime detection
//! - **Layer 2: Collaborators** - Config store, template packs, the
//!   `ProductConfig` trait for custom products
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompt flows
//!   (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use kiln_core::{staging, templates::TemplatePack};
//!
//! // Render the built-in pack into a staged file set
//! let pack = TemplatePack::embedded();
//! let mut store = staging::MemStore::new();
//! for (path, contents) in pack.project_files() {
//!     store.write(path, contents.to_vec());
//! }
//! ```

pub mod config;
pub mod product;
pub mod registry;
pub mod runtime;
pub mod staging;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{ConfigStore, JsonConfigStore};
pub use product::ProductConfig;
pub use registry::{ModuleDescriptor, ModuleRegistry, ModuleSpec};
pub use runtime::{check_runtimes, RuntimeInfo};
pub use staging::{MemStore, StagedFiles};
pub use templates::{render, TemplatePack};

#[cfg(feature = "tui")]
pub use tui::{run_add_module, run_create};

/// CLI version - used for template pack compatibility checking
/// Each binary should define its own version, but this provides a fallback
pub const DEFAULT_CLI_VERSION: &str = "0.1.0";
