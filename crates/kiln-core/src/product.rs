//! Product configuration trait for CLI binaries
//!
//! Each product binary implements this trait to define its identity,
//! defaults and post-generation instructions, while sharing the same
//! underlying scaffolding logic.

use std::path::Path;

/// Configuration trait for different CLI products
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// File name of the per-project config document (e.g. `.kiln.json`)
    fn config_file_name(&self) -> &'static str;

    /// Default Maven group id offered in prompts
    fn default_group_id(&self) -> &'static str;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path) -> Vec<String>;
}
