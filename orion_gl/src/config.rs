/// Orion configuration

use std::path::PathBuf;

use crate::reporter::FatalPolicy;

/// Settings fixed when an [`Orion`](crate::orion::Orion) context is built
#[derive(Debug, Clone)]
pub struct OrionConfig {
    /// What a fatal error does (abort by default)
    pub fatal_policy: FatalPolicy,
    /// Directory shader files are resolved against.
    /// `None` = directory of the running executable.
    pub resource_dir: Option<PathBuf>,
    /// Name shown in lifecycle log lines
    pub app_name: String,
}

impl Default for OrionConfig {
    fn default() -> Self {
        Self {
            fatal_policy: FatalPolicy::Abort,
            resource_dir: None,
            app_name: "Orion Application".to_string(),
        }
    }
}

impl OrionConfig {
    /// Default configuration returning errors instead of aborting
    pub fn propagating() -> Self {
        Self {
            fatal_policy: FatalPolicy::Propagate,
            ..Default::default()
        }
    }
}
