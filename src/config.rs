use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::paths;

/// Wizard defaults, read from `~/.kickoff/config.toml`.
///
/// Every field has a default, so a partial file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Template repository on GitHub (`owner/name`)
    pub template_repo: String,
    /// Organization offered as the "organization" ownership scope
    pub organization: String,
    /// Package manager used for install / add-dev
    pub package_manager: String,
    /// Editor launched on the new project
    pub editor: String,
    /// Message of the initial commit
    pub commit_message: String,
    /// Branch pushed by the finalizer
    pub branch: String,
    /// Minimum supported Node.js major version
    pub min_node_major: u64,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            template_repo: "kickoff-dev/nuxt-starter".to_string(),
            organization: "kickoff-dev".to_string(),
            package_manager: "npm".to_string(),
            editor: "code".to_string(),
            commit_message: "chore: initial commit from kickoff".to_string(),
            branch: "main".to_string(),
            min_node_major: 18,
        }
    }
}

impl WizardConfig {
    /// Load from the default location and apply `KICKOFF_*` overrides.
    ///
    /// A missing file means defaults. A broken file is reported and ignored
    /// so a typo in settings never blocks scaffolding.
    pub fn load() -> Self {
        let path = paths::config_path();
        let mut config = match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("⚠️  Ignoring {}: {:#}", path.display(), e);
                Self::default()
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Load from an explicit path. Missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Apply environment overrides through `lookup` (injected for tests).
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let overrides: [(&str, &mut String); 4] = [
            ("KICKOFF_TEMPLATE", &mut self.template_repo),
            ("KICKOFF_ORG", &mut self.organization),
            ("KICKOFF_EDITOR", &mut self.editor),
            ("KICKOFF_PACKAGE_MANAGER", &mut self.package_manager),
        ];

        for (key, field) in overrides {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *field = value.trim().to_string();
            }
        }
    }
}
