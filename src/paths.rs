//! Filesystem layout: where kickoff keeps its own settings, and which
//! files inside a freshly cloned template the pipeline reads or writes.
//!
//! # User-Level Paths (~/.kickoff/)
//!
//! ```text
//! ~/.kickoff/
//! └── config.toml              # Wizard defaults (template, org, editor...)
//! ```
//!
//! # Project-Level Paths (<project>/)
//!
//! ```text
//! <project>/
//! ├── nuxt.config.ts           # Framework configuration
//! ├── package.json             # Project manifest
//! ├── tailwind.config.js       # Utility-CSS configuration
//! ├── postcss.config.js        # Post-processor configuration
//! ├── app.vue                  # Entry view
//! └── assets/css/main.css      # CSS entry file
//! ```

use std::path::{Path, PathBuf};

// =============================================================================
// User Level (~/.kickoff/)
// =============================================================================

/// User's kickoff home directory: `~/.kickoff/`
pub fn kickoff_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".kickoff")
}

/// Wizard config file: `~/.kickoff/config.toml`
pub fn config_path() -> PathBuf {
    kickoff_home().join("config.toml")
}

// =============================================================================
// Project Level (relative to the cloned project root)
// =============================================================================

pub const NUXT_CONFIG: &str = "nuxt.config.ts";
pub const PACKAGE_JSON: &str = "package.json";
pub const TAILWIND_CONFIG: &str = "tailwind.config.js";
pub const POSTCSS_CONFIG: &str = "postcss.config.js";
pub const APP_VUE: &str = "app.vue";
pub const CSS_ENTRY: &str = "assets/css/main.css";

/// The way the framework config refers to [`CSS_ENTRY`].
pub const CSS_ENTRY_ALIAS: &str = "~/assets/css/main.css";

/// Files a usable template must ship with.
pub const ESSENTIAL_FILES: [&str; 4] = [NUXT_CONFIG, PACKAGE_JSON, TAILWIND_CONFIG, APP_VUE];

/// Project paths, rooted at the cloned project directory.
pub mod project {
    use super::*;

    pub fn nuxt_config(root: &Path) -> PathBuf {
        root.join(NUXT_CONFIG)
    }

    pub fn package_json(root: &Path) -> PathBuf {
        root.join(PACKAGE_JSON)
    }

    pub fn tailwind_config(root: &Path) -> PathBuf {
        root.join(TAILWIND_CONFIG)
    }

    pub fn postcss_config(root: &Path) -> PathBuf {
        root.join(POSTCSS_CONFIG)
    }

    /// `{root}/assets/css/main.css`
    pub fn css_entry(root: &Path) -> PathBuf {
        root.join(CSS_ENTRY)
    }

    /// Version-control metadata inherited from the template: `{root}/.git`
    pub fn git_dir(root: &Path) -> PathBuf {
        root.join(".git")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path() {
        let path = config_path();
        assert!(path.to_string_lossy().ends_with("config.toml"));
        assert!(path.to_string_lossy().contains(".kickoff"));
    }

    #[test]
    fn test_css_entry_alias_points_at_entry() {
        assert!(CSS_ENTRY_ALIAS.ends_with(CSS_ENTRY));
        let root = Path::new("/work/demo");
        assert_eq!(
            project::css_entry(root),
            PathBuf::from("/work/demo/assets/css/main.css")
        );
    }
}
