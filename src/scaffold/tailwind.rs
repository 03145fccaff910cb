//! Tailwind CSS setup for projects that dropped Vuetify.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::nuxt_config::NuxtConfig;
use crate::package;
use crate::paths;
use crate::runner::CommandRunner;

pub const DEV_PACKAGES: [&str; 3] = ["tailwindcss", "postcss", "autoprefixer"];

pub const DEFAULT_TAILWIND_CONFIG: &str = r#"/** @type {import('tailwindcss').Config} */
export default {
  content: [
    './components/**/*.{js,vue,ts}',
    './layouts/**/*.vue',
    './pages/**/*.vue',
    './plugins/**/*.{js,ts}',
    './app.vue',
    './error.vue',
  ],
  theme: {
    extend: {},
  },
  plugins: [],
}
"#;

pub const DEFAULT_POSTCSS_CONFIG: &str = r#"export default {
  plugins: {
    tailwindcss: {},
    autoprefixer: {},
  },
}
"#;

pub const DEFAULT_CSS_ENTRY: &str =
    "@tailwind base;\n@tailwind components;\n@tailwind utilities;\n";

/// What the setup did to each file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TailwindReport {
    pub cleaned_config: bool,
    pub created_config: bool,
    pub created_postcss: bool,
    pub created_css_entry: bool,
    pub injected_stylesheet: bool,
}

/// Install Tailwind and wire it into the project at `root`.
///
/// A failed install stops here: the file steps assume the toolchain exists.
pub fn setup(
    runner: &dyn CommandRunner,
    package_manager: &str,
    root: &Path,
) -> Result<TailwindReport> {
    let mut report = TailwindReport::default();

    println!("📦 Installing {}...", DEV_PACKAGES.join(", "));
    package::add_dev(runner, package_manager, &DEV_PACKAGES, root)?;

    let tailwind_path = paths::project::tailwind_config(root);
    if tailwind_path.exists() {
        let original = fs::read_to_string(&tailwind_path)
            .with_context(|| format!("Failed to read {}", paths::TAILWIND_CONFIG))?;
        let cleaned = strip_references(&original, "vuetify");
        if cleaned != original {
            fs::write(&tailwind_path, &cleaned)
                .with_context(|| format!("Failed to write {}", paths::TAILWIND_CONFIG))?;
            report.cleaned_config = true;
        }
    } else {
        fs::write(&tailwind_path, DEFAULT_TAILWIND_CONFIG)
            .with_context(|| format!("Failed to write {}", paths::TAILWIND_CONFIG))?;
        report.created_config = true;
    }

    let postcss_path = paths::project::postcss_config(root);
    if !postcss_path.exists() {
        fs::write(&postcss_path, DEFAULT_POSTCSS_CONFIG)
            .with_context(|| format!("Failed to write {}", paths::POSTCSS_CONFIG))?;
        report.created_postcss = true;
    }

    // file and directory are checked separately; either may exist without the other
    let css_path = paths::project::css_entry(root);
    if !css_path.exists() {
        if let Some(dir) = css_path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create {}", dir.display()))?;
            }
        }
        fs::write(&css_path, DEFAULT_CSS_ENTRY)
            .with_context(|| format!("Failed to write {}", paths::CSS_ENTRY))?;
        report.created_css_entry = true;
    }

    let nuxt_path = paths::project::nuxt_config(root);
    let mut nuxt = NuxtConfig::load(&nuxt_path)?;
    if nuxt.inject_stylesheet(paths::CSS_ENTRY_ALIAS)? {
        nuxt.save(&nuxt_path)?;
        report.injected_stylesheet = true;
    }

    Ok(report)
}

/// Drop every line mentioning `needle` (case-insensitive), then collapse
/// runs of blank lines to one.
pub fn strip_references(text: &str, needle: &str) -> String {
    let needle = needle.to_lowercase();
    let mut out = String::with_capacity(text.len());
    let mut previous_blank = false;

    for line in text.lines() {
        if line.to_lowercase().contains(&needle) {
            continue;
        }
        let blank = line.trim().is_empty();
        if blank && previous_blank {
            continue;
        }
        previous_blank = blank;
        out.push_str(line);
        out.push('\n');
    }

    if !text.ends_with('\n') && out.ends_with('\n') {
        out.pop();
    }
    out
}
