//! The choices collected from the operator for one run.

use std::fmt;

/// UI layer the new project starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiFramework {
    /// Full component framework (Vuetify)
    Vuetify,
    /// Utility CSS only (Tailwind)
    Tailwind,
    None,
}

impl UiFramework {
    pub const ALL: [UiFramework; 3] = [
        UiFramework::Vuetify,
        UiFramework::Tailwind,
        UiFramework::None,
    ];

    pub fn label(self) -> &'static str {
        match self {
            UiFramework::Vuetify => "Vuetify (full component framework)",
            UiFramework::Tailwind => "Tailwind CSS (utility classes only)",
            UiFramework::None => "None",
        }
    }
}

impl fmt::Display for UiFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UiFramework::Vuetify => "vuetify",
            UiFramework::Tailwind => "tailwind",
            UiFramework::None => "none",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum License {
    Mit,
    Apache2,
    Gpl3,
    Bsd3,
    Isc,
    Unlicense,
}

impl License {
    pub const ALL: [License; 6] = [
        License::Mit,
        License::Apache2,
        License::Gpl3,
        License::Bsd3,
        License::Isc,
        License::Unlicense,
    ];

    /// SPDX identifier written to `package.json`.
    pub fn spdx(self) -> &'static str {
        match self {
            License::Mit => "MIT",
            License::Apache2 => "Apache-2.0",
            License::Gpl3 => "GPL-3.0-only",
            License::Bsd3 => "BSD-3-Clause",
            License::Isc => "ISC",
            License::Unlicense => "Unlicense",
        }
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spdx())
    }
}

/// Who owns the remote repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerScope {
    /// The authenticated user's account
    Personal,
    /// The configured organization
    Organization,
    /// Any other organization, by name
    Custom(String),
}

/// Everything the pipeline needs to know. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupAnswers {
    pub project_name: String,
    pub ui_framework: UiFramework,
    pub public: bool,
    pub license: License,
    pub owner: OwnerScope,
    pub auto_commit: bool,
}

impl SetupAnswers {
    pub fn visibility(&self) -> &'static str {
        if self.public {
            "public"
        } else {
            "private"
        }
    }
}

/// Check `name` against npm package naming rules.
///
/// The project name doubles as the directory name and the `package.json`
/// name, so it has to satisfy both.
pub fn validate_project_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Project name cannot be empty".to_string());
    }
    if name.len() > 214 {
        return Err("Project name must be at most 214 characters".to_string());
    }
    if name.starts_with('.') || name.starts_with('_') {
        return Err("Project name cannot start with '.' or '_'".to_string());
    }
    if name.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("Project name must be lowercase".to_string());
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || "-._~".contains(*c)))
    {
        return Err(format!("Project name cannot contain '{bad}'"));
    }
    Ok(())
}

/// Check a custom organization name (GitHub login rules).
pub fn validate_org_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Organization name cannot be empty".to_string());
    }
    if name.starts_with('-') || name.ends_with('-') {
        return Err("Organization name cannot start or end with '-'".to_string());
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err("Organization name may only contain letters, digits and '-'".to_string());
    }
    Ok(())
}
