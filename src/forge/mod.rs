//! Remote repository hosting.
//!
//! "Do X": Check, clone and create repositories on GitHub.
//!
//! All `gh` CLI interaction lives in `github.rs`; this file owns the naming
//! rules for where a new repository goes.

pub mod github;

use crate::answers::OwnerScope;

/// Fully-qualified path for a new repository.
///
/// Personal repositories use the bare name so `gh` resolves the owner from
/// the authenticated account.
pub fn qualified_repo_path(project_name: &str, owner: &OwnerScope, organization: &str) -> String {
    match owner {
        OwnerScope::Personal => project_name.to_string(),
        OwnerScope::Organization => format!("{}/{}", organization, project_name),
        OwnerScope::Custom(org) => format!("{}/{}", org, project_name),
    }
}

/// Human description of where the repository is created.
pub fn describe_owner(owner: &OwnerScope, organization: &str) -> String {
    match owner {
        OwnerScope::Personal => "your personal account".to_string(),
        OwnerScope::Organization => format!("organization {}", organization),
        OwnerScope::Custom(org) => format!("custom organization {}", org),
    }
}
