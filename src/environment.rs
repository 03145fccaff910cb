//! Environment probe: is the local tooling good enough to scaffold a project?
//!
//! Advisory only. Every problem becomes a [`Finding`] with a remediation
//! hint; nothing here stops the wizard.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::WizardConfig;
use crate::runner::CommandRunner;

/// Tools the wizard shells out to, with the flag that prints their version.
const PROBED_TOOLS: [(&str, &str); 3] = [
    ("node", "--version"),
    ("git", "--version"),
    ("gh", "--version"),
];

#[derive(Debug)]
pub struct Environment {
    pub os: String,
    pub arch: String,
    pub tools: BTreeMap<String, ToolInfo>,
    /// `Some(true)` when `gh auth status` succeeded; `None` when not checked
    pub gh_authenticated: Option<bool>,
}

#[derive(Debug, Default)]
pub struct ToolInfo {
    pub available: bool,
    pub version: Option<String>,
    pub path: Option<String>,
    /// The version query itself failed (tool present but misbehaving)
    pub error: Option<String>,
}

/// Something the operator should fix by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    Missing {
        tool: String,
        remediation: String,
    },
    Outdated {
        tool: String,
        found: String,
        required: String,
        remediation: String,
    },
    NotAuthenticated {
        remediation: String,
    },
    CheckFailed {
        tool: String,
        error: String,
    },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::Missing { tool, remediation } => {
                write!(f, "{tool} not found. {remediation}")
            }
            Finding::Outdated {
                tool,
                found,
                required,
                remediation,
            } => write!(f, "{tool} {found} is too old (need {required}+). {remediation}"),
            Finding::NotAuthenticated { remediation } => {
                write!(f, "GitHub CLI is not authenticated. {remediation}")
            }
            Finding::CheckFailed { tool, error } => {
                write!(f, "Could not check {tool}: {error}")
            }
        }
    }
}

/// `PATH` lookup via `which`.
pub fn locate_on_path(tool: &str) -> Option<PathBuf> {
    which::which(tool).ok()
}

impl Environment {
    /// Detect tools found by `locate` (normally [`locate_on_path`]).
    pub fn detect_with<L>(runner: &dyn CommandRunner, cwd: &Path, locate: L) -> Self
    where
        L: Fn(&str) -> Option<PathBuf>,
    {
        let mut env = Environment {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            tools: BTreeMap::new(),
            gh_authenticated: None,
        };

        for (tool_name, version_flag) in PROBED_TOOLS {
            let mut tool_info = ToolInfo::default();

            if let Some(path) = locate(tool_name) {
                tool_info.available = true;
                tool_info.path = Some(path.display().to_string());

                match runner.run(tool_name, &[version_flag], cwd) {
                    Ok(output) if output.success => {
                        let first = output.stdout.lines().next().unwrap_or("").trim();
                        if !first.is_empty() {
                            tool_info.version = Some(first.to_string());
                        }
                    }
                    Ok(output) => {
                        tool_info.error = Some(format!(
                            "`{tool_name} {version_flag}` exited with an error: {}",
                            output.error_line()
                        ));
                    }
                    Err(e) => tool_info.error = Some(format!("{:#}", e)),
                }
            }

            env.tools.insert(tool_name.to_string(), tool_info);
        }

        if env.is_usable("gh") {
            env.gh_authenticated = Some(
                runner
                    .run("gh", &["auth", "status"], cwd)
                    .map(|o| o.success)
                    .unwrap_or(false),
            );
        }

        env
    }

    fn is_usable(&self, tool: &str) -> bool {
        self.tools
            .get(tool)
            .is_some_and(|info| info.available && info.error.is_none())
    }

    /// Compare what was detected against what the wizard needs.
    pub fn findings(&self, config: &WizardConfig) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (tool_name, _) in PROBED_TOOLS {
            let Some(info) = self.tools.get(tool_name) else {
                continue;
            };

            if !info.available {
                findings.push(Finding::Missing {
                    tool: tool_name.to_string(),
                    remediation: install_hint(tool_name, config.min_node_major),
                });
                continue;
            }

            if let Some(error) = &info.error {
                findings.push(Finding::CheckFailed {
                    tool: tool_name.to_string(),
                    error: error.clone(),
                });
                continue;
            }

            if tool_name == "node" {
                if let Some(finding) = check_node_version(info, config.min_node_major) {
                    findings.push(finding);
                }
            }
        }

        if self.gh_authenticated == Some(false) {
            findings.push(Finding::NotAuthenticated {
                remediation: "Run `gh auth login`.".to_string(),
            });
        }

        findings
    }
}

fn check_node_version(info: &ToolInfo, min_major: u64) -> Option<Finding> {
    let raw = info.version.as_deref().unwrap_or("");
    match parse_node_version(raw) {
        Some(version) if version.major >= min_major => None,
        Some(version) => Some(Finding::Outdated {
            tool: "node".to_string(),
            found: version.to_string(),
            required: min_major.to_string(),
            remediation: format!(
                "Upgrade with `nvm install {min_major}` or from https://nodejs.org"
            ),
        }),
        None => Some(Finding::CheckFailed {
            tool: "node".to_string(),
            error: format!("unrecognized version string '{raw}'"),
        }),
    }
}

/// `v20.11.1` → `20.11.1`
pub fn parse_node_version(raw: &str) -> Option<semver::Version> {
    let trimmed = raw.trim();
    let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);
    semver::Version::parse(bare).ok()
}

fn install_hint(tool: &str, min_node_major: u64) -> String {
    match tool {
        "node" => format!(
            "Install Node.js {min_node_major}+ with `nvm install {min_node_major}` or from https://nodejs.org"
        ),
        "git" => "Install git from https://git-scm.com/downloads".to_string(),
        "gh" => {
            "Install the GitHub CLI from https://cli.github.com (e.g. `brew install gh`)".to_string()
        }
        other => format!("Install {other} and make sure it is on PATH"),
    }
}
