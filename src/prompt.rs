//! Answer collection.
//!
//! The terminal wizard uses `dialoguer`; anything else that can produce a
//! [`SetupAnswers`] (tests, a pre-filled record) plugs in through
//! [`AnswerSource`].

use anyhow::{bail, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use crate::answers::{
    validate_org_name, validate_project_name, License, OwnerScope, SetupAnswers, UiFramework,
};
use crate::config::WizardConfig;

pub trait AnswerSource {
    /// Produce a complete set of answers, or fail (which ends the run).
    fn collect(&self, config: &WizardConfig) -> Result<SetupAnswers>;
}

/// Pre-filled answers are their own source.
impl AnswerSource for SetupAnswers {
    fn collect(&self, _config: &WizardConfig) -> Result<SetupAnswers> {
        Ok(self.clone())
    }
}

/// Interactive questions on the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl AnswerSource for TerminalPrompt {
    fn collect(&self, config: &WizardConfig) -> Result<SetupAnswers> {
        if !atty::is(atty::Stream::Stdin) {
            bail!("kickoff asks questions interactively, but stdin is not a terminal");
        }

        let theme = ColorfulTheme::default();

        let project_name: String = Input::with_theme(&theme)
            .with_prompt("Project name")
            .validate_with(|input: &String| validate_project_name(input.trim()))
            .interact_text()?;

        let frameworks: Vec<&str> = UiFramework::ALL.iter().map(|f| f.label()).collect();
        let ui_framework = UiFramework::ALL[Select::with_theme(&theme)
            .with_prompt("UI framework")
            .items(&frameworks)
            .default(0)
            .interact()?];

        let public = Confirm::with_theme(&theme)
            .with_prompt("Make the repository public?")
            .default(false)
            .interact()?;

        let licenses: Vec<&str> = License::ALL.iter().map(|l| l.spdx()).collect();
        let license = License::ALL[Select::with_theme(&theme)
            .with_prompt("License")
            .items(&licenses)
            .default(0)
            .interact()?];

        let scopes = [
            "Personal account".to_string(),
            format!("Organization ({})", config.organization),
            "Other organization".to_string(),
        ];
        let owner = match Select::with_theme(&theme)
            .with_prompt("Create the repository under")
            .items(&scopes)
            .default(0)
            .interact()?
        {
            0 => OwnerScope::Personal,
            1 => OwnerScope::Organization,
            _ => {
                let org: String = Input::with_theme(&theme)
                    .with_prompt("Organization name")
                    .validate_with(|input: &String| validate_org_name(input.trim()))
                    .interact_text()?;
                OwnerScope::Custom(org.trim().to_string())
            }
        };

        let auto_commit = Confirm::with_theme(&theme)
            .with_prompt("Commit and push the initial state?")
            .default(true)
            .interact()?;

        Ok(SetupAnswers {
            project_name: project_name.trim().to_string(),
            ui_framework,
            public,
            license,
            owner,
            auto_commit,
        })
    }
}
