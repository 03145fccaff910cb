//! The setup pipeline: probe → collect → fetch → rewrite → vcs → remote → finalize.
//!
//! Every step returns a [`StepOutcome`]. Steps never exit the process or
//! decide whether the run continues; the driver here owns that policy:
//! a `Fatal` outcome stops the run with exit status 1, anything else moves
//! on to the next step.

mod fetch;
mod finalize;
mod remote;
mod rewrite;
mod vcs;

use colored::Colorize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::answers::SetupAnswers;
use crate::config::WizardConfig;
use crate::environment::{self, Environment};
use crate::forge;
use crate::prompt::AnswerSource;
use crate::runner::CommandRunner;

/// How a step ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Done,
    /// Completed with problems the operator should fix by hand
    Warned(Vec<String>),
    /// The run cannot continue
    Fatal(String),
}

impl StepOutcome {
    pub fn from_warnings(warnings: Vec<String>) -> Self {
        if warnings.is_empty() {
            StepOutcome::Done
        } else {
            StepOutcome::Warned(warnings)
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, StepOutcome::Fatal(_))
    }

    pub fn warnings(&self) -> &[String] {
        match self {
            StepOutcome::Warned(warnings) => warnings,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Probe,
    Collect,
    Fetch,
    Rewrite,
    VcsInit,
    Remote,
    Finalize,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Probe => "environment check",
            Step::Collect => "questions",
            Step::Fetch => "template fetch",
            Step::Rewrite => "configuration",
            Step::VcsInit => "git setup",
            Step::Remote => "GitHub repository",
            Step::Finalize => "finalize",
        };
        f.write_str(name)
    }
}

/// Where the new project lives.
///
/// Steps run their commands against `root` explicitly; the process working
/// directory is never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    /// Directory the wizard was started in
    pub parent: PathBuf,
    /// `parent/<name>`
    pub root: PathBuf,
    pub name: String,
}

impl ProjectContext {
    pub fn new(parent: &Path, name: &str) -> Self {
        Self {
            parent: parent.to_path_buf(),
            root: parent.join(name),
            name: name.to_string(),
        }
    }
}

/// Outcome of every step that ran, in order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub steps: Vec<(Step, StepOutcome)>,
    pub answers: Option<SetupAnswers>,
}

impl RunReport {
    pub fn outcome(&self, step: Step) -> Option<&StepOutcome> {
        self.steps.iter().find(|(s, _)| *s == step).map(|(_, o)| o)
    }

    pub fn is_fatal(&self) -> bool {
        self.steps.iter().any(|(_, o)| o.is_fatal())
    }

    /// 1 if any step was fatal, else 0 (warnings do not count).
    pub fn exit_code(&self) -> i32 {
        if self.is_fatal() {
            1
        } else {
            0
        }
    }

    /// Print and record `outcome`; returns whether the run must stop.
    fn record(&mut self, step: Step, outcome: StepOutcome) -> bool {
        match &outcome {
            StepOutcome::Done => {}
            StepOutcome::Warned(warnings) => {
                for warning in warnings {
                    println!("{}", format!("⚠️  {warning}").yellow());
                }
            }
            StepOutcome::Fatal(message) => {
                eprintln!("{}", format!("❌ {message}").red().bold());
            }
        }
        tracing::debug!(%step, ?outcome, "step finished");

        let fatal = outcome.is_fatal();
        self.steps.push((step, outcome));
        fatal
    }
}

type Locator = fn(&str) -> Option<PathBuf>;

pub struct Wizard<'a> {
    runner: &'a dyn CommandRunner,
    config: &'a WizardConfig,
    parent: PathBuf,
    locate: Locator,
}

impl<'a> Wizard<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        config: &'a WizardConfig,
        parent: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            config,
            parent: parent.into(),
            locate: environment::locate_on_path,
        }
    }

    /// Replace the `PATH` lookup used by the environment probe.
    pub fn with_locator(mut self, locate: Locator) -> Self {
        self.locate = locate;
        self
    }

    /// Run every step in order, stopping at the first fatal outcome.
    pub fn run(&self, source: &dyn AnswerSource) -> RunReport {
        let mut report = RunReport::default();

        if report.record(Step::Probe, self.probe()) {
            return report;
        }

        let answers = match source.collect(self.config) {
            Ok(answers) => answers,
            Err(e) => {
                let message = format!("Could not collect answers: {e:#}");
                report.record(Step::Collect, StepOutcome::Fatal(message));
                return report;
            }
        };
        report.record(Step::Collect, StepOutcome::Done);
        print_answers(&answers, self.config);

        let ctx = ProjectContext::new(&self.parent, &answers.project_name);
        report.answers = Some(answers.clone());

        if report.record(Step::Fetch, fetch::run(self.runner, self.config, &ctx)) {
            return report;
        }
        report.record(
            Step::Rewrite,
            rewrite::run(self.runner, self.config, &answers, &ctx),
        );
        report.record(Step::VcsInit, vcs::run(self.runner, &ctx));
        report.record(
            Step::Remote,
            remote::run(self.runner, self.config, &answers, &ctx),
        );
        report.record(
            Step::Finalize,
            finalize::run(self.runner, self.config, &answers, &ctx),
        );

        print_next_steps(&report, &answers, self.config, &ctx);
        report
    }

    /// Advisory tooling check; silent when everything is in place.
    fn probe(&self) -> StepOutcome {
        let env = Environment::detect_with(self.runner, &self.parent, self.locate);
        StepOutcome::from_warnings(
            env.findings(self.config)
                .iter()
                .map(ToString::to_string)
                .collect(),
        )
    }
}

fn print_answers(answers: &SetupAnswers, config: &WizardConfig) {
    println!("\n{}", "📋 Setup".bold());
    println!("   Project:    {}", answers.project_name);
    println!("   UI:         {}", answers.ui_framework.label());
    println!("   License:    {}", answers.license);
    println!(
        "   Repository: {} ({})",
        forge::qualified_repo_path(&answers.project_name, &answers.owner, &config.organization),
        answers.visibility()
    );
    println!("   Auto-commit: {}", if answers.auto_commit { "yes" } else { "no" });
    println!();
}

fn print_next_steps(
    report: &RunReport,
    answers: &SetupAnswers,
    config: &WizardConfig,
    ctx: &ProjectContext,
) {
    println!("\n{}", "🚀 Project ready".green().bold());
    println!("   Path: {}", ctx.root.display());
    if report.outcome(Step::Remote) == Some(&StepOutcome::Done) {
        println!(
            "   Repository: {}",
            forge::qualified_repo_path(&answers.project_name, &answers.owner, &config.organization)
        );
    }

    let warnings: usize = report.steps.iter().map(|(_, o)| o.warnings().len()).sum();
    if warnings > 0 {
        println!("   {} step warning(s) above need manual follow-up", warnings);
    }

    println!("\n   Next: cd {} && {} run dev", ctx.name, config.package_manager);
}
