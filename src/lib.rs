pub mod answers;
pub mod config;
pub mod environment;
pub mod forge;
pub mod git;
pub mod package;
pub mod paths;
pub mod prompt;
pub mod runner;
pub mod scaffold;
pub mod wizard;

// Re-export commonly used types
pub use answers::SetupAnswers;
pub use config::WizardConfig;
pub use environment::Environment;
pub use runner::{CommandRunner, ScriptedRunner, SystemRunner};
pub use wizard::{RunReport, Step, StepOutcome, Wizard};
