//! Colored status lines for the operator.
//!
//! Logging carries the detail; these lines summarize what the run did.

use colored::Colorize;

use crate::policy::UpdateOutcome;
use crate::repo::UpdateStep;

/// Prints a step progress message.
pub fn print_step(step: &UpdateStep) {
    eprintln!("  {}...", step.to_string().dimmed());
}

pub fn format_outcome(outcome: &UpdateOutcome) -> String {
    match outcome {
        UpdateOutcome::Skipped => format!("{} update skipped", "-".yellow()),
        UpdateOutcome::Updated { repo, refspec } => format!(
            "{} updated to {} from {}",
            "✓".green(),
            refspec.cyan(),
            repo.white().bold()
        ),
        UpdateOutcome::UnknownPackager { packager } => format!(
            "{} unknown packager {}, nothing done",
            "?".yellow(),
            packager.yellow().bold()
        ),
    }
}

pub fn print_outcome(outcome: &UpdateOutcome) {
    println!("{}", format_outcome(outcome));
}

/// Prints the error and its causes to stderr.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "✗".red(), format!("{err:#}").red());
}
