use colored::Colorize;

use crate::core::records::Report;

/// Shows the outcome of a registry operation to the user.
pub trait OutcomeReporter {
    fn report(&self, report: &Report);
}

/// A concrete implementation of `OutcomeReporter` that prints to the console.
///
/// This is the reporter used by every CLI command.
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    /// Picks the status icon for a report.
    ///
    /// ✓: the operation changed storage or answered the query.
    /// ⚠️: a uniqueness rule or a missing id stopped the operation.
    /// ✗: an argument had the wrong kind.
    fn status_icon(&self, report: &Report) -> String {
        match report {
            Report::Invalid(_) => "✗".red().bold().to_string(),
            Report::NotFound { .. } => "⚠️ ".yellow().to_string(),
            r if r.is_conflict() => "⚠️ ".yellow().to_string(),
            _ => "✓".green().bold().to_string(),
        }
    }

    /// Formats a report. Record displays and listings are printed as plain
    /// blocks; everything else becomes one line with a status icon.
    pub fn format_report(&self, report: &Report) -> String {
        match report {
            Report::Found(_) | Report::Listed { .. } => report.to_string(),
            Report::Invalid(_) => {
                format!("{} {}", self.status_icon(report), report.to_string().red())
            }
            _ => format!("{} {report}", self.status_icon(report)),
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutcomeReporter for ConsoleReporter {
    fn report(&self, report: &Report) {
        println!("{}", self.format_report(report));
    }
}
