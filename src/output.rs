//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{ApiResult, Notification, ReqState};

/// Trait for human-readable key-value output.
///
/// Implemented by result and state types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for ApiResult {
    fn pretty_print(&self) -> String {
        let header = format!("Result: {}", self.outcome());
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("Success:        {}", if self.meta.success { "yes" } else { "no" }),
        ];

        if self.meta.status != 0 {
            lines.push(format!("Status:         {}", self.meta.status));
        }

        if !self.meta.url.is_empty() {
            lines.push(format!("URL:            {}", self.meta.url));
        }

        if let Some(ref problem_type) = self.problem_type {
            lines.push(format!("Type:           {}", problem_type));
        }

        if let Some(ref title) = self.title {
            lines.push(format!("Title:          {}", title));
        }

        if let Some(ref detail) = self.detail {
            lines.push(format!("Detail:         {}", detail));
        }

        // Field errors, one per line
        for (name, reason) in self.field_errors() {
            lines.push(format!("  {:<14}{}", name, reason));
        }

        if let Some(ref data) = self.data {
            lines.push(format!("Data:           {}", data));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for ReqState {
    fn pretty_print(&self) -> String {
        let divider = "─".repeat(self.name().len().max(30));

        let mut lines = vec![
            format!("Tracker: {}", self.name()),
            divider,
            format!("Status:         {}", self.status()),
            format!("Calls:          {}", self.generation()),
        ];

        if let Some(result) = self.result() {
            lines.push(format!("Outcome:        {}", result.outcome()));
            if result.meta.status != 0 {
                lines.push(format!("HTTP Status:    {}", result.meta.status));
            }
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Notification {
    fn pretty_print(&self) -> String {
        format!(
            "[{}] {:<7} {}",
            self.timestamp.format("%H:%M"),
            self.severity.to_string(),
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldError, Notifications};

    #[test]
    fn test_api_result_pretty_print_format() {
        let mut result = ApiResult::problem("http://localhost:3000", "fields-invalid")
            .with_title("Failed to update profile")
            .with_errors(vec![FieldError::new("age", "must be a positive integer")]);
        result.meta.status = 400;

        let output = result.pretty_print();
        assert!(output.starts_with("Result: domain-error"));
        assert!(output.contains("Status:         400"));
        assert!(output.contains("Failed to update profile"));
        assert!(output.contains("age"));
        assert!(!output.contains("URL:"));
    }

    #[test]
    fn test_idle_state_pretty_print() {
        let state = ReqState::new("getSuccessData", None);
        let output = state.pretty_print();

        assert!(output.starts_with("Tracker: getSuccessData"));
        assert!(output.contains("IDLE"));
        assert!(!output.contains("Outcome:"));
    }

    #[test]
    fn test_notification_pretty_print() {
        let notifications = Notifications::new();
        notifications.add_error("Division by zero (http://x/error-type/division-by-zero)");

        let output = notifications.list()[0].pretty_print();
        assert!(output.contains("error"));
        assert!(output.ends_with("Division by zero (http://x/error-type/division-by-zero)"));
    }
}
