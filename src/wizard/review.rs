//! Read-only summary shown on the review step

use crate::core::{ConfigurationDraft, Measure};
use std::fmt;

/// One labelled line of the review summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewLine {
    pub label: &'static str,
    pub value: String,
}

/// The draft as the review step presents it
///
/// Values are shown as entered; missing ones render empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub lines: Vec<ReviewLine>,
}

impl Review {
    pub fn of(draft: &ConfigurationDraft) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let measure = |value: Option<&Measure>| value.map(ToString::to_string).unwrap_or_default();

        let dimensions = format!(
            "{} x {} cm",
            measure(draft.width()),
            measure(draft.depth()),
        );
        let service = if draft.service == Some(true) { "Yes" } else { "No" };

        let lines = vec![
            line("Product", text(&draft.product)),
            line("Installation Type", text(&draft.installation_type)),
            line("Dimensions", dimensions),
            line("Color", text(&draft.color)),
            line("LED Option", text(&draft.led)),
            line("Service", service.to_string()),
            line("Branch", text(&draft.branch)),
            line("Name", text(&draft.name)),
            line("Email", text(&draft.email)),
            line("Phone", text(&draft.phone)),
        ];

        Self { lines }
    }

    /// Value of the line with `label`
    pub fn get(&self, label: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| line.label == label)
            .map(|line| line.value.as_str())
    }
}

fn line(label: &'static str, value: String) -> ReviewLine {
    ReviewLine { label, value }
}

impl fmt::Display for Review {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}: {}", line.label, line.value)?;
        }
        Ok(())
    }
}
