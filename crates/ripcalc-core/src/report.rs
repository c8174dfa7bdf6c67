//! Aligned `label: value` report layout
//!
//! Family crates decide which rows a report has; this module only lines
//! them up. Labels are right-aligned, values left-aligned in a column as
//! wide as the widest value, and an optional detail column (a bit string
//! or a classification) follows. Separator rules span the widest line.
//!
//! ```
//! use ripcalc_core::report::Report;
//!
//! let text = Report::new()
//!     .row("Address", "10.0.0.1")
//!     .separator()
//!     .row_with("Hosts", "254", "Class A")
//!     .render();
//!
//! assert_eq!(
//!     text,
//!     "Address: 10.0.0.1\n-------------------------\n  Hosts: 254      Class A"
//! );
//! ```

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Row {
        label: &'static str,
        value: String,
        detail: Option<String>,
    },
    Separator,
}

/// Builder for a multi-line text report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    lines: Vec<Line>,
}

impl Report {
    /// Empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `label: value` row
    pub fn row(mut self, label: &'static str, value: impl Into<String>) -> Self {
        self.lines.push(Line::Row {
            label,
            value: value.into(),
            detail: None,
        });
        self
    }

    /// Append a `label: value detail` row
    pub fn row_with(
        mut self,
        label: &'static str,
        value: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        self.lines.push(Line::Row {
            label,
            value: value.into(),
            detail: Some(detail.into()),
        });
        self
    }

    /// Append a row whose detail column is only present sometimes
    pub fn row_maybe(
        self,
        label: &'static str,
        value: impl Into<String>,
        detail: Option<String>,
    ) -> Self {
        match detail {
            Some(detail) => self.row_with(label, value, detail),
            None => self.row(label, value),
        }
    }

    /// Append a dashed rule
    pub fn separator(mut self) -> Self {
        self.lines.push(Line::Separator);
        self
    }

    /// Lay the report out as text, lines joined by `\n` without a
    /// trailing newline.
    pub fn render(&self) -> String {
        let mut label_width = 0;
        let mut value_width = 0;
        for line in &self.lines {
            if let Line::Row { label, value, .. } = line {
                label_width = label_width.max(label.len());
                value_width = value_width.max(value.len());
            }
        }

        let rows: Vec<Option<String>> = self
            .lines
            .iter()
            .map(|line| match line {
                Line::Row {
                    label,
                    value,
                    detail: Some(detail),
                } => Some(format!(
                    "{:>lw$}: {:<vw$} {}",
                    label,
                    value,
                    detail,
                    lw = label_width,
                    vw = value_width
                )),
                Line::Row {
                    label,
                    value,
                    detail: None,
                } => Some(format!("{:>lw$}: {}", label, value, lw = label_width)),
                Line::Separator => None,
            })
            .collect();

        let rule_width = rows.iter().flatten().map(String::len).max().unwrap_or(0);
        let rule = "-".repeat(rule_width);

        rows.into_iter()
            .map(|row| row.unwrap_or_else(|| rule.clone()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
