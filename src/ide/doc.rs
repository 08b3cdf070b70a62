//! Doc-comment summaries for candidate tooltips.

/// Marker appended to a summary cut down to its first line.
pub const TRUNCATION_MARKER: &str = " [more...]";

/// At most two lines of a doc comment: the first content line and the
/// `@return` annotation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocSummary {
    pub summary: Option<String>,
    pub returns: Option<String>,
}

impl DocSummary {
    /// Summarize raw comment text, delimiters included.
    pub fn from_comment(raw: &str) -> Self {
        let mut doc = DocSummary::default();
        for line in raw.lines() {
            let line = clean_line(line);
            if line.is_empty() {
                continue;
            }
            if line.contains("@return") {
                doc.returns = Some(line.to_string());
            } else if doc.summary.is_none() {
                doc.summary = Some(format!("{line}{TRUNCATION_MARKER}"));
            }
        }
        doc
    }

    pub fn is_empty(&self) -> bool {
        self.summary.is_none() && self.returns.is_none()
    }

    /// Tooltip text: summary, then the return annotation on its own line.
    pub fn render(&self) -> String {
        match (&self.summary, &self.returns) {
            (Some(summary), Some(returns)) => format!("{summary}\n{returns}"),
            (Some(text), None) | (None, Some(text)) => text.clone(),
            (None, None) => String::new(),
        }
    }
}

fn clean_line(line: &str) -> &str {
    let line = line.trim_start_matches(|c: char| c == '/' || c == '*' || c.is_whitespace());
    line.trim_end().trim_end_matches("*/").trim_end()
}
