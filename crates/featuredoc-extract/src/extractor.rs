//! Single-pass scenario extraction.
//!
//! Extraction is a fold over the lines of a feature file. The state carried
//! between lines is a [`ScenarioExtractor`]: the most recent tag line, the
//! scenario currently being collected (if any), and the records emitted so
//! far. A scenario is flushed whenever a tag line or a new header closes it,
//! and once more at the end of the input.
//!
//! The most recent tag line is never cleared once a scenario consumes it. A
//! later scenario without its own tag line inherits the same tags.

use crate::line::LineKind;
use crate::record::ScenarioRecord;

/// A scenario whose header has been seen but which has not been flushed yet.
#[derive(Debug)]
struct PendingScenario {
    name: String,
    steps: Vec<String>,
}

impl PendingScenario {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            steps: Vec::new(),
        }
    }

    /// Scenarios without a name or without steps produce no record.
    fn into_record(self, tags: &str) -> Option<ScenarioRecord> {
        if self.name.is_empty() || self.steps.is_empty() {
            return None;
        }
        Some(ScenarioRecord::new(tags, self.name, self.steps))
    }
}

/// Incremental scenario extractor.
///
/// Feed lines with [`push_line`](Self::push_line) and collect the records with
/// [`finish`](Self::finish). Each extractor owns all of its state, so separate
/// inputs can be processed concurrently with separate extractors.
///
/// # Examples
/// ```
/// use featuredoc_extract::ScenarioExtractor;
///
/// let mut extractor = ScenarioExtractor::new();
/// for line in ["@api", "Scenario: Fetch", "  Given a token", "Scenario: Empty"] {
///     extractor.push_line(line);
/// }
/// let records = extractor.finish();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].name(), "Fetch");
/// ```
#[derive(Debug, Default)]
pub struct ScenarioExtractor {
    tags: String,
    pending: Option<PendingScenario>,
    records: Vec<ScenarioRecord>,
}

impl ScenarioExtractor {
    /// Create an extractor with no buffered tags and no open scenario.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a single line of input.
    ///
    /// Trailing `\r` characters are tolerated, so lines split from CRLF text
    /// may be passed unchanged.
    pub fn push_line(&mut self, line: &str) {
        match LineKind::classify(line) {
            LineKind::Ignored => {}
            LineKind::Tags(tags) => {
                self.flush();
                tags.clone_into(&mut self.tags);
            }
            LineKind::Header(name) => {
                self.flush();
                self.pending = Some(PendingScenario::new(name));
            }
            LineKind::Text(text) => {
                if let Some(pending) = self.pending.as_mut() {
                    pending.steps.push(text.to_owned());
                }
            }
        }
    }

    /// Whether a scenario header has been seen and not yet closed.
    #[must_use]
    pub fn in_scenario(&self) -> bool {
        self.pending.is_some()
    }

    /// Flush any open scenario and return every record in input order.
    #[must_use]
    pub fn finish(mut self) -> Vec<ScenarioRecord> {
        self.flush();
        self.records
    }

    fn flush(&mut self) {
        if let Some(record) = self
            .pending
            .take()
            .and_then(|pending| pending.into_record(&self.tags))
        {
            self.records.push(record);
        }
    }
}

impl<'a> Extend<&'a str> for ScenarioExtractor {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, lines: I) {
        for line in lines {
            self.push_line(line);
        }
    }
}

/// Extract every complete scenario from the text of a feature file.
///
/// The function is total: malformed input yields fewer records, never an
/// error. Both `\n` and `\r\n` line endings are accepted.
///
/// # Examples
/// ```
/// use featuredoc_extract::extract;
///
/// let records = extract("Scenario: A\nScenario: B\n  step1");
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].name(), "B");
///
/// assert!(extract("").is_empty());
/// ```
#[must_use]
pub fn extract(text: &str) -> Vec<ScenarioRecord> {
    text.lines()
        .fold(ScenarioExtractor::new(), |mut extractor, line| {
            extractor.push_line(line);
            extractor
        })
        .finish()
}
