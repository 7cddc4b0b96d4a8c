//! The scenario record produced by extraction.

/// A scenario captured from a feature file.
///
/// Records are immutable once built; extraction appends them to its output in
/// the order their headers appear.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScenarioRecord {
    tags: String,
    name: String,
    steps: Vec<String>,
}

impl ScenarioRecord {
    /// Construct a record from its parts.
    ///
    /// # Examples
    /// ```
    /// use featuredoc_extract::ScenarioRecord;
    ///
    /// let record = ScenarioRecord::new("@smoke", "Login", vec!["Given a user".into()]);
    /// assert_eq!(record.name(), "Login");
    /// assert_eq!(record.steps().len(), 1);
    /// ```
    #[must_use]
    pub fn new(
        tags: impl Into<String>,
        name: impl Into<String>,
        steps: impl Into<Vec<String>>,
    ) -> Self {
        Self {
            tags: tags.into(),
            name: name.into(),
            steps: steps.into(),
        }
    }

    /// The raw tag line that preceded the scenario, or an empty string.
    #[must_use]
    pub fn tags(&self) -> &str {
        &self.tags
    }

    /// The trimmed text following the scenario header's colon.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Step lines in file order.
    #[must_use]
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// Split the raw tag line into individual tags.
    ///
    /// # Examples
    /// ```
    /// use featuredoc_extract::ScenarioRecord;
    ///
    /// let record = ScenarioRecord::new("@smoke  @regression", "Login", vec!["s".into()]);
    /// assert_eq!(record.tag_list(), ["@smoke", "@regression"]);
    /// ```
    #[must_use]
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags.split_whitespace().collect()
    }
}
