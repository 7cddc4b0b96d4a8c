//! Scenario extraction for Gherkin-style `.feature` files.
//!
//! The crate segments the raw text of a feature file into an ordered list of
//! [`ScenarioRecord`] values, one per scenario that has a name and at least one
//! step. Parsing is deliberately permissive: it never fails, and anything it
//! does not recognise is either treated as an opaque step line or ignored.
//!
//! ```
//! use featuredoc_extract::extract;
//!
//! let records = extract("@smoke\nScenario: Login\n  Given a user\n  When they sign in\n");
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].tags(), "@smoke");
//! assert_eq!(records[0].name(), "Login");
//! assert_eq!(records[0].steps(), ["Given a user", "When they sign in"]);
//! ```

mod extractor;
mod line;
mod record;

pub use extractor::{ScenarioExtractor, extract};
pub use record::ScenarioRecord;
