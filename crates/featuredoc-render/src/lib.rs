//! Rendering of extracted scenarios into shareable documents.
//!
//! The primary output is a DOCX document: a title followed by a table with one
//! numbered row per scenario. A JSON rendering of the same records is also
//! available for previews and tooling.
//!
//! Rendering an empty record list as a document is refused with
//! [`RenderError::NoScenarios`]; callers surface that to the user instead of
//! producing a blank document.

mod docx;
mod error;
pub mod json;
mod title;

pub use docx::{DOCX_CONTENT_TYPE, render};
pub use error::RenderError;
pub use featuredoc_extract::ScenarioRecord;
pub use title::DocumentTitle;
