//! Errors raised while rendering documents.

use thiserror::Error;

/// Errors that can occur while rendering a scenario document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// No scenarios were supplied, so there is nothing to render.
    #[error("No scenarios found in the feature file")]
    NoScenarios,

    /// The document could not be packaged into its container format.
    #[error("failed to package document: {0}")]
    Package(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_scenarios_error_displays_user_message() {
        assert_eq!(
            RenderError::NoScenarios.to_string(),
            "No scenarios found in the feature file"
        );
    }

    #[test]
    fn package_error_includes_cause() {
        let error = RenderError::Package("disk full".to_owned());
        assert_eq!(error.to_string(), "failed to package document: disk full");
    }
}
