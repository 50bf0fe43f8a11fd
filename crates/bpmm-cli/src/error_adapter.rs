//! Error adapter for converting BpmmError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;

use bpmm::BpmmError;

/// Adapter rendering a [`BpmmError`] as a miette diagnostic.
pub struct ErrorAdapter<'a>(pub &'a BpmmError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            BpmmError::Io(_) => "bpmm::io",
            BpmmError::Json(_) => "bpmm::json",
            BpmmError::Document(_) => "bpmm::document",
            BpmmError::Config(_) => "bpmm::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help: Box<dyn fmt::Display + 'a> = match self.0 {
            BpmmError::Json(err) => Box::new(format!(
                "the document is not valid JSON (line {}, column {})",
                err.line(),
                err.column()
            )),
            BpmmError::Document(_) => Box::new(
                "a document is a JSON array of elements or an object with an `elements` array",
            ),
            BpmmError::Config(_) => {
                Box::new("check the [element] and [prompts] sections of the configuration file")
            }
            BpmmError::Io(_) => return None,
        };
        Some(help)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        let err = BpmmError::Document("expected an array".to_string());
        let adapter = ErrorAdapter(&err);

        let code = adapter.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("bpmm::document"));
        assert_eq!(adapter.to_string(), "Document error: expected an array");
    }

    #[test]
    fn test_json_help_mentions_position() {
        let json_err = serde_json::from_str::<serde_json::Value>("[1,").expect_err("invalid JSON");
        let err = BpmmError::from(json_err);
        let adapter = ErrorAdapter(&err);

        let help = adapter.help().map(|h| h.to_string()).expect("help text");
        assert!(help.contains("line 1"));
    }

    #[test]
    fn test_io_has_no_help() {
        let err = BpmmError::Io(std::io::Error::other("boom"));
        assert!(ErrorAdapter(&err).help().is_none());
    }
}
