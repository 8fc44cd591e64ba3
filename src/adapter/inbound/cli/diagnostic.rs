//! Miette-based error diagnostics for CLI error presentation.
//!
//! Config parse failures are shown with the offending TOML excerpt and a
//! labeled span. Everything else prints as a plain error line.

use std::path::Path;

use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use thiserror::Error;

use crate::error::{ConfigError as CrateConfigError, Error};

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(storelens::config))]
pub struct ConfigError {
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

impl ConfigError {
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        name: impl AsRef<str>,
        src: impl Into<String>,
        offset: usize,
        len: usize,
    ) -> Self {
        Self {
            message: message.into(),
            src: NamedSource::new(name, src.into()),
            span: (offset, len).into(),
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Build a diagnostic for a TOML parse failure in `path`.
///
/// `None` when the error is not a parse error, carries no span, or the file
/// can no longer be read.
#[must_use]
pub fn config_diagnostic(error: &Error, path: &Path) -> Option<ConfigError> {
    let Error::Config(CrateConfigError::Parse(parse)) = error else {
        return None;
    };
    let span = parse.span()?;
    let content = std::fs::read_to_string(path).ok()?;
    let len = span.end.saturating_sub(span.start).max(1);
    Some(
        ConfigError::new(
            parse.message().to_string(),
            path.display().to_string(),
            content,
            span.start,
            len,
        )
        .with_help("run `storelens config init` to write a documented template"),
    )
}

/// Print an error, with source context when it came from the config file.
pub fn report(error: &Error, config_path: Option<&Path>) {
    if let Some(diagnostic) = config_path.and_then(|path| config_diagnostic(error, path)) {
        eprintln!("{:?}", Report::new(diagnostic));
        return;
    }
    super::output::error(&error.to_string());
}
