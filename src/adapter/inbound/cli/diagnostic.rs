//! Miette-based error diagnostics for CLI error presentation.
//!
//! Library errors are converted here into diagnostics with a stable code
//! and, where the fix is obvious, a help line. TOML syntax errors keep the
//! file content so miette can point at the offending span.

use std::fmt::Display;
use std::path::Path;

use miette::{Diagnostic, Report, SourceSpan};

use crate::domain::HedgeRejection;
use crate::error::{ConfigError, Error, SnapshotError};

/// Configuration file error with source location context.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(surebet::config::syntax))]
pub struct ConfigSourceError {
    /// Human-readable error message.
    pub message: String,

    /// Configuration file content.
    #[source_code]
    pub src: String,

    /// Byte offset and length of the problematic region.
    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

impl ConfigSourceError {
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        src: impl Into<String>,
        offset: usize,
        len: usize,
    ) -> Self {
        Self {
            message: message.into(),
            src: src.into(),
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

/// Any other failure surfaced by a command.
///
/// The code varies with the underlying error, so `Diagnostic` is
/// implemented by hand rather than derived.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CommandError {
    pub message: String,
    pub code: &'static str,
    pub help: Option<String>,
}

impl Diagnostic for CommandError {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(self.code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        self.help
            .as_ref()
            .map(|help| Box::new(help) as Box<dyn Display + 'a>)
    }
}

impl CommandError {
    #[must_use]
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

fn hedge_help(rejection: &HedgeRejection) -> &'static str {
    match rejection {
        HedgeRejection::StakeBelowMinimum { .. } => "raise --stake or lower hedge.min_stake",
        HedgeRejection::InsufficientBalance { .. } => {
            "top up the wallet or lower hedge.balance_reserve"
        }
        HedgeRejection::NoOrders => "wait for makers to post on the opposite side",
        HedgeRejection::OddsBelowMinimum { .. } => "lower --min-odds or wait for better prices",
        HedgeRejection::InsufficientLiquidity { .. } => "split the hedge or wait for deeper orders",
    }
}

impl From<Error> for CommandError {
    fn from(error: Error) -> Self {
        let message = error.to_string();
        match &error {
            Error::Config(ConfigError::InvalidValue { field, .. }) => {
                Self::new("surebet::config::invalid", message)
                    .with_help(format!("fix `{field}` in the configuration file"))
            }
            Error::Config(ConfigError::MissingField { field }) => {
                Self::new("surebet::config::missing", message)
                    .with_help(format!("set `{field}` in the configuration file"))
            }
            Error::Config(ConfigError::ReadFile(_)) => Self::new("surebet::config::read", message)
                .with_help("run `surebet config init` to create one"),
            Error::Config(_) => Self::new("surebet::config", message),
            Error::Snapshot(SnapshotError::Read { .. }) => {
                Self::new("surebet::snapshot::read", message)
                    .with_help("pass --snapshot or set monitor.snapshot_dir")
            }
            Error::Snapshot(_) => Self::new("surebet::snapshot", message),
            Error::Hedge(rejection) => {
                Self::new("surebet::hedge", message).with_help(hedge_help(rejection))
            }
            Error::MarketNotFound(_) => Self::new("surebet::market", message)
                .with_help("check the market id against orders.json"),
            Error::Json(_) | Error::Io(_) => Self::new("surebet::io", message),
        }
    }
}

/// Build the report for a failed configuration load.
///
/// TOML syntax errors are rendered against `content` when a span is known.
#[must_use]
pub fn config_report(error: Error, path: &Path, content: Option<&str>) -> Report {
    if let (Error::Config(ConfigError::Parse(parse)), Some(content)) = (&error, content) {
        if let Some(span) = parse.span() {
            let diagnostic = ConfigSourceError::new(
                format!("invalid TOML in {}: {}", path.display(), parse.message()),
                content,
                span.start,
                span.end.saturating_sub(span.start),
            )
            .with_help("see `surebet config init` for a valid layout");
            return Report::new(diagnostic);
        }
    }
    report(error)
}

/// Build the report for any command failure.
#[must_use]
pub fn report(error: Error) -> Report {
    Report::new(CommandError::from(error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MarketId;

    #[test]
    fn invalid_value_names_the_field() {
        let error: Error = ConfigError::InvalidValue {
            field: "prematch.weights",
            reason: "weights must sum to 1.0".into(),
        }
        .into();
        let diagnostic = CommandError::from(error);
        assert_eq!(diagnostic.code, "surebet::config::invalid");
        assert!(diagnostic.help.unwrap().contains("prematch.weights"));
    }

    #[test]
    fn missing_field_has_its_own_code() {
        let error: Error = ConfigError::MissingField {
            field: "monitor.snapshot_dir",
        }
        .into();
        let diagnostic = CommandError::from(error);
        assert_eq!(diagnostic.code, "surebet::config::missing");
        assert!(diagnostic.help.unwrap().contains("monitor.snapshot_dir"));
    }

    #[test]
    fn hedge_rejection_carries_help() {
        let diagnostic = CommandError::from(Error::Hedge(HedgeRejection::NoOrders));
        assert_eq!(diagnostic.code, "surebet::hedge");
        assert!(diagnostic.help.is_some());
    }

    #[test]
    fn market_not_found_message() {
        let id = MarketId::new("0xabc");
        let diagnostic = CommandError::from(Error::MarketNotFound(id.to_string()));
        assert_eq!(diagnostic.message, "market not found: 0xabc");
    }

    #[test]
    fn toml_syntax_error_keeps_source() {
        let content = "[arbitrage\nmin_roi = 1\n";
        let parse = toml::from_str::<toml::Value>(content).unwrap_err();
        let report = config_report(
            ConfigError::Parse(parse).into(),
            Path::new("surebet.toml"),
            Some(content),
        );
        assert!(report.downcast_ref::<ConfigSourceError>().is_some());
    }
}
