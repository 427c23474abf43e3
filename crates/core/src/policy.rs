//! Configurable failure handling
//!
//! The blog favors a clean empty page over error messages by default. These
//! policies make that choice explicit so callers can opt into seeing failures.

use std::str::FromStr;

/// Error returned when a policy name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}', expected one of: {expected}")]
pub struct PolicyParseError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// What to do when fetching posts fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// List failures become an empty list, single-post failures become
    /// "not found".
    #[default]
    Degrade,
    /// Failures are reported to the caller as errors.
    Surface,
}

impl FailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePolicy::Degrade => "degrade",
            FailurePolicy::Surface => "surface",
        }
    }
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailurePolicy {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "degrade" => Ok(FailurePolicy::Degrade),
            "surface" => Ok(FailurePolicy::Surface),
            other => Err(PolicyParseError {
                kind: "failure policy",
                value: other.to_string(),
                expected: "degrade, surface",
            }),
        }
    }
}

/// How invalid timestamps are handled in the CLI configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InvalidDateMode {
    #[default]
    Fail,
    Placeholder,
}

impl FromStr for InvalidDateMode {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(InvalidDateMode::Fail),
            "placeholder" => Ok(InvalidDateMode::Placeholder),
            other => Err(PolicyParseError {
                kind: "invalid date mode",
                value: other.to_string(),
                expected: "fail, placeholder",
            }),
        }
    }
}

impl std::fmt::Display for InvalidDateMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidDateMode::Fail => f.write_str("fail"),
            InvalidDateMode::Placeholder => f.write_str("placeholder"),
        }
    }
}

/// How a malformed timestamp is rendered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DatePolicy {
    /// Report the malformed timestamp as an error.
    #[default]
    Fail,
    /// Render the given text instead.
    Placeholder(String),
}

impl DatePolicy {
    pub fn new(mode: InvalidDateMode, placeholder: impl Into<String>) -> Self {
        match mode {
            InvalidDateMode::Fail => DatePolicy::Fail,
            InvalidDateMode::Placeholder => DatePolicy::Placeholder(placeholder.into()),
        }
    }
}
