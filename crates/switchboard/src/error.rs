// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

/// Switchboard error types.
///
/// Compilation errors only. A failed match is not an error; it is the
/// [`MatchOutcome::Fail`](crate::matcher::MatchOutcome) value.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structurally invalid pattern in a rule (non-final wildcard,
    /// empty binding name).
    #[error("invalid pattern in rule '{rule}': {message}")]
    Pattern { rule: String, message: String },

    /// Regex source rejected by the regex engine at compile time.
    #[error("invalid regex '{pattern}': {source}")]
    Regex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A named callback reference with no entry in the callback registry.
    #[error("unknown callback '{0}'")]
    UnknownCallback(String),

    /// Textual pattern syntax error.
    #[error("invalid pattern '{pattern}': {message}")]
    Syntax { pattern: String, message: String },

    /// Rule-set file could not be parsed.
    #[error("rule set error: {0}")]
    RuleSet(#[from] toml::de::Error),
}

/// Result type using the switchboard Error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
