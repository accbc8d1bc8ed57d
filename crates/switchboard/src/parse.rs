// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Textual pattern syntax and TOML rule sets.
//!
//! Patterns split on `/`:
//! - `{name}` captures one token
//! - `{name:regex}` is a regex check (default options, whole-token value)
//! - `*` as the final segment is the tail wildcard
//! - `{{` and `}}` escape literal braces in a literal segment
//!
//! `""` and `"/"` are the empty pattern. Rule sets come from a `[[rule]]`
//! array of tables; handler and args are carried opaquely.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::rule::{PatternToken, Rule};

/// Opaque handler payload of a configured rule.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerSpec {
    /// Handler identifier, passed through unmodified.
    pub handler: String,
    /// Free-form handler arguments, passed through unmodified.
    pub args: toml::Table,
}

#[derive(Debug, Deserialize)]
struct RuleSetDoc {
    #[serde(default, rename = "rule")]
    rules: Vec<RuleDoc>,
}

#[derive(Debug, Deserialize)]
struct RuleDoc {
    name: String,
    pattern: String,
    handler: String,
    #[serde(default)]
    args: toml::Table,
}

/// Parse the textual pattern syntax into pattern tokens.
pub fn parse_pattern<C>(pattern: &str) -> Result<Vec<PatternToken<C>>> {
    let mut tokens = Vec::new();
    for segment in pattern.split('/').filter(|s| !s.is_empty()) {
        tokens.push(parse_segment(pattern, segment)?);
    }
    Ok(tokens)
}

fn parse_segment<C>(pattern: &str, segment: &str) -> Result<PatternToken<C>> {
    if segment == "*" {
        return Ok(PatternToken::Wildcard);
    }
    let is_brace = segment.starts_with('{')
        && segment.ends_with('}')
        && !segment.starts_with("{{")
        && !segment.ends_with("}}");
    if is_brace {
        let inner = &segment[1..segment.len() - 1];
        let (name, regex) = match inner.split_once(':') {
            Some((name, regex)) => (name, Some(regex)),
            None => (inner, None),
        };
        if name.is_empty() {
            return Err(Error::Syntax {
                pattern: pattern.to_string(),
                message: format!("segment '{segment}' has no binding name"),
            });
        }
        return Ok(match regex {
            Some(source) => PatternToken::regex(name, source),
            None => PatternToken::capture(name),
        });
    }
    Ok(PatternToken::Literal(
        segment.replace("{{", "{").replace("}}", "}"),
    ))
}

/// Load dispatch rules from a TOML document.
///
/// Pattern syntax errors surface here, before compilation; regex sources
/// are validated later by the compiler.
pub fn rules_from_toml(text: &str) -> Result<Vec<Rule<HandlerSpec>>> {
    let doc: RuleSetDoc = toml::from_str(text)?;
    doc.rules
        .into_iter()
        .map(|rule| {
            let pattern = parse_pattern(&rule.pattern)?;
            Ok(Rule::new(
                rule.name,
                pattern,
                HandlerSpec {
                    handler: rule.handler,
                    args: rule.args,
                },
            ))
        })
        .collect()
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
