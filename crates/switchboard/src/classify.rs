// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pattern classification: statically decidable vs. runtime-checked.
//!
//! Simple patterns (literals, captures, a tail wildcard) compile to direct
//! structural clauses. Complex patterns carry at least one runtime check
//! and go through the binder.

use std::collections::HashSet;

use crate::rule::PatternToken;

/// Structural classification of a rule pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// Every token decidable from shape alone.
    Simple,
    /// At least one token needs runtime evaluation.
    Complex,
}

/// Policy for capture names that always force runtime classification.
///
/// Lets a host declare environment-dependent bindings (say, a locale-aware
/// segment) that must flow through the binder even when the pattern is
/// structurally simple. The default policy declares none.
pub trait DynamicNames: Send + Sync {
    fn is_dynamic(&self, name: &str) -> bool;
}

/// Default policy: no capture name is dynamic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDynamicNames;

impl DynamicNames for NoDynamicNames {
    fn is_dynamic(&self, _name: &str) -> bool {
        false
    }
}

impl DynamicNames for HashSet<String> {
    fn is_dynamic(&self, name: &str) -> bool {
        self.contains(name)
    }
}

/// Classify a pattern under the given dynamic-name policy.
pub fn classify<C>(pattern: &[PatternToken<C>], policy: &dyn DynamicNames) -> PatternKind {
    for token in pattern {
        match token {
            PatternToken::Literal(_) | PatternToken::Wildcard => {}
            PatternToken::Capture(name) => {
                if policy.is_dynamic(name) {
                    return PatternKind::Complex;
                }
            }
            PatternToken::Callback { .. } | PatternToken::Regex { .. } => {
                return PatternKind::Complex;
            }
        }
    }
    PatternKind::Simple
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
