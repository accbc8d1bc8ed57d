// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The compiled matcher: an ordered chain of typed match stages.
//!
//! A stage is an ordered clause list plus a terminal action. Clauses for
//! simple rules test shape and succeed directly; clauses for complex rules
//! test shape and delegate to the runtime binder. A stage closed by the
//! synthesizer delegates to the next stage; otherwise its terminal is a
//! definitive no-match. Immutable after compilation and safe for unlimited
//! concurrent invocation.

use std::fmt;

use crate::binder::{self, Check};
use crate::rule::{BindValue, Binding, Rule, WILDCARD_NAME};

/// One precomputed segment of a simple pattern's shape.
pub(crate) enum Seg {
    /// Token must equal the text.
    Lit(String),
    /// Token binds to the name.
    Var(String),
}

/// Structural test for a simple rule, resolved at compile time.
pub(crate) struct Shape {
    pub(crate) segs: Vec<Seg>,
    pub(crate) tail_wildcard: bool,
}

impl Shape {
    /// Match tokens against the shape, producing bindings on success.
    fn matches(&self, tokens: &[&str]) -> Option<Vec<Binding>> {
        if self.tail_wildcard {
            if tokens.len() < self.segs.len() {
                return None;
            }
        } else if tokens.len() != self.segs.len() {
            return None;
        }
        let mut bindings = Vec::new();
        for (seg, token) in self.segs.iter().zip(tokens) {
            match seg {
                Seg::Lit(text) => {
                    if text.as_str() != *token {
                        return None;
                    }
                }
                Seg::Var(name) => {
                    bindings.push(Binding::new(name.clone(), BindValue::token(*token)));
                }
            }
        }
        if self.tail_wildcard {
            let rest: Vec<String> = tokens
                .get(self.segs.len()..)
                .unwrap_or(&[])
                .iter()
                .map(|t| t.to_string())
                .collect();
            bindings.push(Binding::new(WILDCARD_NAME, BindValue::Tokens(rest)));
        }
        Some(bindings)
    }
}

/// What happens when matching cannot proceed at this point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailAction {
    /// Definitive no-match.
    Fail,
    /// Hand the tokens to the next stage in the chain.
    Delegate,
}

/// One clause of a stage.
pub(crate) enum Clause<C> {
    /// Simple rule: structural test, immediate success.
    Direct { rule: usize, shape: Shape },
    /// Complex rule: shape test, then the runtime binder. Literal
    /// positions are part of the shape, so `on_bind_fail` applies only to
    /// genuine runtime-check failures; it is `Delegate` only when overlap
    /// analysis required a chain link.
    Guarded {
        rule: usize,
        checks: Vec<Check<C>>,
        lits: Vec<(usize, String)>,
        min_len: usize,
        tail_wildcard: bool,
        on_bind_fail: FailAction,
    },
}

/// One synthesized match procedure in the compiled chain.
pub(crate) struct Stage<C> {
    pub(crate) clauses: Vec<Clause<C>>,
    pub(crate) terminal: FailAction,
}

/// Result of matching tokens against a compiled matcher.
///
/// `Fail` is a first-class outcome, not an error: no rule satisfied the
/// input.
pub enum MatchOutcome<'a, H, C = ()> {
    /// First rule (in listed order) whose pattern matched, with the
    /// bindings it extracted in encounter order.
    Matched {
        rule: &'a Rule<H, C>,
        bindings: Vec<Binding>,
    },
    /// No rule matched.
    Fail,
}

impl<'a, H, C> MatchOutcome<'a, H, C> {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Matched { .. })
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, MatchOutcome::Fail)
    }

    /// The matched rule and bindings, if any.
    pub fn matched(self) -> Option<(&'a Rule<H, C>, Vec<Binding>)> {
        match self {
            MatchOutcome::Matched { rule, bindings } => Some((rule, bindings)),
            MatchOutcome::Fail => None,
        }
    }
}

impl<H: fmt::Debug, C> fmt::Debug for MatchOutcome<'_, H, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchOutcome::Matched { rule, bindings } => f
                .debug_struct("Matched")
                .field("rule", &rule.name)
                .field("bindings", bindings)
                .finish(),
            MatchOutcome::Fail => f.write_str("Fail"),
        }
    }
}

/// A compiled rule set. Produced by [`Compiler::compile`](crate::Compiler),
/// never mutated in place; updates mean recompiling and reinstalling.
pub struct Matcher<H, C = ()> {
    pub(crate) rules: Vec<Rule<H, C>>,
    pub(crate) stages: Vec<Stage<C>>,
}

impl<H, C> Matcher<H, C> {
    /// Match a token sequence, threading `ctx` opaquely into callbacks.
    ///
    /// Stages are walked in order; within a stage, clauses are tried in
    /// rule order. Total: terminates in time bounded by stages × clauses ×
    /// tokens.
    pub fn matches<S: AsRef<str>>(&self, tokens: &[S], ctx: &C) -> MatchOutcome<'_, H, C> {
        let toks: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
        'stages: for stage in &self.stages {
            for clause in &stage.clauses {
                match clause {
                    Clause::Direct { rule, shape } => {
                        if let Some(bindings) = shape.matches(&toks) {
                            return MatchOutcome::Matched {
                                rule: &self.rules[*rule],
                                bindings,
                            };
                        }
                    }
                    Clause::Guarded {
                        rule,
                        checks,
                        lits,
                        min_len,
                        tail_wildcard,
                        on_bind_fail,
                    } => {
                        let len_ok = if *tail_wildcard {
                            toks.len() >= *min_len
                        } else {
                            toks.len() == *min_len
                        };
                        // A literal mismatch means the rule never applied
                        // to this input; fall through to the next clause.
                        let shape_ok = len_ok
                            && lits
                                .iter()
                                .all(|(i, text)| toks.get(*i).copied() == Some(text.as_str()));
                        if !shape_ok {
                            continue;
                        }
                        match binder::bind(checks, &toks, ctx) {
                            Some(bindings) => {
                                return MatchOutcome::Matched {
                                    rule: &self.rules[*rule],
                                    bindings,
                                };
                            }
                            // Bind failure: final unless overlap analysis
                            // forced a chain link at compile time.
                            None => match on_bind_fail {
                                FailAction::Fail => return MatchOutcome::Fail,
                                FailAction::Delegate => continue 'stages,
                            },
                        }
                    }
                }
            }
            match stage.terminal {
                FailAction::Fail => return MatchOutcome::Fail,
                FailAction::Delegate => {}
            }
        }
        MatchOutcome::Fail
    }

    /// Number of stages in the compiled chain.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// The rules this matcher was compiled from, in original order.
    pub fn rules(&self) -> &[Rule<H, C>] {
        &self.rules
    }
}

impl<H, C> fmt::Debug for Matcher<H, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("rules", &self.rules.len())
            .field("stages", &self.stages.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
