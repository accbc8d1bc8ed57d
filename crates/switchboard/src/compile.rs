// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rule-set compilation: validation, classification, stage synthesis.
//!
//! Rules are walked once in listed order. Consecutive simple rules become
//! direct clauses in the current stage. A complex rule becomes a guarded
//! clause; overlap analysis against the remaining rules decides whether its
//! bind failure is final or closes the stage with a link to a fresh stage
//! holding the successors. Compilation is a pure transformation except for
//! inserts into the regex cache; on error it aborts with no partial
//! matcher.

use std::collections::HashMap;
use std::mem;
use std::sync::Arc;

use crate::binder::Check;
use crate::classify::{DynamicNames, NoDynamicNames, PatternKind, classify};
use crate::error::{Error, Result};
use crate::matcher::{Clause, FailAction, Matcher, Seg, Shape, Stage};
use crate::overlap::any_overlap;
use crate::regex_cache::RegexCache;
use crate::rule::{CallbackRef, PatternToken, Rule, TokenCheck};

/// Named callbacks available to `CallbackRef::Named` resolution.
pub struct CallbackRegistry<C = ()> {
    inner: HashMap<String, Arc<dyn TokenCheck<C>>>,
}

impl<C> CallbackRegistry<C> {
    pub fn new() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }

    /// Register a callback under a name, e.g. `"auth::is_user"`.
    /// Re-registering a name replaces the previous callback.
    pub fn register(&mut self, name: impl Into<String>, check: impl TokenCheck<C> + 'static) {
        self.inner.insert(name.into(), Arc::new(check));
    }

    fn resolve(&self, name: &str) -> Option<Arc<dyn TokenCheck<C>>> {
        self.inner.get(name).map(Arc::clone)
    }
}

impl<C> Default for CallbackRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Compiles rule lists into [`Matcher`]s.
///
/// Owns the regex cache (shareable across compilers via `Arc`; entries
/// persist for the life of the owning process), the callback registry, and
/// the dynamic-name classification policy.
pub struct Compiler<C = ()> {
    cache: Arc<RegexCache>,
    callbacks: CallbackRegistry<C>,
    dynamic: Box<dyn DynamicNames>,
}

impl<C> Compiler<C> {
    pub fn new() -> Self {
        Self::with_cache(Arc::new(RegexCache::new()))
    }

    /// Create a compiler sharing an existing regex cache.
    pub fn with_cache(cache: Arc<RegexCache>) -> Self {
        Self {
            cache,
            callbacks: CallbackRegistry::new(),
            dynamic: Box::new(NoDynamicNames),
        }
    }

    /// Replace the dynamic-name policy.
    pub fn with_dynamic_names(mut self, policy: impl DynamicNames + 'static) -> Self {
        self.dynamic = Box::new(policy);
        self
    }

    /// Register a named callback.
    pub fn register_callback(
        mut self,
        name: impl Into<String>,
        check: impl TokenCheck<C> + 'static,
    ) -> Self {
        self.callbacks.register(name, check);
        self
    }

    /// The regex cache this compiler inserts into.
    pub fn regex_cache(&self) -> &Arc<RegexCache> {
        &self.cache
    }

    /// Compile a rule list into a matcher.
    ///
    /// An empty list compiles to a single stage whose only action is the
    /// no-match terminal.
    pub fn compile<H>(&self, rules: Vec<Rule<H, C>>) -> Result<Matcher<H, C>> {
        for rule in &rules {
            validate(rule)?;
        }

        let mut stages: Vec<Stage<C>> = Vec::new();
        let mut clauses: Vec<Clause<C>> = Vec::new();
        for (idx, rule) in rules.iter().enumerate() {
            match classify(&rule.pattern, self.dynamic.as_ref()) {
                PatternKind::Simple => {
                    clauses.push(Clause::Direct {
                        rule: idx,
                        shape: build_shape(&rule.pattern),
                    });
                }
                PatternKind::Complex => {
                    let checks = self.build_checks(rule)?;
                    let lits = literal_positions(&rule.pattern);
                    let (min_len, tail_wildcard) = arity(&rule.pattern);
                    // Only a later rule that could match the same shape
                    // makes a fallback link necessary; without one, a bind
                    // failure is final.
                    if any_overlap(&rule.pattern, &rules[idx + 1..]) {
                        clauses.push(Clause::Guarded {
                            rule: idx,
                            checks,
                            lits,
                            min_len,
                            tail_wildcard,
                            on_bind_fail: FailAction::Delegate,
                        });
                        stages.push(Stage {
                            clauses: mem::take(&mut clauses),
                            terminal: FailAction::Delegate,
                        });
                    } else {
                        clauses.push(Clause::Guarded {
                            rule: idx,
                            checks,
                            lits,
                            min_len,
                            tail_wildcard,
                            on_bind_fail: FailAction::Fail,
                        });
                    }
                }
            }
        }
        stages.push(Stage {
            clauses,
            terminal: FailAction::Fail,
        });

        tracing::debug!(
            "compiled {} rules into {} stages",
            rules.len(),
            stages.len()
        );
        Ok(Matcher { rules, stages })
    }

    /// Resolve a complex rule's pattern into the binder's check list.
    fn build_checks<H>(&self, rule: &Rule<H, C>) -> Result<Vec<Check<C>>> {
        rule.pattern
            .iter()
            .map(|token| {
                Ok(match token {
                    PatternToken::Literal(text) => Check::Lit(text.clone()),
                    PatternToken::Capture(name) => Check::Var(name.clone()),
                    PatternToken::Wildcard => Check::Tail,
                    PatternToken::Callback {
                        name,
                        callback,
                        args,
                    } => {
                        let check = match callback {
                            CallbackRef::Named(cb) => self
                                .callbacks
                                .resolve(cb)
                                .ok_or_else(|| Error::UnknownCallback(cb.clone()))?,
                            CallbackRef::Inline(check) => Arc::clone(check),
                        };
                        Check::Callback {
                            name: name.clone(),
                            check,
                            args: args.clone(),
                        }
                    }
                    PatternToken::Regex {
                        name,
                        source,
                        options,
                        run,
                    } => Check::Regex {
                        name: name.clone(),
                        regex: self.cache.get_or_compile(source, options)?,
                        run: run.clone(),
                    },
                })
            })
            .collect()
    }
}

impl<C> Default for Compiler<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural validation, before any clause is emitted.
fn validate<H, C>(rule: &Rule<H, C>) -> Result<()> {
    let last = rule.pattern.len().saturating_sub(1);
    for (i, token) in rule.pattern.iter().enumerate() {
        match token {
            PatternToken::Wildcard if i != last => {
                return Err(Error::Pattern {
                    rule: rule.name.clone(),
                    message: "wildcard must be the final token".to_string(),
                });
            }
            PatternToken::Capture(name)
            | PatternToken::Callback { name, .. }
            | PatternToken::Regex { name, .. }
                if name.is_empty() =>
            {
                return Err(Error::Pattern {
                    rule: rule.name.clone(),
                    message: "empty binding name".to_string(),
                });
            }
            _ => {}
        }
    }
    Ok(())
}

/// Precompute a simple pattern's structural test.
fn build_shape<C>(pattern: &[PatternToken<C>]) -> Shape {
    let mut segs = Vec::new();
    let mut tail_wildcard = false;
    for token in pattern {
        match token {
            PatternToken::Literal(text) => segs.push(Seg::Lit(text.clone())),
            PatternToken::Capture(name) => segs.push(Seg::Var(name.clone())),
            PatternToken::Wildcard => tail_wildcard = true,
            // Simple classification excludes these.
            PatternToken::Callback { .. } | PatternToken::Regex { .. } => {}
        }
    }
    Shape {
        segs,
        tail_wildcard,
    }
}

/// Literal positions of a pattern, hoisted into the guarded clause's
/// shape test so a mismatch falls through instead of counting as a bind
/// failure.
fn literal_positions<C>(pattern: &[PatternToken<C>]) -> Vec<(usize, String)> {
    pattern
        .iter()
        .enumerate()
        .filter_map(|(i, token)| match token {
            PatternToken::Literal(text) => Some((i, text.clone())),
            _ => None,
        })
        .collect()
}

/// Token-count requirement of a pattern: exact, or at-least-N with a tail
/// wildcard.
fn arity<C>(pattern: &[PatternToken<C>]) -> (usize, bool) {
    match pattern.last() {
        Some(PatternToken::Wildcard) => (pattern.len() - 1, true),
        _ => (pattern.len(), false),
    }
}

#[cfg(test)]
#[path = "compile_tests.rs"]
mod tests;
