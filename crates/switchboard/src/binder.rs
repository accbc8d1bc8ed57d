// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime binder: pairwise evaluation of resolved checks against tokens.
//!
//! Only clauses compiled from complex patterns reach the binder. Checks are
//! already resolved (regexes compiled, callbacks looked up), so evaluation
//! never reinterprets rule data. The protocol is total: it terminates in
//! either a binding list or a failure.

use std::sync::Arc;

use regex::Regex;

use crate::rule::{
    BindValue, Binding, CaptureSelection, CheckOutcome, Group, RunOptions, TokenCheck,
    WILDCARD_NAME,
};

/// One resolved check, paired with one token position at match time.
pub(crate) enum Check<C> {
    /// Token must equal the text; consumes without binding.
    Lit(String),
    /// Binds the token unconditionally.
    Var(String),
    /// Binds `*` to all remaining tokens; always the final check.
    Tail,
    /// External callback validates the token.
    Callback {
        name: String,
        check: Arc<dyn TokenCheck<C>>,
        args: Vec<String>,
    },
    /// Pre-compiled regex validates the token.
    Regex {
        name: String,
        regex: Arc<Regex>,
        run: RunOptions,
    },
}

/// Evaluate checks against tokens, left to right, short-circuiting on the
/// first failure. Bindings are reported in encounter order.
pub(crate) fn bind<C>(checks: &[Check<C>], tokens: &[&str], ctx: &C) -> Option<Vec<Binding>> {
    let mut bindings = Vec::new();
    for (i, check) in checks.iter().enumerate() {
        if matches!(check, Check::Tail) {
            // Succeeds against any remainder, including none.
            let rest: Vec<String> = tokens
                .get(i..)
                .unwrap_or(&[])
                .iter()
                .map(|t| t.to_string())
                .collect();
            bindings.push(Binding::new(WILDCARD_NAME, BindValue::Tokens(rest)));
            return Some(bindings);
        }
        // Checks remain but tokens are exhausted.
        let token = *tokens.get(i)?;
        match check {
            Check::Tail => {}
            Check::Lit(text) => {
                if token != text {
                    return None;
                }
            }
            Check::Var(name) => {
                bindings.push(Binding::new(name.clone(), BindValue::token(token)));
            }
            Check::Callback { name, check, args } => match check.check(token, ctx, args) {
                CheckOutcome::Accept => {
                    bindings.push(Binding::new(name.clone(), BindValue::token(token)));
                }
                CheckOutcome::Replace(value) => {
                    bindings.push(Binding::new(name.clone(), value));
                }
                CheckOutcome::Reject => return None,
            },
            Check::Regex { name, regex, run } => {
                let value = eval_regex(regex, run, token)?;
                bindings.push(Binding::new(name.clone(), value));
            }
        }
    }
    // Tokens remain but checks are exhausted.
    if tokens.len() > checks.len() {
        return None;
    }
    Some(bindings)
}

/// Run a regex check and select the bound value.
///
/// No explicit selection binds the original token; one requested group
/// binds that group's value; several bind the ordered list. A requested
/// group that did not participate in the match fails the bind.
fn eval_regex(regex: &Regex, run: &RunOptions, token: &str) -> Option<BindValue> {
    match &run.capture {
        CaptureSelection::WholeToken => {
            regex.is_match(token).then(|| BindValue::token(token))
        }
        CaptureSelection::Groups(groups) if groups.is_empty() => {
            regex.is_match(token).then(|| BindValue::token(token))
        }
        CaptureSelection::Groups(groups) => {
            let caps = regex.captures(token)?;
            let mut values = Vec::with_capacity(groups.len());
            for group in groups {
                let m = match group {
                    Group::Index(i) => caps.get(*i),
                    Group::Name(n) => caps.name(n),
                }?;
                values.push(m.as_str().to_string());
            }
            match values.len() {
                1 => values.pop().map(BindValue::Token),
                _ => Some(BindValue::Tokens(values)),
            }
        }
    }
}

#[cfg(test)]
#[path = "binder_tests.rs"]
mod tests;
