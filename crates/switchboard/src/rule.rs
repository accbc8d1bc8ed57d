// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rule and pattern token model.
//!
//! A dispatch rule is a name, an ordered token pattern, and an opaque
//! handler payload carried through compilation untouched. Pattern tokens
//! are a closed variant set; the compiler resolves each variant into a
//! typed runtime representation exactly once.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Reserved binding name for the tail wildcard.
pub const WILDCARD_NAME: &str = "*";

/// Outcome of a callback check against a single token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Token is valid; bind it as-is.
    Accept,
    /// Token is invalid; the whole bind fails.
    Reject,
    /// Token is valid; bind the substitute value instead.
    Replace(BindValue),
}

/// A validation check applied to one token at match time.
///
/// Callbacks must report failure via [`CheckOutcome::Reject`]. A panicking
/// callback is not caught by the core; the panic propagates to the caller
/// of the match.
pub trait TokenCheck<C>: Send + Sync {
    /// Validate `token`, with the caller's opaque context and the fixed
    /// extra arguments configured on the pattern token.
    fn check(&self, token: &str, ctx: &C, args: &[String]) -> CheckOutcome;
}

impl<C, F> TokenCheck<C> for F
where
    F: Fn(&str, &C, &[String]) -> CheckOutcome + Send + Sync,
{
    fn check(&self, token: &str, ctx: &C, args: &[String]) -> CheckOutcome {
        self(token, ctx, args)
    }
}

/// Reference to a callback: a registry name resolved at compile time, or
/// an inline check supplied with the rule.
pub enum CallbackRef<C> {
    /// Looked up in the compiler's callback registry, e.g. `"auth::is_user"`.
    Named(String),
    /// Supplied directly on the pattern token.
    Inline(Arc<dyn TokenCheck<C>>),
}

impl<C> Clone for CallbackRef<C> {
    fn clone(&self) -> Self {
        match self {
            CallbackRef::Named(name) => CallbackRef::Named(name.clone()),
            CallbackRef::Inline(check) => CallbackRef::Inline(Arc::clone(check)),
        }
    }
}

impl<C> fmt::Debug for CallbackRef<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallbackRef::Named(name) => f.debug_tuple("Named").field(name).finish(),
            CallbackRef::Inline(_) => f.write_str("Inline(..)"),
        }
    }
}

impl<C> PartialEq for CallbackRef<C> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CallbackRef::Named(a), CallbackRef::Named(b)) => a == b,
            (CallbackRef::Inline(a), CallbackRef::Inline(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// One position of a rule pattern.
pub enum PatternToken<C = ()> {
    /// Token must equal the text exactly.
    Literal(String),
    /// Binds any single token to the name, unconditionally.
    Capture(String),
    /// Binds all remaining tokens (zero or more) to `*`. Only legal in
    /// final position; enforced at compile time.
    Wildcard,
    /// Binds `name` after an external callback validates the token.
    Callback {
        name: String,
        callback: CallbackRef<C>,
        args: Vec<String>,
    },
    /// Binds `name` (or selected capture groups) after a regex match.
    Regex {
        name: String,
        source: String,
        options: RegexOptions,
        run: RunOptions,
    },
}

impl<C> PatternToken<C> {
    /// Literal segment.
    pub fn lit(text: impl Into<String>) -> Self {
        PatternToken::Literal(text.into())
    }

    /// Unconditional single-token capture.
    pub fn capture(name: impl Into<String>) -> Self {
        PatternToken::Capture(name.into())
    }

    /// Regex check with default compile and run options.
    pub fn regex(name: impl Into<String>, source: impl Into<String>) -> Self {
        PatternToken::Regex {
            name: name.into(),
            source: source.into(),
            options: RegexOptions::default(),
            run: RunOptions::default(),
        }
    }

    /// Regex check with explicit compile and run options.
    pub fn regex_with(
        name: impl Into<String>,
        source: impl Into<String>,
        options: RegexOptions,
        run: RunOptions,
    ) -> Self {
        PatternToken::Regex {
            name: name.into(),
            source: source.into(),
            options,
            run,
        }
    }

    /// Inline callback check with no extra arguments.
    pub fn callback(name: impl Into<String>, check: impl TokenCheck<C> + 'static) -> Self {
        PatternToken::Callback {
            name: name.into(),
            callback: CallbackRef::Inline(Arc::new(check)),
            args: Vec::new(),
        }
    }

    /// Callback check resolved from the compiler's registry by name.
    pub fn callback_named(name: impl Into<String>, callback: impl Into<String>) -> Self {
        PatternToken::Callback {
            name: name.into(),
            callback: CallbackRef::Named(callback.into()),
            args: Vec::new(),
        }
    }

    /// Attach fixed extra arguments to a callback token.
    ///
    /// No effect on other token kinds.
    pub fn with_args(mut self, extra: impl IntoIterator<Item = impl Into<String>>) -> Self {
        if let PatternToken::Callback { args, .. } = &mut self {
            args.extend(extra.into_iter().map(Into::into));
        }
        self
    }

    /// Name bound on a successful match, if this token binds one.
    pub fn binding_name(&self) -> Option<&str> {
        match self {
            PatternToken::Literal(_) => None,
            PatternToken::Capture(name) => Some(name),
            PatternToken::Wildcard => Some(WILDCARD_NAME),
            PatternToken::Callback { name, .. } => Some(name),
            PatternToken::Regex { name, .. } => Some(name),
        }
    }
}

impl<C> Clone for PatternToken<C> {
    fn clone(&self) -> Self {
        match self {
            PatternToken::Literal(text) => PatternToken::Literal(text.clone()),
            PatternToken::Capture(name) => PatternToken::Capture(name.clone()),
            PatternToken::Wildcard => PatternToken::Wildcard,
            PatternToken::Callback {
                name,
                callback,
                args,
            } => PatternToken::Callback {
                name: name.clone(),
                callback: callback.clone(),
                args: args.clone(),
            },
            PatternToken::Regex {
                name,
                source,
                options,
                run,
            } => PatternToken::Regex {
                name: name.clone(),
                source: source.clone(),
                options: options.clone(),
                run: run.clone(),
            },
        }
    }
}

impl<C> fmt::Debug for PatternToken<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternToken::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            PatternToken::Capture(name) => f.debug_tuple("Capture").field(name).finish(),
            PatternToken::Wildcard => f.write_str("Wildcard"),
            PatternToken::Callback {
                name,
                callback,
                args,
            } => f
                .debug_struct("Callback")
                .field("name", name)
                .field("callback", callback)
                .field("args", args)
                .finish(),
            PatternToken::Regex {
                name,
                source,
                options,
                run,
            } => f
                .debug_struct("Regex")
                .field("name", name)
                .field("source", source)
                .field("options", options)
                .field("run", run)
                .finish(),
        }
    }
}

impl<C> PartialEq for PatternToken<C> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PatternToken::Literal(a), PatternToken::Literal(b)) => a == b,
            (PatternToken::Capture(a), PatternToken::Capture(b)) => a == b,
            (PatternToken::Wildcard, PatternToken::Wildcard) => true,
            (
                PatternToken::Callback {
                    name: an,
                    callback: ac,
                    args: aa,
                },
                PatternToken::Callback {
                    name: bn,
                    callback: bc,
                    args: ba,
                },
            ) => an == bn && ac == bc && aa == ba,
            (
                PatternToken::Regex {
                    name: an,
                    source: asrc,
                    options: aopt,
                    run: arun,
                },
                PatternToken::Regex {
                    name: bn,
                    source: bsrc,
                    options: bopt,
                    run: brun,
                },
            ) => an == bn && asrc == bsrc && aopt == bopt && arun == brun,
            _ => false,
        }
    }
}

/// A dispatch rule: name, token pattern, opaque handler payload.
///
/// `H` is never inspected; it is returned as-is when the rule matches.
/// `C` is the opaque context type threaded into callbacks.
pub struct Rule<H, C = ()> {
    pub name: String,
    pub pattern: Vec<PatternToken<C>>,
    pub handler: H,
}

impl<H, C> Rule<H, C> {
    pub fn new(name: impl Into<String>, pattern: Vec<PatternToken<C>>, handler: H) -> Self {
        Self {
            name: name.into(),
            pattern,
            handler,
        }
    }
}

impl<H: Clone, C> Clone for Rule<H, C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            pattern: self.pattern.clone(),
            handler: self.handler.clone(),
        }
    }
}

impl<H: fmt::Debug, C> fmt::Debug for Rule<H, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .field("handler", &self.handler)
            .finish()
    }
}

/// Value bound to a name by a successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    /// A single token (or a single selected capture group).
    Token(String),
    /// A token list: the wildcard remainder, or multiple selected groups.
    Tokens(Vec<String>),
}

impl BindValue {
    pub fn token(value: impl Into<String>) -> Self {
        BindValue::Token(value.into())
    }

    pub fn tokens(values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        BindValue::Tokens(values.into_iter().map(Into::into).collect())
    }
}

/// One name→value pair extracted by a match, in encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub name: String,
    pub value: BindValue,
}

impl Binding {
    pub fn new(name: impl Into<String>, value: BindValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Regex compile options. Part of the regex cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RegexOptions {
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_matches_new_line: bool,
    pub ignore_whitespace: bool,
    pub unicode: bool,
}

impl Default for RegexOptions {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            multi_line: false,
            dot_matches_new_line: false,
            ignore_whitespace: false,
            unicode: true,
        }
    }
}

/// Per-evaluation regex options. Never part of the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunOptions {
    pub capture: CaptureSelection,
}

impl RunOptions {
    /// Select a single capture group.
    pub fn group(group: Group) -> Self {
        Self {
            capture: CaptureSelection::Groups(vec![group]),
        }
    }

    /// Select multiple capture groups, bound as an ordered list.
    pub fn groups(groups: impl IntoIterator<Item = Group>) -> Self {
        Self {
            capture: CaptureSelection::Groups(groups.into_iter().collect()),
        }
    }
}

/// Which part of a regex match becomes the bound value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CaptureSelection {
    /// No explicit selection: bind the original token.
    #[default]
    WholeToken,
    /// One group binds that group's value; several bind the ordered list.
    Groups(Vec<Group>),
}

/// A capture group reference, by index or by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Group {
    Index(usize),
    Name(String),
}

#[cfg(test)]
#[path = "rule_tests.rs"]
mod tests;
