// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Named installation and invocation of compiled matchers.
//!
//! Install is atomic: a matcher is either fully built and visible under
//! its name or not visible at all. Matching through the registry is
//! read-only; any number of callers may dispatch concurrently. Versioning
//! and purge policy stay with the host.

use std::sync::Arc;

use dashmap::DashMap;

use crate::matcher::{MatchOutcome, Matcher};
use crate::rule::Binding;

/// Outcome of dispatching through the registry, owned so it can outlive
/// the registry lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch<H> {
    /// First matching rule's name, handler payload, and bindings.
    Matched {
        rule: String,
        handler: H,
        bindings: Vec<Binding>,
    },
    /// The named matcher exists but no rule matched.
    Fail,
}

/// Registry of compiled matchers keyed by name.
pub struct Registry<H, C = ()> {
    inner: DashMap<String, Arc<Matcher<H, C>>>,
}

impl<H, C> Registry<H, C> {
    pub fn new() -> Self {
        Self {
            inner: DashMap::new(),
        }
    }

    /// Install a matcher under a name, atomically replacing any previous
    /// matcher under the same name.
    pub fn install(&self, name: impl Into<String>, matcher: Arc<Matcher<H, C>>) {
        let name = name.into();
        tracing::debug!("installing matcher '{}' ({} stages)", name, matcher.stage_count());
        self.inner.insert(name, matcher);
    }

    /// Remove a named matcher. Returns whether one was installed.
    pub fn remove(&self, name: &str) -> bool {
        self.inner.remove(name).is_some()
    }

    /// Fetch the matcher installed under a name.
    pub fn get(&self, name: &str) -> Option<Arc<Matcher<H, C>>> {
        self.inner.get(name).map(|entry| Arc::clone(&entry))
    }

    /// Installed names, in no particular order.
    pub fn names(&self) -> Vec<String> {
        self.inner.iter().map(|e| e.key().clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<H: Clone, C> Registry<H, C> {
    /// Invoke the matcher installed under `name`.
    ///
    /// `None` means no matcher is installed under that name, distinct from
    /// an installed matcher returning [`Dispatch::Fail`].
    pub fn dispatch<S: AsRef<str>>(
        &self,
        name: &str,
        tokens: &[S],
        ctx: &C,
    ) -> Option<Dispatch<H>> {
        let matcher = self.get(name)?;
        Some(match matcher.matches(tokens, ctx) {
            MatchOutcome::Matched { rule, bindings } => Dispatch::Matched {
                rule: rule.name.clone(),
                handler: rule.handler.clone(),
                bindings,
            },
            MatchOutcome::Fail => Dispatch::Fail,
        })
    }
}

impl<H, C> Default for Registry<H, C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
