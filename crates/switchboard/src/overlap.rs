// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Conservative overlap analysis between rule patterns.
//!
//! Decides whether a later rule could structurally match an input shape a
//! given rule also matches. Non-overlap is only ever proven by a confirmed
//! literal/literal mismatch or incompatible length classes; every other
//! pairing is assumed compatible. The conservative direction is
//! load-bearing: an over-approximation costs one extra fallback link, an
//! under-approximation would silently drop a reachable rule.

use crate::rule::{PatternToken, Rule};

/// Could `a` and `b` both match some input?
pub fn overlaps<C>(a: &[PatternToken<C>], b: &[PatternToken<C>]) -> bool {
    let mut i = 0;
    loop {
        match (a.get(i), b.get(i)) {
            // Both exhausted together: same length class, never proven apart.
            (None, None) => return true,
            // A trailing wildcard absorbs any remainder on the other side.
            (Some(PatternToken::Wildcard), _) | (_, Some(PatternToken::Wildcard)) => return true,
            // Different length classes cannot match the same input.
            (None, Some(_)) | (Some(_), None) => return false,
            (Some(PatternToken::Literal(x)), Some(PatternToken::Literal(y))) => {
                if x != y {
                    return false;
                }
            }
            // Capture/callback/regex against anything: assume compatible.
            (Some(_), Some(_)) => {}
        }
        i += 1;
    }
}

/// Does any later rule overlap the given pattern?
pub fn any_overlap<H, C>(pattern: &[PatternToken<C>], later: &[Rule<H, C>]) -> bool {
    later.iter().any(|rule| overlaps(pattern, &rule.pattern))
}

#[cfg(test)]
#[path = "overlap_tests.rs"]
mod tests;
