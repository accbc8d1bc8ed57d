// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::compile::Compiler;
use crate::rule::{BindValue, PatternToken, Rule};

fn matcher(rules: Vec<Rule<&'static str>>) -> Arc<Matcher<&'static str>> {
    Arc::new(Compiler::new().compile(rules).unwrap())
}

#[test]
fn dispatch_returns_rule_handler_and_bindings() {
    let registry = Registry::new();
    registry.install(
        "site",
        matcher(vec![Rule::new(
            "img",
            vec![PatternToken::lit("image"), PatternToken::capture("name")],
            "serve_image",
        )]),
    );

    let outcome = registry.dispatch("site", &["image", "logo"], &()).unwrap();
    match outcome {
        Dispatch::Matched {
            rule,
            handler,
            bindings,
        } => {
            assert_eq!(rule, "img");
            assert_eq!(handler, "serve_image");
            assert_eq!(
                bindings,
                vec![Binding::new("name", BindValue::token("logo"))]
            );
        }
        Dispatch::Fail => panic!("expected a match"),
    }
}

#[test]
fn dispatch_distinguishes_missing_matcher_from_no_match() {
    let registry = Registry::new();
    registry.install("site", matcher(vec![]));

    assert!(registry.dispatch("nowhere", &["a"], &()).is_none());
    assert_eq!(
        registry.dispatch("site", &["a"], &()),
        Some(Dispatch::Fail)
    );
}

#[test]
fn install_replaces_atomically() {
    let registry = Registry::new();
    registry.install(
        "site",
        matcher(vec![Rule::new("old", vec![PatternToken::lit("a")], "old")]),
    );
    registry.install(
        "site",
        matcher(vec![Rule::new("new", vec![PatternToken::lit("a")], "new")]),
    );
    assert_eq!(registry.len(), 1);
    match registry.dispatch("site", &["a"], &()).unwrap() {
        Dispatch::Matched { handler, .. } => assert_eq!(handler, "new"),
        Dispatch::Fail => panic!("expected a match"),
    }
}

#[test]
fn remove_uninstalls() {
    let registry = Registry::new();
    registry.install("site", matcher(vec![]));
    assert!(registry.remove("site"));
    assert!(!registry.remove("site"));
    assert!(registry.is_empty());
    assert!(registry.get("site").is_none());
}

#[test]
fn names_lists_installed_matchers() {
    let registry = Registry::new();
    registry.install("a", matcher(vec![]));
    registry.install("b", matcher(vec![]));
    let mut names = registry.names();
    names.sort();
    assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn concurrent_dispatch_needs_no_coordination() {
    let registry = Arc::new(Registry::new());
    registry.install(
        "site",
        matcher(vec![Rule::new(
            "rest",
            vec![PatternToken::Wildcard],
            "handler",
        )]),
    );
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                for _ in 0..100 {
                    let outcome = registry.dispatch("site", &["x", "y"], &()).unwrap();
                    assert!(matches!(outcome, Dispatch::Matched { .. }));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
