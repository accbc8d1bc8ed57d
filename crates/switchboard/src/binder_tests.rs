// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use regex::Regex;

use super::*;

fn lit(text: &str) -> Check<()> {
    Check::Lit(text.to_string())
}

fn var(name: &str) -> Check<()> {
    Check::Var(name.to_string())
}

fn re(name: &str, source: &str) -> Check<()> {
    re_with(name, source, RunOptions::default())
}

fn re_with(name: &str, source: &str, run: RunOptions) -> Check<()> {
    Check::Regex {
        name: name.to_string(),
        regex: Arc::new(Regex::new(source).unwrap()),
        run,
    }
}

fn cb<C>(name: &str, check: impl TokenCheck<C> + 'static) -> Check<C> {
    Check::Callback {
        name: name.to_string(),
        check: Arc::new(check),
        args: Vec::new(),
    }
}

fn binding(name: &str, value: BindValue) -> Binding {
    Binding::new(name, value)
}

#[test]
fn empty_checks_match_empty_tokens() {
    let checks: Vec<Check<()>> = vec![];
    assert_eq!(bind(&checks, &[], &()), Some(vec![]));
}

#[test]
fn empty_checks_reject_leftover_tokens() {
    let checks: Vec<Check<()>> = vec![];
    assert_eq!(bind(&checks, &["a"], &()), None);
}

#[test]
fn leftover_checks_reject_exhausted_tokens() {
    let checks = vec![lit("a"), var("x")];
    assert_eq!(bind(&checks, &["a"], &()), None);
}

#[test]
fn literal_consumes_without_binding() {
    let checks = vec![lit("a"), var("x")];
    let bindings = bind(&checks, &["a", "b"], &()).unwrap();
    assert_eq!(bindings, vec![binding("x", BindValue::token("b"))]);
}

#[test]
fn literal_mismatch_fails() {
    let checks = vec![lit("a")];
    assert_eq!(bind(&checks, &["b"], &()), None);
}

#[test]
fn bindings_keep_encounter_order() {
    let checks = vec![var("first"), lit("mid"), var("second")];
    let bindings = bind(&checks, &["1", "mid", "2"], &()).unwrap();
    assert_eq!(
        bindings,
        vec![
            binding("first", BindValue::token("1")),
            binding("second", BindValue::token("2")),
        ]
    );
}

#[test]
fn sole_trailing_wildcard_matches_zero_tokens() {
    let checks = vec![lit("image"), Check::Tail];
    let bindings = bind(&checks, &["image"], &()).unwrap();
    assert_eq!(bindings, vec![binding("*", BindValue::Tokens(vec![]))]);
}

#[test]
fn wildcard_binds_all_remaining_tokens() {
    let checks = vec![lit("image"), Check::Tail];
    let bindings = bind(&checks, &["image", "foo", "bar"], &()).unwrap();
    assert_eq!(
        bindings,
        vec![binding("*", BindValue::tokens(["foo", "bar"]))]
    );
}

#[test]
fn lone_wildcard_matches_everything() {
    let checks: Vec<Check<()>> = vec![Check::Tail];
    let bindings = bind(&checks, &[], &()).unwrap();
    assert_eq!(bindings, vec![binding("*", BindValue::Tokens(vec![]))]);
}

#[test]
fn callback_accept_binds_the_token() {
    let checks = vec![cb("user", |token: &str, _: &(), _: &[String]| {
        if token == "foo" {
            CheckOutcome::Accept
        } else {
            CheckOutcome::Reject
        }
    })];
    let bindings = bind(&checks, &["foo"], &()).unwrap();
    assert_eq!(bindings, vec![binding("user", BindValue::token("foo"))]);
    assert_eq!(bind(&checks, &["bar"], &()), None);
}

#[test]
fn callback_replace_binds_the_substitute() {
    let checks = vec![cb("id", |_: &str, _: &(), _: &[String]| {
        CheckOutcome::Replace(BindValue::token("42"))
    })];
    let bindings = bind(&checks, &["anything"], &()).unwrap();
    assert_eq!(bindings, vec![binding("id", BindValue::token("42"))]);
}

#[test]
fn callback_sees_context_and_args() {
    struct Ctx {
        allowed: String,
    }
    let checks = vec![Check::Callback {
        name: "user".to_string(),
        check: Arc::new(|token: &str, ctx: &Ctx, args: &[String]| {
            if token == ctx.allowed && args == ["strict"] {
                CheckOutcome::Accept
            } else {
                CheckOutcome::Reject
            }
        }),
        args: vec!["strict".to_string()],
    }];
    let ctx = Ctx {
        allowed: "alice".to_string(),
    };
    assert!(bind(&checks, &["alice"], &ctx).is_some());
    assert_eq!(bind(&checks, &["bob"], &ctx), None);
}

#[test]
fn regex_without_selection_binds_the_original_token() {
    let checks = vec![lit("id"), re("v", "^[0-9]+$")];
    let bindings = bind(&checks, &["id", "1234"], &()).unwrap();
    assert_eq!(bindings, vec![binding("v", BindValue::token("1234"))]);
}

#[test]
fn regex_no_match_fails_the_bind() {
    let checks = vec![lit("id"), re("v", "^[0-9]+$")];
    assert_eq!(bind(&checks, &["id", "bar"], &()), None);
}

#[test]
fn regex_single_group_binds_that_group() {
    let checks = vec![re_with(
        "v",
        "^([a-z]+)-([0-9]+)$",
        RunOptions::group(Group::Index(2)),
    )];
    let bindings = bind(&checks, &["build-77"], &()).unwrap();
    assert_eq!(bindings, vec![binding("v", BindValue::token("77"))]);
}

#[test]
fn regex_named_group_binds_by_name() {
    let checks = vec![re_with(
        "v",
        "^(?P<word>[a-z]+)-[0-9]+$",
        RunOptions::group(Group::Name("word".to_string())),
    )];
    let bindings = bind(&checks, &["build-77"], &()).unwrap();
    assert_eq!(bindings, vec![binding("v", BindValue::token("build"))]);
}

#[test]
fn regex_multiple_groups_bind_an_ordered_list() {
    let checks = vec![re_with(
        "v",
        "^([a-z]+)-([0-9]+)$",
        RunOptions::groups([Group::Index(1), Group::Index(2)]),
    )];
    let bindings = bind(&checks, &["build-77"], &()).unwrap();
    assert_eq!(
        bindings,
        vec![binding("v", BindValue::tokens(["build", "77"]))]
    );
}

#[test]
fn regex_unmatched_group_fails_the_bind() {
    let checks = vec![re_with(
        "v",
        "^(?:(a)|(b))$",
        RunOptions::group(Group::Index(1)),
    )];
    assert!(bind(&checks, &["a"], &()).is_some());
    // Group 1 did not participate when alternative (b) matched.
    assert_eq!(bind(&checks, &["b"], &()), None);
}
