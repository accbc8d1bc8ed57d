// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::HashSet;

use super::*;
use crate::rule::CheckOutcome;

fn simple_tokens() -> Vec<PatternToken> {
    vec![
        PatternToken::lit("image"),
        PatternToken::capture("name"),
        PatternToken::Wildcard,
    ]
}

#[test]
fn literals_captures_wildcard_are_simple() {
    assert_eq!(
        classify(&simple_tokens(), &NoDynamicNames),
        PatternKind::Simple
    );
}

#[test]
fn empty_pattern_is_simple() {
    let pattern: Vec<PatternToken> = vec![];
    assert_eq!(classify(&pattern, &NoDynamicNames), PatternKind::Simple);
}

#[test]
fn regex_token_forces_complex() {
    let pattern: Vec<PatternToken> =
        vec![PatternToken::lit("id"), PatternToken::regex("v", "^[0-9]+$")];
    assert_eq!(classify(&pattern, &NoDynamicNames), PatternKind::Complex);
}

#[test]
fn callback_token_forces_complex() {
    let pattern: Vec<PatternToken> = vec![PatternToken::callback(
        "user",
        |_: &str, _: &(), _: &[String]| CheckOutcome::Accept,
    )];
    assert_eq!(classify(&pattern, &NoDynamicNames), PatternKind::Complex);
}

#[test]
fn dynamic_capture_name_forces_complex() {
    let policy: HashSet<String> = ["lang".to_string()].into_iter().collect();
    let pattern: Vec<PatternToken> =
        vec![PatternToken::capture("lang"), PatternToken::lit("about")];
    assert_eq!(classify(&pattern, &policy), PatternKind::Complex);
}

#[test]
fn non_dynamic_capture_stays_simple() {
    let policy: HashSet<String> = ["lang".to_string()].into_iter().collect();
    let pattern: Vec<PatternToken> =
        vec![PatternToken::capture("page"), PatternToken::lit("about")];
    assert_eq!(classify(&pattern, &policy), PatternKind::Simple);
}
