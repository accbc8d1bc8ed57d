mod binder;
pub mod classify;
pub mod compile;
pub mod error;
pub mod matcher;
pub mod overlap;
pub mod parse;
pub mod regex_cache;
pub mod registry;
pub mod rule;

pub use classify::{DynamicNames, NoDynamicNames, PatternKind};
pub use compile::{CallbackRegistry, Compiler};
pub use error::{Error, Result};
pub use matcher::{MatchOutcome, Matcher};
pub use parse::{HandlerSpec, parse_pattern, rules_from_toml};
pub use regex_cache::{CacheStats, RegexCache};
pub use registry::{Dispatch, Registry};
pub use rule::{
    BindValue, Binding, CallbackRef, CaptureSelection, CheckOutcome, Group, PatternToken,
    RegexOptions, Rule, RunOptions, TokenCheck, WILDCARD_NAME,
};
