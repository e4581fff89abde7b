//! Common test utilities shared across the integration suite

pub mod helpers;

// Re-export commonly used items
pub use helpers::*;

use advice_core::{AsyncMethod, Completion, Target};
use serde_json::{json, Value};

/// Target with a single `fn` method that adds `val * 2` to the tally and
/// returns the new total, recording `"base"` in the call log.
pub fn doubling_target(tally: &Tally, log: &CallLog) -> Target {
    let tally = tally.clone();
    let log = log.clone();
    Target::new().with_method("fn", move |args: &[Value]| {
        log.record("base");
        Ok(json!(tally.add(int_arg(args) * 2)))
    })
}

/// Target with an async `base` method that appends `"base"` to the shared
/// text and completes with the text.
pub fn appending_target(text: &SharedText, log: &CallLog) -> Target {
    let text = text.clone();
    let log = log.clone();
    Target::new().with_async_method(
        "base",
        AsyncMethod::from_callback(move |_args, done| {
            log.record("base");
            done.done(Completion::ok([json!(text.append("base"))]));
        }),
    )
}

/// First argument as an integer, zero when absent
pub fn int_arg(args: &[Value]) -> i64 {
    args.first().and_then(Value::as_i64).unwrap_or(0)
}
