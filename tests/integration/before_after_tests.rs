//! Ordering and return-value behavior of before and after chains

use advice_core::{Advice, AdviceError, AdviceResult};
use advice_tests::{doubling_target, int_arg, CallLog, Tally};
use assert_matches::assert_matches;
use serde_json::{json, Value};

fn adding(
    tally: &Tally,
    log: &CallLog,
    label: &'static str,
    extra: i64,
) -> impl Fn(&[Value]) -> AdviceResult<()> + Send + Sync + 'static {
    let tally = tally.clone();
    let log = log.clone();
    move |args: &[Value]| {
        log.record(label);
        tally.add(int_arg(args) + extra);
        Ok(())
    }
}

#[test]
fn test_before_runs_with_base() {
    let tally = Tally::new();
    let log = CallLog::new();
    let mut target = doubling_target(&tally, &log).advised();
    target.before("fn", adding(&tally, &log, "before", 0)).unwrap();

    assert_eq!(target.call("fn", &[json!(2)]).unwrap(), json!(6));
    assert_eq!(log.count("before"), 1);
    assert_eq!(log.count("base"), 1);
}

#[test]
fn test_before_runs_before_base() {
    let tally = Tally::new();
    let log = CallLog::new();
    let mut target = doubling_target(&tally, &log).advised();
    target.before("fn", adding(&tally, &log, "before", 0)).unwrap();

    target.call("fn", &[json!(4)]).unwrap();
    assert!(log.called_before("before", "base"));
}

#[test]
fn test_multiple_before_latest_first() {
    let tally = Tally::new();
    let log = CallLog::new();
    let mut target = doubling_target(&tally, &log).advised();
    target.before("fn", adding(&tally, &log, "before1", 0)).unwrap();
    target.before("fn", adding(&tally, &log, "before2", 1)).unwrap();

    assert_eq!(target.call("fn", &[json!(3)]).unwrap(), json!(13));
    assert_eq!(log.entries(), vec!["before2", "before1", "base"]);
}

#[test]
fn test_after_runs_with_base() {
    let tally = Tally::new();
    let log = CallLog::new();
    let mut target = doubling_target(&tally, &log).advised();
    target.after("fn", adding(&tally, &log, "after", 0)).unwrap();

    target.call("fn", &[json!(5)]).unwrap();
    assert_eq!(tally.get(), 15);
    assert_eq!(log.count("after"), 1);
}

#[test]
fn test_after_runs_after_base() {
    let tally = Tally::new();
    let log = CallLog::new();
    let mut target = doubling_target(&tally, &log).advised();
    target.after("fn", adding(&tally, &log, "after", 0)).unwrap();

    target.call("fn", &[json!(4)]).unwrap();
    assert!(log.called_before("base", "after"));
}

#[test]
fn test_multiple_after_keep_base_result() {
    let tally = Tally::new();
    let log = CallLog::new();
    let mut target = doubling_target(&tally, &log).advised();
    target.after("fn", adding(&tally, &log, "after1", 0)).unwrap();
    target.after("fn", adding(&tally, &log, "after2", 1)).unwrap();

    // The returned value is the one from the original method
    assert_eq!(target.call("fn", &[json!(4)]).unwrap(), json!(8));
    assert_eq!(tally.get(), 17);
    assert_eq!(log.entries(), vec!["base", "after1", "after2"]);
}

#[test]
fn test_long_chains_preserve_base_result() {
    let tally = Tally::new();
    let log = CallLog::new();
    let mut target = doubling_target(&tally, &log).advised();

    let labels = ["b1", "a1", "b2", "a2", "b3", "a3"];
    for label in labels {
        let log = log.clone();
        let record = move |_: &[Value]| {
            log.record(label);
            Ok(())
        };
        if label.starts_with('b') {
            target.before("fn", record).unwrap();
        } else {
            target.after("fn", record).unwrap();
        }
    }

    assert_eq!(target.call("fn", &[json!(10)]).unwrap(), json!(20));
    assert_eq!(log.entries(), vec!["b3", "b2", "b1", "base", "a1", "a2", "a3"]);
}

#[test]
fn test_interceptors_see_original_arguments() {
    let tally = Tally::new();
    let log = CallLog::new();
    let mut target = doubling_target(&tally, &log).advised();

    for label in ["before", "after"] {
        let log = log.clone();
        let check = move |args: &[Value]| {
            log.record(format!("{label}:{}", args[0]));
            Ok(())
        };
        if label == "before" {
            target.before("fn", check).unwrap();
        } else {
            target.after("fn", check).unwrap();
        }
    }

    target.call("fn", &[json!(7)]).unwrap();
    assert_eq!(log.entries(), vec!["before:7", "base", "after:7"]);
}

#[test]
fn test_registration_on_missing_method_fails() {
    let tally = Tally::new();
    let log = CallLog::new();
    let mut target = doubling_target(&tally, &log).advised();

    assert_matches!(
        target.before("missing", |_| Ok(())),
        Err(AdviceError::Lookup { method }) if method == "missing"
    );
    assert_matches!(target.after("missing", |_| Ok(())), Err(AdviceError::Lookup { .. }));
}
