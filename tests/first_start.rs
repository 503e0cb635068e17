//! Tests for the one-time environment setup ("first start")

use std::cell::RefCell;
use std::rc::Rc;

use paramsuite::harness;
use paramsuite::{
    Builder, FilterSettings, MetadataStore, ParameterizedExpansion, Result, SuiteMetadata,
    TargetConfig, UNDEFINED_FIRST_CLASS,
};

fn pass(_param: &str) -> Result<()> {
    Ok(())
}

fn store_with_first_start(suite: &str, class: &str) -> MetadataStore {
    let mut store = MetadataStore::new();
    store.register(
        suite,
        SuiteMetadata {
            target_config: Some(TargetConfig::new("community")),
            first_start_class: Some(class.to_string()),
        },
    );
    store
}

fn recording_launcher(builder: Builder, calls: &Rc<RefCell<Vec<(String, String)>>>) -> Builder {
    let calls = Rc::clone(calls);
    builder.launcher(move |target, class| {
        calls.borrow_mut().push((target.to_string(), class.to_string()));
        Ok(())
    })
}

#[test]
fn undeclared_first_start_is_a_no_op() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let expansion = ParameterizedExpansion::new()
        .test_class("A", pass)
        .parameter("2023.1");
    let mut suite = recording_launcher(harness::suite("PlainSuite"), &calls)
        .filter_settings(FilterSettings::default())
        .build(expansion);

    assert_eq!(suite.first_start_class_name(), UNDEFINED_FIRST_CLASS);

    let result = suite.first_start();
    assert!(result.is_ok(), "no-op first start failed: {:?}", result);
    assert!(calls.borrow().is_empty(), "launcher must not be invoked");
    assert!(suite.first_start_pending(), "pending flag must stay set");
}

#[test]
fn declared_first_start_invokes_the_launcher_once() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let expansion = ParameterizedExpansion::new()
        .test_class("EditorTest", pass)
        .parameter("2023.1");
    let mut suite = recording_launcher(harness::suite("EditorSuite"), &calls)
        .metadata(store_with_first_start("EditorSuite", "EditorFirstStart"))
        .filter_settings(FilterSettings::default())
        .build(expansion);

    assert_eq!(suite.first_start_class_name(), "EditorFirstStart");
    assert!(suite.first_start_pending());

    let result = suite.first_start();
    assert!(result.is_ok(), "first start failed: {:?}", result);
    assert_eq!(
        calls.borrow().as_slice(),
        [("community".to_string(), "EditorFirstStart".to_string())]
    );
    assert!(!suite.first_start_pending());
}

#[test]
fn launcher_errors_propagate_to_the_caller() {
    let expansion = ParameterizedExpansion::new()
        .test_class("EditorTest", pass)
        .parameter("2023.1");
    let mut suite = harness::suite("EditorSuite")
        .metadata(store_with_first_start("EditorSuite", "EditorFirstStart"))
        .filter_settings(FilterSettings::default())
        .launcher(|target, class| {
            Err(paramsuite::Error::first_start(
                target.as_str(),
                class,
                "application process exited early",
            ))
        })
        .build(expansion);

    let result = suite.first_start();
    assert!(result.is_err(), "launcher failure must propagate");
    assert!(
        suite.first_start_pending(),
        "pending flag must survive a failed first start"
    );
}

#[test]
fn missing_launcher_with_declared_class_is_an_error() {
    let expansion = ParameterizedExpansion::new()
        .test_class("EditorTest", pass)
        .parameter("2023.1");
    let mut suite = harness::suite("EditorSuite")
        .metadata(store_with_first_start("EditorSuite", "EditorFirstStart"))
        .filter_settings(FilterSettings::default())
        .build(expansion);

    let result = suite.first_start();
    assert!(result.is_err(), "missing launcher must propagate an error");
}

#[test]
fn first_start_does_not_guard_against_re_invocation() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let expansion = ParameterizedExpansion::new()
        .test_class("EditorTest", pass)
        .parameter("2023.1");
    let mut suite = recording_launcher(harness::suite("EditorSuite"), &calls)
        .metadata(store_with_first_start("EditorSuite", "EditorFirstStart"))
        .filter_settings(FilterSettings::default())
        .build(expansion);

    suite.first_start().unwrap();
    suite.first_start().unwrap();

    // Not guarding twice-invocation is the caller's obligation.
    assert_eq!(calls.borrow().len(), 2);
}

#[test]
fn first_start_class_name_reads_are_idempotent() {
    let expansion = ParameterizedExpansion::new()
        .test_class("EditorTest", pass)
        .parameter("2023.1");
    let suite = harness::suite("EditorSuite")
        .metadata(store_with_first_start("EditorSuite", "EditorFirstStart"))
        .filter_settings(FilterSettings::default())
        .build(expansion);

    let first = suite.first_start_class_name().to_string();
    for _ in 0..3 {
        assert_eq!(suite.first_start_class_name(), first);
    }
}
