//! Tests for error types

use expauto::Error;
use std::error::Error as _;

#[test]
fn test_configuration_error() {
    let error = Error::Configuration("unknown tool kind".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Configuration error"));
    assert!(error_str.contains("unknown tool kind"));
}

#[test]
fn test_target_resolution_error() {
    let error = Error::TargetResolution {
        target: "loop-1".to_string(),
        reason: "no element with this id".to_string(),
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("Target resolution failed"));
    assert!(error_str.contains("loop-1"));
    assert!(error_str.contains("no element with this id"));
}

#[test]
fn test_application_error() {
    let error = Error::Application {
        target: "users".to_string(),
        value: -4,
        reason: "population must be at least 1".to_string(),
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("Cannot apply value -4"));
    assert!(error_str.contains("users"));
}

#[test]
fn test_load_error() {
    let error = Error::Load("duplicate element id 'cpu'".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Model load error"));
    assert!(error_str.contains("cpu"));
}

#[test]
fn test_persist_error() {
    let error = Error::Persist("disk full".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Persist error"));
    assert!(error_str.contains("unreliable"));
}

#[test]
fn test_workspace_and_tool_errors() {
    assert!(format!("{}", Error::Workspace("x".into())).contains("Workspace error"));
    assert!(format!("{}", Error::Tool("exit 3".into())).contains("Tool failure: exit 3"));
}

#[test]
fn test_simulation_error_chains_source() {
    let error = Error::Simulation {
        label: "(exp-1, sim) Sweep sim".to_string(),
        repetition: 2,
        source: Box::new(Error::Tool("segfault".to_string())),
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("repetition 2"));
    assert!(!error_str.contains("segfault"));
    assert!(error.source().unwrap().to_string().contains("segfault"));
}

#[test]
fn test_combination_context() {
    let error = Error::Persist("denied".to_string()).in_combination(
        "(exp-1, sim) Sweep",
        "sim",
        "loops=3, users=10",
    );
    let error_str = format!("{error}");
    assert!(error_str.contains("(exp-1, sim) Sweep"));
    assert!(error_str.contains("'sim'"));
    assert!(error_str.contains("[loops=3, users=10]"));
    assert!(matches!(error.root_cause(), Error::Persist(_)));
}

#[test]
fn test_chain_names_each_cause_once() {
    let error = Error::Simulation {
        label: "(exp-1, sim) Sweep sim".to_string(),
        repetition: 1,
        source: Box::new(Error::Tool("exit 3".to_string())),
    }
    .in_combination("(exp-1, sim) Sweep", "sim", "loops=1");

    let mut rendered = Vec::new();
    let mut current: Option<&dyn std::error::Error> = Some(&error);
    while let Some(cause) = current {
        rendered.push(cause.to_string());
        current = cause.source();
    }

    assert_eq!(rendered.len(), 3);
    let joined = rendered.join(": ");
    assert_eq!(joined.matches("exit 3").count(), 1);
    assert_eq!(joined.matches("repetition 1").count(), 1);
    assert_eq!(joined.matches("loops=1").count(), 1);
}

#[test]
fn test_root_cause_of_plain_error_is_itself() {
    let error = Error::Other("plain".to_string());
    assert!(matches!(error.root_cause(), Error::Other(msg) if msg == "plain"));
}

#[test]
fn test_io_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error: Error = io_error.into();
    let error_str = format!("{error}");
    assert!(error_str.contains("IO error"));
}

#[test]
fn test_json_error_conversion() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: Error = json_error.into();
    assert!(format!("{error}").contains("JSON error"));
}

#[test]
fn test_error_debug_format() {
    let error = Error::Configuration("debug test".to_string());
    let debug_str = format!("{error:?}");
    assert!(debug_str.contains("Configuration"));
}
