//! Environment Property Tests
//!
//! Observable guarantees of the three constructors, exercised through the facade

use cmdenv::{for_null, for_process, for_testing, FileMode, FsError, KIND_VARIABLE};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;

/// Property 1: the kind marker matches the constructor
#[test]
fn test_kind_marker_per_constructor() {
    assert_eq!(for_process().variables[KIND_VARIABLE], "cli");
    assert_eq!(for_testing(None).variables[KIND_VARIABLE], "testing");
    assert!(for_null().variables.get(KIND_VARIABLE).is_none());
}

/// Property 2: output drains exactly what was written, then nothing
#[test]
fn test_drain_returns_written_bytes_once() {
    let mut env = for_testing(None);
    let payload: Vec<u8> = (0u8..=255).collect();

    env.output.write_all(&payload).unwrap();

    assert_eq!(env.drain_output(), payload);
    assert_eq!(env.drain_output(), Vec::<u8>::new());
}

/// Property 3: absent randomness is accepted and stays absent
#[test]
fn test_testing_without_randomness() {
    let env = for_testing(None);
    assert!(env.randomness.is_none());

    let env = for_testing(Some(Box::new(StdRng::seed_from_u64(1))));
    assert!(env.randomness.is_some());
}

/// Property 4: the null environment swallows everything
#[test]
fn test_null_environment_discards() {
    let mut env = for_null();

    env.output.write_all(b"not kept").unwrap();
    env.error.write_all(b"not kept").unwrap();
    env.input.write_all(b"not kept").unwrap();

    assert!(env.drain_output().is_empty());
    assert!(env.drain_error().is_empty());
    assert!(env.drain_input().is_empty());

    assert!(env.filesystem.open("anything").unwrap().is_none());
    assert!(env.filesystem.stat("anything").unwrap().is_none());
    assert!(env.filesystem.read_dir("anything").unwrap().is_none());
    assert!(env.filesystem.read_file("anything").unwrap().is_none());
    assert!(env.filesystem.remove("anything").is_ok());
}

/// Property 5: testing environments never share state
#[test]
fn test_testing_environments_are_isolated() {
    let mut first = for_testing(None);
    let mut second = for_testing(None);

    first
        .filesystem
        .write_file("cache/db.json", b"{\"k\":1}", FileMode::DEFAULT_FILE)
        .unwrap();
    first.output.write_all(b"first").unwrap();

    assert!(matches!(
        second.filesystem.read_file("cache/db.json"),
        Err(FsError::NotFound(_))
    ));
    assert!(second.drain_output().is_empty());
    assert_eq!(first.drain_output(), b"first");
}

/// Property 6: arguments are the real argv for process, empty otherwise
#[test]
fn test_arguments_per_constructor() {
    let real: Vec<String> = std::env::args().collect();
    let env = for_process();

    assert!(!env.arguments.is_empty());
    assert_eq!(env.arguments, real);
    assert!(for_testing(None).arguments.is_empty());
    assert!(for_null().arguments.is_empty());
}
