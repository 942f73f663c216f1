//! # sdkport CLI Status Integration Tests
//!
//! File: cli/tests/status.rs
//!
//! Integration tests for `sdkport status`, which reports the import decisions
//! for a reference without changing anything.
//!

mod common;
use common::*;
use predicates::prelude::*;

fn matches(pattern: &str) -> predicates::str::RegexPredicate {
    predicate::str::is_match(pattern).expect("valid regex")
}

#[test]
fn test_status_before_import() {
    let fx = SolutionFixture::new();
    fx.cmd("status")
        .args(["--reference", "Foo.Sdk"])
        .assert()
        .success()
        .stdout(
            matches(r"Kind:\s+ExtensionSDK")
                .and(matches(r"Import offered:\s+yes"))
                .and(matches(r"SDK:\s+Foo\.Sdk 1\.0 \(Windows v8\.1\)"))
                .and(matches(r"Manifest Id:\s+Microsoft\.ExtensionSDK"))
                .and(matches(r"Local root:\s+\(none\)"))
                .and(matches(r"Destination:\s+.*/sln/Windows/v8\.1/ExtensionSDKs/Foo\.Sdk/1\.0"))
                .and(matches(r"Already imported:\s+no")),
        );

    assert_eq!(fx.project_text(), PROJECT);
    assert!(!fx.solution_dir().join("Windows").exists());
}

#[test]
fn test_status_after_import() {
    let fx = SolutionFixture::new();
    let root = fx.solution_dir().join("libs");
    fx.cmd("import")
        .args(["--reference", "Foo.Sdk"])
        .arg("--root")
        .arg(&root)
        .assert()
        .success();

    fx.cmd("status")
        .args(["--reference", "Foo.Sdk"])
        .assert()
        .success()
        .stdout(
            matches(r"Import offered:\s+no")
                .and(matches(r"Local root:\s+.*/sln/+libs"))
                .and(matches(r"Already imported:\s+yes")),
        );
}

#[test]
fn test_status_for_assembly_reference() {
    let fx = SolutionFixture::new();
    fx.cmd("status")
        .args(["--reference", "System.Xml"])
        .assert()
        .success()
        .stdout(matches(r"Kind:\s+Assembly").and(matches(r"Import offered:\s+no")))
        .stdout(predicate::str::contains("Destination").not());
}
