//! # sdkport CLI List Integration Tests
//!
//! File: cli/tests/list.rs
//!
//! Integration tests for `sdkport list`.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_list_shows_global_reference() {
    let fx = SolutionFixture::new();
    fx.cmd("list")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"global\s+Foo\.Sdk, Version=1\.0\s+->").unwrap())
        .stdout(predicate::str::contains("System.Xml").not());
}

#[test]
fn test_list_shows_local_after_import() {
    let fx = SolutionFixture::new();
    fx.cmd("import")
        .args(["--reference", "Foo.Sdk", "--yes"])
        .assert()
        .success();

    fx.cmd("list")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"local\s+Foo\.Sdk, Version=1\.0").unwrap());
}

#[test]
fn test_list_marks_missing_sdk() {
    let fx = SolutionFixture::new();
    fs::remove_dir_all(fx.global_root()).unwrap();
    fx.cmd("list")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"missing\s+Foo\.Sdk").unwrap());
}

#[test]
fn test_list_without_sdk_references() {
    let fx = SolutionFixture::new();
    fs::write(fx.project(), "<Project>\n  <ItemGroup>\n    <Reference Include=\"System\" />\n  </ItemGroup>\n</Project>\n").unwrap();
    fx.cmd("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No Extension SDK references"));
}
