//! # sdkport CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! declares `mod common;` and builds its scenario from a `SolutionFixture`:
//!
//! ```text
//! <tmp>/
//! ├── config/                 user config dir (XDG_CONFIG_HOME), empty
//! ├── global/Windows/v8.1/ExtensionSDKs/Foo.Sdk/1.0/
//! │   ├── extension.vsixmanifest
//! │   └── References/CommonConfiguration/neutral/Foo.winmd
//! └── sln/
//!     ├── Demo.sln
//!     ├── .sdkport.toml       default_sdk_roots = <tmp>/global
//!     └── App/App.csproj      <SDKReference Include="Foo.Sdk, Version=1.0" />
//! ```
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper function to create an `assert_cmd::Command` for the compiled `sdkport` binary.
///
/// ## Panics
/// Panics if the `sdkport` binary cannot be found via `Command::cargo_bin`.
pub fn sdkport_cmd() -> Command {
    Command::cargo_bin("sdkport").expect("Failed to find sdkport binary for testing")
}

pub const SDK_INCLUDE: &str = "Foo.Sdk, Version=1.0";

pub const MANIFEST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<PackageManifest Version="2.0.0" xmlns="http://schemas.microsoft.com/developer/vsx-schema/2011">
  <Metadata>
    <Identity Id="Foo.Sdk" Version="1.0" Language="en-US" Publisher="Foo" />
    <DisplayName>Foo SDK</DisplayName>
  </Metadata>
  <Installation Scope="Global" AllUsers="true">
    <InstallationTarget Id="Microsoft.ExtensionSDK" TargetPlatformIdentifier="Windows" TargetPlatformVersion="v8.1" SdkName="Foo.Sdk" SdkVersion="1.0" />
  </Installation>
</PackageManifest>
"#;

pub const PROJECT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Project ToolsVersion="12.0" DefaultTargets="Build" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <PropertyGroup>
    <OutputType>AppContainerExe</OutputType>
  </PropertyGroup>
  <ItemGroup>
    <SDKReference Include="Foo.Sdk, Version=1.0" />
    <Reference Include="System.Xml" />
  </ItemGroup>
</Project>
"#;

/// A temporary solution with one project referencing a globally installed SDK.
pub struct SolutionFixture {
    pub temp: TempDir,
}

impl SolutionFixture {
    pub fn new() -> Self {
        let fixture = Self {
            temp: tempfile::tempdir().expect("Failed to create temp dir"),
        };
        fs::create_dir_all(fixture.config_home()).unwrap();
        fs::create_dir_all(fixture.project().parent().unwrap()).unwrap();
        fs::write(fixture.solution_dir().join("Demo.sln"), "").unwrap();
        fs::write(fixture.project(), PROJECT).unwrap();
        fixture.write_config(&format!(
            "[msbuild]\ndefault_sdk_roots = '{}'\n",
            fixture.global_root().display()
        ));

        let sdk = fixture.global_sdk();
        fs::create_dir_all(sdk.join("References/CommonConfiguration/neutral")).unwrap();
        fs::create_dir_all(sdk.join("Redist/Debug/x86")).unwrap();
        fs::write(sdk.join("extension.vsixmanifest"), MANIFEST).unwrap();
        fs::write(
            sdk.join("References/CommonConfiguration/neutral/Foo.winmd"),
            "winmd",
        )
        .unwrap();
        fixture
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn config_home(&self) -> PathBuf {
        self.path().join("config")
    }

    pub fn global_root(&self) -> PathBuf {
        self.path().join("global")
    }

    pub fn global_sdk(&self) -> PathBuf {
        self.global_root()
            .join("Windows/v8.1/ExtensionSDKs/Foo.Sdk/1.0")
    }

    pub fn solution_dir(&self) -> PathBuf {
        self.path().join("sln")
    }

    pub fn project(&self) -> PathBuf {
        self.solution_dir().join("App/App.csproj")
    }

    /// Where the SDK lands when imported into `root`.
    pub fn local_sdk(&self, root: &Path) -> PathBuf {
        root.join("Windows/v8.1/ExtensionSDKs/Foo.Sdk/1.0")
    }

    pub fn write_config(&self, content: &str) {
        fs::write(self.solution_dir().join(".sdkport.toml"), content).unwrap();
    }

    pub fn project_text(&self) -> String {
        fs::read_to_string(self.project()).unwrap()
    }

    /// `sdkport <subcommand> --project <project>` isolated from the user's config.
    pub fn cmd(&self, subcommand: &str) -> Command {
        let mut cmd = sdkport_cmd();
        cmd.env("XDG_CONFIG_HOME", self.config_home())
            .env_remove("RUST_LOG")
            .current_dir(self.path())
            .arg(subcommand)
            .arg("--project")
            .arg(self.project());
        cmd
    }
}
