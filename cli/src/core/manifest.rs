//! # Extension SDK Manifest Reader
//!
//! File: cli/src/core/manifest.rs
//!
//! ## Overview
//!
//! Every installed Extension SDK carries an `extension.vsixmanifest` next to its
//! `SDKManifest.xml`. Its `InstallationTarget` element names the platform the SDK
//! targets and the SDK's own identity, which together determine where the SDK
//! lives beneath an SDK root:
//!
//! ```text
//! <root>/<TargetPlatformIdentifier>/<TargetPlatformVersion>/ExtensionSDKs/<SdkName>/<SdkVersion>
//! ```
//!
//! ## Behavior
//!
//! - A missing SDK folder, a missing manifest file, or a manifest without an
//!   `InstallationTarget` in the VSX 2011 namespace yields `Ok(None)`: there is
//!   nothing to convert.
//! - Malformed XML and a missing required attribute are errors. Without all five
//!   attributes no destination can be computed.
//!
//! ```rust
//! if let Some(manifest) = manifest::read_manifest(&reference.source_path)? {
//!     println!("{} {}", manifest.sdk_name, manifest.sdk_version);
//! }
//! ```
//!
use crate::common::fs::io;
use crate::core::error::{Result, SdkPortError};
use std::path::Path;
use tracing::debug;

/// File name of the manifest inside an SDK folder.
pub const MANIFEST_FILE_NAME: &str = "extension.vsixmanifest";

/// Namespace of the `InstallationTarget` element.
pub const VSX_NAMESPACE: &str = "http://schemas.microsoft.com/developer/vsx-schema/2011";

const INSTALLATION_TARGET: &str = "InstallationTarget";

/// Identity of an Extension SDK as declared by its manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkManifest {
    pub id: String,
    pub target_platform_identifier: String,
    pub target_platform_version: String,
    pub sdk_name: String,
    pub sdk_version: String,
}

/// Reads `extension.vsixmanifest` from `sdk_dir`.
pub fn read_manifest(sdk_dir: &Path) -> Result<Option<SdkManifest>> {
    let path = sdk_dir.join(MANIFEST_FILE_NAME);
    if !sdk_dir.is_dir() || !path.is_file() {
        debug!("No {} in {}", MANIFEST_FILE_NAME, sdk_dir.display());
        return Ok(None);
    }
    let text = io::read_xml_text(&path)?;
    parse_manifest(&path, &text)
}

/// Parses manifest text; `path` is only used for error messages.
pub fn parse_manifest(path: &Path, text: &str) -> Result<Option<SdkManifest>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let doc = roxmltree::Document::parse(text).map_err(|source| SdkPortError::ManifestXml {
        path: path.to_path_buf(),
        source,
    })?;

    let target = doc.descendants().find(|n| {
        n.is_element()
            && n.tag_name().name() == INSTALLATION_TARGET
            && n.tag_name().namespace() == Some(VSX_NAMESPACE)
    });
    let Some(target) = target else {
        debug!("{} has no {} element", path.display(), INSTALLATION_TARGET);
        return Ok(None);
    };

    let required = |attribute: &str| -> Result<String> {
        target
            .attribute(attribute)
            .map(str::to_string)
            .ok_or_else(|| {
                anyhow::Error::new(SdkPortError::ManifestAttribute {
                    path: path.to_path_buf(),
                    attribute: attribute.to_string(),
                })
            })
    };

    Ok(Some(SdkManifest {
        id: required("Id")?,
        target_platform_identifier: required("TargetPlatformIdentifier")?,
        target_platform_version: required("TargetPlatformVersion")?,
        sdk_name: required("SdkName")?,
        sdk_version: required("SdkVersion")?,
    }))
}
