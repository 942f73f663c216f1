//! # Terminal Interaction (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Command-line implementations of the importer's interactive capabilities:
//!
//! - **`notify`**: `ConsoleNotifier`, printing titled messages to stdout/stderr.
//! - **`prompt`**: `PromptFolderPicker`, asking for the SDK root with `inquire`
//!   unless `--root` or `--yes` already answered the question.
//!
pub mod notify;
pub mod prompt;

pub use notify::ConsoleNotifier;
pub use prompt::PromptFolderPicker;
