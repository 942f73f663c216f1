//! # Folder Prompt
//!
//! File: cli/src/common/ui/prompt.rs
//!
//! ## Overview
//!
//! `PromptFolderPicker` answers the importer's "where should the SDK go?"
//! question. The answer comes from, in order:
//!
//! 1. an explicit `--root` folder;
//! 2. the default (configured `import.default_root`, else the solution
//!    directory) when `--yes` was given;
//! 3. an interactive `inquire` text prompt pre-filled with that default, when
//!    stdin is a terminal.
//!
//! Pressing Esc or Ctrl-C in the prompt cancels the import. Without a terminal
//! the prompt cannot be shown, which is an error telling the user to pass
//! `--root` or `--yes`.
//!
use crate::core::error::{Result, SdkPortError};
use crate::core::host::FolderPicker;
use inquire::{InquireError, Text};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct PromptFolderPicker {
    root: Option<PathBuf>,
    assume_default: bool,
    configured_default: Option<PathBuf>,
}

impl PromptFolderPicker {
    pub fn new(root: Option<PathBuf>, assume_default: bool, configured_default: Option<PathBuf>) -> Self {
        Self {
            root,
            assume_default,
            configured_default,
        }
    }

    fn default_for<'a>(&'a self, offered: &'a Path) -> &'a Path {
        self.configured_default.as_deref().unwrap_or(offered)
    }
}

impl FolderPicker for PromptFolderPicker {
    /// `offered` is the solution directory; relative answers are resolved against it.
    fn pick_folder(&self, description: &str, offered: &Path) -> Result<Option<PathBuf>> {
        if let Some(root) = &self.root {
            debug!("Using SDK root from the command line: {}", root.display());
            return Ok(Some(root.clone()));
        }
        let default = self.default_for(offered);
        if self.assume_default {
            debug!("Using default SDK root {}", default.display());
            return Ok(Some(default.to_path_buf()));
        }

        if !std::io::stdin().is_terminal() {
            return Err(no_terminal());
        }

        let default_text = default.to_string_lossy();
        let answer = Text::new("SDK folder:")
            .with_default(&default_text)
            .with_help_message(description)
            .prompt();

        match answer {
            Ok(text) if text.trim().is_empty() => Ok(Some(default.to_path_buf())),
            Ok(text) => {
                let expanded = shellexpand::tilde(text.trim()).into_owned();
                Ok(Some(offered.join(expanded)))
            }
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
            Err(InquireError::NotTTY) => Err(no_terminal()),
            Err(e) => Err(SdkPortError::Prompt(e.to_string()).into()),
        }
    }
}

fn no_terminal() -> anyhow::Error {
    SdkPortError::Prompt(
        "no terminal available to ask for the SDK folder; pass --root <DIR> or --yes".to_string(),
    )
    .into()
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_root_wins() -> Result<()> {
        let picker = PromptFolderPicker::new(
            Some(PathBuf::from("/explicit")),
            true,
            Some(PathBuf::from("/configured")),
        );
        assert_eq!(
            picker.pick_folder("pick", Path::new("/sln"))?,
            Some(PathBuf::from("/explicit"))
        );
        Ok(())
    }

    #[test]
    fn test_assume_default_uses_configured_root() -> Result<()> {
        let picker = PromptFolderPicker::new(None, true, Some(PathBuf::from("/sln/libs")));
        assert_eq!(
            picker.pick_folder("pick", Path::new("/sln"))?,
            Some(PathBuf::from("/sln/libs"))
        );
        Ok(())
    }

    #[test]
    fn test_assume_default_falls_back_to_offered() -> Result<()> {
        let picker = PromptFolderPicker::new(None, true, None);
        assert_eq!(
            picker.pick_folder("pick", Path::new("/sln"))?,
            Some(PathBuf::from("/sln"))
        );
        Ok(())
    }
}
