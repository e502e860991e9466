//! Editor abstraction for opening a freshly written draft.
//!
//! The editor command comes from `EDITOR` and may carry arguments (`code --wait`,
//! `bbedit -w`). Without one, a few common editors are looked up on `PATH`.

use crate::config::Config;
use crate::constants::FALLBACK_EDITORS;
use crate::errors::{AppResult, EditorError};
use std::io;
use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

/// Trait defining the interface for an editor component.
///
/// # Examples
///
/// ```
/// use clippings::editor::Editor;
/// use clippings::errors::AppResult;
/// use std::path::Path;
///
/// struct DummyEditor;
///
/// impl Editor for DummyEditor {
///     fn open(&self, path: &Path) -> AppResult<()> {
///         println!("Would open {}", path.display());
///         Ok(())
///     }
/// }
///
/// DummyEditor.open(Path::new("2026-01-17.md")).unwrap();
/// ```
pub trait Editor {
    /// Opens `path` and returns once the editor process has exited.
    ///
    /// # Errors
    ///
    /// Implementations return `AppError::Editor` when the editor cannot be launched.
    fn open(&self, path: &Path) -> AppResult<()>;
}

/// An editor launched as a child process.
///
/// # Examples
///
/// ```
/// use clippings::editor::SystemEditor;
///
/// let editor = SystemEditor::from_command("code --wait").unwrap();
/// assert_eq!(editor.program, "code");
/// assert_eq!(editor.args, vec!["--wait".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemEditor {
    /// Executable name or path.
    pub program: String,
    /// Arguments placed before the file path.
    pub args: Vec<String>,
}

impl SystemEditor {
    /// Splits an editor command line with shell-word rules.
    ///
    /// # Errors
    ///
    /// Returns `EditorError::InvalidCommand` for unbalanced quotes or an empty command.
    pub fn from_command(command: &str) -> Result<Self, EditorError> {
        let invalid = || EditorError::InvalidCommand {
            command: command.to_string(),
        };
        let mut words = shlex::split(command).ok_or_else(invalid)?.into_iter();
        let program = words.next().ok_or_else(invalid)?;

        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Editor for SystemEditor {
    /// Runs the editor on `path` and waits for it.
    ///
    /// A non-zero exit status is only logged; the draft is already on disk.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Editor` if the process cannot be started.
    fn open(&self, path: &Path) -> AppResult<()> {
        debug!(editor = %self.command_line(), path = %path.display(), "Launching editor");

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .status()
            .map_err(|e| launch_error(self.command_line(), e))?;

        if !status.success() {
            warn!(
                editor = %self.command_line(),
                status_code = status.code().unwrap_or(-1),
                "Editor exited with a non-zero status"
            );
        }
        Ok(())
    }
}

fn launch_error(command: String, source: io::Error) -> EditorError {
    match source.kind() {
        io::ErrorKind::NotFound => EditorError::CommandNotFound { command, source },
        io::ErrorKind::PermissionDenied => EditorError::PermissionDenied { command, source },
        _ => EditorError::ExecutionFailed { command, source },
    }
}

/// Picks the editor for `config`.
///
/// `EDITOR` wins when set; otherwise the first of `code`, `subl`, `vim` and `nano`
/// found on `PATH`. `Ok(None)` means there is nothing to launch.
pub fn resolve_editor(config: &Config) -> Result<Option<SystemEditor>, EditorError> {
    resolve_with(config.editor.as_deref(), |candidate| {
        which::which(candidate).is_ok()
    })
}

fn resolve_with(
    configured: Option<&str>,
    on_path: impl Fn(&str) -> bool,
) -> Result<Option<SystemEditor>, EditorError> {
    if let Some(command) = configured.filter(|c| !c.trim().is_empty()) {
        return SystemEditor::from_command(command).map(Some);
    }

    let found = FALLBACK_EDITORS
        .iter()
        .find(|candidate| on_path(candidate))
        .map(|candidate| SystemEditor {
            program: candidate.to_string(),
            args: Vec::new(),
        });
    debug!(editor = ?found.as_ref().map(|e| &e.program), "Probed PATH for an editor");
    Ok(found)
}
