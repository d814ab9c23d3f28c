//! The seam to the external HWPX converter.
//!
//! The converter is a separate program. It reads one envelope as JSON on
//! stdin and writes a document to the path given with `--output`:
//!
//! ```text
//! <converter> - --output <dir>/<basename>.hwpx [--include-header]
//! ```
//!
//! A non-zero exit status means the document was not produced. Batch code is
//! generic over [`DocumentConverter`] so it can be driven without spawning
//! processes.
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use canonical::{CanonicalError, Envelope};
use thiserror::Error;
use tracing::debug;

/// Errors surfaced by a converter for a single document.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("converter not found: {}", .0.display())]
    MissingBinary(PathBuf),

    #[error(transparent)]
    Envelope(#[from] CanonicalError),

    #[error("failed to start converter {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to stream envelope to converter: {0}")]
    Stdin(#[source] io::Error),

    #[error("failed to wait for converter: {0}")]
    Wait(#[source] io::Error),

    #[error("converter {} while writing {}", describe_exit(.code), .output.display())]
    ExitStatus { code: Option<i32>, output: PathBuf },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

/// Turns one envelope into one document at `output`.
pub trait DocumentConverter {
    fn convert(&self, envelope: &Envelope, output: &Path) -> Result<(), ConvertError>;
}

impl<T: DocumentConverter + ?Sized> DocumentConverter for &T {
    fn convert(&self, envelope: &Envelope, output: &Path) -> Result<(), ConvertError> {
        (**self).convert(envelope, output)
    }
}

/// Runs the converter binary once per document.
#[derive(Debug, Clone)]
pub struct ProcessConverter {
    program: PathBuf,
}

impl ProcessConverter {
    /// Fails if `program` does not exist.
    pub fn new(program: impl Into<PathBuf>) -> Result<Self, ConvertError> {
        let program = program.into();
        if !program.exists() {
            return Err(ConvertError::MissingBinary(program));
        }
        Ok(Self { program })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self, output: &Path, include_header: bool) -> Command {
        let mut command = Command::new(&self.program);
        command.arg("-").arg("--output").arg(output);
        if include_header {
            command.arg("--include-header");
        }
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        command
    }
}

impl DocumentConverter for ProcessConverter {
    fn convert(&self, envelope: &Envelope, output: &Path) -> Result<(), ConvertError> {
        let payload = envelope.to_json()?;
        let mut child = self
            .command(output, envelope.include_header())
            .spawn()
            .map_err(|source| ConvertError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Dropping the handle closes stdin so the converter sees EOF.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(&payload),
            None => Ok(()),
        };
        let status = child.wait().map_err(ConvertError::Wait)?;
        debug!(
            output = %output.display(),
            bytes = payload.len(),
            status = ?status.code(),
            "converter_finished"
        );

        if !status.success() {
            return Err(ConvertError::ExitStatus {
                code: status.code(),
                output: output.to_path_buf(),
            });
        }
        written.map_err(ConvertError::Stdin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_is_rejected_up_front() {
        let err = ProcessConverter::new("/definitely/not/a/real/jsontohwpx").unwrap_err();
        assert!(matches!(err, ConvertError::MissingBinary(_)));
        assert!(err.to_string().contains("converter not found"));
    }

    #[test]
    fn exit_status_messages() {
        let failed = ConvertError::ExitStatus {
            code: Some(2),
            output: PathBuf::from("out/a.hwpx"),
        };
        assert_eq!(
            failed.to_string(),
            "converter exited with status 2 while writing out/a.hwpx"
        );

        let killed = ConvertError::ExitStatus {
            code: None,
            output: PathBuf::from("out/b.hwpx"),
        };
        assert!(killed.to_string().contains("terminated by a signal"));
    }

    #[test]
    fn command_line_matches_converter_interface() {
        let converter = ProcessConverter {
            program: PathBuf::from("jsontohwpx"),
        };
        let with_header = converter.command(Path::new("o/x.hwpx"), true);
        let args: Vec<_> = with_header.get_args().collect();
        assert_eq!(args, ["-", "--output", "o/x.hwpx", "--include-header"]);

        let without_header = converter.command(Path::new("o/x.hwpx"), false);
        assert_eq!(without_header.get_args().count(), 3);
    }
}
