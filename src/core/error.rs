//! Error types for repolens with contextual messages and exit codes
//!
//! Only workspace acquisition is allowed to abort a run. Every analyzer
//! failure is converted into data (`AnalysisResult::Failure`) at the adapter
//! boundary, so the variants here cover acquisition, I/O and plumbing.

use std::fmt;
use std::io;

/// Exit codes for repolens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (invalid args, bad reference)
  User = 1,
  /// System error (git, network, I/O)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for repolens
#[derive(Debug)]
pub enum LensError {
  /// The repository reference could not be resolved to a local checkout.
  /// Fatal to the whole run; carries the clone command's stderr.
  Acquisition { stderr: String },

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message { message: String, context: Option<String> },
}

impl LensError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    LensError::Message {
      message: msg.into(),
      context: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      LensError::Message { message, context } => LensError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
      },
      other => other,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      LensError::Acquisition { .. } => ExitCode::System,
      LensError::Io(_) => ExitCode::System,
      LensError::Message { .. } => ExitCode::User,
    }
  }
}

impl fmt::Display for LensError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      LensError::Acquisition { stderr } => {
        write!(f, "Failed to clone repository: {}", stderr)
      }
      LensError::Io(e) => write!(f, "I/O error: {}", e),
      LensError::Message { message, context } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for LensError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      LensError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for LensError {
  fn from(err: io::Error) -> Self {
    LensError::Io(err)
  }
}

impl From<String> for LensError {
  fn from(msg: String) -> Self {
    LensError::message(msg)
  }
}

impl From<&str> for LensError {
  fn from(msg: &str) -> Self {
    LensError::message(msg)
  }
}

impl From<serde_json::Error> for LensError {
  fn from(err: serde_json::Error) -> Self {
    LensError::message(format!("JSON error: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for LensError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    LensError::message(format!("UTF-8 conversion error: {}", err))
  }
}

/// Result type alias for repolens
pub type LensResult<T> = Result<T, LensError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> LensResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> LensResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<LensError>,
{
  fn context(self, ctx: impl Into<String>) -> LensResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> LensResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr
pub fn print_error(error: &LensError) {
  eprintln!("\n❌ {}\n", error);
}
