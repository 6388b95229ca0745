use std::fmt;

/// User-facing command error
///
/// Every failure of a generation run is normalized into one of these variants
/// before it reaches `main`, which prints the message and exits non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Malformed arguments, detected before any subprocess is spawned
    ///
    /// Covers references without a `:` separator, invalid identifiers and a
    /// `--prefix` count that does not match the `--app-module` count.
    Usage(String),
    /// The extractor subprocess could not run, failed, or returned a bad payload
    Extraction(String),
    /// Rendering or writing the generated module failed
    Generation(String),
}

impl CommandError {
    /// Message shown to the user, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            CommandError::Usage(msg)
            | CommandError::Extraction(msg)
            | CommandError::Generation(msg) => msg,
        }
    }

    /// Process exit code: `2` for usage errors, `1` for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::Usage(_) => 2,
            CommandError::Extraction(_) | CommandError::Generation(_) => 1,
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for CommandError {}

impl From<anyhow::Error> for CommandError {
    fn from(err: anyhow::Error) -> Self {
        CommandError::Generation(format!("{err:#}"))
    }
}
