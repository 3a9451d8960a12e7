/// Errors from graph mutation and map loading.
///
/// Recoverable conditions only: internal-consistency violations (e.g. an
/// occupied city vanishing from the map mid-tick) panic instead.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// An operation referenced a city name not present in the registry.
    #[error("unknown city: {0}")]
    UnknownCity(String),

    /// A city was registered twice. The loader looks names up before
    /// registering, so this only fires on direct API misuse.
    #[error("duplicate city: {0}")]
    DuplicateCity(String),

    /// A map description line could not be parsed. Line numbers are 1-based.
    #[error("map line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
