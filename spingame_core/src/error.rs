#[derive(thiserror::Error, Debug)]
pub enum CueError {
    #[error("cue unavailable: {0}")]
    Unavailable(String),
    #[error("cue playback failed: {0}")]
    Playback(String),
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum WagerError {
    #[error("unsupported wager amount: {0}")]
    Unsupported(u64),
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SymbolError {
    #[error("unknown symbol index: {0}")]
    UnknownIndex(u8),
    #[error("symbol script is empty")]
    EmptyScript,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config read error: {0}")]
    Io(#[from] std::io::Error),
}
