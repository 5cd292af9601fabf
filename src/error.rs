use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CcslError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown theme '{0}' (run `ccsl themes` for the list)")]
    UnknownTheme(String),

    #[error("could not determine home directory")]
    HomeDirUnavailable,

    #[error("{path} is not a JSON object")]
    NotAnObject { path: PathBuf },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("toml serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
