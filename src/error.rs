use thiserror::Error;

#[derive(Debug, Error)]
pub enum MacroError {
    #[error("unsupported number of banks: {banks} (expected 1, 2, 4, or 8)")]
    UnsupportedConfiguration { banks: usize },

    #[error("not enough tracks (num pins: {required}, available tracks: {available})")]
    InsufficientRoutingTracks { required: usize, available: i64 },

    #[error("pin layer `{layer}` is not `{prefix}` followed by a layer number")]
    InvalidPinLayer { layer: String, prefix: String },

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MacroError>;
