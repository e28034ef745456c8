use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("failed to deliver {filename}: {source}")]
    Io {
        filename: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid export filename: {0:?}")]
    InvalidFilename(String),
}

pub trait FileDelivery {
    fn deliver(&self, filename: &str, contents: &str) -> Result<PathBuf, DeliveryError>;
}
