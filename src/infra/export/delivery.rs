use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::usecase::ports::delivery::{DeliveryError, FileDelivery};

#[derive(Debug, Clone)]
pub struct DirectoryDelivery {
    pub export_dir: PathBuf,
}

impl DirectoryDelivery {
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }
}

impl FileDelivery for DirectoryDelivery {
    fn deliver(&self, filename: &str, contents: &str) -> Result<PathBuf, DeliveryError> {
        let name = Path::new(filename);
        if filename.trim().is_empty() || name.components().count() != 1 || name.is_absolute() {
            return Err(DeliveryError::InvalidFilename(filename.to_string()));
        }

        let io_error = |source| DeliveryError::Io {
            filename: filename.to_string(),
            source,
        };
        fs::create_dir_all(&self.export_dir).map_err(io_error)?;
        let target = self.export_dir.join(name);
        fs::write(&target, contents).map_err(io_error)?;

        debug!("wrote {} bytes to {}", contents.len(), target.display());
        Ok(target)
    }
}
