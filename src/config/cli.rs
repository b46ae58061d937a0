use crate::core::Storage;
use crate::utils::error::{EtlError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        fs::read(&full_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => EtlError::InputNotFound {
                path: full_path.display().to_string(),
            },
            _ => EtlError::IoError(e),
        })
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}
