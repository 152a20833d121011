pub mod config;

use std::path::PathBuf;

use crate::prelude::{app_dir, AnyError};

pub trait ResourceFile
where
    Self: Default + serde::de::DeserializeOwned,
{
    const FILE_NAME: &'static str;

    fn path() -> PathBuf {
        app_dir().join(Self::FILE_NAME)
    }

    fn load() -> Result<Self, AnyError> {
        if !Self::path().exists() {
            return Ok(Self::default());
        }
        Self::load_from_string(&Self::load_raw()?)
    }

    fn load_raw() -> Result<String, AnyError> {
        Ok(std::fs::read_to_string(Self::path())?)
    }

    fn load_from_string(content: &str) -> Result<Self, AnyError> {
        Ok(serde_yaml::from_str(content)?)
    }
}

pub trait SaveableResourceFile
where
    Self: ResourceFile + serde::Serialize,
{
    fn save(&self) {
        let new_content = serde_yaml::to_string(&self).unwrap();

        if let Ok(old_content) = Self::load_raw() {
            if old_content == new_content {
                return;
            }
        }

        if std::fs::create_dir_all(app_dir()).is_ok() {
            if let Err(e) = std::fs::write(Self::path(), new_content.as_bytes()) {
                log::error!("Unable to save {}: {e}", Self::FILE_NAME);
            }
        }
    }
}
