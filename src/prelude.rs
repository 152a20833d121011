use std::{
    path::PathBuf,
    sync::{LazyLock, Mutex},
};

pub static VERSION: LazyLock<&'static str> =
    LazyLock::new(|| option_env!("VIDWALL_VERSION").unwrap_or(env!("CARGO_PKG_VERSION")));

pub type AnyError = Box<dyn std::error::Error>;

pub const APP_DIR_NAME: &str = "com.vidwall";

pub static CONFIG_DIR: Mutex<Option<PathBuf>> = Mutex::new(None);

pub const ENV_DEBUG: &str = "VIDWALL_DEBUG";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    ConfigInvalid { why: String },
    NoMediaFound,
    SourceInvalid { why: String },
    ScreenUnavailable { why: String },
}

pub fn app_dir() -> PathBuf {
    if let Some(dir) = CONFIG_DIR.lock().unwrap().as_ref() {
        return dir.clone();
    }

    match dirs::config_dir() {
        Some(dir) => dir.join(APP_DIR_NAME),
        None => PathBuf::from(APP_DIR_NAME),
    }
}
