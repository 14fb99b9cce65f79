use std::error;
use std::fmt;
use std::path::PathBuf;

use strichcode_bitmap::BitmapError;
use strichcode_symbology::BarcodeError;


#[derive(Debug)]
pub(crate) enum ConfigError {
    OpeningFile(std::io::Error),
    Loading(serde_json::Error),
}
impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::OpeningFile(e)
                => write!(f, "error opening config file: {}", e),
            ConfigError::Loading(e)
                => write!(f, "error loading configuration: {}", e),
        }
    }
}
impl error::Error for ConfigError {
}


#[derive(Debug)]
pub(crate) enum GeneralError {
    Barcode(BarcodeError),
    Bitmap(BitmapError),
    Config(ConfigError),
    Io { path: PathBuf, error: std::io::Error },
    FontLoading(PathBuf),
    Usage(String),
}
impl GeneralError {
    pub fn exit_code(&self) -> i32 {
        match self {
            GeneralError::Usage(_) => 2,
            _ => 1,
        }
    }
}
impl fmt::Display for GeneralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneralError::Barcode(e)
                => write!(f, "{}", e),
            GeneralError::Bitmap(e)
                => write!(f, "{}", e),
            GeneralError::Config(e)
                => write!(f, "{}", e),
            GeneralError::Io { path, error }
                => write!(f, "error accessing {}: {}", path.display(), error),
            GeneralError::FontLoading(path)
                => write!(f, "{} does not contain a usable font", path.display()),
            GeneralError::Usage(message)
                => write!(f, "{}", message),
        }
    }
}
impl error::Error for GeneralError {
}
impl From<BarcodeError> for GeneralError {
    fn from(e: BarcodeError) -> Self {
        GeneralError::Barcode(e)
    }
}
impl From<BitmapError> for GeneralError {
    fn from(e: BitmapError) -> Self {
        GeneralError::Bitmap(e)
    }
}
impl From<ConfigError> for GeneralError {
    fn from(e: ConfigError) -> Self {
        GeneralError::Config(e)
    }
}
