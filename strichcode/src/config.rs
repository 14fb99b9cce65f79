use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strichcode_bitmap::BitmapRenderOptions;
use tracing::debug;

use crate::errors::ConfigError;


/// Configuration file looked up in the working directory if none is given explicitly.
pub(crate) const DEFAULT_CONFIG_FILE_NAME: &str = "strichcode.json";


#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct Config {
    /// TrueType or OpenType font used for the caption. Without one, no caption is drawn.
    #[serde(default)]
    pub font_path: Option<PathBuf>,

    #[serde(default = "Config::default_caption")]
    pub caption: bool,

    #[serde(default)]
    pub quiet_zone_pixels: usize,

    #[serde(default = "Config::default_point_scale")]
    pub point_scale: usize,
}
impl Config {
    const fn default_caption() -> bool { true }
    const fn default_point_scale() -> usize { 1 }

    pub fn render_options(&self) -> BitmapRenderOptions {
        let mut opts = BitmapRenderOptions::new();
        opts.set_quiet_zone(self.quiet_zone_pixels);
        opts.set_point_scale(self.point_scale);
        opts
    }
}
impl Default for Config {
    fn default() -> Self {
        Self {
            font_path: None,
            caption: Self::default_caption(),
            quiet_zone_pixels: 0,
            point_scale: Self::default_point_scale(),
        }
    }
}


pub(crate) fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let file = File::open(path)
        .map_err(|e| ConfigError::OpeningFile(e))?;
    let config: Config = serde_json::from_reader(file)
        .map_err(|e| ConfigError::Loading(e))?;
    Ok(config)
}


/// Loads the configuration from the given path or, if none is given, from
/// [`DEFAULT_CONFIG_FILE_NAME`] in `directory` if that file exists. Otherwise, the defaults are
/// returned.
pub(crate) fn find_config(explicit_path: Option<&Path>, directory: &Path) -> Result<Config, ConfigError> {
    if let Some(path) = explicit_path {
        return load_config(path);
    }

    let default_path = directory.join(DEFAULT_CONFIG_FILE_NAME);
    if default_path.is_file() {
        debug!("using configuration file {}", default_path.display());
        load_config(&default_path)
    } else {
        debug!("no configuration file; using defaults");
        Ok(Config::default())
    }
}
