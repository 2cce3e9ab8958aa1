use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod migrate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_owner")]
    pub owner: String,
    #[serde(default = "default_timer_minutes")]
    pub timer_minutes: u32,
    #[serde(default = "default_timer_presets")]
    pub timer_presets: Vec<u32>,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

pub(crate) fn default_owner() -> String {
    env::var("USER")
        .or_else(|_| env::var("USERNAME"))
        .unwrap_or_else(|_| "local".to_string())
}
pub(crate) fn default_timer_minutes() -> u32 {
    25
}
pub(crate) fn default_timer_presets() -> Vec<u32> {
    vec![5, 15, 30]
}
pub(crate) fn default_page_size() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            owner: default_owner(),
            timer_minutes: default_timer_minutes(),
            timer_presets: default_timer_presets(),
            page_size: default_page_size(),
        }
    }

    /// Timer length for a preset button. Only values listed in
    /// `timer_presets` are accepted.
    pub fn preset_minutes(&self, minutes: u32) -> AppResult<u32> {
        if self.timer_presets.contains(&minutes) {
            Ok(minutes)
        } else {
            Err(AppError::Config(format!(
                "{} is not a timer preset (available: {:?})",
                minutes, self.timer_presets
            )))
        }
    }

    /// Timer length from `--preset`, `--minutes` or `timer_minutes`, in that order.
    pub fn timer_length(&self, preset: Option<u32>, minutes: Option<u32>) -> AppResult<u32> {
        match preset {
            Some(p) => self.preset_minutes(p),
            None => Ok(minutes.unwrap_or(self.timer_minutes)),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rfocuslog")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rfocuslog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rfocuslog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rfocuslog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let cfg: Config = serde_yaml::from_str(&content)?;

        if cfg.page_size == 0 {
            return Err(AppError::Config("page_size must be at least 1".into()));
        }

        Ok(cfg)
    }

    /// Initialize configuration and database files.
    ///
    /// Returns the resolved database path. In test mode the config file is
    /// left untouched.
    pub fn init_all(custom_name: Option<&str>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => {
                let p = Path::new(name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        if !is_test {
            let config = Self::with_database(db_path.clone());
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(db_path)
    }
}
