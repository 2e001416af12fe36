use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Environment variable overriding the configured database path.
pub const DB_ENV_VAR: &str = "SITEGRID_DB";

/// Keys every configuration file is expected to carry.
const KNOWN_FIELDS: [&str; 5] = [
    "database",
    "default_start_day",
    "default_end_day",
    "default_actor",
    "log_level",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_start_day")]
    pub default_start_day: u32,
    #[serde(default = "default_end_day")]
    pub default_end_day: u32,
    #[serde(default = "default_actor")]
    pub default_actor: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_start_day() -> u32 {
    1
}
fn default_end_day() -> u32 {
    14
}
fn default_actor() -> String {
    "anonymous".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            default_start_day: default_start_day(),
            default_end_day: default_end_day(),
            default_actor: default_actor(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory (`~/.sitegrid`).
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".sitegrid")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("sitegrid.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("sitegrid.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    /// `SITEGRID_DB` replaces the database path either way.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
            serde_yaml::from_str(&content)
                .map_err(|e| AppError::Config(format!("cannot parse {}: {e}", path.display())))?
        } else {
            Config::default()
        };

        if let Ok(db) = env::var(DB_ENV_VAR)
            && !db.trim().is_empty()
        {
            cfg.database = db;
        }

        Ok(cfg)
    }

    /// List the expected keys missing from the configuration file on disk.
    pub fn missing_fields() -> AppResult<Vec<&'static str>> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(KNOWN_FIELDS.to_vec());
        }

        let content = fs::read_to_string(&path)?;
        let yaml: serde_yaml::Value = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {e}", path.display())))?;

        let missing = KNOWN_FIELDS
            .iter()
            .copied()
            .filter(|key| yaml.get(*key).is_none())
            .collect();
        Ok(missing)
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> io::Result<PathBuf> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = std::path::Path::new(&name);
            if p.is_absolute() || is_test {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        // Write config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };
            let yaml = serde_yaml::to_string(&config).map_err(io::Error::other)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(db_path)
    }
}
