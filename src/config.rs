use serde_derive::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::db;
use crate::error::ZoteroError;
use crate::item_actions;

/// Optional JSON file holding any of the run parameters.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub db_path: Option<PathBuf>,
    pub title_name: Option<String>,
    pub new_date_added: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<FileConfig, ZoteroError> {
        debug!("Config path: {}", path.display());
        let contents = fs::read_to_string(path)
            .map_err(|e| ZoteroError::InvalidInput(format!("cannot read config {}: {}", path.display(), e)).logged())?;
        let config = serde_json::from_str::<FileConfig>(&contents)
            .map_err(|e| ZoteroError::InvalidInput(format!("cannot parse config {}: {}", path.display(), e)).logged())?;
        Ok(config)
    }
}

/// Reads `KEY=value` lines from a dotenv file. Blank lines, `#` comments and an
/// `export ` prefix are skipped; one layer of matching quotes is stripped. A
/// missing file yields no values.
pub fn load_dotenv_file(path: &Path) -> HashMap<String, String> {
    match fs::read_to_string(path) {
        Ok(contents) => parse_dotenv_contents(&contents),
        Err(_) => HashMap::new(),
    }
}

fn parse_dotenv_contents(contents: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();
    for raw_line in contents.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let (key, value) = match line.split_once('=') {
            Some(pair) => pair,
            None => continue,
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        values.insert(key.to_string(), unquote(value.trim()).to_string());
    }
    values
}

fn unquote(value: &str) -> &str {
    for quote in &['"', '\''] {
        if value.len() >= 2 && value.starts_with(*quote) && value.ends_with(*quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// `DB_PATH` from a dotenv file, used when neither the flag nor the process
/// environment set it.
pub fn dotenv_db_path(path: &Path) -> Option<PathBuf> {
    let mut values = load_dotenv_file(path);
    match values.remove("DB_PATH") {
        Some(p) if !p.is_empty() => {
            debug!("DB_PATH taken from {}", path.display());
            Some(PathBuf::from(p))
        }
        _ => None,
    }
}

/// Parameters for one run, after merging the command line over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub title_name: String,
    pub new_date_added: String,
}

impl Config {
    pub fn resolve(
        db_path: Option<PathBuf>,
        title_name: Option<String>,
        new_date_added: Option<String>,
        file: FileConfig,
    ) -> Result<Config, ZoteroError> {
        let db_path = match db_path.or(file.db_path).or_else(db::default_database_path) {
            Some(p) => p,
            None => return Err(ZoteroError::InvalidInput("no database path given and no home directory found".to_string()).logged()),
        };
        let title_name = match title_name.or(file.title_name) {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Err(ZoteroError::InvalidInput("title name cannot be empty".to_string()).logged()),
        };
        let new_date_added = match new_date_added.or(file.new_date_added) {
            Some(d) => d,
            None => return Err(ZoteroError::InvalidInput("no date added given".to_string()).logged()),
        };
        item_actions::validate_date_added(&new_date_added)?;

        Ok(Config {
            db_path,
            title_name,
            new_date_added,
        })
    }
}
