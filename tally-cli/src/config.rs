use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::{default_data_file, ensure_tally_home};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub store: StoreSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    /// Where the transaction CSV lives. Explicit here so nothing else in
    /// the program hard-codes a path.
    pub data_file: PathBuf,
}

impl Config {
    fn with_default_store() -> Result<Self> {
        Ok(Self {
            store: StoreSection {
                data_file: default_data_file()?,
            },
        })
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_tally_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Config::with_default_store();
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse config.toml")?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let cfg = Config::with_default_store()?;
    save_config(&cfg)?;
    println!("Wrote {}", p.display());
    Ok(())
}
