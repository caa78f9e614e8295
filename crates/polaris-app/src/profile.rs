use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use polaris_config::Config;
use serde::{Deserialize, Serialize};

pub const MAIN_PROFILE: &str = "main";

/// A named configuration stored as `<name>.json`
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Profile files under one directory
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<config dir>/Polaris/profiles`
    pub fn user() -> anyhow::Result<Self> {
        let base = dirs::config_dir().context("No config directory for this user")?;
        Ok(Self::new(base.join("Polaris").join("profiles")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Create the folder and a default main profile if missing
    pub fn init(&self) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        if !self.path(MAIN_PROFILE).exists() {
            self.save(MAIN_PROFILE, &Config::default())?;
            tracing::info!("Created main profile in {}", self.dir.display());
        }
        Ok(())
    }

    /// Load `name`, then main, then built-in defaults
    pub fn load(&self, name: &str) -> anyhow::Result<Config> {
        let file = self.path(name);
        if file.exists() {
            return read_profile(&file);
        }

        tracing::warn!("Profile {name} not found, falling back to main profile or defaults");
        let main = self.path(MAIN_PROFILE);
        if main.exists() {
            read_profile(&main)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, name: &str, config: &Config) -> anyhow::Result<PathBuf> {
        let profile = Profile {
            name: name.into(),
            value: config.clone(),
        };
        let file = self.path(name);
        fs::write(&file, serde_json::to_string_pretty(&profile)?)
            .with_context(|| format!("Failed to write {}", file.display()))?;
        Ok(file)
    }

    /// New profile cloned from main
    pub fn add_from_main(&self, new_name: &str) -> anyhow::Result<PathBuf> {
        let config = self.load(MAIN_PROFILE)?;
        let file = self.save(new_name, &config)?;
        tracing::info!("Created new profile: {new_name}");
        Ok(file)
    }
}

fn read_profile(file: &Path) -> anyhow::Result<Config> {
    let data =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let profile: Profile = serde_json::from_str(&data)
        .with_context(|| format!("Invalid profile {}", file.display()))?;
    Ok(profile.value)
}
