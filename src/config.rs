use crate::genealogy::Lineage;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// `pdgId,name,type,charge` table used when none is given on the command line.
    pub particle_table: Option<PathBuf>,
    pub threads: usize,
    pub lineage: Lineage,
    /// Mass overrides in GeV, keyed by PDG id.
    pub masses: HashMap<i32, f64>,
}

fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            particle_table: None,
            threads: default_threads(),
            lineage: Lineage::default(),
            masses: HashMap::new(),
        }
    }
}

impl Config {
    fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "genealogy", "genealogy-tools")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Reads the user config, falling back to defaults when it is missing or
    /// unreadable.
    pub fn load() -> Self {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                match Self::load_from(&config_path) {
                    Ok(config) => return config,
                    Err(e) => log::warn!(
                        "Ignoring config {}: {}",
                        config_path.display(),
                        e
                    ),
                }
            }
        }
        Config::default()
    }

    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Ok(Self::from_toml(&content)?)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        // TOML keys are strings, so masses go through an intermediate map.
        #[derive(Deserialize)]
        struct Partial {
            #[serde(default)]
            particle_table: Option<PathBuf>,
            #[serde(default = "default_threads")]
            threads: usize,
            #[serde(default)]
            lineage: Lineage,
            #[serde(default)]
            masses: HashMap<String, f64>,
        }

        let partial: Partial = toml::from_str(content)?;
        let mut masses = HashMap::with_capacity(partial.masses.len());
        for (key, mass) in partial.masses {
            let pdg_id = key.trim().parse::<i32>().map_err(|e| {
                <toml::de::Error as serde::de::Error>::custom(format!(
                    "invalid PDG id '{}' in [masses]: {}",
                    key, e
                ))
            })?;
            masses.insert(pdg_id, mass);
        }

        Ok(Config {
            particle_table: partial.particle_table,
            threads: partial.threads,
            lineage: partial.lineage,
            masses,
        })
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        #[derive(Serialize)]
        struct Out<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            particle_table: Option<&'a PathBuf>,
            threads: usize,
            lineage: Lineage,
            masses: HashMap<String, f64>,
        }

        toml::to_string_pretty(&Out {
            particle_table: self.particle_table.as_ref(),
            threads: self.threads,
            lineage: self.lineage,
            masses: self
                .masses
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        })
    }

    /// Writes the config to the user config dir and returns the file path.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let config_path = Self::default_path()
            .ok_or_else(|| anyhow::anyhow!("Failed to determine project directories"))?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        if let Some(dir) = path.as_ref().parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path.as_ref(), self.to_toml()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_file() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.lineage, Lineage::default());
        assert!(config.particle_table.is_none());
        assert!(config.masses.is_empty());
        assert!(config.threads >= 1);
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml(
            r#"
particle_table = "/data/particles.csv"
threads = 4

[lineage]
quark = 4
resonance = 23

[masses]
511 = 5.27966
-511 = 5.27966
"#,
        )
        .unwrap();
        assert_eq!(config.particle_table, Some(PathBuf::from("/data/particles.csv")));
        assert_eq!(config.threads, 4);
        assert_eq!(config.lineage, Lineage { quark: 4, resonance: 23 });
        assert_eq!(config.masses.get(&-511), Some(&5.27966));
    }

    #[test]
    fn test_invalid_mass_key() {
        assert!(Config::from_toml("[masses]\nabc = 1.0\n").is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.threads = 2;
        config.particle_table = Some(PathBuf::from("particles.csv"));
        config.masses.insert(-421, 1.86483);
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }
}
