use crate::rules::Rules;
use crate::seed;
use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Réglages par défaut de l'outil (chemins et fenêtre de résolution).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub snapshot_path: PathBuf,
    pub rules_path: PathBuf,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("snapshot.json"),
            rules_path: PathBuf::from("rules.json"),
            window_start: seed::DEMO_WINDOW_START,
            window_end: seed::DEMO_WINDOW_END,
        }
    }
}

impl Settings {
    /// Lit un fichier de réglages JSON ; les champs absents gardent leur défaut.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).with_context(|| format!("reading settings {}", path.display()))?;
        serde_json::from_slice(&data).with_context(|| format!("parsing settings {}", path.display()))
    }
}

/// Charge le fichier de règles. Fichier absent : règles vides.
pub fn load_rules<P: AsRef<Path>>(path: P) -> anyhow::Result<Rules> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(path = %path.display(), "rules file not found, using empty rules");
        return Ok(Rules::from_value(&Value::Null));
    }
    let data = fs::read(path).with_context(|| format!("reading rules {}", path.display()))?;
    let value: Value =
        serde_json::from_slice(&data).with_context(|| format!("parsing rules {}", path.display()))?;
    Ok(Rules::from_value(&value))
}

pub fn save_rules<P: AsRef<Path>>(path: P, rules: &Rules) -> anyhow::Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(&rules.to_value())?;
    fs::write(path, json).with_context(|| format!("writing rules {}", path.display()))
}
