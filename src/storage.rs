use crate::model::Snapshot;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Support de persistance de la photographie d'entrée.
pub trait Storage {
    /// Charge une photographie depuis un support.
    fn load(&self) -> anyhow::Result<Snapshot>;
    /// Sauvegarde de manière atomique.
    fn save(&self, snapshot: &Snapshot) -> anyhow::Result<()>;

    /// Charge, applique `edit`, puis sauvegarde. Rien n'est écrit si `edit` échoue.
    fn update<F, T>(&self, edit: F) -> anyhow::Result<T>
    where
        F: FnOnce(&mut Snapshot) -> anyhow::Result<T>,
    {
        let mut snapshot = self.load()?;
        let out = edit(&mut snapshot)?;
        self.save(&snapshot)?;
        Ok(out)
    }
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<Snapshot> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let snapshot: Snapshot = serde_json::from_slice(&data)
            .with_context(|| format!("parsing snapshot {}", self.path.display()))?;
        Ok(snapshot)
    }

    fn save(&self, snapshot: &Snapshot) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(snapshot)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}
