//! Deployment ledger with pluggable lookup backends.
//!
//! Resolution tries backends in a fixed priority order: records made by
//! this process first, the per-network ledger file second. Only when every
//! backend misses does the lookup fail, and that failure is left to the
//! caller to interpret.

use crate::{DeploymentRecord, LedgerError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A source of deployment records.
pub trait LookupBackend {
    /// Look up a record by contract name. `Ok(None)` means this backend
    /// has no record; a later backend may still have one.
    fn lookup(&self, name: &str) -> Result<Option<DeploymentRecord>, LedgerError>;
}

/// Records made during the current process invocation.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    records: BTreeMap<String, DeploymentRecord>,
}

impl MemoryBackend {
    pub fn insert(&mut self, record: DeploymentRecord) {
        self.records.insert(record.name.clone(), record);
    }
}

impl LookupBackend for MemoryBackend {
    fn lookup(&self, name: &str) -> Result<Option<DeploymentRecord>, LedgerError> {
        Ok(self.records.get(name).cloned())
    }
}

/// Records persisted by previous invocations, one JSON file per network.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_all(&self) -> Result<BTreeMap<String, DeploymentRecord>, LedgerError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Persist a record, overwriting any prior entry for the same name.
    /// Entries for other names are kept untouched.
    pub fn persist(&self, record: &DeploymentRecord) -> Result<(), LedgerError> {
        let mut all = self.read_all()?;
        all.insert(record.name.clone(), record.clone());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&all)?)?;
        Ok(())
    }
}

impl LookupBackend for FileBackend {
    fn lookup(&self, name: &str) -> Result<Option<DeploymentRecord>, LedgerError> {
        Ok(self.read_all()?.remove(name))
    }
}

/// The deployment ledger for one network.
#[derive(Debug)]
pub struct DeploymentLedger {
    session: MemoryBackend,
    store: FileBackend,
}

impl DeploymentLedger {
    /// Open the ledger for `network_key`, backed by
    /// `{state_dir}/{network_key}.deployments.json`.
    pub fn open(state_dir: &Path, network_key: &str) -> Self {
        let path = state_dir.join(format!("{network_key}.deployments.json"));
        Self {
            session: MemoryBackend::default(),
            store: FileBackend::new(path),
        }
    }

    fn backends(&self) -> [&dyn LookupBackend; 2] {
        [&self.session, &self.store]
    }

    /// Resolve a contract name to its deployment record, trying backends
    /// in priority order.
    pub fn resolve(&self, name: &str) -> Result<DeploymentRecord, LedgerError> {
        for backend in self.backends() {
            if let Some(record) = backend.lookup(name)? {
                return Ok(record);
            }
        }
        Err(LedgerError::NotFound {
            name: name.to_string(),
        })
    }

    /// Record a deployment, unconditionally overwriting any prior entry.
    pub fn record(&mut self, record: DeploymentRecord) -> Result<(), LedgerError> {
        self.store.persist(&record)?;
        self.session.insert(record);
        Ok(())
    }
}
