//! Local token-address table.
//!
//! Auxiliary BridgeERC20 tokens are deployed locally and referenced in the
//! declarative configuration by their configured name. This table maps
//! those names to deployed addresses, persisted per network. Writes merge
//! with prior entries; the file is never truncated.

use crate::LedgerError;
use alloy_primitives::Address;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct TokenAddressTable {
    path: PathBuf,
    entries: BTreeMap<String, Address>,
}

impl TokenAddressTable {
    /// Load the table for `network_key` from
    /// `{state_dir}/{network_key}.tokens.json`, empty when absent.
    pub fn load(state_dir: &Path, network_key: &str) -> Result<Self, LedgerError> {
        let path = state_dir.join(format!("{network_key}.tokens.json"));
        let entries = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    pub fn get(&self, name: &str) -> Option<Address> {
        self.entries.get(name).copied()
    }

    /// Insert an entry and persist, merging with whatever is on disk.
    pub fn insert(&mut self, name: String, address: Address) -> Result<(), LedgerError> {
        self.entries.insert(name, address);

        // Merge with the on-disk table rather than replacing it, in case
        // another invocation added entries since we loaded.
        let mut on_disk: BTreeMap<String, Address> = if self.path.exists() {
            serde_json::from_str(&fs::read_to_string(&self.path)?)?
        } else {
            BTreeMap::new()
        };
        for (name, address) in &self.entries {
            on_disk.insert(name.clone(), *address);
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&on_disk)?)?;
        Ok(())
    }

    /// Resolve a configured token identifier to an address: a table hit
    /// wins, otherwise a literal address passes through unchanged.
    pub fn resolve(&self, token: &str) -> Result<Address, LedgerError> {
        if let Some(address) = self.get(token) {
            return Ok(address);
        }
        token.parse().map_err(|_| LedgerError::UnknownToken {
            token: token.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_state_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "bridge-tokens-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_insert_and_resolve_by_name() {
        let dir = temp_state_dir("resolve");
        let mut table = TokenAddressTable::load(&dir, "bsctest").unwrap();

        let deployed = Address::from([0xaau8; 20]);
        table.insert("BridgePDT".to_string(), deployed).unwrap();

        assert_eq!(table.resolve("BridgePDT").unwrap(), deployed);
    }

    #[test]
    fn test_literal_address_passes_through() {
        let dir = temp_state_dir("literal");
        let table = TokenAddressTable::load(&dir, "rinkeby").unwrap();

        let literal = "0xFfE41F21961B75cb96C833d34164b1463A167EF0";
        assert_eq!(
            table.resolve(literal).unwrap(),
            literal.parse::<Address>().unwrap()
        );
    }

    #[test]
    fn test_unknown_name_fails() {
        let dir = temp_state_dir("unknown");
        let table = TokenAddressTable::load(&dir, "rinkeby").unwrap();

        let err = table.resolve("NotAToken").unwrap_err();
        assert!(matches!(err, LedgerError::UnknownToken { ref token } if token == "NotAToken"));
    }

    #[test]
    fn test_entries_merge_across_loads() {
        let dir = temp_state_dir("merge");
        {
            let mut table = TokenAddressTable::load(&dir, "bsctest").unwrap();
            table
                .insert("BridgePDT".to_string(), Address::from([0x01u8; 20]))
                .unwrap();
        }
        {
            let mut table = TokenAddressTable::load(&dir, "bsctest").unwrap();
            table
                .insert("BridgeXYZ".to_string(), Address::from([0x02u8; 20]))
                .unwrap();
        }

        let table = TokenAddressTable::load(&dir, "bsctest").unwrap();
        assert_eq!(table.get("BridgePDT"), Some(Address::from([0x01u8; 20])));
        assert_eq!(table.get("BridgeXYZ"), Some(Address::from([0x02u8; 20])));
    }
}
