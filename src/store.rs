use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use crate::error::{LensError, Result};
use crate::models::Transaction;

/// The session's canonical transaction list. Never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    pub fn new(transactions: Vec<Transaction>) -> Result<Self> {
        let mut seen = HashSet::new();
        for t in &transactions {
            if !seen.insert(t.id.as_str()) {
                return Err(LensError::DuplicateId(t.id.clone()));
            }
        }
        Ok(Self { transactions })
    }

    /// Load a JSON array of transactions.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let transactions: Vec<Transaction> = serde_json::from_str(&content)?;
        let store = Self::new(transactions)?;
        info!(count = store.len(), source = %path.display(), "loaded transactions");
        Ok(store)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_transactions;

    #[test]
    fn test_new_keeps_input_order() {
        let store = TransactionStore::new(sample_transactions()).unwrap();
        let ids: Vec<&str> = store.transactions().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.first(), Some(&"TXN001"));
        assert_eq!(ids.last(), Some(&"TXN008"));
        assert_eq!(store.len(), 8);
    }

    #[test]
    fn test_new_rejects_duplicate_ids() {
        let mut txns = sample_transactions();
        txns.push(txns[0].clone());
        let err = TransactionStore::new(txns).unwrap_err();
        assert!(err.to_string().contains("TXN001"), "got: {err}");
    }

    #[test]
    fn test_get_by_id() {
        let store = TransactionStore::new(sample_transactions()).unwrap();
        assert_eq!(store.get("TXN008").unwrap().merchant, "Gas Station");
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transactions.json");
        let json = serde_json::to_string_pretty(&sample_transactions()).unwrap();
        std::fs::write(&path, json).unwrap();
        let store = TransactionStore::from_json_file(&path).unwrap();
        assert_eq!(store.transactions(), sample_transactions().as_slice());
    }

    #[test]
    fn test_from_json_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = TransactionStore::from_json_file(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(LensError::Io(_))));
    }
}
