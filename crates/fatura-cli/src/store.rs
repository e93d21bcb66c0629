//! Stored bill collection backed by a JSON file.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use tracing::debug;

use fatura_core::InvoiceRecord;

/// Persistence interface for validated bills.
///
/// Commands receive an implementation by parameter; nothing in the
/// binary holds a process-wide store.
pub trait InvoiceStore {
    /// All stored records.
    fn find_all(&self) -> anyhow::Result<Vec<InvoiceRecord>>;

    /// Look up a record by its `(client number, reference month)` pair.
    fn find_by_key(
        &self,
        client_number: &str,
        reference_month: &str,
    ) -> anyhow::Result<Option<InvoiceRecord>>;

    /// Insert a new record. Fails if the identity pair already exists;
    /// stored records are never updated.
    fn insert(&mut self, record: InvoiceRecord) -> anyhow::Result<()>;
}

/// `InvoiceStore` implementation holding records in a single JSON file.
pub struct JsonFileStore {
    path: PathBuf,
    records: Vec<InvoiceRecord>,
}

impl JsonFileStore {
    /// Open a store at the given path, reading any existing records.
    /// A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();

        let records = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("malformed data file {}", path.display()))?
        } else {
            Vec::new()
        };

        debug!("opened store at {} with {} records", path.display(), records.len());

        Ok(Self { path, records })
    }

    fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }

        let content = serde_json::to_string_pretty(&self.records)?;
        fs::write(&self.path, content)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}

impl InvoiceStore for JsonFileStore {
    fn find_all(&self) -> anyhow::Result<Vec<InvoiceRecord>> {
        Ok(self.records.clone())
    }

    fn find_by_key(
        &self,
        client_number: &str,
        reference_month: &str,
    ) -> anyhow::Result<Option<InvoiceRecord>> {
        Ok(self
            .records
            .iter()
            .find(|r| r.key() == (client_number, reference_month))
            .cloned())
    }

    fn insert(&mut self, record: InvoiceRecord) -> anyhow::Result<()> {
        if self.records.iter().any(|r| r.key() == record.key()) {
            anyhow::bail!(
                "bill {}/{} already exists",
                record.client_number,
                record.reference_month
            );
        }

        self.records.push(record);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use rust_decimal::Decimal;

    use super::*;

    fn record(client: &str, month: &str) -> InvoiceRecord {
        InvoiceRecord {
            client_number: client.to_string(),
            reference_month: month.to_string(),
            electric_energy_kwh: 150,
            electric_energy_r: Decimal::new(11850, 2),
            energy_scee_kwh: 75,
            energy_scee_r: Decimal::new(4050, 2),
            energy_compensation_kwh: 100,
            energy_compensation_r: Decimal::new(-4500, 2),
            public_lighting_r: Decimal::new(1050, 2),
            total_r: Decimal::new(12450, 2),
            created_at: DateTime::from_timestamp(1_688_169_600, 0).unwrap(),
        }
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("faturas.json")).unwrap();

        assert!(store.find_all().unwrap().is_empty());
    }

    #[test]
    fn test_insert_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("faturas.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.insert(record("1234567", "JUN/2023")).unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        let records = reopened.find_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key(), ("1234567", "JUN/2023"));
    }

    #[test]
    fn test_find_by_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path().join("faturas.json")).unwrap();
        store.insert(record("1234567", "JUN/2023")).unwrap();
        store.insert(record("1234567", "JUL/2023")).unwrap();

        let found = store.find_by_key("1234567", "JUL/2023").unwrap();
        assert_eq!(found.unwrap().reference_month, "JUL/2023");

        assert!(store.find_by_key("7654321", "JUN/2023").unwrap().is_none());
    }

    #[test]
    fn test_insert_rejects_duplicate_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path().join("faturas.json")).unwrap();
        store.insert(record("1234567", "JUN/2023")).unwrap();

        let err = store.insert(record("1234567", "JUN/2023")).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
