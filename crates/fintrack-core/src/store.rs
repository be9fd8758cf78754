//! Snapshot persistence for transactions, budgets and income sources
//!
//! Each user id owns three flat files in the data directory:
//! - `{user}_transactions.csv` (`Date,Description,Amount,Category,Type`)
//! - `{user}_budgets.json`
//! - `{user}_income.json`
//!
//! Loads, saves and clears hold an exclusive advisory lock on `{user}.lock`.
//! A save fingerprints all three files under that lock and refuses to
//! overwrite changes made by another writer since the snapshot was loaded.
//! New contents are staged in temp files before any file is replaced, and
//! files already replaced are restored if a later rename fails.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::models::{
    default_budgets, default_income_sources, validate_amount_map, BudgetMap, IncomeSourceMap,
    Transaction,
};

/// User id used when none is given
pub const DEFAULT_USER: &str = "default";

/// Fingerprint of a user with no snapshot files yet
const EMPTY_FINGERPRINT: &str = "absent";

/// Persisted state for one user at a point in time
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub budgets: BudgetMap,
    pub income_sources: IncomeSourceMap,
    /// SHA-256 over the three snapshot files as loaded
    fingerprint: String,
}

impl Snapshot {
    /// An empty snapshot with default budgets and income sources
    pub fn empty() -> Self {
        Self {
            transactions: Vec::new(),
            budgets: default_budgets(),
            income_sources: default_income_sources(),
            fingerprint: EMPTY_FINGERPRINT.to_string(),
        }
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Append a validated transaction
    pub fn add_transaction(&mut self, tx: Transaction) -> Result<()> {
        tx.validate()?;
        self.transactions.push(tx);
        Ok(())
    }

    /// Replace the whole transaction collection
    pub fn replace_transactions(&mut self, transactions: Vec<Transaction>) -> Result<()> {
        for tx in &transactions {
            tx.validate()?;
        }
        self.transactions = transactions;
        Ok(())
    }

    /// Set or insert budget ceilings
    pub fn update_budgets(&mut self, updates: BudgetMap) -> Result<()> {
        validate_amount_map(&updates, "Budget")?;
        self.budgets.extend(updates);
        Ok(())
    }

    /// Set or insert income source reference amounts
    pub fn update_income_sources(&mut self, updates: IncomeSourceMap) -> Result<()> {
        validate_amount_map(&updates, "Income source")?;
        self.income_sources.extend(updates);
        Ok(())
    }
}

/// Raw contents of the three snapshot files; `None` when a file is absent
#[derive(Debug)]
struct SnapshotFiles {
    transactions: Option<Vec<u8>>,
    budgets: Option<Vec<u8>>,
    income: Option<Vec<u8>>,
}

impl SnapshotFiles {
    fn parts(&self) -> [(&'static str, Option<&[u8]>); 3] {
        [
            ("transactions", self.transactions.as_deref()),
            ("budgets", self.budgets.as_deref()),
            ("income", self.income.as_deref()),
        ]
    }

    fn fingerprint(&self) -> String {
        let parts = self.parts();
        if parts.iter().all(|(_, bytes)| bytes.is_none()) {
            return EMPTY_FINGERPRINT.to_string();
        }

        let mut hasher = Sha256::new();
        for (name, bytes) in parts {
            hasher.update(name.as_bytes());
            match bytes {
                Some(bytes) => {
                    hasher.update([1u8]);
                    hasher.update((bytes.len() as u64).to_le_bytes());
                    hasher.update(bytes);
                }
                None => hasher.update([0u8]),
            }
        }
        hex::encode(hasher.finalize())
    }
}

/// Exclusive lock on a user's lock file, released on drop
struct StoreLock {
    file: File,
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            warn!(error = %e, "Failed to release snapshot lock");
        }
    }
}

/// One file replacement within a save
struct PendingWrite<'a> {
    path: PathBuf,
    bytes: &'a [u8],
    previous: Option<&'a [u8]>,
}

/// Flat-file store rooted at a data directory
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    data_dir: PathBuf,
    user_id: String,
}

impl SnapshotStore {
    /// Create a store for `user_id`, creating the data directory if needed
    pub fn new(data_dir: impl Into<PathBuf>, user_id: impl Into<String>) -> Result<Self> {
        let data_dir = data_dir.into();
        let user_id = user_id.into();

        if user_id.is_empty()
            || !user_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(Error::InvalidData(format!(
                "Invalid user id: {:?} (use letters, digits, '-' or '_')",
                user_id
            )));
        }

        if !data_dir.exists() {
            fs::create_dir_all(&data_dir)?;
            info!("Created data directory: {}", data_dir.display());
        }

        Ok(Self { data_dir, user_id })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn transactions_path(&self) -> PathBuf {
        self.data_dir
            .join(format!("{}_transactions.csv", self.user_id))
    }

    pub fn budgets_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}_budgets.json", self.user_id))
    }

    pub fn income_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}_income.json", self.user_id))
    }

    pub fn lock_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.lock", self.user_id))
    }

    /// Block until this process holds the user's lock file
    fn lock(&self) -> Result<StoreLock> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path())?;
        file.lock()?;
        Ok(StoreLock { file })
    }

    fn read_files(&self) -> Result<SnapshotFiles> {
        Ok(SnapshotFiles {
            transactions: read_optional(&self.transactions_path())?,
            budgets: read_optional(&self.budgets_path())?,
            income: read_optional(&self.income_path())?,
        })
    }

    /// Load the snapshot; missing files yield empty transactions and default maps
    pub fn load(&self) -> Result<Snapshot> {
        let files = {
            let _lock = self.lock()?;
            self.read_files()?
        };

        let transactions = match &files.transactions {
            Some(bytes) => parse_transactions(bytes.as_slice())?,
            None => Vec::new(),
        };
        let budgets = match &files.budgets {
            Some(bytes) => parse_amount_map(bytes, &self.budgets_path())?,
            None => default_budgets(),
        };
        let income_sources = match &files.income {
            Some(bytes) => parse_amount_map(bytes, &self.income_path())?,
            None => default_income_sources(),
        };

        debug!(
            user = %self.user_id,
            transactions = transactions.len(),
            budgets = budgets.len(),
            "Loaded snapshot"
        );

        Ok(Snapshot {
            transactions,
            budgets,
            income_sources,
            fingerprint: files.fingerprint(),
        })
    }

    /// Current fingerprint of the snapshot files on disk
    pub fn current_fingerprint(&self) -> Result<String> {
        let _lock = self.lock()?;
        Ok(self.read_files()?.fingerprint())
    }

    /// Persist the snapshot atomically.
    ///
    /// Fails with [`Error::Conflict`] if any snapshot file changed since
    /// `snapshot` was loaded. On success the snapshot's fingerprint is
    /// updated so it can be saved again.
    pub fn save(&self, snapshot: &mut Snapshot) -> Result<()> {
        let next = SnapshotFiles {
            transactions: Some(serialize_transactions(&snapshot.transactions)?),
            budgets: Some(serde_json::to_vec_pretty(&snapshot.budgets)?),
            income: Some(serde_json::to_vec_pretty(&snapshot.income_sources)?),
        };

        let _lock = self.lock()?;
        let previous = self.read_files()?;
        let on_disk = previous.fingerprint();
        if on_disk != snapshot.fingerprint {
            return Err(Error::Conflict(format!(
                "snapshot for user {:?} was modified by another writer (expected {}, found {})",
                self.user_id,
                short(&snapshot.fingerprint),
                short(&on_disk)
            )));
        }

        let paths = [
            self.transactions_path(),
            self.budgets_path(),
            self.income_path(),
        ];
        let writes: Vec<PendingWrite<'_>> = paths
            .into_iter()
            .zip(next.parts())
            .zip(previous.parts())
            .filter_map(|((path, (_, bytes)), (_, previous))| {
                bytes.map(|bytes| PendingWrite {
                    path,
                    bytes,
                    previous,
                })
            })
            .collect();
        commit_files(&writes)?;

        snapshot.fingerprint = next.fingerprint();
        info!(
            user = %self.user_id,
            transactions = snapshot.transactions.len(),
            fingerprint = short(&snapshot.fingerprint),
            "Saved snapshot"
        );
        Ok(())
    }

    /// Remove all snapshot files for this user. Returns how many were deleted.
    pub fn clear(&self) -> Result<usize> {
        let _lock = self.lock()?;
        let mut removed = 0;
        for path in [
            self.transactions_path(),
            self.budgets_path(),
            self.income_path(),
        ] {
            if path.exists() {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }
        info!(user = %self.user_id, removed, "Cleared snapshot files");
        Ok(removed)
    }
}

/// Parse transaction CSV (with header row)
pub fn parse_transactions<R: std::io::Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut transactions = Vec::new();
    for (i, result) in rdr.deserialize::<Transaction>().enumerate() {
        let tx = result?;
        tx.validate()
            .map_err(|e| Error::InvalidData(format!("Row {}: {}", i + 1, e)))?;
        transactions.push(tx);
    }
    Ok(transactions)
}

/// Serialize transactions to CSV bytes (always with a header row)
pub fn serialize_transactions(transactions: &[Transaction]) -> Result<Vec<u8>> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    wtr.write_record(["Date", "Description", "Amount", "Category", "Type"])?;
    for tx in transactions {
        wtr.serialize(tx)?;
    }
    wtr.into_inner()
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::Other, e.to_string())))
}

fn parse_amount_map(bytes: &[u8], path: &Path) -> Result<BTreeMap<String, f64>> {
    let map: BTreeMap<String, f64> = serde_json::from_slice(bytes)?;
    validate_amount_map(&map, &format!("Value in {}", path.display()))?;
    Ok(map)
}

fn read_optional(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Write `bytes` to a synced temp file next to `path`
fn stage(path: &Path, bytes: &[u8]) -> Result<NamedTempFile> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    Ok(tmp)
}

/// Replace every target, or none of them.
///
/// All temp files are staged before the first rename. If a rename fails,
/// the targets already replaced get their previous contents back (or are
/// removed if they did not exist).
fn commit_files(writes: &[PendingWrite<'_>]) -> Result<()> {
    let staged = writes
        .iter()
        .map(|w| stage(&w.path, w.bytes))
        .collect::<Result<Vec<_>>>()?;

    for (i, tmp) in staged.into_iter().enumerate() {
        if let Err(e) = tmp.persist(&writes[i].path) {
            rollback(&writes[..i]);
            return Err(Error::Io(e.error));
        }
    }
    Ok(())
}

fn rollback(committed: &[PendingWrite<'_>]) {
    for write in committed {
        let restored = match write.previous {
            Some(bytes) => stage(&write.path, bytes).and_then(|tmp| {
                tmp.persist(&write.path)
                    .map(|_| ())
                    .map_err(|e| Error::Io(e.error))
            }),
            None => fs::remove_file(&write.path).map_err(Error::from),
        };
        if let Err(e) = restored {
            warn!(path = %write.path.display(), error = %e, "Failed to restore snapshot file");
        }
    }
}

fn short(fingerprint: &str) -> &str {
    &fingerprint[..fingerprint.len().min(12)]
}
