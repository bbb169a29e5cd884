//! Run identifiers used to key persisted artifacts.
//!
//! A [`RunId`] is `YYYYMMDD_HHMMSS_NNNNNN`: the local wall-clock second plus a
//! zero-padded per-process sequence number. Ids sort lexicographically in
//! creation order, which the drift monitor relies on when it picks the most
//! recent input batches by file name.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const SEQUENCE_MODULUS: u64 = 1_000_000;

/// Token naming one prediction, drift check or notebook run.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunId(String);

impl RunId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The second-granularity timestamp part (`YYYYMMDD_HHMMSS`).
    pub fn timestamp_part(&self) -> &str {
        self.0.get(..15).unwrap_or(&self.0)
    }

    /// `<prefix><id>.<extension>`
    pub fn file_name(&self, prefix: &str, extension: &str) -> String {
        format!("{prefix}{}.{extension}", self.0)
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Monotonic [`RunId`] source. One instance is shared by every orchestrator
/// so that ids never collide within a process, even inside the same second.
#[derive(Debug, Default)]
pub struct RunIdGenerator {
    sequence: AtomicU64,
}

impl RunIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id stamped with the current local time.
    pub fn next_id(&self) -> RunId {
        self.next_at(Local::now())
    }

    /// Next id stamped with `now`.
    pub fn next_at(&self, now: DateTime<Local>) -> RunId {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed) % SEQUENCE_MODULUS;
        RunId(format!("{}_{seq:06}", now.format(TIMESTAMP_FORMAT)))
    }
}
