use crate::domain::checkout::PaymentResult;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::oneshot;

struct PendingEntry {
    sender: oneshot::Sender<PaymentResult>,
    created_at: DateTime<Utc>,
}

/// Correlation table for in-flight listener-path payments. Settlement and
/// timeout race for the same entry; whichever removes it first wins, the
/// loser's attempt is a silent no-op.
pub struct PendingTable {
    entries: DashMap<String, PendingEntry>,
}

impl PendingTable {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn register(&self, transaction_ref: &str) -> oneshot::Receiver<PaymentResult> {
        let (tx, rx) = oneshot::channel();
        self.entries.insert(
            transaction_ref.to_string(),
            PendingEntry {
                sender: tx,
                created_at: Utc::now(),
            },
        );
        rx
    }

    /// First writer wins. Returns false when the entry was already settled,
    /// timed out, or never existed.
    pub fn settle(&self, transaction_ref: &str, result: PaymentResult) -> bool {
        match self.entries.remove(transaction_ref) {
            Some((_, entry)) => {
                let _ = entry.sender.send(result);
                true
            }
            None => false,
        }
    }

    pub fn remove(&self, transaction_ref: &str) -> bool {
        self.entries.remove(transaction_ref).is_some()
    }

    pub fn contains(&self, transaction_ref: &str) -> bool {
        self.entries.contains_key(transaction_ref)
    }

    pub fn created_at(&self, transaction_ref: &str) -> Option<DateTime<Utc>> {
        self.entries.get(transaction_ref).map(|e| e.created_at)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PendingTable {
    fn default() -> Self {
        Self::new()
    }
}
