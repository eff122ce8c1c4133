use candid::Principal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::time;

/// A purchase transaction over a single property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,

    pub property_id: u64,

    pub buyer: Principal,

    pub seller: Principal,

    /// Price captured from the property when the transaction was initiated
    pub price: f64,

    pub status: TransactionStatus,

    /// Initiation time, nanoseconds since the Unix epoch
    pub timestamp: u64,
}

/// Lifecycle of a transaction.
///
/// ```text
/// Pending ──► Completed
///    └──────► Cancelled
/// ```
/// Completed and Cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Pending,
    Completed,
    Cancelled,
}

impl TransactionStatus {
    pub fn can_transition_to(self, next: TransactionStatus) -> bool {
        matches!(
            (self, next),
            (TransactionStatus::Pending, TransactionStatus::Completed)
                | (TransactionStatus::Pending, TransactionStatus::Cancelled)
        )
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }
}

impl Transaction {
    pub fn initiated_at(&self) -> DateTime<Utc> {
        time::from_canister_nanos(self.timestamp)
    }

    /// Whether the backend would accept `complete_transaction` for this record
    pub fn is_completable(&self) -> bool {
        self.status.can_transition_to(TransactionStatus::Completed)
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "Pending"),
            TransactionStatus::Completed => write!(f, "Completed"),
            TransactionStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}
