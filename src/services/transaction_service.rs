// src/services/transaction_service.rs
//
// Transaction Service - Transaction Lifecycle Access
//
// CRITICAL RULES:
// - Initiating and completing require a session
// - A `false` from completion is an outcome, not an error

use std::sync::Arc;

use log::{info, warn};
use serde::Serialize;

use crate::domain::Transaction;
use crate::error::AppResult;
use crate::events::{EventBus, TransactionCompleted, TransactionInitiated};
use crate::services::SessionManager;

/// Result of asking the backend to complete a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionOutcome {
    pub transaction_id: u64,
    pub completed: bool,
    pub message: String,
}

impl TransactionOutcome {
    fn from_flag(transaction_id: u64, completed: bool) -> Self {
        let message = if completed {
            format!("Transaction {} completed", transaction_id)
        } else {
            format!(
                "Transaction {} is not in a completable state",
                transaction_id
            )
        };
        Self {
            transaction_id,
            completed,
            message,
        }
    }
}

pub struct TransactionService {
    session: Arc<SessionManager>,
    event_bus: Arc<EventBus>,
}

impl TransactionService {
    pub fn new(session: Arc<SessionManager>, event_bus: Arc<EventBus>) -> Self {
        Self { session, event_bus }
    }

    /// Start buying a property; returns the new transaction id
    pub async fn initiate_transaction(&self, property_id: u64) -> AppResult<u64> {
        let backend = self.session.require_session()?;
        let transaction_id = backend.initiate_transaction(property_id).await?;

        info!(
            "Initiated transaction {} for property {}",
            transaction_id, property_id
        );
        self.event_bus
            .emit(TransactionInitiated::new(transaction_id, property_id));

        Ok(transaction_id)
    }

    pub async fn get_transaction(&self, transaction_id: u64) -> AppResult<Option<Transaction>> {
        self.session
            .reader()
            .await?
            .get_transaction(transaction_id)
            .await
    }

    pub async fn complete_transaction(&self, transaction_id: u64) -> AppResult<TransactionOutcome> {
        let backend = self.session.require_session()?;
        let completed = backend.complete_transaction(transaction_id).await?;

        if completed {
            self.event_bus.emit(TransactionCompleted::new(transaction_id));
        } else {
            warn!("Backend declined to complete transaction {}", transaction_id);
        }

        Ok(TransactionOutcome::from_flag(transaction_id, completed))
    }
}
