//! Want Wallet repository
//!
//! The movement ledger is authoritative. On load the stored balance is
//! checked against the ledger and corrected if the two disagree.

use std::sync::{Arc, RwLock};

use serde_json::Value;
use tracing::warn;

use super::backend::{keys, load_or_default, StorageBackend};
use crate::error::{FlowError, FlowResult};
use crate::models::{Money, WalletTransaction, WantWalletState};

pub struct WalletRepository {
    backend: Arc<dyn StorageBackend>,
    state: RwLock<WantWalletState>,
}

impl WalletRepository {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            state: RwLock::new(WantWalletState::default()),
        }
    }

    pub fn load(&self) -> FlowResult<()> {
        let mut loaded: WantWalletState = load_or_default(self.backend.as_ref(), keys::WANT_WALLET);

        if let Some(stale) = loaded.reconcile() {
            warn!(
                stored = %stale,
                ledger = %loaded.balance,
                "Want Wallet balance disagreed with its ledger, using the ledger sum"
            );
        }

        let mut state = self
            .state
            .write()
            .map_err(|e| FlowError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *state = loaded;
        Ok(())
    }

    pub fn save(&self) -> FlowResult<()> {
        self.backend.save(keys::WANT_WALLET, &self.blob()?)
    }

    pub fn blob(&self) -> FlowResult<Value> {
        let state = self
            .state
            .read()
            .map_err(|e| FlowError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(serde_json::to_value(&*state)?)
    }

    pub fn get(&self) -> FlowResult<WantWalletState> {
        let state = self
            .state
            .read()
            .map_err(|e| FlowError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(state.clone())
    }

    pub fn set(&self, wallet: WantWalletState) -> FlowResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|e| FlowError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *state = wallet;
        Ok(())
    }

    pub fn balance(&self) -> FlowResult<Money> {
        Ok(self.get()?.balance)
    }

    /// Append a movement, returning the new balance
    pub fn record(&self, entry: WalletTransaction) -> FlowResult<Money> {
        let mut state = self
            .state
            .write()
            .map_err(|e| FlowError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        state.record(entry);
        Ok(state.balance)
    }
}
