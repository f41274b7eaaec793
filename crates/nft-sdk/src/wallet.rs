use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::transaction::SignableTransaction;

/// Failure reported by a wallet while signing or executing.
#[derive(Clone, Debug, Error)]
#[error("{0}")]
pub struct WalletError(pub String);

/// The node's answer to an executed transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub digest: String,
    #[serde(default)]
    pub effects: Value,
}

/// Signs and submits transactions on behalf of an account.
///
/// The SDK only builds transactions; keys never pass through it.
#[async_trait]
pub trait Wallet: Send + Sync {
    async fn sign_and_execute_transaction(
        &self,
        transaction: SignableTransaction,
    ) -> Result<TransactionResponse, WalletError>;
}
