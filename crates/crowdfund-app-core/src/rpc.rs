// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Typed JSON-RPC requests over the [`WalletProvider`] port.

use std::time::Duration;

use alloy_sol_types::SolCall;
use crowdfund_abi::{Address, Bytes, B256, U256, U64};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::clock_port::Clock;
use crate::error::ClientError;
use crate::provider_port::WalletProvider;

/// Prompt the wallet for account access (`eth_requestAccounts`).
pub async fn request_accounts<P: WalletProvider>(provider: &P) -> Result<Vec<Address>, ClientError> {
    let value = provider.request("eth_requestAccounts", json!([])).await?;
    decode("eth_requestAccounts", value)
}

/// Accounts the wallet currently exposes, without prompting (`eth_accounts`).
pub async fn accounts<P: WalletProvider>(provider: &P) -> Result<Vec<Address>, ClientError> {
    let value = provider.request("eth_accounts", json!([])).await?;
    decode("eth_accounts", value)
}

/// Read-only contract call against the latest block.
pub async fn call<P, C>(provider: &P, to: Address, call: &C) -> Result<C::Return, ClientError>
where
    P: WalletProvider,
    C: SolCall,
{
    debug!(%to, function = C::SIGNATURE, "eth_call");
    let data = Bytes::from(call.abi_encode());
    let value = provider
        .request("eth_call", json!([{ "to": to, "data": data }, "latest"]))
        .await?;
    let raw: Bytes = decode(C::SIGNATURE, value)?;
    C::abi_decode_returns(&raw, true).map_err(|err| ClientError::decode(C::SIGNATURE, err))
}

/// Transaction handed to the wallet for signing; the wallet fills gas and nonce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// Signing account.
    pub from: Address,
    /// Target contract.
    pub to: Address,
    /// ABI-encoded calldata.
    pub data: Bytes,
    /// Attached value in smallest units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
}

impl TransactionRequest {
    /// Build a request calling `call` on `to` from `from`.
    pub fn new<C: SolCall>(from: Address, to: Address, call: &C) -> Self {
        Self {
            from,
            to,
            data: Bytes::from(call.abi_encode()),
            value: None,
        }
    }

    /// Attach value to the call.
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }
}

/// Submit a state-changing transaction; returns its hash once the wallet has signed it.
pub async fn send_transaction<P: WalletProvider>(
    provider: &P,
    tx: &TransactionRequest,
) -> Result<B256, ClientError> {
    let value = provider
        .request("eth_sendTransaction", json!([tx]))
        .await?;
    decode("eth_sendTransaction", value)
}

/// Log entry of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReceiptLog {
    /// Emitting contract.
    pub address: Address,
    /// Indexed topics; the first is the event signature hash.
    pub topics: Vec<B256>,
    /// Non-indexed ABI-encoded data.
    pub data: Bytes,
}

/// The subset of a transaction receipt the client reads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    /// Hash of the mined transaction.
    pub transaction_hash: B256,
    /// `1` on success, `0` on revert; absent on pre-Byzantium chains.
    #[serde(default)]
    pub status: Option<U64>,
    /// Emitted logs.
    #[serde(default)]
    pub logs: Vec<ReceiptLog>,
}

impl TransactionReceipt {
    /// Whether the transaction executed without reverting.
    pub fn succeeded(&self) -> bool {
        self.status.is_none_or(|status| !status.is_zero())
    }
}

/// Fetch a receipt; `None` while the transaction is still pending.
pub async fn transaction_receipt<P: WalletProvider>(
    provider: &P,
    hash: B256,
) -> Result<Option<TransactionReceipt>, ClientError> {
    let value = provider
        .request("eth_getTransactionReceipt", json!([hash]))
        .await?;
    decode("eth_getTransactionReceipt", value)
}

/// Poll until `hash` is mined. Reverted transactions become [`ClientError::Reverted`].
///
/// There is no timeout: a stalled wallet or network keeps this flow suspended.
pub async fn wait_for_receipt<P, C>(
    provider: &P,
    clock: &C,
    hash: B256,
    poll_interval: Duration,
) -> Result<TransactionReceipt, ClientError>
where
    P: WalletProvider,
    C: Clock,
{
    loop {
        if let Some(receipt) = transaction_receipt(provider, hash).await? {
            if receipt.succeeded() {
                return Ok(receipt);
            }
            return Err(ClientError::Reverted(hash));
        }
        debug!(%hash, "transaction pending");
        clock.sleep(poll_interval).await;
    }
}

fn decode<T: DeserializeOwned>(method: &str, value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(|err| ClientError::decode(method, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_request_serializes_as_rpc_object() {
        let tx = TransactionRequest {
            from: Address::repeat_byte(0x11),
            to: Address::repeat_byte(0x22),
            data: Bytes::from(vec![0xde, 0xad]),
            value: None,
        };
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["data"], "0xdead");
        assert!(value.get("value").is_none());

        let with_value = serde_json::to_value(tx.with_value(U256::from(255u64))).unwrap();
        assert_eq!(with_value["value"], "0xff");
    }

    #[test]
    fn receipt_status_zero_is_failure() {
        let receipt: TransactionReceipt = serde_json::from_value(json!({
            "transactionHash": B256::repeat_byte(1),
            "status": "0x0",
            "logs": [],
            "blockNumber": "0x10"
        }))
        .unwrap();
        assert!(!receipt.succeeded());
    }

    #[test]
    fn receipt_without_status_counts_as_success() {
        let receipt: TransactionReceipt = serde_json::from_value(json!({
            "transactionHash": B256::repeat_byte(1)
        }))
        .unwrap();
        assert!(receipt.succeeded());
        assert!(receipt.logs.is_empty());
    }

    #[test]
    fn null_receipt_decodes_as_pending() {
        let pending: Option<TransactionReceipt> =
            decode("eth_getTransactionReceipt", Value::Null).unwrap();
        assert!(pending.is_none());
    }
}
