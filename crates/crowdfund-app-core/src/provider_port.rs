// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Wallet provider port: the EIP-1193 `request({ method, params })` surface.
//!
//! The browser adapter forwards to the injected `window.ethereum`; tests use a
//! fake chain. Signing and transport are entirely the provider's business.

use serde_json::Value;
use thiserror::Error;

/// EIP-1193 error code for a request the user declined.
pub const USER_REJECTED_CODE: i64 = 4001;

/// Failure reported by (or instead of) the wallet provider.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// No injected provider exists on the page.
    #[error("no injected wallet provider")]
    Unavailable,
    /// The user declined the request in the wallet.
    #[error("user rejected the request")]
    UserRejected,
    /// JSON-RPC error object returned by the provider or node.
    #[error("rpc error {code}: {message}")]
    Rpc {
        /// JSON-RPC / EIP-1193 error code.
        code: i64,
        /// Provider-supplied message.
        message: String,
    },
    /// The request never produced a JSON-RPC answer.
    #[error("transport error: {0}")]
    Transport(String),
}

impl ProviderError {
    /// Classify an error object by its EIP-1193 code.
    pub fn from_code(code: i64, message: impl Into<String>) -> Self {
        if code == USER_REJECTED_CODE {
            Self::UserRejected
        } else {
            Self::Rpc {
                code,
                message: message.into(),
            }
        }
    }
}

/// Injected wallet provider (EIP-1193).
#[allow(async_fn_in_trait)]
pub trait WalletProvider {
    /// Issue one JSON-RPC request and return its `result` value.
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_4001_is_user_rejection() {
        assert_eq!(
            ProviderError::from_code(4001, "User denied"),
            ProviderError::UserRejected
        );
        assert_eq!(
            ProviderError::from_code(-32000, "execution reverted"),
            ProviderError::Rpc {
                code: -32000,
                message: "execution reverted".into()
            }
        );
    }
}
