// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error taxonomy for client operations.

use crate::provider_port::ProviderError;
use crowdfund_abi::{UnitsError, B256};
use thiserror::Error;

/// Why a client operation failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// No injected wallet provider on the page.
    #[error("no wallet provider found; install or enable a browser wallet")]
    NoProvider,
    /// The user declined the wallet prompt.
    #[error("request rejected in the wallet")]
    UserRejected,
    /// The wallet granted access but exposed no account.
    #[error("wallet returned no accounts")]
    NoAccount,
    /// The operation needs a connected session.
    #[error("wallet is not connected")]
    NotConnected,
    /// Contribution attempted with no campaign selected.
    #[error("no campaign selected")]
    NoCampaignSelected,
    /// The transaction was mined with a failure status.
    #[error("transaction {0} reverted")]
    Reverted(B256),
    /// JSON-RPC or transport failure.
    #[error("rpc failure: {0}")]
    Rpc(String),
    /// A decimal amount field could not be converted.
    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] UnitsError),
    /// The duration field is not a whole number of days.
    #[error("invalid duration {0:?}: expected a whole number of days")]
    InvalidDuration(String),
    /// The provider answered with something that does not decode.
    #[error("malformed response to {method}: {reason}")]
    Decode {
        /// RPC method or contract function signature.
        method: String,
        /// Decoder diagnostic.
        reason: String,
    },
}

impl ClientError {
    pub(crate) fn decode(method: &str, reason: impl ToString) -> Self {
        Self::Decode {
            method: method.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<ProviderError> for ClientError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Unavailable => Self::NoProvider,
            ProviderError::UserRejected => Self::UserRejected,
            other @ (ProviderError::Rpc { .. } | ProviderError::Transport(_)) => {
                Self::Rpc(other.to_string())
            }
        }
    }
}
