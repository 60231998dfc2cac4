// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Wallet session: the connected account and its signer-bound factory handle.

use crowdfund_abi::Address;
use tracing::info;

use crate::contracts::{FactoryContract, Signer};
use crate::error::ClientError;
use crate::provider_port::WalletProvider;
use crate::rpc;

/// Live wallet session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    signer: Signer,
    factory: FactoryContract,
}

impl Session {
    /// Connected account.
    pub fn address(&self) -> Address {
        self.signer.account()
    }

    /// Signer for the connected account.
    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    /// Factory handle bound to this session.
    pub fn factory(&self) -> &FactoryContract {
        &self.factory
    }
}

/// Request account access and bind the first account to the factory.
pub async fn connect<P: WalletProvider>(
    provider: &P,
    factory_address: Address,
) -> Result<Session, ClientError> {
    let accounts = rpc::request_accounts(provider).await?;
    let account = accounts.first().copied().ok_or(ClientError::NoAccount)?;
    info!(%account, factory = %factory_address, "wallet connected");
    Ok(Session {
        signer: Signer::new(account),
        factory: FactoryContract::new(factory_address),
    })
}

/// Signer for whichever account the wallet exposes right now.
pub async fn fresh_signer<P: WalletProvider>(provider: &P) -> Result<Signer, ClientError> {
    let accounts = rpc::accounts(provider).await?;
    accounts
        .first()
        .copied()
        .map(Signer::new)
        .ok_or(ClientError::NotConnected)
}
