// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Typed handles for the factory and campaign contracts.
//!
//! Handles are plain addresses; the provider is passed per call so a handle
//! can live in [`AppState`](crate::state::AppState) without borrowing it.
//! State-changing calls require a [`Signer`] and only submit: confirmation is
//! awaited separately through [`rpc::wait_for_receipt`].

use crowdfund_abi::{Address, Campaign, CampaignFactory, B256, U256};

use crate::error::ClientError;
use crate::provider_port::WalletProvider;
use crate::rpc::{self, TransactionRequest};

/// Capability to submit transactions from one wallet account.
///
/// Only obtainable from the wallet (see [`session`](crate::session)).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signer {
    account: Address,
}

impl Signer {
    pub(crate) fn new(account: Address) -> Self {
        Self { account }
    }

    /// Account the wallet signs with.
    pub fn account(&self) -> Address {
        self.account
    }
}

/// The campaign factory contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryContract {
    address: Address,
}

impl FactoryContract {
    /// Handle for the factory deployed at `address`.
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Contract address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// `campaignCount()`.
    pub async fn campaign_count<P: WalletProvider>(&self, provider: &P) -> Result<U256, ClientError> {
        let ret = rpc::call(provider, self.address, &CampaignFactory::campaignCountCall {}).await?;
        Ok(ret._0)
    }

    /// `campaigns(index)`.
    pub async fn campaign_at<P: WalletProvider>(
        &self,
        provider: &P,
        index: U256,
    ) -> Result<Address, ClientError> {
        let ret = rpc::call(provider, self.address, &CampaignFactory::campaignsCall { index }).await?;
        Ok(ret._0)
    }

    /// Submit `createCampaign(...)`; returns the transaction hash.
    pub async fn create_campaign<P: WalletProvider>(
        &self,
        provider: &P,
        signer: &Signer,
        title: &str,
        description: &str,
        goal_amount: U256,
        duration_days: U256,
    ) -> Result<B256, ClientError> {
        let call = CampaignFactory::createCampaignCall {
            _title: title.to_string(),
            _description: description.to_string(),
            _goalAmount: goal_amount,
            _durationInDays: duration_days,
        };
        let tx = TransactionRequest::new(signer.account(), self.address, &call);
        rpc::send_transaction(provider, &tx).await
    }
}

/// One campaign contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampaignContract {
    address: Address,
}

impl CampaignContract {
    /// Handle for the campaign deployed at `address`.
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Contract address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// `title()`.
    pub async fn title<P: WalletProvider>(&self, provider: &P) -> Result<String, ClientError> {
        Ok(rpc::call(provider, self.address, &Campaign::titleCall {}).await?._0)
    }

    /// `description()`.
    pub async fn description<P: WalletProvider>(&self, provider: &P) -> Result<String, ClientError> {
        Ok(rpc::call(provider, self.address, &Campaign::descriptionCall {}).await?._0)
    }

    /// `goalAmount()` in smallest units.
    pub async fn goal_amount<P: WalletProvider>(&self, provider: &P) -> Result<U256, ClientError> {
        Ok(rpc::call(provider, self.address, &Campaign::goalAmountCall {}).await?._0)
    }

    /// `currentAmount()` in smallest units.
    pub async fn current_amount<P: WalletProvider>(&self, provider: &P) -> Result<U256, ClientError> {
        Ok(rpc::call(provider, self.address, &Campaign::currentAmountCall {}).await?._0)
    }

    /// `deadline()` as unix seconds.
    pub async fn deadline<P: WalletProvider>(&self, provider: &P) -> Result<U256, ClientError> {
        Ok(rpc::call(provider, self.address, &Campaign::deadlineCall {}).await?._0)
    }

    /// Submit `contribute()` carrying `value`; returns the transaction hash.
    pub async fn contribute<P: WalletProvider>(
        &self,
        provider: &P,
        signer: &Signer,
        value: U256,
    ) -> Result<B256, ClientError> {
        let tx = TransactionRequest::new(signer.account(), self.address, &Campaign::contributeCall {})
            .with_value(value);
        rpc::send_transaction(provider, &tx).await
    }
}
