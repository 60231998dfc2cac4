// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Campaign creator: form input -> `createCampaign` -> confirmation.

use std::time::Duration;

use alloy_sol_types::SolEvent;
use crowdfund_abi::{parse_amount, Address, CampaignFactory, B256, U256};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::clock_port::Clock;
use crate::error::ClientError;
use crate::provider_port::WalletProvider;
use crate::rpc::{self, TransactionReceipt};
use crate::session::Session;

/// Create-campaign form buffer: the last value typed into each field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignDraft {
    /// Campaign title.
    pub title: String,
    /// Campaign description.
    pub description: String,
    /// Goal as a decimal currency amount, e.g. `"1.5"`.
    pub goal: String,
    /// Duration in whole days.
    pub duration_days: String,
}

/// Validated arguments for `createCampaign`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignRequest {
    /// Campaign title.
    pub title: String,
    /// Campaign description.
    pub description: String,
    /// Goal in smallest units.
    pub goal_amount: U256,
    /// Duration in days.
    pub duration_days: U256,
}

impl CampaignDraft {
    /// Convert the typed fields; nothing is sent if this fails.
    pub fn to_request(&self) -> Result<CampaignRequest, ClientError> {
        Ok(CampaignRequest {
            title: self.title.clone(),
            description: self.description.clone(),
            goal_amount: parse_amount(&self.goal)?,
            duration_days: parse_duration_days(&self.duration_days)?,
        })
    }
}

/// Parse a whole number of days.
pub fn parse_duration_days(input: &str) -> Result<U256, ClientError> {
    let trimmed = input.trim();
    trimmed
        .parse::<u64>()
        .map(U256::from)
        .map_err(|_| ClientError::InvalidDuration(trimmed.to_string()))
}

/// Decoded `CampaignCreated` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedCampaign {
    /// Factory-assigned campaign id.
    pub campaign_id: U256,
    /// Address of the new campaign contract.
    pub address: Address,
}

/// Outcome of a confirmed `createCampaign` transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampaignCreation {
    /// Transaction hash.
    pub tx_hash: B256,
    /// The creation event, when the receipt carried one.
    pub created: Option<CreatedCampaign>,
}

/// Submit `createCampaign` through the session's signer and wait for confirmation.
pub async fn create_campaign<P, C>(
    provider: &P,
    clock: &C,
    session: &Session,
    request: &CampaignRequest,
    poll_interval: Duration,
) -> Result<CampaignCreation, ClientError>
where
    P: WalletProvider,
    C: Clock,
{
    let factory = session.factory();
    let tx_hash = factory
        .create_campaign(
            provider,
            session.signer(),
            &request.title,
            &request.description,
            request.goal_amount,
            request.duration_days,
        )
        .await?;
    info!(%tx_hash, goal = %request.goal_amount, "createCampaign submitted");

    let receipt = rpc::wait_for_receipt(provider, clock, tx_hash, poll_interval).await?;
    let created = created_campaign(&receipt, factory.address());
    if created.is_none() {
        warn!(%tx_hash, "createCampaign receipt carried no CampaignCreated event");
    }
    Ok(CampaignCreation { tx_hash, created })
}

/// Find the factory's `CampaignCreated` event among the receipt logs.
pub fn created_campaign(receipt: &TransactionReceipt, factory: Address) -> Option<CreatedCampaign> {
    receipt
        .logs
        .iter()
        .filter(|log| log.address == factory)
        .find_map(|log| {
            CampaignFactory::CampaignCreated::decode_raw_log(log.topics.iter().copied(), &log.data, true)
                .ok()
        })
        .map(|event| CreatedCampaign {
            campaign_id: event.campaignId,
            address: event.campaignAddress,
        })
}
