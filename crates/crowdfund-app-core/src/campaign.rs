// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Campaign detail viewer.

use crowdfund_abi::{Address, U256};
use tracing::debug;

use crate::clock_port::{Clock, SECONDS_PER_DAY};
use crate::contracts::CampaignContract;
use crate::error::ClientError;
use crate::provider_port::WalletProvider;

/// Full progress, in basis points.
pub const FULL_PROGRESS_BPS: u32 = 10_000;

/// Snapshot of one campaign's on-chain state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignDetail {
    /// Campaign contract address.
    pub address: Address,
    /// Campaign title.
    pub title: String,
    /// Campaign description.
    pub description: String,
    /// Funding goal in smallest units.
    pub goal_amount: U256,
    /// Amount raised so far in smallest units.
    pub current_amount: U256,
    /// Deadline as unix seconds.
    pub deadline: U256,
    /// Whole days left at load time; zero once the deadline has passed.
    pub days_remaining: u64,
}

impl CampaignDetail {
    /// Raised / goal in basis points, clamped to [`FULL_PROGRESS_BPS`].
    /// A zero goal reads as no progress.
    pub fn progress_bps(&self) -> u32 {
        if self.goal_amount.is_zero() {
            return 0;
        }
        let bps = self.current_amount.saturating_mul(U256::from(FULL_PROGRESS_BPS)) / self.goal_amount;
        u32::try_from(bps).map_or(FULL_PROGRESS_BPS, |bps| bps.min(FULL_PROGRESS_BPS))
    }
}

/// `max(0, floor((deadline - now) / 86400))`.
pub fn days_remaining(deadline: U256, now_secs: u64) -> u64 {
    let deadline = u64::try_from(deadline).unwrap_or(u64::MAX);
    deadline.saturating_sub(now_secs) / SECONDS_PER_DAY
}

/// Read the five campaign getters (sequentially) and derive days remaining.
///
/// Uses only read calls; no session or signer is involved.
pub async fn load_details<P, C>(
    provider: &P,
    clock: &C,
    address: Address,
) -> Result<CampaignDetail, ClientError>
where
    P: WalletProvider,
    C: Clock,
{
    let contract = CampaignContract::new(address);
    let title = contract.title(provider).await?;
    let description = contract.description(provider).await?;
    let goal_amount = contract.goal_amount(provider).await?;
    let current_amount = contract.current_amount(provider).await?;
    let deadline = contract.deadline(provider).await?;
    let days_remaining = days_remaining(deadline, clock.now_unix_secs());
    debug!(%address, days_remaining, "campaign details loaded");

    Ok(CampaignDetail {
        address,
        title,
        description,
        goal_amount,
        current_amount,
        deadline,
        days_remaining,
    })
}
