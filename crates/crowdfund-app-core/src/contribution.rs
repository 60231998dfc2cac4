// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Contribution submitter.

use std::time::Duration;

use crowdfund_abi::{Address, B256, U256};
use tracing::info;

use crate::clock_port::Clock;
use crate::contracts::CampaignContract;
use crate::error::ClientError;
use crate::provider_port::WalletProvider;
use crate::rpc;
use crate::session;

/// Send `amount` to `campaign` via `contribute()` and wait for confirmation.
///
/// The signer is re-read from the wallet rather than taken from the session.
/// The displayed campaign detail is not refreshed.
pub async fn contribute<P, C>(
    provider: &P,
    clock: &C,
    campaign: Address,
    amount: U256,
    poll_interval: Duration,
) -> Result<B256, ClientError>
where
    P: WalletProvider,
    C: Clock,
{
    let signer = session::fresh_signer(provider).await?;
    let tx_hash = CampaignContract::new(campaign)
        .contribute(provider, &signer, amount)
        .await?;
    info!(%tx_hash, %campaign, %amount, "contribute submitted");
    rpc::wait_for_receipt(provider, clock, tx_hash, poll_interval).await?;
    Ok(tx_hash)
}
