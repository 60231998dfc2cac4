// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Campaign directory: the factory's campaigns in creation order.

use crowdfund_abi::{Address, U256};
use serde::Serialize;
use tracing::debug;

use crate::error::ClientError;
use crate::provider_port::WalletProvider;
use crate::session::Session;

/// One deployed campaign as reported by the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CampaignRef {
    /// 1-based position in factory creation order.
    pub position: u64,
    /// Campaign contract address.
    pub address: Address,
}

/// Read `campaignCount()` then each `campaigns(i)`, one at a time.
///
/// The result is a snapshot; later on-chain creations appear only on the next fetch.
pub async fn list_campaigns<P: WalletProvider>(
    provider: &P,
    session: &Session,
) -> Result<Vec<CampaignRef>, ClientError> {
    let factory = session.factory();
    let count = factory.campaign_count(provider).await?;
    let count = u64::try_from(count)
        .map_err(|err| ClientError::decode("campaignCount()", err))?;
    debug!(count, factory = %factory.address(), "fetching campaign directory");

    let mut campaigns = Vec::new();
    for index in 0..count {
        let address = factory.campaign_at(provider, U256::from(index)).await?;
        campaigns.push(CampaignRef {
            position: index + 1,
            address,
        });
    }
    Ok(campaigns)
}
