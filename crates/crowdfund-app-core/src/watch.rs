// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Wallet account-change subscription.
//!
//! The adapter forwards each `accountsChanged` callback into a channel; one
//! long-lived task drains it here and keeps the session in step with the
//! wallet's active account.

use crowdfund_abi::Address;
use futures::{Stream, StreamExt};
use tracing::debug;

use crate::app::CrowdfundApp;
use crate::clock_port::Clock;
use crate::provider_port::WalletProvider;
use crate::render_port::RenderPort;

/// Payload of the wallet's `accountsChanged` event (active account first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountsChanged(pub Vec<Address>);

/// Apply account changes until the stream ends, redrawing after each one.
pub async fn follow_account_changes<P, C, S, R>(app: &CrowdfundApp<P, C>, events: S, render: &R)
where
    P: WalletProvider,
    C: Clock,
    S: Stream<Item = AccountsChanged>,
    R: RenderPort,
{
    futures::pin_mut!(events);
    while let Some(AccountsChanged(accounts)) = events.next().await {
        debug!(count = accounts.len(), "wallet accounts changed");
        // Failures are already logged and toasted by the app.
        let _ = app.handle_accounts_changed(&accounts).await;
        render.request_redraw();
    }
    debug!("account change stream closed");
}
