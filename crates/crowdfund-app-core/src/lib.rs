// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for the crowdfund client (wallet session,
//! campaign directory, campaign detail, contributions, config, toasts).
//! Keeps the browser adapter thin and framework-agnostic: the chain is reached
//! only through the [`provider_port::WalletProvider`] port.

pub mod app;
pub mod campaign;
pub mod clock_port;
pub mod config;
pub mod contracts;
pub mod contribution;
pub mod creator;
pub mod directory;
pub mod error;
pub mod explorer;
pub mod navigator_port;
pub mod provider_port;
pub mod render_port;
pub mod rpc;
pub mod session;
pub mod state;
pub mod toast;
pub mod view;
pub mod watch;

pub use app::{Action, CrowdfundApp};
pub use error::ClientError;
