// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Contract bindings and currency unit conversion for the crowdfund client.
//!
//! This crate is intentionally small and **WASM-friendly**:
//!
//! - [`bindings`] declares the factory and campaign contract interfaces with
//!   `alloy-sol-types`, so calldata, return values and the `CampaignCreated`
//!   event are encoded and decoded by the generated types rather than by hand.
//! - [`units`] converts between human decimal amounts ("1.5") and the chain's
//!   smallest-unit integers (`1_500_000_000_000_000_000`).
//!
//! Nothing here talks to a provider; transport lives in `crowdfund-app-core`.

pub mod bindings;
pub mod units;

pub use alloy_primitives::{address, Address, Bytes, B256, U256, U64};
pub use bindings::{Campaign, CampaignFactory};
pub use units::{format_amount, parse_amount, UnitsError, DECIMALS};
