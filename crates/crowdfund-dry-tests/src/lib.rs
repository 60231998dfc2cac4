// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for crowdfund crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`chain`] - Fake EIP-1193 wallet provider backed by in-memory factory and campaign contracts
//! - [`clock`] - Manual clock that advances when slept on
//! - [`config`] - In-memory config store fake for testing without a page
//! - [`ports`] - Recording navigator and redraw-counting render port

pub mod chain;
pub mod clock;
pub mod config;
pub mod ports;

// Re-export commonly used items at crate root for convenience
pub use chain::{ether, FakeCampaign, FakeChain, SentTransaction};
pub use clock::ManualClock;
pub use config::InMemoryConfigStore;
pub use ports::{CountingRender, RecordingNavigator};
