// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Wallet connection, account changes and provider failures.

use crowdfund_abi::{Address, U256};
use crowdfund_app_core::config::ClientConfig;
use crowdfund_app_core::toast::ToastKind;
use crowdfund_app_core::watch::{follow_account_changes, AccountsChanged};
use crowdfund_app_core::{ClientError, CrowdfundApp};
use crowdfund_dry_tests::{ether, CountingRender, FakeCampaign, FakeChain, ManualClock};
use futures::executor::block_on;
use futures::stream;

fn account() -> Address {
    Address::repeat_byte(0xa1)
}

fn app_on(chain: &FakeChain) -> CrowdfundApp<FakeChain, ManualClock> {
    CrowdfundApp::new(chain.clone(), ManualClock::at_unix_secs(1_000), ClientConfig::default())
}

fn wallet() -> FakeChain {
    FakeChain::new(ClientConfig::default().factory_address, account())
}

#[test]
fn missing_provider_reports_no_provider() {
    let app = app_on(&FakeChain::missing());
    assert_eq!(block_on(app.connect()), Err(ClientError::NoProvider));
    assert!(app.state().session().is_none());

    let page = app.view();
    assert!(page.connected.is_none());
    assert_eq!(page.toasts.len(), 1);
    assert_eq!(page.toasts[0].kind, ToastKind::Error);
    assert_eq!(page.toasts[0].title, "Could not connect wallet");
}

#[test]
fn declined_authorization_leaves_disconnected() {
    let chain = wallet();
    chain.reject_authorization(true);
    let app = app_on(&chain);
    assert_eq!(block_on(app.connect()), Err(ClientError::UserRejected));
    assert!(app.state().session().is_none());
    assert_eq!(app.view().toasts[0].kind, ToastKind::Error);
}

#[test]
fn wallet_without_accounts_is_an_error() {
    let chain = wallet();
    chain.set_accounts(Vec::new());
    let app = app_on(&chain);
    assert_eq!(block_on(app.connect()), Err(ClientError::NoAccount));
    assert!(app.state().session().is_none());
}

#[test]
fn reconnect_replaces_session() {
    let chain = wallet();
    let app = app_on(&chain);
    block_on(app.connect()).unwrap();

    let other = Address::repeat_byte(0xb2);
    chain.set_accounts(vec![other, account()]);
    assert_eq!(block_on(app.connect()), Ok(other));
    assert_eq!(app.state().session().map(|s| s.address()), Some(other));
}

#[test]
fn account_change_rebuilds_session_for_new_account() {
    let chain = wallet();
    let app = app_on(&chain);
    block_on(app.connect()).unwrap();

    let other = Address::repeat_byte(0xb2);
    chain.set_accounts(vec![other]);
    block_on(app.handle_accounts_changed(&[other])).unwrap();
    assert_eq!(app.state().session().map(|s| s.address()), Some(other));
}

#[test]
fn empty_account_change_clears_session_but_keeps_data() {
    let chain = wallet();
    chain.add_campaign(FakeCampaign::new("A", ether(1), U256::ZERO));
    let app = app_on(&chain);
    block_on(app.connect()).unwrap();
    block_on(app.list_campaigns()).unwrap();

    block_on(app.handle_accounts_changed(&[])).unwrap();
    assert!(app.state().session().is_none());
    assert!(app.view().connected.is_none());
    assert_eq!(app.state().campaigns().len(), 1);
    assert_eq!(block_on(app.list_campaigns()), Ok(None));

    let toasts = app.view().toasts;
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Warn);
    assert_eq!(toasts[0].title, "Wallet disconnected");
}

#[test]
fn empty_account_change_while_disconnected_is_silent() {
    let app = app_on(&wallet());
    block_on(app.handle_accounts_changed(&[])).unwrap();
    assert!(app.state().session().is_none());
    assert!(app.view().toasts.is_empty());
}

#[test]
fn account_subscription_is_claimed_once() {
    let app = app_on(&wallet());
    assert!(app.claim_account_subscription());
    assert!(!app.claim_account_subscription());
    assert!(!app.claim_account_subscription());
}

#[test]
fn followed_changes_update_session_and_redraw() {
    let chain = wallet();
    let app = app_on(&chain);
    block_on(app.connect()).unwrap();
    let render = CountingRender::default();

    let other = Address::repeat_byte(0xb2);
    chain.set_accounts(vec![other]);
    let events = stream::iter(vec![
        AccountsChanged(vec![other]),
        AccountsChanged(Vec::new()),
        AccountsChanged(vec![other]),
    ]);
    block_on(follow_account_changes(&app, events, &render));

    assert_eq!(render.redraws(), 3);
    assert_eq!(app.state().session().map(|s| s.address()), Some(other));
    assert_eq!(chain.count("eth_requestAccounts"), 3);
}

#[test]
fn failed_reconnect_after_change_still_redraws() {
    let chain = wallet();
    let app = app_on(&chain);
    block_on(app.connect()).unwrap();
    chain.reject_authorization(true);
    let render = CountingRender::default();

    let events = stream::iter(vec![AccountsChanged(vec![Address::repeat_byte(0xb2)])]);
    block_on(follow_account_changes(&app, events, &render));

    assert_eq!(render.redraws(), 1);
    // The previous session survives a failed reconnect.
    assert_eq!(app.state().session().map(|s| s.address()), Some(account()));
    assert_eq!(app.view().toasts[0].title, "Could not connect wallet");
}

#[test]
fn toasts_expire_and_can_be_dismissed() {
    let chain = FakeChain::missing();
    let clock = ManualClock::at_unix_secs(1_000);
    let app = CrowdfundApp::new(chain, clock.clone(), ClientConfig::default());

    let _ = block_on(app.connect());
    let id = app.view().toasts[0].id;
    assert!(app.dismiss_toast(id));
    assert!(app.view().toasts.is_empty());

    let _ = block_on(app.connect());
    assert_eq!(app.view().toasts.len(), 1);
    clock.advance(std::time::Duration::from_millis(6_001));
    assert!(app.view().toasts.is_empty());
}
