// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! End-to-end client flows against the fake chain.

use alloy_sol_types::SolCall;
use crowdfund_abi::{Address, Campaign, CampaignFactory, U256};
use crowdfund_app_core::config::ClientConfig;
use crowdfund_app_core::creator::CampaignDraft;
use crowdfund_app_core::state::DraftField;
use crowdfund_app_core::toast::ToastKind;
use crowdfund_app_core::view::NO_CAMPAIGNS;
use crowdfund_app_core::{ClientError, CrowdfundApp};
use crowdfund_dry_tests::{ether, FakeCampaign, FakeChain, ManualClock, RecordingNavigator};
use futures::executor::block_on;

const NOW: u64 = 1_700_000_000;

fn factory() -> Address {
    ClientConfig::default().factory_address
}

fn account() -> Address {
    Address::repeat_byte(0xa1)
}

fn setup() -> (FakeChain, ManualClock, CrowdfundApp<FakeChain, ManualClock>) {
    let chain = FakeChain::new(factory(), account());
    chain.set_block_time(NOW);
    let clock = ManualClock::at_unix_secs(NOW);
    let app = CrowdfundApp::new(chain.clone(), clock.clone(), ClientConfig::default());
    (chain, clock, app)
}

fn connected() -> (FakeChain, ManualClock, CrowdfundApp<FakeChain, ManualClock>) {
    let (chain, clock, app) = setup();
    block_on(app.connect()).unwrap();
    (chain, clock, app)
}

fn draft(title: &str, goal: &str, days: &str) -> CampaignDraft {
    CampaignDraft {
        title: title.into(),
        description: format!("{title} description"),
        goal: goal.into(),
        duration_days: days.into(),
    }
}

#[test]
fn connect_exposes_account_and_empty_directory() {
    let (_chain, _clock, app) = connected();
    assert_eq!(app.state().session().map(|s| s.address()), Some(account()));

    let listed = block_on(app.list_campaigns()).unwrap();
    assert_eq!(listed, Some(Vec::new()));

    let page = app.view();
    let connected = page.connected.unwrap();
    assert_eq!(
        connected.account_label,
        format!("Connected as: {}", account())
    );
    assert!(connected.directory.entries.is_empty());
    assert_eq!(connected.directory.empty_message, Some(NO_CAMPAIGNS));
}

#[test]
fn directory_lists_campaigns_in_factory_order() {
    let (chain, _clock, app) = connected();
    let a = chain.add_campaign(FakeCampaign::new("A", ether(1), U256::ZERO));
    let b = chain.add_campaign(FakeCampaign::new("B", ether(2), U256::ZERO));

    let listed = block_on(app.list_campaigns()).unwrap().unwrap();
    let addresses: Vec<_> = listed.iter().map(|c| c.address).collect();
    assert_eq!(addresses, vec![a, b]);
    assert_eq!(listed[0].position, 1);
    assert_eq!(listed[1].position, 2);

    let page = app.view();
    let entries = page.connected.unwrap().directory.entries;
    assert_eq!(entries[0].label, "Campaign #1");
    assert_eq!(entries[1].label, "Campaign #2");
    assert_eq!(
        entries[1].explorer_url,
        format!("https://sepolia.etherscan.io/address/{b}")
    );
}

#[test]
fn listing_twice_without_changes_is_identical() {
    let (chain, _clock, app) = connected();
    chain.add_campaign(FakeCampaign::new("A", ether(1), U256::ZERO));
    let first = block_on(app.list_campaigns()).unwrap();
    let second = block_on(app.list_campaigns()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn listing_without_session_does_nothing() {
    let (chain, _clock, app) = setup();
    chain.add_campaign(FakeCampaign::new("A", ether(1), U256::ZERO));
    assert_eq!(block_on(app.list_campaigns()), Ok(None));
    assert_eq!(chain.count("eth_call"), 0);
    assert!(app.state().campaigns().is_empty());
}

#[test]
fn failed_listing_keeps_previous_snapshot() {
    let (chain, _clock, app) = connected();
    chain.add_campaign(FakeCampaign::new("A", ether(1), U256::ZERO));
    block_on(app.list_campaigns()).unwrap();

    chain.add_campaign(FakeCampaign::new("B", ether(1), U256::ZERO));
    chain.fail_next("eth_call");
    let err = block_on(app.list_campaigns()).unwrap_err();
    assert!(matches!(err, ClientError::Rpc(_)));
    assert_eq!(app.state().campaigns().len(), 1);

    let toasts = app.view().toasts;
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Error);
    assert_eq!(toasts[0].title, "Could not fetch campaigns");
}

#[test]
fn details_show_amounts_progress_and_days() {
    let (chain, _clock, app) = connected();
    let address = chain.add_campaign(
        FakeCampaign::new("Well", ether(5), ether(2)).with_deadline(NOW + 3 * 86_400 + 60),
    );

    block_on(app.load_details(address)).unwrap();
    let detail = app.view().connected.unwrap().detail.unwrap();
    assert_eq!(detail.title, "Well");
    assert_eq!(detail.description, "Well description");
    assert_eq!(detail.goal, "5");
    assert_eq!(detail.current, "2");
    assert_eq!(detail.progress_width, "40%");
    assert_eq!(detail.time_remaining, "3 day(s)");
}

#[test]
fn expired_campaign_shows_zero_days() {
    let (chain, _clock, app) = connected();
    let address =
        chain.add_campaign(FakeCampaign::new("Old", ether(1), U256::ZERO).with_deadline(NOW - 1_000));
    block_on(app.load_details(address)).unwrap();
    assert_eq!(app.state().selected().unwrap().days_remaining, 0);
    assert_eq!(
        app.view().connected.unwrap().detail.unwrap().time_remaining,
        "0 day(s)"
    );
}

#[test]
fn failed_load_keeps_previous_selection() {
    let (chain, _clock, app) = connected();
    let first = chain.add_campaign(FakeCampaign::new("First", ether(1), U256::ZERO));
    block_on(app.load_details(first)).unwrap();

    // No contract lives here; every read returns empty data.
    let err = block_on(app.load_details(Address::repeat_byte(0x99))).unwrap_err();
    assert!(matches!(err, ClientError::Decode { .. }));
    assert_eq!(app.state().selected().unwrap().address, first);
}

#[test]
fn selecting_another_campaign_replaces_detail() {
    let (chain, _clock, app) = connected();
    let a = chain.add_campaign(FakeCampaign::new("A", ether(1), U256::ZERO));
    let b = chain.add_campaign(FakeCampaign::new("B", ether(1), U256::ZERO));
    block_on(app.load_details(a)).unwrap();
    block_on(app.load_details(b)).unwrap();
    assert_eq!(app.state().selected().unwrap().title, "B");
}

#[test]
fn create_campaign_submits_converted_values_and_refreshes() {
    let (chain, _clock, app) = connected();
    let creation = block_on(app.create_campaign(&draft("Library", "1.5", "30"))).unwrap();

    let sent = chain.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].from, account());
    assert_eq!(sent[0].to, factory());
    assert_eq!(sent[0].value, U256::ZERO);
    let call = CampaignFactory::createCampaignCall::abi_decode(&sent[0].data, true).unwrap();
    assert_eq!(call._title, "Library");
    assert_eq!(call._goalAmount, U256::from(1_500_000_000_000_000_000u128));
    assert_eq!(call._durationInDays, U256::from(30u64));

    let created = creation.created.unwrap();
    assert_eq!(created.campaign_id, U256::ZERO);
    let stored = chain.campaign(created.address).unwrap();
    assert_eq!(stored.deadline, U256::from(NOW + 30 * 86_400));

    assert_eq!(app.state().campaigns().len(), 1);
    assert_eq!(app.state().campaigns()[0].address, created.address);

    let toasts = app.view().toasts;
    let info = toasts.iter().find(|t| t.kind == ToastKind::Info).unwrap();
    assert_eq!(info.title, "Campaign created");
    assert!(info.body.as_deref().unwrap().contains(&created.address.to_string()));
}

#[test]
fn create_from_typed_draft() {
    let (chain, _clock, app) = connected();
    app.set_draft(DraftField::Title, "Roof");
    app.set_draft(DraftField::Description, "Fix the roof");
    app.set_draft(DraftField::Goal, "2");
    app.set_draft(DraftField::Duration, "7");
    block_on(app.create_campaign_from_draft()).unwrap();

    let address = chain.campaign_addresses()[0];
    let stored = chain.campaign(address).unwrap();
    assert_eq!(stored.title, "Roof");
    assert_eq!(stored.description, "Fix the roof");
    assert_eq!(stored.goal, ether(2));
}

#[test]
fn create_with_bad_goal_sends_nothing() {
    let (chain, _clock, app) = connected();
    let err = block_on(app.create_campaign(&draft("X", "abc", "3"))).unwrap_err();
    assert!(matches!(err, ClientError::InvalidAmount(_)));
    assert!(chain.sent().is_empty());
    assert_eq!(app.view().toasts[0].title, "Campaign was not created");
}

#[test]
fn create_without_session_is_rejected() {
    let (chain, _clock, app) = setup();
    let err = block_on(app.create_campaign(&draft("X", "1", "3"))).unwrap_err();
    assert_eq!(err, ClientError::NotConnected);
    assert!(chain.sent().is_empty());
}

#[test]
fn pending_receipts_are_polled_until_mined() {
    let (chain, clock, app) = connected();
    chain.set_pending_polls(3);
    block_on(app.create_campaign(&draft("Slow", "1", "1"))).unwrap();
    assert_eq!(clock.sleep_count(), 3);
    assert_eq!(chain.count("eth_getTransactionReceipt"), 4);
}

#[test]
fn contribution_sends_value_and_does_not_refresh_detail() {
    let (chain, _clock, app) = connected();
    let address = chain.add_campaign(FakeCampaign::new("Well", ether(5), ether(2)));
    block_on(app.load_details(address)).unwrap();

    app.set_draft(DraftField::Contribution, "0.5");
    block_on(app.contribute_to_selected()).unwrap();

    let sent = chain.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, address);
    assert_eq!(sent[0].value, U256::from(500_000_000_000_000_000u128));
    assert!(sent[0].data.starts_with(&Campaign::contributeCall::SELECTOR));
    assert_eq!(
        chain.campaign(address).unwrap().current,
        U256::from(2_500_000_000_000_000_000u128)
    );

    // The panel still shows the amount read before contributing.
    assert_eq!(app.state().selected().unwrap().current_amount, ether(2));
    let toasts = app.view().toasts;
    assert_eq!(toasts[0].kind, ToastKind::Info);
    assert_eq!(toasts[0].title, "Contribution successful!");
}

#[test]
fn reverted_contribution_reports_and_changes_nothing() {
    let (chain, _clock, app) = connected();
    let address = chain.add_campaign(FakeCampaign::new("Done", ether(1), ether(1)));
    chain.revert_next_transaction();

    let err = block_on(app.contribute(address, "1")).unwrap_err();
    let hash = chain.sent()[0].hash;
    assert_eq!(err, ClientError::Reverted(hash));
    assert_eq!(chain.campaign(address).unwrap().current, ether(1));

    let toasts = app.view().toasts;
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Error);
    assert_eq!(toasts[0].title, "Contribution failed");
}

#[test]
fn over_precise_amount_sends_nothing() {
    let (chain, _clock, app) = connected();
    let address = chain.add_campaign(FakeCampaign::new("A", ether(1), U256::ZERO));

    let err = block_on(app.contribute(address, "0.0000000000000000009")).unwrap_err();
    assert!(matches!(err, ClientError::InvalidAmount(_)));
    assert!(chain.sent().is_empty());
    assert_eq!(chain.count("eth_accounts"), 0);

    let toasts = app.view().toasts;
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Error);
    assert_eq!(toasts[0].title, "Contribution failed");
}

#[test]
fn over_precise_goal_creates_nothing() {
    let (chain, _clock, app) = connected();
    let err = block_on(app.create_campaign(&draft("X", "1.0000000000000000001", "3"))).unwrap_err();
    assert!(matches!(err, ClientError::InvalidAmount(_)));
    assert!(chain.sent().is_empty());
}

#[test]
fn rejected_signature_is_user_rejection() {
    let (chain, _clock, app) = connected();
    let address = chain.add_campaign(FakeCampaign::new("A", ether(1), U256::ZERO));
    chain.reject_next_transaction();
    assert_eq!(
        block_on(app.contribute(address, "1")),
        Err(ClientError::UserRejected)
    );
    assert!(chain.sent().is_empty());
}

#[test]
fn contribution_needs_selection() {
    let (_chain, _clock, app) = connected();
    assert_eq!(
        block_on(app.contribute_to_selected()),
        Err(ClientError::NoCampaignSelected)
    );
}

#[test]
fn contribution_signs_with_current_account() {
    let (chain, _clock, app) = connected();
    let address = chain.add_campaign(FakeCampaign::new("A", ether(1), U256::ZERO));
    let other = Address::repeat_byte(0xb2);
    chain.set_accounts(vec![other]);

    block_on(app.contribute(address, "0.1")).unwrap();
    assert_eq!(chain.sent()[0].from, other);
}

#[test]
fn explorer_opens_address_page() {
    let (_chain, _clock, app) = setup();
    let navigator = RecordingNavigator::default();
    let address = Address::repeat_byte(0x42);
    app.open_in_explorer(&navigator, address);
    assert_eq!(
        navigator.opened(),
        vec![format!("https://sepolia.etherscan.io/address/{address}")]
    );
}
