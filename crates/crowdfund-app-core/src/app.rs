// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The client application: owns state and toasts, runs one operation per
//! user action, and reports every outcome.
//!
//! Operations return their `Result` to the caller *and* surface it: failures
//! are logged and pushed as error toasts, confirmed transactions as info
//! toasts. State is only touched after an operation succeeds, so a failed
//! fetch or load leaves the previous data on screen.
//!
//! `RefCell` borrows are scoped to synchronous sections; none is held across
//! an `.await`, so interleaved flows on the single-threaded executor never
//! collide.

use std::cell::{Cell, Ref, RefCell};
use std::time::Duration;

use crowdfund_abi::{parse_amount, Address, B256};
use tracing::{info, warn};

use crate::campaign;
use crate::clock_port::Clock;
use crate::config::ClientConfig;
use crate::contribution;
use crate::creator::{self, CampaignCreation, CampaignDraft};
use crate::directory::{self, CampaignRef};
use crate::error::ClientError;
use crate::explorer;
use crate::navigator_port::Navigator;
use crate::provider_port::WalletProvider;
use crate::session;
use crate::state::{AppState, DraftField};
use crate::toast::{ToastId, ToastKind, ToastService};
use crate::view::{self, PageView};

/// User-facing operations, used to title failure toasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Wallet connect (explicit or after an account change).
    Connect,
    /// Directory fetch.
    FetchCampaigns,
    /// Campaign creation.
    CreateCampaign,
    /// Detail load.
    LoadDetails,
    /// Contribution.
    Contribute,
}

impl Action {
    /// Toast title when the action fails.
    pub fn failure_title(self) -> &'static str {
        match self {
            Self::Connect => "Could not connect wallet",
            Self::FetchCampaigns => "Could not fetch campaigns",
            Self::CreateCampaign => "Campaign was not created",
            Self::LoadDetails => "Could not load campaign",
            Self::Contribute => "Contribution failed",
        }
    }
}

/// Crowdfund client over a wallet provider and a clock.
pub struct CrowdfundApp<P, C> {
    provider: P,
    clock: C,
    config: ClientConfig,
    state: RefCell<AppState>,
    toasts: RefCell<ToastService>,
    account_subscription: Cell<bool>,
}

impl<P, C> CrowdfundApp<P, C>
where
    P: WalletProvider,
    C: Clock,
{
    /// Build a disconnected client.
    pub fn new(provider: P, clock: C, config: ClientConfig) -> Self {
        let toasts = ToastService::new(config.max_toasts);
        Self {
            provider,
            clock,
            config,
            state: RefCell::new(AppState::default()),
            toasts: RefCell::new(toasts),
            account_subscription: Cell::new(false),
        }
    }

    /// Settings in use.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Wallet provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Read access to the state. Do not hold across an `.await`.
    pub fn state(&self) -> Ref<'_, AppState> {
        self.state.borrow()
    }

    /// Claim the page's single account-change subscription.
    ///
    /// Returns `true` exactly once per client; later callers must not subscribe.
    pub fn claim_account_subscription(&self) -> bool {
        !self.account_subscription.replace(true)
    }

    /// Record typed input.
    pub fn set_draft(&self, field: DraftField, value: impl Into<String>) {
        self.state.borrow_mut().set_draft(field, value);
    }

    /// Remove a toast early.
    pub fn dismiss_toast(&self, id: ToastId) -> bool {
        self.toasts.borrow_mut().dismiss(id)
    }

    /// Current page, dropping expired toasts.
    pub fn view(&self) -> PageView {
        let now = self.clock.now_millis();
        let toasts = {
            let mut toasts = self.toasts.borrow_mut();
            toasts.retain_visible(now);
            toasts.visible(now)
        };
        view::page_view(&self.state.borrow(), &self.config, toasts)
    }

    /// Connect the wallet and (re)create the session.
    pub async fn connect(&self) -> Result<Address, ClientError> {
        let result = session::connect(&self.provider, self.config.factory_address).await;
        let session = self.report(Action::Connect, result)?;
        self.state.borrow_mut().apply_session(session);
        Ok(session.address())
    }

    /// React to the wallet's `accountsChanged` notification.
    ///
    /// An empty list means the wallet locked or revoked access: the session is
    /// dropped and, if one existed, a warning toast says so. Otherwise the
    /// session is rebuilt for the new active account.
    pub async fn handle_accounts_changed(&self, accounts: &[Address]) -> Result<(), ClientError> {
        if accounts.is_empty() {
            info!("wallet exposed no accounts; session cleared");
            let had_session = self.state.borrow().session().is_some();
            self.state.borrow_mut().clear_session();
            if had_session {
                self.notify(
                    ToastKind::Warn,
                    "Wallet disconnected",
                    Some("Connect again to create or fund campaigns.".to_string()),
                );
            }
            return Ok(());
        }
        self.connect().await.map(|_| ())
    }

    /// Refresh the directory. `Ok(None)` (and no effect) without a session.
    pub async fn list_campaigns(&self) -> Result<Option<Vec<CampaignRef>>, ClientError> {
        let Some(session) = self.state.borrow().session().copied() else {
            return Ok(None);
        };
        let result = directory::list_campaigns(&self.provider, &session).await;
        let campaigns = self.report(Action::FetchCampaigns, result)?;
        self.state.borrow_mut().apply_directory(campaigns.clone());
        Ok(Some(campaigns))
    }

    /// Create a campaign from explicit form values.
    pub async fn create_campaign(&self, draft: &CampaignDraft) -> Result<CampaignCreation, ClientError> {
        let result = self.submit_campaign(draft).await;
        let creation = self.report(Action::CreateCampaign, result)?;

        // The creation is confirmed; a failed refresh is reported on its own.
        let _ = self.list_campaigns().await;

        let body = creation.created.map(|created| {
            format!(
                "Campaign {} deployed at {}",
                created.campaign_id, created.address
            )
        });
        self.notify(ToastKind::Info, "Campaign created", body);
        Ok(creation)
    }

    /// Create a campaign from the form buffer.
    pub async fn create_campaign_from_draft(&self) -> Result<CampaignCreation, ClientError> {
        let draft = self.state.borrow().draft_campaign().clone();
        self.create_campaign(&draft).await
    }

    async fn submit_campaign(&self, draft: &CampaignDraft) -> Result<CampaignCreation, ClientError> {
        let session = self
            .state
            .borrow()
            .session()
            .copied()
            .ok_or(ClientError::NotConnected)?;
        let request = draft.to_request()?;
        creator::create_campaign(
            &self.provider,
            &self.clock,
            &session,
            &request,
            self.poll_interval(),
        )
        .await
    }

    /// Load a campaign and make it the selected one.
    pub async fn load_details(&self, address: Address) -> Result<(), ClientError> {
        let result = campaign::load_details(&self.provider, &self.clock, address).await;
        let detail = self.report(Action::LoadDetails, result)?;
        self.state.borrow_mut().apply_selection(detail);
        Ok(())
    }

    /// Contribute `amount` (decimal) to `campaign`.
    pub async fn contribute(&self, campaign: Address, amount: &str) -> Result<B256, ClientError> {
        let result = match parse_amount(amount) {
            Ok(value) => {
                contribution::contribute(
                    &self.provider,
                    &self.clock,
                    campaign,
                    value,
                    self.poll_interval(),
                )
                .await
            }
            Err(err) => Err(err.into()),
        };
        let tx_hash = self.report(Action::Contribute, result)?;
        self.notify(ToastKind::Info, "Contribution successful!", None);
        Ok(tx_hash)
    }

    /// Contribute the buffered amount to the selected campaign.
    pub async fn contribute_to_selected(&self) -> Result<B256, ClientError> {
        let target = {
            let state = self.state.borrow();
            state
                .selected()
                .map(|detail| (detail.address, state.draft_contribution().to_string()))
        };
        match target {
            Some((campaign, amount)) => self.contribute(campaign, &amount).await,
            None => self.report(Action::Contribute, Err(ClientError::NoCampaignSelected)),
        }
    }

    /// Open the explorer page for `address`.
    pub fn open_in_explorer<N: Navigator>(&self, navigator: &N, address: Address) {
        explorer::open_in_explorer(navigator, &self.config.explorer_base_url, address);
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.config.receipt_poll_interval_ms)
    }

    fn report<T>(&self, action: Action, result: Result<T, ClientError>) -> Result<T, ClientError> {
        if let Err(err) = &result {
            warn!(?action, %err, "operation failed");
            self.notify(ToastKind::Error, action.failure_title(), Some(err.to_string()));
        }
        result
    }

    fn notify(&self, kind: ToastKind, title: &str, body: Option<String>) {
        let now = self.clock.now_millis();
        self.toasts
            .borrow_mut()
            .push(kind, title, body, self.config.toast_ttl_ms, now);
    }
}
