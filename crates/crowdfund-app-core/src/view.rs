// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Render-ready view model of the page.
//!
//! Plain data only; the browser adapter turns it into markup and JS callers
//! can read it as JSON.

use serde::Serialize;

use crate::campaign::CampaignDetail;
use crate::config::ClientConfig;
use crate::creator::CampaignDraft;
use crate::directory::CampaignRef;
use crate::explorer::explorer_url;
use crate::state::AppState;
use crate::toast::ToastRender;
use crowdfund_abi::format_amount;

/// Shown when the directory holds no campaigns.
pub const NO_CAMPAIGNS: &str = "No campaigns found.";

/// Whole page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    /// Page heading.
    pub heading: &'static str,
    /// `None` until a wallet is connected; the page then offers only "Connect Wallet".
    pub connected: Option<ConnectedView>,
    /// Live toasts, oldest first.
    pub toasts: Vec<ToastRender>,
}

/// Everything shown once a session exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectedView {
    /// `"Connected as: 0x..."`.
    pub account_label: String,
    /// Create form buffer.
    pub create_form: CampaignDraft,
    /// Currency symbol for form placeholders.
    pub currency_symbol: String,
    /// Campaign directory.
    pub directory: DirectoryView,
    /// Selected campaign, if any.
    pub detail: Option<DetailView>,
}

/// Campaign directory listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryView {
    /// Entries in factory creation order.
    pub entries: Vec<DirectoryEntry>,
    /// [`NO_CAMPAIGNS`] when `entries` is empty.
    pub empty_message: Option<&'static str>,
}

/// One directory card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    /// `"Campaign #n"`.
    pub label: String,
    /// Checksummed campaign address.
    pub address: String,
    /// Explorer page for the address.
    pub explorer_url: String,
}

/// Selected campaign panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailView {
    /// Campaign address.
    pub address: String,
    /// Campaign title.
    pub title: String,
    /// Campaign description.
    pub description: String,
    /// Goal as a decimal amount, e.g. `"5"`.
    pub goal: String,
    /// Raised so far as a decimal amount.
    pub current: String,
    /// Currency symbol.
    pub currency_symbol: String,
    /// `"<n> day(s)"`.
    pub time_remaining: String,
    /// CSS width of the progress fill, e.g. `"40%"`.
    pub progress_width: String,
    /// Contribution amount buffer.
    pub contribution_draft: String,
}

/// Build the page from state, settings and the currently visible toasts.
pub fn page_view(state: &AppState, config: &ClientConfig, toasts: Vec<ToastRender>) -> PageView {
    let connected = state.session().map(|session| ConnectedView {
        account_label: format!("Connected as: {}", session.address()),
        create_form: state.draft_campaign().clone(),
        currency_symbol: config.currency_symbol.clone(),
        directory: directory_view(state.campaigns(), config),
        detail: state
            .selected()
            .map(|detail| detail_view(detail, state.draft_contribution(), config)),
    });
    PageView {
        heading: "Crowdfunding DApp",
        connected,
        toasts,
    }
}

/// Directory listing for a snapshot.
pub fn directory_view(campaigns: &[CampaignRef], config: &ClientConfig) -> DirectoryView {
    let entries: Vec<_> = campaigns
        .iter()
        .map(|campaign| DirectoryEntry {
            label: format!("Campaign #{}", campaign.position),
            address: campaign.address.to_string(),
            explorer_url: explorer_url(&config.explorer_base_url, campaign.address),
        })
        .collect();
    let empty_message = entries.is_empty().then_some(NO_CAMPAIGNS);
    DirectoryView {
        entries,
        empty_message,
    }
}

/// Detail panel for one campaign.
pub fn detail_view(detail: &CampaignDetail, contribution_draft: &str, config: &ClientConfig) -> DetailView {
    DetailView {
        address: detail.address.to_string(),
        title: detail.title.clone(),
        description: detail.description.clone(),
        goal: format_amount(detail.goal_amount),
        current: format_amount(detail.current_amount),
        currency_symbol: config.currency_symbol.clone(),
        time_remaining: format!("{} day(s)", detail.days_remaining),
        progress_width: format_percent(detail.progress_bps()),
        contribution_draft: contribution_draft.to_string(),
    }
}

/// Basis points as a CSS percentage without trailing zeros (`4000 -> "40%"`).
pub fn format_percent(bps: u32) -> String {
    let whole = bps / 100;
    let fraction = bps % 100;
    if fraction == 0 {
        format!("{whole}%")
    } else if fraction % 10 == 0 {
        format!("{whole}.{}%", fraction / 10)
    } else {
        format!("{whole}.{fraction:02}%")
    }
}
