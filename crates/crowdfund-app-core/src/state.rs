// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Explicitly owned application state.
//!
//! Each component mutates the state only through its own entry point:
//! the session manager via [`AppState::apply_session`] /
//! [`AppState::clear_session`], the directory via
//! [`AppState::apply_directory`], the detail viewer via
//! [`AppState::apply_selection`], and input widgets via
//! [`AppState::set_draft`].

use std::str::FromStr;

use thiserror::Error;

use crate::campaign::CampaignDetail;
use crate::creator::CampaignDraft;
use crate::directory::CampaignRef;
use crate::session::Session;

/// Input field a draft update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    /// Create form: title.
    Title,
    /// Create form: description.
    Description,
    /// Create form: goal amount.
    Goal,
    /// Create form: duration in days.
    Duration,
    /// Contribution amount.
    Contribution,
}

/// Unknown field name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown draft field {0:?}")]
pub struct UnknownField(pub String);

impl FromStr for DraftField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            "goal" => Ok(Self::Goal),
            "duration" => Ok(Self::Duration),
            "contribution" => Ok(Self::Contribution),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// Everything the client knows between user actions.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    session: Option<Session>,
    campaigns: Vec<CampaignRef>,
    selected: Option<CampaignDetail>,
    draft_campaign: CampaignDraft,
    draft_contribution: String,
}

impl AppState {
    /// Active session, if connected.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Last fetched directory snapshot.
    pub fn campaigns(&self) -> &[CampaignRef] {
        &self.campaigns
    }

    /// The one live detail view.
    pub fn selected(&self) -> Option<&CampaignDetail> {
        self.selected.as_ref()
    }

    /// Create-form buffer.
    pub fn draft_campaign(&self) -> &CampaignDraft {
        &self.draft_campaign
    }

    /// Contribution amount buffer.
    pub fn draft_contribution(&self) -> &str {
        &self.draft_contribution
    }

    /// Install a session, replacing any previous one.
    pub fn apply_session(&mut self, session: Session) {
        self.session = Some(session);
    }

    /// Drop the session (wallet disconnected or locked).
    pub fn clear_session(&mut self) {
        self.session = None;
    }

    /// Replace the directory snapshot.
    pub fn apply_directory(&mut self, campaigns: Vec<CampaignRef>) {
        self.campaigns = campaigns;
    }

    /// Replace the selected campaign and its detail.
    pub fn apply_selection(&mut self, detail: CampaignDetail) {
        self.selected = Some(detail);
    }

    /// Record the last value typed into `field`.
    pub fn set_draft(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Title => self.draft_campaign.title = value,
            DraftField::Description => self.draft_campaign.description = value,
            DraftField::Goal => self.draft_campaign.goal = value,
            DraftField::Duration => self.draft_campaign.duration_days = value,
            DraftField::Contribution => self.draft_contribution = value,
        }
    }
}
