// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! UI commands decoded from `data-*` attributes of the clicked element.

use crowdfund_abi::Address;
use crowdfund_app_core::toast::ToastId;

/// One user gesture the page can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    /// "Connect Wallet".
    Connect,
    /// "Fetch Campaigns".
    FetchCampaigns,
    /// "Create Campaign" from the form buffer.
    CreateCampaign,
    /// "View Details" on a directory entry.
    LoadDetails(Address),
    /// "Contribute" to the selected campaign.
    Contribute,
    /// Address link on a directory entry.
    OpenInExplorer(Address),
    /// Toast close button.
    DismissToast(ToastId),
}

impl UiCommand {
    /// Decode `data-action` with its companion `data-address` / `data-toast`.
    ///
    /// Unknown actions and missing or malformed companions yield `None`.
    pub fn decode(action: &str, address: Option<&str>, toast: Option<&str>) -> Option<Self> {
        let address = || address.and_then(|a| a.parse::<Address>().ok());
        match action {
            "connect" => Some(Self::Connect),
            "fetch" => Some(Self::FetchCampaigns),
            "create" => Some(Self::CreateCampaign),
            "contribute" => Some(Self::Contribute),
            "load" => address().map(Self::LoadDetails),
            "explorer" => address().map(Self::OpenInExplorer),
            "dismiss" => toast
                .and_then(|id| id.parse::<ToastId>().ok())
                .map(Self::DismissToast),
            _ => None,
        }
    }
}
