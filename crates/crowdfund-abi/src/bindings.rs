// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Solidity interfaces of the factory and campaign contracts.
//!
//! The generated modules expose one `<name>Call` type per function (with
//! `SELECTOR`, `abi_encode` and `abi_decode_returns`) and one struct per event.
//! Unnamed return values decode into a `_0` field.
#![allow(missing_docs)]

use alloy_sol_types::sol;

sol! {
    /// Deploys campaign contracts and indexes them by creation order.
    interface CampaignFactory {
        /// Emitted once per deployed campaign.
        event CampaignCreated(uint256 campaignId, address campaignAddress);

        /// Deploy a campaign with a goal in smallest units and a duration in days.
        function createCampaign(
            string _title,
            string _description,
            uint256 _goalAmount,
            uint256 _durationInDays
        ) external;

        /// Number of campaigns deployed so far.
        function campaignCount() external view returns (uint256);

        /// Address of the campaign at `index` (creation order).
        function campaigns(uint256 index) external view returns (address);
    }

    /// A single funding campaign.
    interface Campaign {
        function title() external view returns (string);
        function description() external view returns (string);
        function goalAmount() external view returns (uint256);
        function currentAmount() external view returns (uint256);
        /// Unix timestamp (seconds) after which contributions close.
        function deadline() external view returns (uint256);
        /// Payable; the attached value is the contribution.
        function contribute() external payable;
    }
}
