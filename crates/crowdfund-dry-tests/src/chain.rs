// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fake wallet provider backed by in-memory factory and campaign contracts.
//!
//! Calldata is decoded with the same `sol!` bindings the client encodes with,
//! so a test exercises the real ABI round trip. Failures (missing provider,
//! rejected prompts, reverts, pending receipts, transport errors) are scripted
//! per test.

use alloy_sol_types::{SolCall, SolEvent, SolInterface};
use crowdfund_abi::{Address, Bytes, Campaign, CampaignFactory, B256, U256};
use crowdfund_app_core::provider_port::{ProviderError, WalletProvider};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

const SECONDS_PER_DAY: u64 = 86_400;

/// `n` whole currency units in smallest units.
pub fn ether(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
}

/// State of one fake campaign contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeCampaign {
    /// `title()`.
    pub title: String,
    /// `description()`.
    pub description: String,
    /// `goalAmount()`.
    pub goal: U256,
    /// `currentAmount()`.
    pub current: U256,
    /// `deadline()` (unix seconds).
    pub deadline: U256,
}

impl FakeCampaign {
    /// Campaign with the given title and amounts and a deadline of zero.
    pub fn new(title: &str, goal: U256, current: U256) -> Self {
        Self {
            title: title.to_string(),
            description: format!("{title} description"),
            goal,
            current,
            deadline: U256::ZERO,
        }
    }

    /// Set the deadline.
    pub fn with_deadline(mut self, unix_secs: u64) -> Self {
        self.deadline = U256::from(unix_secs);
        self
    }
}

/// A transaction the fake wallet accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentTransaction {
    /// Assigned hash.
    pub hash: B256,
    /// Signing account.
    pub from: Address,
    /// Target.
    pub to: Address,
    /// Calldata.
    pub data: Bytes,
    /// Attached value (zero when absent).
    pub value: U256,
}

struct PendingReceipt {
    polls_left: u32,
    receipt: Value,
}

#[derive(Default)]
struct ChainState {
    missing: bool,
    reject_authorization: bool,
    reject_next_transaction: bool,
    revert_next_transaction: bool,
    fail_next: Option<String>,
    authorized: bool,
    accounts: Vec<Address>,
    factory: Address,
    block_time: u64,
    pending_polls: u32,
    order: Vec<Address>,
    campaigns: HashMap<Address, FakeCampaign>,
    receipts: HashMap<B256, PendingReceipt>,
    sent: Vec<SentTransaction>,
    methods: Vec<String>,
    next_tx: u64,
}

/// In-memory chain + wallet implementing [`WalletProvider`].
///
/// Clones share the same chain, so a test can keep a handle after moving one
/// into the client.
#[derive(Clone, Default)]
pub struct FakeChain {
    inner: Rc<RefCell<ChainState>>,
}

impl FakeChain {
    /// Chain with a factory at `factory` and one wallet account.
    pub fn new(factory: Address, account: Address) -> Self {
        let chain = Self::default();
        {
            let mut state = chain.inner.borrow_mut();
            state.factory = factory;
            state.accounts = vec![account];
        }
        chain
    }

    /// Page without an injected provider: every request fails with `Unavailable`.
    pub fn missing() -> Self {
        let chain = Self::default();
        chain.inner.borrow_mut().missing = true;
        chain
    }

    /// Deploy a campaign directly (as if created earlier); returns its address.
    pub fn add_campaign(&self, campaign: FakeCampaign) -> Address {
        let mut state = self.inner.borrow_mut();
        let address = campaign_address(state.order.len());
        state.order.push(address);
        state.campaigns.insert(address, campaign);
        address
    }

    /// Current state of the campaign at `address`.
    pub fn campaign(&self, address: Address) -> Option<FakeCampaign> {
        self.inner.borrow().campaigns.get(&address).cloned()
    }

    /// Campaign addresses in creation order.
    pub fn campaign_addresses(&self) -> Vec<Address> {
        self.inner.borrow().order.clone()
    }

    /// Replace the wallet's accounts (simulates switching or locking).
    pub fn set_accounts(&self, accounts: Vec<Address>) {
        self.inner.borrow_mut().accounts = accounts;
    }

    /// Chain time used for new campaign deadlines.
    pub fn set_block_time(&self, unix_secs: u64) {
        self.inner.borrow_mut().block_time = unix_secs;
    }

    /// Make the user decline every `eth_requestAccounts` prompt.
    pub fn reject_authorization(&self, reject: bool) {
        self.inner.borrow_mut().reject_authorization = reject;
    }

    /// Make the user decline the next signature prompt.
    pub fn reject_next_transaction(&self) {
        self.inner.borrow_mut().reject_next_transaction = true;
    }

    /// Mine the next transaction with status 0 and no state change.
    pub fn revert_next_transaction(&self) {
        self.inner.borrow_mut().revert_next_transaction = true;
    }

    /// Fail the next request for `method` with a transport error.
    pub fn fail_next(&self, method: &str) {
        self.inner.borrow_mut().fail_next = Some(method.to_string());
    }

    /// Receipts answer `null` this many times before the transaction is mined.
    pub fn set_pending_polls(&self, polls: u32) {
        self.inner.borrow_mut().pending_polls = polls;
    }

    /// Transactions accepted so far.
    pub fn sent(&self) -> Vec<SentTransaction> {
        self.inner.borrow().sent.clone()
    }

    /// Every RPC method requested so far, in order.
    pub fn methods(&self) -> Vec<String> {
        self.inner.borrow().methods.clone()
    }

    /// How many times `method` was requested.
    pub fn count(&self, method: &str) -> usize {
        self.inner
            .borrow()
            .methods
            .iter()
            .filter(|m| m.as_str() == method)
            .count()
    }

    fn handle(&self, method: &str, params: &Value) -> Result<Value, ProviderError> {
        let mut state = self.inner.borrow_mut();
        if state.missing {
            return Err(ProviderError::Unavailable);
        }
        state.methods.push(method.to_string());
        if state.fail_next.as_deref() == Some(method) {
            state.fail_next = None;
            return Err(ProviderError::Transport("connection reset".into()));
        }
        match method {
            "eth_requestAccounts" => {
                if state.reject_authorization {
                    return Err(ProviderError::from_code(4001, "User rejected the request."));
                }
                state.authorized = true;
                Ok(json!(state.accounts))
            }
            "eth_accounts" => {
                if state.authorized {
                    Ok(json!(state.accounts))
                } else {
                    Ok(json!([]))
                }
            }
            "eth_call" => state.eth_call(&params[0]),
            "eth_sendTransaction" => state.send_transaction(&params[0]),
            "eth_getTransactionReceipt" => {
                let hash: B256 = parse(&params[0])?;
                match state.receipts.get_mut(&hash) {
                    Some(pending) if pending.polls_left > 0 => {
                        pending.polls_left -= 1;
                        Ok(Value::Null)
                    }
                    Some(pending) => Ok(pending.receipt.clone()),
                    None => Ok(Value::Null),
                }
            }
            other => Err(ProviderError::from_code(
                -32601,
                format!("method {other} not supported"),
            )),
        }
    }
}

impl WalletProvider for FakeChain {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        self.handle(method, &params)
    }
}

impl ChainState {
    fn eth_call(&self, call: &Value) -> Result<Value, ProviderError> {
        let to: Address = parse(&call["to"])?;
        let data: Bytes = parse(&call["data"])?;

        let encoded = if to == self.factory {
            match CampaignFactory::CampaignFactoryCalls::abi_decode(&data, true)
                .map_err(|err| revert(&err.to_string()))?
            {
                CampaignFactory::CampaignFactoryCalls::campaignCount(_) => {
                    let count = U256::from(self.order.len());
                    CampaignFactory::campaignCountCall::abi_encode_returns(&(count,))
                }
                CampaignFactory::CampaignFactoryCalls::campaigns(call) => {
                    let address = u64::try_from(call.index)
                        .ok()
                        .and_then(|index| usize::try_from(index).ok())
                        .and_then(|index| self.order.get(index))
                        .ok_or_else(|| revert("index out of range"))?;
                    CampaignFactory::campaignsCall::abi_encode_returns(&(*address,))
                }
                CampaignFactory::CampaignFactoryCalls::createCampaign(_) => {
                    return Err(revert("createCampaign is not a view"));
                }
            }
        } else if let Some(campaign) = self.campaigns.get(&to) {
            match Campaign::CampaignCalls::abi_decode(&data, true)
                .map_err(|err| revert(&err.to_string()))?
            {
                Campaign::CampaignCalls::title(_) => {
                    Campaign::titleCall::abi_encode_returns(&(campaign.title.clone(),))
                }
                Campaign::CampaignCalls::description(_) => {
                    Campaign::descriptionCall::abi_encode_returns(&(campaign.description.clone(),))
                }
                Campaign::CampaignCalls::goalAmount(_) => {
                    Campaign::goalAmountCall::abi_encode_returns(&(campaign.goal,))
                }
                Campaign::CampaignCalls::currentAmount(_) => {
                    Campaign::currentAmountCall::abi_encode_returns(&(campaign.current,))
                }
                Campaign::CampaignCalls::deadline(_) => {
                    Campaign::deadlineCall::abi_encode_returns(&(campaign.deadline,))
                }
                Campaign::CampaignCalls::contribute(_) => Vec::new(),
            }
        } else {
            // Calls to an address without code return no data.
            Vec::new()
        };
        Ok(json!(Bytes::from(encoded)))
    }

    fn send_transaction(&mut self, tx: &Value) -> Result<Value, ProviderError> {
        if std::mem::take(&mut self.reject_next_transaction) {
            return Err(ProviderError::from_code(4001, "User denied transaction signature."));
        }
        let from: Address = parse(&tx["from"])?;
        let to: Address = parse(&tx["to"])?;
        let data: Bytes = parse(&tx["data"])?;
        let value: U256 = if tx["value"].is_null() {
            U256::ZERO
        } else {
            parse(&tx["value"])?
        };
        if !self.accounts.contains(&from) {
            return Err(ProviderError::from_code(4100, "unauthorized account"));
        }

        self.next_tx += 1;
        let hash = B256::from(U256::from(self.next_tx));
        self.sent.push(SentTransaction {
            hash,
            from,
            to,
            data: data.clone(),
            value,
        });

        let reverted = std::mem::take(&mut self.revert_next_transaction);
        let logs = if reverted {
            Vec::new()
        } else {
            self.execute(to, &data, value)
        };
        let receipt = json!({
            "transactionHash": hash,
            "status": if reverted { "0x0" } else { "0x1" },
            "logs": logs,
        });
        self.receipts.insert(
            hash,
            PendingReceipt {
                polls_left: self.pending_polls,
                receipt,
            },
        );
        Ok(json!(hash))
    }

    fn execute(&mut self, to: Address, data: &[u8], value: U256) -> Vec<Value> {
        if to == self.factory {
            if let Ok(call) = CampaignFactory::createCampaignCall::abi_decode(data, true) {
                let days = u64::try_from(call._durationInDays).unwrap_or(u64::MAX);
                let deadline = self
                    .block_time
                    .saturating_add(days.saturating_mul(SECONDS_PER_DAY));
                let id = self.order.len();
                let address = campaign_address(id);
                self.order.push(address);
                self.campaigns.insert(
                    address,
                    FakeCampaign {
                        title: call._title,
                        description: call._description,
                        goal: call._goalAmount,
                        current: U256::ZERO,
                        deadline: U256::from(deadline),
                    },
                );
                let event = CampaignFactory::CampaignCreated {
                    campaignId: U256::from(id),
                    campaignAddress: address,
                };
                let log = event.encode_log_data();
                return vec![json!({
                    "address": self.factory,
                    "topics": log.topics(),
                    "data": log.data,
                })];
            }
        } else if let Some(campaign) = self.campaigns.get_mut(&to) {
            if data.starts_with(&Campaign::contributeCall::SELECTOR) {
                campaign.current += value;
            }
        }
        Vec::new()
    }
}

fn campaign_address(index: usize) -> Address {
    let mut bytes = [0xcc_u8; 20];
    bytes[12..].copy_from_slice(&(index as u64).to_be_bytes());
    Address::from(bytes)
}

fn revert(reason: &str) -> ProviderError {
    ProviderError::from_code(-32000, format!("execution reverted: {reason}"))
}

fn parse<T: serde::de::DeserializeOwned>(value: &Value) -> Result<T, ProviderError> {
    serde_json::from_value(value.clone())
        .map_err(|err| ProviderError::from_code(-32602, format!("invalid params: {err}")))
}
