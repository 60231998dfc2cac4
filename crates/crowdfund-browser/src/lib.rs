// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Crowdfund browser client: wasm-bindgen bindings over the injected wallet.
//!
//! [`CrowdfundClient`] mounts the page on a host element, renders the view
//! model into it, and handles every click and input through delegated
//! listeners on that element.
//!
//! # Usage (from JavaScript)
//!
//! ```js
//! import init, { CrowdfundClient } from 'crowdfund-browser';
//!
//! await init();
//! const client = CrowdfundClient.mount(document.getElementById('app'));
//!
//! await client.connect();
//! const campaigns = await client.fetch_campaigns();
//! await client.load_details(campaigns[0].address);
//! ```
//!
//! Settings come from a JSON `data-crowdfund-client` attribute on the mount
//! element; absent settings fall back to the Sepolia defaults.

pub mod command;
pub mod console;
pub mod host;
pub mod markup;
pub mod provider;

use std::rc::Rc;
use std::time::Duration;

use crowdfund_abi::Address;
use crowdfund_app_core::clock_port::Clock;
use crowdfund_app_core::config::ConfigService;
use crowdfund_app_core::render_port::RenderPort;
use crowdfund_app_core::state::{DraftField, UnknownField};
use crowdfund_app_core::toast::{ToastId, ToastRender};
use crowdfund_app_core::watch::follow_account_changes;
use crowdfund_app_core::{ClientError, CrowdfundApp};
use futures::channel::mpsc;
use js_sys::{Promise, Reflect};
use serde::Serialize;
use tracing::{info, warn, Level};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, spawn_local};
use web_sys::{Element, Event};

use crate::command::UiCommand;
use crate::host::{BrowserClock, PageConfigStore, WindowNavigator};
use crate::provider::InjectedProvider;

type App = CrowdfundApp<InjectedProvider, BrowserClock>;

/// The mounted app and the element it draws into.
struct Shell {
    app: App,
    root: Element,
}

impl RenderPort for Shell {
    fn request_redraw(&self) {
        self.root.set_inner_html(&markup::render_page(&self.app.view()));
    }
}

impl Shell {
    async fn execute(&self, command: UiCommand) -> Result<JsValue, ClientError> {
        let value = match command {
            UiCommand::Connect => JsValue::from_str(&self.app.connect().await?.to_string()),
            UiCommand::FetchCampaigns => to_js(&self.app.list_campaigns().await?),
            UiCommand::CreateCampaign => {
                let creation = self.app.create_campaign_from_draft().await?;
                JsValue::from_str(&creation.tx_hash.to_string())
            }
            UiCommand::LoadDetails(address) => {
                self.app.load_details(address).await?;
                JsValue::UNDEFINED
            }
            UiCommand::Contribute => {
                JsValue::from_str(&self.app.contribute_to_selected().await?.to_string())
            }
            UiCommand::OpenInExplorer(address) => {
                self.app.open_in_explorer(&WindowNavigator, address);
                JsValue::UNDEFINED
            }
            UiCommand::DismissToast(id) => JsValue::from_bool(self.app.dismiss_toast(id)),
        };
        Ok(value)
    }
}

/// Redraw now, and again once the newest toast has expired.
///
/// The later redraw is skipped when it would change nothing or when the user
/// is typing into a form field, since replacing the markup drops focus.
fn redraw_with_expiry(shell: &Rc<Shell>) {
    shell.request_redraw();
    let scheduled = toast_ids(&shell.app.view().toasts);
    let later = Rc::clone(shell);
    let ttl = Duration::from_millis(shell.app.config().toast_ttl_ms + 50);
    spawn_local(async move {
        later.app.clock().sleep(ttl).await;
        let current = toast_ids(&later.app.view().toasts);
        if expiry_redraw_needed(&scheduled, &current, editing_field()) {
            later.request_redraw();
        }
    });
}

fn toast_ids(toasts: &[ToastRender]) -> Vec<ToastId> {
    toasts.iter().map(|toast| toast.id).collect()
}

/// Whether a timed redraw should replace the page.
pub(crate) fn expiry_redraw_needed(scheduled: &[ToastId], current: &[ToastId], editing: bool) -> bool {
    !editing && scheduled != current
}

/// Whether focus is inside a `data-field` input.
fn editing_field() -> bool {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.active_element())
        .is_some_and(|element| element.has_attribute("data-field"))
}

/// Run `command`, redraw, and settle a JS promise with its outcome.
fn run(shell: &Rc<Shell>, command: UiCommand) -> Promise {
    let shell = Rc::clone(shell);
    future_to_promise(async move {
        let result = shell.execute(command).await;
        redraw_with_expiry(&shell);
        result.map_err(|err| JsError::new(&err.to_string()).into())
    })
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}

/// Crowdfund client mounted on one page element.
#[wasm_bindgen]
pub struct CrowdfundClient {
    shell: Rc<Shell>,
}

#[wasm_bindgen]
impl CrowdfundClient {
    /// Mount the client on `root`, draw the initial page and start listening.
    ///
    /// Fails if the `data-crowdfund-client` settings are present but invalid.
    pub fn mount(root: Element) -> Result<CrowdfundClient, JsError> {
        console::init(Level::DEBUG);

        let config = ConfigService::new(PageConfigStore::new(root.clone()))
            .load_client()
            .map_err(|err| JsError::new(&err.to_string()))?;
        let provider = InjectedProvider::detect();
        if !provider.is_available() {
            warn!("no injected wallet provider on this page");
        }
        info!(factory = %config.factory_address, "mounting crowdfund client");

        let shell = Rc::new(Shell {
            app: CrowdfundApp::new(provider, BrowserClock, config),
            root,
        });
        install_listeners(&shell).map_err(|err| JsError::new(&format!("{err:?}")))?;
        subscribe_account_changes(&shell);
        shell.request_redraw();
        Ok(Self { shell })
    }

    /// Connect the wallet. Resolves to the connected address.
    pub fn connect(&self) -> Promise {
        run(&self.shell, UiCommand::Connect)
    }

    /// Refresh the directory. Resolves to `[{ position, address }]`, or `null`
    /// when no wallet is connected.
    pub fn fetch_campaigns(&self) -> Promise {
        run(&self.shell, UiCommand::FetchCampaigns)
    }

    /// Create a campaign from the form drafts. Resolves to the transaction hash.
    pub fn create_campaign(&self) -> Promise {
        run(&self.shell, UiCommand::CreateCampaign)
    }

    /// Load and select the campaign at `address`.
    pub fn load_details(&self, address: &str) -> Result<Promise, JsError> {
        let address: Address = address
            .parse()
            .map_err(|err| JsError::new(&format!("invalid address {address:?}: {err}")))?;
        Ok(run(&self.shell, UiCommand::LoadDetails(address)))
    }

    /// Contribute the drafted amount to the selected campaign.
    /// Resolves to the transaction hash.
    pub fn contribute(&self) -> Promise {
        run(&self.shell, UiCommand::Contribute)
    }

    /// Open the explorer page for `address` in a new tab.
    pub fn open_in_explorer(&self, address: &str) -> Result<(), JsError> {
        let address: Address = address
            .parse()
            .map_err(|err| JsError::new(&format!("invalid address {address:?}: {err}")))?;
        self.shell.app.open_in_explorer(&WindowNavigator, address);
        Ok(())
    }

    /// Set a form draft (`title`, `description`, `goal`, `duration`, `contribution`).
    pub fn set_draft(&self, field: &str, value: &str) -> Result<(), JsError> {
        let field: DraftField = field
            .parse()
            .map_err(|err: UnknownField| JsError::new(&err.to_string()))?;
        self.shell.app.set_draft(field, value);
        self.shell.request_redraw();
        Ok(())
    }

    /// The current view model as a plain JS object.
    pub fn view(&self) -> JsValue {
        to_js(&self.shell.app.view())
    }
}

/// One click and one input listener on the mount element.
fn install_listeners(shell: &Rc<Shell>) -> Result<(), JsValue> {
    let on_click = {
        let shell = Rc::clone(shell);
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(element) = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|target| target.closest("[data-action]").ok().flatten())
            else {
                return;
            };
            let action = element.get_attribute("data-action").unwrap_or_default();
            let command = UiCommand::decode(
                &action,
                element.get_attribute("data-address").as_deref(),
                element.get_attribute("data-toast").as_deref(),
            );
            let Some(command) = command else {
                warn!(action, "unhandled page action");
                return;
            };
            match command {
                UiCommand::OpenInExplorer(address) => {
                    event.prevent_default();
                    shell.app.open_in_explorer(&WindowNavigator, address);
                }
                UiCommand::DismissToast(id) => {
                    shell.app.dismiss_toast(id);
                    shell.request_redraw();
                }
                command => {
                    let shell = Rc::clone(&shell);
                    spawn_local(async move {
                        let _ = shell.execute(command).await;
                        redraw_with_expiry(&shell);
                    });
                }
            }
        })
    };

    let on_input = {
        let shell = Rc::clone(shell);
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(target) = event.target() else {
                return;
            };
            let Some(field) = target
                .dyn_ref::<Element>()
                .and_then(|element| element.get_attribute("data-field"))
                .and_then(|name| name.parse::<DraftField>().ok())
            else {
                return;
            };
            let value = Reflect::get(&target, &JsValue::from_str("value"))
                .ok()
                .and_then(|value| value.as_string())
                .unwrap_or_default();
            // No redraw: re-rendering would steal focus from the input.
            shell.app.set_draft(field, value);
        })
    };

    shell
        .root
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    shell
        .root
        .add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
    // Listeners live as long as the page.
    on_click.forget();
    on_input.forget();
    Ok(())
}

/// Feed `accountsChanged` into the app, at most once per client.
fn subscribe_account_changes(shell: &Rc<Shell>) {
    if !shell.app.provider().is_available() || !shell.app.claim_account_subscription() {
        return;
    }
    let (sender, receiver) = mpsc::unbounded();
    if let Err(err) = shell.app.provider().forward_account_changes(sender) {
        warn!(%err, "could not subscribe to account changes");
        return;
    }
    let shell = Rc::clone(shell);
    spawn_local(async move {
        follow_account_changes(&shell.app, receiver, shell.as_ref()).await;
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_redraw_runs_when_a_toast_expired() {
        assert!(expiry_redraw_needed(&[1, 2], &[2], false));
        assert!(expiry_redraw_needed(&[1], &[], false));
    }

    #[test]
    fn timed_redraw_skips_unchanged_toasts() {
        assert!(!expiry_redraw_needed(&[], &[], false));
        assert!(!expiry_redraw_needed(&[3], &[3], false));
    }

    #[test]
    fn timed_redraw_never_steals_focus() {
        assert!(!expiry_redraw_needed(&[1], &[], true));
    }
}
