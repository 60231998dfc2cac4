// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The injected `window.ethereum` provider behind the [`WalletProvider`] port.

use crowdfund_abi::Address;
use crowdfund_app_core::provider_port::{ProviderError, WalletProvider};
use crowdfund_app_core::watch::AccountsChanged;
use futures::channel::mpsc::UnboundedSender;
use js_sys::{Function, Promise, Reflect};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// EIP-1193 provider found on the page, if any.
#[derive(Clone)]
pub struct InjectedProvider {
    ethereum: Option<JsValue>,
}

impl InjectedProvider {
    /// Look up `window.ethereum`. A missing provider is not an error until used.
    pub fn detect() -> Self {
        let ethereum = web_sys::window()
            .and_then(|window| Reflect::get(&window, &JsValue::from_str("ethereum")).ok())
            .unwrap_or(JsValue::UNDEFINED);
        Self::from_value(ethereum)
    }

    /// Wrap a provider object; `undefined` or `null` means no provider.
    pub fn from_value(ethereum: JsValue) -> Self {
        let ethereum = Some(ethereum).filter(|value| !value.is_undefined() && !value.is_null());
        Self { ethereum }
    }

    /// Whether a provider was found.
    pub fn is_available(&self) -> bool {
        self.ethereum.is_some()
    }

    /// Forward `accountsChanged` events into `sink` for the rest of the page's life.
    pub fn forward_account_changes(
        &self,
        sink: UnboundedSender<AccountsChanged>,
    ) -> Result<(), ProviderError> {
        let ethereum = self.ethereum.as_ref().ok_or(ProviderError::Unavailable)?;
        let on: Function = Reflect::get(ethereum, &JsValue::from_str("on"))
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| ProviderError::Transport("provider has no `on` method".into()))?;

        let callback = Closure::<dyn FnMut(JsValue)>::new(move |accounts: JsValue| {
            match serde_wasm_bindgen::from_value::<Vec<Address>>(accounts) {
                Ok(accounts) => {
                    let _ = sink.unbounded_send(AccountsChanged(accounts));
                }
                Err(err) => warn!(%err, "ignoring malformed accountsChanged payload"),
            }
        });
        on.call2(
            ethereum,
            &JsValue::from_str("accountsChanged"),
            callback.as_ref().unchecked_ref(),
        )
        .map_err(js_error)?;
        // The listener stays registered until the page unloads.
        callback.forget();
        Ok(())
    }
}

impl WalletProvider for InjectedProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let ethereum = self.ethereum.as_ref().ok_or(ProviderError::Unavailable)?;
        let args = json!({ "method": method, "params": params })
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|err| ProviderError::Transport(err.to_string()))?;

        let request: Function = Reflect::get(ethereum, &JsValue::from_str("request"))
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| ProviderError::Transport("provider has no `request` method".into()))?;
        let promise: Promise = request
            .call1(ethereum, &args)
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| ProviderError::Transport("`request` did not return a promise".into()))?;

        let result = JsFuture::from(promise).await.map_err(js_error)?;
        if result.is_undefined() || result.is_null() {
            return Ok(Value::Null);
        }
        serde_wasm_bindgen::from_value(result).map_err(|err| ProviderError::Transport(err.to_string()))
    }
}

/// Classify a rejected provider call by its EIP-1193 `code`, if it has one.
#[allow(clippy::cast_possible_truncation)]
fn js_error(err: JsValue) -> ProviderError {
    let field = |name: &str| Reflect::get(&err, &JsValue::from_str(name)).ok();
    let message = field("message")
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{err:?}"));
    match field("code").and_then(|c| c.as_f64()) {
        Some(code) => ProviderError::from_code(code as i64, message),
        None => ProviderError::Transport(message),
    }
}
