// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Browser implementations of the clock, navigator and config store ports.

use std::time::Duration;

use crowdfund_app_core::clock_port::Clock;
use crowdfund_app_core::config::{ConfigError, ConfigStore};
use crowdfund_app_core::navigator_port::Navigator;
use js_sys::Promise;
use tracing::warn;
use wasm_bindgen_futures::JsFuture;
use web_sys::Element;

/// Wall clock from `Date.now()`; sleeps on `setTimeout`.
#[derive(Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn now_millis(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    async fn sleep(&self, duration: Duration) {
        let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
        let timer = Promise::new(&mut |resolve, _reject| {
            let scheduled = web_sys::window().map(|window| {
                window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
            });
            if !matches!(scheduled, Some(Ok(_))) {
                let _ = resolve.call0(&wasm_bindgen::JsValue::UNDEFINED);
            }
        });
        let _ = JsFuture::from(timer).await;
    }
}

/// Opens URLs with `window.open(url, "_blank")`.
#[derive(Clone, Copy, Default)]
pub struct WindowNavigator;

impl Navigator for WindowNavigator {
    fn open_new_tab(&self, url: &str) {
        let opened = web_sys::window().and_then(|w| w.open_with_url_and_target(url, "_blank").ok());
        if opened.flatten().is_none() {
            warn!(url, "browser blocked the new tab");
        }
    }
}

/// Config blobs stored as `data-crowdfund-<key>` attributes on the mount element.
///
/// Saved values live only as long as the page.
pub struct PageConfigStore {
    root: Element,
}

impl PageConfigStore {
    /// Store over `root`'s attributes.
    pub fn new(root: Element) -> Self {
        Self { root }
    }
}

/// Attribute holding the blob for `key`.
pub fn attribute_name(key: &str) -> String {
    format!("data-crowdfund-{key}")
}

impl ConfigStore for PageConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        self.root
            .get_attribute(&attribute_name(key))
            .map(String::into_bytes)
            .ok_or(ConfigError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let text = std::str::from_utf8(data).map_err(|err| ConfigError::Other(err.to_string()))?;
        self.root
            .set_attribute(&attribute_name(key), text)
            .map_err(|err| ConfigError::Other(format!("{err:?}")))
    }
}
