// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Block explorer links.

use crowdfund_abi::Address;

use crate::navigator_port::Navigator;

/// `<base>/address/<address>`.
pub fn explorer_url(base_url: &str, address: Address) -> String {
    format!("{}/address/{address}", base_url.trim_end_matches('/'))
}

/// Open the explorer page for `address` in a new browsing context.
pub fn open_in_explorer<N: Navigator>(navigator: &N, base_url: &str, address: Address) {
    navigator.open_new_tab(&explorer_url(base_url, address));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<String>>);

    impl Navigator for Recorder {
        fn open_new_tab(&self, url: &str) {
            self.0.borrow_mut().push(url.to_string());
        }
    }

    #[test]
    fn url_follows_address_template() {
        let addr = Address::repeat_byte(0xab);
        assert_eq!(
            explorer_url("https://sepolia.etherscan.io/", addr),
            format!("https://sepolia.etherscan.io/address/{addr}")
        );
    }

    #[test]
    fn open_forwards_to_navigator() {
        let nav = Recorder::default();
        open_in_explorer(&nav, "https://example.org", Address::ZERO);
        assert_eq!(
            nav.0.borrow().as_slice(),
            [format!("https://example.org/address/{}", Address::ZERO)]
        );
    }
}
