// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Port for opening external pages (block explorer links).

/// Opens URLs outside the client.
pub trait Navigator {
    /// Open `url` in a new browsing context. Best-effort.
    fn open_new_tab(&self, url: &str);
}
