// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Recording doubles for the navigator and render ports.

use crowdfund_app_core::navigator_port::Navigator;
use crowdfund_app_core::render_port::RenderPort;
use std::cell::{Cell, RefCell};

/// Navigator that records opened URLs instead of opening them.
#[derive(Default)]
pub struct RecordingNavigator {
    opened: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    /// URLs opened so far, in order.
    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn open_new_tab(&self, url: &str) {
        self.opened.borrow_mut().push(url.to_string());
    }
}

/// Render port that counts redraw requests.
#[derive(Default)]
pub struct CountingRender {
    redraws: Cell<usize>,
}

impl CountingRender {
    /// Redraw requests so far.
    pub fn redraws(&self) -> usize {
        self.redraws.get()
    }
}

impl RenderPort for CountingRender {
    fn request_redraw(&self) {
        self.redraws.set(self.redraws.get() + 1);
    }
}
