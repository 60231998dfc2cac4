// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Port trait for adapter layers to request a redraw of the page without
//! depending on a specific DOM crate.

/// Minimal redraw port; implementations are expected to be cheap/best-effort
/// and typically re-render the current [`PageView`](crate::view::PageView).
pub trait RenderPort {
    /// Request a redraw of the client surface.
    fn request_redraw(&self);
}
