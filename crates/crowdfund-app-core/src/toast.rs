// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Toast queue with TTL + dedupe for user-facing outcomes.
//!
//! Timestamps are milliseconds from the [`Clock`](crate::clock_port::Clock)
//! port; `std::time::Instant` is unavailable on `wasm32-unknown-unknown`.

use serde::Serialize;
use std::collections::VecDeque;

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    /// Informational note (e.g. a confirmed transaction).
    Info,
    /// Warning that may need attention.
    Warn,
    /// Failed action.
    Error,
}

/// Identifier for a toast entry.
pub type ToastId = u64;

/// Toast data stored in the service.
#[derive(Debug, Clone)]
pub struct Toast {
    /// Stable identifier.
    pub id: ToastId,
    /// Severity.
    pub kind: ToastKind,
    /// Short title line.
    pub title: String,
    /// Optional body text.
    pub body: Option<String>,
    /// Time-to-live in milliseconds.
    pub ttl_ms: u64,
    /// Creation time in milliseconds.
    pub created_ms: u64,
}

impl Toast {
    fn age(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.created_ms)
    }

    fn is_live(&self, now_ms: u64) -> bool {
        self.age(now_ms) < self.ttl_ms
    }
}

/// Rendering-friendly view of a toast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToastRender {
    /// Stable identifier.
    pub id: ToastId,
    /// Severity.
    pub kind: ToastKind,
    /// Short title line.
    pub title: String,
    /// Optional body text.
    pub body: Option<String>,
    /// 1.0 -> just created, 0.0 -> expired.
    pub progress: f32,
}

/// In-memory toast queue with TTL and dedupe window.
pub struct ToastService {
    queue: VecDeque<Toast>,
    max: usize,
    dedupe_window_ms: u64,
    next_id: ToastId,
}

impl ToastService {
    /// Create a new queue with a maximum length.
    pub fn new(max: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            max: max.max(1),
            dedupe_window_ms: 500,
            next_id: 1,
        }
    }

    /// Push a toast, deduping identical recent entries (same kind/title/body within the dedupe window).
    pub fn push<S, B>(&mut self, kind: ToastKind, title: S, body: B, ttl_ms: u64, now_ms: u64) -> ToastId
    where
        S: Into<String>,
        B: Into<Option<String>>,
    {
        let title = title.into();
        let body_opt = body.into();
        let window = self.dedupe_window_ms;

        if let Some(existing) = self.queue.iter_mut().find(|t| {
            t.kind == kind && t.title == title && t.body == body_opt && t.age(now_ms) <= window
        }) {
            existing.created_ms = now_ms;
            existing.ttl_ms = ttl_ms;
            return existing.id;
        }

        let id = self.next_id;
        self.next_id += 1;
        if self.queue.len() == self.max {
            self.queue.pop_front();
        }
        self.queue.push_back(Toast {
            id,
            kind,
            title,
            body: body_opt,
            ttl_ms,
            created_ms: now_ms,
        });
        id
    }

    /// Remove a toast before it expires. Returns whether it was present.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|t| t.id != id);
        self.queue.len() != before
    }

    /// Drop expired toasts (call before rendering).
    pub fn retain_visible(&mut self, now_ms: u64) {
        self.queue.retain(|t| t.is_live(now_ms));
    }

    /// Return render-ready toasts with progress ratios.
    #[allow(clippy::cast_precision_loss)]
    pub fn visible(&self, now_ms: u64) -> Vec<ToastRender> {
        self.queue
            .iter()
            .filter(|t| t.is_live(now_ms))
            .map(|t| ToastRender {
                id: t.id,
                kind: t.kind,
                title: t.title.clone(),
                body: t.body.clone(),
                progress: 1.0 - (t.age(now_ms) as f32 / t.ttl_ms as f32),
            })
            .collect()
    }
}
