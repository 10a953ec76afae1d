//! Toast notifications
//!
//! A toast is fully visible for a while, then fades, then is removed.
//! Time is passed in explicitly so the stack can be driven by any clock.

use serde::Serialize;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    /// CSS modifier class (`toast--success`, `toast--error`)
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast--success",
            ToastKind::Error => "toast--error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastPhase {
    Visible,
    Fading,
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    kind: ToastKind,
    shown_at: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToastView {
    pub message: String,
    pub kind: ToastKind,
    pub phase: ToastPhase,
}

#[derive(Debug, Clone)]
pub struct ToastStack {
    visible_for: Duration,
    fade_for: Duration,
    toasts: Vec<Toast>,
}

impl ToastStack {
    pub fn new(visible_for: Duration, fade_for: Duration) -> Self {
        Self {
            visible_for,
            fade_for,
            toasts: Vec::new(),
        }
    }

    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind, now: Instant) {
        self.toasts.push(Toast {
            message: message.into(),
            kind,
            shown_at: now,
        });
    }

    /// Remove toasts whose fade has finished
    pub fn prune(&mut self, now: Instant) {
        let lifetime = self.visible_for + self.fade_for;
        self.toasts
            .retain(|toast| now.saturating_duration_since(toast.shown_at) < lifetime);
    }

    /// Toasts still on screen at `now`, oldest first
    pub fn views(&self, now: Instant) -> Vec<ToastView> {
        let lifetime = self.visible_for + self.fade_for;
        self.toasts
            .iter()
            .filter_map(|toast| {
                let age = now.saturating_duration_since(toast.shown_at);
                let phase = if age < self.visible_for {
                    ToastPhase::Visible
                } else if age < lifetime {
                    ToastPhase::Fading
                } else {
                    return None;
                };
                Some(ToastView {
                    message: toast.message.clone(),
                    kind: toast.kind,
                    phase,
                })
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
