//! Application Context
//!
//! Shared state provided via Leptos Context API, plus the
//! apply/dispatch glue between the editors, the sync controller, and
//! the persistence API: components hand validated intents to
//! [`AppContext::apply`], and everything downstream (optimistic
//! mirror, REST call, confirm/rollback) happens here.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::intent::Intent;
use crate::store::{store_sync_collections, AppStore};
use crate::sync::{OpRequest, SyncController};

/// Severity of an inline notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// A notice shown inline near the map, never a global error page
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Canonical collections + pending op bookkeeping
    pub sync: RwSignal<SyncController>,
    /// Render mirror of the canonical collections
    pub store: AppStore,
    /// Trigger to reload collections from backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload collections from backend - write
    set_reload_trigger: WriteSignal<u32>,
    /// Current inline notice - read
    pub notice: ReadSignal<Option<Notice>>,
    /// Current inline notice - write
    set_notice: WriteSignal<Option<Notice>>,
}

impl AppContext {
    pub fn new(
        sync: RwSignal<SyncController>,
        store: AppStore,
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        notice: (ReadSignal<Option<Notice>>, WriteSignal<Option<Notice>>),
    ) -> Self {
        Self {
            sync,
            store,
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            notice: notice.0,
            set_notice: notice.1,
        }
    }

    /// Trigger a reload of plots/placements/catalog
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Show an inline notice near the map
    pub fn show_notice(&self, notice: Notice) {
        self.set_notice.set(Some(notice));
    }

    /// Clear the current notice
    pub fn clear_notice(&self) {
        self.set_notice.set(None);
    }

    /// Optimistically apply a validated intent and kick off its
    /// persistence calls.
    pub fn apply(&self, intent: Intent) {
        let ops = self.sync.try_update(|s| s.apply(intent)).unwrap_or_default();
        self.mirror();
        for op in ops {
            dispatch_op(*self, op);
        }
    }

    /// Copy the canonical collections into the reactive store so
    /// components re-render.
    pub fn mirror(&self) {
        let (plots, placements) = self
            .sync
            .with_untracked(|s| (s.plots().to_vec(), s.placements().to_vec()));
        store_sync_collections(&self.store, plots, placements);
    }
}

/// Run one op against the backend, feed the outcome back, and chase
/// any follow-up ops it unblocks.
fn dispatch_op(ctx: AppContext, op: OpRequest) {
    spawn_local(async move {
        let outcome = api::perform(op.call).await;
        let effect = ctx
            .sync
            .try_update(|s| s.resolve(op.seq, outcome))
            .unwrap_or_default();
        ctx.mirror();

        if let Some(failure) = effect.failure {
            web_sys::console::warn_1(&format!("[SYNC] rolled back: {}", failure).into());
            ctx.show_notice(Notice::error(failure.to_string()));
        }
        for next in effect.next {
            dispatch_op(ctx, next);
        }
    });
}
