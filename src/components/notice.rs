//! Notice Banner Component
//!
//! Inline banner for validation and sync messages next to the map —
//! never a modal, never a page-level error. Info and warning notices
//! dismiss themselves; errors stay until closed.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::{AppContext, NoticeKind};

const AUTO_DISMISS_MS: u32 = 4_000;

/// Inline banner showing the current notice, if any
#[component]
pub fn NoticeBanner() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    // Auto-dismiss, but only if the same notice is still showing when
    // the timer fires
    Effect::new(move |_| {
        let Some(notice) = ctx.notice.get() else {
            return;
        };
        if notice.kind == NoticeKind::Error {
            return;
        }
        spawn_local(async move {
            TimeoutFuture::new(AUTO_DISMISS_MS).await;
            if ctx.notice.get_untracked().as_ref() == Some(&notice) {
                ctx.clear_notice();
            }
        });
    });

    view! {
        {move || ctx.notice.get().map(|notice| {
            let class = match notice.kind {
                NoticeKind::Info => "notice-banner info",
                NoticeKind::Warning => "notice-banner warning",
                NoticeKind::Error => "notice-banner error",
            };
            view! {
                <div class=class>
                    <span class="notice-message">{notice.message.clone()}</span>
                    <button class="notice-close" on:click=move |_| ctx.clear_notice()>
                        "×"
                    </button>
                </div>
            }
        })}
    }
}
