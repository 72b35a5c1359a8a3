use std::time::Duration;

use leptos::{either::Either, ev::MouseEvent, prelude::*};

use crate::config::EXTERNAL_REL;
use crate::copy::ButtonLabel;

use super::icons::{Check, Mail, HOVER_GROW};

const PILL: &str = "group px-8 py-4 rounded-full backdrop-blur-sm text-slate-700 hover:shadow-lg transition-all duration-300 font-light text-lg flex items-center gap-3";

/// Pill-shaped link that opens in a new tab without leaking the opener or referrer.
#[component]
pub fn ExternalLink(href: &'static str, label: &'static str, children: Children) -> impl IntoView {
    view! {
        <a
            href=href
            target="_blank"
            rel=EXTERNAL_REL
            class=format!(
                "{PILL} bg-gradient-to-r from-rose-200/70 to-teal-200/70 hover:from-rose-200 hover:to-teal-200",
            )
        >
            {children()}
            <span>{label}</span>
        </a>
    }
}

#[component]
pub fn CopyEmailButton(email: &'static str, display: Duration) -> impl IntoView {
    let (copied, set_copied) = signal(false);

    #[cfg(feature = "hydrate")]
    let on_click = {
        use std::rc::Rc;

        use crate::copy::CopiedFlag;
        use crate::web::{BrowserTimer, NavigatorClipboard};

        let flag = StoredValue::new_local(Rc::new(CopiedFlag::new(
            BrowserTimer,
            display,
            move |c| set_copied.set(c),
        )));
        move |_: MouseEvent| {
            let flag = flag.get_value();
            leptos::task::spawn_local(async move {
                // a failed write is logged by the flag; the address stays on the button
                let _ = flag.copy(&NavigatorClipboard, email).await;
            });
        }
    };
    #[cfg(not(feature = "hydrate"))]
    let on_click = {
        let _ = (set_copied, display);
        move |_: MouseEvent| {}
    };

    view! {
        <button on:click=on_click class=format!("{PILL} bg-white/70 hover:bg-white")>
            {move || match ButtonLabel::new(copied.get(), email) {
                ButtonLabel::Copied => {
                    Either::Left(
                        view! {
                            <Check class="text-teal-600" />
                            <span>{ButtonLabel::Copied.text()}</span>
                        },
                    )
                }
                ButtonLabel::Email(address) => {
                    Either::Right(
                        view! {
                            <Mail class=HOVER_GROW />
                            <span>{address}</span>
                        },
                    )
                }
            }}
        </button>
    }
}
