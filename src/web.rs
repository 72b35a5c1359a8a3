//! Browser implementations of the page's platform capabilities.

use std::time::Duration;

use leptos::prelude::{set_timeout_with_handle, TimeoutHandle};
use wasm_bindgen::{prelude::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::copy::{Clipboard, ResetTimer};
use crate::error::{ClipboardError, WatchError};
use crate::scroll::ScrollIntoView;
use crate::visibility::{ObserverOptions, ViewportWatcher, VisibilityCallback};

/// One `IntersectionObserver` per section.
///
/// Threshold and root margin come from [`ObserverOptions`]; the native tests
/// only reach the trait, so the observer setup is checked by hand in a browser.
#[derive(Debug, Default)]
pub struct IntersectionWatcher;

pub struct Observation {
    observer: IntersectionObserver,
    // must outlive the observer, JS holds a reference to it
    _callback: Closure<dyn FnMut(js_sys::Array)>,
}

fn intersection_observer_supported() -> bool {
    web_sys::window()
        .map(|w| js_sys::Reflect::has(&w, &JsValue::from_str("IntersectionObserver")).unwrap_or(false))
        .unwrap_or(false)
}

impl ViewportWatcher for IntersectionWatcher {
    type Target = Element;
    type Handle = Observation;

    fn observe(
        &mut self,
        target: &Element,
        options: &ObserverOptions,
        on_change: VisibilityCallback,
    ) -> Result<Observation, WatchError> {
        if !intersection_observer_supported() {
            return Err(WatchError::Unsupported);
        }

        let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                on_change(entry.is_intersecting());
            }
        });

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(options.root_margin);
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(|e| WatchError::Observe(format!("{e:?}")))?;
        observer.observe(target);

        Ok(Observation {
            observer,
            _callback: callback,
        })
    }

    fn release(&mut self, handle: Observation) {
        handle.observer.disconnect();
    }
}

/// `navigator.clipboard`, absent on insecure origins.
#[derive(Debug, Default)]
pub struct NavigatorClipboard;

impl Clipboard for NavigatorClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let window = web_sys::window().ok_or(ClipboardError::Unavailable)?;
        let clipboard = window.navigator().clipboard();
        if clipboard.is_undefined() {
            return Err(ClipboardError::Unavailable);
        }
        JsFuture::from(clipboard.write_text(text))
            .await
            .map(|_| ())
            .map_err(|e| ClipboardError::Rejected(format!("{e:?}")))
    }
}

#[derive(Debug, Default)]
pub struct BrowserTimer;

impl ResetTimer for BrowserTimer {
    type Handle = TimeoutHandle;

    fn schedule(&self, after: Duration, reset: Box<dyn FnOnce()>) -> Option<TimeoutHandle> {
        set_timeout_with_handle(reset, after)
            .map_err(|e| log::warn!("setTimeout failed: {e:?}"))
            .ok()
    }

    fn cancel(&self, handle: TimeoutHandle) {
        handle.clear();
    }
}

// Smooth behaviour with block `Start` is checked by hand in a browser.
impl ScrollIntoView for Element {
    fn scroll_into_view_smoothly(&self) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        self.scroll_into_view_with_scroll_into_view_options(&options);
    }
}
