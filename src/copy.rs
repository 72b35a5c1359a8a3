//! Copy-email action and the transient "Copied!" confirmation.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::error::ClipboardError;

pub const COPIED_LABEL: &str = "Copied!";

/// Write-only access to the system clipboard.
#[allow(async_fn_in_trait)]
pub trait Clipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Schedules the confirmation reset. Handles from a previous schedule may be
/// cancelled when a newer copy supersedes them.
pub trait ResetTimer {
    type Handle;

    fn schedule(&self, after: Duration, reset: Box<dyn FnOnce()>) -> Option<Self::Handle>;
    fn cancel(&self, handle: Self::Handle);
}

/// Identifies one successful copy, so a stale reset can't clear a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Generation(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum CopyState {
    #[default]
    Idle,
    Showing(Generation),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyFeedback {
    state: CopyState,
    next: u64,
}

impl CopyFeedback {
    /// Enters (or re-enters) `Showing`.
    pub fn succeed(&mut self) -> Generation {
        let generation = Generation(self.next);
        self.next += 1;
        self.state = CopyState::Showing(generation);
        generation
    }

    /// Returns to `Idle` if `generation` is still the one being shown.
    pub fn expire(&mut self, generation: Generation) -> bool {
        if self.state == CopyState::Showing(generation) {
            self.state = CopyState::Idle;
            true
        } else {
            false
        }
    }

    pub fn is_copied(&self) -> bool {
        matches!(self.state, CopyState::Showing(_))
    }
}

/// What the copy button currently says.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonLabel<'a> {
    Email(&'a str),
    Copied,
}

impl<'a> ButtonLabel<'a> {
    pub fn new(copied: bool, email: &'a str) -> Self {
        if copied {
            Self::Copied
        } else {
            Self::Email(email)
        }
    }

    pub fn text(&self) -> &'a str {
        match *self {
            Self::Email(email) => email,
            Self::Copied => COPIED_LABEL,
        }
    }
}

/// Writes `email` to the clipboard. Failures are logged and returned; the
/// caller shows nothing for them.
pub async fn copy_email<C: Clipboard + ?Sized>(
    clipboard: &C,
    email: &str,
) -> Result<(), ClipboardError> {
    match clipboard.write_text(email).await {
        Ok(()) => {
            log::debug!("copied {email} to clipboard");
            Ok(())
        }
        Err(err) => {
            log::error!("Failed to copy email: {err}");
            Err(err)
        }
    }
}

struct FlagState {
    feedback: RefCell<CopyFeedback>,
    notify: Box<dyn Fn(bool)>,
}

/// The copied flag together with its pending reset.
///
/// `notify` is called with `true` on every successful copy and with `false`
/// once the latest confirmation has been shown for `display`.
pub struct CopiedFlag<T: ResetTimer> {
    state: Rc<FlagState>,
    pending: RefCell<Option<T::Handle>>,
    timer: T,
    display: Duration,
}

impl<T: ResetTimer> CopiedFlag<T> {
    pub fn new(timer: T, display: Duration, notify: impl Fn(bool) + 'static) -> Self {
        Self {
            state: Rc::new(FlagState {
                feedback: RefCell::new(CopyFeedback::default()),
                notify: Box::new(notify),
            }),
            pending: RefCell::new(None),
            timer,
            display,
        }
    }

    pub fn is_copied(&self) -> bool {
        self.state.feedback.borrow().is_copied()
    }

    /// Shows the confirmation and (re)starts the reset timer.
    pub fn mark_copied(&self) {
        let generation = self.state.feedback.borrow_mut().succeed();
        (self.state.notify)(true);

        if let Some(previous) = self.pending.borrow_mut().take() {
            self.timer.cancel(previous);
        }
        let state: Weak<FlagState> = Rc::downgrade(&self.state);
        let handle = self.timer.schedule(
            self.display,
            Box::new(move || {
                let Some(state) = state.upgrade() else {
                    return;
                };
                let expired = state.feedback.borrow_mut().expire(generation);
                if expired {
                    (state.notify)(false);
                }
            }),
        );
        if handle.is_none() {
            log::warn!("couldn't schedule copied-label reset");
        }
        *self.pending.borrow_mut() = handle;
    }

    /// Copies `email`, showing the confirmation only if the write succeeded.
    pub async fn copy<C: Clipboard + ?Sized>(
        &self,
        clipboard: &C,
        email: &str,
    ) -> Result<(), ClipboardError> {
        copy_email(clipboard, email).await?;
        self.mark_copied();
        Ok(())
    }
}

impl<T: ResetTimer> Drop for CopiedFlag<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.get_mut().take() {
            self.timer.cancel(handle);
        }
    }
}
