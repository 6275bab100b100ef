//! Cooperative interruption between documents
//!
//! Phases poll the flag before starting the next document and never in the
//! middle of a write, so an interrupted run leaves no half-written file.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared stop flag checked by every phase
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    /// A flag that is never raised unless [`Interrupt::raise`] is called
    pub fn new() -> Self {
        Self::default()
    }

    /// A flag raised by Ctrl-C.
    ///
    /// Installing the handler can fail if another handler is already
    /// registered; the flag still works for manual raising in that case.
    pub fn install_ctrlc() -> Self {
        let interrupt = Self::new();
        let flag = Arc::clone(&interrupt.flag);

        if let Err(e) = ctrlc::set_handler(move || {
            flag.store(true, Ordering::SeqCst);
        }) {
            tracing::warn!(error = %e, "failed to install Ctrl-C handler");
        }

        interrupt
    }

    pub fn raise(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
