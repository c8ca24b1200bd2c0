//! Scoped Ctrl-C (SIGINT) handling for a copy run.
//!
//! While an [`InterruptGuard`] is alive the first SIGINT only sets the pause
//! flag. A SIGINT received while the flag is already set is forwarded to the
//! disposition that was in place before the first guard: the default action
//! terminates the process, a host handler just runs. Dropping the guard hands
//! SIGINT back to that same disposition.
//!
//! signal-hook keeps its trampoline installed once registered. When the prior
//! disposition was `SIG_DFL`, a process-wide fallback action emulates the
//! default action whenever no guard is active. Any other prior disposition is
//! already kept by signal-hook (it chains to a host handler, and registry
//! actions registered by the host stay in place), so no fallback is added.
//! The handlers only touch atomics.

use super::PauseFlag;
use crate::error::Result;

/// Keeps the pause-on-interrupt handler installed until dropped.
#[must_use = "the interrupt handler is removed when the guard is dropped"]
#[derive(Debug)]
pub struct InterruptGuard {
    #[cfg(unix)]
    ids: Vec<signal_hook::SigId>,
}

#[cfg(unix)]
mod imp {
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, OnceLock};

    use signal_hook::consts::SIGINT;
    use signal_hook::{flag, low_level, SigId};
    use tracing::debug;

    use super::{InterruptGuard, PauseFlag};
    use crate::error::{ChunkerError, Result};

    /// Number of live guards.
    static ACTIVE_GUARDS: AtomicUsize = AtomicUsize::new(0);

    /// Whether SIGINT had the default disposition at first install, and the
    /// fallback registered for it. Decided once per process.
    static PRIOR: OnceLock<std::result::Result<Option<SigId>, String>> = OnceLock::new();

    /// True when the disposition is `SIG_DFL`.
    fn default_disposition() -> io::Result<bool> {
        // SAFETY: a null `act` only queries the current disposition into `old`.
        unsafe {
            let mut old: libc::sigaction = std::mem::zeroed();
            if libc::sigaction(SIGINT, std::ptr::null(), &mut old) != 0 {
                return Err(io::Error::last_os_error());
            }
            Ok(old.sa_sigaction == libc::SIG_DFL)
        }
    }

    fn register_fallback() -> io::Result<SigId> {
        // SAFETY: the action only performs an atomic load and calls
        // `emulate_default_handler`, both async-signal-safe.
        unsafe {
            low_level::register(SIGINT, || {
                if ACTIVE_GUARDS.load(Ordering::SeqCst) == 0 {
                    let _ = low_level::emulate_default_handler(SIGINT);
                }
            })
        }
    }

    /// Returns whether SIGINT escalates to the default action.
    fn ensure_fallback() -> Result<bool> {
        let prior = PRIOR.get_or_init(|| {
            let fallback = match default_disposition() {
                Ok(true) => register_fallback().map(Some),
                Ok(false) => {
                    debug!("SIGINT already has a handler; leaving it in charge outside runs");
                    Ok(None)
                }
                Err(e) => Err(e),
            };
            fallback.map_err(|e| e.to_string())
        });

        match prior {
            Ok(fallback) => Ok(fallback.is_some()),
            Err(message) => Err(ChunkerError::Signal(io::Error::other(message.clone()))),
        }
    }

    pub(super) fn install(flag: &PauseFlag) -> Result<InterruptGuard> {
        let terminates = ensure_fallback()?;
        ACTIVE_GUARDS.fetch_add(1, Ordering::SeqCst);

        let mut guard = InterruptGuard { ids: Vec::with_capacity(2) };

        // Registration order is execution order: the escalation check must
        // see the flag before this same signal sets it.
        if terminates {
            match flag::register_conditional_default(SIGINT, Arc::clone(&flag.0)) {
                Ok(id) => guard.ids.push(id),
                Err(e) => return Err(ChunkerError::Signal(e)),
            }
        }
        match flag::register(SIGINT, Arc::clone(&flag.0)) {
            Ok(id) => guard.ids.push(id),
            Err(e) => return Err(ChunkerError::Signal(e)),
        }

        debug!(terminates, "Installed SIGINT pause handler");
        Ok(guard)
    }

    pub(super) fn restore(guard: &mut InterruptGuard) {
        for id in guard.ids.drain(..).rev() {
            low_level::unregister(id);
        }
        ACTIVE_GUARDS.fetch_sub(1, Ordering::SeqCst);
        debug!("Restored prior SIGINT handling");
    }
}

#[cfg(not(unix))]
mod imp {
    use super::{InterruptGuard, PauseFlag};
    use crate::error::Result;

    pub(super) fn install(_flag: &PauseFlag) -> Result<InterruptGuard> {
        tracing::debug!("SIGINT pausing is not supported on this platform");
        Ok(InterruptGuard {})
    }

    pub(super) fn restore(_guard: &mut InterruptGuard) {}
}

impl InterruptGuard {
    /// Route SIGINT to `flag` until the returned guard is dropped.
    pub fn install(flag: &PauseFlag) -> Result<Self> {
        imp::install(flag)
    }
}

impl Drop for InterruptGuard {
    fn drop(&mut self) {
        imp::restore(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_and_drop_leave_flag_untouched() {
        let flag = PauseFlag::new();
        {
            let _guard = InterruptGuard::install(&flag).unwrap();
            assert!(!flag.is_paused());
        }
        assert!(!flag.is_paused());
    }

    #[test]
    fn test_guards_can_be_reinstalled() {
        let flag = PauseFlag::new();
        for _ in 0..3 {
            let guard = InterruptGuard::install(&flag).unwrap();
            drop(guard);
        }
    }
}
