use std::sync::atomic::{AtomicBool, Ordering};

use tracing::warn;

/// Marks a stream unusable unless disarmed. Armed for the span in which a
/// frame is partially on the wire, so an error return, a dropped future or a
/// panic all leave the poison flag set.
pub(crate) struct PoisonGuard<'a> {
    flag: &'a AtomicBool,
    role: &'static str,
    armed: bool,
}

impl<'a> PoisonGuard<'a> {
    pub(crate) fn arm(flag: &'a AtomicBool, role: &'static str) -> Self {
        Self {
            flag,
            role,
            armed: true,
        }
    }

    pub(crate) fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PoisonGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            mark_unusable(self.flag, self.role, "frame left incomplete");
        }
    }
}

/// Sets the flag, logging only on the first transition.
pub(crate) fn mark_unusable(flag: &AtomicBool, role: &'static str, cause: &str) {
    if !flag.swap(true, Ordering::AcqRel) {
        warn!(role, cause, "stream marked unusable");
    }
}

pub(crate) fn is_unusable(flag: &AtomicBool) -> bool {
    flag.load(Ordering::Acquire)
}
