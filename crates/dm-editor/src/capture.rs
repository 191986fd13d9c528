//! Pointer capture for drag sessions.
//!
//! While a desk is being dragged, pointer moves and the final release must
//! reach the editor even when the pointer leaves the glyph or the map. The
//! host provides a `PointerCapture` (DOM `setPointerCapture` in the browser);
//! a drag session holds the returned `CaptureLease` and the lease releases
//! the capture when dropped. Dropping the session, for whatever reason,
//! always releases.

use std::fmt;

/// Host-side capture provider.
pub trait PointerCapture {
    fn acquire(&self, pointer_id: i32) -> CaptureLease;
}

/// Releases its capture exactly once, when dropped.
pub struct CaptureLease {
    release: Option<Box<dyn FnOnce()>>,
}

impl CaptureLease {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A lease with nothing to release.
    pub fn detached() -> Self {
        Self { release: None }
    }
}

impl Drop for CaptureLease {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for CaptureLease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureLease")
            .field("held", &self.release.is_some())
            .finish()
    }
}

/// No-op capture for headless use and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn acquire(&self, _pointer_id: i32) -> CaptureLease {
        CaptureLease::detached()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn lease_releases_once_on_drop() {
        let released = Rc::new(Cell::new(0));
        let counter = released.clone();
        let lease = CaptureLease::new(move || counter.set(counter.get() + 1));
        assert_eq!(released.get(), 0);
        drop(lease);
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn detached_lease_is_inert() {
        drop(NoCapture.acquire(1));
    }
}
