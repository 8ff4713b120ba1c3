//! Debug-only reentrancy guard for `ChainHashMap`.
//!
//! The map calls back into user code (the hash and equality functions of its
//! `KeyOps`) while a chain is being walked. A callback that reaches the same
//! map again would observe a half-finished operation, so in debug builds
//! every public entry point takes the guard and a nested entry panics. In
//! release builds the guard is a zero-sized no-op.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-map reentrancy tracker. Public entry points start with
/// `let _g = self.reentrancy.enter();`.
#[derive(Debug, Default)]
pub struct DebugReentrancy {
    #[cfg(debug_assertions)]
    busy: Cell<bool>,
    // Keeps the owning map !Sync in release builds as well.
    _nosync: PhantomData<Cell<()>>,
}

impl DebugReentrancy {
    pub const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            busy: Cell::new(false),
            _nosync: PhantomData,
        }
    }

    /// Mark the map busy until the returned guard drops. Panics in debug
    /// builds if the map is already busy.
    #[inline]
    pub fn enter(&self) -> ReentrancyGuard<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.busy.replace(true),
                "reentrancy detected: key operation re-entered ChainHashMap"
            );
            return ReentrancyGuard { owner: self };
        }

        #[cfg(not(debug_assertions))]
        {
            return ReentrancyGuard { _z: PhantomData };
        }
    }

    /// Whether a guard is currently held. Always false in release builds.
    #[cfg(test)]
    pub fn is_busy(&self) -> bool {
        #[cfg(debug_assertions)]
        return self.busy.get();

        #[cfg(not(debug_assertions))]
        return false;
    }
}

/// RAII guard returned by `DebugReentrancy::enter`.
pub struct ReentrancyGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a DebugReentrancy,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<&'a ()>,
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        {
            let was_busy = self.owner.busy.replace(false);
            debug_assert!(was_busy);
        }
    }
}
