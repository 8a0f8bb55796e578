use std::sync::{PoisonError, RwLock};

/// Store state behind a lock that is never held across an `.await`.
///
/// Every access goes through a closure so a guard cannot escape into an
/// async block.
pub(crate) struct StateCell<S> {
    inner: RwLock<S>,
}

impl<S> StateCell<S> {
    pub(crate) fn new(state: S) -> Self {
        Self {
            inner: RwLock::new(state),
        }
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl<S: Clone> StateCell<S> {
    pub(crate) fn snapshot(&self) -> S {
        self.read(S::clone)
    }
}

/// Sets a boolean flag in the state and clears it when dropped, so a flag
/// is released on every exit path including a dropped future.
pub(crate) struct InFlight<'a, S> {
    cell: &'a StateCell<S>,
    flag: fn(&mut S) -> &mut bool,
}

impl<'a, S> InFlight<'a, S> {
    pub(crate) fn begin(cell: &'a StateCell<S>, flag: fn(&mut S) -> &mut bool) -> Self {
        cell.update(|state| *flag(state) = true);
        Self { cell, flag }
    }
}

impl<S> Drop for InFlight<'_, S> {
    fn drop(&mut self) {
        let flag = self.flag;
        self.cell.update(|state| *flag(state) = false);
    }
}
