use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;

use crate::state::DebouncedState;

/// Handle returned by [`use_debounce_state`].
///
/// Cloneable, so it can move into as many event handlers as needed. All
/// clones drive the same instance.
#[derive(Clone)]
pub struct UseDebounceState<T: Send + Sync + 'static> {
    state: Arc<DebouncedState<T>>,
    value: SyncSignal<T>,
    debounced: SyncSignal<T>,
}

impl<T: Clone + Send + Sync + 'static> UseDebounceState<T> {
    /// The immediate value, the one to bind to an input.
    pub fn value(&self) -> T {
        (self.value)()
    }

    /// The lagging value.
    pub fn debounced(&self) -> T {
        (self.debounced)()
    }

    /// Set the immediate value now; the debounced value follows after the
    /// delay, or synchronously when `immediate` is true.
    pub fn set(&self, next: T, immediate: bool) {
        self.state.set(next, immediate);
    }

    /// Like [`set`](Self::set), resolving the next value from the latest
    /// immediate value. Rapid successive calls chain without lost updates.
    pub fn set_with(&self, updater: impl FnOnce(&T) -> T, immediate: bool) {
        self.state.set_with(updater, immediate);
    }

    /// Make the debounced value catch up with the immediate value now.
    pub fn flush(&self) {
        self.state.flush();
    }

    /// Discard the pending update, if any.
    pub fn cancel(&self) {
        self.state.cancel();
    }
}

/// Own a value and its debounced shadow in one place: returns a handle
/// exposing both values, a setter and `flush`/`cancel` controls.
///
/// Unmounting the component discards any pending update.
pub fn use_debounce_state<T>(initial: impl FnOnce() -> T, delay: Duration) -> UseDebounceState<T>
where
    T: Clone + Send + Sync + 'static,
{
    let seed = use_hook(|| Rc::new(initial()));

    let value = use_signal_sync({
        let seed = seed.clone();
        move || (*seed).clone()
    });
    let debounced = use_signal_sync({
        let seed = seed.clone();
        move || (*seed).clone()
    });

    let state = use_hook(|| {
        Arc::new(DebouncedState::new(
            (*seed).clone(),
            delay,
            move |next| {
                let mut value = value;
                value.set(next);
            },
            move |next| {
                let mut debounced = debounced;
                debounced.set(next);
            },
        ))
    });

    // the delay passed on the current render governs the next arm
    let last_delay = use_hook(|| Rc::new(Cell::new(delay)));
    if last_delay.get() != delay {
        last_delay.set(delay);
        state.set_delay(delay);
    }

    use_drop({
        let state = state.clone();
        move || state.cancel()
    });

    UseDebounceState {
        state,
        value,
        debounced,
    }
}
