use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Owns an immediate value and publishes a debounced shadow of it.
///
/// Setters update the immediate value synchronously (through `emit_value`)
/// and the debounced value after the delay (through `emit_debounced`),
/// unless asked to do both at once. Timers are spawned on the ambient
/// tokio runtime.
#[derive(Clone)]
pub struct DebouncedState<T> {
    shared: Arc<Shared<T>>,
}

struct Shared<T> {
    state: Mutex<State<T>>,
    emit_value: Box<dyn Fn(T) + Send + Sync>,
    emit_debounced: Box<dyn Fn(T) + Send + Sync>,
}

struct State<T> {
    value: T,
    delay: Duration,
    timer: Option<JoinHandle<()>>,
    epoch: u64,
}

impl<T: Clone + Send + 'static> DebouncedState<T> {
    pub fn new(
        initial: T,
        delay: Duration,
        emit_value: impl Fn(T) + Send + Sync + 'static,
        emit_debounced: impl Fn(T) + Send + Sync + 'static,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    value: initial,
                    delay,
                    timer: None,
                    epoch: 0,
                }),
                emit_value: Box::new(emit_value),
                emit_debounced: Box::new(emit_debounced),
            }),
        }
    }

    /// The current immediate value.
    pub fn get(&self) -> T {
        self.shared.state.lock().unwrap().value.clone()
    }

    pub fn set(&self, next: T, immediate: bool) {
        self.set_with(move |_| next, immediate);
    }

    /// Update through a pure function of the previous value. The updater
    /// runs under the instance lock against the latest value, so rapid
    /// successive calls chain instead of resolving a stale snapshot. It
    /// must not call back into this instance.
    pub fn set_with(&self, updater: impl FnOnce(&T) -> T, immediate: bool) {
        let mut state = self.shared.state.lock().unwrap();
        let next = updater(&state.value);
        state.value = next.clone();
        state.disarm();

        if immediate {
            drop(state);
            (self.shared.emit_value)(next.clone());
            (self.shared.emit_debounced)(next);
        } else {
            arm(&self.shared, &mut state, next.clone());
            drop(state);
            (self.shared.emit_value)(next);
        }
    }

    /// Delay applied to timers armed by later setter calls. Changing it
    /// does not touch a timer that is already pending.
    pub fn set_delay(&self, delay: Duration) {
        self.shared.state.lock().unwrap().delay = delay;
    }

    /// Emit the current immediate value as the debounced value now and
    /// disarm.
    pub fn flush(&self) {
        let mut state = self.shared.state.lock().unwrap();
        state.disarm();
        let value = state.value.clone();
        drop(state);

        log::trace!("debounced state flushed");
        (self.shared.emit_debounced)(value);
    }

    /// Disarm any pending timer. The debounced value is left as it is.
    pub fn cancel(&self) {
        self.shared.state.lock().unwrap().disarm();
    }
}

fn arm<T: Clone + Send + 'static>(shared: &Arc<Shared<T>>, state: &mut State<T>, next: T) {
    let weak = Arc::downgrade(shared);
    let epoch = state.epoch;
    let delay = state.delay;

    log::trace!("debounced state timer armed ({:?})", delay);
    state.timer = Some(tokio::spawn(async move {
        tokio::time::sleep(delay).await;

        let Some(shared) = weak.upgrade() else {
            return;
        };
        let mut state = shared.state.lock().unwrap();
        // a timer that lost the race to a newer arm must not fire
        if state.epoch != epoch {
            return;
        }
        state.timer = None;
        drop(state);

        (shared.emit_debounced)(next);
    }));
}

impl<T> State<T> {
    fn disarm(&mut self) {
        self.epoch += 1;
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl<T> Drop for Shared<T> {
    fn drop(&mut self) {
        if let Ok(state) = self.state.get_mut() {
            if let Some(timer) = state.timer.take() {
                timer.abort();
            }
        }
    }
}
