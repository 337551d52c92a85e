use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DebounceOptions {
    // if true, emit immediately on the first change of a window,
    // then debounce subsequent changes
    pub leading: bool,
}

/// Trails an observed value: each [`observe`](Debouncer::observe) re-arms a
/// single timer, and the emit callback fires once the input has been quiet
/// for the delay (or immediately, once per window, in leading mode).
///
/// Timers are spawned on the ambient tokio runtime.
#[derive(Clone)]
pub struct Debouncer<T> {
    shared: Arc<Shared<T>>,
}

struct Shared<T> {
    state: Mutex<State<T>>,
    emit: Box<dyn Fn(T) + Send + Sync>,
}

struct State<T> {
    last_seen: T,
    timer: Option<JoinHandle<()>>,
    leading_fired: bool,
    epoch: u64,
}

// What an armed timer does when it fires.
enum Fire<T> {
    Emit(T),
    EmitLatest,
    CloseWindow,
}

impl<T: Clone + Send + 'static> Debouncer<T> {
    pub fn new(initial: T, emit: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    last_seen: initial,
                    timer: None,
                    leading_fired: false,
                    epoch: 0,
                }),
                emit: Box::new(emit),
            }),
        }
    }

    /// Record a change of the input value and reschedule. Also the entry
    /// point for a changed `delay` or `options`, which reschedules exactly
    /// as if the value had changed.
    pub fn observe(&self, value: T, delay: Duration, options: DebounceOptions) {
        let mut state = self.shared.state.lock().unwrap();
        state.last_seen = value.clone();
        state.disarm();

        let emit_now = if !options.leading {
            arm(&self.shared, &mut state, delay, Fire::Emit(value));
            None
        } else if !state.leading_fired {
            // fire on the leading edge, then hold the window open
            state.leading_fired = true;
            arm(&self.shared, &mut state, delay, Fire::CloseWindow);
            Some(value)
        } else {
            // already fired in this window, so schedule a trailing update
            arm(&self.shared, &mut state, delay, Fire::EmitLatest);
            None
        };
        drop(state);

        if let Some(value) = emit_now {
            (self.shared.emit)(value);
        }
    }

    /// Emit the most recently observed value now and disarm. Also closes
    /// the leading window.
    pub fn flush(&self) {
        let mut state = self.shared.state.lock().unwrap();
        state.disarm();
        state.leading_fired = false;
        let value = state.last_seen.clone();
        drop(state);

        log::trace!("debounce flushed");
        (self.shared.emit)(value);
    }

    /// Disarm any pending timer. The debounced value and the leading
    /// window are left as they are.
    pub fn cancel(&self) {
        self.shared.state.lock().unwrap().disarm();
    }
}

fn arm<T: Clone + Send + 'static>(
    shared: &Arc<Shared<T>>,
    state: &mut State<T>,
    delay: Duration,
    fire: Fire<T>,
) {
    let weak = Arc::downgrade(shared);
    let epoch = state.epoch;

    log::trace!("debounce timer armed ({:?})", delay);
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

        let emitted = match fire {
            Fire::Emit(value) => Some(value),
            Fire::EmitLatest => {
                state.leading_fired = false;
                Some(state.last_seen.clone())
            }
            Fire::CloseWindow => {
                state.leading_fired = false;
                None
            }
        };
        drop(state);

        if let Some(value) = emitted {
            (shared.emit)(value);
        }
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
