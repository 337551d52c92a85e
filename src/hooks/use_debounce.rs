use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;

use crate::debounce::{DebounceOptions, Debouncer};

/// Imperative controls over a [`use_debounce`] instance.
#[derive(Clone)]
pub struct DebounceControls<T: 'static> {
    debouncer: Arc<Debouncer<T>>,
}

impl<T: Clone + Send + 'static> DebounceControls<T> {
    /// Make the debounced value catch up with the input now.
    pub fn flush(&self) {
        self.debouncer.flush();
    }

    /// Discard the pending update, if any.
    pub fn cancel(&self) {
        self.debouncer.cancel();
    }
}

/// Mirror `value` into a copy that only changes once the input has been
/// quiet for `delay` (or immediately, once per window, with
/// `DebounceOptions { leading: true }`).
///
/// Changing `delay` or `options` between renders reschedules as if the
/// value had changed. Unmounting the component discards any pending
/// update. [`DEFAULT_DELAY`](crate::DEFAULT_DELAY) is the conventional
/// delay when the caller has no better number.
///
/// ```no_run
/// use std::time::Duration;
///
/// use dioxus::prelude::*;
/// use lull::{use_debounce, DebounceOptions};
///
/// fn Search() -> Element {
///     let mut query = use_signal(String::new);
///     let (debounced, controls) = use_debounce(
///         query(),
///         Duration::from_millis(300),
///         DebounceOptions::default(),
///     );
///
///     rsx! {
///         input {
///             value: "{query}",
///             oninput: move |e| query.set(e.value()),
///         }
///         button { onclick: move |_| controls.flush(), "Search now" }
///         label { "{debounced}" }
///     }
/// }
/// ```
pub fn use_debounce<T>(
    value: T,
    delay: Duration,
    options: DebounceOptions,
) -> (T, DebounceControls<T>)
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    let debounced = use_signal_sync({
        let value = value.clone();
        move || value
    });

    let debouncer = use_hook(|| {
        let value = value.clone();
        Arc::new(Debouncer::new(value, move |next| {
            let mut debounced = debounced;
            debounced.set(next);
        }))
    });

    // last (value, delay, options) seen by the scheduler, kept across
    // renders so unrelated re-renders don't re-arm the timer
    let observed = use_hook(|| Rc::new(RefCell::new((value.clone(), delay, options))));
    {
        let mut last = observed.borrow_mut();
        if *last != (value.clone(), delay, options) {
            *last = (value.clone(), delay, options);
            debouncer.observe(value, delay, options);
        }
    }

    use_drop({
        let debouncer = debouncer.clone();
        move || debouncer.cancel()
    });

    (debounced(), DebounceControls { debouncer })
}
