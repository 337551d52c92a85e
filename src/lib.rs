//! Debounced state for Dioxus components.
//!
//! Two hooks cover the common shapes:
//!
//! - [`use_debounce`] mirrors a value you already own, trailing it by a
//!   quiet period.
//! - [`use_debounce_state`] owns the value itself and hands you a setter,
//!   so an input field can stay live while downstream consumers see the
//!   settled value.
//!
//! Both come with `flush`/`cancel` controls. The scheduling itself lives
//! in [`Debouncer`] and [`DebouncedState`], which also work without a
//! component in scope as long as a tokio runtime is running.

pub mod debounce;
pub mod hooks;
pub mod state;

pub use debounce::{DebounceOptions, Debouncer, DEFAULT_DELAY};
pub use hooks::{use_debounce, use_debounce_state, DebounceControls, UseDebounceState};
pub use state::DebouncedState;
