mod use_debounce;
mod use_debounce_state;

pub use use_debounce::{use_debounce, DebounceControls};
pub use use_debounce_state::{use_debounce_state, UseDebounceState};
