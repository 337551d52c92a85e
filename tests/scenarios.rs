use std::sync::{Arc, Mutex};
use std::time::Duration;

use lull::{DebounceOptions, DebouncedState, Debouncer};
use simplelog::{Config, LevelFilter, SimpleLogger};
use tokio::time::sleep;

fn init_logging() {
    let _ = SimpleLogger::init(LevelFilter::Trace, Config::default());
}

fn tracked(initial: &str) -> (Arc<Mutex<String>>, Debouncer<String>) {
    let current = Arc::new(Mutex::new(initial.to_string()));
    let debouncer = Debouncer::new(initial.to_string(), {
        let current = current.clone();
        move |v| *current.lock().unwrap() = v
    });
    (current, debouncer)
}

#[tokio::test(start_paused = true)]
async fn mirror_trails_a_single_change() {
    init_logging();
    let (current, debouncer) = tracked("a");
    let delay = Duration::from_millis(100);

    debouncer.observe("b".to_string(), delay, DebounceOptions::default());

    sleep(Duration::from_millis(50)).await;
    assert_eq!(*current.lock().unwrap(), "a");

    sleep(Duration::from_millis(60)).await;
    assert_eq!(*current.lock().unwrap(), "b");
}

#[tokio::test(start_paused = true)]
async fn mirror_leading_edge_then_trailing_latest() {
    init_logging();
    let (current, debouncer) = tracked("a");
    let delay = Duration::from_millis(100);
    let leading = DebounceOptions { leading: true };

    debouncer.observe("b".to_string(), delay, leading);
    assert_eq!(*current.lock().unwrap(), "b");

    sleep(Duration::from_millis(20)).await;
    debouncer.observe("c".to_string(), delay, leading);

    sleep(Duration::from_millis(90)).await;
    assert_eq!(*current.lock().unwrap(), "b");

    sleep(Duration::from_millis(20)).await;
    assert_eq!(*current.lock().unwrap(), "c");
}

#[tokio::test(start_paused = true)]
async fn mirror_coalesces_a_typing_burst() {
    init_logging();
    let (current, debouncer) = tracked("");
    let delay = Duration::from_millis(100);

    for text in ["r", "ru", "rus", "rust"] {
        debouncer.observe(text.to_string(), delay, DebounceOptions::default());
        sleep(Duration::from_millis(30)).await;
    }

    // 30ms after the last keystroke nothing has propagated yet
    assert_eq!(*current.lock().unwrap(), "");

    sleep(Duration::from_millis(80)).await;
    assert_eq!(*current.lock().unwrap(), "rust");
}

#[tokio::test(start_paused = true)]
async fn container_flush_beats_the_timer() {
    init_logging();
    let debounced = Arc::new(Mutex::new(0));
    let state = DebouncedState::new(
        0,
        Duration::from_millis(100),
        |_| {},
        {
            let debounced = debounced.clone();
            move |v| *debounced.lock().unwrap() = v
        },
    );

    state.set(5, false);
    sleep(Duration::from_millis(10)).await;
    state.flush();
    assert_eq!(*debounced.lock().unwrap(), 5);
}

#[tokio::test(start_paused = true)]
async fn container_cancel_then_resume() {
    init_logging();
    let debounced = Arc::new(Mutex::new(String::new()));
    let state = DebouncedState::new(
        String::new(),
        Duration::from_millis(100),
        |_| {},
        {
            let debounced = debounced.clone();
            move |v| *debounced.lock().unwrap() = v
        },
    );

    state.set("draft".to_string(), false);
    state.cancel();
    sleep(Duration::from_millis(200)).await;
    assert_eq!(*debounced.lock().unwrap(), "");

    // cancelling suppressed one update, it did not break the instance
    state.set_with(|prev| format!("{prev}!"), false);
    sleep(Duration::from_millis(110)).await;
    assert_eq!(*debounced.lock().unwrap(), "draft!");
}
