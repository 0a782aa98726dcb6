// Example: two-phase incremental pagination.
use windower::{WindowEngine, WindowOptions};

fn main() {
    let ids: Vec<String> = (0..10_000).map(|i| format!("img-{i}")).collect();
    let count = ids.len();
    let mut e = WindowEngine::new(
        WindowOptions::new(count, move |i| ids[i].clone())
            .with_page_size(20)
            .with_initial_load_count(12),
    )
    .unwrap();
    println!("after init: {:?}", e.window_state());

    // The sentinel at the end of the window became visible.
    e.notify_end_sentinel_visible();
    println!("decided:    {:?}", e.window_state());

    // A deferred scheduler tick commits the step.
    let outcome = e.commit_pending();
    println!("committed ({outcome:?}): {:?}", e.window_state());
}
