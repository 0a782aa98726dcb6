// Example: epoch-keyed reset on collection change.
use windower::{WindowEngine, WindowOptions};

fn main() {
    let ids: Vec<String> = (0..100).map(|i| format!("img-{i}")).collect();
    let count = ids.len();
    let mut e = WindowEngine::new(
        WindowOptions::new(count, move |i| ids[i].clone()).with_initial_load_count(12),
    )
    .unwrap();
    e.load_more();
    e.commit_pending();
    println!("grown: {:?}", e.window_state());

    // Rebuilding the same collection object changes nothing.
    let same: Vec<String> = (0..100).map(|i| format!("img-{i}")).collect();
    e.set_collection(same.len(), move |i| same[i].clone());
    println!("same keys, new allocation: {:?}", e.window_state());

    // A filter that keeps 5 items is a conceptual change; the window resets.
    let filtered: Vec<String> = (0..5).map(|i| format!("img-{}", i * 7)).collect();
    e.set_collection(filtered.len(), move |i| filtered[i].clone());
    println!("filtered down: {:?}", e.window_state());
}
