// Example: a simulated scroll session over a surface.
use windower::{WindowOptions, WindowState};
use windower_adapter::{HubObserver, Surface, SurfaceOptions, WatchTarget};

const SENTINEL: WatchTarget = 1_000_000;

fn main() {
    let ids: Vec<String> = (0..200).map(|i| format!("img-{i}")).collect();
    let count = ids.len();
    let keys = ids.clone();
    let mut surface = Surface::new(
        SurfaceOptions::new(
            WindowOptions::new(count, move |i| keys[i].clone())
                .with_page_size(20)
                .with_initial_load_count(12),
        ),
        HubObserver::new(),
    )
    .unwrap();

    surface.set_sentinel(SENTINEL);
    surface.sync();
    report("after first sync", surface.window_state(), &surface, &ids);

    // Register the rendered prefix, then scroll the first rows into view.
    for i in surface.materialized_range() {
        surface.observe_item(i as WatchTarget, ids[i].clone());
    }
    for i in 0..6 {
        surface.observer_mut().set_visible(i as WatchTarget, true);
        surface.handle_visibility(i as WatchTarget, true);
    }
    report("six items visible", surface.window_state(), &surface, &ids);

    // The user reaches the end of the window; a burst of sentinel events
    // still advances by one page per tick.
    for _ in 0..5 {
        surface.handle_visibility(SENTINEL, true);
    }
    let tick = surface.tick();
    report(
        &format!("after tick ({:?})", tick.commit),
        surface.window_state(),
        &surface,
        &ids,
    );

    surface.dispose();
    println!("disposed: watches={}", surface.observer().watch_count());
}

fn report(label: &str, state: WindowState, surface: &Surface, ids: &[String]) {
    let ready = ids.iter().filter(|id| surface.is_ready(id)).count();
    println!(
        "{label}: materialized={} has_more={} loading={} ready={ready}",
        state.materialized, state.has_more, state.is_loading
    );
}
