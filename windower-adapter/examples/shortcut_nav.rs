// Example: routing key presses into surface selection.
use windower::{Layout, WindowOptions};
use windower_adapter::{
    HubObserver, KeyCombo, KeyEvent, ShortcutRegistry, Surface, SurfaceOptions, WatchTarget,
};

#[derive(Clone, Copy, Debug)]
enum Command {
    Next,
    Previous,
    First,
}

fn main() {
    let ids: Vec<String> = (0..60).map(|i| format!("img-{i}")).collect();
    let count = ids.len();
    let mut surface = Surface::new(
        SurfaceOptions::new(WindowOptions::new(count, move |i| ids[i].clone()))
            .with_layout(Layout::Linear),
        HubObserver::new(),
    )
    .unwrap();
    surface.sync();

    let mut shortcuts = ShortcutRegistry::new();
    shortcuts.register(&KeyCombo::new("ArrowDown"), Command::Next);
    shortcuts.register(&KeyCombo::new("ArrowUp"), Command::Previous);
    shortcuts.register(&KeyCombo::new("Home").ctrl(), Command::First);
    // Presses originating from the text input (target 1) never navigate.
    shortcuts.set_editable_guard(Some(|target: WatchTarget| target == 1));

    let session = [
        (KeyCombo::new("ArrowDown"), 0),
        (KeyCombo::new("ArrowDown"), 0),
        (KeyCombo::new("ArrowDown"), 1), // typed into the search box
        (KeyCombo::new("ArrowUp"), 0),
        (KeyCombo::new("Home").ctrl(), 0),
    ];
    for (combo, target) in session {
        let event = KeyEvent { combo, target };
        let change = match shortcuts.dispatch(&event) {
            Some(Command::Next) => surface.select_next(),
            Some(Command::Previous) => surface.select_previous(),
            Some(Command::First) => surface.select(0),
            None => None,
        };
        println!(
            "{:<14} -> selection={:?} change={change:?}",
            event.combo.canonical(),
            surface.selection()
        );
    }
}
