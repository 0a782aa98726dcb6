// Example: breakpoint-derived grid navigation.
use windower::{Breakpoints, Direction, SelectionCursor, SelectionSource};

fn main() {
    let breakpoints = Breakpoints::default();
    let layout = breakpoints.grid_layout_for(1280);
    println!("layout at 1280px: {layout:?}");

    let materialized = 50;
    let mut cursor = SelectionCursor::new();
    cursor.select(7, SelectionSource::User, materialized);

    for direction in [Direction::Down, Direction::Down, Direction::Right, Direction::Up] {
        let change = cursor.move_selection(direction, layout, materialized);
        println!("{direction:?} -> {:?} ({change:?})", cursor.selection());
    }

    // The collection shrank under the cursor; reconcile clamps it.
    let change = cursor.reconcile(8);
    println!("after shrink to 8: {:?} ({change:?})", cursor.selection());
}
