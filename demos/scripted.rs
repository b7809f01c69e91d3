use grid_astar_visualizer::{GridConfig, InputEvent, PixelPos, ScriptedInput, Session, TextRenderer};

// In this example a session is driven by scripted clicks on a 10x10 grid drawn on a 100 px
// surface: a start in the top-left corner, an end in the bottom-right one and a wall with a
// single gap in between. After the search, the last rendered frame is printed, where
// - S marks the start
// - E marks the end
// - # marks a wall
// - * marks the path
// - x and o mark expanded and queued cells

fn click(row: u32, col: u32) -> InputEvent {
    InputEvent::PrimaryPress(PixelPos::new(col * 10 + 5, row * 10 + 5))
}

fn main() {
    let config = GridConfig::new(10, 100).unwrap();
    let mut session = Session::new(config).unwrap();
    let mut events = vec![click(0, 0), click(9, 9)];
    events.extend((0..9).map(|row| click(row, 5)));
    events.push(InputEvent::KeyTrigger);
    let mut input = ScriptedInput::from_events(events);
    // Give the search enough idle frames to finish before the script runs dry
    for _ in 0..200 {
        input.push_frame(Vec::new());
    }
    let mut renderer = TextRenderer::bounded(1);
    session.run(&mut renderer, &mut input).unwrap();

    println!("{}", renderer.last_frame().unwrap_or_default());
    match session.last_result().and_then(|r| r.path()) {
        Some(path) => {
            println!("Path of length {}:", path.len());
            for c in path.cells() {
                println!("{}", c);
            }
        }
        None => println!("No path"),
    }
}
