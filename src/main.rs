//! Terminal blockfall runner (default binary).
//!
//! Wires the board to its collaborators, polls input with a timeout until
//! the next gravity tick, and draws a full frame each pass.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::{Board, SimpleRng};
use blockfall::engine;
use blockfall::input::{handle_key_event, should_quit};
use blockfall::score::{JsonFileStore, ScoreTracker};
use blockfall::term::{GameView, SidePanel, TerminalRenderer};
use blockfall::types::{
    Bounds, GameAction, BOARD_HEIGHT, BOARD_WIDTH, GRAVITY_MS, SPAWN_ANCHOR,
};

/// High-score document, kept next to the working directory the way the
/// terminal games in this family do.
const SCORE_FILE: &str = "blockfall-scores.json";

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let panel = Rc::new(RefCell::new(SidePanel::new()));
    let tracker = Rc::new(RefCell::new(
        ScoreTracker::new(Box::new(JsonFileStore::load(SCORE_FILE)))
            .with_display(Box::new(Rc::clone(&panel))),
    ));

    let mut board = Board::with_collaborators(
        Bounds::centered(BOARD_WIDTH, BOARD_HEIGHT),
        SPAWN_ANCHOR,
        Box::new(SimpleRng::new(clock_seed())),
        Box::new(Rc::clone(&tracker)),
        Box::new(Rc::clone(&panel)),
    );
    board.spawn_piece();

    let view = GameView::new();
    let gravity = Duration::from_millis(GRAVITY_MS);
    let mut last_drop = Instant::now();
    let mut paused = false;

    loop {
        {
            let frame = view.render(&board, &panel.borrow(), paused);
            term.draw(&frame)?;
        }

        // Input with timeout until the next gravity tick.
        let timeout = gravity
            .checked_sub(last_drop.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        match action {
                            GameAction::Pause => paused = !paused,
                            GameAction::Restart => {
                                tracker.borrow_mut().reset_score();
                                board.restart();
                                board.spawn_piece();
                                paused = false;
                                last_drop = Instant::now();
                            }
                            _ if paused => {}
                            action => {
                                engine::apply_action(&mut board, action);
                            }
                        }
                    }
                }
            }
        }

        if !paused && last_drop.elapsed() >= gravity {
            last_drop = Instant::now();
            engine::gravity_step(&mut board);
        }
    }
}

/// Wall-clock seed so each session draws a different piece sequence.
fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1)
}
