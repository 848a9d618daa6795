//! Listeners that turn traversal events into a picture of the maze.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use crossterm::cursor::MoveTo;
use crossterm::style::Print;
use crossterm::QueueableCommand;
use log::warn;
use rand::Rng;

use crate::events::{EventKind, MazeEvent};
use crate::generators::MazeGenerator;
use crate::grid::GridBounds;
use crate::maze::{CellLinkError, CellShade, Maze};

/// Keep `maze` in step with the generator.
///
/// Entering a cell highlights it, queueing a cell marks it as frontier, a discovery knocks down the
/// wall it crossed and finishing with a cell clears its shading.
pub fn attach_maze<G, R>(generator: &mut MazeGenerator<G, R>, maze: &Rc<RefCell<Maze>>)
    where G: GridBounds,
          R: Rng
{
    let shade_on = |shade: CellShade| {
        let maze = maze.clone();
        move |event: &MazeEvent| {
            maze.borrow_mut().set_shade(event.position(), shade);
        }
    };
    generator.subscribe(EventKind::Enter, shade_on(CellShade::Current));
    generator.subscribe(EventKind::Push, shade_on(CellShade::Frontier));
    generator.subscribe(EventKind::Reveal, shade_on(CellShade::Finished));

    let carved = maze.clone();
    generator.subscribe(EventKind::Discover, move |event| {
        if let MazeEvent::Discover { from, to } = *event {
            match carved.borrow_mut().link(from, to) {
                // the start cell is discovered from itself; no wall to remove
                Ok(()) | Err(CellLinkError::SelfLink) => {}
                Err(e) => warn!("cannot open wall between {} and {}: {:?}", from, to, e),
            }
        }
    });
}

/// Redraw the whole maze to `out` after every discovery, so each step delay shows as a frame.
/// Each frame homes the cursor and overdraws the previous one.
///
/// Subscribe after `attach_maze` so the frame includes the wall just removed.
pub fn attach_terminal_redraw<G, R, W>(generator: &mut MazeGenerator<G, R>,
                                       maze: &Rc<RefCell<Maze>>,
                                       out: W)
    where G: GridBounds,
          R: Rng,
          W: Write + 'static
{
    let maze = maze.clone();
    let mut out = out;
    generator.subscribe(EventKind::Discover, move |_| {
        let drawn = out.queue(MoveTo(0, 0))
                       .and_then(|out| out.queue(Print(&*maze.borrow())))
                       .and_then(|out| out.flush());
        if let Err(e) = drawn {
            warn!("failed to draw maze frame: {}", e);
        }
    });
}
