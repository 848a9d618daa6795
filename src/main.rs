use std::cell::RefCell;
use std::io;
use std::io::prelude::*;
use std::rc::Rc;
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use docopt::Docopt;
use dfs_mazes::{
    generators::{GenerationReport, MazeGenerator},
    grid::Grid,
    maze::Maze,
    renderers,
    units::{ColumnsCount, RowsCount},
};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_derive::Deserialize;

const USAGE: &str = "DFS Mazes

Watch a perfect maze being carved by a randomized depth-first search.

Usage:
    dfs_mazes_driver -h | --help
    dfs_mazes_driver [--rows=<n>] [--columns=<n>] [--delay=<ms>] [--seed=<n>] [--no-animation]

Options:
    -h --help          Show this screen.
    --rows=<n>         Number of rows in the maze [default: 20].
    --columns=<n>      Number of columns in the maze [default: 20].
    --delay=<ms>       Milliseconds to pause after each newly discovered cell [default: 10].
    --seed=<n>         Seed the random number generator to get a reproducible maze.
    --no-animation     Skip the animation and only print the finished maze.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_rows: usize,
    flag_columns: usize,
    flag_delay: u64,
    flag_seed: Option<u64>,
    flag_no_animation: bool,
}

mod errors {
    #![allow(deprecated)]
    use error_chain::*;
    error_chain! {
        links {
            Maze(::dfs_mazes::errors::Error, ::dfs_mazes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let grid = Grid::new(RowsCount(args.flag_rows), ColumnsCount(args.flag_columns))
        .chain_err(|| "Cannot build a maze of the requested size")?;
    let maze = Rc::new(RefCell::new(Maze::new(&grid)));
    let step_delay = if args.flag_no_animation {
        Duration::from_secs(0)
    } else {
        Duration::from_millis(args.flag_delay)
    };

    let report = match args.flag_seed {
        Some(seed) => {
            info!("seeding maze generation with {}", seed);
            let generator = MazeGenerator::with_rng(grid, StdRng::seed_from_u64(seed))
                .with_step_delay(step_delay);
            animate(generator, &maze, !args.flag_no_animation)?
        }
        None => {
            let generator = MazeGenerator::new(grid).with_step_delay(step_delay);
            animate(generator, &maze, !args.flag_no_animation)?
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if !args.flag_no_animation {
        out.queue(MoveTo(0, 0))?;
    }
    write!(out, "{}", maze.borrow())?;
    writeln!(out, "{}", report)?;

    Ok(())
}

fn animate<R: Rng>(mut generator: MazeGenerator<Grid, R>,
                   maze: &Rc<RefCell<Maze>>,
                   redraw: bool)
                   -> Result<GenerationReport> {
    renderers::attach_maze(&mut generator, maze);
    if redraw {
        io::stdout().queue(Clear(ClearType::All))?.flush()?;
        renderers::attach_terminal_redraw(&mut generator, maze, io::stdout());
    }
    Ok(generator.run())
}
