//! Randomized depth-first search maze generation, reported as a stream of `MazeEvent`s.

use std::collections::VecDeque;
use std::fmt;
use std::thread;
use std::time::Duration;

use fnv::FnvHashSet;
use log::{info, trace};
use rand::rngs::ThreadRng;
use rand::Rng;

use crate::coordinates::{shuffled_directions, Position};
use crate::events::{EventKind, EventListeners, MazeEvent};
use crate::grid::GridBounds;

/// Every traversal begins in the top left cell.
pub const START: Position = Position { row: 0, col: 0 };

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
struct StackEntry {
    current: Position,
    origin: Position,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
enum Stage {
    Pop,
    Discover(StackEntry),
    Expand(Position),
    Reveal(Position),
    Finished,
}

/// The randomized DFS as a lazy sequence of events.
///
/// Each call to `next` advances the walk by at most one stage. In particular a cell announced by
/// `Discover` is only marked visited, and its neighbours only shuffled and queued, on the following
/// call, so a caller may pause for as long as it likes between the discovery and the expansion.
///
/// A cell can be on the stack more than once. Only the first pop that finds it unvisited discovers
/// it; any later pop of the same cell just produces `Enter` followed by `Reveal`.
pub struct Traversal<'a, G: GridBounds + ?Sized, R: Rng + ?Sized> {
    grid: &'a G,
    rng: &'a mut R,
    visited: FnvHashSet<Position>,
    stack: Vec<StackEntry>,
    pending_pushes: VecDeque<Position>,
    stage: Stage,
}

impl<'a, G: GridBounds + ?Sized, R: Rng + ?Sized> Traversal<'a, G, R> {
    pub fn new(grid: &'a G, rng: &'a mut R) -> Traversal<'a, G, R> {
        Traversal {
            grid,
            rng,
            visited: FnvHashSet::default(),
            stack: vec![StackEntry { current: START, origin: START }],
            pending_pushes: VecDeque::with_capacity(4),
            stage: Stage::Pop,
        }
    }

    #[inline]
    pub fn is_visited(&self, pos: Position) -> bool {
        self.visited.contains(&pos)
    }

    #[inline]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Entries still waiting on the stack, stale ones included.
    #[inline]
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_finished(&self) -> bool {
        self.stage == Stage::Finished
    }

    fn expand(&mut self, current: Position) {
        let newly_visited = self.visited.insert(current);
        debug_assert!(newly_visited, "cell {} expanded twice", current);

        for dir in shuffled_directions(&mut *self.rng).iter() {
            let neighbour = current.offset(*dir);
            if self.grid.contains(neighbour) && !self.visited.contains(&neighbour) {
                trace!("queue {} from {}", neighbour, current);
                self.stack.push(StackEntry { current: neighbour, origin: current });
                self.pending_pushes.push_back(neighbour);
            }
        }
    }
}

impl<'a, G: GridBounds + ?Sized, R: Rng + ?Sized> Iterator for Traversal<'a, G, R> {
    type Item = MazeEvent;

    fn next(&mut self) -> Option<MazeEvent> {
        loop {
            if let Some(queued) = self.pending_pushes.pop_front() {
                return Some(MazeEvent::Push(queued));
            }

            match self.stage {
                Stage::Pop => {
                    let entry = match self.stack.pop() {
                        Some(entry) => entry,
                        None => {
                            self.stage = Stage::Finished;
                            return None;
                        }
                    };
                    self.stage = if self.visited.contains(&entry.current) {
                        Stage::Reveal(entry.current)
                    } else {
                        Stage::Discover(entry)
                    };
                    return Some(MazeEvent::Enter(entry.current));
                }
                Stage::Discover(entry) => {
                    self.stage = Stage::Expand(entry.current);
                    return Some(MazeEvent::Discover {
                        from: entry.origin,
                        to: entry.current,
                    });
                }
                Stage::Expand(current) => {
                    self.expand(current);
                    self.stage = Stage::Reveal(current);
                }
                Stage::Reveal(current) => {
                    self.stage = Stage::Pop;
                    return Some(MazeEvent::Reveal(current));
                }
                Stage::Finished => return None,
            }
        }
    }
}

impl<'a, G: GridBounds + ?Sized, R: Rng + ?Sized> fmt::Debug for Traversal<'a, G, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Traversal :: stage: {:?}, stack depth: {}, visited: {}",
               self.stage, self.stack.len(), self.visited.len())
    }
}

/// Tally of the events delivered during one run.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct GenerationReport {
    pub enters: usize,
    pub discoveries: usize,
    pub pushes: usize,
    pub reveals: usize,
}

impl GenerationReport {
    fn record(&mut self, event: &MazeEvent) {
        match event.kind() {
            EventKind::Enter => self.enters += 1,
            EventKind::Discover => self.discoveries += 1,
            EventKind::Push => self.pushes += 1,
            EventKind::Reveal => self.reveals += 1,
        }
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} cells discovered, {} stack pops, {} pushes",
               self.discoveries, self.enters, self.pushes)
    }
}

/// Drives a randomized DFS over a grid and tells its listeners about every step.
///
/// Listeners are called synchronously in subscription order. After the listeners of a `Discover`
/// event have run the generator sleeps for the step delay, giving a renderer time to show the
/// change before the walk moves on. The delay starts at zero, which runs straight to completion.
pub struct MazeGenerator<G: GridBounds, R: Rng = ThreadRng> {
    grid: G,
    step_delay: Duration,
    rng: R,
    listeners: EventListeners,
}

impl<G: GridBounds> MazeGenerator<G, ThreadRng> {
    pub fn new(grid: G) -> MazeGenerator<G, ThreadRng> {
        MazeGenerator::with_rng(grid, rand::thread_rng())
    }
}

impl<G: GridBounds, R: Rng> MazeGenerator<G, R> {
    /// Use a caller supplied source of randomness, e.g. a seeded rng for a reproducible maze.
    pub fn with_rng(grid: G, rng: R) -> MazeGenerator<G, R> {
        MazeGenerator {
            grid,
            step_delay: Duration::from_secs(0),
            rng,
            listeners: EventListeners::new(),
        }
    }

    /// Pause for `step_delay` after every discovery when the generator runs.
    pub fn with_step_delay(mut self, step_delay: Duration) -> MazeGenerator<G, R> {
        self.step_delay = step_delay;
        self
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F)
        where F: FnMut(&MazeEvent) + 'static
    {
        self.listeners.subscribe(kind, handler);
    }

    #[inline]
    pub fn grid(&self) -> &G {
        &self.grid
    }

    #[inline]
    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    pub fn set_step_delay(&mut self, step_delay: Duration) {
        self.step_delay = step_delay;
    }

    pub fn listeners(&self) -> &EventListeners {
        &self.listeners
    }

    /// A fresh walk over the grid that the caller steps through itself. Listeners are not called.
    pub fn traversal(&mut self) -> Traversal<'_, G, R> {
        Traversal::new(&self.grid, &mut self.rng)
    }

    /// Generate one maze, blocking the calling thread until every reachable cell is visited.
    pub fn run(&mut self) -> GenerationReport {
        info!("starting maze generation, step delay {:?}", self.step_delay);

        let step_delay = self.step_delay;
        let pause_after_discovery = step_delay > Duration::from_secs(0);
        let listeners = &mut self.listeners;
        let mut report = GenerationReport::default();

        for event in Traversal::new(&self.grid, &mut self.rng) {
            listeners.emit(&event);
            report.record(&event);

            if pause_after_discovery && event.kind() == EventKind::Discover {
                thread::sleep(step_delay);
            }
        }

        info!("maze generation finished: {}", report);
        report
    }
}

impl<G: GridBounds + fmt::Debug, R: Rng> fmt::Debug for MazeGenerator<G, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MazeGenerator :: grid: {:?}, step delay: {:?}, listeners: {:?}",
               self.grid, self.step_delay, self.listeners)
    }
}
