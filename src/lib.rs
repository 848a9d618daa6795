//! **dfs-mazes** generates perfect mazes by randomized depth-first search and reports every step
//! of the walk as an event, so a renderer can animate the maze being carved.

pub mod coordinates;
pub mod errors;
pub mod events;
pub mod generators;
pub mod grid;
pub mod maze;
pub mod renderers;
pub mod units;
