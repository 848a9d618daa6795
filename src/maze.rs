use std::fmt;

use itertools::Itertools;
use petgraph::graph::{self, NodeIndex};
use petgraph::{Graph, Undirected};
use smallvec::SmallVec;

use crate::coordinates::{Direction, Position};
use crate::grid::{Grid, GridBounds, PositionSmallVec};
use crate::units::{ColumnsCount, EdgesCount, NodesCount, RowsCount};

/// How far the traversal has got with a cell, as far as the picture is concerned.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellShade {
    Unvisited,
    Frontier,
    Current,
    Finished,
}

impl CellShade {
    /// Three glyphs wide, to fit between two vertical walls.
    pub fn body(self) -> &'static str {
        match self {
            CellShade::Unvisited => "░░░",
            CellShade::Frontier => " + ",
            CellShade::Current => " @ ",
            CellShade::Finished => "   ",
        }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    SelfLink,
    NotAdjacent,
}

/// Node index width of the passage graph. Wide enough for every cell of any grid `Grid::new`
/// accepts.
type PassageIx = usize;

/// The picture being drawn: which walls have been knocked through and how each cell is shaded.
///
/// Every cell starts boxed in by four walls. Passages are the edges of an undirected graph with
/// one node per cell, so the number of open walls is just the edge count.
pub struct Maze {
    grid: Grid,
    passages: Graph<(), (), Undirected, PassageIx>,
    shades: Vec<CellShade>,
}

impl fmt::Debug for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Maze :: {:?}, passages: {}", self.grid, self.passages.edge_count())
    }
}

impl Maze {
    pub fn new(grid: &Grid) -> Maze {
        let NodesCount(cells) = grid.size();
        let mut passages = Graph::with_capacity(cells, cells.saturating_sub(1));
        for _ in 0..cells {
            let _ = passages.add_node(());
        }

        Maze {
            grid: *grid,
            passages,
            shades: vec![CellShade::Unvisited; cells],
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.grid.rows()
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.grid.columns()
    }

    #[inline]
    pub fn links_count(&self) -> EdgesCount {
        EdgesCount(self.passages.edge_count())
    }

    /// Knock down the wall between two adjacent cells. Linking an already linked pair is a no-op.
    pub fn link(&mut self, a: Position, b: Position) -> Result<(), CellLinkError> {
        if a == b {
            return Err(CellLinkError::SelfLink);
        }
        match (self.node_index(a), self.node_index(b)) {
            (Some(a_index), Some(b_index)) => {
                if a.direction_to(b).is_none() {
                    return Err(CellLinkError::NotAdjacent);
                }
                let _ = self.passages.update_edge(a_index, b_index, ());
                Ok(())
            }
            _ => Err(CellLinkError::InvalidGridCoordinate),
        }
    }

    pub fn is_linked(&self, a: Position, b: Position) -> bool {
        match (self.node_index(a), self.node_index(b)) {
            (Some(a_index), Some(b_index)) => self.passages.find_edge(a_index, b_index).is_some(),
            _ => false,
        }
    }

    pub fn is_neighbour_linked(&self, pos: Position, direction: Direction) -> bool {
        self.is_linked(pos, pos.offset(direction))
    }

    /// Cells reachable from `pos` through an open wall, None if `pos` is off the grid.
    pub fn links(&self, pos: Position) -> Option<PositionSmallVec> {
        let node = self.node_index(pos)?;
        let linked = self.passages
            .neighbors(node)
            .filter_map(|neighbour| self.grid.position_at(neighbour.index()))
            .collect::<SmallVec<_>>();
        Some(linked)
    }

    pub fn shade(&self, pos: Position) -> Option<CellShade> {
        self.grid.index_of(pos).map(|index| self.shades[index])
    }

    /// Returns false, changing nothing, when `pos` is off the grid.
    pub fn set_shade(&mut self, pos: Position, shade: CellShade) -> bool {
        match self.grid.index_of(pos) {
            Some(index) => {
                self.shades[index] = shade;
                true
            }
            None => false,
        }
    }

    #[inline]
    fn node_index(&self, pos: Position) -> Option<NodeIndex<PassageIx>> {
        self.grid.index_of(pos).map(graph::NodeIndex::new)
    }

    fn has_wall(&self, pos: Position, direction: Direction) -> bool {
        !self.is_neighbour_linked(pos, direction)
    }
}

impl GridBounds for Maze {
    #[inline]
    fn contains(&self, pos: Position) -> bool {
        self.grid.contains(pos)
    }
}

/// Box drawing glyph for a wall junction given which of its four arms are present.
fn junction(left: bool, right: bool, up: bool, down: bool) -> &'static str {
    match (left, right, up, down) {
        (true, true, true, true) => "┼",
        (true, true, true, false) => "┴",
        (true, true, false, true) => "┬",
        (true, false, true, true) => "┤",
        (false, true, true, true) => "├",
        (true, true, false, false) => "─",
        (false, false, true, true) => "│",
        (false, true, true, false) => "└",
        (true, false, false, true) => "┐",
        (true, false, true, false) => "┘",
        (false, true, false, true) => "┌",
        (true, false, false, false) => "╴",
        (false, true, false, false) => "╶",
        (false, false, true, false) => "╵",
        (false, false, false, true) => "╷",
        (false, false, false, false) => " ",
    }
}

impl fmt::Display for Maze {
    /// Draws (rows + 1) junction lines interleaved with rows of cell bodies. A junction sits at the
    /// top left corner of cell (r, c); each of its arms is present when the wall segment running
    /// that way from the corner is still standing.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const WALL_LR_3: &str = "───";
        const OPEN_LR_3: &str = "   ";
        const WALL_UD: &str = "│";
        const OPEN_UD: &str = " ";

        let RowsCount(rows) = self.rows();
        let ColumnsCount(columns) = self.columns();
        let (rows, columns) = (rows as isize, columns as isize);

        // Horizontal wall segment along the top of cell (r, c). The outer boundary always stands.
        let horizontal = |r: isize, c: isize| -> bool {
            if c < 0 || c >= columns {
                false
            } else if r == 0 || r == rows {
                true
            } else {
                self.has_wall(Position::new(r, c), Direction::Up)
            }
        };
        // Vertical wall segment along the left of cell (r, c).
        let vertical = |r: isize, c: isize| -> bool {
            if r < 0 || r >= rows {
                false
            } else if c == 0 || c == columns {
                true
            } else {
                self.has_wall(Position::new(r, c), Direction::Left)
            }
        };

        let mut output = String::new();
        for r in 0..=rows {
            let junction_line = (0..=columns)
                .map(|c| {
                    let corner = junction(horizontal(r, c - 1),
                                          horizontal(r, c),
                                          vertical(r - 1, c),
                                          vertical(r, c));
                    if c < columns {
                        let span = if horizontal(r, c) { WALL_LR_3 } else { OPEN_LR_3 };
                        format!("{}{}", corner, span)
                    } else {
                        corner.to_owned()
                    }
                })
                .join("");
            output.push_str(&junction_line);
            output.push('\n');

            if r < rows {
                let body_line = (0..=columns)
                    .map(|c| {
                        let side = if vertical(r, c) { WALL_UD } else { OPEN_UD };
                        if c < columns {
                            let shade = self.shade(Position::new(r, c))
                                .unwrap_or(CellShade::Unvisited);
                            format!("{}{}", side, shade.body())
                        } else {
                            side.to_owned()
                        }
                    })
                    .join("");
                output.push_str(&body_line);
                output.push('\n');
            }
        }

        write!(f, "{}", output)
    }
}
