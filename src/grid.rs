use crate::algorithms::SearchOutcome;
use crate::error::{Endpoint, Error, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }
}

/// Terrain kind of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terrain {
    Empty,
    Road,
    Grass,
    Water,
    Obstacle,
    Start,
    Goal,
}

impl Terrain {
    /// Cost of stepping onto a cell of this kind, `None` for obstacles.
    pub fn cost(self) -> Option<u32> {
        match self {
            Terrain::Road => Some(1),
            Terrain::Empty => Some(2),
            Terrain::Grass => Some(3),
            Terrain::Water => Some(5),
            Terrain::Start | Terrain::Goal => Some(1),
            Terrain::Obstacle => None,
        }
    }

    pub fn is_obstacle(self) -> bool {
        self == Terrain::Obstacle
    }

    fn symbol(self) -> char {
        match self {
            Terrain::Empty => '.',
            Terrain::Road => 'r',
            Terrain::Grass => 'g',
            Terrain::Water => 'w',
            Terrain::Obstacle => '#',
            Terrain::Start => 'S',
            Terrain::Goal => 'G',
        }
    }
}

/// Per-run search state shown to the presentation layer.
///
/// Strategies never read these fields; they are written back after a run
/// by [`Grid::annotate`] and cleared by [`Grid::reset_annotations`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Annotation {
    pub g_score: Option<u32>,
    pub f_score: Option<u32>,
    pub parent: Option<Position>,
    pub explored: bool,
    pub on_path: bool,
}

impl Annotation {
    pub fn is_clear(&self) -> bool {
        *self == Annotation::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub position: Position,
    pub terrain: Terrain,
    pub annotation: Annotation,
}

impl Cell {
    pub fn cost(&self) -> Option<u32> {
        self.terrain.cost()
    }

    pub fn is_obstacle(&self) -> bool {
        self.terrain.is_obstacle()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Waypoint {
    pub position: Position,
    pub time: u32,
}

/// A moving obstacle with a time-indexed schedule. Carried as map data only,
/// the static strategies do not consult it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicObstacle {
    pub id: String,
    pub position: Position,
    pub schedule: Vec<Waypoint>,
}

#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    start: Position,
    goal: Position,
    dynamic_obstacles: Vec<DynamicObstacle>,
}

impl Grid {
    /// Creates a `width` x `height` grid of empty cells with the start in the
    /// top-left corner and the goal in the bottom-right one.
    pub fn new(width: usize, height: usize) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell {
                    position: Position { x, y },
                    terrain: Terrain::Empty,
                    annotation: Annotation::default(),
                });
            }
        }

        Grid {
            width,
            height,
            cells,
            start: Position::new(0, 0),
            goal: Position::new(width.saturating_sub(1), height.saturating_sub(1)),
            dynamic_obstacles: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    pub fn set_start(&mut self, pos: Position) {
        self.start = pos;
    }

    pub fn set_goal(&mut self, pos: Position) {
        self.goal = pos;
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn dynamic_obstacles(&self) -> &[DynamicObstacle] {
        &self.dynamic_obstacles
    }

    pub fn add_dynamic_obstacle(&mut self, obstacle: DynamicObstacle) {
        self.dynamic_obstacles.push(obstacle);
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos).then(|| pos.y * self.width + pos.x)
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    pub fn terrain(&self, pos: Position) -> Option<Terrain> {
        self.cell(pos).map(|c| c.terrain)
    }

    /// Step cost onto `pos`, `None` when out of bounds or blocked.
    pub fn cost(&self, pos: Position) -> Option<u32> {
        self.cell(pos).and_then(Cell::cost)
    }

    pub fn is_traversable(&self, pos: Position) -> bool {
        self.cost(pos).is_some()
    }

    /// Paints `pos` with `terrain`. Out-of-bounds positions are ignored.
    pub fn set_terrain(&mut self, pos: Position, terrain: Terrain) {
        if let Some(i) = self.index(pos) {
            self.cells[i].terrain = terrain;
        }
    }

    /// Orthogonal neighbors of `pos` inside the grid, in up, right, down,
    /// left order. Obstacles are not filtered out.
    pub fn neighbors(&self, pos: &Position) -> Vec<Position> {
        let mut neighbors = Vec::with_capacity(4);
        let (x, y) = (pos.x as i64, pos.y as i64);

        for (dx, dy) in &[(0, -1), (1, 0), (0, 1), (-1, 0)] {
            let nx = x + dx;
            let ny = y + dy;

            if nx >= 0 && nx < self.width as i64 && ny >= 0 && ny < self.height as i64 {
                neighbors.push(Position {
                    x: nx as usize,
                    y: ny as usize,
                });
            }
        }
        neighbors
    }

    /// Checks that start and goal are in bounds and not on obstacles.
    pub fn validate(&self) -> Result<()> {
        for (endpoint, position) in [(Endpoint::Start, self.start), (Endpoint::Goal, self.goal)] {
            match self.terrain(position) {
                None => {
                    return Err(Error::OutOfBounds {
                        endpoint,
                        position,
                        width: self.width,
                        height: self.height,
                    })
                }
                Some(Terrain::Obstacle) => {
                    return Err(Error::BlockedEndpoint { endpoint, position })
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Clears the per-run annotation of every cell.
    pub fn reset_annotations(&mut self) {
        for cell in &mut self.cells {
            cell.annotation = Annotation::default();
        }
    }

    pub fn has_annotations(&self) -> bool {
        self.cells.iter().any(|c| !c.annotation.is_clear())
    }

    /// Copies the scores, predecessors and flags of a finished run onto the
    /// cells. Existing annotations are overwritten only where the run has data.
    pub fn annotate(&mut self, outcome: &SearchOutcome) {
        let trace = &outcome.trace;

        for (&pos, &g) in &trace.g_scores {
            if let Some(i) = self.index(pos) {
                self.cells[i].annotation.g_score = Some(g);
            }
        }
        for (&pos, &f) in &trace.f_scores {
            if let Some(i) = self.index(pos) {
                self.cells[i].annotation.f_score = Some(f);
            }
        }
        for (&pos, &parent) in &trace.predecessors {
            if let Some(i) = self.index(pos) {
                self.cells[i].annotation.parent = Some(parent);
            }
        }
        for &pos in &trace.explored {
            if let Some(i) = self.index(pos) {
                self.cells[i].annotation.explored = true;
            }
        }
        for &pos in &outcome.result.path {
            if let Some(i) = self.index(pos) {
                self.cells[i].annotation.on_path = true;
            }
        }
    }
}

/// Parses a text map, one row per line.
///
/// `.` empty, `#` obstacle, `r` road, `g` grass, `w` water. `S` and `G` mark
/// the start and goal on empty terrain; both must appear exactly once.
impl FromStr for Grid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let rows: Vec<(usize, &str)> = s
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .collect();

        let Some(&(first_line, first_row)) = rows.first() else {
            return Err(Error::MapParse {
                line: 1,
                column: 1,
                message: "map is empty".to_string(),
            });
        };

        let width = first_row.chars().count();
        let mut grid = Grid::new(width, rows.len());
        let mut start = None;
        let mut goal = None;

        for (y, &(line, row)) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(Error::MapParse {
                    line,
                    column: 1,
                    message: format!(
                        "row has {} cells, line {} has {}",
                        row.chars().count(),
                        first_line,
                        width
                    ),
                });
            }

            for (x, ch) in row.chars().enumerate() {
                let pos = Position { x, y };
                let terrain = match ch {
                    '.' => Terrain::Empty,
                    '#' => Terrain::Obstacle,
                    'r' => Terrain::Road,
                    'g' => Terrain::Grass,
                    'w' => Terrain::Water,
                    'S' | 'G' => {
                        let slot = if ch == 'S' { &mut start } else { &mut goal };
                        if slot.replace(pos).is_some() {
                            return Err(Error::MapParse {
                                line,
                                column: x + 1,
                                message: format!("second '{}' marker", ch),
                            });
                        }
                        Terrain::Empty
                    }
                    other => {
                        return Err(Error::MapParse {
                            line,
                            column: x + 1,
                            message: format!("unknown cell symbol '{}'", other),
                        })
                    }
                };
                grid.set_terrain(pos, terrain);
            }
        }

        let missing = |what: &str| Error::MapParse {
            line: first_line,
            column: 1,
            message: format!("map has no {} marker", what),
        };
        grid.start = start.ok_or_else(|| missing("'S'"))?;
        grid.goal = goal.ok_or_else(|| missing("'G'"))?;
        Ok(grid)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Legend: S=Start, G=Goal, *=Path, +=Explored, #=Obstacle, .=Empty, r=Road, g=Grass, w=Water"
        )?;

        write!(f, "   ")?;
        for x in 0..self.width {
            write!(f, "{:2}", x % 10)?;
        }
        writeln!(f)?;

        for y in 0..self.height {
            write!(f, "{:2} ", y)?;
            for x in 0..self.width {
                let cell = &self.cells[y * self.width + x];
                let symbol = if cell.position == self.start {
                    'S'
                } else if cell.position == self.goal {
                    'G'
                } else if cell.annotation.on_path {
                    '*'
                } else if cell.annotation.explored {
                    '+'
                } else {
                    cell.terrain.symbol()
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Clears the per-run annotations of every cell of `grid`.
pub fn reset_annotations(grid: &mut Grid) {
    grid.reset_annotations();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_follow_up_right_down_left_order() {
        let grid = Grid::new(3, 3);
        let n = grid.neighbors(&Position::new(1, 1));
        assert_eq!(
            n,
            vec![
                Position::new(1, 0),
                Position::new(2, 1),
                Position::new(1, 2),
                Position::new(0, 1),
            ]
        );
    }

    #[test]
    fn neighbors_are_clipped_at_corners_but_keep_obstacles() {
        let mut grid = Grid::new(3, 3);
        grid.set_terrain(Position::new(1, 0), Terrain::Obstacle);
        let n = grid.neighbors(&Position::new(0, 0));
        assert_eq!(n, vec![Position::new(1, 0), Position::new(0, 1)]);
    }

    #[test]
    fn parse_reads_terrain_and_markers() {
        let grid: Grid = "S.r\n#gw\n..G".parse().unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.start(), Position::new(0, 0));
        assert_eq!(grid.goal(), Position::new(2, 2));
        assert_eq!(grid.terrain(Position::new(0, 0)), Some(Terrain::Empty));
        assert_eq!(grid.cost(Position::new(2, 0)), Some(1));
        assert_eq!(grid.cost(Position::new(0, 1)), None);
        assert_eq!(grid.cost(Position::new(2, 1)), Some(5));
    }

    #[test]
    fn parse_rejects_ragged_rows_and_unknown_symbols() {
        let ragged = "S..\n..\n..G".parse::<Grid>();
        assert!(matches!(ragged, Err(Error::MapParse { line: 2, .. })));

        let unknown = "S.x\n..G".parse::<Grid>();
        assert!(matches!(unknown, Err(Error::MapParse { line: 1, column: 3, .. })));

        let no_goal = "S..".parse::<Grid>();
        assert!(matches!(no_goal, Err(Error::MapParse { .. })));
    }

    #[test]
    fn validate_rejects_bad_endpoints() {
        let mut grid = Grid::new(3, 3);
        assert!(grid.validate().is_ok());

        grid.set_goal(Position::new(3, 0));
        assert!(matches!(
            grid.validate(),
            Err(Error::OutOfBounds { endpoint: Endpoint::Goal, .. })
        ));

        grid.set_goal(Position::new(2, 2));
        grid.set_terrain(Position::new(0, 0), Terrain::Obstacle);
        assert!(matches!(
            grid.validate(),
            Err(Error::BlockedEndpoint { endpoint: Endpoint::Start, .. })
        ));
    }

    #[test]
    fn reset_clears_every_annotation() {
        let mut grid = Grid::new(2, 2);
        grid.cells[0].annotation = Annotation {
            g_score: Some(3),
            f_score: Some(4),
            parent: Some(Position::new(1, 0)),
            explored: true,
            on_path: true,
        };
        grid.cells[3].annotation.explored = true;
        assert!(grid.has_annotations());

        reset_annotations(&mut grid);
        assert!(!grid.has_annotations());
        assert!(grid.cells().iter().all(|c| c.annotation.is_clear()));
    }

    #[test]
    fn display_marks_endpoints_and_obstacles() {
        let grid: Grid = "S#\n.G".parse().unwrap();
        let text = grid.to_string();
        assert!(text.contains(" 0 S # "));
        assert!(text.contains(" 1 . G "));
    }
}
