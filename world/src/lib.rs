#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative board state management for Robot Derby.
//!
//! The world owns the board and every robot on it. Adapters mutate it only
//! through [`apply`], which executes one [`Command`] and reports the outcome
//! as [`Event`] values, and observe it only through the read-only [`query`]
//! functions.

use std::collections::TryReserveError;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use robot_derby_core::{
    ActionError, BoardSize, CellCoord, Command, Event, Heading, PlacementError, WELCOME_BANNER,
};
use thiserror::Error;

/// Board dimensions used when no explicit size is requested.
pub const DEFAULT_BOARD_SIZE: BoardSize = BoardSize::new(10, 10);

/// Error raised when memory for the board cannot be obtained.
///
/// Callers are expected to propagate this and end the session rather than
/// continue without a board.
#[derive(Debug, Error)]
#[error("failed to allocate a {columns}x{rows} board")]
pub struct AllocationError {
    columns: u32,
    rows: u32,
    #[source]
    source: TryReserveError,
}

/// Represents the authoritative Robot Derby world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    board: Board,
    seed: u64,
    alive_robots: u32,
    action_count: u32,
}

impl World {
    /// Creates a world with the default board, every square empty.
    pub fn new() -> Result<Self, AllocationError> {
        Self::with_size(DEFAULT_BOARD_SIZE)
    }

    /// Creates a world with a board of the requested dimensions, every
    /// square empty.
    pub fn with_size(size: BoardSize) -> Result<Self, AllocationError> {
        Ok(Self {
            banner: WELCOME_BANNER,
            board: Board::allocate(size)?,
            seed: 0,
            alive_robots: 0,
            action_count: 0,
        })
    }

    fn place_robots(&mut self, seed: u64, robots: u32, out_events: &mut Vec<Event>) {
        self.seed = seed;
        self.action_count = 0;

        // One square always stays free so the resample loop terminates.
        let capacity = self.board.size().cell_count().saturating_sub(1);
        let target = u64::from(robots).min(capacity);
        let placed = u32::try_from(target).unwrap_or(robots);

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut remaining = target;
        while remaining > 0 {
            let column = rng.gen_range(0..self.board.size().columns());
            let row = rng.gen_range(0..self.board.size().rows());
            let heading = Heading::ALL[rng.gen_range(0..Heading::ALL.len())];
            let cell = CellCoord::new(column, row);
            if self.board.try_spawn(cell, heading).is_ok() {
                remaining -= 1;
                out_events.push(Event::RobotPlaced { cell, heading });
            }
        }

        self.alive_robots = placed;
        out_events.push(Event::RoundStarted {
            seed,
            robots: placed,
        });
    }

    /// Validates the action coordinate and charges the action counter.
    fn charge_action(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) -> bool {
        if !self.board.size().contains(cell) {
            out_events.push(Event::ActionRejected {
                cell,
                reason: ActionError::OutOfBounds,
            });
            return false;
        }
        self.action_count = self.action_count.saturating_add(1);
        true
    }

    fn advance_robot(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        let Some(robot) = self.board.occupant(cell) else {
            return;
        };
        if !robot.alive {
            return;
        }
        let Some(destination) = neighbor(self.board.size(), cell, robot.heading) else {
            // Wall bump: the robot stays put.
            return;
        };

        match self.board.occupant(destination) {
            Some(obstacle) if obstacle.alive => {
                self.board.wreck(cell);
                self.board.wreck(destination);
                self.alive_robots = self.alive_robots.saturating_sub(2);
                out_events.push(Event::RobotsCrashed {
                    mover: cell,
                    struck: destination,
                });
            }
            Some(_) => {
                // Wreckage is never dislodged; only the mover is lost.
                self.board.wreck(cell);
                self.alive_robots = self.alive_robots.saturating_sub(1);
                out_events.push(Event::RobotHitWreck {
                    mover: cell,
                    wreck: destination,
                });
            }
            None => {
                self.board.relocate(cell, destination);
                out_events.push(Event::RobotAdvanced {
                    from: cell,
                    to: destination,
                });
            }
        }

        if self.alive_robots == 0 {
            out_events.push(Event::RoundWon {
                actions: self.action_count,
            });
        }
    }

    fn turn_robot(&mut self, cell: CellCoord, rotation: Rotation, out_events: &mut Vec<Event>) {
        // Wreckage may still be rotated; an empty square has nothing to turn.
        if let Some(robot) = self.board.occupant_mut(cell) {
            robot.heading = match rotation {
                Rotation::Left => robot.heading.rotated_left(),
                Rotation::Right => robot.heading.rotated_right(),
            };
            out_events.push(Event::RobotTurned {
                cell,
                heading: robot.heading,
            });
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ClearRobots => {
            world.board.clear();
            world.alive_robots = 0;
            out_events.push(Event::BoardCleared);
        }
        Command::PlaceRobots { seed, robots } => {
            world.place_robots(seed, robots, out_events);
        }
        Command::SpawnRobot { cell, heading } => match world.board.try_spawn(cell, heading) {
            Ok(()) => {
                world.alive_robots = world.alive_robots.saturating_add(1);
                out_events.push(Event::RobotPlaced { cell, heading });
            }
            Err(reason) => {
                out_events.push(Event::PlacementRejected { cell, reason });
            }
        },
        Command::Advance { cell } => {
            if world.charge_action(cell, out_events) {
                world.advance_robot(cell, out_events);
            }
        }
        Command::TurnLeft { cell } => {
            if world.charge_action(cell, out_events) {
                world.turn_robot(cell, Rotation::Left, out_events);
            }
        }
        Command::TurnRight { cell } => {
            if world.charge_action(cell, out_events) {
                world.turn_robot(cell, Rotation::Right, out_events);
            }
        }
        Command::ForceRoundOver => {
            // Only the live counter is zeroed; the board keeps its robots.
            if world.alive_robots > 0 {
                world.alive_robots = 0;
                out_events.push(Event::RoundWon {
                    actions: world.action_count,
                });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{glyph, World};
    use robot_derby_core::{BoardSize, CellCoord, Heading, RoundPhase};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Dimensions of the board owned by the world.
    #[must_use]
    pub fn board_size(world: &World) -> BoardSize {
        world.board.size()
    }

    /// Seed that produced the current placement.
    #[must_use]
    pub fn seed(world: &World) -> u64 {
        world.seed
    }

    /// Number of actions charged since the round started.
    #[must_use]
    pub fn action_count(world: &World) -> u32 {
        world.action_count
    }

    /// Number of robots still alive; the round is won when this reaches zero.
    #[must_use]
    pub fn remaining_robots(world: &World) -> u32 {
        world.alive_robots
    }

    /// Macro-state of the current round, derived from the live-robot count.
    #[must_use]
    pub fn round_phase(world: &World) -> RoundPhase {
        if world.alive_robots > 0 {
            RoundPhase::Active
        } else {
            RoundPhase::RoundOver
        }
    }

    /// Reports whether the coordinate addresses a square on the board.
    #[must_use]
    pub fn is_in_bounds(world: &World, cell: CellCoord) -> bool {
        world.board.size().contains(cell)
    }

    /// Returns a snapshot of the occupant of the square, if any.
    #[must_use]
    pub fn occupant(world: &World, cell: CellCoord) -> Option<RobotSnapshot> {
        world.board.occupant(cell).map(|robot| RobotSnapshot {
            cell,
            heading: robot.heading,
            alive: robot.alive,
        })
    }

    /// Captures a read-only view of every occupant on the board.
    #[must_use]
    pub fn robot_view(world: &World) -> RobotView {
        let size = world.board.size();
        let mut snapshots = Vec::new();
        for row in 0..size.rows() {
            for column in 0..size.columns() {
                let cell = CellCoord::new(column, row);
                if let Some(snapshot) = occupant(world, cell) {
                    snapshots.push(snapshot);
                }
            }
        }
        RobotView { snapshots }
    }

    /// Produces the rendered board as a lazy iterator of rows, top to
    /// bottom: one glyph per column, restartable by calling again.
    #[must_use]
    pub fn render_rows(world: &World) -> RenderRows<'_> {
        RenderRows {
            world,
            next_row: 0,
        }
    }

    /// Immutable representation of a single occupant used for queries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct RobotSnapshot {
        /// Square the occupant sits on.
        pub cell: CellCoord,
        /// Heading the occupant faces.
        pub heading: Heading,
        /// Whether the occupant is still a live robot rather than wreckage.
        pub alive: bool,
    }

    /// Read-only snapshot describing all occupants in row-major order.
    #[derive(Clone, Debug, Default)]
    pub struct RobotView {
        snapshots: Vec<RobotSnapshot>,
    }

    impl RobotView {
        /// Iterator over the captured snapshots in deterministic order.
        pub fn iter(&self) -> impl Iterator<Item = &RobotSnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<RobotSnapshot> {
            self.snapshots
        }
    }

    /// Lazy, restartable iterator over the rendered rows of the board.
    #[derive(Clone, Copy, Debug)]
    pub struct RenderRows<'a> {
        world: &'a World,
        next_row: u32,
    }

    impl Iterator for RenderRows<'_> {
        type Item = String;

        fn next(&mut self) -> Option<String> {
            let size = self.world.board.size();
            if self.next_row >= size.rows() {
                return None;
            }
            let row = self.next_row;
            self.next_row += 1;
            Some(
                (0..size.columns())
                    .map(|column| {
                        glyph(self.world.board.occupant(CellCoord::new(column, row)))
                    })
                    .collect(),
            )
        }
    }
}

/// Token occupying a single board square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Robot {
    heading: Heading,
    alive: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Rotation {
    Left,
    Right,
}

#[derive(Debug)]
struct Board {
    size: BoardSize,
    squares: Vec<Option<Robot>>,
}

impl Board {
    fn allocate(size: BoardSize) -> Result<Self, AllocationError> {
        let capacity = usize::try_from(size.cell_count()).unwrap_or(usize::MAX);
        let mut squares: Vec<Option<Robot>> = Vec::new();
        squares
            .try_reserve_exact(capacity)
            .map_err(|source| AllocationError {
                columns: size.columns(),
                rows: size.rows(),
                source,
            })?;
        squares.resize(capacity, None);
        Ok(Self { size, squares })
    }

    fn size(&self) -> BoardSize {
        self.size
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.size.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.size.columns()).ok()?;
        Some(row * width + column)
    }

    fn occupant(&self, cell: CellCoord) -> Option<Robot> {
        self.index(cell)
            .and_then(|index| self.squares.get(index).copied().flatten())
    }

    fn occupant_mut(&mut self, cell: CellCoord) -> Option<&mut Robot> {
        let index = self.index(cell)?;
        self.squares.get_mut(index).and_then(|slot| slot.as_mut())
    }

    fn try_spawn(&mut self, cell: CellCoord, heading: Heading) -> Result<(), PlacementError> {
        let Some(index) = self.index(cell) else {
            return Err(PlacementError::OutOfBounds);
        };
        let Some(slot) = self.squares.get_mut(index) else {
            return Err(PlacementError::OutOfBounds);
        };
        if slot.is_some() {
            return Err(PlacementError::Occupied);
        }
        *slot = Some(Robot {
            heading,
            alive: true,
        });
        Ok(())
    }

    fn wreck(&mut self, cell: CellCoord) {
        if let Some(robot) = self.occupant_mut(cell) {
            robot.alive = false;
        }
    }

    fn relocate(&mut self, from: CellCoord, to: CellCoord) {
        let Some(source) = self.index(from) else {
            return;
        };
        let Some(robot) = self.squares.get_mut(source).and_then(|slot| slot.take()) else {
            return;
        };
        if let Some(destination) = self.index(to) {
            if let Some(slot) = self.squares.get_mut(destination) {
                *slot = Some(robot);
            }
        }
    }

    fn clear(&mut self) {
        self.squares.fill(None);
    }
}

fn neighbor(size: BoardSize, cell: CellCoord, heading: Heading) -> Option<CellCoord> {
    let (column, row) = (cell.column(), cell.row());
    let destination = match heading {
        Heading::West => CellCoord::new(column.checked_sub(1)?, row),
        Heading::North => CellCoord::new(column, row.checked_sub(1)?),
        Heading::East => CellCoord::new(column.checked_add(1)?, row),
        Heading::South => CellCoord::new(column, row.checked_add(1)?),
    };
    size.contains(destination).then_some(destination)
}

fn glyph(occupant: Option<Robot>) -> char {
    match occupant {
        None => robot_derby_core::EMPTY_GLYPH,
        Some(robot) if robot.alive => robot_derby_core::ROBOT_GLYPH,
        Some(_) => robot_derby_core::WRECK_GLYPH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use robot_derby_core::RoundPhase;
    use std::collections::HashSet;

    fn world_10x10() -> World {
        World::new().expect("allocate default board")
    }

    fn spawn(world: &mut World, column: u32, row: u32, heading: Heading) {
        let mut events = Vec::new();
        apply(
            world,
            Command::SpawnRobot {
                cell: CellCoord::new(column, row),
                heading,
            },
            &mut events,
        );
        assert!(
            matches!(events.as_slice(), [Event::RobotPlaced { .. }]),
            "spawn was rejected: {events:?}"
        );
    }

    fn assert_alive_count_matches_board(world: &World) {
        let on_board = query::robot_view(world)
            .iter()
            .filter(|snapshot| snapshot.alive)
            .count() as u32;
        assert_eq!(query::remaining_robots(world), on_board);
    }

    #[test]
    fn placement_is_deterministic_for_identical_seeds() {
        let mut first = world_10x10();
        let mut second = world_10x10();
        let mut first_events = Vec::new();
        let mut second_events = Vec::new();

        apply(
            &mut first,
            Command::PlaceRobots {
                seed: 7,
                robots: 10,
            },
            &mut first_events,
        );
        apply(
            &mut second,
            Command::PlaceRobots {
                seed: 7,
                robots: 10,
            },
            &mut second_events,
        );

        assert_eq!(first_events, second_events);
        assert_eq!(
            query::robot_view(&first).into_vec(),
            query::robot_view(&second).into_vec()
        );
    }

    #[test]
    fn placement_claims_distinct_free_squares() {
        let mut world = world_10x10();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::PlaceRobots {
                seed: 99,
                robots: 10,
            },
            &mut events,
        );

        let snapshots = query::robot_view(&world).into_vec();
        assert_eq!(snapshots.len(), 10);
        let distinct: HashSet<_> = snapshots.iter().map(|snapshot| snapshot.cell).collect();
        assert_eq!(distinct.len(), 10);
        for snapshot in &snapshots {
            assert!(snapshot.alive);
            assert!(query::is_in_bounds(&world, snapshot.cell));
        }
        assert_eq!(query::remaining_robots(&world), 10);
        assert_eq!(query::seed(&world), 99);
        assert_eq!(query::action_count(&world), 0);
        assert_alive_count_matches_board(&world);
    }

    #[test]
    fn placement_clamps_to_board_capacity() {
        let mut world = World::with_size(BoardSize::new(2, 2)).expect("allocate 2x2 board");
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::PlaceRobots {
                seed: 1,
                robots: 10,
            },
            &mut events,
        );

        assert_eq!(query::remaining_robots(&world), 3);
        assert_eq!(query::robot_view(&world).into_vec().len(), 3);
        assert!(matches!(
            events.last(),
            Some(Event::RoundStarted { robots: 3, .. })
        ));
    }

    #[test]
    fn clear_robots_empties_the_board() {
        let mut world = world_10x10();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::PlaceRobots {
                seed: 4,
                robots: 10,
            },
            &mut events,
        );
        events.clear();
        apply(&mut world, Command::ClearRobots, &mut events);

        assert_eq!(events, vec![Event::BoardCleared]);
        assert_eq!(query::remaining_robots(&world), 0);
        assert_eq!(query::round_phase(&world), RoundPhase::RoundOver);
        for row in query::render_rows(&world) {
            assert_eq!(row, ".".repeat(10));
        }
    }

    #[test]
    fn advance_moves_a_robot_into_a_free_square() {
        let mut world = world_10x10();
        spawn(&mut world, 5, 5, Heading::North);

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Advance {
                cell: CellCoord::new(5, 5),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::RobotAdvanced {
                from: CellCoord::new(5, 5),
                to: CellCoord::new(5, 4),
            }]
        );
        assert!(query::occupant(&world, CellCoord::new(5, 5)).is_none());
        let moved = query::occupant(&world, CellCoord::new(5, 4)).expect("robot moved north");
        assert_eq!(moved.heading, Heading::North);
        assert!(moved.alive);
        assert_eq!(query::remaining_robots(&world), 1);
        assert_eq!(query::action_count(&world), 1);
        assert_alive_count_matches_board(&world);
    }

    #[test]
    fn advance_into_the_wall_is_a_silent_bump() {
        let mut world = world_10x10();
        spawn(&mut world, 0, 3, Heading::West);

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Advance {
                cell: CellCoord::new(0, 3),
            },
            &mut events,
        );

        assert!(events.is_empty());
        let stuck = query::occupant(&world, CellCoord::new(0, 3)).expect("robot stayed put");
        assert!(stuck.alive);
        assert_eq!(query::action_count(&world), 1);
        assert_alive_count_matches_board(&world);
    }

    #[test]
    fn head_on_collision_wrecks_both_robots_in_place() {
        let mut world = world_10x10();
        spawn(&mut world, 3, 3, Heading::East);
        spawn(&mut world, 4, 3, Heading::West);

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Advance {
                cell: CellCoord::new(3, 3),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![
                Event::RobotsCrashed {
                    mover: CellCoord::new(3, 3),
                    struck: CellCoord::new(4, 3),
                },
                Event::RoundWon { actions: 1 },
            ]
        );
        let mover = query::occupant(&world, CellCoord::new(3, 3)).expect("mover stays visible");
        let struck = query::occupant(&world, CellCoord::new(4, 3)).expect("struck stays visible");
        assert!(!mover.alive);
        assert!(!struck.alive);
        assert_eq!(query::remaining_robots(&world), 0);
        assert_eq!(query::round_phase(&world), RoundPhase::RoundOver);
        assert_alive_count_matches_board(&world);

        // Wreckage no longer moves, even when commanded.
        events.clear();
        apply(
            &mut world,
            Command::Advance {
                cell: CellCoord::new(4, 3),
            },
            &mut events,
        );
        assert!(events.is_empty());
        assert!(query::occupant(&world, CellCoord::new(4, 3)).is_some());
    }

    #[test]
    fn crashing_into_wreckage_wrecks_only_the_mover() {
        let mut world = world_10x10();
        spawn(&mut world, 4, 3, Heading::North);
        spawn(&mut world, 4, 2, Heading::South);
        spawn(&mut world, 3, 3, Heading::East);

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Advance {
                cell: CellCoord::new(4, 3),
            },
            &mut events,
        );
        assert!(matches!(events.as_slice(), [Event::RobotsCrashed { .. }]));
        assert_eq!(query::remaining_robots(&world), 1);

        events.clear();
        apply(
            &mut world,
            Command::Advance {
                cell: CellCoord::new(3, 3),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![
                Event::RobotHitWreck {
                    mover: CellCoord::new(3, 3),
                    wreck: CellCoord::new(4, 3),
                },
                Event::RoundWon { actions: 2 },
            ]
        );
        let mover = query::occupant(&world, CellCoord::new(3, 3)).expect("mover wrecked in place");
        assert!(!mover.alive);
        let wreck = query::occupant(&world, CellCoord::new(4, 3)).expect("wreck not dislodged");
        assert!(!wreck.alive);
        assert_eq!(query::remaining_robots(&world), 0);
        assert_alive_count_matches_board(&world);
    }

    #[test]
    fn out_of_bounds_action_is_rejected_without_a_charge() {
        let mut world = world_10x10();
        spawn(&mut world, 5, 5, Heading::North);
        let before = query::robot_view(&world).into_vec();

        // Row index equal to the board height is one past the last valid row.
        let outside = CellCoord::new(5, 10);
        let mut events = Vec::new();
        apply(&mut world, Command::Advance { cell: outside }, &mut events);

        assert_eq!(
            events,
            vec![Event::ActionRejected {
                cell: outside,
                reason: ActionError::OutOfBounds,
            }]
        );
        assert_eq!(query::action_count(&world), 0);
        assert_eq!(query::robot_view(&world).into_vec(), before);
    }

    #[test]
    fn turning_cycles_the_heading() {
        let mut world = world_10x10();
        spawn(&mut world, 1, 1, Heading::West);
        let cell = CellCoord::new(1, 1);

        let mut events = Vec::new();
        apply(&mut world, Command::TurnRight { cell }, &mut events);
        assert_eq!(
            events,
            vec![Event::RobotTurned {
                cell,
                heading: Heading::North,
            }]
        );

        for _ in 0..3 {
            events.clear();
            apply(&mut world, Command::TurnRight { cell }, &mut events);
        }
        assert_eq!(
            query::occupant(&world, cell).expect("robot present").heading,
            Heading::West
        );

        events.clear();
        apply(&mut world, Command::TurnLeft { cell }, &mut events);
        assert_eq!(
            query::occupant(&world, cell).expect("robot present").heading,
            Heading::South
        );
        assert_eq!(query::action_count(&world), 5);
        assert_eq!(query::remaining_robots(&world), 1);
    }

    #[test]
    fn turning_wreckage_is_permitted() {
        let mut world = world_10x10();
        spawn(&mut world, 2, 2, Heading::East);
        spawn(&mut world, 3, 2, Heading::West);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Advance {
                cell: CellCoord::new(2, 2),
            },
            &mut events,
        );
        assert_eq!(query::remaining_robots(&world), 0);

        events.clear();
        apply(
            &mut world,
            Command::TurnRight {
                cell: CellCoord::new(2, 2),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::RobotTurned {
                cell: CellCoord::new(2, 2),
                heading: Heading::South,
            }]
        );
        let wreck = query::occupant(&world, CellCoord::new(2, 2)).expect("wreck present");
        assert!(!wreck.alive);
        assert_eq!(query::remaining_robots(&world), 0);
    }

    #[test]
    fn turning_an_empty_square_is_a_charged_no_op() {
        let mut world = world_10x10();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::TurnLeft {
                cell: CellCoord::new(6, 6),
            },
            &mut events,
        );

        assert!(events.is_empty());
        assert_eq!(query::action_count(&world), 1);
        assert!(query::occupant(&world, CellCoord::new(6, 6)).is_none());
    }

    #[test]
    fn spawn_rejects_occupied_and_out_of_bounds_squares() {
        let mut world = world_10x10();
        spawn(&mut world, 2, 2, Heading::North);

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnRobot {
                cell: CellCoord::new(2, 2),
                heading: Heading::South,
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::PlacementRejected {
                cell: CellCoord::new(2, 2),
                reason: PlacementError::Occupied,
            }]
        );

        events.clear();
        apply(
            &mut world,
            Command::SpawnRobot {
                cell: CellCoord::new(10, 0),
                heading: Heading::South,
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::PlacementRejected {
                cell: CellCoord::new(10, 0),
                reason: PlacementError::OutOfBounds,
            }]
        );
        assert_eq!(query::remaining_robots(&world), 1);
    }

    #[test]
    fn force_round_over_wins_without_touching_the_board() {
        let mut world = world_10x10();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::PlaceRobots {
                seed: 11,
                robots: 10,
            },
            &mut events,
        );
        assert_eq!(query::round_phase(&world), RoundPhase::Active);

        events.clear();
        apply(&mut world, Command::ForceRoundOver, &mut events);

        assert_eq!(events, vec![Event::RoundWon { actions: 0 }]);
        assert_eq!(query::remaining_robots(&world), 0);
        assert_eq!(query::round_phase(&world), RoundPhase::RoundOver);
        // The board itself is untouched; only the counter is zeroed.
        assert_eq!(query::robot_view(&world).into_vec().len(), 10);

        events.clear();
        apply(&mut world, Command::ForceRoundOver, &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn render_shows_robots_wrecks_and_empty_squares() {
        let mut world = world_10x10();
        spawn(&mut world, 1, 0, Heading::East);
        spawn(&mut world, 2, 0, Heading::West);
        spawn(&mut world, 4, 0, Heading::South);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Advance {
                cell: CellCoord::new(1, 0),
            },
            &mut events,
        );

        let rows: Vec<String> = query::render_rows(&world).collect();
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0], ".@@.R.....");
        for row in &rows[1..] {
            assert_eq!(row, &".".repeat(10));
        }

        // The renderer is restartable and pure.
        let again: Vec<String> = query::render_rows(&world).collect();
        assert_eq!(rows, again);
    }

    #[test]
    fn oversized_board_allocation_fails_cleanly() {
        assert!(World::with_size(BoardSize::new(u32::MAX, u32::MAX)).is_err());
    }
}
