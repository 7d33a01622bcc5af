#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Robot Derby simulation.
//!
//! This crate defines the message surface that connects adapters to the
//! authoritative world. Adapters submit [`Command`] values describing desired
//! mutations, the world executes those commands via its `apply` entry point,
//! and then broadcasts [`Event`] values describing what actually happened.
//! Adapters never mutate the board directly; they render from read-only
//! queries and react to events.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Demolition Robot Derby";

/// Glyph rendered for a square that holds no robot.
pub const EMPTY_GLYPH: char = '.';
/// Glyph rendered for a square that holds a live robot.
pub const ROBOT_GLYPH: char = 'R';
/// Glyph rendered for a square that holds a wrecked robot.
pub const WRECK_GLYPH: char = '@';

/// Cardinal headings a robot can face, in cyclic rotation order.
///
/// A right turn advances one step through West → North → East → South and
/// wraps back to West; a left turn walks the cycle in reverse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    /// Facing toward decreasing column indices.
    West,
    /// Facing toward decreasing row indices.
    North,
    /// Facing toward increasing column indices.
    East,
    /// Facing toward increasing row indices.
    South,
}

impl Heading {
    /// All headings in cyclic rotation order.
    pub const ALL: [Heading; 4] = [Heading::West, Heading::North, Heading::East, Heading::South];

    /// Heading after one clockwise quarter turn.
    #[must_use]
    pub const fn rotated_right(self) -> Self {
        match self {
            Self::West => Self::North,
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
        }
    }

    /// Heading after one counter-clockwise quarter turn.
    #[must_use]
    pub const fn rotated_left(self) -> Self {
        match self {
            Self::West => Self::South,
            Self::North => Self::West,
            Self::East => Self::North,
            Self::South => Self::East,
        }
    }
}

/// Location of a single board square expressed as column and row indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new board coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the square.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the square.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Rectangular dimensions of the board measured in whole squares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSize {
    columns: u32,
    rows: u32,
}

impl BoardSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of columns on the board.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows on the board.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of squares on the board.
    #[must_use]
    pub const fn cell_count(&self) -> u64 {
        self.columns as u64 * self.rows as u64
    }

    /// Reports whether the coordinate lies inside the board.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }
}

/// Macro-state of the current round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Live robots remain; the world accepts action commands.
    Active,
    /// No live robots remain; the caller decides between replay and quit.
    RoundOver,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Empties every square on the board ahead of a fresh placement.
    ClearRobots,
    /// Seeds the generator and scatters robots across distinct free squares.
    PlaceRobots {
        /// Seed for the placement generator; the same seed reproduces the
        /// same board.
        seed: u64,
        /// Number of robots to place.
        robots: u32,
    },
    /// Claims a single free square for a live robot.
    SpawnRobot {
        /// Square the robot should occupy.
        cell: CellCoord,
        /// Heading the robot starts with.
        heading: Heading,
    },
    /// Requests that the robot on the square advance one step along its
    /// heading.
    Advance {
        /// Square currently holding the robot.
        cell: CellCoord,
    },
    /// Rotates the occupant of the square one quarter turn counter-clockwise.
    TurnLeft {
        /// Square holding the occupant to rotate.
        cell: CellCoord,
    },
    /// Rotates the occupant of the square one quarter turn clockwise.
    TurnRight {
        /// Square holding the occupant to rotate.
        cell: CellCoord,
    },
    /// Zeroes the live-robot count without touching the board, ending the
    /// round immediately.
    ForceRoundOver,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that every square was emptied.
    BoardCleared,
    /// Confirms that a robot now occupies a square.
    RobotPlaced {
        /// Square the robot occupies.
        cell: CellCoord,
        /// Heading the robot faces.
        heading: Heading,
    },
    /// Reports that a spawn request was rejected.
    PlacementRejected {
        /// Square provided in the spawn request.
        cell: CellCoord,
        /// Specific reason the spawn failed.
        reason: PlacementError,
    },
    /// Announces that a seeded placement completed and a round began.
    RoundStarted {
        /// Seed that produced the placement.
        seed: u64,
        /// Number of robots placed.
        robots: u32,
    },
    /// Confirms that a robot moved between two squares.
    RobotAdvanced {
        /// Square the robot vacated.
        from: CellCoord,
        /// Square the robot now occupies.
        to: CellCoord,
    },
    /// Reports that a robot drove into a live robot; both are wrecked in
    /// place.
    RobotsCrashed {
        /// Square of the robot that moved.
        mover: CellCoord,
        /// Square of the robot that was struck.
        struck: CellCoord,
    },
    /// Reports that a robot drove into wreckage and was wrecked at its own
    /// square.
    RobotHitWreck {
        /// Square of the robot that moved.
        mover: CellCoord,
        /// Square holding the wreckage it struck.
        wreck: CellCoord,
    },
    /// Confirms that an occupant's heading changed.
    RobotTurned {
        /// Square holding the occupant.
        cell: CellCoord,
        /// Heading the occupant now faces.
        heading: Heading,
    },
    /// Reports that an action command was rejected before resolution.
    ActionRejected {
        /// Square provided in the action request.
        cell: CellCoord,
        /// Specific reason the action failed.
        reason: ActionError,
    },
    /// Announces that the last live robot is gone and the round is won.
    RoundWon {
        /// Number of actions charged during the round.
        actions: u32,
    },
}

/// Reasons an action command may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionError {
    /// The provided coordinate lies outside the board.
    OutOfBounds,
}

/// Reasons a spawn request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The provided coordinate lies outside the board.
    OutOfBounds,
    /// The requested square already holds a robot or wreckage.
    Occupied,
}
