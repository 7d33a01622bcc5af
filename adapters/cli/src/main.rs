#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the Robot Derby experience.
//!
//! The adapter owns every blocking read and every printed line; the world is
//! driven exclusively through commands and observed through queries, exactly
//! one action per prompt.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use robot_derby_core::{BoardSize, CellCoord, Command, Event, RoundPhase, WELCOME_BANNER};
use robot_derby_world::{self as world, query, World};

/// Command-line options for the derby session.
#[derive(Debug, Parser)]
#[command(name = "robot-derby", about = "Turn-based robot demolition derby on a text grid")]
struct Args {
    /// Number of board columns.
    #[arg(long, default_value_t = 10)]
    columns: u32,

    /// Number of board rows.
    #[arg(long, default_value_t = 10)]
    rows: u32,

    /// Number of robots placed each round.
    #[arg(long, default_value_t = 10)]
    robots: u32,

    /// Fixed placement seed; omit to draw a fresh seed every round.
    #[arg(long)]
    seed: Option<u64>,
}

/// Player decision gathered from the start/replay menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MenuChoice {
    Play,
    PlayWithCustomSeed,
    Quit,
}

/// One parsed line of action input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ParsedAction {
    Robot { kind: RobotAction, row: u32, column: u32 },
    Stop,
    Help,
    ForceWin,
    Malformed,
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RobotAction {
    Forward,
    Left,
    Right,
}

/// How an interactive round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RoundOutcome {
    Won,
    Quit,
}

/// Entry point for the Robot Derby command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let size = BoardSize::new(args.columns, args.rows);
    if u64::from(args.robots) >= size.cell_count() {
        bail!(
            "{} robots cannot fit on a {}x{} board",
            args.robots,
            args.columns,
            args.rows
        );
    }

    let mut world = World::with_size(size).context("board allocation failed")?;
    let mut input = io::stdin().lock();

    println!();
    println!("{WELCOME_BANNER}");
    run(&mut world, &args, &mut input)
}

fn run(world: &mut World, args: &Args, input: &mut impl BufRead) -> Result<()> {
    loop {
        let seed = match prompt_menu(input)? {
            MenuChoice::Quit => return Ok(()),
            MenuChoice::Play => args.seed.unwrap_or_else(rand::random),
            MenuChoice::PlayWithCustomSeed => match prompt_seed(input)? {
                Some(seed) => seed,
                None => return Ok(()),
            },
        };

        start_round(world, args.robots, seed);
        if play_round(world, input)? == RoundOutcome::Quit {
            return Ok(());
        }
    }
}

fn prompt_menu(input: &mut impl BufRead) -> Result<MenuChoice> {
    println!("Y - Play");
    println!("N - Exit");
    println!("C - Play with custom seed");
    print!("Input: ");
    io::stdout().flush().context("failed to flush prompt")?;

    let Some(line) = read_trimmed_line(input)? else {
        return Ok(MenuChoice::Quit);
    };
    // Anything other than an explicit exit or seed request starts a round.
    match line.to_ascii_uppercase().as_str() {
        "N" => Ok(MenuChoice::Quit),
        "C" => Ok(MenuChoice::PlayWithCustomSeed),
        _ => Ok(MenuChoice::Play),
    }
}

fn prompt_seed(input: &mut impl BufRead) -> Result<Option<u64>> {
    loop {
        print!("Input seed: ");
        io::stdout().flush().context("failed to flush prompt")?;
        let Some(line) = read_trimmed_line(input)? else {
            return Ok(None);
        };
        match line.parse::<u64>() {
            Ok(seed) => return Ok(Some(seed)),
            Err(_) => println!("Invalid seed! Please enter a non-negative integer."),
        }
    }
}

fn start_round(world: &mut World, robots: u32, seed: u64) {
    let mut events = Vec::new();
    world::apply(world, Command::ClearRobots, &mut events);
    world::apply(world, Command::PlaceRobots { seed, robots }, &mut events);
    for event in &events {
        match event {
            Event::RoundStarted { seed, robots } => {
                log::info!("round started: seed {seed}, {robots} robots");
            }
            other => log::debug!("{other:?}"),
        }
    }
}

fn play_round(world: &mut World, input: &mut impl BufRead) -> Result<RoundOutcome> {
    while query::round_phase(world) == RoundPhase::Active {
        print_board(world);
        print!("Input action and coordinates (e.g., 'F 2 3'): ");
        io::stdout().flush().context("failed to flush prompt")?;

        let Some(line) = read_trimmed_line(input)? else {
            return Ok(RoundOutcome::Quit);
        };
        match parse_action(&line) {
            ParsedAction::Robot { kind, row, column } => {
                let cell = CellCoord::new(column, row);
                if !query::is_in_bounds(world, cell) {
                    println!("Invalid coordinates! Please enter values within the grid.");
                    continue;
                }
                let command = match kind {
                    RobotAction::Forward => Command::Advance { cell },
                    RobotAction::Left => Command::TurnLeft { cell },
                    RobotAction::Right => Command::TurnRight { cell },
                };
                dispatch(world, command);
            }
            ParsedAction::ForceWin => dispatch(world, Command::ForceRoundOver),
            ParsedAction::Stop => {
                println!("Game Seed: {}", query::seed(world));
                println!("Thanks for playing!");
                return Ok(RoundOutcome::Quit);
            }
            ParsedAction::Help => print_help(),
            ParsedAction::Malformed => {
                println!("Invalid coordinates! Please enter values within the grid.");
            }
            ParsedAction::Unknown => {
                println!("Invalid input! Type 'H' for help with the available actions.");
            }
        }
    }

    println!();
    println!("You won!!!");
    println!("Wanna play again?");
    Ok(RoundOutcome::Won)
}

fn dispatch(world: &mut World, command: Command) {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    for event in &events {
        log::debug!("{event:?}");
    }
}

fn parse_action(line: &str) -> ParsedAction {
    let mut parts = line.split_whitespace();
    let Some(code) = parts.next() else {
        return ParsedAction::Unknown;
    };
    let kind = match code.to_ascii_uppercase().as_str() {
        "F" => RobotAction::Forward,
        "L" => RobotAction::Left,
        "R" => RobotAction::Right,
        "S" => return ParsedAction::Stop,
        "H" => return ParsedAction::Help,
        "W" => return ParsedAction::ForceWin,
        _ => return ParsedAction::Unknown,
    };
    let (Some(Ok(row)), Some(Ok(column))) = (
        parts.next().map(str::parse::<u32>),
        parts.next().map(str::parse::<u32>),
    ) else {
        return ParsedAction::Malformed;
    };
    ParsedAction::Robot { kind, row, column }
}

fn print_board(world: &World) {
    let size = query::board_size(world);
    let mut header = String::from("  ");
    for column in 0..size.columns() {
        header.push(index_digit(column));
    }
    println!("{header}");
    for (row, glyphs) in query::render_rows(world).enumerate() {
        println!("{} {glyphs}", index_digit(row as u32));
    }
    println!("Robot Count: {}", query::remaining_robots(world));
    println!("Action Count: {}", query::action_count(world));
}

/// Single-digit column/row label; indices past nine wrap for display only.
fn index_digit(index: u32) -> char {
    char::from_digit(index % 10, 10).unwrap_or('?')
}

fn print_help() {
    println!("Help:");
    println!("F (Row) (Col)\tMove Forward");
    println!("L (Row) (Col)\tTurn Left");
    println!("R (Row) (Col)\tTurn Right");
    println!("S\t\tStop the game");
    println!("H\t\tDisplay this help message");
}

fn read_trimmed_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    let bytes = input
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}
