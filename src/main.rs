//! Command-line front end for the FRLG dex.
//!
//! Usage:
//!   frlg-dex pokemon charizard
//!   frlg-dex types ghost dark
//!   frlg-dex team charizard blastoise venusaur pikachu snorlax gengar --json

use clap::{Parser, Subcommand};
use frlg_dex::mcp_interface::*;
use frlg_dex::{logging, Dex, DexConfig, DexError};
use serde::Serialize;
use std::error::Error;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "frlg-dex", version, about = "Pokemon Fire Red / Leaf Green reference")]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full detail for a Pokemon, by name or national dex number
    Pokemon { id: String },

    /// Defensive weaknesses of a Pokemon
    Weaknesses { id: String },

    /// Defensive chart for one or two types
    Types {
        #[arg(required = true, num_args = 1..=2)]
        types: Vec<String>,
    },

    /// A move with its Generation 3 category
    Move { id: String },

    /// One page of the national dex
    List {
        #[arg(short, long)]
        limit: Option<u32>,
        #[arg(short, long)]
        offset: Option<u32>,
    },

    /// All egg groups, or the members of one
    EggGroups { name: Option<String> },

    /// Evolution chain of a Pokemon
    Evolution { id: String },

    /// Wild encounter locations in FireRed and LeafGreen
    Encounters { id: String },

    /// Defensive coverage of a team of up to six Pokemon
    Team {
        #[arg(required = true)]
        members: Vec<String>,
    },

    /// The TM and HM list
    Tms,

    /// Move tutors
    Tutors,

    /// Which types are physical and which are special
    Categories,
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> Result<(), Box<dyn Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text(value));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init("warn");
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            if err.downcast_ref::<DexError>().is_some_and(DexError::is_retryable) {
                eprintln!("PokeAPI could not be reached; try again in a moment.");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let dex = Dex::from_config(DexConfig::load()?)?;
    let json = cli.json;

    match cli.command {
        Commands::Pokemon { id } => {
            emit(json, &dex.pokemon_detail(&id).await?, format_pokemon_detail)
        }
        Commands::Weaknesses { id } => emit(
            json,
            &dex.pokemon_weaknesses(&id).await?,
            format_pokemon_weaknesses,
        ),
        Commands::Types { types } => {
            emit(json, &dex.type_weaknesses(&types)?, format_type_weaknesses)
        }
        Commands::Move { id } => emit(json, &dex.move_detail(&id).await?, format_move_detail),
        Commands::List { limit, offset } => emit(
            json,
            &dex.list_pokemon(limit, offset).await?,
            format_pokemon_list,
        ),
        Commands::EggGroups { name: None } => {
            emit(json, &dex.egg_groups(), |groups| format_egg_groups(groups))
        }
        Commands::EggGroups { name: Some(name) } => emit(
            json,
            &dex.egg_group_detail(&name).await?,
            format_egg_group_detail,
        ),
        Commands::Evolution { id } => emit(json, &dex.evolution_chain(&id).await?, |steps| {
            format_evolution_chain(steps)
        }),
        Commands::Encounters { id } => {
            emit(json, &dex.encounters(&id).await?, format_encounters)
        }
        Commands::Team { members } => {
            emit(json, &dex.analyse_team(&members).await?, |analysis| {
                format!("{}\n", analysis)
            })
        }
        Commands::Tms => emit(json, &dex.tms_hms(), |moves| {
            format_teachable_moves("TMs and HMs", moves)
        }),
        Commands::Tutors => emit(json, &dex.move_tutors(), |moves| {
            format_teachable_moves("Move tutors", moves)
        }),
        Commands::Categories => emit(json, &dex.categories(), format_categories),
    }?;
    Ok(())
}
