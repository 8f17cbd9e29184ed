//! lapnet CLI.
//!
//! Reads a netlist, solves it in the Laplace domain and prints each node's
//! transform-domain and time-domain voltage.

mod netlist;
mod output;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lapnet_core::CircuitModel;
use lapnet_solver::{
    Command, NodalSystem, Response, SampleGrid, Session, SolveOptions,
};

use crate::netlist::parse_netlist;
use crate::output::{
    SolutionReport, print_edges, print_equations, print_expressions, print_sample_table,
};

#[derive(Parser)]
#[command(name = "lapnet")]
#[command(about = "Laplace-domain nodal analysis of RLC circuits")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a netlist and print node voltages
    Solve {
        /// Path to the netlist file
        netlist: PathBuf,

        /// Last sample time (s)
        #[arg(long, default_value = "10")]
        t_stop: f64,

        /// Number of samples from t=0 to t_stop
        #[arg(long, default_value = "1000")]
        points: usize,

        /// Print every Nth sample
        #[arg(long, default_value = "100")]
        every: usize,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the nodal equations without solving
    Equations {
        /// Path to the netlist file
        netlist: PathBuf,
    },

    /// Print the labelled edge list for drawing the circuit
    Edges {
        /// Path to the netlist file
        netlist: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Solve {
            netlist,
            t_stop,
            points,
            every,
            json,
        } => cmd_solve(&netlist, t_stop, points, every, json),
        Commands::Equations { netlist } => cmd_equations(&netlist),
        Commands::Edges { netlist } => cmd_edges(&netlist),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Read a netlist and replay it into a session.
fn load_session(path: &Path, options: SolveOptions) -> Result<Session> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading netlist {}", path.display()))?;
    let commands = parse_netlist(&text).with_context(|| format!("parsing {}", path.display()))?;

    let mut session = Session::new().with_options(options);
    for command in commands {
        if let Response::SourceSet { replaced: true } = session.handle(command)? {
            eprintln!("Warning: more than one source; the last one is used");
        }
    }
    Ok(session)
}

fn load_circuit(path: &Path) -> Result<CircuitModel> {
    Ok(load_session(path, SolveOptions::default())?.circuit().clone())
}

fn cmd_solve(path: &Path, t_stop: f64, points: usize, every: usize, json: bool) -> Result<()> {
    let grid = SampleGrid::default()
        .with_t_stop(t_stop)
        .with_num_points(points);
    let mut session = load_session(path, SolveOptions::new().with_grid(grid))?;

    let Response::Solved(solution) = session.handle(Command::Solve)? else {
        anyhow::bail!("solve returned no solution");
    };

    if json {
        let report = SolutionReport::new(&solution, every);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Laplace Analysis ({})", path.display());
        println!("==========================================");
        println!();
        print_expressions(&solution);
        print_sample_table(&solution, every);
    }
    Ok(())
}

fn cmd_equations(path: &Path) -> Result<()> {
    let circuit = load_circuit(path)?;
    let system = NodalSystem::build(&circuit)?;
    print_equations(&system);
    Ok(())
}

fn cmd_edges(path: &Path) -> Result<()> {
    let circuit = load_circuit(path)?;
    print_edges(&circuit.edges());
    Ok(())
}
