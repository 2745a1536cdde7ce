//! Thin diagnostic CLI over the textual cube/cover forms: not a parser
//! front-end, just a manual-testing surface for `minimize`, `complement`,
//! and `is_tautology`.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use qm_core::encoding::{Enc16, Enc32, Enc64, MintermEncoding};
use qm_core::{Cover, Cube};

#[derive(Parser)]
#[command(name = "qm", about = "Quine-McCluskey / Petrick two-level Boolean minimizer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Minimize a function given as on-set minterms, printing the SOP expression.
    Minimize {
        #[arg(long, value_delimiter = ',')]
        vars: Vec<String>,
        #[arg(long, value_delimiter = ',')]
        minterms: Vec<u64>,
        #[arg(long, value_delimiter = ',')]
        dont_cares: Vec<u64>,
    },
    /// Print the complement of a cover given as cubes.
    Complement {
        #[arg(long, value_delimiter = ',')]
        vars: Vec<String>,
        #[arg(long, value_delimiter = ',')]
        cubes: Vec<String>,
    },
    /// Print whether a cover given as cubes is a tautology.
    Tautology {
        #[arg(long, value_delimiter = ',')]
        vars: Vec<String>,
        #[arg(long, value_delimiter = ',')]
        cubes: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Minimize { vars, minterms, dont_cares } => run_minimize(vars, minterms, dont_cares),
        Commands::Complement { vars, cubes } => run_complement(vars, cubes),
        Commands::Tautology { vars, cubes } => run_tautology(vars, cubes),
    }
}

fn run_minimize(vars: Vec<String>, minterms: Vec<u64>, dont_cares: Vec<u64>) -> Result<()> {
    let n = vars.len();
    let expr = if n <= Enc16::MAX_VARS {
        let m: Vec<u32> = minterms.iter().map(|&x| x as u32).collect();
        let d: Vec<u32> = dont_cares.iter().map(|&x| x as u32).collect();
        qm_core::minimize::<Enc16>(&vars, &m, &d, None)
    } else if n <= Enc32::MAX_VARS {
        qm_core::minimize::<Enc32>(&vars, &minterms, &dont_cares, None)
    } else if n <= Enc64::MAX_VARS {
        let m: Vec<u128> = minterms.iter().map(|&x| x as u128).collect();
        let d: Vec<u128> = dont_cares.iter().map(|&x| x as u128).collect();
        qm_core::minimize::<Enc64>(&vars, &m, &d, None)
    } else {
        return Err(anyhow!("too many variables: {} (max {})", n, Enc64::MAX_VARS));
    }
    .context("minimization failed")?;
    println!("{}", expr);
    Ok(())
}

fn run_complement(vars: Vec<String>, cubes: Vec<String>) -> Result<()> {
    let cover: Cover<Enc64> =
        Cover::from_cubes(vars, cubes.iter().map(|s| Cube::parse(s)).collect::<Result<_, _>>()?)?;
    let complement = cover.complement()?;
    println!("{}", complement);
    Ok(())
}

fn run_tautology(vars: Vec<String>, cubes: Vec<String>) -> Result<()> {
    let cover: Cover<Enc64> =
        Cover::from_cubes(vars, cubes.iter().map(|s| Cube::parse(s)).collect::<Result<_, _>>()?)?;
    println!("{}", cover.is_tautology()?);
    Ok(())
}
