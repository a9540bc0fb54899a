mod error;
mod report;

use clap::{Parser, Subcommand};
use error::{CliError, CliResult};
use pf_project::Scenario;
use pf_solver::{AirHandler, Field, LinearizationConfig, VavConfig, linspace, sweep};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pf-cli")]
#[command(about = "psychroflow CLI - steady-state air-handling unit solver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate scenario file syntax and values
    Validate {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
    },
    /// Solve the unit at the scenario's operating point
    Solve {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
        /// Linearization temperature of the saturation curve [°C]
        #[arg(long)]
        theta_s0: Option<f64>,
        /// Single linear solve at theta_s0 instead of successive linearization
        #[arg(long)]
        linear: bool,
    },
    /// Run a sweep defined in the scenario
    Sweep {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
        /// Sweep ID
        sweep_id: String,
    },
    /// Find the supply air flow that meets a supply temperature set point
    Vav {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
        /// Supply air temperature set point [°C], overrides the scenario
        #[arg(long)]
        theta_supply: Option<f64>,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Solve {
            scenario_path,
            theta_s0,
            linear,
        } => cmd_solve(&scenario_path, theta_s0, linear),
        Commands::Sweep {
            scenario_path,
            sweep_id,
        } => cmd_sweep(&scenario_path, &sweep_id),
        Commands::Vav {
            scenario_path,
            theta_supply,
        } => cmd_vav(&scenario_path, theta_supply),
    }
}

fn load(scenario_path: &Path) -> CliResult<(Scenario, AirHandler)> {
    let scenario = pf_project::load(scenario_path)?;
    let ahu = pf_project::build_air_handler(&scenario)?;
    info!(path = %scenario_path.display(), name = %scenario.name, "scenario loaded");
    Ok((scenario, ahu))
}

fn cmd_validate(scenario_path: &Path) -> CliResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = pf_project::load(scenario_path)?;
    println!("✓ Scenario is valid: {}", scenario.name);
    println!(
        "  {} sweep(s), vav {}",
        scenario.sweeps.len(),
        if scenario.vav.is_some() { "configured" } else { "not configured" }
    );
    Ok(())
}

fn cmd_solve(scenario_path: &Path, theta_s0: Option<f64>, linear: bool) -> CliResult<()> {
    let (scenario, ahu) = load(scenario_path)?;
    let mut config: LinearizationConfig = scenario.linearization_config();
    if let Some(t) = theta_s0 {
        config.theta_s0 = t;
    }

    println!("Solving scenario: {}", scenario.name);
    let solution = if linear {
        ahu.linear_solve(config.theta_s0)?
    } else {
        ahu.solve(&config)?
    };
    println!(
        "✓ Solved: θs0 = {:.4} °C, {} linear solve(s), max scaled residual {:.2e}",
        solution.theta_s0, solution.iterations, solution.max_scaled_residual
    );
    if !linear {
        println!(
            "  saturation residual w1 - w_sat(θ1) = {:.3e}",
            ahu.saturation_residual(&solution)?
        );
    }
    let states = ahu.point_states(&solution)?;
    print!("{}", report::solution_table(&solution, &states));
    Ok(())
}

fn cmd_sweep(scenario_path: &Path, sweep_id: &str) -> CliResult<()> {
    let (scenario, ahu) = load(scenario_path)?;
    let def = scenario.sweep(sweep_id).ok_or_else(|| CliError::UnknownSweep {
        id: sweep_id.to_string(),
        available: scenario
            .sweeps
            .iter()
            .map(|s| s.id.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    })?;
    // Validation guarantees the field name resolves.
    let field = Field::from_name(&def.field).ok_or_else(|| CliError::UnknownSweep {
        id: def.field.clone(),
        available: Field::ALL.map(Field::name).join(", "),
    })?;

    println!(
        "Sweeping {} [{}] from {} to {} in {} step(s)",
        field,
        field.unit(),
        def.start,
        def.end,
        def.steps
    );
    let values = linspace(def.start, def.end, def.steps);
    let points = sweep(&ahu, field, &values, &scenario.linearization_config());
    let failed = points.iter().filter(|p| p.result.is_err()).count();
    print!("{}", report::sweep_table(field.name(), &points));
    println!("✓ {} point(s), {} failed", points.len(), failed);
    Ok(())
}

fn cmd_vav(scenario_path: &Path, theta_supply: Option<f64>) -> CliResult<()> {
    let (scenario, mut ahu) = load(scenario_path)?;
    let mut config = match (scenario.vav_config(), theta_supply) {
        (Some(cfg), _) => cfg,
        (None, Some(_)) => VavConfig {
            linearization: scenario.linearization_config(),
            ..VavConfig::default()
        },
        (None, None) => return Err(CliError::MissingVav),
    };
    if let Some(t) = theta_supply {
        config.theta_supply_sp = t;
    }

    println!(
        "Searching supply flow for θ3 = {:.2} °C in [{}, {}] kg/s",
        config.theta_supply_sp, config.m_min, config.m_max
    );
    let outcome = ahu.vav_mass_flow(&config)?;
    println!(
        "✓ m = {:.5} kg/s after {} evaluation(s) (design {:.5} kg/s)",
        outcome.m,
        outcome.evaluations,
        ahu.design().m
    );
    let states = ahu.point_states(&outcome.solution)?;
    print!("{}", report::solution_table(&outcome.solution, &states));
    Ok(())
}
