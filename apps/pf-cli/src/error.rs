use pf_project::ProjectError;
use pf_solver::SolverError;

pub type CliResult<T> = Result<T, CliError>;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("No sweep '{id}' in scenario (available: {available})")]
    UnknownSweep { id: String, available: String },

    #[error("Scenario has no vav section and no --theta-supply was given")]
    MissingVav,
}
