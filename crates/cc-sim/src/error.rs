use cc_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("could not place a task clear of the depot after {attempts} attempts")]
    Placement { attempts: usize },
}

pub type SimResult<T> = Result<T, SimError>;
