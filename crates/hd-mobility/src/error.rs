use hd_core::AgentId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("agent {0} has not been placed")]
    NotPlaced(AgentId),

    #[error("invalid speed {1} for agent {0}")]
    InvalidSpeed(AgentId, f32),
}

pub type MobilityResult<T> = Result<T, MobilityError>;
