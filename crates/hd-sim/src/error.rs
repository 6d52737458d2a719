use hd_behavior::BehaviorError;
use hd_core::{AgentId, CoreError, EntityId};
use hd_mobility::MobilityError;
use hd_schedule::ScheduleError;
use hd_sense::SenseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("unknown agent {0}")]
    UnknownAgent(AgentId),

    #[error("unknown entity {0}")]
    UnknownEntity(EntityId),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("agent tuning: {0}")]
    Behavior(#[from] BehaviorError),

    #[error("timers: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("navigation: {0}")]
    Mobility(#[from] MobilityError),

    #[error("senses: {0}")]
    Sense(#[from] SenseError),

    #[error("scenario parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
