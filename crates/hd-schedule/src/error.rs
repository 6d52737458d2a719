use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("tick duration must be at least 1 ms")]
    ZeroTickDuration,
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
