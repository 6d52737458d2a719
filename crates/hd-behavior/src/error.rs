use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("invalid tuning `{field}`: {reason}")]
    Tuning {
        field:  &'static str,
        reason: &'static str,
    },
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
