use thiserror::Error;

#[derive(Debug, Error)]
pub enum SenseError {
    #[error("sight radius must be positive and finite, got {0}")]
    SightRadius(f32),

    #[error("lose-sight radius {lose} is smaller than sight radius {sight}")]
    LoseRadius { sight: f32, lose: f32 },

    #[error("proximity half extents must be non-negative, got {0}")]
    HalfExtents(String),

    #[error("proximity body size must be non-negative, got radius {radius} and half height {half_height}")]
    Body { radius: f32, half_height: f32 },
}

pub type SenseResult<T> = Result<T, SenseError>;
