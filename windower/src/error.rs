/// Configuration errors.
///
/// These are raised synchronously by constructors that received invalid
/// options. Steady-state conditions (no more items, a load in flight,
/// nothing visible yet) are represented as state, never as errors.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("page_size must be greater than zero")]
    InvalidPageSize,
    #[error("initial_load_count must be greater than zero")]
    InvalidInitialLoadCount,
    #[error("visibility threshold must be within 0.0..=1.0 (got {0})")]
    InvalidThreshold(f32),
}
