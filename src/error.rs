/// Failures of the ranking engine. None of these are retryable: each one points at a data or
/// configuration defect that the caller has to fix before ranking again.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("criterion {0:?} has a column of zero norm")]
    DegenerateColumn(String),
    #[error("invalid weights: {0}")]
    InvalidWeights(#[from] WeightError),
    #[error("closeness coefficient of row {0} is undefined")]
    UndefinedScore(usize),
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
    #[error("value of criterion {criterion:?} in row {row} is not finite")]
    NonFiniteValue { row: usize, criterion: String },
    #[error("requested {requested} candidates, but only {available} are available")]
    SelectionTooLarge { requested: usize, available: usize },
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum WeightError {
    #[error("missing weight for criterion {0:?}")]
    Missing(String),
    #[error("weight given for unknown criterion {0:?}")]
    Unknown(String),
    #[error("weight {value} for criterion {criterion:?} is negative or not finite")]
    OutOfRange { criterion: String, value: f64 },
    #[error("weights sum to {0}, expected 1")]
    Sum(f64),
}
