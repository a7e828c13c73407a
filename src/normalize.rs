use crate::{CriteriaMatrix, Error};

/// Vector-normalized decision matrix. Each column is the raw column divided by its Euclidean norm,
/// which makes criteria of different scales commensurable while preserving their ordering.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedMatrix {
    criteria: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl NormalizedMatrix {
    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Euclidean norm of a column, kept as `scale * norm(column / scale)` with `scale` the largest
/// magnitude in the column, so squaring can neither overflow nor underflow.
#[derive(Clone, Copy)]
struct ColumnNorm {
    scale: f64,
    scaled: f64,
}

impl ColumnNorm {
    fn new(column: impl Iterator<Item = f64> + Clone) -> Option<Self> {
        let scale = column.clone().map(f64::abs).fold(0.0, f64::max);
        if scale == 0.0 {
            return None;
        }
        let scaled = column
            .map(|v| (v / scale) * (v / scale))
            .sum::<f64>()
            .sqrt();
        Some(Self { scale, scaled })
    }

    fn divide(&self, value: f64) -> f64 {
        (value / self.scale) / self.scaled
    }
}

/// Normalize each criterion column by `sqrt(sum(value^2))`. A column with zero norm (all zeros, or
/// no rows at all) cannot be normalized and fails with [`Error::DegenerateColumn`].
pub fn normalize(matrix: &CriteriaMatrix) -> Result<NormalizedMatrix, Error> {
    let norms = matrix
        .criteria()
        .iter()
        .enumerate()
        .map(|(index, criterion)| {
            ColumnNorm::new(matrix.column(index))
                .ok_or_else(|| Error::DegenerateColumn(criterion.clone()))
        })
        .collect::<Result<Vec<ColumnNorm>, Error>>()?;

    let rows = matrix
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .zip(&norms)
                .map(|(v, norm)| norm.divide(*v))
                .collect()
        })
        .collect();
    tracing::debug!(
        rows = matrix.rows().len(),
        criteria = norms.len(),
        "normalized criteria matrix"
    );
    Ok(NormalizedMatrix {
        criteria: matrix.criteria().to_vec(),
        rows,
    })
}
