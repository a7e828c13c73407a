use crate::{
    criteria::polarities, CriterionSpec, Error, Normalized, NormalizedMatrix, Polarity, WeightVector,
};

/// Normalized matrix with each cell multiplied by the weight of its criterion.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedMatrix {
    rows: Vec<Vec<f64>>,
}

impl WeightedMatrix {
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    fn column(&self, index: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(move |row| row[index])
    }
}

/// Apply `weights` to the normalized matrix. The weights are validated first and never rescaled:
/// a weight vector that does not sum to 1 is rejected.
pub fn weigh(normalized: &NormalizedMatrix, weights: &WeightVector) -> Result<WeightedMatrix, Error> {
    let weights = weights.validate(normalized.criteria())?;
    let rows = normalized
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .zip(&weights)
                .map(|(v, w)| v * w.as_f64())
                .collect()
        })
        .collect();
    Ok(WeightedMatrix { rows })
}

/// The ideal-best (A+) and ideal-worst (A-) reference points, one value per criterion.
#[derive(Clone, Debug, PartialEq)]
pub struct IdealSolution {
    pub best: Vec<f64>,
    pub worst: Vec<f64>,
}

impl IdealSolution {
    pub fn new(weighted: &WeightedMatrix, polarities: &[Polarity]) -> Self {
        let (best, worst) = polarities
            .iter()
            .enumerate()
            .map(|(index, polarity)| {
                let max = weighted.column(index).fold(f64::NEG_INFINITY, f64::max);
                let min = weighted.column(index).fold(f64::INFINITY, f64::min);
                match polarity {
                    Polarity::Benefit => (max, min),
                    Polarity::Cost => (min, max),
                }
            })
            .unzip();
        Self { best, worst }
    }
}

/// Euclidean distances of one candidate to the ideal-best (D+) and ideal-worst (D-) points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Separation {
    pub to_best: f64,
    pub to_worst: f64,
}

impl Separation {
    pub fn new(row: &[f64], ideal: &IdealSolution) -> Self {
        let distance = |point: &[f64]| -> f64 {
            row.iter()
                .zip(point)
                .map(|(v, p)| (v - p) * (v - p))
                .sum::<f64>()
                .sqrt()
        };
        Self {
            to_best: distance(ideal.best.as_slice()),
            to_worst: distance(ideal.worst.as_slice()),
        }
    }

    /// Closeness coefficient `D- / (D+ + D-)`. This is `None` when the candidate coincides with both
    /// ideal points, since the ratio is then 0/0.
    pub fn closeness(&self) -> Option<Normalized> {
        let total = self.to_best + self.to_worst;
        if total == 0.0 {
            return None;
        }
        Normalized::new(self.to_worst / total)
    }
}

/// Closeness coefficients, index-aligned with the rows of the ranked matrix.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreVector(Vec<Normalized>);

impl ScoreVector {
    pub fn as_slice(&self) -> &[Normalized] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<Normalized> {
        self.0.get(row).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Normalized> + '_ {
        self.0.iter().copied()
    }
}

impl From<Vec<Normalized>> for ScoreVector {
    fn from(scores: Vec<Normalized>) -> Self {
        Self(scores)
    }
}

impl FromIterator<Normalized> for ScoreVector {
    fn from_iter<I: IntoIterator<Item = Normalized>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Intermediate results of a single ranking run.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub weighted: WeightedMatrix,
    pub ideal: IdealSolution,
    pub separations: Vec<Separation>,
}

impl Evaluation {
    /// Per-row closeness, with `None` for rows whose coefficient is undefined. Hosts that prefer
    /// to exclude such rows rather than abort can use this instead of [`Evaluation::scores`].
    pub fn closeness(&self) -> Vec<Option<Normalized>> {
        self.separations.iter().map(Separation::closeness).collect()
    }

    pub fn scores(&self) -> Result<ScoreVector, Error> {
        self.separations
            .iter()
            .enumerate()
            .map(|(row, separation)| separation.closeness().ok_or(Error::UndefinedScore(row)))
            .collect()
    }
}

/// Run TOPSIS up to the separation distances, without failing on rows of undefined closeness.
pub fn evaluate(
    normalized: &NormalizedMatrix,
    weights: &WeightVector,
    specs: &[CriterionSpec],
) -> Result<Evaluation, Error> {
    let polarities = polarities(normalized.criteria(), specs)?;
    let weighted = weigh(normalized, weights)?;
    let ideal = IdealSolution::new(&weighted, &polarities);
    tracing::trace!(best = ?ideal.best, worst = ?ideal.worst, "ideal solution");
    let separations = weighted
        .rows()
        .iter()
        .map(|row| Separation::new(row, &ideal))
        .collect();
    Ok(Evaluation {
        weighted,
        ideal,
        separations,
    })
}

/// Score each row of `normalized` by its relative closeness to the ideal solution. Scores are in
/// [0, 1], higher is better, and follow the row order of the input.
pub fn rank(
    normalized: &NormalizedMatrix,
    weights: &WeightVector,
    specs: &[CriterionSpec],
) -> Result<ScoreVector, Error> {
    let scores = evaluate(normalized, weights, specs)?.scores()?;
    tracing::debug!(
        rows = normalized.len(),
        criteria = normalized.criteria().len(),
        "ranked candidates"
    );
    Ok(scores)
}
