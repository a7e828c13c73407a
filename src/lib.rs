pub mod criteria;
mod error;
pub mod normalize;
pub mod num;
pub mod rank;
#[cfg(test)]
mod test;

pub use crate::criteria::{CriteriaMatrix, CriterionSpec, Polarity, WeightVector};
pub use crate::error::{Error, WeightError};
pub use crate::normalize::{normalize, NormalizedMatrix};
pub use crate::num::{Normalized, Weight};
pub use crate::rank::{evaluate, rank, Evaluation, ScoreVector};

pub trait Candidate {
    type Id: Clone + Eq;
    fn id(&self) -> Self::Id;
    /// Raw value of the given criterion, or `None` if the candidate does not carry it.
    fn value(&self, criterion: &str) -> Option<f64>;
}

#[derive(Debug)]
pub struct Selection<'c, Candidate> {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub candidate: &'c Candidate,
    pub score: Normalized,
}

/// Normalize and rank the given candidates over the criteria in `specs`, in the declared order of
/// `specs`.
pub fn score<Candidate>(
    specs: &[CriterionSpec],
    weights: &WeightVector,
    candidates: &[Candidate],
) -> Result<ScoreVector, Error>
where
    Candidate: crate::Candidate,
{
    let criteria = specs.iter().map(|spec| spec.id.clone()).collect();
    let matrix = CriteriaMatrix::from_candidates(criteria, candidates)?;
    rank(&normalize(&matrix)?, weights, specs)
}

/// Select the `n` best candidates by score, best first. Candidates with equal scores keep their
/// input order, so the selection is reproducible across runs.
///
/// Fails if `n` exceeds the number of candidates, or if `scores` is not index-aligned with
/// `candidates`.
pub fn select<'c, Candidate>(
    candidates: &'c [Candidate],
    scores: &ScoreVector,
    n: usize,
) -> Result<Vec<Selection<'c, Candidate>>, Error>
where
    Candidate: crate::Candidate,
{
    if candidates.len() != scores.len() {
        return Err(Error::ShapeMismatch(format!(
            "{} scores for {} candidates",
            scores.len(),
            candidates.len()
        )));
    }
    if n > candidates.len() {
        return Err(Error::SelectionTooLarge {
            requested: n,
            available: candidates.len(),
        });
    }
    // Stable sort, so ties are broken by input order.
    let order = permutation::sort_by(scores.as_slice(), |a, b| b.cmp(a));
    let indices: Vec<usize> = (0..candidates.len()).collect();
    let selections = order
        .apply_slice(&indices[..])
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(position, index)| Selection {
            rank: position + 1,
            candidate: &candidates[index],
            score: scores.as_slice()[index],
        })
        .collect();
    Ok(selections)
}
