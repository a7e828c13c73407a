use std::collections::{BTreeMap, BTreeSet};

use crate::{Candidate, Error, Weight, WeightError};

/// Maximum distance of the weight sum from 1.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    /// Higher raw values are more desirable.
    Benefit,
    /// Lower raw values are more desirable.
    Cost,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CriterionSpec {
    pub id: String,
    pub polarity: Polarity,
}

impl CriterionSpec {
    pub fn benefit(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            polarity: Polarity::Benefit,
        }
    }

    pub fn cost(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            polarity: Polarity::Cost,
        }
    }
}

/// Raw decision matrix: one row per candidate, one column per criterion. Columns follow the order
/// of `criteria`, which is the only order any computation over the matrix uses.
#[derive(Clone, Debug, PartialEq)]
pub struct CriteriaMatrix {
    criteria: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl CriteriaMatrix {
    pub fn new(criteria: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self, Error> {
        check_unique(&criteria)?;
        for (index, row) in rows.iter().enumerate() {
            if row.len() != criteria.len() {
                return Err(Error::ShapeMismatch(format!(
                    "row {index} has {} values, expected {}",
                    row.len(),
                    criteria.len(),
                )));
            }
            if let Some(column) = row.iter().position(|value| !value.is_finite()) {
                return Err(Error::NonFiniteValue {
                    row: index,
                    criterion: criteria[column].clone(),
                });
            }
        }
        Ok(Self { criteria, rows })
    }

    /// Build the matrix from candidates, reading each criterion in declared order.
    pub fn from_candidates<C>(criteria: Vec<String>, candidates: &[C]) -> Result<Self, Error>
    where
        C: Candidate,
    {
        let rows = candidates
            .iter()
            .enumerate()
            .map(|(index, candidate)| {
                criteria
                    .iter()
                    .map(|criterion| {
                        candidate.value(criterion).ok_or_else(|| {
                            Error::ShapeMismatch(format!(
                                "candidate {index} has no value for criterion {criterion:?}"
                            ))
                        })
                    })
                    .collect::<Result<Vec<f64>, Error>>()
            })
            .collect::<Result<Vec<Vec<f64>>, Error>>()?;
        Self::new(criteria, rows)
    }

    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Values of one criterion. `index` must be below `self.criteria().len()`.
    pub(crate) fn column(&self, index: usize) -> impl Iterator<Item = f64> + Clone + '_ {
        self.rows.iter().map(move |row| row[index])
    }
}

fn check_unique(criteria: &[String]) -> Result<(), Error> {
    let mut seen = BTreeSet::new();
    for criterion in criteria {
        if !seen.insert(criterion.as_str()) {
            return Err(Error::ShapeMismatch(format!(
                "criterion {criterion:?} is declared more than once"
            )));
        }
    }
    Ok(())
}

/// Resolve the polarity of each criterion, in declared order. Every criterion must be covered by
/// exactly one spec, and every spec must name a declared criterion.
pub fn polarities(criteria: &[String], specs: &[CriterionSpec]) -> Result<Vec<Polarity>, Error> {
    let mut by_id: BTreeMap<&str, Polarity> = BTreeMap::new();
    for spec in specs {
        if by_id.insert(spec.id.as_str(), spec.polarity).is_some() {
            return Err(Error::ShapeMismatch(format!(
                "criterion {:?} has more than one spec",
                spec.id
            )));
        }
    }
    let polarities = criteria
        .iter()
        .map(|criterion| {
            by_id.remove(criterion.as_str()).ok_or_else(|| {
                Error::ShapeMismatch(format!("criterion {criterion:?} has no spec"))
            })
        })
        .collect::<Result<Vec<Polarity>, Error>>()?;
    if let Some(unknown) = by_id.keys().next() {
        return Err(Error::ShapeMismatch(format!(
            "spec given for unknown criterion {unknown:?}"
        )));
    }
    Ok(polarities)
}

/// Per-criterion weights, as collected from the user. Nothing is checked on construction; use
/// [`WeightVector::validate`] (which `rank` always does) before relying on the values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeightVector(BTreeMap<String, f64>);

impl WeightVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, criterion: impl Into<String>, weight: f64) -> Option<f64> {
        self.0.insert(criterion.into(), weight)
    }

    pub fn get(&self, criterion: &str) -> Option<f64> {
        self.0.get(criterion).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of the weights of `criteria`, taken in that order. This is the sum [`Self::validate`]
    /// checks, so hosts can report it before ranking.
    pub fn sum(&self, criteria: &[String]) -> f64 {
        criteria
            .iter()
            .filter_map(|criterion| self.get(criterion))
            .sum()
    }

    /// Check the weights against the declared criteria and return them in declared order.
    pub fn validate(&self, criteria: &[String]) -> Result<Vec<Weight>, Error> {
        if let Some(unknown) = self
            .0
            .keys()
            .find(|criterion| !criteria.contains(*criterion))
        {
            return Err(WeightError::Unknown(unknown.clone()).into());
        }
        let weights = criteria
            .iter()
            .map(|criterion| {
                let value = self
                    .get(criterion)
                    .ok_or_else(|| WeightError::Missing(criterion.clone()))?;
                Weight::new(value).ok_or_else(|| WeightError::OutOfRange {
                    criterion: criterion.clone(),
                    value,
                })
            })
            .collect::<Result<Vec<Weight>, WeightError>>()?;
        let sum = self.sum(criteria);
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(WeightError::Sum(sum).into());
        }
        Ok(weights)
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for WeightVector {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(criterion, weight)| (criterion.into(), weight))
                .collect(),
        )
    }
}
