use proptest::{prelude::prop, prop_assert, prop_assert_eq, prop_compose, proptest};

use crate::{
    evaluate, normalize, rank, score, select, Candidate, CriteriaMatrix, CriterionSpec, Error,
    Normalized, ScoreVector, WeightVector,
};

#[derive(Clone, Debug)]
struct TestCandidate {
    id: usize,
    values: Vec<f64>,
}

impl Candidate for TestCandidate {
    type Id = usize;
    fn id(&self) -> Self::Id {
        self.id
    }
    fn value(&self, criterion: &str) -> Option<f64> {
        let index: usize = criterion.strip_prefix('C')?.parse().ok()?;
        self.values.get(index).copied()
    }
}

fn candidates(rows: &[Vec<f64>]) -> Vec<TestCandidate> {
    rows.iter()
        .enumerate()
        .map(|(id, values)| TestCandidate {
            id,
            values: values.clone(),
        })
        .collect()
}

/// Criteria `C0..Cn`, alternating benefit and cost.
fn specs(columns: usize) -> Vec<CriterionSpec> {
    (0..columns)
        .map(|c| match c % 2 {
            0 => CriterionSpec::benefit(format!("C{c}")),
            _ => CriterionSpec::cost(format!("C{c}")),
        })
        .collect()
}

fn weights(specs: &[CriterionSpec], raw: &[f64]) -> WeightVector {
    let total: f64 = raw.iter().sum();
    specs
        .iter()
        .zip(raw)
        .map(|(spec, w)| (spec.id.clone(), w / total))
        .collect()
}

fn scores(values: &[f64]) -> ScoreVector {
    values
        .iter()
        .map(|v| Normalized::new(*v).unwrap())
        .collect()
}

#[test]
fn polarity_scenario_selection() {
    let candidates = candidates(&[vec![1.0, 10.0], vec![2.0, 5.0], vec![3.0, 1.0]]);
    let specs = specs(2);
    let weights: WeightVector = [("C0", 0.5), ("C1", 0.5)].into_iter().collect();
    let scores = score(&specs, &weights, &candidates).unwrap();
    let selected = select(&candidates, &scores, 3).unwrap();
    assert_eq!(
        selected.iter().map(|s| s.candidate.id).collect::<Vec<usize>>(),
        vec![2, 1, 0]
    );
    assert_eq!(
        selected.iter().map(|s| s.rank).collect::<Vec<usize>>(),
        vec![1, 2, 3]
    );
}

#[test]
fn top_n_ties_keep_input_order() {
    let candidates = candidates(&[
        vec![1.0, 8.0],
        vec![3.0, 1.0],
        vec![2.0, 5.0],
        vec![3.0, 1.0],
        vec![1.0, 10.0],
    ]);
    let specs = specs(2);
    let weights: WeightVector = [("C0", 0.5), ("C1", 0.5)].into_iter().collect();
    let scores = score(&specs, &weights, &candidates).unwrap();
    assert_eq!(scores.get(1), scores.get(3));

    let selected = select(&candidates, &scores, 2).unwrap();
    assert_eq!(
        selected.iter().map(|s| s.candidate.id).collect::<Vec<usize>>(),
        vec![1, 3]
    );
    assert!(selected.iter().all(|s| s.score == Normalized::ONE));
}

#[test]
fn select_ties_by_input_order() {
    let candidates = candidates(&vec![vec![0.0]; 5]);
    let scores = scores(&[0.2, 0.7, 0.5, 0.7, 0.7]);
    let selected = select(&candidates, &scores, 4).unwrap();
    assert_eq!(
        selected.iter().map(|s| s.candidate.id).collect::<Vec<usize>>(),
        vec![1, 3, 4, 2]
    );
}

#[test]
fn select_limits() {
    let candidates = candidates(&vec![vec![0.0]; 3]);
    let scores = scores(&[0.1, 0.2, 0.3]);
    assert!(select(&candidates, &scores, 0).unwrap().is_empty());
    assert_eq!(select(&candidates, &scores, 3).unwrap().len(), 3);
    assert_eq!(
        select(&candidates, &scores, 4).unwrap_err(),
        Error::SelectionTooLarge {
            requested: 4,
            available: 3
        }
    );
    assert!(matches!(
        select(&candidates[..2], &scores, 1),
        Err(Error::ShapeMismatch(_))
    ));
}

#[test]
fn missing_candidate_value() {
    let candidates = candidates(&[vec![1.0, 2.0], vec![2.0]]);
    let specs = specs(2);
    let weights: WeightVector = [("C0", 0.5), ("C1", 0.5)].into_iter().collect();
    assert!(matches!(
        score(&specs, &weights, &candidates),
        Err(Error::ShapeMismatch(_))
    ));
}

#[test]
fn degenerate_column_is_reported() {
    let candidates = candidates(&[vec![1.0, 0.0], vec![2.0, 0.0], vec![3.0, 0.0]]);
    let specs = specs(2);
    let weights: WeightVector = [("C0", 0.5), ("C1", 0.5)].into_iter().collect();
    assert_eq!(
        score(&specs, &weights, &candidates),
        Err(Error::DegenerateColumn("C1".to_string()))
    );
}

prop_compose! {
    fn matrix()(columns in 1..6_usize, len in 2..24_usize)(
        rows in prop::collection::vec(prop::collection::vec(0.0_f64..100.0, columns), len),
        raw_weights in prop::collection::vec(0.01_f64..1.0, columns),
    ) -> (Vec<Vec<f64>>, Vec<f64>) {
        (rows, raw_weights)
    }
}
proptest! {
    #[test]
    fn scores_bounded_and_deterministic((rows, raw_weights) in matrix()) {
        let specs = specs(rows[0].len());
        let criteria: Vec<String> = specs.iter().map(|s| s.id.clone()).collect();
        let matrix = CriteriaMatrix::new(criteria, rows).unwrap();
        let Ok(normalized) = normalize(&matrix) else { return Ok(()) };
        let weights = weights(&specs, &raw_weights);

        let evaluation = evaluate(&normalized, &weights, &specs).unwrap();
        let closeness = evaluation.closeness();
        for (separation, c) in evaluation.separations.iter().zip(&closeness) {
            prop_assert!(separation.to_best >= 0.0 && separation.to_worst >= 0.0);
            if separation.to_best + separation.to_worst > 0.0 {
                let c = c.unwrap();
                prop_assert!(Normalized::ZERO <= c && c <= Normalized::ONE);
            } else {
                prop_assert!(c.is_none());
            }
        }

        // Distinct but equal copies of every input.
        let first = rank(&normalized, &weights, &specs);
        let second = rank(&normalized.clone(), &weights.clone(), &specs.to_vec());
        prop_assert_eq!(first.is_ok(), closeness.iter().all(Option::is_some));
        if let (Ok(first), Ok(second)) = (first, second) {
            let bits = |s: &ScoreVector| s.iter().map(|v| v.as_f64().to_bits()).collect::<Vec<u64>>();
            prop_assert_eq!(bits(&first), bits(&second));
        }
    }

    #[test]
    fn ideal_points_score_extremes((mut rows, raw_weights) in matrix()) {
        let specs = specs(rows[0].len());
        // Append a dominating and a dominated candidate.
        let best: Vec<f64> = (0..rows[0].len()).map(|c| if c % 2 == 0 { 200.0 } else { 0.0 }).collect();
        let worst: Vec<f64> = (0..rows[0].len()).map(|c| if c % 2 == 0 { 0.0 } else { 200.0 }).collect();
        rows.push(best);
        rows.push(worst);
        let candidates = candidates(&rows);
        let weights = weights(&specs, &raw_weights);

        let scores = score(&specs, &weights, &candidates).unwrap();
        prop_assert_eq!(scores.get(rows.len() - 2), Some(Normalized::ONE));
        prop_assert_eq!(scores.get(rows.len() - 1), Some(Normalized::ZERO));

        let selected = select(&candidates, &scores, 1).unwrap();
        prop_assert_eq!(selected[0].candidate.id, rows.len() - 2);
    }
}
