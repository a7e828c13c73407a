use std::io::Read;

use anyhow::{Context as _, Result};
use household_selection::{Household, CRITERIA, NAME_COLUMN};
use rand::Rng;

/// Read households from a CSV table with a `Nama` column and one column per criterion. Column
/// order does not matter; extra columns are ignored.
pub fn read_households<R: Read>(reader: R) -> Result<Vec<Household>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers().context("read header row")?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("missing column {name:?}"))
    };
    let name_column = column(NAME_COLUMN)?;
    let criterion_columns = CRITERIA
        .iter()
        .map(|c| column(c.id))
        .collect::<Result<Vec<usize>>>()?;

    reader
        .records()
        .enumerate()
        .map(|(index, record)| -> Result<Household> {
            let row = index + 1;
            let record = record.with_context(|| format!("read row {row}"))?;
            let mut values = [0.0; CRITERIA.len()];
            for ((value, column), criterion) in
                values.iter_mut().zip(&criterion_columns).zip(&CRITERIA)
            {
                let field = &record[*column];
                *value = field.parse().with_context(|| {
                    format!("row {row}: invalid value {field:?} for {:?}", criterion.id)
                })?;
            }
            Ok(Household::from_values(&record[name_column], values))
        })
        .collect()
}

/// Generate a random population with criterion values on the scales of the household survey.
pub fn synthetic_households<R: Rng>(rng: &mut R, count: usize) -> Vec<Household> {
    (0..count)
        .map(|index| {
            let values = [
                rng.gen_range(20..=80_u8),
                rng.gen_range(1..=5),
                rng.gen_range(1..=5),
                rng.gen_range(1..=5),
                rng.gen_range(0..=6),
                rng.gen_range(1..=5),
                rng.gen_range(0..=3),
                rng.gen_range(0..=3),
            ]
            .map(f64::from);
            Household::from_values(format!("Warga {}", index + 1), values)
        })
        .collect()
}
