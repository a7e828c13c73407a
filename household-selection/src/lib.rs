pub use topsis_selection::{
    CriterionSpec, Error, Normalized, Polarity, ScoreVector, Selection, WeightVector,
};


/// Name of the identifier column in household tables.
pub const NAME_COLUMN: &str = "Nama";

pub struct Criterion {
    /// Column header of the criterion in household tables.
    pub id: &'static str,
    pub description: &'static str,
    pub polarity: Polarity,
    pub default_weight: f64,
}

/// The fixed criteria for social-assistance eligibility, in declared order. Benefit criteria raise
/// a household's need (and so its priority), cost criteria lower it.
pub const CRITERIA: [Criterion; 8] = [
    Criterion {
        id: "Usia (C1)",
        description: "age of the head of household",
        polarity: Polarity::Benefit,
        default_weight: 0.05,
    },
    Criterion {
        id: "Pendidikan (C2)",
        description: "education level",
        polarity: Polarity::Cost,
        default_weight: 0.10,
    },
    Criterion {
        id: "Pekerjaan (C3)",
        description: "occupation level",
        polarity: Polarity::Cost,
        default_weight: 0.15,
    },
    Criterion {
        id: "Penghasilan (C4)",
        description: "household income",
        polarity: Polarity::Cost,
        default_weight: 0.25,
    },
    Criterion {
        id: "Tanggungan (C5)",
        description: "number of dependents",
        polarity: Polarity::Benefit,
        default_weight: 0.20,
    },
    Criterion {
        id: "Tempat Tinggal (C6)",
        description: "housing condition",
        polarity: Polarity::Cost,
        default_weight: 0.10,
    },
    Criterion {
        id: "Keluarga Sakit (C7)",
        description: "chronically ill family members",
        polarity: Polarity::Benefit,
        default_weight: 0.08,
    },
    Criterion {
        id: "Keluarga Lansia (C8)",
        description: "elderly family members",
        polarity: Polarity::Benefit,
        default_weight: 0.07,
    },
];

pub fn specs() -> Vec<CriterionSpec> {
    CRITERIA
        .iter()
        .map(|c| CriterionSpec {
            id: c.id.to_string(),
            polarity: c.polarity,
        })
        .collect()
}

pub fn default_weights() -> WeightVector {
    CRITERIA.iter().map(|c| (c.id, c.default_weight)).collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct Household {
    pub name: String,
    pub age: f64,
    pub education: f64,
    pub occupation: f64,
    pub income: f64,
    pub dependents: f64,
    pub housing: f64,
    pub sick_members: f64,
    pub elderly_members: f64,
}

impl Household {
    /// Build a household from criterion values given in the order of [`CRITERIA`].
    pub fn from_values(name: impl Into<String>, values: [f64; 8]) -> Self {
        let [age, education, occupation, income, dependents, housing, sick_members, elderly_members] =
            values;
        Self {
            name: name.into(),
            age,
            education,
            occupation,
            income,
            dependents,
            housing,
            sick_members,
            elderly_members,
        }
    }

    pub fn values(&self) -> [f64; 8] {
        [
            self.age,
            self.education,
            self.occupation,
            self.income,
            self.dependents,
            self.housing,
            self.sick_members,
            self.elderly_members,
        ]
    }
}

impl topsis_selection::Candidate for Household {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.name.clone()
    }

    fn value(&self, criterion: &str) -> Option<f64> {
        let index = CRITERIA.iter().position(|c| c.id == criterion)?;
        Some(self.values()[index])
    }
}

pub fn score(households: &[Household], weights: &WeightVector) -> Result<ScoreVector, Error> {
    topsis_selection::score(&specs(), weights, households)
}

/// Rank the households and return the `n` recipients with the highest need.
pub fn select<'h>(
    households: &'h [Household],
    weights: &WeightVector,
    n: usize,
) -> Result<Vec<Selection<'h, Household>>, Error> {
    let scores = score(households, weights)?;
    topsis_selection::select(households, &scores, n)
}
