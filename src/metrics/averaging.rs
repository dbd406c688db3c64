use serde::{Serialize, Deserialize};

/// Selects how per-class AP values are reduced to a single mAP.
///
/// - `Unweighted` — plain mean over classes that have at least one annotation.
/// - `Weighted`   — mean weighted by each class's annotation count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Averaging {
    #[default]
    Unweighted,
    Weighted,
}

impl Averaging {
    pub fn from_weighted(weighted: bool) -> Averaging {
        if weighted { Averaging::Weighted } else { Averaging::Unweighted }
    }
}
