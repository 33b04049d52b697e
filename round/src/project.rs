//! Candidate projects of a round.

use serde::{Deserialize, Serialize};
use votepool_types::Asset;

/// A candidate outcome. Its pooled balance doubles as its vote count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// What the pool is paid out in if this project wins.
    pub target: Asset,
    /// Descriptive link; carries no behaviour.
    pub link: String,
    /// Base currency contributed to this project in the current round.
    pub pooled_balance: u128,
}

impl Project {
    pub fn new(target: Asset, link: impl Into<String>) -> Self {
        Self {
            target,
            link: link.into(),
            pooled_balance: 0,
        }
    }
}

/// Index of the project with the strictly greatest pooled balance.
///
/// Ties go to the lowest index. `None` only for an empty slice.
pub fn leading_project(projects: &[Project]) -> Option<usize> {
    let mut best: Option<(usize, u128)> = None;
    for (index, project) in projects.iter().enumerate() {
        match best {
            Some((_, balance)) if project.pooled_balance <= balance => {}
            _ => best = Some((index, project.pooled_balance)),
        }
    }
    best.map(|(index, _)| index)
}
