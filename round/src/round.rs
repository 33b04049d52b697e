//! The state of one round, replaced wholesale on every reset.

use crate::contributions::Contributions;
use crate::phase::Phase;
use crate::project::{leading_project, Project};
use serde::{Deserialize, Serialize};
use votepool_types::{AccountId, Timestamp};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Round {
    pub phase: Phase,
    pub projects: Vec<Project>,
    pub contributions: Contributions,
    /// Advisory settlement time. Never enforced by the engine.
    pub estimated_timestamp: Timestamp,
}

impl Round {
    /// The state before any round has been configured.
    pub fn idle() -> Self {
        Self::default()
    }

    /// A fresh open round with zeroed balances and no participants.
    pub fn open(projects: Vec<Project>, estimated_timestamp: Timestamp) -> Self {
        Self {
            phase: Phase::Open,
            projects,
            contributions: Contributions::new(),
            estimated_timestamp,
        }
    }

    /// Sum of every project's pooled balance.
    pub fn total_pooled(&self) -> u128 {
        self.projects.iter().map(|p| p.pooled_balance).sum()
    }

    pub fn leading_project(&self) -> Option<usize> {
        leading_project(&self.projects)
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            phase: self.phase,
            estimated_timestamp: self.estimated_timestamp,
            projects: self.projects.clone(),
            participants: self
                .contributions
                .iter()
                .map(|(id, amount)| (id.clone(), amount))
                .collect(),
            total_pooled: self.total_pooled(),
            leading_project: self.leading_project(),
        }
    }
}

/// Serializable read-only view of a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub phase: Phase,
    pub estimated_timestamp: Timestamp,
    pub projects: Vec<Project>,
    pub participants: Vec<(AccountId, u128)>,
    pub total_pooled: u128,
    pub leading_project: Option<usize>,
}
