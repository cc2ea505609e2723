//! Velocity-update coefficient schedules.

use serde::{Deserialize, Serialize};

/// The three weights of the velocity recurrence for one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    /// Inertia `w` (momentum kept from the previous velocity)
    pub inertia: f64,
    /// Cognitive coefficient `c1` (attraction to the personal best)
    pub cognitive: f64,
    /// Social coefficient `c2` (attraction to the neighborhood best)
    pub social: f64,
}

/// Clerc & Kennedy constriction coefficients.
pub const CONSTRICTION: Coefficients = Coefficients {
    inertia: 0.7298437881283576,
    cognitive: 1.496179765663133,
    social: 1.496179765663133,
};

/// How `(w, c1, c2)` evolve over a run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoefficientSchedule {
    /// [`CONSTRICTION`] at every iteration
    #[default]
    Constriction,
    /// Cognition-to-social handoff: `c1` decays from 3.5 to 0.5 while `c2`
    /// grows from 0.5 to 3.5; inertia follows `0.4 * ((t - n) / n)^2 + 0.4`
    Evolving,
    /// Caller-chosen constant weights
    Fixed {
        inertia: f64,
        cognitive: f64,
        social: f64,
    },
}

impl CoefficientSchedule {
    /// Coefficients for iteration `iteration` of a run lasting `n_iterations`.
    ///
    /// `n_iterations` must be non-zero; [`crate::SwarmConfig::validate`] enforces it.
    pub fn coefficients(&self, iteration: usize, n_iterations: usize) -> Coefficients {
        match *self {
            CoefficientSchedule::Constriction => CONSTRICTION,
            CoefficientSchedule::Evolving => {
                let t = iteration as f64;
                let n = n_iterations as f64;
                let progress = t / n;
                let remaining = (t - n) / n;
                Coefficients {
                    inertia: 0.4 * remaining * remaining + 0.4,
                    cognitive: -3.0 * progress + 3.5,
                    social: 3.0 * progress + 0.5,
                }
            }
            CoefficientSchedule::Fixed {
                inertia,
                cognitive,
                social,
            } => Coefficients {
                inertia,
                cognitive,
                social,
            },
        }
    }
}
