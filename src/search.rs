//! Minimum group count under size and spread constraints.
//!
//! Finds the smallest `k` such that clustering into `k` groups keeps
//!
//! - every group at or below `max_group_size` members, and
//! - the aggregate (by default size-weighted mean) of per-group furthest
//!   distances at or below `max_distance`.
//!
//! # Search
//!
//! Clustering is the expensive step, so candidates are never scanned
//! linearly. The search keeps the largest count known to violate the
//! constraints and the smallest count known to satisfy them:
//!
//! ```text
//! invalid ──────────── candidate ──────────── valid
//!    0    jump forward while no valid count is known, then bisect
//! ```
//!
//! and stops once `invalid + 1 == valid`. More groups means smaller groups,
//! so "exceeded" is assumed monotone in `k`; the forward jump is a heuristic
//! only and never affects which count is returned.
//!
//! `k == n` always satisfies valid constraints (singleton groups, zero
//! spread), which bounds the loop.

use rand::RngCore;

use crate::cluster::{ClusterEngine, Strategy};
use crate::error::{Error, Result};
use crate::metrics::{ClusterResult, DistanceAggregate};

/// Constraints and strategy for one search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Maximum members per group; `None` is unlimited.
    pub max_group_size: Option<usize>,
    /// Maximum aggregate furthest distance.
    pub max_distance: f64,
    /// Clustering backend.
    pub strategy: Strategy,
    /// How per-group distances are aggregated.
    pub aggregate: DistanceAggregate,
}

impl SearchConfig {
    /// Unlimited group size, balanced strategy, weighted mean aggregate.
    pub fn new(max_distance: f64) -> Self {
        Self {
            max_group_size: None,
            max_distance,
            strategy: Strategy::Balanced,
            aggregate: DistanceAggregate::WeightedMean,
        }
    }

    /// Cap the member count per group.
    pub fn with_max_group_size(mut self, max_group_size: usize) -> Self {
        self.max_group_size = Some(max_group_size);
        self
    }

    /// Set the clustering strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the distance aggregate.
    pub fn with_aggregate(mut self, aggregate: DistanceAggregate) -> Self {
        self.aggregate = aggregate;
        self
    }

    /// Reject constraints no partition can satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.max_group_size == Some(0) {
            return Err(Error::InvalidConstraint {
                name: "max_group_size",
                message: "must be at least 1 (use None for unlimited)",
            });
        }
        if !(self.max_distance >= 0.0) {
            return Err(Error::InvalidConstraint {
                name: "max_distance",
                message: "must be a non-negative number",
            });
        }
        Ok(())
    }

    fn exceeds(&self, result: &ClusterResult) -> (bool, f64) {
        let distance = result.aggregate_distance(self.aggregate);
        let too_large = self
            .max_group_size
            .is_some_and(|m| result.max_group_size > m);
        (too_large || distance > self.max_distance, distance)
    }
}

/// What one clustering attempt showed.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Both constraints hold.
    Valid {
        /// Aggregate furthest distance.
        distance: f64,
    },
    /// At least one constraint is violated.
    Exceeded {
        /// Largest group's member count.
        largest_group: usize,
        /// Aggregate furthest distance.
        distance: f64,
    },
    /// The backend returned a different group count; treated as exceeded.
    Inconsistent {
        /// Groups actually produced.
        produced: usize,
    },
}

/// A single evaluated candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Requested group count.
    pub group_count: usize,
    /// Result of the attempt.
    pub outcome: Outcome,
}

/// Every candidate a search evaluated, in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchTrace {
    /// Evaluations in the order they ran.
    pub evaluations: Vec<Evaluation>,
}

impl SearchTrace {
    /// Number of clustering attempts.
    pub fn len(&self) -> usize {
        self.evaluations.len()
    }

    /// Whether no clustering was needed.
    pub fn is_empty(&self) -> bool {
        self.evaluations.is_empty()
    }

    /// Requested group counts, in evaluation order.
    pub fn group_counts(&self) -> Vec<usize> {
        self.evaluations.iter().map(|e| e.group_count).collect()
    }

    fn outcome_at(&self, group_count: usize) -> Option<&Outcome> {
        self.evaluations
            .iter()
            .find(|e| e.group_count == group_count)
            .map(|e| &e.outcome)
    }

    /// Whether `group_count` was evaluated and satisfied the constraints.
    pub fn was_valid(&self, group_count: usize) -> bool {
        matches!(self.outcome_at(group_count), Some(Outcome::Valid { .. }))
    }

    /// Whether `group_count` was evaluated and violated the constraints.
    pub fn was_rejected(&self, group_count: usize) -> bool {
        self.outcome_at(group_count)
            .is_some_and(|o| !matches!(o, Outcome::Valid { .. }))
    }
}

/// Result of a constrained search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// The partition at the smallest valid group count.
    pub result: ClusterResult,
    /// How the count was found.
    pub trace: SearchTrace,
}

/// Bisection search over group counts.
#[derive(Debug, Clone, Default)]
pub struct ConstrainedSearch {
    engine: ClusterEngine,
}

impl ConstrainedSearch {
    /// Search using the given engine.
    pub fn new(engine: ClusterEngine) -> Self {
        Self { engine }
    }

    /// The underlying engine.
    pub fn engine(&self) -> &ClusterEngine {
        &self.engine
    }

    /// Find the smallest group count satisfying `config`.
    pub fn search(&self, points: &[Vec<f64>], config: &SearchConfig) -> Result<SearchOutcome> {
        let mut rng = self.engine.rng();
        self.search_with(points, config, &mut rng)
    }

    /// Search drawing randomness from a caller-owned RNG.
    #[tracing::instrument(level = "debug", skip_all, fields(n = points.len()))]
    pub(crate) fn search_with(
        &self,
        points: &[Vec<f64>],
        config: &SearchConfig,
        rng: &mut dyn RngCore,
    ) -> Result<SearchOutcome> {
        config.validate()?;

        let n = points.len();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        if n == 1 {
            return Ok(SearchOutcome {
                result: ClusterResult {
                    assignment: vec![0],
                    max_group_size: 1,
                    furthest_distances: vec![0.0],
                },
                trace: SearchTrace::default(),
            });
        }

        let mut candidate = config.max_group_size.map_or(1, |m| n.div_ceil(m));
        let mut largest_invalid = 0usize;
        let mut smallest_valid: Option<usize> = None;
        let mut best: Option<ClusterResult> = None;
        let mut trace = SearchTrace::default();

        while smallest_valid != Some(largest_invalid + 1) {
            let outcome = match self.engine.cluster_with(points, candidate, config.strategy, rng) {
                Ok(assignment) => {
                    let result = ClusterResult::measure(points, assignment);
                    let (exceeded, distance) = config.exceeds(&result);
                    if exceeded {
                        Outcome::Exceeded {
                            largest_group: result.max_group_size,
                            distance,
                        }
                    } else {
                        best = Some(result);
                        Outcome::Valid { distance }
                    }
                }
                Err(Error::ClusteringInconsistency { requested, produced }) => {
                    tracing::warn!(requested, produced, "backend returned wrong group count");
                    Outcome::Inconsistent { produced }
                }
                Err(e) => return Err(e),
            };
            tracing::debug!(group_count = candidate, ?outcome, "evaluated");

            let next = match (&outcome, smallest_valid) {
                (Outcome::Valid { .. }, _) => {
                    smallest_valid = Some(candidate);
                    (largest_invalid + candidate) / 2
                }
                (_, Some(valid)) => {
                    largest_invalid = candidate;
                    (largest_invalid + valid).div_ceil(2)
                }
                (_, None) => {
                    largest_invalid = candidate;
                    jump(candidate, &outcome, config).min(n)
                }
            };
            trace.evaluations.push(Evaluation {
                group_count: candidate,
                outcome,
            });
            candidate = next;
        }

        let result = best.ok_or(Error::ClusteringInconsistency {
            requested: candidate,
            produced: 0,
        })?;
        tracing::info!(
            groups = result.n_groups(),
            evaluations = trace.len(),
            "found valid clustering"
        );
        Ok(SearchOutcome { result, trace })
    }
}

/// Next candidate while no valid count is known.
///
/// At least one more group; more when the size overshoot or the distance
/// ratio says so. Points tend to spread over a plane rather than a line, so
/// the ratio is squared when starting from a single group.
fn jump(candidate: usize, outcome: &Outcome, config: &SearchConfig) -> usize {
    let mut next = candidate + 1;
    if let Outcome::Exceeded {
        largest_group,
        distance,
    } = *outcome
    {
        if let Some(m) = config.max_group_size {
            if largest_group > m {
                next = next.max(candidate + largest_group.div_ceil(m));
            }
        }
        if distance > config.max_distance {
            let mut ratio = distance / config.max_distance;
            if candidate == 1 {
                ratio *= ratio;
            }
            // Saturating cast: an infinite ratio jumps straight to the cap.
            next = next.max((candidate as f64 * ratio).ceil() as usize);
        }
    }
    next
}

/// Smallest partition of `points` with at most `max_group_size` members per
/// group and a size-weighted mean furthest distance of at most `max_distance`.
///
/// Convenience wrapper over [`ConstrainedSearch`] with a default engine.
pub fn search(
    points: &[Vec<f64>],
    max_group_size: Option<usize>,
    max_distance: f64,
    strategy: Strategy,
) -> Result<ClusterResult> {
    let mut config = SearchConfig::new(max_distance).with_strategy(strategy);
    config.max_group_size = max_group_size;
    ConstrainedSearch::default()
        .search(points, &config)
        .map(|outcome| outcome.result)
}
