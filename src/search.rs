//! The null-space search: sweeping the free parameter grid, calling the
//! analytic kernel per grid point and accumulating the candidates that pass
//! the solution filter.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::free_space::FreeParameterSpace;
use crate::kernel::{AnalyticKernel, CandidateSolution, IkReal};
use crate::filter::SolutionFilter;
use crate::parameterization::Parameterization;

/// Caller-supplied bound on one grid search. When exhausted, the search
/// stops and reports whatever it has found so far; running out of budget is
/// never an error, it merely means "no solution found" when nothing was
/// collected yet.
#[derive(Debug, Clone, Default)]
pub struct SearchBudget {
    /// Maximum number of kernel invocations (grid points visited).
    pub max_kernel_calls: Option<usize>,

    /// Wall clock limit for the whole sweep.
    pub time_limit: Option<Duration>,
}

impl SearchBudget {
    /// No bounds, the grid is always exhausted.
    pub fn unlimited() -> Self {
        SearchBudget::default()
    }
}

pub(crate) struct NullSpaceSearch<'a> {
    kernel: &'a dyn AnalyticKernel,
    space: &'a FreeParameterSpace,
    increment: IkReal,
    budget: &'a SearchBudget,
}

impl<'a> NullSpaceSearch<'a> {
    pub(crate) fn new(
        kernel: &'a dyn AnalyticKernel,
        space: &'a FreeParameterSpace,
        increment: IkReal,
        budget: &'a SearchBudget,
    ) -> Self {
        NullSpaceSearch {
            kernel,
            space,
            increment,
            budget,
        }
    }

    /// Single kernel call with the free joints pinned to the given
    /// normalized values. Survivors keep the pinned vector as provenance.
    pub(crate) fn at(
        &self,
        target: &Parameterization,
        free: &[IkReal],
        filter: &SolutionFilter,
    ) -> Vec<CandidateSolution> {
        let physical = self.space.to_physical(free);
        self.kernel
            .solve(target, &physical)
            .into_iter()
            .filter(|joints| filter.admissible(joints))
            .map(|joints| CandidateSolution {
                joints,
                free: free.to_vec(),
            })
            .collect()
    }

    /// Full sweep over the free parameter grid in its deterministic order.
    ///
    /// With `first_only` the sweep stops at the first grid point yielding a
    /// surviving candidate; that is only sound when no seed ranking follows,
    /// because a later grid point can still be closer to a seed. The
    /// nearest-to-seed path always exhausts the grid (or the budget).
    pub(crate) fn sweep(
        &self,
        target: &Parameterization,
        filter: &SolutionFilter,
        first_only: bool,
    ) -> Vec<CandidateSolution> {
        let grid = self.space.grid(self.increment);
        debug!(
            grid_points = grid.len(),
            increment = self.increment,
            first_only,
            "null space sweep"
        );

        let started = Instant::now();
        let mut kernel_calls = 0usize;
        let mut found = Vec::new();

        for point in grid {
            if let Some(max_calls) = self.budget.max_kernel_calls {
                if kernel_calls >= max_calls {
                    debug!(kernel_calls, "kernel call budget exhausted");
                    break;
                }
            }
            if let Some(limit) = self.budget.time_limit {
                if started.elapsed() >= limit {
                    debug!(elapsed = ?started.elapsed(), "time budget exhausted");
                    break;
                }
            }

            kernel_calls += 1;
            let survivors = self.at(target, &point, filter);
            if !survivors.is_empty() {
                trace!(?point, branches = survivors.len(), "grid point yielded candidates");
                found.extend(survivors);
                if first_only {
                    break;
                }
            }
        }

        debug!(kernel_calls, candidates = found.len(), "sweep finished");
        found
    }
}
