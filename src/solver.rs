//! The public solving contract: binds an analytic kernel to a manipulator
//! and answers `solve` / `solve_all` queries by searching the null space.

use std::sync::Arc;

use tracing::debug;

use crate::errors::{InitError, SolveError};
use crate::free_space::FreeParameterSpace;
use crate::kernel::{AnalyticKernel, IkReal, Joints, Solutions};
use crate::filter::SolutionFilter;
use crate::manipulator::Manipulator;
use crate::oracle::CollisionOracle;
use crate::parameterization::Parameterization;
use crate::search::{NullSpaceSearch, SearchBudget};

/// Default discretization step of the free parameter grid, matching the
/// registry default when a key carries no increment.
pub const DEFAULT_FREE_INCREMENT: IkReal = 0.04;

/// Construction time configuration of one solver instance.
#[derive(Debug, Clone)]
pub struct SolverOptions {
    /// Grid step inside [0,1] per free parameter; the sole search resolution
    /// knob. Smaller steps find more of the null space at cost
    /// O((1/increment)^k).
    pub free_increment: IkReal,

    /// Enable collision filtering. Requires a bound oracle; the mismatch is
    /// reported at initialization, not discovered mid-search.
    pub check_collisions: bool,

    /// Bound on each grid sweep; unlimited by default.
    pub budget: SearchBudget,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            free_increment: DEFAULT_FREE_INCREMENT,
            check_collisions: false,
            budget: SearchBudget::unlimited(),
        }
    }
}

impl SolverOptions {
    pub fn with_increment(free_increment: IkReal) -> Self {
        SolverOptions {
            free_increment,
            ..SolverOptions::default()
        }
    }
}

/// Analytic IK solver with null-space search. Composes the kernel, the
/// manipulator binding, the free parameter space and the solution filter
/// behind the uniform solving contract.
///
/// Construction validates the binding; a constructed solver can always
/// solve. No state beyond the immutable binding survives a solve call, so a
/// solver is freely shareable across threads as long as its collision
/// oracle serializes access to any shared environment.
pub struct IkSolver {
    kernel: Arc<dyn AnalyticKernel>,
    manipulator: Manipulator,
    space: FreeParameterSpace,
    oracle: Option<Arc<dyn CollisionOracle>>,
    options: SolverOptions,
}

impl IkSolver {
    /// Binds a kernel to a manipulator. Fails when the kernel's joint or
    /// free parameter counts, free joint indices, or kinematics identity
    /// hash disagree with the manipulator, when the increment is not
    /// positive, or when collision checking is enabled without an oracle.
    pub fn init(
        kernel: Arc<dyn AnalyticKernel>,
        manipulator: Manipulator,
        oracle: Option<Arc<dyn CollisionOracle>>,
        options: SolverOptions,
    ) -> Result<Self, InitError> {
        if kernel.num_joints() != manipulator.num_joints() {
            return Err(InitError::JointCountMismatch {
                kernel: kernel.num_joints(),
                manipulator: manipulator.num_joints(),
            });
        }
        if kernel.num_free_parameters() != manipulator.redundancy() {
            return Err(InitError::FreeParameterCountMismatch {
                kernel: kernel.num_free_parameters(),
                manipulator: manipulator.redundancy(),
            });
        }
        let free_joints = kernel.free_joints();
        if free_joints.len() != kernel.num_free_parameters() {
            return Err(InitError::FreeParameterCountMismatch {
                kernel: free_joints.len(),
                manipulator: manipulator.redundancy(),
            });
        }
        if let Some(&index) = free_joints.iter().find(|&&j| j >= manipulator.num_joints()) {
            return Err(InitError::FreeJointOutOfRange {
                index,
                num_joints: manipulator.num_joints(),
            });
        }
        if kernel.kinematics_hash() != manipulator.kinematics_hash() {
            return Err(InitError::KinematicsHashMismatch {
                kernel: kernel.kinematics_hash(),
                manipulator: manipulator.kinematics_hash().to_string(),
            });
        }
        if !(options.free_increment > 0.0) {
            return Err(InitError::BadIncrement(options.free_increment));
        }
        if options.check_collisions && oracle.is_none() {
            return Err(InitError::OracleUnbound);
        }

        let space = FreeParameterSpace::new(&manipulator, free_joints);
        debug!(
            joints = manipulator.num_joints(),
            free = free_joints.len(),
            increment = options.free_increment,
            hash = kernel.kinematics_hash(),
            "solver bound"
        );
        Ok(IkSolver {
            kernel,
            manipulator,
            space,
            oracle,
            options,
        })
    }

    /// The manipulator this solver was initialized against.
    pub fn manipulator(&self) -> &Manipulator {
        &self.manipulator
    }

    /// Dimension of the null space.
    pub fn num_free_parameters(&self) -> usize {
        self.kernel.num_free_parameters()
    }

    /// The configured grid step.
    pub fn free_increment(&self) -> IkReal {
        self.options.free_increment
    }

    /// Reads the normalized free parameter values implied by an arbitrary
    /// configuration, letting a caller re-seed a search from a known pose.
    pub fn free_parameters_of(&self, configuration: &[IkReal]) -> Result<Vec<IkReal>, SolveError> {
        if configuration.len() != self.manipulator.num_joints() {
            return Err(SolveError::SeedLengthMismatch {
                expected: self.manipulator.num_joints(),
                found: configuration.len(),
            });
        }
        let free_angles: Vec<IkReal> = self
            .kernel
            .free_joints()
            .iter()
            .map(|&j| configuration[j])
            .collect();
        Ok(self.space.from_physical(&free_angles))
    }

    /// Returns the single best configuration for the target, or `Ok(None)`
    /// when nothing reachable survives the filters (a normal outcome, not
    /// an error).
    ///
    /// With a seed, the surviving candidate nearest to it in joint space
    /// wins and the whole grid is searched; without one, the first survivor
    /// in deterministic grid order wins and the search short-circuits.
    /// Explicit `free` values (normalized, [0,1]) pin the null space to a
    /// single kernel call.
    pub fn solve(
        &self,
        target: &Parameterization,
        seed: Option<&[IkReal]>,
        free: Option<&[IkReal]>,
        check_collision: bool,
    ) -> Result<Option<Joints>, SolveError> {
        let filter = self.filter(check_collision)?;
        self.validate(target, seed, free)?;
        let search = self.search();

        let candidates = match free {
            Some(values) => search.at(&self.kernel_target(target), values, &filter),
            None => search.sweep(&self.kernel_target(target), &filter, seed.is_none()),
        };
        Ok(filter
            .select_best(candidates, seed)
            .map(|candidate| candidate.joints))
    }

    /// Returns every surviving configuration for the target, in discovery
    /// order. The sequence is finite (grid size times branches per kernel
    /// call) and empty, never an error, when nothing survives.
    pub fn solve_all(
        &self,
        target: &Parameterization,
        free: Option<&[IkReal]>,
        check_collision: bool,
    ) -> Result<Solutions, SolveError> {
        let filter = self.filter(check_collision)?;
        self.validate(target, None, free)?;
        let search = self.search();

        let candidates = match free {
            Some(values) => search.at(&self.kernel_target(target), values, &filter),
            None => search.sweep(&self.kernel_target(target), &filter, false),
        };
        Ok(candidates
            .into_iter()
            .map(|candidate| candidate.joints)
            .collect())
    }

    fn search(&self) -> NullSpaceSearch {
        NullSpaceSearch::new(
            self.kernel.as_ref(),
            &self.space,
            self.options.free_increment,
            &self.options.budget,
        )
    }

    fn filter(&self, check_collision: bool) -> Result<SolutionFilter, SolveError> {
        if !check_collision {
            return Ok(SolutionFilter::new(&self.manipulator, None));
        }
        match &self.oracle {
            Some(oracle) => Ok(SolutionFilter::new(&self.manipulator, Some(oracle.as_ref()))),
            None => Err(SolveError::OracleUnbound),
        }
    }

    fn validate(
        &self,
        target: &Parameterization,
        seed: Option<&[IkReal]>,
        free: Option<&[IkReal]>,
    ) -> Result<(), SolveError> {
        if target.kind() != self.kernel.ik_type() {
            return Err(SolveError::WrongParameterization {
                requested: target.kind(),
                supported: self.kernel.ik_type(),
            });
        }
        if let Some(seed) = seed {
            if seed.len() != self.manipulator.num_joints() {
                return Err(SolveError::SeedLengthMismatch {
                    expected: self.manipulator.num_joints(),
                    found: seed.len(),
                });
            }
        }
        if let Some(free) = free {
            if free.len() != self.kernel.num_free_parameters() {
                return Err(SolveError::FreeVectorLengthMismatch {
                    expected: self.kernel.num_free_parameters(),
                    found: free.len(),
                });
            }
        }
        Ok(())
    }

    /// The target handed to the kernel. The caller specifies the pose of
    /// the tool center point; the kernel solves for the flange, so the
    /// grasp offset is divided out of full pose targets. Weaker constraint
    /// kinds carry no orientation to compose with and pass through.
    fn kernel_target(&self, target: &Parameterization) -> Parameterization {
        match target {
            Parameterization::Transform6D(pose) => {
                Parameterization::Transform6D(pose * self.manipulator.tool().inverse())
            }
            other => other.clone(),
        }
    }
}
