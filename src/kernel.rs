//! Contract for closed-form ("analytic") IK kernels.
//!
//! A kernel solves the inverse kinematics of one specific mechanism, but only
//! for fixed values of its redundant (free) joints. The null-space search
//! engine in this crate turns such a kernel into a general solver by sweeping
//! the free joints. Kernels are pure: all iteration, filtering and ranking
//! happens outside of them.

use crate::parameterization::{ParamKind, Parameterization};

/// The single real-number precision used for all angles, distances and the
/// normalized [0,1] free parameter range.
pub type IkReal = f64;

/// One joint configuration of the mechanism, ordered base to tip.
/// The length equals the number of controllable joints.
pub type Joints = Vec<IkReal>;

/// Multiple joint configurations, as returned by `solve_all`.
pub type Solutions = Vec<Joints>;

/// A raw kernel branch together with the normalized free parameter vector
/// that produced it. Transient: produced during one search, consumed by the
/// solution filter, never persisted.
#[derive(Debug, Clone)]
pub struct CandidateSolution {
    pub joints: Joints,

    /// Normalized free values in [0,1], length `num_free_parameters`.
    pub free: Vec<IkReal>,
}

/// Closed-form per-mechanism IK kernel. One instance exists per supported
/// mechanism; the crate ships planar sample kernels in
/// [crate::planar_kernels], real deployments supply their own.
pub trait AnalyticKernel: Send + Sync {
    /// Number of controllable joints of the mechanism this kernel was
    /// generated for.
    fn num_joints(&self) -> usize;

    /// Dimension of the null space (number of redundant joints).
    fn num_free_parameters(&self) -> usize;

    /// Indices of the redundant joints inside the joint chain. The values
    /// passed to [AnalyticKernel::solve] fix exactly these joints.
    /// Length equals `num_free_parameters()`.
    fn free_joints(&self) -> &[usize];

    /// The parameterization kind this kernel natively solves. Targets of any
    /// other kind are rejected by the solver before the kernel is called.
    fn ik_type(&self) -> ParamKind;

    /// Content hash identifying the exact mechanism geometry the kernel was
    /// generated for. Compared against the manipulator's own hash when the
    /// solver is initialized, guarding against stale kernels after the
    /// mechanism geometry changed.
    fn kinematics_hash(&self) -> String;

    /// Solve for the given target with the free joints pinned to `free`
    /// (physical joint angles, length `num_free_parameters()`).
    ///
    /// Returns zero or more branches. Zero branches is a normal outcome near
    /// kinematic singularities or outside the reachable workspace, never an
    /// error.
    fn solve(&self, target: &Parameterization, free: &[IkReal]) -> Solutions;
}
