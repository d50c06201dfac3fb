//! Error taxonomy of the solver.
//!
//! Binding and configuration problems surface as [InitError] when the solver
//! is created; malformed solve calls surface as [SolveError]. "No solution
//! found" is never an error: `solve` returns `Ok(None)` and `solve_all`
//! returns an empty set in that case.

use std::error::Error;
use std::fmt;

use crate::parameterization::ParamKind;

/// Fatal initialization failures. The solver is not constructed when any of
/// these is reported.
#[derive(Debug, Clone, PartialEq)]
pub enum InitError {
    /// The kernel was generated for a different joint count than the
    /// manipulator has.
    JointCountMismatch { kernel: usize, manipulator: usize },

    /// The kernel's redundancy dimension disagrees with the manipulator.
    FreeParameterCountMismatch { kernel: usize, manipulator: usize },

    /// A kernel-declared free joint index is outside the joint chain.
    FreeJointOutOfRange { index: usize, num_joints: usize },

    /// The kernel was generated for different mechanism geometry (stale
    /// kernel after a geometry change).
    KinematicsHashMismatch { kernel: String, manipulator: String },

    /// The free parameter grid increment must be positive.
    BadIncrement(f64),

    /// Collision checking was enabled but no collision oracle is bound.
    OracleUnbound,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InitError::JointCountMismatch { kernel, manipulator } => write!(
                f,
                "Joint count mismatch: kernel solves {} joints, manipulator has {}",
                kernel, manipulator
            ),
            InitError::FreeParameterCountMismatch { kernel, manipulator } => write!(
                f,
                "Free parameter count mismatch: kernel has {}, manipulator declares {}",
                kernel, manipulator
            ),
            InitError::FreeJointOutOfRange { index, num_joints } => write!(
                f,
                "Free joint index {} is out of range for a chain of {} joints",
                index, num_joints
            ),
            InitError::KinematicsHashMismatch { kernel, manipulator } => write!(
                f,
                "Kinematics hash mismatch (stale kernel?): kernel '{}', manipulator '{}'",
                kernel, manipulator
            ),
            InitError::BadIncrement(increment) => {
                write!(f, "Free increment must be positive, got {}", increment)
            }
            InitError::OracleUnbound => {
                write!(f, "Collision checking enabled but no collision oracle bound")
            }
        }
    }
}

impl Error for InitError {}

/// Recoverable caller errors of a solve call. Candidates failing limits or
/// collision checks are absorbed silently; only malformed requests surface
/// here.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The target parameterization kind is not the one the bound kernel
    /// natively solves.
    WrongParameterization { requested: ParamKind, supported: ParamKind },

    /// The seed configuration length does not match the joint count.
    SeedLengthMismatch { expected: usize, found: usize },

    /// The explicit free parameter vector length does not match the
    /// redundancy dimension.
    FreeVectorLengthMismatch { expected: usize, found: usize },

    /// Collision checking requested on a solver constructed without an
    /// oracle.
    OracleUnbound,
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolveError::WrongParameterization { requested, supported } => write!(
                f,
                "Parameterization {:?} is not solvable by this kernel (supports {:?})",
                requested, supported
            ),
            SolveError::SeedLengthMismatch { expected, found } => write!(
                f,
                "Seed configuration length {} does not match {} joints",
                found, expected
            ),
            SolveError::FreeVectorLengthMismatch { expected, found } => write!(
                f,
                "Free parameter vector length {} does not match {} free parameters",
                found, expected
            ),
            SolveError::OracleUnbound => {
                write!(f, "Collision checking requested but no collision oracle bound")
            }
        }
    }
}

impl Error for SolveError {}

/// Failures of textual solver lookup in the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    EmptyKey,
    UnknownSolver(String),
    BadIncrement(String),
    Init(InitError),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RegistryError::EmptyKey => write!(f, "Empty solver key"),
            RegistryError::UnknownSolver(name) => {
                write!(f, "No solver registered under the name '{}'", name)
            }
            RegistryError::BadIncrement(token) => {
                write!(f, "Cannot parse free increment '{}'", token)
            }
            RegistryError::Init(err) => write!(f, "Solver construction failed: {}", err),
        }
    }
}

impl Error for RegistryError {}

impl From<InitError> for RegistryError {
    fn from(err: InitError) -> Self {
        RegistryError::Init(err)
    }
}
