//! Null-space (free parameter) search engine over closed-form inverse
//! kinematics kernels.
//!
//! A closed-form ("analytic") IK kernel solves a specific mechanism, but
//! only with its redundant joints pinned to fixed values. This crate wraps
//! such kernels into a general solver: it sweeps the redundant degrees of
//! freedom over a deterministic grid, collects every kernel branch, rejects
//! candidates violating joint limits or colliding with the environment, and
//! ranks the survivors by joint-space proximity to a seed configuration.
//!
//! # Features
//!
//! - Kernels plug in through the [kernel::AnalyticKernel] trait; a stale or
//!   mismatched kernel is rejected at binding time by joint counts and a
//!   kinematics identity hash.
//! - The free parameter space is normalized to `[0,1]^k`; the grid step is
//!   the single knob trading search completeness against cost.
//! - Joint limit checks support wrap-around ranges for revolute joints.
//! - Collision filtering goes through the boolean [oracle::CollisionOracle]
//!   query; a parry3d mesh oracle ships behind the `collisions` feature.
//! - With a seed configuration, the solution nearest in joint space is
//!   returned; without one, the first found in deterministic grid order.
//! - "No solution" is a normal result, never an error: it is the expected
//!   outcome near singularities and outside the reachable workspace.
//! - Solvers are resolved from textual keys (`planar3 0.04`) through an
//!   explicitly owned [registry::SolverRegistry]; there is no global state.
//!
//! Sample closed-form kernels for planar arms (one with a redundant base
//! joint) live in [planar_kernels] and double as the test mechanisms.

pub mod parameterization;
pub mod kernel;
pub mod manipulator;
pub mod free_space;
pub mod search;
pub mod filter;
pub mod oracle;
pub mod solver;
pub mod registry;
pub mod errors;

pub mod utils;

#[cfg(feature = "collisions")]
pub mod collisions;

#[path = "kernels/planar.rs"]
pub mod planar_kernels;

#[cfg(test)]
mod tests;
