//! Shared helpers for the cross-module tests.

use std::sync::Arc;

use anyhow::{Context, Result};
use rand::Rng;

use crate::filter::joint_distance;
use crate::kernel::IkReal;
use crate::planar_kernels::PlanarArm3;
use crate::solver::{IkSolver, SolverOptions};

/// The redundant three-link arm all solver tests run against.
pub fn test_arm() -> PlanarArm3 {
    PlanarArm3::new(0.5, 0.4, 0.25)
}

pub fn arm3_solver(increment: IkReal) -> Result<IkSolver> {
    let arm = test_arm();
    IkSolver::init(
        Arc::new(arm),
        arm.manipulator(),
        None,
        SolverOptions::with_increment(increment),
    )
    .context("binding the three-link planar arm")
}

/// A random configuration away from the stretched/folded elbow
/// singularities, where both IK branches are well separated.
pub fn random_nonsingular_config<R: Rng>(rng: &mut R) -> Vec<IkReal> {
    let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    vec![
        rng.random_range(-3.0..3.0),
        rng.random_range(-2.5..2.5),
        sign * rng.random_range(0.3..2.5),
    ]
}

pub fn assert_joints_close(actual: &[IkReal], expected: &[IkReal], tolerance: IkReal) {
    let periodic = vec![true; actual.len()];
    let distance = joint_distance(actual, expected, &periodic);
    assert!(
        distance < tolerance,
        "joint distance {} exceeds {}: {:?} vs {:?}",
        distance,
        tolerance,
        actual,
        expected
    );
}
