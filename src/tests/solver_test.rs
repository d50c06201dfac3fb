//! End-to-end solving contract: round trips through forward kinematics,
//! ranking against seeds, error taxonomy and the degenerate zero-redundancy
//! path.

use std::sync::Arc;

use nalgebra::Vector3;

use crate::errors::{InitError, SolveError};
use crate::kernel::IkReal;
use crate::oracle::FnOracle;
use crate::parameterization::{ParamKind, Parameterization, Pose};
use crate::planar_kernels::{PlanarArm2, PlanarArm3};
use crate::solver::{IkSolver, SolverOptions};
use crate::tests::test_utils::{arm3_solver, assert_joints_close, random_nonsingular_config, test_arm};

fn target_of(config: &[IkReal]) -> Parameterization {
    Parameterization::Translation3D(test_arm().forward(config))
}

#[test]
fn test_round_trip_with_explicit_free_values() {
    let solver = arm3_solver(0.05).expect("consistent binding");
    let mut rng = rand::rng();

    for _ in 0..50 {
        let config = random_nonsingular_config(&mut rng);
        let target = target_of(&config);
        let free = solver
            .free_parameters_of(&config)
            .expect("configuration has the right length");

        let found = solver
            .solve(&target, Some(&config), Some(&free), false)
            .expect("valid request")
            .expect("the generating configuration is a solution");
        assert_joints_close(&found, &config, 1e-6);
    }
}

#[test]
fn test_round_trip_over_the_grid() {
    let solver = arm3_solver(0.02).expect("consistent binding");
    let config = vec![0.4, -0.7, 1.1];
    let target = target_of(&config);

    let found = solver
        .solve(&target, Some(&config), None, false)
        .expect("valid request")
        .expect("target is reachable");

    // The grid quantizes the free joint, so exact recovery is not expected,
    // but the result must stay near the seed and reach the target exactly.
    assert_joints_close(&found, &config, 0.6);
    let reached = test_arm().forward(&found);
    let wanted = test_arm().forward(&config);
    assert!((reached - wanted).norm() < 1e-9);
}

#[test]
fn test_all_solutions_reach_the_target() {
    let solver = arm3_solver(0.04).expect("consistent binding");
    let target_position = Vector3::new(0.6, 0.2, 0.0);
    let target = Parameterization::Translation3D(target_position);

    let solutions = solver.solve_all(&target, None, false).expect("valid request");
    assert!(!solutions.is_empty());
    for joints in &solutions {
        assert!((test_arm().forward(joints) - target_position).norm() < 1e-9);
    }
}

#[test]
fn test_unreachable_target_is_empty_not_error() {
    let solver = arm3_solver(0.04).expect("consistent binding");
    let target = Parameterization::Translation3D(Vector3::new(5.0, 0.0, 0.0));

    assert_eq!(solver.solve(&target, None, None, false), Ok(None));
    let seed = vec![0.0, 0.0, 0.0];
    assert_eq!(solver.solve(&target, Some(&seed), None, false), Ok(None));
    assert_eq!(solver.solve_all(&target, None, false), Ok(Vec::new()));
}

#[test]
fn test_nearest_seed_selection() {
    let solver = arm3_solver(0.02).expect("consistent binding");
    let target = Parameterization::Translation3D(Vector3::new(0.6, 0.0, 0.0));

    // Two seeds on opposite sides of the redundant base joint's range
    let seed_a = vec![0.8, -0.5, 0.5];
    let seed_b = vec![-0.8, 0.5, -0.5];

    let sol_a = solver
        .solve(&target, Some(&seed_a), None, false)
        .expect("valid request")
        .expect("reachable");
    let sol_b = solver
        .solve(&target, Some(&seed_b), None, false)
        .expect("valid request")
        .expect("reachable");

    let free_of = |config: &[IkReal]| solver.free_parameters_of(config).expect("length ok")[0];
    let (va, vb) = (free_of(&seed_a), free_of(&seed_b));

    let picked_a = free_of(&sol_a);
    let picked_b = free_of(&sol_b);
    assert!(
        (picked_a - va).abs() < (picked_a - vb).abs(),
        "solution for seed A sits at {} between seeds {} and {}",
        picked_a,
        va,
        vb
    );
    assert!(
        (picked_b - vb).abs() < (picked_b - va).abs(),
        "solution for seed B sits at {} between seeds {} and {}",
        picked_b,
        vb,
        va
    );
}

#[test]
fn test_limit_invariant() {
    let arm = test_arm();
    // Elbow restricted to the up branch, shoulder to a narrow band
    let restricted = arm.manipulator().with_joints(vec![
        crate::manipulator::JointSpec::revolute("base"),
        crate::manipulator::JointSpec::revolute_limited("shoulder", -1.2, 1.2),
        crate::manipulator::JointSpec::revolute_limited("elbow", 0.0, 2.9),
    ]);
    let solver = IkSolver::init(
        Arc::new(arm),
        restricted,
        None,
        SolverOptions::with_increment(0.04),
    )
    .expect("limits do not change the geometry hash");

    let target = Parameterization::Translation3D(Vector3::new(0.6, 0.2, 0.0));
    let solutions = solver.solve_all(&target, None, false).expect("valid request");
    assert!(!solutions.is_empty());
    for joints in &solutions {
        assert!(solver.manipulator().limits().compliant(joints), "{:?}", joints);
        assert!(joints[2] >= 0.0 && joints[2] <= 2.9);
    }
}

#[test]
fn test_collision_invariant() {
    let arm = test_arm();
    // The oracle declares every elbow-down configuration colliding
    let oracle = Arc::new(FnOracle::new(|joints: &[IkReal]| joints[2] < 0.0));
    let solver = IkSolver::init(
        Arc::new(arm),
        arm.manipulator(),
        Some(oracle),
        SolverOptions::with_increment(0.04),
    )
    .expect("consistent binding");

    let target = Parameterization::Translation3D(Vector3::new(0.6, 0.2, 0.0));
    let unchecked = solver.solve_all(&target, None, false).expect("valid request");
    let checked = solver.solve_all(&target, None, true).expect("valid request");

    assert!(unchecked.iter().any(|joints| joints[2] < 0.0));
    assert!(!checked.is_empty());
    assert!(checked.len() < unchecked.len());
    for joints in &checked {
        assert!(joints[2] >= 0.0, "colliding configuration returned: {:?}", joints);
    }
}

#[test]
fn test_wrong_parameterization_is_recoverable() {
    let solver = arm3_solver(0.04).expect("consistent binding");
    let pose_target = Parameterization::from_pose(&Pose::identity());

    let result = solver.solve(&pose_target, None, None, false);
    assert_eq!(
        result,
        Err(SolveError::WrongParameterization {
            requested: ParamKind::Transform6D,
            supported: ParamKind::Translation3D,
        })
    );
    // The solver stays usable afterwards
    let target = Parameterization::Translation3D(Vector3::new(0.6, 0.2, 0.0));
    assert!(solver.solve(&target, None, None, false).expect("valid").is_some());
}

#[test]
fn test_collision_request_without_oracle() {
    let solver = arm3_solver(0.04).expect("consistent binding");
    let target = Parameterization::Translation3D(Vector3::new(0.6, 0.2, 0.0));
    assert_eq!(
        solver.solve(&target, None, None, true),
        Err(SolveError::OracleUnbound)
    );
}

#[test]
fn test_stale_kernel_rejected() {
    let kernel = PlanarArm3::new(0.5, 0.4, 0.25);
    // Manipulator computed for slightly different geometry
    let manipulator = PlanarArm3::new(0.5, 0.4, 0.26).manipulator();
    let result = IkSolver::init(
        Arc::new(kernel),
        manipulator,
        None,
        SolverOptions::default(),
    );
    assert!(matches!(
        result.err(),
        Some(InitError::KinematicsHashMismatch { .. })
    ));
}

#[test]
fn test_joint_count_mismatch_rejected() {
    let kernel = PlanarArm2::new(0.5, 0.4);
    let manipulator = test_arm().manipulator();
    let result = IkSolver::init(
        Arc::new(kernel),
        manipulator,
        None,
        SolverOptions::default(),
    );
    assert_eq!(
        result.err(),
        Some(InitError::JointCountMismatch {
            kernel: 2,
            manipulator: 3
        })
    );
}

#[test]
fn test_zero_redundancy_arm() {
    let arm = PlanarArm2::new(0.5, 0.4);
    let solver = IkSolver::init(
        Arc::new(arm),
        arm.manipulator(),
        None,
        SolverOptions::default(),
    )
    .expect("consistent binding");
    assert_eq!(solver.num_free_parameters(), 0);

    let target_position = Vector3::new(0.6, 0.3, 0.0);
    let target = Parameterization::Translation3D(target_position);

    // The whole "grid" is one empty point; both elbow branches come back
    let solutions = solver.solve_all(&target, None, false).expect("valid request");
    assert_eq!(solutions.len(), 2);
    for joints in &solutions {
        assert!((arm.forward(joints) - target_position).norm() < 1e-9);
    }

    // Single-best without a seed is the first branch found
    let best = solver
        .solve(&target, None, None, false)
        .expect("valid request")
        .expect("reachable");
    assert_eq!(best, solutions[0]);
}

#[test]
fn test_free_parameters_of_reads_base_joint() {
    let solver = arm3_solver(0.04).expect("consistent binding");
    let values = solver
        .free_parameters_of(&[0.0, 0.3, -0.2])
        .expect("length ok");
    assert_eq!(values.len(), 1);
    // Base joint zero sits in the middle of the [-π, π] range
    assert!((values[0] - 0.5).abs() < 1e-12);

    assert_eq!(
        solver.free_parameters_of(&[0.0, 0.0]).err(),
        Some(SolveError::SeedLengthMismatch {
            expected: 3,
            found: 2
        })
    );
}
