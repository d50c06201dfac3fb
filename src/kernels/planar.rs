//! Sample analytic kernels: planar arms with two and three revolute joints.
//!
//! These play the role the statically embedded per-mechanism solvers play in
//! a production deployment: each one is a pure closed-form kernel the search
//! engine can drive. The two-link arm has no redundancy; the three-link arm
//! reaching a point in the plane has one redundant joint (the base joint),
//! giving the null-space search something real to sweep. Both also expose
//! forward kinematics so solutions can be cross-checked against the target.
//!
//! All geometry lives in the XY plane; targets with a significant Z
//! component are unreachable by construction.

use std::f64::consts::PI;

use nalgebra::Vector3;

use crate::kernel::{AnalyticKernel, IkReal, Solutions};
use crate::manipulator::{JointSpec, Manipulator};
use crate::parameterization::{ParamKind, Parameterization, Pose};

/// Targets further out of the arm plane than this are unreachable.
const PLANE_TOLERANCE: IkReal = 1e-6;

/// Tolerance on the elbow cosine: targets marginally outside the annulus
/// from numeric noise still count as boundary-reachable.
const REACH_EPSILON: IkReal = 1e-9;

/// Below this elbow angle the up and down branches are numerically the same
/// configuration and only one is reported.
const BRANCH_MERGE: IkReal = 1e-6;

fn wrap_pi(angle: IkReal) -> IkReal {
    let two_pi = 2.0 * PI;
    let wrapped = ((angle % two_pi) + two_pi) % two_pi;
    if wrapped > PI { wrapped - two_pi } else { wrapped }
}

/// Closed-form solution of the two-link subproblem: reach `(dx, dy)` with
/// links `la`, `lb`. Returns (shoulder, elbow) pairs, elbow-up and
/// elbow-down, or nothing when the point is outside the annulus.
fn two_link(dx: IkReal, dy: IkReal, la: IkReal, lb: IkReal) -> Vec<(IkReal, IkReal)> {
    let r2 = dx * dx + dy * dy;
    let cos_elbow = (r2 - la * la - lb * lb) / (2.0 * la * lb);
    if cos_elbow < -1.0 - REACH_EPSILON || cos_elbow > 1.0 + REACH_EPSILON {
        return Vec::new();
    }
    let cos_elbow = cos_elbow.clamp(-1.0, 1.0);
    let elbow = cos_elbow.acos();

    let mut pairs = Vec::with_capacity(2);
    for b in [elbow, -elbow] {
        let shoulder = dy.atan2(dx) - (lb * b.sin()).atan2(la + lb * b.cos());
        pairs.push((wrap_pi(shoulder), wrap_pi(b)));
        if elbow.abs() < BRANCH_MERGE {
            break; // Fully stretched or folded, both branches coincide
        }
    }
    pairs
}

fn target_point(target: &Parameterization) -> Option<Vector3<IkReal>> {
    let point = target.translation()?;
    if point.z.abs() > PLANE_TOLERANCE {
        return None;
    }
    Some(point)
}

fn unit(angle: IkReal) -> Vector3<IkReal> {
    Vector3::new(angle.cos(), angle.sin(), 0.0)
}

/// Two revolute joints, no redundancy: the degenerate case where the
/// null-space search collapses to a single kernel call.
#[derive(Debug, Clone, Copy)]
pub struct PlanarArm2 {
    pub l1: IkReal,
    pub l2: IkReal,
}

impl PlanarArm2 {
    pub fn new(l1: IkReal, l2: IkReal) -> Self {
        PlanarArm2 { l1, l2 }
    }

    /// Position of the arm tip for the given joint angles.
    pub fn forward(&self, joints: &[IkReal]) -> Vector3<IkReal> {
        self.l1 * unit(joints[0]) + self.l2 * unit(joints[0] + joints[1])
    }

    /// A manipulator binding matching this arm: unconstrained revolute
    /// joints and the arm's own kinematics hash.
    pub fn manipulator(&self) -> Manipulator {
        Manipulator::new(
            vec![JointSpec::revolute("shoulder"), JointSpec::revolute("elbow")],
            0,
            Pose::identity(),
            self.kinematics_hash(),
        )
    }
}

impl AnalyticKernel for PlanarArm2 {
    fn num_joints(&self) -> usize {
        2
    }

    fn num_free_parameters(&self) -> usize {
        0
    }

    fn free_joints(&self) -> &[usize] {
        &[]
    }

    fn ik_type(&self) -> ParamKind {
        ParamKind::Translation3D
    }

    fn kinematics_hash(&self) -> String {
        format!("planar2 l1={:.9} l2={:.9}", self.l1, self.l2)
    }

    fn solve(&self, target: &Parameterization, _free: &[IkReal]) -> Solutions {
        let point = match target_point(target) {
            Some(point) => point,
            None => return Vec::new(),
        };
        two_link(point.x, point.y, self.l1, self.l2)
            .into_iter()
            .map(|(q1, q2)| vec![q1, q2])
            .collect()
    }
}

/// Three revolute joints reaching a point in the plane: one redundant
/// degree of freedom. The base joint is the free parameter; with it pinned,
/// the remainder is the closed-form two-link subproblem.
#[derive(Debug, Clone, Copy)]
pub struct PlanarArm3 {
    pub l1: IkReal,
    pub l2: IkReal,
    pub l3: IkReal,
}

const PLANAR3_FREE_JOINTS: [usize; 1] = [0];

impl PlanarArm3 {
    pub fn new(l1: IkReal, l2: IkReal, l3: IkReal) -> Self {
        PlanarArm3 { l1, l2, l3 }
    }

    /// Position of the arm tip for the given joint angles (relative angles,
    /// base to tip).
    pub fn forward(&self, joints: &[IkReal]) -> Vector3<IkReal> {
        let a1 = joints[0];
        let a2 = joints[0] + joints[1];
        let a3 = a2 + joints[2];
        self.l1 * unit(a1) + self.l2 * unit(a2) + self.l3 * unit(a3)
    }

    pub fn manipulator(&self) -> Manipulator {
        Manipulator::new(
            vec![
                JointSpec::revolute("base"),
                JointSpec::revolute("shoulder"),
                JointSpec::revolute("elbow"),
            ],
            1,
            Pose::identity(),
            self.kinematics_hash(),
        )
    }
}

impl AnalyticKernel for PlanarArm3 {
    fn num_joints(&self) -> usize {
        3
    }

    fn num_free_parameters(&self) -> usize {
        1
    }

    fn free_joints(&self) -> &[usize] {
        &PLANAR3_FREE_JOINTS
    }

    fn ik_type(&self) -> ParamKind {
        ParamKind::Translation3D
    }

    fn kinematics_hash(&self) -> String {
        format!(
            "planar3 l1={:.9} l2={:.9} l3={:.9}",
            self.l1, self.l2, self.l3
        )
    }

    fn solve(&self, target: &Parameterization, free: &[IkReal]) -> Solutions {
        let point = match target_point(target) {
            Some(point) => point,
            None => return Vec::new(),
        };
        let q1 = free[0];
        let wrist = point - self.l1 * unit(q1);
        two_link(wrist.x, wrist.y, self.l2, self.l3)
            .into_iter()
            .map(|(a, q3)| vec![q1, wrap_pi(a - q1), q3])
            .collect()
    }
}
