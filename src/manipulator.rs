//! The mechanism a solver is bound to: its joint chain with limits, the
//! grasp (tool) offset applied to the end effector, and the kinematics
//! identity hash used to reject stale kernels.

use std::f64::consts::PI;

use crate::kernel::{IkReal, Solutions};
use crate::parameterization::Pose;

/// One joint of the chain.
#[derive(Debug, Clone)]
pub struct JointSpec {
    pub name: String,

    /// Lower limit. For periodic joints the limit pair is normalized into
    /// [0, 2π) and may wrap around through zero.
    pub from: IkReal,

    /// Upper limit. For periodic joints, if less than the lower limit the
    /// admissible range wraps around through zero; equal limits mean the
    /// joint is unconstrained.
    pub to: IkReal,

    /// Revolute joints with full wrap-around are compared modulo 2π both in
    /// limit checks and in seed distance ranking.
    pub periodic: bool,
}

impl JointSpec {
    /// Unconstrained periodic (revolute) joint.
    pub fn revolute(name: &str) -> Self {
        JointSpec {
            name: name.to_string(),
            from: 0.0,
            to: 0.0,
            periodic: true,
        }
    }

    pub fn revolute_limited(name: &str, from: IkReal, to: IkReal) -> Self {
        JointSpec {
            name: name.to_string(),
            from,
            to,
            periodic: true,
        }
    }

    /// Non-periodic joint with a plain interval range (prismatic joints or
    /// revolute joints with hard stops well inside one turn).
    pub fn linear(name: &str, from: IkReal, to: IkReal) -> Self {
        JointSpec {
            name: name.to_string(),
            from,
            to,
            periodic: false,
        }
    }
}

/// Joint limits of the whole chain, with wrap-around semantics for periodic
/// joints. Limit violation is a hard rejection, never a clamp.
#[derive(Debug, Clone)]
pub struct JointLimits {
    from: Vec<IkReal>,
    to: Vec<IkReal>,
    periodic: Vec<bool>,
}

fn normalized(angle: IkReal) -> IkReal {
    let two_pi = 2.0 * PI;
    ((angle % two_pi) + two_pi) % two_pi
}

impl JointLimits {
    pub fn new(joints: &[JointSpec]) -> Self {
        let from = joints
            .iter()
            .map(|j| if j.periodic { normalized(j.from) } else { j.from })
            .collect();
        let to = joints
            .iter()
            .map(|j| if j.periodic { normalized(j.to) } else { j.to })
            .collect();
        let periodic = joints.iter().map(|j| j.periodic).collect();
        JointLimits { from, to, periodic }
    }

    pub fn len(&self) -> usize {
        self.from.len()
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_empty()
    }

    /// Physical range of one joint as (from, to). For a wrapping periodic
    /// joint the pair is returned un-wrapped, `to` exceeding `from` by the
    /// admissible arc, so that range mapping stays monotonic.
    pub fn range(&self, joint: usize) -> (IkReal, IkReal) {
        let two_pi = 2.0 * PI;
        if self.periodic[joint] {
            if self.from[joint] == self.to[joint] {
                // Unconstrained, full turn centered at zero
                return (-PI, PI);
            }
            if self.from[joint] <= self.to[joint] {
                (self.from[joint], self.to[joint])
            } else {
                (self.from[joint], self.to[joint] + two_pi)
            }
        } else {
            (self.from[joint], self.to[joint])
        }
    }

    pub fn periodic(&self, joint: usize) -> bool {
        self.periodic[joint]
    }

    pub fn periodic_flags(&self) -> &[bool] {
        &self.periodic
    }

    /// True if every joint value is inside its declared range.
    pub fn compliant(&self, angles: &[IkReal]) -> bool {
        debug_assert_eq!(angles.len(), self.from.len());
        for i in 0..self.from.len() {
            if self.periodic[i] {
                if self.from[i] == self.to[i] {
                    continue; // Joint without constraints, from == to
                }
                let angle = normalized(angles[i]);
                if self.from[i] <= self.to[i] {
                    if !(angle >= self.from[i] && angle <= self.to[i]) {
                        return false;
                    }
                } else if !(angle >= self.from[i] || angle <= self.to[i]) {
                    return false;
                }
            } else if !(angles[i] >= self.from[i] && angles[i] <= self.to[i]) {
                return false;
            }
        }
        true
    }

    pub fn filter(&self, solutions: &Solutions) -> Solutions {
        solutions
            .iter()
            .filter(|qs| self.compliant(qs))
            .cloned()
            .collect()
    }
}

/// Binding data for one manipulator: the joint chain, how many of its joints
/// are redundant, the fixed grasp offset transform applied to the end
/// effector, and the kinematics identity hash. Created once, immutable for
/// the lifetime of the solver bound to it.
#[derive(Debug, Clone)]
pub struct Manipulator {
    joints: Vec<JointSpec>,
    limits: JointLimits,
    redundancy: usize,
    tool: Pose,
    kinematics_hash: String,
}

impl Manipulator {
    pub fn new(
        joints: Vec<JointSpec>,
        redundancy: usize,
        tool: Pose,
        kinematics_hash: String,
    ) -> Self {
        let limits = JointLimits::new(&joints);
        Manipulator {
            joints,
            limits,
            redundancy,
            tool,
            kinematics_hash,
        }
    }

    /// Same binding with different joint limits. The geometry, and therefore
    /// the kinematics hash, stays the same: limits are an operational
    /// restriction, not a geometry change.
    pub fn with_joints(&self, joints: Vec<JointSpec>) -> Self {
        Manipulator::new(
            joints,
            self.redundancy,
            self.tool,
            self.kinematics_hash.clone(),
        )
    }

    pub fn num_joints(&self) -> usize {
        self.joints.len()
    }

    /// Number of redundant degrees of freedom this manipulator declares.
    /// Must match the bound kernel's `num_free_parameters`.
    pub fn redundancy(&self) -> usize {
        self.redundancy
    }

    pub fn joints(&self) -> &[JointSpec] {
        &self.joints
    }

    pub fn limits(&self) -> &JointLimits {
        &self.limits
    }

    /// The grasp offset: the transform from the mechanical flange to the
    /// tool center point whose pose the caller actually specifies.
    pub fn tool(&self) -> &Pose {
        &self.tool
    }

    pub fn kinematics_hash(&self) -> &str {
        &self.kinematics_hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revolute_chain(from: &[IkReal], to: &[IkReal]) -> JointLimits {
        let joints: Vec<JointSpec> = from
            .iter()
            .zip(to)
            .enumerate()
            .map(|(i, (f, t))| JointSpec::revolute_limited(&format!("j{}", i + 1), *f, *t))
            .collect();
        JointLimits::new(&joints)
    }

    #[test]
    fn test_no_wrap_around() {
        let limits = revolute_chain(
            &[0.0, 0.15 * PI, 0.25 * PI],
            &[0.2 * PI, 0.3 * PI, 0.4 * PI],
        );
        assert!(limits.compliant(&[0.1 * PI, 0.2 * PI, 0.3 * PI]));
        assert!(!limits.compliant(&[0.3 * PI, 0.2 * PI, 0.3 * PI]));
    }

    #[test]
    fn test_with_wrap_around() {
        // Range 0.8π..0.1π wraps through zero
        let limits = revolute_chain(&[0.8 * PI, 1.8 * PI], &[0.1 * PI, 1.1 * PI]);
        assert!(limits.compliant(&[0.9 * PI, 1.9 * PI]));
        assert!(limits.compliant(&[0.05 * PI, 1.05 * PI]));
        assert!(!limits.compliant(&[0.5 * PI, 1.9 * PI]));
    }

    #[test]
    fn test_equal_limits_mean_unconstrained() {
        let limits = revolute_chain(&[0.0, 0.0], &[0.0, 0.0]);
        assert!(limits.compliant(&[5.0, -17.3]));
    }

    #[test]
    fn test_linear_joint_plain_interval() {
        let limits = JointLimits::new(&[JointSpec::linear("slide", -0.5, 0.5)]);
        assert!(limits.compliant(&[0.4]));
        assert!(!limits.compliant(&[0.6]));
        // No modulo arithmetic for linear joints
        assert!(!limits.compliant(&[2.0 * PI]));
    }

    #[test]
    fn test_filter_solutions() {
        let limits = revolute_chain(&[0.0, 0.0], &[PI / 2.0, PI / 2.0]);
        let solutions = vec![vec![PI / 3.0, PI / 4.0], vec![PI, PI]];
        let filtered = limits.filter(&solutions);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0], vec![PI / 3.0, PI / 4.0]);
    }

    #[test]
    fn test_range_unwraps_wrapping_joint() {
        let limits = revolute_chain(&[1.5 * PI], &[0.5 * PI]);
        let (from, to) = limits.range(0);
        assert!((from - 1.5 * PI).abs() < 1e-12);
        assert!((to - 2.5 * PI).abs() < 1e-12);
    }

    #[test]
    fn test_range_of_unconstrained_is_full_turn() {
        let limits = revolute_chain(&[0.0], &[0.0]);
        let (from, to) = limits.range(0);
        assert!((from + PI).abs() < 1e-12);
        assert!((to - PI).abs() < 1e-12);
    }
}
