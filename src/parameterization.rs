//! Describes the task-space goal an IK solve has to achieve.
//!
//! A full 6D pose is the common case, but weaker constraints (rotation only,
//! translation only, a pointing direction, or a ray) are also expressible.
//! Each kernel declares which kind it natively solves.

use nalgebra::{Isometry3, UnitQuaternion, Vector3};

use crate::kernel::IkReal;

/// Pose combines Cartesian position and rotation quaternion, as in the rest
/// of this crate expressed through nalgebra.
pub type Pose = Isometry3<IkReal>;

/// Discriminant of [Parameterization]. Kernels report the kind they solve
/// through [crate::kernel::AnalyticKernel::ik_type].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    None,
    Transform6D,
    Rotation3D,
    Translation3D,
    Direction2D,
    Ray4D,
}

/// The target geometric constraint. Pure value type: built by the caller,
/// borrowed read-only by the solver. Each setter is exclusive, overwriting
/// the kind; accessors are only meaningful for the kind they belong to and
/// return `None` otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum Parameterization {
    None,
    Transform6D(Pose),
    Rotation3D(UnitQuaternion<IkReal>),
    Translation3D(Vector3<IkReal>),
    Direction2D(Vector3<IkReal>),
    /// A ray packs the direction into the rotation slot and the origin into
    /// the translation slot, mirroring the 6D layout.
    Ray4D {
        origin: Vector3<IkReal>,
        direction: Vector3<IkReal>,
    },
}

impl Parameterization {
    pub fn new() -> Self {
        Parameterization::None
    }

    pub fn from_pose(pose: &Pose) -> Self {
        Parameterization::Transform6D(*pose)
    }

    pub fn from_ray(origin: Vector3<IkReal>, direction: Vector3<IkReal>) -> Self {
        Parameterization::Ray4D { origin, direction }
    }

    pub fn kind(&self) -> ParamKind {
        match self {
            Parameterization::None => ParamKind::None,
            Parameterization::Transform6D(_) => ParamKind::Transform6D,
            Parameterization::Rotation3D(_) => ParamKind::Rotation3D,
            Parameterization::Translation3D(_) => ParamKind::Translation3D,
            Parameterization::Direction2D(_) => ParamKind::Direction2D,
            Parameterization::Ray4D { .. } => ParamKind::Ray4D,
        }
    }

    pub fn set_transform(&mut self, pose: &Pose) {
        *self = Parameterization::Transform6D(*pose);
    }

    pub fn set_rotation(&mut self, rotation: &UnitQuaternion<IkReal>) {
        *self = Parameterization::Rotation3D(*rotation);
    }

    pub fn set_translation(&mut self, translation: &Vector3<IkReal>) {
        *self = Parameterization::Translation3D(*translation);
    }

    pub fn set_direction(&mut self, direction: &Vector3<IkReal>) {
        *self = Parameterization::Direction2D(*direction);
    }

    pub fn set_ray(&mut self, origin: &Vector3<IkReal>, direction: &Vector3<IkReal>) {
        *self = Parameterization::Ray4D {
            origin: *origin,
            direction: *direction,
        };
    }

    /// Full pose, only for `Transform6D`.
    pub fn transform(&self) -> Option<&Pose> {
        match self {
            Parameterization::Transform6D(pose) => Some(pose),
            _ => None,
        }
    }

    /// Rotation slot: the quaternion of a `Transform6D` or `Rotation3D`.
    pub fn rotation(&self) -> Option<&UnitQuaternion<IkReal>> {
        match self {
            Parameterization::Transform6D(pose) => Some(&pose.rotation),
            Parameterization::Rotation3D(rotation) => Some(rotation),
            _ => None,
        }
    }

    /// Translation slot: the position of a `Transform6D`, `Translation3D`
    /// or the origin of a `Ray4D`.
    pub fn translation(&self) -> Option<Vector3<IkReal>> {
        match self {
            Parameterization::Transform6D(pose) => Some(pose.translation.vector),
            Parameterization::Translation3D(translation) => Some(*translation),
            Parameterization::Ray4D { origin, .. } => Some(*origin),
            _ => None,
        }
    }

    /// Direction slot: the axis of a `Direction2D` or `Ray4D`.
    pub fn direction(&self) -> Option<Vector3<IkReal>> {
        match self {
            Parameterization::Direction2D(direction) => Some(*direction),
            Parameterization::Ray4D { direction, .. } => Some(*direction),
            _ => None,
        }
    }

    /// Origin and direction, only for `Ray4D`.
    pub fn ray(&self) -> Option<(Vector3<IkReal>, Vector3<IkReal>)> {
        match self {
            Parameterization::Ray4D { origin, direction } => Some((*origin, *direction)),
            _ => None,
        }
    }
}

impl Default for Parameterization {
    fn default() -> Self {
        Parameterization::None
    }
}
