//! Mesh based collision oracle built on parry3d.
//!
//! The solver core only consumes the boolean [CollisionOracle] query; this
//! module provides one concrete implementation for callers that do not
//! bring their own checker. Link meshes are posed by a caller supplied
//! forward kinematics closure and tested pairwise against each other and
//! against static environment meshes. The oracle is stateless between
//! queries, so it is safely shared by concurrent solvers.

use nalgebra::Isometry3;
use parry3d::shape::TriMesh;
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use tracing::trace;

use crate::kernel::IkReal;
use crate::oracle::CollisionOracle;

const SUPPORTED: &str = "Mesh intersection should be supported by Parry3d";

/// Static object the mechanism must not collide with. Unlike a link, it has
/// a fixed global pose.
pub struct CollisionBody {
    pub mesh: TriMesh,
    pub pose: Isometry3<f32>,
}

/// Pre-apply a local transform to a mesh, for links whose geometry is
/// modeled with an offset from their joint frame.
pub fn transform_mesh(shape: &TriMesh, local_transform: &Isometry3<f32>) -> TriMesh {
    TriMesh::new(
        shape
            .vertices()
            .iter()
            .map(|v| local_transform.transform_point(v))
            .collect(),
        shape.indices().to_vec(),
    )
    .expect(SUPPORTED)
}

/// One pairwise intersection check between two posed shapes.
struct CollisionTask<'a> {
    transform_i: &'a Isometry3<f32>,
    transform_j: &'a Isometry3<f32>,
    shape_i: &'a TriMesh,
    shape_j: &'a TriMesh,
}

/// Computes the world pose of every link mesh for a joint configuration.
/// Length of the returned vector must equal the number of link meshes.
pub type LinkPoser = Box<dyn Fn(&[IkReal]) -> Vec<Isometry3<f32>> + Send + Sync>;

/// Collision oracle over triangle meshes: one mesh per link, posed through
/// the mechanism's forward kinematics, plus static environment meshes.
/// Adjacent links share a joint and nominally touch, so only links at least
/// two apart in the chain are tested against each other.
pub struct MeshOracle {
    links: Vec<TriMesh>,
    environment: Vec<CollisionBody>,
    poser: LinkPoser,
}

impl MeshOracle {
    pub fn new(links: Vec<TriMesh>, environment: Vec<CollisionBody>, poser: LinkPoser) -> Self {
        MeshOracle {
            links,
            environment,
            poser,
        }
    }

    fn any_intersection(tasks: Vec<CollisionTask>) -> bool {
        // Checks are independent, exit as soon as any collision is found
        tasks
            .par_iter()
            .find_any(|task| {
                parry3d::query::intersection_test(
                    task.transform_i,
                    task.shape_i,
                    task.transform_j,
                    task.shape_j,
                )
                .expect(SUPPORTED)
            })
            .is_some()
    }
}

impl CollisionOracle for MeshOracle {
    fn colliding(&self, joints: &[IkReal]) -> bool {
        let poses = (self.poser)(joints);
        debug_assert_eq!(poses.len(), self.links.len());

        let mut tasks = Vec::with_capacity(
            self.links.len() * self.links.len() / 2 + self.links.len() * self.environment.len(),
        );
        for i in 0..self.links.len() {
            for j in (i + 2)..self.links.len() {
                tasks.push(CollisionTask {
                    transform_i: &poses[i],
                    transform_j: &poses[j],
                    shape_i: &self.links[i],
                    shape_j: &self.links[j],
                });
            }
            for body in &self.environment {
                tasks.push(CollisionTask {
                    transform_i: &poses[i],
                    transform_j: &body.pose,
                    shape_i: &self.links[i],
                    shape_j: &body.mesh,
                });
            }
        }

        let colliding = Self::any_intersection(tasks);
        trace!(colliding, "mesh oracle query");
        colliding
    }
}
