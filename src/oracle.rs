//! The collision oracle interface the solution filter consumes.
//!
//! Collision detection internals live outside this crate; the solver only
//! ever asks "is this configuration in collision". A mesh-based oracle built
//! on parry3d ships in [crate::collisions] behind the `collisions` feature.

use std::sync::Mutex;

use crate::kernel::IkReal;

/// Boolean collision query over a full joint configuration. Implementations
/// must be callable from a shared reference; oracles inspecting mutable
/// shared state (move joints, query, restore joints) should be wrapped in
/// [SharedOracle] so that concurrent solvers serialize their queries.
pub trait CollisionOracle: Send + Sync {
    fn colliding(&self, joints: &[IkReal]) -> bool;
}

/// Adapter turning a plain closure into an oracle.
pub struct FnOracle<F>(F);

impl<F> FnOracle<F>
where
    F: Fn(&[IkReal]) -> bool + Send + Sync,
{
    pub fn new(predicate: F) -> Self {
        FnOracle(predicate)
    }
}

impl<F> CollisionOracle for FnOracle<F>
where
    F: Fn(&[IkReal]) -> bool + Send + Sync,
{
    fn colliding(&self, joints: &[IkReal]) -> bool {
        (self.0)(joints)
    }
}

/// An oracle that mutates its environment while answering: typically it
/// moves the robot model to the queried configuration, asks the checker and
/// restores the previous state. At most one such query may be in flight per
/// environment.
pub trait StatefulCollisionOracle: Send {
    fn colliding(&mut self, joints: &[IkReal]) -> bool;
}

/// Serializes queries against one shared mutable environment. Wrapping a
/// [StatefulCollisionOracle] in this adapter makes it usable by any number
/// of solvers at once; queries are answered one at a time.
pub struct SharedOracle<O: StatefulCollisionOracle> {
    environment: Mutex<O>,
}

impl<O: StatefulCollisionOracle> SharedOracle<O> {
    pub fn new(oracle: O) -> Self {
        SharedOracle {
            environment: Mutex::new(oracle),
        }
    }
}

impl<O: StatefulCollisionOracle> CollisionOracle for SharedOracle<O> {
    fn colliding(&self, joints: &[IkReal]) -> bool {
        // A poisoned lock means a panic in another solve; the environment
        // restore is the panicking side's duty, the query itself stays valid.
        let mut environment = self
            .environment
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        environment.colliding(joints)
    }
}
