//! Candidate pruning and ranking.
//!
//! Every kernel branch passes, in order, the joint limit check and (when
//! requested) the collision oracle. The collision query dominates the cost
//! of the whole pipeline, so it is always the last filter applied and is
//! never paid for a kinematically invalid candidate. Ranking picks the
//! survivor nearest to the seed configuration in joint space.

use std::f64::consts::PI;

use tracing::trace;

use crate::kernel::{CandidateSolution, IkReal};
use crate::manipulator::Manipulator;
use crate::oracle::CollisionOracle;

/// Joint space distance between two configurations: the sum of per-joint
/// differences, periodic joints compared modulo one turn.
pub fn joint_distance(a: &[IkReal], b: &[IkReal], periodic: &[bool]) -> IkReal {
    let two_pi = 2.0 * PI;
    a.iter()
        .zip(b)
        .zip(periodic)
        .map(|((x, y), &wraps)| {
            let d = (x - y).abs();
            if wraps {
                let d = d % two_pi;
                d.min(two_pi - d)
            } else {
                d
            }
        })
        .sum()
}

pub(crate) struct SolutionFilter<'a> {
    manipulator: &'a Manipulator,
    oracle: Option<&'a dyn CollisionOracle>,
}

impl<'a> SolutionFilter<'a> {
    /// A filter checking limits only (`oracle` absent) or limits plus
    /// collisions. The caller resolves the "collision requested but no
    /// oracle" configuration error before building the filter.
    pub(crate) fn new(
        manipulator: &'a Manipulator,
        oracle: Option<&'a dyn CollisionOracle>,
    ) -> Self {
        SolutionFilter { manipulator, oracle }
    }

    /// True if the candidate survives all configured checks. Rejections are
    /// absorbed here; they never surface to the caller individually.
    pub(crate) fn admissible(&self, joints: &[IkReal]) -> bool {
        if !self.manipulator.limits().compliant(joints) {
            trace!("candidate rejected by joint limits");
            return false;
        }
        if let Some(oracle) = self.oracle {
            if oracle.colliding(joints) {
                trace!("candidate rejected by collision oracle");
                return false;
            }
        }
        true
    }

    /// Picks the best surviving candidate: nearest to the seed when one is
    /// given, otherwise the first in discovery (grid) order. Ties on equal
    /// distance keep the earlier candidate, so results stay deterministic.
    pub(crate) fn select_best(
        &self,
        candidates: Vec<CandidateSolution>,
        seed: Option<&[IkReal]>,
    ) -> Option<CandidateSolution> {
        let seed = match seed {
            Some(seed) => seed,
            None => return candidates.into_iter().next(),
        };
        let periodic = self.manipulator.limits().periodic_flags();

        let mut best: Option<(IkReal, CandidateSolution)> = None;
        for candidate in candidates {
            let distance = joint_distance(&candidate.joints, seed, periodic);
            match &best {
                Some((best_distance, _)) if distance >= *best_distance => {}
                _ => best = Some((distance, candidate)),
            }
        }
        best.map(|(_, candidate)| candidate)
    }
}
