//! The redundant degrees of freedom as a bounded box [0,1]^k.
//!
//! Maps normalized free values to and from the physical ranges of the
//! mechanism's free joints and produces the deterministic uniform grid the
//! null-space search enumerates.

use std::f64::consts::PI;

use crate::kernel::IkReal;
use crate::manipulator::Manipulator;

/// Guards against a grid step like 0.04 producing 25 instead of 26 points
/// per axis because 1.0/0.04 lands just under the integer.
const STEP_COUNT_EPSILON: IkReal = 1e-9;

fn wrap_positive(angle: IkReal) -> IkReal {
    let two_pi = 2.0 * PI;
    ((angle % two_pi) + two_pi) % two_pi
}

/// Normalization box over the free joints of one manipulator. Built once at
/// solver initialization, immutable afterwards.
#[derive(Debug, Clone)]
pub struct FreeParameterSpace {
    /// Physical (from, to) range per free joint, `to > from` except for
    /// degenerate fixed joints.
    ranges: Vec<(IkReal, IkReal)>,
    periodic: Vec<bool>,
}

impl FreeParameterSpace {
    /// Builds the box from the manipulator's limits at the kernel-declared
    /// free joint indices. Indices must be in range; the solver validates
    /// this before constructing the space.
    pub fn new(manipulator: &Manipulator, free_joints: &[usize]) -> Self {
        let limits = manipulator.limits();
        let ranges = free_joints.iter().map(|&j| limits.range(j)).collect();
        let periodic = free_joints.iter().map(|&j| limits.periodic(j)).collect();
        FreeParameterSpace { ranges, periodic }
    }

    /// Dimension k of the box.
    pub fn dimension(&self) -> usize {
        self.ranges.len()
    }

    /// Maps normalized [0,1] free values to physical joint angles.
    pub fn to_physical(&self, values: &[IkReal]) -> Vec<IkReal> {
        debug_assert_eq!(values.len(), self.ranges.len());
        values
            .iter()
            .zip(&self.ranges)
            .map(|(v, (from, to))| from + v * (to - from))
            .collect()
    }

    /// Inverse of [FreeParameterSpace::to_physical]: reads normalized free
    /// values out of physical free joint angles. Periodic joints are first
    /// lifted into their admissible arc; values outside a non-periodic range
    /// clamp to the nearest bound.
    pub fn from_physical(&self, angles: &[IkReal]) -> Vec<IkReal> {
        debug_assert_eq!(angles.len(), self.ranges.len());
        angles
            .iter()
            .zip(self.ranges.iter().zip(&self.periodic))
            .map(|(q, ((from, to), periodic))| {
                let width = to - from;
                if width <= 0.0 {
                    return 0.0;
                }
                let q = if *periodic {
                    from + wrap_positive(q - from)
                } else {
                    *q
                };
                ((q - from) / width).clamp(0.0, 1.0)
            })
            .collect()
    }

    /// The uniform k-dimensional grid with the given step, enumerated in
    /// lexicographic axis order (first axis most significant). The same
    /// increment always yields the same finite sequence. Steps of 1.0 or
    /// larger degenerate to the single all-zeros point.
    ///
    /// The caller guarantees `increment > 0`; the solver rejects other
    /// values at initialization.
    pub fn grid(&self, increment: IkReal) -> GridIterator {
        let points_per_axis = if increment >= 1.0 {
            1
        } else {
            (1.0 / increment + STEP_COUNT_EPSILON).floor() as usize + 1
        };
        GridIterator {
            increment,
            points_per_axis,
            dimension: self.ranges.len(),
            counters: vec![0; self.ranges.len()],
            exhausted: false,
        }
    }
}

/// Lazy, restartable enumeration of the free parameter grid. Obtained from
/// [FreeParameterSpace::grid]; requesting a new iterator restarts the same
/// deterministic sequence.
pub struct GridIterator {
    increment: IkReal,
    points_per_axis: usize,
    dimension: usize,
    counters: Vec<usize>,
    exhausted: bool,
}

impl GridIterator {
    /// Total number of grid points in the full sequence.
    pub fn len(&self) -> usize {
        self.points_per_axis.pow(self.dimension as u32)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Iterator for GridIterator {
    type Item = Vec<IkReal>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let point: Vec<IkReal> = self
            .counters
            .iter()
            .map(|&i| ((i as IkReal) * self.increment).min(1.0))
            .collect();

        // Odometer step, last axis fastest (lexicographic order overall)
        let mut axis = self.dimension;
        loop {
            if axis == 0 {
                self.exhausted = true;
                break;
            }
            axis -= 1;
            self.counters[axis] += 1;
            if self.counters[axis] < self.points_per_axis {
                break;
            }
            self.counters[axis] = 0;
        }
        Some(point)
    }
}
