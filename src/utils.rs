//! Helper functions

use crate::kernel::{IkReal, Joints, Solutions};

/// Print joint values for all solutions, converting radians to degrees.
#[allow(dead_code)]
pub fn dump_solutions(solutions: &Solutions) {
    if solutions.is_empty() {
        println!("No solutions");
    }
    for joints in solutions {
        let mut row_str = String::new();
        for q in joints {
            row_str.push_str(&format!("{:5.2} ", q.to_degrees()));
        }
        println!("[{}]", row_str.trim_end());
    }
}

/// Print joint values, converting radians to degrees.
#[allow(dead_code)]
pub fn dump_joints(joints: &[IkReal]) {
    let mut row_str = String::new();
    for q in joints {
        row_str.push_str(&format!("{:5.2} ", q.to_degrees()));
    }
    println!("[{}]", row_str.trim_end());
}

/// Allows to specify joint values in degrees (converts to radians)
#[allow(dead_code)]
pub fn as_radians(degrees: &[i32]) -> Joints {
    degrees.iter().map(|d| (*d as IkReal).to_radians()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_as_radians() {
        let joints = as_radians(&[180, 90, 0]);
        assert!((joints[0] - PI).abs() < 1e-12);
        assert!((joints[1] - PI / 2.0).abs() < 1e-12);
        assert_eq!(joints[2], 0.0);
    }
}
