mod test_utils;

mod solver_test;
