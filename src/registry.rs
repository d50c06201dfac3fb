//! Textual solver lookup: maps a key of the form `<name> <freeIncrement>`
//! to a construction closure producing a ready [IkSolver].
//!
//! The registry is an explicitly owned object with no ambient global state;
//! whoever needs to resolve mechanism names is handed a reference to it.
//! Adding a mechanism means registering one entry, the dispatch code never
//! changes.

use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::{InitError, RegistryError};
use crate::kernel::IkReal;
use crate::planar_kernels::{PlanarArm2, PlanarArm3};
use crate::solver::{IkSolver, SolverOptions, DEFAULT_FREE_INCREMENT};

/// Family prefix for generic analytic dispatch: `analytic <kernel> <inc>`.
const ANALYTIC_FAMILY: &str = "analytic";

type SolverConstructor = Box<dyn Fn(IkReal) -> Result<IkSolver, InitError> + Send + Sync>;

/// Registry of solver constructors, looked up by textual key.
pub struct SolverRegistry {
    entries: HashMap<String, SolverConstructor>,
}

impl SolverRegistry {
    /// An empty registry; mechanisms are added with
    /// [SolverRegistry::register].
    pub fn new() -> Self {
        SolverRegistry {
            entries: HashMap::new(),
        }
    }

    /// A registry pre-populated with the bundled planar sample mechanisms,
    /// each under its direct name and under the `analytic` family.
    pub fn with_builtin_kernels() -> Self {
        let mut registry = SolverRegistry::new();

        let arm2 = PlanarArm2::new(0.5, 0.4);
        registry.register("planar2", move |increment| {
            IkSolver::init(
                Arc::new(arm2),
                arm2.manipulator(),
                None,
                SolverOptions::with_increment(increment),
            )
        });

        let arm3 = PlanarArm3::new(0.5, 0.4, 0.25);
        registry.register("planar3", move |increment| {
            IkSolver::init(
                Arc::new(arm3),
                arm3.manipulator(),
                None,
                SolverOptions::with_increment(increment),
            )
        });

        registry
    }

    /// Registers a constructor under a direct name and under the `analytic`
    /// family alias. The closure receives the free increment parsed from
    /// the lookup key.
    pub fn register<F>(&mut self, name: &str, constructor: F)
    where
        F: Fn(IkReal) -> Result<IkSolver, InitError> + Send + Sync + Clone + 'static,
    {
        self.entries
            .insert(name.to_string(), Box::new(constructor.clone()));
        self.entries.insert(
            format!("{} {}", ANALYTIC_FAMILY, name),
            Box::new(constructor),
        );
    }

    /// Registered direct names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .keys()
            .filter(|name| !name.starts_with(ANALYTIC_FAMILY))
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Resolves a key like `planar3 0.08` or `analytic planar3 0.08` and
    /// constructs the solver. The trailing decimal increment is optional
    /// and defaults to 0.04.
    pub fn create(&self, key: &str) -> Result<IkSolver, RegistryError> {
        let tokens: Vec<&str> = key.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(RegistryError::EmptyKey);
        }

        // Family names span two tokens; try the longer match first
        let (name, rest) = if tokens.len() >= 2 && tokens[0] == ANALYTIC_FAMILY {
            (tokens[..2].join(" "), &tokens[2..])
        } else {
            (tokens[0].to_string(), &tokens[1..])
        };

        let increment = match rest {
            [] => DEFAULT_FREE_INCREMENT,
            [token] => token
                .parse::<IkReal>()
                .map_err(|_| RegistryError::BadIncrement(token.to_string()))?,
            more => return Err(RegistryError::BadIncrement(more.join(" "))),
        };

        let constructor = self
            .entries
            .get(&name)
            .ok_or_else(|| RegistryError::UnknownSolver(name.clone()))?;
        Ok(constructor(increment)?)
    }
}

impl Default for SolverRegistry {
    fn default() -> Self {
        SolverRegistry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_lookup_with_increment() {
        let registry = SolverRegistry::with_builtin_kernels();
        let solver = registry.create("planar3 0.08").expect("registered");
        assert_eq!(solver.num_free_parameters(), 1);
        assert_eq!(solver.free_increment(), 0.08);
    }

    #[test]
    fn test_missing_increment_defaults() {
        let registry = SolverRegistry::with_builtin_kernels();
        let solver = registry.create("planar2").expect("registered");
        assert_eq!(solver.free_increment(), DEFAULT_FREE_INCREMENT);
        assert_eq!(solver.num_free_parameters(), 0);
    }

    #[test]
    fn test_family_dispatch() {
        let registry = SolverRegistry::with_builtin_kernels();
        let solver = registry.create("analytic planar3 0.1").expect("registered");
        assert_eq!(solver.num_free_parameters(), 1);
        assert_eq!(solver.free_increment(), 0.1);
    }

    #[test]
    fn test_unknown_name() {
        let registry = SolverRegistry::with_builtin_kernels();
        match registry.create("sixaxis 0.04") {
            Err(RegistryError::UnknownSolver(name)) => assert_eq!(name, "sixaxis"),
            other => panic!("expected UnknownSolver, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_bad_increment_token() {
        let registry = SolverRegistry::with_builtin_kernels();
        assert_eq!(
            registry.create("planar2 fast").err(),
            Some(RegistryError::BadIncrement("fast".to_string()))
        );
    }

    #[test]
    fn test_zero_increment_rejected_at_init() {
        let registry = SolverRegistry::with_builtin_kernels();
        assert!(matches!(
            registry.create("planar3 0"),
            Err(RegistryError::Init(InitError::BadIncrement(_)))
        ));
    }

    #[test]
    fn test_empty_key() {
        let registry = SolverRegistry::with_builtin_kernels();
        assert_eq!(registry.create("  ").err(), Some(RegistryError::EmptyKey));
    }

    #[test]
    fn test_names_lists_direct_entries() {
        let registry = SolverRegistry::with_builtin_kernels();
        assert_eq!(registry.names(), vec!["planar2", "planar3"]);
    }
}
