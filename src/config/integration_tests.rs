// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

#[cfg(test)]
mod integration_tests {
    use crate::config::{load_and_validate_config, load_config, ParameterSpec, TimeSpec};
    use crate::errors::ConfigError;

    /// Test that list-style sections load under their `default` name
    #[test]
    fn test_sir_demo_yaml_loading() {
        let config = load_and_validate_config("configs/sir-demo.yaml").unwrap();

        assert_eq!(config.name.as_deref(), Some("sir_demo"));
        assert_eq!(config.systems.len(), 1);
        assert!(config.systems.contains_key("default"));
        assert!(config.engines.contains_key("default"));
        assert!(config.backends.contains_key("default"));
        assert_eq!(config.process.len(), 1);
        assert!(config.process.contains_key("summarize"));

        let (target, spec) = config.select_target(None).unwrap();
        assert_eq!(target, "baseline");
        assert_eq!(spec.engine, "default");
        assert_eq!(spec.initial_state, Some(vec![999.0, 1.0, 0.0]));

        let times = spec.times.evaluate().unwrap();
        assert_eq!(times.len(), 101);
        assert_eq!(times[0], 0.0);
        assert_eq!(times[100], 100.0);
    }

    /// Test that a TOML document produces the same config as its YAML twin
    #[test]
    fn test_toml_matches_yaml() {
        let from_yaml = load_config("configs/sir-demo.yaml").unwrap();
        let from_toml = load_config("configs/sir-demo.toml").unwrap();

        assert_eq!(from_yaml, from_toml);
    }

    /// Test keyed sections, parameter shorthand and groups
    #[test]
    fn test_sir_groups_yaml_loading() {
        let config = load_and_validate_config("configs/sir-groups.yaml").unwrap();

        assert_eq!(config.engines.len(), 2);
        assert_eq!(config.target_names(), vec!["high", "low", "fast_recovery"]);

        assert_eq!(config.parameters["beta_high"], ParameterSpec::Value(0.5));
        let components = config.parameter_components().unwrap();
        assert_eq!(components["beta_low"].module(), "fixed");
        assert_eq!(components["gamma"].module(), "fixed");

        assert_eq!(config.groups["high_transmission"]["beta"], "beta_high");
        assert_eq!(config.groups["low_transmission"]["beta"], "beta_low");

        let (_, fast) = config.select_target(Some("fast_recovery")).unwrap();
        assert_eq!(fast.times, TimeSpec::Points(vec![0.0, 10.0, 20.0, 30.0]));
        assert_eq!(fast.params.get("gamma"), Some(&0.25));
        assert_eq!(fast.groups, vec!["high_transmission"]);
    }

    /// Test target selection errors against a multi-target document
    #[test]
    fn test_target_selection_errors() {
        let config = load_config("configs/sir-groups.yaml").unwrap();

        match config.select_target(None) {
            Err(ConfigError::AmbiguousTarget { available }) => {
                assert_eq!(available, vec!["high", "low", "fast_recovery"]);
            }
            other => panic!("Expected AmbiguousTarget, got {:?}", other),
        }

        match config.select_target(Some("medium")) {
            Err(ConfigError::TargetNotFound { target, .. }) => assert_eq!(target, "medium"),
            other => panic!("Expected TargetNotFound, got {:?}", other),
        }
    }

    /// Test that every validation problem in a file is reported together
    #[test]
    fn test_invalid_config_reports_all_errors() {
        let result = load_and_validate_config("configs/invalid.yaml");

        let errors = match result {
            Err(ConfigError::Invalid(errors)) => errors,
            other => panic!("Expected ConfigError::Invalid, got {:?}", other),
        };
        assert_eq!(errors.len(), 5, "Unexpected errors: {:?}", errors);

        let references = errors
            .iter()
            .filter(|e| matches!(e, ConfigError::UndefinedReference { name, .. } if name == "nowhere"))
            .count();
        assert_eq!(references, 2);
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::UndefinedGroup { group, .. } if group == "missing_group")));
        assert!(errors.iter().any(|e| matches!(e, ConfigError::InvalidTimes { .. })));
        assert!(errors.iter().any(|e| matches!(e, ConfigError::InvalidInitialState { .. })));
    }

    /// Test that an incompatible pairing still passes config validation
    #[test]
    fn test_incompatible_config_is_structurally_valid() {
        let config = load_and_validate_config("configs/incompatible.yaml").unwrap();

        assert_eq!(config.select_target(None).unwrap().0, "mismatched");
    }

    #[test]
    fn test_missing_file_and_unknown_extension() {
        match load_config("configs/does-not-exist.yaml") {
            Err(ConfigError::Io { path, .. }) => {
                assert!(path.ends_with("does-not-exist.yaml"));
            }
            other => panic!("Expected ConfigError::Io, got {:?}", other),
        }

        assert!(matches!(
            load_config("configs/sir-demo.json"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }
}
