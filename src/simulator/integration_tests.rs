// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

#[cfg(test)]
mod integration_tests {
    use crate::backends::MemoryBackend;
    use crate::builder::Builder;
    use crate::config::{load_and_validate_config, parse_config, ComponentConfig, ConfigFormat};
    use crate::errors::{
        BackendError, ConfigError, ExecutionError, PipelineError, ResolutionError, StepError,
        ValidationIssue, INCOMPATIBLE_SYSTEM,
    };
    use crate::meta::RunMeta;
    use crate::simulator::{RunState, Simulator};
    use crate::system::testing::StubSystem;
    use crate::traits::{Compatibility, Engine, Params, StateChange, Stepper, System};
    use crate::trajectory::Trajectory;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Engine that records how often it is validated and run, and refuses to
    /// run before it has been validated.
    struct CountingEngine {
        verdict: Compatibility,
        validations: Arc<AtomicUsize>,
        runs: Arc<AtomicUsize>,
    }

    impl CountingEngine {
        fn new(verdict: Compatibility) -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let validations = Arc::new(AtomicUsize::new(0));
            let runs = Arc::new(AtomicUsize::new(0));
            let engine = Self {
                verdict,
                validations: Arc::clone(&validations),
                runs: Arc::clone(&runs),
            };
            (engine, validations, runs)
        }
    }

    impl Engine for CountingEngine {
        fn module(&self) -> &str {
            "flepimop2.engine.counting"
        }

        fn run(
            &self,
            _stepper: &dyn Stepper,
            times: &[f64],
            initial_state: &[f64],
            _params: &Params,
        ) -> Result<Trajectory, ExecutionError> {
            assert_eq!(
                self.validations.load(Ordering::SeqCst),
                1,
                "run before validate_system"
            );
            self.runs.fetch_add(1, Ordering::SeqCst);
            let mut trajectory = Trajectory::zeros(times.len(), initial_state.len());
            for row in 0..times.len() {
                trajectory.set_row(row, initial_state);
            }
            Ok(trajectory)
        }

        fn validate_system(&self, _system: &dyn System) -> Compatibility {
            self.validations.fetch_add(1, Ordering::SeqCst);
            self.verdict.clone()
        }
    }

    #[derive(Clone, Copy)]
    enum Corruption {
        NonFinite,
        MissingRow,
        ExtraColumn,
    }

    /// Engine whose runner returns a trajectory the simulator must refuse.
    struct CorruptEngine {
        corruption: Corruption,
    }

    impl Engine for CorruptEngine {
        fn module(&self) -> &str {
            "flepimop2.engine.corrupt"
        }

        fn run(
            &self,
            _stepper: &dyn Stepper,
            times: &[f64],
            initial_state: &[f64],
            _params: &Params,
        ) -> Result<Trajectory, ExecutionError> {
            let (rows, cols) = (times.len(), initial_state.len());
            Ok(match self.corruption {
                Corruption::NonFinite => {
                    let mut trajectory = Trajectory::zeros(rows, cols);
                    let mut poisoned = vec![0.0; cols];
                    poisoned[1] = f64::NAN;
                    trajectory.set_row(1, &poisoned);
                    trajectory
                }
                Corruption::MissingRow => Trajectory::zeros(rows - 1, cols),
                Corruption::ExtraColumn => Trajectory::zeros(rows, cols + 1),
            })
        }
    }

    /// Engine that records the name of the span it runs under.
    struct SpanEngine {
        seen: Arc<std::sync::Mutex<Option<String>>>,
    }

    impl Engine for SpanEngine {
        fn module(&self) -> &str {
            "flepimop2.engine.span"
        }

        fn run(
            &self,
            _stepper: &dyn Stepper,
            times: &[f64],
            initial_state: &[f64],
            _params: &Params,
        ) -> Result<Trajectory, ExecutionError> {
            let current = tracing::Span::current();
            *self.seen.lock().unwrap() = current.metadata().map(|m| m.name().to_string());
            Ok(Trajectory::zeros(times.len(), initial_state.len()))
        }
    }

    fn meta(name: &str) -> RunMeta {
        RunMeta::simulate().with_name(name)
    }

    fn stub_flow() -> Box<dyn System> {
        Box::new(StubSystem::new(StateChange::Flow))
    }

    fn assert_conserved(trajectory: &Trajectory, total: f64) {
        for row in trajectory.iter_rows() {
            let sum: f64 = row.iter().sum();
            assert!((sum - total).abs() < 1e-6, "population drifted to {}", sum);
        }
    }

    /// Test the full path from a YAML file to a stored trajectory
    #[test]
    fn test_sir_demo_end_to_end() {
        let config = load_and_validate_config("configs/sir-demo.yaml").unwrap();
        let mut simulator = Simulator::from_config(&config, None).unwrap();
        assert_eq!(simulator.state(), RunState::Validated);
        assert_eq!(simulator.system().module(), "flepimop2.system.sir");
        assert_eq!(simulator.engine().module(), "flepimop2.engine.euler");

        let run_meta = meta("sir_demo");
        let trajectory = simulator.run_configured(&run_meta).unwrap();

        assert_eq!(trajectory.shape(), (101, 3));
        assert_eq!(trajectory.row(0), &[999.0, 1.0, 0.0]);
        assert_conserved(&trajectory, 1000.0);

        let susceptible = trajectory.column(0);
        let recovered = trajectory.column(2);
        assert!(susceptible.windows(2).all(|w| w[1] <= w[0]));
        assert!(recovered.windows(2).all(|w| w[1] >= w[0]));
        assert!(susceptible[100] < 999.0);

        assert_eq!(simulator.state(), RunState::Complete);
        assert_eq!(simulator.backend().read(&run_meta).unwrap(), trajectory);
    }

    #[test]
    fn test_euler_sir_over_explicit_times() {
        let builder = Builder::global();
        let mut simulator = Simulator::new(
            builder.system(&ComponentConfig::new("sir")).unwrap(),
            builder.engine(&ComponentConfig::new("euler")).unwrap(),
            builder.backend(&ComponentConfig::new("memory")).unwrap(),
        )
        .unwrap();

        let times: Vec<f64> = (0..=10).map(f64::from).collect();
        let params: Params = [("beta".to_string(), 0.3), ("gamma".to_string(), 0.1)]
            .into_iter()
            .collect();
        let trajectory = simulator
            .execute(&times, &[999.0, 1.0, 0.0], &params, &meta("explicit_times"))
            .unwrap();

        assert_eq!(trajectory.shape(), (11, 3));
        assert_conserved(&trajectory, 1000.0);
        assert!(trajectory.column(0).windows(2).all(|w| w[1] <= w[0]));
        assert!(trajectory.column(2).windows(2).all(|w| w[1] >= w[0]));
    }

    /// Test that each target's parameter groups reach the system
    #[test]
    fn test_groups_select_transmission_rate() {
        let config = load_and_validate_config("configs/sir-groups.yaml").unwrap();

        let mut peaks = Vec::new();
        for target in ["high", "low"] {
            let mut simulator = Simulator::from_config(&config, Some(target)).unwrap();
            let plan = simulator.plan().unwrap();
            assert_eq!(plan.target, target);
            assert_eq!(plan.times.len(), 31);
            assert_eq!(
                plan.parameters.source_of("beta"),
                Some(format!("beta_{}", target).as_str())
            );

            let trajectory = simulator.run_configured(&meta(target)).unwrap();
            assert_conserved(&trajectory, 1000.0);
            let infected = trajectory.column(1);
            peaks.push(infected.iter().cloned().fold(f64::MIN, f64::max));
        }

        assert!(
            peaks[0] > peaks[1],
            "high transmission peak {} should exceed low {}",
            peaks[0],
            peaks[1]
        );
    }

    /// Test that explicit simulate params override realized parameters
    #[test]
    fn test_explicit_params_override_parameters() {
        let config = load_and_validate_config("configs/sir-groups.yaml").unwrap();
        let mut simulator = Simulator::from_config(&config, Some("fast_recovery")).unwrap();

        let configured = simulator.run_configured(&meta("configured")).unwrap();

        let params: Params = [("beta".to_string(), 0.5), ("gamma".to_string(), 0.25)]
            .into_iter()
            .collect();
        let explicit = simulator
            .run(&[990.0, 10.0, 0.0], &params, &meta("explicit"))
            .unwrap();

        assert_eq!(configured.shape(), (4, 3));
        assert_eq!(configured, explicit);
    }

    /// Test that an incompatible pair is rejected before any stepping
    #[test]
    fn test_incompatible_config_is_rejected() {
        let config = load_and_validate_config("configs/incompatible.yaml").unwrap();

        let error = match Simulator::from_config(&config, None) {
            Err(PipelineError::Incompatible(error)) => error,
            Err(other) => panic!("Expected PipelineError::Incompatible, got {:?}", other),
            Ok(_) => panic!("Expected the discrete engine to reject a flow system"),
        };
        assert_eq!(error.issues.len(), 1);
        assert_eq!(error.issues[0].kind, INCOMPATIBLE_SYSTEM);
        assert!(error.to_string().starts_with("1 validation issue(s) encountered:"));
    }

    #[test]
    fn test_rejected_simulator_keeps_rejecting() {
        let builder = Builder::global();
        let system = builder.system(&ComponentConfig::new("sir")).unwrap();
        let engine = builder
            .engine(&ComponentConfig::new("discrete").with("state_change", "delta"))
            .unwrap();
        let backend = builder.backend(&ComponentConfig::new("memory")).unwrap();

        let mut simulator = Simulator::assemble(system, engine, backend);
        assert_eq!(simulator.state(), RunState::Built);
        assert!(simulator.validate().is_err());
        assert_eq!(simulator.state(), RunState::Rejected);

        let run_meta = meta("rejected");
        let result = simulator.execute(&[0.0, 1.0], &[999.0, 1.0, 0.0], &Params::new(), &run_meta);
        assert!(matches!(result, Err(PipelineError::Incompatible(_))));
        assert_eq!(simulator.state(), RunState::Rejected);
        assert!(matches!(
            simulator.backend().read(&run_meta),
            Err(BackendError::NotFound(_))
        ));
    }

    /// Test that the engine is asked about the system once and before it runs
    #[test]
    fn test_validate_system_called_once() {
        struct TestCase {
            name: &'static str,
            verdict: Compatibility,
            expected_state: RunState,
            expected_runs: usize,
        }

        let issue = ValidationIssue::new("cannot drive stub", INCOMPATIBLE_SYSTEM);
        let test_cases = vec![
            TestCase {
                name: "compatible",
                verdict: Compatibility::Compatible,
                expected_state: RunState::Complete,
                expected_runs: 2,
            },
            TestCase {
                name: "unchecked",
                verdict: Compatibility::Unchecked,
                expected_state: RunState::Complete,
                expected_runs: 2,
            },
            TestCase {
                name: "incompatible",
                verdict: Compatibility::Incompatible(vec![issue]),
                expected_state: RunState::Rejected,
                expected_runs: 0,
            },
        ];

        for test_case in test_cases {
            let (engine, validations, runs) = CountingEngine::new(test_case.verdict);
            let mut simulator =
                Simulator::assemble(stub_flow(), Box::new(engine), Box::<MemoryBackend>::default());
            assert_eq!(
                validations.load(Ordering::SeqCst),
                0,
                "Test case '{}' failed: validated during assembly",
                test_case.name
            );

            for attempt in 0..2 {
                let _ = simulator.execute(
                    &[0.0, 1.0, 2.0],
                    &[1.0, 2.0],
                    &Params::new(),
                    &meta(&format!("{}_{}", test_case.name, attempt)),
                );
            }

            assert_eq!(
                validations.load(Ordering::SeqCst),
                1,
                "Test case '{}' failed: validation count",
                test_case.name
            );
            assert_eq!(
                runs.load(Ordering::SeqCst),
                test_case.expected_runs,
                "Test case '{}' failed: run count",
                test_case.name
            );
            assert_eq!(
                simulator.state(),
                test_case.expected_state,
                "Test case '{}' failed: final state",
                test_case.name
            );
        }
    }

    /// Test that the runner executes inside the simulation span
    #[test]
    fn test_runner_executes_inside_simulation_span() {
        let seen = Arc::new(std::sync::Mutex::new(None));
        let engine = SpanEngine {
            seen: Arc::clone(&seen),
        };
        let mut simulator =
            Simulator::assemble(stub_flow(), Box::new(engine), Box::<MemoryBackend>::default());

        tracing::subscriber::with_default(tracing_subscriber::registry(), || {
            simulator
                .execute(&[0.0, 1.0], &[1.0, 2.0], &Params::new(), &meta("spanned"))
                .unwrap();
        });

        assert_eq!(seen.lock().unwrap().as_deref(), Some("simulation"));
    }

    /// Test that trajectories failing the shape or finiteness check are not saved
    #[test]
    fn test_bad_runner_output_fails_without_saving() {
        struct TestCase {
            name: &'static str,
            corruption: Corruption,
            check: fn(&ExecutionError) -> bool,
        }

        let test_cases = vec![
            TestCase {
                name: "non-finite value",
                corruption: Corruption::NonFinite,
                check: |e| {
                    matches!(e, ExecutionError::NonFinite { time, index: 1, value }
                        if *time == 0.5 && value.is_nan())
                },
            },
            TestCase {
                name: "missing row",
                corruption: Corruption::MissingRow,
                check: |e| {
                    matches!(
                        e,
                        ExecutionError::ShapeMismatch {
                            rows: 2,
                            cols: 2,
                            expected_rows: 3,
                            expected_cols: 2
                        }
                    )
                },
            },
            TestCase {
                name: "extra column",
                corruption: Corruption::ExtraColumn,
                check: |e| matches!(e, ExecutionError::ShapeMismatch { cols: 3, .. }),
            },
        ];

        for test_case in test_cases {
            let engine = CorruptEngine {
                corruption: test_case.corruption,
            };
            let mut simulator = Simulator::new(
                stub_flow(),
                Box::new(engine),
                Box::<MemoryBackend>::default(),
            )
            .unwrap();

            let run_meta = meta(test_case.name);
            let result = simulator.execute(&[0.0, 0.5, 1.0], &[1.0, 2.0], &Params::new(), &run_meta);

            match result {
                Err(PipelineError::Execution(error)) => assert!(
                    (test_case.check)(&error),
                    "Test case '{}' failed: unexpected error {:?}",
                    test_case.name,
                    error
                ),
                other => panic!(
                    "Test case '{}' failed: expected an execution error, got {:?}",
                    test_case.name, other
                ),
            }
            assert_eq!(
                simulator.state(),
                RunState::Failed,
                "Test case '{}' failed: state",
                test_case.name
            );
            assert!(
                simulator.backend().read(&run_meta).is_err(),
                "Test case '{}' failed: trajectory was saved",
                test_case.name
            );
        }
    }

    #[test]
    fn test_step_failure_fails_and_allows_rerun() {
        let config = load_and_validate_config("configs/sir-demo.yaml").unwrap();
        let mut simulator = Simulator::from_config(&config, None).unwrap();

        let result = simulator.run(&[999.0, 1.0], &Params::new(), &meta("short_state"));
        match result {
            Err(PipelineError::Execution(ExecutionError::Stepper { time, source })) => {
                assert_eq!(time, 0.0);
                assert_eq!(
                    source,
                    StepError::StateLength {
                        expected: 3,
                        actual: 2
                    }
                );
            }
            other => panic!("Expected a stepper failure, got {:?}", other),
        }
        assert_eq!(simulator.state(), RunState::Failed);

        simulator.run_configured(&meta("after_failure")).unwrap();
        assert_eq!(simulator.state(), RunState::Complete);
    }

    #[test]
    fn test_from_config_errors() {
        let unknown_module = parse_config(
            r#"
system:
  - module: seir
engine:
  - module: euler
backend:
  - module: memory
simulate:
  only:
    engine: default
    system: default
    backend: default
    times: "0:5"
"#,
            ConfigFormat::Yaml,
        )
        .unwrap();

        match Simulator::from_config(&unknown_module, None) {
            Err(PipelineError::Resolution(ResolutionError::NotFound { path, available, .. })) => {
                assert_eq!(path, "flepimop2.system.seir");
                assert!(available.contains(&"sir".to_string()));
            }
            Err(other) => panic!("Expected ResolutionError::NotFound, got {:?}", other),
            Ok(_) => panic!("Expected an unknown system module to fail"),
        }

        let config = load_and_validate_config("configs/sir-groups.yaml").unwrap();
        assert!(matches!(
            Simulator::from_config(&config, None),
            Err(PipelineError::Config(ConfigError::AmbiguousTarget { .. }))
        ));
    }

    #[test]
    fn test_run_configured_requires_initial_state() {
        let config = parse_config(
            r#"
system:
  - module: sir
engine:
  - module: rk4
backend:
  - module: memory
simulate:
  stateless:
    engine: default
    system: default
    backend: default
    times: "0:5"
"#,
            ConfigFormat::Yaml,
        )
        .unwrap();

        let mut simulator = Simulator::from_config(&config, None).unwrap();
        assert!(matches!(
            simulator.run_configured(&meta("stateless")),
            Err(PipelineError::Config(ConfigError::MissingInitialState { target })) if target == "stateless"
        ));

        let trajectory = simulator
            .run(&[90.0, 10.0, 0.0], &Params::new(), &meta("explicit_state"))
            .unwrap();
        assert_eq!(trajectory.shape(), (6, 3));
    }
}
