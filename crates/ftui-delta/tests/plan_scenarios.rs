//! Scenario tests for plan construction across element types and policies.

use ftui_delta::*;

const CURRENT: [i32; 12] = [1, 23, 53, 123, 412, 8, 231, 23, 1234, 43, 1, 3];
const TARGET: [i32; 12] = [42, 321, 53, 532, 12, 8, 2123, 2, 12341, 653, 1, 4];

#[test]
fn odometer_scenario_takes_nine_steps() {
    let plan = build_plan(&CURRENT, &TARGET, &First).unwrap();
    assert_eq!(plan.len(), 9, "pick-first should need exactly 9 steps");
    assert_eq!(plan.steps()[0].range(), 0..2);
    assert_eq!(plan.steps()[0].delta(), 41);
    assert_eq!(plan.final_snapshot(), &TARGET);
}

#[test]
fn every_builtin_policy_converges() {
    for kind in PolicyKind::ALL {
        let plan = build_plan(&CURRENT, &TARGET, &kind).unwrap();
        assert_eq!(plan.final_snapshot(), &TARGET, "policy {kind}");
        assert!(
            plan.len() <= TARGET.len(),
            "policy {kind} took {} steps",
            plan.len()
        );
    }
}

#[test]
fn two_run_partition() {
    let runs = find_runs(&[32, 152, 68, 8], &[3, 12, 32, 15]).unwrap();
    assert_eq!(runs, vec![RunDelta::new(0..3, -29), RunDelta::new(3..4, 7)]);
}

#[test]
fn first_snapshot_after_first_step() {
    let plan = build_plan(&[32, 152, 68, 8], &[3, 12, 32, 15], &First).unwrap();
    assert_eq!(plan.steps()[0].snapshot, vec![3, 123, 39, 8]);
}

#[test]
fn float_noise_below_epsilon_is_converged() {
    let current = [1.0f32, 2.0, 3.0];
    let target = [1.000_01f32, 1.999_99, 3.000_05];
    assert!(find_runs(&current, &target).unwrap().is_empty());
    assert!(build_plan(&current, &target, &First).unwrap().is_empty());
}

#[test]
fn float_plan_reaches_target() {
    let current = [0.0f64, 0.25, 0.5, 0.75, 1.0];
    let target = [1.0f64, 0.75, 0.5, 0.25, 0.0];
    let plan = build_plan(&current, &target, &LargestMagnitude).unwrap();
    let tol = Tolerance::default();
    assert_eq!(plan.verify(&target, &tol), Ok(()));
}

#[test]
fn wide_integers_do_not_overflow() {
    let current = [i64::MIN / 2, 0, i64::MAX / 2];
    let target = [0, i64::MAX / 2, i64::MIN / 2];
    let plan = build_plan(&current, &target, &First).unwrap();
    assert_eq!(plan.final_snapshot(), &target);
}

#[test]
fn unrepresentable_gap_fails() {
    let err = build_plan(&[i32::MIN], &[i32::MAX], &First).unwrap_err();
    assert_eq!(err, DeltaError::UnrepresentableGap { index: 0 });
}

#[test]
fn mismatched_lengths_fail_for_every_policy() {
    for kind in PolicyKind::ALL {
        let err = build_plan(&[1, 2, 3], &[1, 2, 3, 4], &kind).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthMismatch);
    }
}

#[test]
fn boxed_dyn_policy() {
    let policies: Vec<Box<dyn SelectionPolicy<i32>>> = vec![
        Box::new(First),
        Box::new(Last),
        Box::new(|opts: &[RunDelta<i32>]| Some(opts.len() / 2)),
    ];
    for policy in &policies {
        let plan = build_plan(&CURRENT, &TARGET, policy.as_ref()).unwrap();
        assert_eq!(plan.final_snapshot(), &TARGET, "policy {}", policy.name());
    }
}

#[test]
fn cursor_replays_full_history() {
    let plan = build_plan(&CURRENT, &TARGET, &First).unwrap();
    let mut cursor = plan.cursor();
    let mut frames = 0;
    while let Some(run) = cursor.advance() {
        assert!(run.width() > 0);
        frames += 1;
    }
    assert_eq!(frames, plan.len());
    assert_eq!(cursor.current(), &TARGET);

    while cursor.retreat().is_some() {}
    assert_eq!(cursor.current(), &CURRENT);
}

#[test]
fn planner_with_exact_tolerance_on_floats() {
    let planner = Planner::<f64>::new().tolerance(Tolerance::exact());
    let plan = planner.build(&[0.0, 0.0], &[0.5, 0.25], &First).unwrap();
    assert_eq!(plan.len(), 2);
    assert_eq!(plan.final_snapshot(), &[0.5, 0.25]);
}
