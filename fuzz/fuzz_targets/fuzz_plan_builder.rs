#![no_main]

use arbitrary::Arbitrary;
use ftui_delta::{PolicyKind, Tolerance, build_plan};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    policy: u8,
    pairs: Vec<(i16, i16)>,
}

fuzz_target!(|input: Input| {
    // Cap width so a single case stays fast.
    let pairs = &input.pairs[..input.pairs.len().min(256)];
    let current: Vec<i32> = pairs.iter().map(|&(c, _)| i32::from(c)).collect();
    let target: Vec<i32> = pairs.iter().map(|&(_, t)| i32::from(t)).collect();
    let kind = PolicyKind::ALL[usize::from(input.policy) % PolicyKind::ALL.len()];

    let plan = build_plan(&current, &target, &kind).expect("built-in policies never abstain");

    // Every step zeroes at least one gap and never opens a new one.
    let open = current.iter().zip(&target).filter(|(c, t)| c != t).count();
    assert!(plan.len() <= open, "{} steps for {open} open gaps", plan.len());
    assert_eq!(plan.final_snapshot(), target.as_slice(), "plan did not converge");
    plan.verify(&target, &Tolerance::default())
        .expect("plan violates its own invariants");
});
