mod common;

use ai_goal::category_flags::{JUMP, LOOK, MOVE};
use ai_goal::{GoalSelector, LifecyclePhase, SelectorConfig};

use common::{ctx, run, LogWorld, Probe};

#[test]
fn failing_tick_is_contained_to_its_entry() {
    const TICKS: u64 = 6;

    let mut world = LogWorld::default();
    let broken = Probe::new("broken", &[MOVE])
        .failing_in(LifecyclePhase::Tick)
        .handle();
    let look = Probe::new("look", &[LOOK]).handle();
    let hop = Probe::new("hop", &[JUMP]).handle();

    let mut selector = GoalSelector::new(1);
    selector.add_task(1, broken.clone()).unwrap();
    selector.add_task(2, look).unwrap();
    selector.add_task(3, hop).unwrap();

    let reports = run(&mut selector, &mut world, 0..TICKS);

    assert_eq!(world.count("look:tick"), TICKS as usize);
    assert_eq!(world.count("hop:tick"), TICKS as usize);
    assert_eq!(world.count("broken:start"), 1);
    assert_eq!(world.count("broken:end"), 1);
    assert!(!selector.is_running(&broken));
    assert!(selector.is_faulted(&broken));
    assert_eq!(broken.running_in(), None);

    assert_eq!(reports[0].faults.len(), 1);
    let fault = &reports[0].faults[0];
    assert_eq!(fault.goal, broken.id());
    assert_eq!(fault.phase, LifecyclePhase::Tick);
    assert_eq!(fault.priority, 1);
    assert!(fault.to_string().contains("broken refused in tick"));
    assert!(reports[1..].iter().all(|r| r.is_clean()));
}

#[test]
fn failing_start_leaves_the_flags_free() {
    let mut world = LogWorld::default();
    let broken = Probe::new("broken", &[MOVE])
        .failing_in(LifecyclePhase::Start)
        .handle();
    let walk = Probe::new("walk", &[MOVE]).handle();

    let mut selector = GoalSelector::new(1);
    selector.add_task(0, broken.clone()).unwrap();
    selector.add_task(1, walk.clone()).unwrap();

    let report = selector.tick(&ctx(0), &mut world);
    assert_eq!(report.faults.len(), 1);
    assert_eq!(report.faults[0].phase, LifecyclePhase::Start);
    assert_eq!(report.started, 1);
    assert!(!selector.is_running(&broken));
    assert_eq!(broken.running_in(), None);

    // The next candidate in order gets MOVE within the same tick.
    assert!(selector.is_running(&walk));
    assert_eq!(world.log, vec!["walk:start", "walk:tick"]);
}

#[test]
fn failing_start_does_not_preempt_the_holder() {
    let mut world = LogWorld::default();
    let walk = Probe::new("walk", &[MOVE]).handle();
    let broken = Probe::new("broken", &[MOVE])
        .failing_in(LifecyclePhase::Start)
        .handle();

    let mut selector = GoalSelector::new(1);
    selector.add_task(1, walk.clone()).unwrap();
    selector.tick(&ctx(0), &mut world);
    world.take();

    selector.add_task(0, broken.clone()).unwrap();
    let report = selector.tick(&ctx(1), &mut world);
    assert_eq!(report.faults.len(), 1);
    assert_eq!(report.preempted, 0);
    assert_eq!(report.stopped, 0);
    assert!(selector.is_running(&walk));
    assert_eq!(world.log, vec!["walk:tick"]);
}

#[test]
fn retried_failing_start_never_starves_lower_priorities() {
    const TICKS: u64 = 10;

    let mut world = LogWorld::default();
    let broken = Probe::new("broken", &[MOVE])
        .failing_in(LifecyclePhase::Start)
        .handle();
    let walk = Probe::new("walk", &[MOVE]).handle();

    let mut selector =
        GoalSelector::new(1).with_config(SelectorConfig::default().with_retry_faulted(true));
    selector.add_task(0, broken.clone()).unwrap();
    selector.add_task(1, walk.clone()).unwrap();

    let reports = run(&mut selector, &mut world, 0..TICKS);
    assert_eq!(world.count("walk:tick"), TICKS as usize);
    assert_eq!(world.count("walk:end"), 0);
    assert!(reports.iter().all(|r| r.faults.len() == 1 && r.preempted == 0));
}

#[test]
fn failing_should_start_is_reported_and_quarantined() {
    let mut world = LogWorld::default();
    let broken = Probe::new("broken", &[])
        .failing_in(LifecyclePhase::ShouldStart)
        .handle();
    let look = Probe::new("look", &[LOOK]).handle();

    let mut selector = GoalSelector::new(1);
    selector.add_task(0, broken.clone()).unwrap();
    selector.add_task(1, look.clone()).unwrap();

    let reports = run(&mut selector, &mut world, 0..3);
    assert_eq!(reports[0].faults.len(), 1);
    assert_eq!(reports[0].faults[0].phase, LifecyclePhase::ShouldStart);
    assert!(reports[1..].iter().all(|r| r.is_clean()));
    assert!(selector.is_faulted(&broken));
    assert!(selector.is_running(&look));
}

#[test]
fn failing_should_continue_stops_the_entry() {
    let mut world = LogWorld::default();
    let broken = Probe::new("broken", &[MOVE])
        .failing_in(LifecyclePhase::ShouldContinue)
        .handle();

    let mut selector = GoalSelector::new(1);
    selector.add_task(0, broken.clone()).unwrap();
    selector.tick(&ctx(0), &mut world);
    assert!(selector.is_running(&broken));

    let report = selector.tick(&ctx(1), &mut world);
    assert_eq!(report.faults.len(), 1);
    assert_eq!(report.faults[0].phase, LifecyclePhase::ShouldContinue);
    assert_eq!(report.stopped, 1);
    assert!(selector.is_faulted(&broken));
    assert_eq!(
        world.log,
        vec!["broken:start", "broken:tick", "broken:end"]
    );
}

#[test]
fn failing_end_still_stops_the_entry() {
    let mut world = LogWorld::default();
    let broken = Probe::new("broken", &[MOVE]).failing_in(LifecyclePhase::End);
    let wants = broken.want.clone();
    let broken = broken.handle();

    let mut selector = GoalSelector::new(1);
    selector.add_task(0, broken.clone()).unwrap();
    selector.tick(&ctx(0), &mut world);

    wants.set(false);
    let report = selector.tick(&ctx(1), &mut world);
    assert_eq!(report.stopped, 1);
    assert_eq!(report.faults.len(), 1);
    assert_eq!(report.faults[0].phase, LifecyclePhase::End);
    assert_eq!(broken.running_in(), None);

    wants.set(true);
    selector.tick(&ctx(2), &mut world);
    assert!(!selector.is_running(&broken));
}

#[test]
fn quarantine_lifts_on_reset_or_retry() {
    let mut world = LogWorld::default();
    let broken = Probe::new("broken", &[MOVE])
        .failing_in(LifecyclePhase::Start)
        .handle();

    let mut selector = GoalSelector::new(1);
    selector.add_task(0, broken.clone()).unwrap();
    let reports = run(&mut selector, &mut world, 0..3);
    let faults: Vec<usize> = reports.iter().map(|r| r.faults.len()).collect();
    assert_eq!(faults, vec![1, 0, 0]);

    assert_eq!(selector.reset_faults(), 1);
    assert!(!selector.is_faulted(&broken));
    assert_eq!(selector.tick(&ctx(3), &mut world).faults.len(), 1);

    selector.set_config(SelectorConfig::default().with_retry_faulted(true));
    let reports = run(&mut selector, &mut world, 4..7);
    assert!(reports.iter().all(|r| r.faults.len() == 1));
}
