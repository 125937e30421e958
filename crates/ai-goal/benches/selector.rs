use ai_core::{DeterministicRng, SplitMix64, TickContext, WorldMut, WorldView};
use ai_goal::{category_flags, goal_types, FnGoal, GoalHandle, GoalSelector};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

struct BenchWorld;

impl WorldView for BenchWorld {
    type Agent = u64;
}

impl WorldMut for BenchWorld {}

/// A selector with `goals` entries over random flag subsets that flicker on and off.
fn make_selector(agent: u64, goals: usize) -> GoalSelector<BenchWorld> {
    let mut rng = SplitMix64::new(agent);
    let mut selector = GoalSelector::new(agent);
    for i in 0..goals {
        let flags: Vec<_> = category_flags::ALL
            .iter()
            .copied()
            .filter(|_| rng.chance(0.3))
            .collect();
        let period = 2 + rng.next_below(8) as u64;
        let goal = FnGoal::<BenchWorld>::new(goal_types::ALL[i % goal_types::ALL.len()])
            .flags(flags)
            .should_start(move |cx| Ok(cx.tick.tick % period != 0));
        selector
            .add_task(rng.next_below(16) as i32, GoalHandle::new(goal))
            .expect("fresh goal is not running anywhere");
    }
    selector
}

fn bench_selector(c: &mut Criterion) {
    let mut group = c.benchmark_group("ai-goal/selector_tick");

    for &goals in &[4usize, 16, 64] {
        let mut world = BenchWorld;
        let mut selector = make_selector(7, goals);
        let mut tick = 0u64;
        group.bench_with_input(BenchmarkId::from_parameter(goals), &goals, |b, &_goals| {
            b.iter(|| {
                let ctx = TickContext::new(tick, 7);
                tick += 1;
                black_box(selector.tick(&ctx, &mut world).started);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_selector);
criterion_main!(benches);
