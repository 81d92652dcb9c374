//! Integration tests for cc-sim.

use std::ops::ControlFlow;

use cc_agent::{Agent, AgentState, Objective};
use cc_core::{AgentId, CrewConfig, Point, Tick};
use cc_tasks::TaskSet;

use crate::{Coordinator, NoopObserver, Sim, SimBuilder, SimError, SimObserver, Snapshot, TickOutcome, Totals};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(agent_count: usize, speed: f64) -> CrewConfig {
    CrewConfig {
        agent_count,
        speed,
        ..Default::default()
    }
}

fn sim_with(agents: Vec<Point>, tasks: Vec<Point>, speed: f64) -> Sim {
    SimBuilder::new(config(agents.len(), speed))
        .initial_positions(agents)
        .tasks(tasks)
        .build()
        .unwrap()
}

/// Every tick: conservation holds and no carrier aims anywhere but the depot.
struct InvariantChecker {
    depot:     Point,
    snapshots: usize,
}

impl SimObserver for InvariantChecker {
    fn on_tick_end(&mut self, tick: Tick, _o: &TickOutcome, totals: &Totals) {
        assert!(totals.is_conserved(), "{tick}: {totals:?}");
    }

    fn on_snapshot(&mut self, snap: &Snapshot<'_>) {
        self.snapshots += 1;
        assert!(snap.totals().is_conserved());
        for a in snap.agents {
            if a.is_carrying() {
                assert_eq!(a.objective(), Some(Objective::Depot(self.depot)), "{}", a.id());
            }
            if let Some(Objective::Task { id, at }) = a.objective() {
                assert!(!a.is_carrying());
                let live = snap.tasks.get(id);
                assert_eq!(live.map(|t| t.location), Some(at), "{} targets dead {id}", a.id());
            }
        }
    }
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let sim = SimBuilder::new(CrewConfig::default()).build().unwrap();
        assert_eq!(sim.agents().len(), 5);
        assert_eq!(sim.tasks().len(), 20);
        assert_eq!(sim.clock.current_tick, Tick(0));
        assert_eq!(sim.coordinator().depot(), Point::new(740.0, 540.0));
        assert!(sim.agents().iter().all(|a| a.state() == AgentState::Idle));
    }

    #[test]
    fn agent_ids_follow_slice_order() {
        let sim = SimBuilder::new(CrewConfig::default()).build().unwrap();
        for (i, a) in sim.agents().iter().enumerate() {
            assert_eq!(a.id(), AgentId(i as u32));
        }
    }

    #[test]
    fn random_placement_respects_bounds() {
        let cfg = CrewConfig { task_count: 500, agent_count: 50, ..Default::default() };
        let depot = cfg.depot();
        let sim = SimBuilder::new(cfg).build().unwrap();

        for a in sim.agents() {
            let p = a.position();
            assert!((60.0..=640.0).contains(&p.x) && (60.0..=440.0).contains(&p.y), "{p}");
            assert_eq!(p.x.fract(), 0.0);
        }
        for p in sim.tasks().points() {
            assert!((50.0..=650.0).contains(&p.x) && (50.0..=450.0).contains(&p.y), "{p}");
            assert!(!depot.near(p, 20.0), "{p} too close to depot");
        }
    }

    #[test]
    fn same_seed_same_world() {
        let a = SimBuilder::new(CrewConfig::default()).build().unwrap();
        let b = SimBuilder::new(CrewConfig::default()).build().unwrap();
        assert_eq!(a.agents(), b.agents());
        assert!(a.tasks().iter().eq(b.tasks().iter()));
    }

    #[test]
    fn agent_count_does_not_move_tasks() {
        let a = SimBuilder::new(config(2, 2.0)).build().unwrap();
        let b = SimBuilder::new(config(9, 2.0)).build().unwrap();
        assert!(a.tasks().iter().eq(b.tasks().iter()));
    }

    #[test]
    fn position_count_mismatch_errors() {
        let result = SimBuilder::new(config(3, 2.0))
            .initial_positions(vec![Point::ORIGIN; 2])
            .build();
        assert!(matches!(result, Err(SimError::AgentCountMismatch { expected: 3, got: 2, .. })));
    }

    #[test]
    fn invalid_config_fails_fast() {
        let result = SimBuilder::new(config(0, 2.0)).build();
        assert!(matches!(result, Err(SimError::Config(_))));
        let result = SimBuilder::new(config(1, -2.0)).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn depot_covering_spawn_area_fails_placement() {
        let cfg = CrewConfig {
            world_width:  800.0,
            world_height: 800.0,
            depot_size:   720.0,
            task_count:   1,
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());
        let result = SimBuilder::new(cfg).build();
        assert!(matches!(result, Err(SimError::Placement { .. })));
    }

    #[test]
    fn explicit_tasks_override_task_count() {
        let sim = SimBuilder::new(CrewConfig::default())
            .tasks(vec![Point::new(1.0, 1.0)])
            .build()
            .unwrap();
        assert_eq!(sim.tasks().len(), 1);
    }
}

// ── Coordinator ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod coordinator_tests {
    use super::*;

    const DEPOT: Point = Point::new(500.0, 500.0);

    #[test]
    fn assigns_nearest_task() {
        let coord = Coordinator::new(DEPOT, 1.0);
        let mut tasks = TaskSet::from_points([Point::new(100.0, 0.0), Point::new(10.0, 0.0)]);
        let mut agents = vec![Agent::new(AgentId(0), Point::ORIGIN)];

        let out = coord.step(&mut agents, &mut tasks);
        assert_eq!(out.assigned, 1);
        assert_eq!(agents[0].objective().map(|o| o.point()), Some(Point::new(10.0, 0.0)));
        assert_eq!(agents[0].position(), Point::new(1.0, 0.0));
    }

    #[test]
    fn valid_objective_is_kept() {
        let coord = Coordinator::new(DEPOT, 1.0);
        let mut tasks = TaskSet::from_points([Point::new(10.0, 0.0)]);
        let mut agents = vec![Agent::new(AgentId(0), Point::ORIGIN)];
        coord.step(&mut agents, &mut tasks);

        // A closer task appears behind the agent; it keeps its objective.
        tasks.insert(Point::new(-1.5, 0.0));
        let out = coord.step(&mut agents, &mut tasks);
        assert_eq!(out.assigned, 0);
        assert_eq!(agents[0].sought_task(), Some(cc_core::TaskId(0)));
    }

    #[test]
    fn stale_objective_reassigned_same_tick() {
        let coord = Coordinator::new(DEPOT, 1.0);
        let mut tasks = TaskSet::from_points([Point::new(10.0, 0.0), Point::new(0.0, 30.0)]);
        let mut agents = vec![Agent::new(AgentId(0), Point::ORIGIN)];
        coord.step(&mut agents, &mut tasks);
        assert_eq!(agents[0].sought_task(), Some(cc_core::TaskId(0)));

        tasks.remove(cc_core::TaskId(0));
        let out = coord.step(&mut agents, &mut tasks);
        assert_eq!(out.assigned, 1);
        assert_eq!(agents[0].sought_task(), Some(cc_core::TaskId(1)));
    }

    #[test]
    fn stale_objective_with_empty_set_goes_idle() {
        let coord = Coordinator::new(DEPOT, 1.0);
        let mut tasks = TaskSet::from_points([Point::new(10.0, 0.0)]);
        let mut agents = vec![Agent::new(AgentId(0), Point::ORIGIN)];
        coord.step(&mut agents, &mut tasks);

        tasks.remove(cc_core::TaskId(0));
        let before = agents[0].position();
        coord.step(&mut agents, &mut tasks);
        assert_eq!(agents[0].state(), AgentState::Idle);
        assert_eq!(agents[0].position(), before);
    }

    #[test]
    fn objective_dropped_in_the_tick_its_task_is_taken() {
        let coord = Coordinator::new(DEPOT, 2.0);
        let mut tasks = TaskSet::from_points([Point::ORIGIN]);
        let mut agents = vec![
            Agent::new(AgentId(0), Point::new(-10.0, 0.0)),
            Agent::new(AgentId(1), Point::new(4.0, 0.0)),
        ];

        coord.step(&mut agents, &mut tasks);
        assert_eq!(agents[0].sought_task(), Some(cc_core::TaskId(0)));

        // Agent 1 arrives and collects; agent 0 must not keep a dead target.
        let out = coord.step(&mut agents, &mut tasks);
        assert_eq!(out.pickups, 1);
        assert_eq!(out.lost_races, 0);
        assert!(agents[1].is_carrying());
        assert_eq!(agents[0].objective(), None);
        assert_eq!(agents[0].state(), AgentState::Idle);
    }

    #[test]
    fn colocated_tasks_are_distinct_identities() {
        // Two tasks at one point: the first pickup must not make the second
        // look taken.
        let coord = Coordinator::new(DEPOT, 5.0);
        let p = Point::new(3.0, 4.0);
        let mut tasks = TaskSet::from_points([p, p]);
        let mut agents = vec![
            Agent::new(AgentId(0), Point::ORIGIN),
            Agent::new(AgentId(1), Point::new(6.0, 8.0)),
        ];

        let out = coord.step(&mut agents, &mut tasks);
        // Both were assigned task 0 (tie → lowest id); one wins the race.
        assert_eq!(out.pickups, 1);
        assert_eq!(out.lost_races, 1);
        assert_eq!(tasks.len(), 1);
        assert_eq!(agents[1].state(), AgentState::Idle);

        // Agent 1 takes task 1 and, already on the spot, collects it at once.
        let out = coord.step(&mut agents, &mut tasks);
        assert_eq!(out.assigned, 1);
        assert_eq!(out.pickups, 1);
        assert!(agents[1].is_carrying());
        assert_eq!(agents[1].objective(), Some(Objective::Depot(DEPOT)));
        assert!(tasks.is_empty());
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use super::*;

    #[test]
    fn single_agent_collects_after_ceil_distance_over_speed_ticks() {
        let task = Point::new(100.0, 100.0);
        let mut sim = sim_with(vec![Point::ORIGIN], vec![task], 10.0);
        let ticks = (Point::ORIGIN.distance(task) / 10.0).ceil() as u64;
        assert_eq!(ticks, 15);

        sim.run_ticks(ticks - 1, &mut NoopObserver);
        assert!(!sim.agents()[0].is_carrying());
        assert_eq!(sim.tasks().len(), 1);

        let out = sim.tick(&mut NoopObserver);
        assert_eq!(out.pickups, 1);
        assert!(sim.agents()[0].is_carrying());
        assert!(sim.tasks().is_empty());
        assert_eq!(sim.agents()[0].state(), AgentState::Returning);
    }

    #[test]
    fn race_for_one_task_has_one_winner() {
        // Both agents are 10 units away and arrive on the same tick.
        let mut sim = sim_with(
            vec![Point::new(-10.0, 0.0), Point::new(10.0, 0.0)],
            vec![Point::ORIGIN],
            2.0,
        );

        let mut pickups = 0;
        let mut lost = 0;
        for _ in 0..5 {
            let out = sim.tick(&mut NoopObserver);
            pickups += out.pickups;
            lost += out.lost_races;
        }
        assert_eq!(pickups, 1);
        assert_eq!(lost, 1);
        assert!(sim.tasks().is_empty());

        let carrying: Vec<_> = sim.agents().iter().filter(|a| a.is_carrying()).map(|a| a.id()).collect();
        assert_eq!(carrying, [AgentId(0)], "lower id resolves first");
        assert_eq!(sim.agents()[1].state(), AgentState::Idle);

        // The loser is reassigned as soon as new work appears.
        sim.queue_task(Point::new(20.0, 0.0));
        let out = sim.tick(&mut NoopObserver);
        assert_eq!(out.inserted, 1);
        assert_eq!(out.assigned, 1);
        assert_eq!(sim.agents()[1].state(), AgentState::Seeking);
    }

    #[test]
    fn race_with_different_distances_loser_sees_stale_objective() {
        let mut sim = sim_with(
            vec![Point::new(-10.0, 0.0), Point::new(4.0, 0.0)],
            vec![Point::ORIGIN],
            2.0,
        );
        let mut total = TickOutcome::default();
        for _ in 0..6 {
            let out = sim.tick(&mut NoopObserver);
            total.pickups += out.pickups;
            total.lost_races += out.lost_races;
        }
        assert_eq!(total.pickups, 1);
        assert_eq!(total.lost_races, 0, "the farther agent noticed before arriving");
        assert!(sim.agents()[1].is_carrying());
        assert_eq!(sim.agents()[0].state(), AgentState::Idle);
    }

    #[test]
    fn no_agent_seeks_a_collected_task_between_ticks() {
        let depot = CrewConfig::default().depot().centre();
        let mut sim = sim_with(
            vec![Point::new(-10.0, 0.0), Point::new(4.0, 0.0), Point::new(0.0, 9.0)],
            vec![Point::ORIGIN, Point::new(30.0, 30.0)],
            2.0,
        );
        let mut checker = InvariantChecker { depot, snapshots: 0 };
        sim.run_ticks(40, &mut checker);
        assert_eq!(checker.snapshots, 40);
    }

    #[test]
    fn task_at_depot_is_collected_and_delivered() {
        let depot = CrewConfig::default().depot().centre();
        let mut sim = sim_with(vec![Point::new(700.0, 540.0)], vec![depot], 2.0);

        sim.run_ticks(20, &mut NoopObserver);
        assert!(sim.agents()[0].is_carrying());
        assert!(sim.tasks().is_empty());

        let out = sim.tick(&mut NoopObserver);
        assert_eq!(out.drop_offs, 1);
        assert_eq!(sim.delivered(), 1);
        assert_eq!(sim.agents()[0].state(), AgentState::Idle);
    }

    #[test]
    fn no_tasks_tick_changes_nothing() {
        let mut sim = SimBuilder::new(CrewConfig::default()).tasks(vec![]).build().unwrap();
        let before = sim.agents().to_vec();
        for _ in 0..10 {
            let out = sim.tick(&mut NoopObserver);
            assert!(out.is_quiet());
        }
        assert_eq!(sim.agents(), before.as_slice());
        assert_eq!(sim.totals(), Totals::default());
    }

    #[test]
    fn full_run_delivers_everything() {
        let cfg = CrewConfig { total_ticks: Some(20_000), ..Default::default() };
        let depot = cfg.depot().centre();
        let mut sim = SimBuilder::new(cfg).build().unwrap();
        let mut checker = InvariantChecker { depot, snapshots: 0 };
        sim.run(&mut checker);

        let totals = sim.totals();
        assert_eq!(totals.inserted, 20);
        assert_eq!(totals.delivered, 20, "{totals:?}");
        assert_eq!(checker.snapshots, 20_000);
        assert!(sim.agents().iter().all(|a| a.state() == AgentState::Idle));
    }
}

// ── Driver ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod driver_tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        starts:    usize,
        ends:      usize,
        snapshots: Vec<Tick>,
        finished:  Option<(Tick, Totals)>,
    }

    impl SimObserver for Counter {
        fn on_tick_start(&mut self, _t: Tick) {
            self.starts += 1;
        }
        fn on_tick_end(&mut self, _t: Tick, _o: &TickOutcome, _totals: &Totals) {
            self.ends += 1;
        }
        fn on_snapshot(&mut self, snap: &Snapshot<'_>) {
            self.snapshots.push(snap.tick);
        }
        fn on_sim_end(&mut self, tick: Tick, totals: &Totals) {
            self.finished = Some((tick, *totals));
        }
    }

    #[test]
    fn run_stops_at_total_ticks() {
        let cfg = CrewConfig { total_ticks: Some(7), ..Default::default() };
        let mut sim = SimBuilder::new(cfg).build().unwrap();
        let mut obs = Counter::default();
        sim.run(&mut obs);
        assert_eq!(sim.clock.current_tick, Tick(7));
        assert_eq!(obs.starts, 7);
        assert_eq!(obs.ends, 7);
        assert_eq!(obs.finished.map(|(t, _)| t), Some(Tick(7)));
    }

    #[test]
    fn snapshots_follow_output_interval() {
        let cfg = CrewConfig { output_interval_ticks: 10, ..Default::default() };
        let mut sim = SimBuilder::new(cfg).build().unwrap();
        let mut obs = Counter::default();
        sim.run_ticks(25, &mut obs);
        assert_eq!(obs.snapshots, [Tick(0), Tick(10), Tick(20)]);
    }

    #[test]
    fn queued_tasks_wait_for_next_tick() {
        let mut sim = sim_with(vec![Point::ORIGIN], vec![], 1.0);
        sim.queue_task(Point::new(300.0, 300.0));
        assert!(sim.tasks().is_empty());
        assert_eq!(sim.totals().inserted, 0);

        let out = sim.tick(&mut NoopObserver);
        assert_eq!(out.inserted, 1);
        assert_eq!(out.assigned, 1);
        assert_eq!(sim.tasks().len(), 1);
    }

    #[test]
    fn insert_task_is_immediate() {
        let mut sim = sim_with(vec![Point::ORIGIN], vec![Point::new(5.0, 5.0)], 1.0);
        let id = sim.insert_task(Point::new(9.0, 9.0));
        assert!(sim.tasks().contains(id));
        assert_eq!(sim.snapshot().task_points().count(), 2);
    }

    #[test]
    fn snapshot_reflects_last_completed_tick() {
        let mut sim = sim_with(vec![Point::ORIGIN], vec![Point::new(50.0, 0.0)], 1.0);
        assert_eq!(sim.snapshot().tick, Tick(0));
        assert_eq!(sim.clock.current_tick, Tick(0));

        // After one tick the label is unchanged; the clock disambiguates.
        sim.tick(&mut NoopObserver);
        assert_eq!(sim.snapshot().tick, Tick(0));
        assert_eq!(sim.clock.current_tick, Tick(1));
        assert_eq!(sim.snapshot().agents[0].position(), Point::new(1.0, 0.0));

        sim.run_ticks(2, &mut NoopObserver);
        let snap = sim.snapshot();
        assert_eq!(snap.tick, Tick(2));
        assert_eq!(snap.agents[0].position(), Point::new(3.0, 0.0));
        assert_eq!(snap.depot, sim.depot);
    }

    #[test]
    fn identical_runs_are_identical() {
        let run = || {
            let mut sim = SimBuilder::new(CrewConfig::default()).build().unwrap();
            for t in 0..1_500u64 {
                if t % 97 == 0 {
                    sim.queue_task(Point::new((t % 600) as f64, (t % 400) as f64));
                }
                sim.tick(&mut NoopObserver);
            }
            (sim.agents().to_vec(), sim.totals())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn conservation_under_click_stream() {
        let cfg = CrewConfig { agent_count: 8, ..Default::default() };
        let depot = cfg.depot().centre();
        let mut sim = SimBuilder::new(cfg).build().unwrap();
        let mut checker = InvariantChecker { depot, snapshots: 0 };
        for t in 0..3_000u64 {
            if t % 13 == 0 {
                // Clicks land anywhere, including on the depot itself.
                sim.queue_task(if t % 2 == 0 { depot } else { Point::new(100.0 + t as f64 % 500.0, 80.0) });
            }
            sim.tick(&mut checker);
        }
        assert!(sim.totals().is_conserved());
        assert_eq!(checker.snapshots, 3_000);
    }

    #[test]
    fn run_paced_stops_on_break_and_feeds_input() {
        let cfg = CrewConfig { tick_rate_hz: 1_000, ..Default::default() };
        let mut sim = SimBuilder::new(cfg).tasks(vec![]).build().unwrap();
        let mut obs = Counter::default();
        let mut calls = 0;
        sim.run_paced(&mut obs, |sim| {
            calls += 1;
            if calls > 3 {
                return ControlFlow::Break(());
            }
            sim.queue_task(Point::new(200.0, 200.0));
            ControlFlow::Continue(())
        });
        assert_eq!(sim.clock.current_tick, Tick(3));
        assert_eq!(obs.ends, 3);
        assert_eq!(sim.totals().inserted, 3);
        assert!(obs.finished.is_some());
    }

    #[test]
    fn run_paced_respects_total_ticks() {
        let cfg = CrewConfig { tick_rate_hz: 1_000, total_ticks: Some(4), ..Default::default() };
        let mut sim = SimBuilder::new(cfg).build().unwrap();
        sim.run_paced(&mut NoopObserver, |_| ControlFlow::Continue(()));
        assert_eq!(sim.clock.current_tick, Tick(4));
    }
}

// ── Pacer ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod pacer_tests {
    use std::time::{Duration, Instant};

    use crate::TickPacer;

    #[test]
    fn paces_to_period() {
        let mut pacer = TickPacer::new(Duration::from_millis(5));
        let t0 = Instant::now();
        for _ in 0..4 {
            pacer.wait();
        }
        assert!(t0.elapsed() >= Duration::from_millis(18));
    }

    #[test]
    fn late_pacer_does_not_sleep() {
        let mut pacer = TickPacer::new(Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(pacer.wait(), Duration::ZERO);
        assert_eq!(pacer.period(), Duration::from_millis(1));
    }
}
