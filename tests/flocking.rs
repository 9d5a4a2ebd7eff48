// Behavioural tests for one and many ticks of the flocking update.

use boids::physics::{self, steering_forces, turn_towards};
use boids::{Entity, EntityId, Simulation, SimulationParams, UpdateMode};
use nannou::prelude::{vec2, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EPS: f32 = 1e-5;

fn sim_with(mode: UpdateMode) -> Simulation {
    Simulation::new(SimulationParams {
        update_mode: mode,
        ..SimulationParams::default()
    })
}

fn position_of(sim: &Simulation, id: EntityId) -> Vec2 {
    sim.scene().get(id).unwrap().position
}

fn velocity_of(sim: &Simulation, id: EntityId) -> Vec2 {
    sim.scene().get(id).unwrap().velocity().unwrap()
}

#[test]
fn speed_stays_bounded_in_a_crowded_scene() {
    for mode in [UpdateMode::Sequential, UpdateMode::Snapshot] {
        let mut sim = sim_with(mode);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..60 {
            let position = vec2(rng.gen_range(0.0..800.0), rng.gen_range(0.0..600.0));
            let velocity = vec2(rng.gen_range(-6.0..6.0), rng.gen_range(-6.0..6.0));
            sim.spawn_agent(position, velocity);
        }
        for _ in 0..8 {
            sim.spawn_obstacle(vec2(rng.gen_range(100.0..700.0), rng.gen_range(100.0..500.0)));
        }

        let max_speed = sim.params.max_speed;
        for _ in 0..300 {
            sim.tick();
            for entity in sim.scene() {
                if let Some(velocity) = entity.velocity() {
                    assert!(velocity.is_finite() && entity.position.is_finite());
                    assert!(velocity.length() <= max_speed + EPS, "speed {}", velocity.length());
                }
            }
        }
    }
}

#[test]
fn lone_agent_keeps_its_velocity() {
    let mut sim = Simulation::default();
    let id = sim.spawn_agent(vec2(400.0, 300.0), vec2(0.3, -0.4));
    sim.tick();
    assert_eq!(velocity_of(&sim, id), vec2(0.3, -0.4));
}

#[test]
fn isolated_agent_moves_in_a_straight_line() {
    let mut sim = Simulation::default();
    let velocity = vec2(1.0, 0.0);
    let id = sim.spawn_agent(vec2(300.0, 300.0), velocity);
    sim.flush_commands();

    for _ in 0..150 {
        let before = position_of(&sim, id);
        sim.tick();
        assert_eq!(velocity_of(&sim, id), velocity);
        assert!((position_of(&sim, id) - before - velocity).length() < EPS);
    }
    assert!((position_of(&sim, id) - vec2(450.0, 300.0)).length() < EPS);
}

#[test]
fn agent_near_left_edge_is_pushed_right() {
    let params = SimulationParams::default();
    let entities = vec![Entity::agent(EntityId(0), vec2(50.0, 300.0), vec2(1.0, 0.0), 5.0)];
    let forces = steering_forces(&entities, 0, &params).unwrap();

    assert_eq!(forces.boundary, vec2(params.turn_factor, 0.0));
    assert_eq!(forces.total(), vec2(params.turn_factor, 0.0));
}

#[test]
fn close_agents_repel_each_other() {
    let params = SimulationParams::default();
    let entities = vec![
        Entity::agent(EntityId(0), vec2(300.0, 300.0), vec2(1.0, 0.0), 5.0),
        Entity::agent(EntityId(1), vec2(306.0, 308.0), vec2(1.0, 0.0), 5.0),
    ];
    let expected = 10.0 * params.avoid_factor;

    let a = steering_forces(&entities, 0, &params).unwrap();
    let b = steering_forces(&entities, 1, &params).unwrap();

    assert!((a.separation.length() - expected).abs() < EPS);
    assert!((b.separation.length() - expected).abs() < EPS);
    // Away from the other agent
    assert!(a.separation.dot(vec2(6.0, 8.0)) < 0.0);
    assert!(b.separation.dot(vec2(-6.0, -8.0)) < 0.0);
    assert!((a.separation + b.separation).length() < EPS);
    assert_eq!(a.aligned_with, 0);
}

#[test]
fn heading_turns_by_one_step_toward_a_perpendicular_target() {
    let rad_step = SimulationParams::default().rad_step;
    let velocity = vec2(2.0, 0.0);

    let left = turn_towards(velocity, vec2(0.0, 5.0), rad_step);
    let right = turn_towards(velocity, vec2(0.0, -5.0), rad_step);

    assert!((left.y.atan2(left.x) - rad_step).abs() < EPS);
    assert!((right.y.atan2(right.x) + rad_step).abs() < EPS);
    assert!((left.length() - velocity.length()).abs() < EPS);
    assert!((right.length() - velocity.length()).abs() < EPS);
}

#[test]
fn three_agent_scenario() {
    let mut sim = Simulation::default();
    let a = sim.spawn_agent(vec2(100.0, 300.0), vec2(1.0, 0.0));
    let b = sim.spawn_agent(vec2(110.0, 300.0), vec2(1.0, 0.0));
    let c = sim.spawn_agent(vec2(400.0, 300.0), vec2(1.0, 0.0));
    sim.flush_commands();

    let params = sim.params.clone();
    let entities = sim.scene().entities();
    let fa = steering_forces(entities, 0, &params).unwrap();
    let fb = steering_forces(entities, 1, &params).unwrap();
    let fc = steering_forces(entities, 2, &params).unwrap();

    // The close pair pushes apart
    assert!((fa.separation - vec2(-10.0 * params.avoid_factor, 0.0)).length() < EPS);
    assert!((fb.separation - vec2(10.0 * params.avoid_factor, 0.0)).length() < EPS);
    // The far agent only aligns, in both directions
    assert_eq!(fa.aligned_with, 1);
    assert_eq!(fb.aligned_with, 1);
    assert_eq!(fc.aligned_with, 2);
    assert_eq!(fc.separation, Vec2::ZERO);
    assert_eq!(fc.flock_size, 3);

    let gap_before = position_of(&sim, b).x - position_of(&sim, a).x;
    sim.tick();
    let gap_after = position_of(&sim, b).x - position_of(&sim, a).x;
    assert!(gap_after > gap_before);
    // Cohesion pulls the far agent back toward the pair
    assert!(velocity_of(&sim, c).x < 1.0);
}

#[test]
fn sequential_update_sees_earlier_agents_new_state() {
    let mut sim = sim_with(UpdateMode::Sequential);
    sim.spawn_agent(vec2(300.0, 300.0), vec2(1.0, 0.0));
    sim.spawn_agent(vec2(310.0, 300.0), vec2(-1.0, 0.0));
    sim.flush_commands();

    // Replay by hand: the first agent moves, then the second reads it
    let params = sim.params.clone();
    let mut entities = sim.scene().entities().to_vec();
    let (p0, v0) = physics::step_agent(&entities, 0, &params).unwrap();
    entities[0].position = p0;
    entities[0].kind = boids::EntityKind::Agent { velocity: v0 };
    let (p1, v1) = physics::step_agent(&entities, 1, &params).unwrap();

    sim.tick();
    let scene: Vec<&Entity> = sim.scene().iter().collect();
    assert_eq!(scene[0].position, p0);
    assert_eq!(scene[1].position, p1);
    assert_eq!(scene[1].velocity(), Some(v1));
}

#[test]
fn snapshot_update_reads_pre_tick_state() {
    let mut sequential = sim_with(UpdateMode::Sequential);
    let mut snapshot = sim_with(UpdateMode::Snapshot);
    for sim in [&mut sequential, &mut snapshot] {
        sim.spawn_agent(vec2(300.0, 300.0), vec2(1.0, 0.0));
        sim.spawn_agent(vec2(310.0, 300.0), vec2(-1.0, 0.0));
        sim.flush_commands();
    }

    let params = snapshot.params.clone();
    let pre_tick = snapshot.scene().entities().to_vec();
    let (p1, _) = physics::step_agent(&pre_tick, 1, &params).unwrap();

    snapshot.tick();
    sequential.tick();

    let second = |sim: &Simulation| sim.scene().iter().nth(1).unwrap().position;
    assert_eq!(second(&snapshot), p1);
    assert_ne!(second(&sequential), second(&snapshot));
}

#[test]
fn snapshot_update_does_not_depend_on_order() {
    let forward = [(vec2(300.0, 300.0), vec2(1.0, 0.0)), (vec2(320.0, 310.0), vec2(0.0, 1.0))];

    let mut in_order = sim_with(UpdateMode::Snapshot);
    let mut reversed = sim_with(UpdateMode::Snapshot);
    let a1 = in_order.spawn_agent(forward[0].0, forward[0].1);
    let b1 = in_order.spawn_agent(forward[1].0, forward[1].1);
    let b2 = reversed.spawn_agent(forward[1].0, forward[1].1);
    let a2 = reversed.spawn_agent(forward[0].0, forward[0].1);

    for _ in 0..20 {
        in_order.tick();
        reversed.tick();
    }

    assert!((position_of(&in_order, a1) - position_of(&reversed, a2)).length() < EPS);
    assert!((position_of(&in_order, b1) - position_of(&reversed, b2)).length() < EPS);
}

#[test]
fn obstacles_survive_clearing_and_never_move() {
    let mut sim = Simulation::default();
    let obstacle = sim.spawn_obstacle(vec2(400.0, 300.0));
    sim.spawn_agent(vec2(380.0, 300.0), vec2(1.0, 0.0));

    for _ in 0..50 {
        sim.tick();
    }
    assert_eq!(position_of(&sim, obstacle), vec2(400.0, 300.0));

    sim.clear_agents();
    sim.tick();
    assert_eq!(sim.scene().agent_count(), 0);
    assert_eq!(sim.scene().obstacle_count(), 1);
}

#[test]
fn selection_does_not_change_physics() {
    let mut plain = Simulation::default();
    let mut selected = Simulation::default();
    for sim in [&mut plain, &mut selected] {
        sim.spawn_agent(vec2(200.0, 200.0), vec2(1.0, 0.5));
        sim.spawn_agent(vec2(230.0, 210.0), vec2(-0.5, 1.0));
        sim.spawn_obstacle(vec2(260.0, 220.0));
    }
    selected.toggle_selection(vec2(200.0, 200.0), 10.0);
    selected.toggle_selection(vec2(260.0, 220.0), 10.0);

    for _ in 0..30 {
        plain.tick();
        selected.tick();
    }

    let positions = |sim: &Simulation| sim.scene().iter().map(|e| e.position).collect::<Vec<_>>();
    assert_eq!(positions(&plain), positions(&selected));
    assert_eq!(selected.scene().iter().filter(|e| e.selected).count(), 2);
}
