//! End-to-end simulation tests: queue measurement, vehicle flow, and the
//! phase cycle driven through `SimWorld::tick`.

use signal_sim::simulation::{
    measure_queues, must_stop, Approach, LightBank, Phase, PolicyTable, Position, SimWorld,
    Vehicle, VehicleKind, MIN_GREEN, VEHICLE_SPEED,
};

fn vehicle(x: f32, y: f32, approach: Approach) -> Vehicle {
    Vehicle::new(Position::new(x, y), VehicleKind::Sedan, approach)
}

#[test]
fn test_queue_counts_and_backward_propagation() {
    // NS green, EW red at construction.
    let lights = LightBank::new();
    let mut vehicles = vec![
        // Past the eastbound threshold on red: queued directly.
        vehicle(320.0, 250.0, Approach::Eastbound),
        // Far behind and moving fast, but behind a queued leader: propagated.
        vehicle(100.0, 250.0, Approach::Eastbound),
        // Past the southbound threshold on green: released, not queued.
        vehicle(390.0, 200.0, Approach::Southbound),
    ];

    let (ns, ew) = measure_queues(&mut vehicles, &lights);
    assert_eq!(ns, 0);
    assert_eq!(ew, 2);
    assert!(vehicles[2].has_passed_stop_line());
}

#[test]
fn test_free_flowing_lane_contributes_zero() {
    let lights = LightBank::new();
    let mut vehicles = vec![
        vehicle(100.0, 250.0, Approach::Eastbound),
        vehicle(-10.0, 250.0, Approach::Eastbound),
        vehicle(390.0, 0.0, Approach::Southbound),
    ];

    let (ns, ew) = measure_queues(&mut vehicles, &lights);
    assert_eq!((ns, ew), (0, 0));
}

#[test]
fn test_slow_vehicle_is_queued() {
    let lights = LightBank::new();
    let mut crawler = vehicle(390.0, 0.0, Approach::Southbound);
    crawler.speed = 0.0;
    let mut vehicles = vec![crawler];

    let (ns, ew) = measure_queues(&mut vehicles, &lights);
    assert_eq!((ns, ew), (1, 0));
}

#[test]
fn test_measurement_independent_of_collection_order() {
    let lights = LightBank::new();
    let build = |reversed: bool| {
        let mut v = vec![
            vehicle(320.0, 250.0, Approach::Eastbound),
            vehicle(200.0, 250.0, Approach::Eastbound),
            vehicle(100.0, 250.0, Approach::Eastbound),
        ];
        if reversed {
            v.reverse();
        }
        v
    };

    let forward = measure_queues(&mut build(false), &lights);
    let backward = measure_queues(&mut build(true), &lights);
    assert_eq!(forward, backward);
}

#[test]
fn test_stop_line_latch_wins_over_stall() {
    let lights = LightBank::new();

    // Latched vehicles are never force-stopped again, stalled or not.
    let mut latched = vehicle(500.0, 460.0, Approach::Northbound);
    latched.mark_passed_stop_line();
    latched.stopped_time = 5.0;
    assert!(!must_stop(&mut latched, &lights));

    // An unlatched vehicle stalled past the limit is queued regardless of
    // its light, even before the threshold.
    let mut stalled = vehicle(390.0, 50.0, Approach::Southbound);
    stalled.stopped_time = 2.5;
    assert!(must_stop(&mut stalled, &lights));

    // Before the threshold, a fresh vehicle is never forced to stop.
    let mut fresh = vehicle(390.0, 50.0, Approach::Southbound);
    assert!(!must_stop(&mut fresh, &lights));
}

#[test]
fn test_spawn_timing() {
    let mut world = SimWorld::with_seed(PolicyTable::empty(), 1);
    assert_eq!(world.vehicle_count(), 0);

    // Default spawn interval is 1.0s; dt accumulates to it on the 10th tick.
    for _ in 0..10 {
        world.tick(0.1);
    }
    assert_eq!(world.vehicle_count(), 1);

    for _ in 0..10 {
        world.tick(0.1);
    }
    assert_eq!(world.vehicle_count(), 2);
}

#[test]
fn test_unobstructed_vehicle_travels_and_is_removed() {
    let mut world = SimWorld::with_seed(PolicyTable::empty(), 3);
    world.set_spawn_interval(f32::INFINITY);

    // Southbound entry at y = -50; NS starts green, so the vehicle latches
    // at the stop line and crosses the 700-unit span in ~5.8s at 120/s.
    world.vehicles.push(vehicle(390.0, -50.0, Approach::Southbound));

    for _ in 0..20 {
        world.tick(0.1);
    }
    assert_eq!(world.vehicle_count(), 1);
    assert!(world.vehicles[0].has_passed_stop_line());

    for _ in 0..60 {
        world.tick(0.1);
    }
    assert_eq!(world.vehicle_count(), 0);
}

#[test]
fn test_following_distance_enforced() {
    let mut world = SimWorld::with_seed(PolicyTable::empty(), 5);
    world.set_spawn_interval(f32::INFINITY);

    // Both past the southbound threshold on green; the gap of 60 is under
    // the 80-unit following distance, so only the leader may move.
    world.vehicles.push(vehicle(390.0, 300.0, Approach::Southbound));
    world.vehicles.push(vehicle(390.0, 240.0, Approach::Southbound));

    world.tick(0.1);
    let leader_y = world.vehicles[0].position.y;
    let follower = &world.vehicles[1];
    assert!((leader_y - 312.0).abs() < 0.1);
    assert_eq!(follower.position.y, 240.0);
    assert_eq!(follower.speed, 0.0);

    // Once the gap opens to 80 or more, the follower is released.
    world.tick(0.1);
    let follower = &world.vehicles[1];
    assert!((follower.position.y - 252.0).abs() < 0.1);
    assert_eq!(follower.speed, VEHICLE_SPEED);
}

#[test]
fn test_phase_cycle_and_segment_durations() {
    let mut world = SimWorld::with_seed(PolicyTable::empty(), 7);
    world.set_spawn_interval(f32::INFINITY);

    let dt = 0.1;
    let mut last_phase = world.phase();
    let mut segment_ticks = 0u32;
    let mut segment_budget = world.current_green_time();
    let mut transitions = Vec::new();

    assert_eq!(last_phase, Phase::NsGreen);

    for _ in 0..600 {
        world.tick(dt);
        segment_ticks += 1;
        let phase = world.phase();
        if phase != last_phase {
            transitions.push((last_phase, phase, segment_ticks as f32 * dt, segment_budget));
            last_phase = phase;
            segment_ticks = 0;
            segment_budget = world.current_green_time();
        }
    }
    assert!(transitions.len() >= 6, "too few transitions observed");

    for (from, to, duration, budget) in transitions {
        let expected_next = match from {
            Phase::NsGreen => Phase::NsYellow,
            Phase::NsYellow => Phase::EwGreen,
            Phase::EwGreen => Phase::EwYellow,
            Phase::EwYellow => Phase::NsGreen,
        };
        assert_eq!(to, expected_next, "phase order broken at {:?}", from);

        match from {
            Phase::NsYellow | Phase::EwYellow => {
                assert!((duration - 2.0).abs() < 0.2, "yellow lasted {}", duration);
            }
            Phase::NsGreen | Phase::EwGreen => {
                assert!(
                    (duration - budget).abs() < 0.2,
                    "green lasted {} with budget {}",
                    duration,
                    budget
                );
            }
        }
    }
}

#[test]
fn test_green_time_bounded_through_full_run() {
    let mut world = SimWorld::with_seed(PolicyTable::empty(), 13);

    for _ in 0..2000 {
        world.tick(0.05);
        let green = world.current_green_time();
        assert!(
            (MIN_GREEN..=8.0).contains(&green),
            "green time {} left its valid range",
            green
        );
    }
}
