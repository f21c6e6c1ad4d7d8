//! Queue estimation over continuous vehicle positions
//!
//! Converts vehicle positions, speeds, and light states into the two scalar
//! queue lengths the controller consumes. Classification propagates strictly
//! backward through each lane: every vehicle behind a queued vehicle is
//! queued too.

use std::cmp::Reverse;

use ordered_float::OrderedFloat;

use super::light::LightBank;
use super::stopline;
use super::types::{Approach, Axis, LOW_SPEED_THRESHOLD};
use super::vehicle::Vehicle;

/// Indices of one lane's vehicles ordered front to back.
///
/// Front means closest to the intersection. Sorting on `OrderedFloat` gives
/// a total order, so the result does not depend on how the collection was
/// iterated.
pub fn lane_front_to_back(vehicles: &[Vehicle], approach: Approach) -> Vec<usize> {
    let mut lane: Vec<usize> = (0..vehicles.len())
        .filter(|&i| vehicles[i].approach == approach)
        .collect();
    match approach {
        // Southbound moves toward larger y, so the largest y leads.
        Approach::Southbound => {
            lane.sort_by_key(|&i| Reverse(OrderedFloat(vehicles[i].position.y)))
        }
        Approach::Northbound => lane.sort_by_key(|&i| OrderedFloat(vehicles[i].position.y)),
        Approach::Eastbound => {
            lane.sort_by_key(|&i| Reverse(OrderedFloat(vehicles[i].position.x)))
        }
        Approach::Westbound => lane.sort_by_key(|&i| OrderedFloat(vehicles[i].position.x)),
    }
    lane
}

/// Measure the north-south and east-west queue lengths.
///
/// A vehicle is queued if the stop-line policy forces it to hold, its speed
/// is below the low-speed threshold, or the vehicle immediately ahead in the
/// same lane is already queued.
pub fn measure_queues(vehicles: &mut [Vehicle], lights: &LightBank) -> (u32, u32) {
    let mut queue_ns = 0;
    let mut queue_ew = 0;

    for approach in Approach::ALL {
        let lane = lane_front_to_back(vehicles, approach);
        let mut ahead_queued = false;
        for i in lane {
            let queued = stopline::must_stop(&mut vehicles[i], lights)
                || vehicles[i].speed < LOW_SPEED_THRESHOLD
                || ahead_queued;
            if queued {
                match approach.axis() {
                    Axis::NorthSouth => queue_ns += 1,
                    Axis::EastWest => queue_ew += 1,
                }
            }
            ahead_queued = queued;
        }
    }

    (queue_ns, queue_ew)
}
