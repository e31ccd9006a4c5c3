use std::collections::VecDeque;

use super::index::{ConnectedComponentId, PointIndex};
use super::points::Points;
use super::springs::Springs;

/// Label every structural particle with the id of its connected component.
///
/// Components are flood-filled over live springs in point index order, so ids are
/// deterministic for a given mesh. Ephemeral slots get [`ConnectedComponentId::NONE`].
/// Returns the number of components.
pub fn assign_connected_components(points: &mut Points, springs: &Springs) -> usize {
    for p in points.all_points() {
        points.set_connected_component(p, ConnectedComponentId::NONE);
    }

    let mut next_id = 1u32;
    let mut queue = VecDeque::new();

    for seed in points.ship_points() {
        if !points.connected_component(seed).is_none() {
            continue;
        }

        let id = ConnectedComponentId(next_id);
        next_id += 1;
        points.set_connected_component(seed, id);
        queue.push_back(seed);

        while let Some(p) = queue.pop_front() {
            for i in 0..points.connected_springs(p).len() {
                let s = points.connected_springs(p)[i];
                if springs.is_deleted(s) {
                    continue;
                }
                let other = springs.other_endpoint(s, p);
                if points.connected_component(other).is_none() {
                    points.set_connected_component(other, id);
                    queue.push_back(other);
                }
            }
        }
    }

    (next_id - 1) as usize
}

/// All structural particles carrying `id`.
pub fn component_members(points: &Points, id: ConnectedComponentId) -> Vec<PointIndex> {
    points
        .ship_points()
        .filter(|&p| points.connected_component(p) == id)
        .collect()
}
