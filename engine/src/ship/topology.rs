//! Topology Maintenance
//!
//! Destruction of springs, triangles and points. Every back reference
//! (point <-> spring, point <-> triangle, spring <-> triangle, electrical wiring)
//! is updated in the same call that flags the element, so the adjacency tables
//! never disagree with the deletion flags.

use glam::Vec2;

use super::index::{PointIndex, SpringIndex, TriangleIndex};
use super::Ship;
use crate::random::GameRandom;
use crate::world::SimulationParameters;

/// What happens to the triangles bounded by a destroyed spring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriangleDestroyPolicy {
    /// Every super triangle goes with the spring.
    AllSuperTriangles,
    /// Only a lone remaining super triangle goes; a spring shared by two
    /// triangles leaves both standing, so surfaces erode edge-first.
    OnlyLastSuperTriangle,
}

impl Ship {
    /// Destroy a triangle; no-op when already destroyed.
    pub fn destroy_triangle(&mut self, t: TriangleIndex) {
        if self.triangles.is_deleted(t) {
            return;
        }
        self.triangles.mark_deleted(t);
        for s in self.triangles.sub_springs(t) {
            self.springs.remove_super_triangle(s, t);
        }
        for p in self.triangles.points(t) {
            self.points.remove_connected_triangle(p, t);
        }
    }

    /// Destroy a spring; returns `false` when it was already destroyed.
    ///
    /// Does not relabel connected components; callers batch that.
    pub fn destroy_spring(&mut self, s: SpringIndex, policy: TriangleDestroyPolicy) -> bool {
        if self.springs.is_deleted(s) {
            return false;
        }

        let super_triangles = self.springs.super_triangles(s).to_vec();
        match policy {
            TriangleDestroyPolicy::AllSuperTriangles => {
                for t in super_triangles {
                    self.destroy_triangle(t);
                }
            }
            TriangleDestroyPolicy::OnlyLastSuperTriangle => {
                if super_triangles.len() == 1 {
                    self.destroy_triangle(super_triangles[0]);
                } else {
                    for t in super_triangles {
                        self.springs.remove_super_triangle(s, t);
                    }
                }
            }
        }

        self.springs.mark_deleted(s);
        let [a, b] = self.springs.endpoints(s);
        self.points.remove_connected_spring(a, s);
        self.points.remove_connected_spring(b, s);

        if let (Some(ea), Some(eb)) = (self.points.electrical_element(a), self.points.electrical_element(b)) {
            self.electrical_elements.disconnect(ea, eb);
        }

        true
    }

    /// Tear a structural particle out of the mesh.
    ///
    /// All of its springs and triangles are destroyed, its electrical element is
    /// destroyed, `detach_velocity` is added to its velocity and debris is spawned.
    /// Returns `false` for ephemeral or already detached particles.
    pub fn detach_point(
        &mut self,
        p: PointIndex,
        detach_velocity: Vec2,
        now: f32,
        params: &SimulationParameters,
        rng: &mut GameRandom,
    ) -> bool {
        if self.points.is_ephemeral(p) || self.points.is_detached(p) {
            return false;
        }

        let springs = self.points.connected_springs(p).to_vec();
        for s in springs {
            self.destroy_spring(s, TriangleDestroyPolicy::AllSuperTriangles);
        }
        let triangles = self.points.connected_triangles(p).to_vec();
        for t in triangles {
            self.destroy_triangle(t);
        }

        if let Some(e) = self.points.electrical_element(p) {
            self.electrical_elements.destroy(e);
        }

        if self.points.is_pinned(p) {
            self.points.set_pinned(p, false);
            self.pinned_points.retain(|&x| x != p);
        }

        self.points.set_detached(p);
        let velocity = self.points.velocity(p) + detach_velocity;
        self.points.set_velocity(p, velocity);

        let position = self.points.position(p);
        let debris_mass = self.points.mass(p) * 0.05;
        for _ in 0..params.debris_per_detached_point {
            let debris_velocity = velocity + rng.random_radial(3.0, 10.0);
            self.spawn_debris(position, debris_velocity, debris_mass, now, rng);
        }

        log::trace!("detached {:?} at {:?}", p, position);
        true
    }

    /// Spawn sparkles at a cut or strike location.
    pub(crate) fn spawn_sparkles(
        &mut self,
        position: Vec2,
        base_velocity: Vec2,
        count: usize,
        now: f32,
        rng: &mut GameRandom,
    ) {
        for _ in 0..count {
            let velocity = base_velocity + rng.random_radial(5.0, 20.0);
            self.spawn_sparkle(position, velocity, now, rng);
        }
    }
}
