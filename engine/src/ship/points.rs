//! Points
//!
//! Struct-of-arrays storage for every particle of a ship. The first
//! `ship_point_count` entries are structural particles; the remaining slots form
//! the ephemeral pool (air bubbles, debris, sparkles) that shares the same index
//! space but is spawned and expired independently of the mesh.

use std::ops::Range;

use glam::Vec2;

use super::index::{ConnectedComponentId, ElectricalElementIndex, PointIndex, SpringIndex, TriangleIndex};
use crate::material::StructuralMaterialId;

/// Kind of an ephemeral particle slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EphemeralType {
    /// Structural particle, or a free pool slot.
    #[default]
    None,
    AirBubble,
    Debris,
    Sparkle,
}

#[derive(Debug, Clone, Copy, Default)]
struct EphemeralState {
    kind: EphemeralType,
    spawned_at: f32,
    lifetime: f32,
}

/// Attributes of a structural particle at emission time.
#[derive(Debug, Clone, Copy)]
pub struct PointSpec {
    pub position: Vec2,
    pub material: StructuralMaterialId,
    pub mass: f32,
    pub temperature: f32,
    pub is_rope: bool,
    pub is_hull: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Points {
    ship_point_count: usize,

    position: Vec<Vec2>,
    velocity: Vec<Vec2>,
    water_velocity: Vec<Vec2>,
    static_force: Vec<Vec2>,
    dynamic_force: Vec<Vec2>,
    mass: Vec<f32>,
    material: Vec<StructuralMaterialId>,
    temperature: Vec<f32>,
    water: Vec<f32>,
    internal_pressure: Vec<f32>,
    decay: Vec<f32>,
    connected_component: Vec<ConnectedComponentId>,
    forces_receptivity: Vec<f32>,
    is_rope: Vec<bool>,
    is_hull: Vec<bool>,
    is_pinned: Vec<bool>,
    is_detached: Vec<bool>,
    is_burning: Vec<bool>,
    electrical_element: Vec<Option<ElectricalElementIndex>>,
    ephemeral: Vec<EphemeralState>,

    connected_springs: Vec<Vec<SpringIndex>>,
    connected_triangles: Vec<Vec<TriangleIndex>>,

    next_ephemeral_slot: usize,
}

impl Points {
    pub fn with_capacity(ship_points: usize, ephemeral_points: usize) -> Self {
        let n = ship_points + ephemeral_points;
        Self {
            position: Vec::with_capacity(n),
            velocity: Vec::with_capacity(n),
            water_velocity: Vec::with_capacity(n),
            static_force: Vec::with_capacity(n),
            dynamic_force: Vec::with_capacity(n),
            mass: Vec::with_capacity(n),
            material: Vec::with_capacity(n),
            temperature: Vec::with_capacity(n),
            water: Vec::with_capacity(n),
            internal_pressure: Vec::with_capacity(n),
            decay: Vec::with_capacity(n),
            connected_component: Vec::with_capacity(n),
            forces_receptivity: Vec::with_capacity(n),
            is_rope: Vec::with_capacity(n),
            is_hull: Vec::with_capacity(n),
            is_pinned: Vec::with_capacity(n),
            is_detached: Vec::with_capacity(n),
            is_burning: Vec::with_capacity(n),
            electrical_element: Vec::with_capacity(n),
            ephemeral: Vec::with_capacity(n),
            connected_springs: Vec::with_capacity(n),
            connected_triangles: Vec::with_capacity(n),
            ..Default::default()
        }
    }

    fn push_slot(&mut self, spec: PointSpec) -> PointIndex {
        let index = PointIndex::new(self.position.len());
        self.position.push(spec.position);
        self.velocity.push(Vec2::ZERO);
        self.water_velocity.push(Vec2::ZERO);
        self.static_force.push(Vec2::ZERO);
        self.dynamic_force.push(Vec2::ZERO);
        self.mass.push(spec.mass);
        self.material.push(spec.material);
        self.temperature.push(spec.temperature);
        self.water.push(0.0);
        self.internal_pressure.push(crate::world::AIR_PRESSURE_AT_SEA_LEVEL);
        self.decay.push(1.0);
        self.connected_component.push(ConnectedComponentId::NONE);
        self.forces_receptivity.push(1.0);
        self.is_rope.push(spec.is_rope);
        self.is_hull.push(spec.is_hull);
        self.is_pinned.push(false);
        self.is_detached.push(false);
        self.is_burning.push(false);
        self.electrical_element.push(None);
        self.ephemeral.push(EphemeralState::default());
        self.connected_springs.push(Vec::new());
        self.connected_triangles.push(Vec::new());
        index
    }

    /// Append a structural particle. Must precede [`Points::allocate_ephemeral_pool`].
    pub fn add(&mut self, spec: PointSpec) -> PointIndex {
        debug_assert_eq!(self.ship_point_count, self.position.len());
        let index = self.push_slot(spec);
        self.ship_point_count += 1;
        index
    }

    /// Append `count` free ephemeral slots after the structural particles.
    pub fn allocate_ephemeral_pool(&mut self, count: usize, material: StructuralMaterialId, temperature: f32) {
        for _ in 0..count {
            self.push_slot(PointSpec {
                position: Vec2::ZERO,
                material,
                mass: 0.0,
                temperature,
                is_rope: false,
                is_hull: false,
            });
        }
        self.next_ephemeral_slot = self.ship_point_count;
    }

    // ------------------------------------------------------------------
    // Ranges and classification
    // ------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    pub fn ship_point_count(&self) -> usize {
        self.ship_point_count
    }

    pub fn ephemeral_point_count(&self) -> usize {
        self.position.len() - self.ship_point_count
    }

    /// Structural particles only.
    pub fn ship_points(&self) -> impl Iterator<Item = PointIndex> + use<> {
        (0..self.ship_point_count).map(PointIndex::new)
    }

    /// Structural particles and ephemeral slots.
    pub fn all_points(&self) -> impl Iterator<Item = PointIndex> + use<> {
        (0..self.position.len()).map(PointIndex::new)
    }

    fn ephemeral_range(&self) -> Range<usize> {
        self.ship_point_count..self.position.len()
    }

    pub fn contains(&self, p: PointIndex) -> bool {
        p.index() < self.position.len()
    }

    pub fn is_ephemeral(&self, p: PointIndex) -> bool {
        p.index() >= self.ship_point_count
    }

    pub fn ephemeral_type(&self, p: PointIndex) -> EphemeralType {
        self.ephemeral[p.index()].kind
    }

    /// Structural particle, or an ephemeral slot that is currently alive.
    pub fn is_active(&self, p: PointIndex) -> bool {
        !self.is_ephemeral(p) || self.ephemeral[p.index()].kind != EphemeralType::None
    }

    /// A structural particle with no remaining springs.
    pub fn is_orphaned(&self, p: PointIndex) -> bool {
        self.connected_springs[p.index()].is_empty()
    }

    // ------------------------------------------------------------------
    // Kinematics
    // ------------------------------------------------------------------

    pub fn position(&self, p: PointIndex) -> Vec2 {
        self.position[p.index()]
    }

    pub fn set_position(&mut self, p: PointIndex, value: Vec2) {
        self.position[p.index()] = value;
    }

    pub fn position_mut(&mut self, p: PointIndex) -> &mut Vec2 {
        &mut self.position[p.index()]
    }

    pub fn velocity(&self, p: PointIndex) -> Vec2 {
        self.velocity[p.index()]
    }

    pub fn set_velocity(&mut self, p: PointIndex, value: Vec2) {
        self.velocity[p.index()] = value;
    }

    pub fn water_velocity(&self, p: PointIndex) -> Vec2 {
        self.water_velocity[p.index()]
    }

    pub fn set_water_velocity(&mut self, p: PointIndex, value: Vec2) {
        self.water_velocity[p.index()] = value;
    }

    pub fn static_force(&self, p: PointIndex) -> Vec2 {
        self.static_force[p.index()]
    }

    pub fn add_static_force(&mut self, p: PointIndex, force: Vec2) {
        self.static_force[p.index()] += force;
    }

    pub fn dynamic_force(&self, p: PointIndex) -> Vec2 {
        self.dynamic_force[p.index()]
    }

    pub fn add_dynamic_force(&mut self, p: PointIndex, force: Vec2) {
        self.dynamic_force[p.index()] += force;
    }

    pub fn reset_forces(&mut self, p: PointIndex) {
        self.static_force[p.index()] = Vec2::ZERO;
        self.dynamic_force[p.index()] = Vec2::ZERO;
    }

    pub fn mass(&self, p: PointIndex) -> f32 {
        self.mass[p.index()]
    }

    pub fn forces_receptivity(&self, p: PointIndex) -> f32 {
        self.forces_receptivity[p.index()]
    }

    pub fn set_forces_receptivity(&mut self, p: PointIndex, value: f32) {
        self.forces_receptivity[p.index()] = value;
    }

    /// Split borrow of the raw position and velocity buffers for whole-ship passes.
    pub fn kinematics_mut(&mut self) -> (&mut [Vec2], &mut [Vec2], &mut [Vec2]) {
        (&mut self.position, &mut self.velocity, &mut self.water_velocity)
    }

    /// Split borrow of the raw force buffers.
    pub fn forces_mut(&mut self) -> (&mut [Vec2], &mut [Vec2]) {
        (&mut self.static_force, &mut self.dynamic_force)
    }

    // ------------------------------------------------------------------
    // Physical state
    // ------------------------------------------------------------------

    pub fn material(&self, p: PointIndex) -> StructuralMaterialId {
        self.material[p.index()]
    }

    pub fn temperature(&self, p: PointIndex) -> f32 {
        self.temperature[p.index()]
    }

    /// Set temperature, never below the absolute floor.
    pub fn set_temperature(&mut self, p: PointIndex, value: f32) {
        self.temperature[p.index()] = value.max(crate::world::TEMPERATURE_FLOOR);
    }

    pub fn water(&self, p: PointIndex) -> f32 {
        self.water[p.index()]
    }

    pub fn internal_pressure(&self, p: PointIndex) -> f32 {
        self.internal_pressure[p.index()]
    }

    /// Apply a water delta and its matching pressure delta together.
    pub fn add_water_and_pressure(&mut self, p: PointIndex, water_delta: f32, pressure_delta: f32) {
        let i = p.index();
        self.water[i] = (self.water[i] + water_delta).max(0.0);
        self.internal_pressure[i] = (self.internal_pressure[i] + pressure_delta).max(0.0);
    }

    pub fn add_internal_pressure(&mut self, p: PointIndex, delta: f32) {
        let i = p.index();
        self.internal_pressure[i] = (self.internal_pressure[i] + delta).max(0.0);
    }

    pub fn decay(&self, p: PointIndex) -> f32 {
        self.decay[p.index()]
    }

    pub fn set_decay(&mut self, p: PointIndex, value: f32) {
        self.decay[p.index()] = value.clamp(0.0, 1.0);
    }

    pub fn is_burning(&self, p: PointIndex) -> bool {
        self.is_burning[p.index()]
    }

    pub fn set_burning(&mut self, p: PointIndex, value: bool) {
        self.is_burning[p.index()] = value;
    }

    // ------------------------------------------------------------------
    // Flags and topology
    // ------------------------------------------------------------------

    pub fn is_rope(&self, p: PointIndex) -> bool {
        self.is_rope[p.index()]
    }

    pub fn is_hull(&self, p: PointIndex) -> bool {
        self.is_hull[p.index()]
    }

    pub fn is_pinned(&self, p: PointIndex) -> bool {
        self.is_pinned[p.index()]
    }

    pub fn set_pinned(&mut self, p: PointIndex, value: bool) {
        self.is_pinned[p.index()] = value;
    }

    pub fn is_detached(&self, p: PointIndex) -> bool {
        self.is_detached[p.index()]
    }

    pub fn set_detached(&mut self, p: PointIndex) {
        self.is_detached[p.index()] = true;
    }

    pub fn connected_component(&self, p: PointIndex) -> ConnectedComponentId {
        self.connected_component[p.index()]
    }

    pub fn set_connected_component(&mut self, p: PointIndex, id: ConnectedComponentId) {
        self.connected_component[p.index()] = id;
    }

    pub fn electrical_element(&self, p: PointIndex) -> Option<ElectricalElementIndex> {
        self.electrical_element[p.index()]
    }

    pub fn set_electrical_element(&mut self, p: PointIndex, element: Option<ElectricalElementIndex>) {
        self.electrical_element[p.index()] = element;
    }

    pub fn connected_springs(&self, p: PointIndex) -> &[SpringIndex] {
        &self.connected_springs[p.index()]
    }

    pub fn connected_triangles(&self, p: PointIndex) -> &[TriangleIndex] {
        &self.connected_triangles[p.index()]
    }

    pub fn add_connected_spring(&mut self, p: PointIndex, s: SpringIndex) {
        self.connected_springs[p.index()].push(s);
    }

    pub fn remove_connected_spring(&mut self, p: PointIndex, s: SpringIndex) {
        self.connected_springs[p.index()].retain(|&x| x != s);
    }

    pub fn add_connected_triangle(&mut self, p: PointIndex, t: TriangleIndex) {
        self.connected_triangles[p.index()].push(t);
    }

    pub fn remove_connected_triangle(&mut self, p: PointIndex, t: TriangleIndex) {
        self.connected_triangles[p.index()].retain(|&x| x != t);
    }

    // ------------------------------------------------------------------
    // Render views
    // ------------------------------------------------------------------

    pub fn position_buffer(&self) -> &[Vec2] {
        &self.position
    }

    /// Positions as interleaved `x, y` floats for vertex upload.
    pub fn position_buffer_as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.position)
    }

    pub fn temperature_buffer(&self) -> &[f32] {
        &self.temperature
    }

    pub fn decay_buffer(&self) -> &[f32] {
        &self.decay
    }

    // ------------------------------------------------------------------
    // Ephemeral lifecycle
    // ------------------------------------------------------------------

    /// Claim an ephemeral slot, recycling the oldest one when the pool is full.
    ///
    /// Returns `None` only when the ship was built without an ephemeral pool.
    pub fn spawn_ephemeral(
        &mut self,
        kind: EphemeralType,
        position: Vec2,
        velocity: Vec2,
        mass: f32,
        now: f32,
        lifetime: f32,
    ) -> Option<PointIndex> {
        let range = self.ephemeral_range();
        if range.is_empty() {
            return None;
        }

        let free = range
            .clone()
            .find(|&i| self.ephemeral[i].kind == EphemeralType::None);
        let slot = match free {
            Some(i) => i,
            None => {
                let i = self.next_ephemeral_slot.clamp(range.start, range.end - 1);
                self.next_ephemeral_slot = if i + 1 >= range.end { range.start } else { i + 1 };
                i
            }
        };

        self.position[slot] = position;
        self.velocity[slot] = velocity;
        self.water_velocity[slot] = Vec2::ZERO;
        self.static_force[slot] = Vec2::ZERO;
        self.dynamic_force[slot] = Vec2::ZERO;
        self.mass[slot] = mass;
        self.decay[slot] = 1.0;
        self.connected_component[slot] = ConnectedComponentId::NONE;
        self.forces_receptivity[slot] = 1.0;
        self.ephemeral[slot] = EphemeralState {
            kind,
            spawned_at: now,
            lifetime,
        };
        Some(PointIndex::new(slot))
    }

    pub fn expire_ephemeral(&mut self, p: PointIndex) {
        if self.is_ephemeral(p) {
            self.ephemeral[p.index()].kind = EphemeralType::None;
            self.velocity[p.index()] = Vec2::ZERO;
        }
    }

    /// Expire every ephemeral particle whose lifetime has elapsed.
    ///
    /// Returns the number of particles expired.
    pub fn update_ephemeral_particles(&mut self, now: f32) -> usize {
        let mut expired = 0;
        for i in self.ephemeral_range() {
            let state = self.ephemeral[i];
            if state.kind != EphemeralType::None && now - state.spawned_at >= state.lifetime {
                self.ephemeral[i].kind = EphemeralType::None;
                self.velocity[i] = Vec2::ZERO;
                expired += 1;
            }
        }
        expired
    }

    pub fn live_ephemeral_count(&self) -> usize {
        self.ephemeral_range()
            .filter(|&i| self.ephemeral[i].kind != EphemeralType::None)
            .count()
    }
}
