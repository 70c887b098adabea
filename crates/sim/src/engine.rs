//! Redstone engine: interaction API, per-kind power recomputation, and the
//! per-tick BFS propagation driver.
//!
//! The engine owns every per-position store (power levels, component state,
//! scheduled updates, burnout histories) and reads blocks exclusively through
//! the [`WorldQuery`] adapter; it never mutates the world itself.

use crate::burnout::BurnoutTracker;
use crate::schedule::{UpdateQueue, PRIORITY_PULSE, PRIORITY_REPEATER};
use crate::state::{ComparatorMode, ComponentState};
use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};
use voxelvolt_core::{
    BlockKind, BlockPos, Facing, PowerCategory, SimTick, TorchMount, WorldQuery, MAX_POWER,
    REDSTONE_TICK,
};

/// Pulse length of a stone button, in game ticks.
pub const BUTTON_PULSE_STONE: u64 = 10;
/// Pulse length of a wooden button, in game ticks.
pub const BUTTON_PULSE_WOOD: u64 = 15;
/// Pulse length of an observer, in game ticks.
pub const OBSERVER_PULSE_TICKS: u64 = 2;

/// Hard cap on positions recomputed in one tick's BFS drain. Pathological
/// wiring (mutually toggling torches) can otherwise loop forever inside a
/// single tick; hitting the cap defers the remainder to the next tick.
pub const MAX_PROPAGATION_STEPS: usize = 10_000;

/// Notification that a redstone-activatable consumer block (lamp, door,
/// piston, dispenser) changed powered state. The activation behavior itself
/// belongs to collaborating systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationEvent {
    /// Position of the consumer block.
    pub pos: BlockPos,
    /// New powered state.
    pub powered: bool,
}

/// Redstone simulator for power propagation.
///
/// Single-threaded and deterministic: every store iterates in position order
/// and the scheduled queue drains in (priority, position) order, so two runs
/// over the same world and interactions produce identical state.
#[derive(Debug)]
pub struct RedstoneEngine {
    /// Power level per position; absence means 0.
    power: BTreeMap<BlockPos, u8>,
    /// Metadata for interactive/active components.
    components: BTreeMap<BlockPos, ComponentState>,
    /// Delayed transitions (repeater delay, pulse expiry).
    queue: UpdateQueue,
    /// Torch toggle histories for burnout suppression.
    burnout: BurnoutTracker,
    /// Positions awaiting recomputation in the next BFS drain.
    pending: BTreeSet<BlockPos>,
    /// Last powered state notified per consumer position.
    activated: BTreeMap<BlockPos, bool>,
    /// Consumer notifications accumulated since the last drain.
    events: Vec<ActivationEvent>,
    /// Current simulation tick.
    current_tick: SimTick,
}

impl RedstoneEngine {
    /// Create a new engine with empty stores at tick zero.
    pub fn new() -> Self {
        Self {
            power: BTreeMap::new(),
            components: BTreeMap::new(),
            queue: UpdateQueue::new(),
            burnout: BurnoutTracker::new(),
            pending: BTreeSet::new(),
            activated: BTreeMap::new(),
            events: Vec::new(),
            current_tick: SimTick::ZERO,
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Power level at a position (0 when absent).
    pub fn power_level(&self, pos: BlockPos) -> u8 {
        self.power.get(&pos).copied().unwrap_or(0)
    }

    /// Component metadata at a position, if any has been created.
    pub fn component_state(&self, pos: BlockPos) -> Option<&ComponentState> {
        self.components.get(&pos)
    }

    /// Check whether a position is powered: its own power is nonzero, or any
    /// of its 6 neighbors carries power. A neighboring wire only powers the
    /// block directly above it, never its sides or the space above the wire.
    pub fn is_block_powered(&self, pos: BlockPos, world: &impl WorldQuery) -> bool {
        self.is_powered_inner(pos, None, world)
    }

    /// Like [`Self::is_block_powered`], ignoring one neighbor position.
    /// Torches use this to read their mount block without seeing their own
    /// output reflected back.
    pub fn is_block_powered_excluding(
        &self,
        pos: BlockPos,
        exclude: BlockPos,
        world: &impl WorldQuery,
    ) -> bool {
        self.is_powered_inner(pos, Some(exclude), world)
    }

    fn is_powered_inner(
        &self,
        pos: BlockPos,
        exclude: Option<BlockPos>,
        world: &impl WorldQuery,
    ) -> bool {
        if self.power_level(pos) > 0 {
            return true;
        }

        for neighbor in pos.neighbors() {
            if Some(neighbor) == exclude {
                continue;
            }
            if self.power_level(neighbor) == 0 {
                continue;
            }
            if world.block(neighbor) == BlockKind::Wire && neighbor != pos.down() {
                continue;
            }
            return true;
        }

        false
    }

    /// Maximum power among neighbors flagged as strong sources. Distinguishes
    /// "can extend a wire run" from "can merely flip a switch-like consumer".
    pub fn strong_power(&self, pos: BlockPos) -> u8 {
        pos.neighbors()
            .iter()
            .filter_map(|neighbor| self.components.get(neighbor))
            .filter(|state| state.strong_power)
            .map(|state| state.power)
            .max()
            .unwrap_or(0)
    }

    /// Current simulation tick.
    pub fn current_tick(&self) -> SimTick {
        self.current_tick
    }

    /// Positions awaiting recomputation.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Scheduled updates not yet fired.
    pub fn scheduled_count(&self) -> usize {
        self.queue.len()
    }

    /// Take the consumer activation notifications accumulated so far.
    pub fn take_activation_events(&mut self) -> Vec<ActivationEvent> {
        std::mem::take(&mut self.events)
    }

    // ------------------------------------------------------------------
    // Interaction API
    // ------------------------------------------------------------------

    /// Toggle a lever. Returns the new on/off state, or `false` unchanged if
    /// the block is not a lever.
    pub fn toggle_lever(&mut self, pos: BlockPos, world: &impl WorldQuery) -> bool {
        if world.block(pos) != BlockKind::Lever {
            return false;
        }

        let new_power = if self.power_level(pos) > 0 {
            0
        } else {
            MAX_POWER
        };
        self.write_source(pos, new_power);
        self.mark_neighbors_dirty(pos, world);
        new_power > 0
    }

    /// Press a button: full power immediately, deactivation scheduled after
    /// the pulse length (10 ticks stone, 15 ticks wood). Pressing an already
    /// active button restarts its pulse.
    pub fn press_button(&mut self, pos: BlockPos, world: &impl WorldQuery) {
        let BlockKind::Button { wooden } = world.block(pos) else {
            return;
        };

        let pulse = if wooden {
            BUTTON_PULSE_WOOD
        } else {
            BUTTON_PULSE_STONE
        };
        self.write_source(pos, MAX_POWER);
        self.queue.cancel(pos);
        self.queue
            .push(pos, self.current_tick.advance(pulse), PRIORITY_PULSE);
        self.mark_neighbors_dirty(pos, world);
    }

    /// Update a pressure plate from entity occupancy. Power depends on the
    /// plate's weight class; nothing propagates when the power is unchanged.
    pub fn update_pressure_plate(
        &mut self,
        pos: BlockPos,
        occupied: bool,
        entity_count: u32,
        world: &impl WorldQuery,
    ) {
        let BlockKind::PressurePlate { weight } = world.block(pos) else {
            return;
        };

        let new_power = if occupied {
            weight.power_for(entity_count)
        } else {
            0
        };
        if new_power == self.power_level(pos) {
            return;
        }

        self.write_source(pos, new_power);
        self.mark_neighbors_dirty(pos, world);
    }

    /// Set a repeater's propagation delay in redstone ticks, clamped to 1-4.
    /// Stored only; the new delay applies to the next transition.
    pub fn set_repeater_delay(&mut self, pos: BlockPos, delay: u8, world: &impl WorldQuery) {
        let BlockKind::Repeater { .. } = world.block(pos) else {
            return;
        };

        self.components.entry(pos).or_default().delay = delay.clamp(1, 4);
    }

    /// Flip a comparator between compare and subtract mode and recompute.
    /// Returns the new mode, or `None` if the block is not a comparator.
    pub fn toggle_comparator_mode(
        &mut self,
        pos: BlockPos,
        world: &impl WorldQuery,
    ) -> Option<ComparatorMode> {
        let BlockKind::Comparator { .. } = world.block(pos) else {
            return None;
        };

        let state = self.components.entry(pos).or_default();
        state.mode = state.mode.toggled();
        let mode = state.mode;
        self.pending.insert(pos);
        Some(mode)
    }

    /// Emit an observer pulse: full strong power now, deactivation after
    /// [`OBSERVER_PULSE_TICKS`].
    pub fn trigger_observer(&mut self, pos: BlockPos, world: &impl WorldQuery) {
        let BlockKind::Observer { .. } = world.block(pos) else {
            return;
        };

        self.write_source(pos, MAX_POWER);
        self.queue.cancel(pos);
        self.queue.push(
            pos,
            self.current_tick.advance(OBSERVER_PULSE_TICKS),
            PRIORITY_PULSE,
        );
        self.mark_neighbors_dirty(pos, world);
    }

    /// Generic "something changed here": enqueue the position and its
    /// neighbors for recomputation on the next tick.
    pub fn update_block(&mut self, pos: BlockPos, world: &impl WorldQuery) {
        self.pending.insert(pos);
        self.mark_neighbors_dirty(pos, world);
    }

    /// Schedule a recomputation `delay_ticks` from now at the given priority.
    pub fn schedule_update(&mut self, pos: BlockPos, delay_ticks: u64, priority: u8) {
        self.queue
            .push(pos, self.current_tick.advance(delay_ticks), priority);
    }

    /// Delete every per-position record for a broken block and wake the
    /// neighbors (a source may have disappeared).
    pub fn remove_state(&mut self, pos: BlockPos, world: &impl WorldQuery) {
        self.power.remove(&pos);
        self.components.remove(&pos);
        self.activated.remove(&pos);
        self.burnout.remove(pos);
        self.queue.cancel(pos);
        self.mark_neighbors_dirty(pos, world);
    }

    /// Clear every store and return to tick zero, as on a fresh world load.
    pub fn reset(&mut self) {
        self.power.clear();
        self.components.clear();
        self.queue.clear();
        self.burnout.clear();
        self.pending.clear();
        self.activated.clear();
        self.events.clear();
        self.current_tick = SimTick::ZERO;
    }

    // ------------------------------------------------------------------
    // Tick driver
    // ------------------------------------------------------------------

    /// Advance the simulation one game tick: fire due scheduled updates in
    /// priority order, then BFS-drain the pending set with a per-tick visited
    /// guard and a hard iteration cap.
    pub fn tick(&mut self, world: &impl WorldQuery) {
        self.current_tick = self.current_tick.advance(1);

        for update in self.queue.take_due(self.current_tick) {
            self.run_scheduled(update.pos, world);
        }

        self.drain_pending(world);
    }

    fn drain_pending(&mut self, world: &impl WorldQuery) {
        if self.pending.is_empty() {
            return;
        }

        let mut queue: VecDeque<BlockPos> =
            std::mem::take(&mut self.pending).into_iter().collect();
        let mut visited: HashSet<BlockPos> = HashSet::new();
        let mut steps = 0usize;

        while let Some(pos) = queue.pop_front() {
            if !visited.insert(pos) {
                continue;
            }

            steps += 1;
            if steps > MAX_PROPAGATION_STEPS {
                tracing::warn!(
                    tick = self.current_tick.0,
                    deferred = queue.len() + 1,
                    "propagation cap hit, resuming next tick"
                );
                self.pending.insert(pos);
                self.pending.extend(queue);
                return;
            }

            if self.recalculate_power(pos, world) {
                for neighbor in pos.neighbors() {
                    self.wake(neighbor, &visited, &mut queue);
                    // Solids conduct weak power without storing any, so
                    // components mounted on them must be woken directly.
                    if world.block(neighbor).is_solid() {
                        for beyond in neighbor.neighbors() {
                            if beyond != pos {
                                self.wake(beyond, &visited, &mut queue);
                            }
                        }
                    }
                }
                // Wires read through the up/down diagonals of their
                // horizontal sides, so those positions observe this change
                // too.
                for side in pos.horizontal_neighbors() {
                    self.wake(side.up(), &visited, &mut queue);
                    self.wake(side.down(), &visited, &mut queue);
                }
            }
        }
    }

    /// Wake a position after a neighboring change: enqueue it for this tick's
    /// drain, or defer to the next tick when it was already recomputed (each
    /// position runs at most once per tick).
    fn wake(&mut self, pos: BlockPos, visited: &HashSet<BlockPos>, queue: &mut VecDeque<BlockPos>) {
        if visited.contains(&pos) {
            self.pending.insert(pos);
        } else {
            queue.push_back(pos);
        }
    }

    /// Execute a due scheduled update. The kind of transition is decided by
    /// the block at the position: buttons and observers end their pulse,
    /// repeaters apply their delayed output, anything else recomputes.
    fn run_scheduled(&mut self, pos: BlockPos, world: &impl WorldQuery) {
        match world.block(pos) {
            BlockKind::Button { .. } | BlockKind::Observer { .. } => self.expire_pulse(pos, world),
            BlockKind::Repeater { facing } => self.apply_repeater_output(pos, facing, world),
            _ => {
                if self.recalculate_power(pos, world) {
                    self.mark_neighbors_dirty(pos, world);
                }
            }
        }
    }

    fn expire_pulse(&mut self, pos: BlockPos, world: &impl WorldQuery) {
        if self.power_level(pos) == 0 {
            return;
        }

        self.write_source(pos, 0);
        self.mark_neighbors_dirty(pos, world);
    }

    fn apply_repeater_output(&mut self, pos: BlockPos, facing: Facing, world: &impl WorldQuery) {
        let locked = self.repeater_locked(pos, facing, world);
        let input = self.emitted_power_towards(pos.offset(facing.opposite()), pos, world);
        let desired = if input > 0 { MAX_POWER } else { 0 };

        let state = self.components.entry(pos).or_default();
        state.locked = locked;
        if locked || state.power == desired {
            return;
        }

        state.power = desired;
        state.strong_power = true;
        state.weak_power = true;
        self.set_power(pos, desired);
        self.mark_neighbors_dirty(pos, world);
    }

    // ------------------------------------------------------------------
    // Recomputation rules
    // ------------------------------------------------------------------

    /// Recompute the power at one position by its block-kind rule. Returns
    /// true when the stored value changed (so the caller propagates to
    /// neighbors).
    fn recalculate_power(&mut self, pos: BlockPos, world: &impl WorldQuery) -> bool {
        let kind = world.block(pos);
        match kind.category() {
            PowerCategory::Inert => self.clear_stale(pos),
            PowerCategory::Source => self.sync_source(pos),
            PowerCategory::Wire => self.recalc_wire(pos, world),
            PowerCategory::Torch => self.recalc_torch(pos, kind, world),
            PowerCategory::Repeater => self.recalc_repeater(pos, kind, world),
            PowerCategory::Comparator => self.recalc_comparator(pos, kind, world),
            PowerCategory::Emitter => self.recalc_emitter(pos),
            PowerCategory::Consumer => self.recalc_consumer(pos, world),
        }
    }

    /// Drop leftover records at a position whose block no longer participates
    /// in redstone (e.g. wire replaced by stone without `remove_state`).
    fn clear_stale(&mut self, pos: BlockPos) -> bool {
        let had_power = self.power.remove(&pos).map_or(false, |p| p > 0);
        self.components.remove(&pos);
        self.activated.remove(&pos);
        self.burnout.remove(pos);
        had_power
    }

    /// Interactive sources are read-through: their power is whatever the
    /// interaction API last wrote.
    fn sync_source(&mut self, pos: BlockPos) -> bool {
        let component_power = self
            .components
            .get(&pos)
            .map(|state| state.power)
            .unwrap_or(0);
        if self.power_level(pos) == component_power {
            return false;
        }
        self.set_power(pos, component_power);
        true
    }

    fn recalc_wire(&mut self, pos: BlockPos, world: &impl WorldQuery) -> bool {
        let old_power = self.power_level(pos);
        let mut max_power = 0u8;

        for neighbor in pos.neighbors() {
            match world.block(neighbor) {
                // Wire-to-wire coupling is handled below, with decay.
                BlockKind::Wire => {}
                // A torch does not power the wire directly above its body.
                BlockKind::Torch { .. } => {
                    if neighbor != pos.down() {
                        max_power = max_power.max(self.power_level(neighbor));
                    }
                }
                _ => {
                    max_power =
                        max_power.max(self.emitted_power_towards(neighbor, pos, world));
                }
            }
        }

        // Adjacent wires at the same level, one step up (unless a solid block
        // caps this wire), and one step down (unless a solid block sits
        // between), each losing one power level.
        let capped = world.block(pos.up()).is_solid();
        for side in pos.horizontal_neighbors() {
            let side_kind = world.block(side);
            if side_kind == BlockKind::Wire {
                max_power = max_power.max(self.power_level(side).saturating_sub(1));
            }
            if !capped && world.block(side.up()) == BlockKind::Wire {
                max_power = max_power.max(self.power_level(side.up()).saturating_sub(1));
            }
            if !side_kind.is_solid() && world.block(side.down()) == BlockKind::Wire {
                max_power = max_power.max(self.power_level(side.down()).saturating_sub(1));
            }
        }

        if max_power == old_power {
            return false;
        }
        self.set_power(pos, max_power);
        true
    }

    fn recalc_torch(&mut self, pos: BlockPos, kind: BlockKind, world: &impl WorldQuery) -> bool {
        let BlockKind::Torch { mount } = kind else {
            return false;
        };

        let mount_pos = match mount {
            TorchMount::Floor => pos.down(),
            TorchMount::Wall(facing) => pos.offset(facing.opposite()),
        };
        let mount_powered = self.is_block_powered_excluding(mount_pos, pos, world);

        let inverted = if mount_powered { 0 } else { MAX_POWER };
        let old_power = self.power_level(pos);

        let mut desired = inverted;
        if desired != old_power {
            self.burnout.record_toggle(pos, self.current_tick);
        }
        if self.burnout.is_burned_out(pos, self.current_tick) {
            if desired > 0 {
                tracing::debug!(?pos, tick = self.current_tick.0, "torch burned out");
            }
            desired = 0;
        }

        if desired == old_power {
            return false;
        }
        self.set_power(pos, desired);
        true
    }

    fn recalc_repeater(&mut self, pos: BlockPos, kind: BlockKind, world: &impl WorldQuery) -> bool {
        let BlockKind::Repeater { facing } = kind else {
            return false;
        };

        let locked = self.repeater_locked(pos, facing, world);
        let input = self.emitted_power_towards(pos.offset(facing.opposite()), pos, world);
        let desired = if input > 0 { MAX_POWER } else { 0 };

        let state = self.components.entry(pos).or_default();
        state.locked = locked;
        let current = state.power;
        let delay = state.delay;

        // A locked repeater freezes its output and ignores input changes.
        if locked {
            self.queue.cancel(pos);
            return false;
        }

        if desired == current {
            self.queue.cancel(pos);
            return false;
        }

        // The transition is not applied now; it fires after the configured
        // delay and reads the then-current input.
        if !self.queue.has_pending(pos) {
            self.queue.push(
                pos,
                self.current_tick.advance(delay as u64 * REDSTONE_TICK),
                PRIORITY_REPEATER,
            );
        }
        false
    }

    fn recalc_comparator(
        &mut self,
        pos: BlockPos,
        kind: BlockKind,
        world: &impl WorldQuery,
    ) -> bool {
        let BlockKind::Comparator { facing } = kind else {
            return false;
        };

        let back = self.emitted_power_towards(pos.offset(facing.opposite()), pos, world);
        let mut side = 0u8;
        for side_facing in facing.perpendicular() {
            side = side.max(self.emitted_power_towards(pos.offset(side_facing), pos, world));
        }

        let state = self.components.entry(pos).or_default();
        let desired = match state.mode {
            ComparatorMode::Compare => {
                if back >= side {
                    back
                } else {
                    0
                }
            }
            ComparatorMode::Subtract => back.saturating_sub(side),
        };

        if state.power == desired {
            return false;
        }
        state.power = desired;
        state.weak_power = true;
        state.strong_power = false;
        self.set_power(pos, desired);
        true
    }

    /// A block of redstone is a constant emitter, never computed from its
    /// neighbors.
    fn recalc_emitter(&mut self, pos: BlockPos) -> bool {
        let state = self.components.entry(pos).or_default();
        state.power = MAX_POWER;
        state.strong_power = true;
        state.weak_power = true;

        if self.power_level(pos) == MAX_POWER {
            return false;
        }
        self.set_power(pos, MAX_POWER);
        true
    }

    /// Consumers carry no power of their own; visiting one emits an
    /// activation notification when its powered state flipped.
    fn recalc_consumer(&mut self, pos: BlockPos, world: &impl WorldQuery) -> bool {
        let powered = self.is_block_powered(pos, world);
        let was_powered = self.activated.get(&pos).copied().unwrap_or(false);
        if powered == was_powered {
            return false;
        }

        self.activated.insert(pos, powered);
        self.events.push(ActivationEvent { pos, powered });
        false
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    /// Power the block at `from` emits toward `to`. Directional components
    /// (repeater, comparator, observer) emit only out of their facing;
    /// switch-like sources and wires emit in every direction.
    fn emitted_power_towards(
        &self,
        from: BlockPos,
        to: BlockPos,
        world: &impl WorldQuery,
    ) -> u8 {
        match world.block(from) {
            BlockKind::Lever | BlockKind::Button { .. } | BlockKind::PressurePlate { .. } => {
                self.power_level(from)
            }
            BlockKind::Repeater { facing }
            | BlockKind::Comparator { facing }
            | BlockKind::Observer { facing } => {
                if from.offset(facing) == to {
                    self.power_level(from)
                } else {
                    0
                }
            }
            BlockKind::RedstoneBlock => MAX_POWER,
            BlockKind::Wire | BlockKind::Torch { .. } => self.power_level(from),
            _ => 0,
        }
    }

    /// A repeater is locked while a perpendicular neighbor repeater points
    /// into it with nonzero output.
    fn repeater_locked(
        &self,
        pos: BlockPos,
        facing: Facing,
        world: &impl WorldQuery,
    ) -> bool {
        for side_facing in facing.perpendicular() {
            let side = pos.offset(side_facing);
            if let BlockKind::Repeater {
                facing: side_repeater_facing,
            } = world.block(side)
            {
                if side.offset(side_repeater_facing) == pos && self.power_level(side) > 0 {
                    return true;
                }
            }
        }
        false
    }

    /// Write the output of a direct source (strong and weak) into both the
    /// component store and the power store.
    fn write_source(&mut self, pos: BlockPos, power: u8) {
        let state = self.components.entry(pos).or_default();
        state.power = power.min(MAX_POWER);
        state.strong_power = true;
        state.weak_power = true;
        self.set_power(pos, power);
    }

    fn set_power(&mut self, pos: BlockPos, power: u8) {
        if power == 0 {
            self.power.remove(&pos);
        } else {
            self.power.insert(pos, power.min(MAX_POWER));
        }
    }

    /// Enqueue every position whose power rule can observe a change at
    /// `pos`: the 6 direct neighbors, the up/down diagonals a wire reads
    /// through its horizontal sides, plus the neighbors of any solid
    /// neighbor. A solid block stores no power of its own, so components
    /// mounted on it (torches, doors) must be woken through it.
    fn mark_neighbors_dirty(&mut self, pos: BlockPos, world: &impl WorldQuery) {
        for neighbor in pos.neighbors() {
            self.pending.insert(neighbor);
            if world.block(neighbor).is_solid() {
                for beyond in neighbor.neighbors() {
                    if beyond != pos {
                        self.pending.insert(beyond);
                    }
                }
            }
        }
        for side in pos.horizontal_neighbors() {
            self.pending.insert(side.up());
            self.pending.insert(side.down());
        }
    }

    // ------------------------------------------------------------------
    // Snapshot plumbing (format lives in `snapshot.rs`)
    // ------------------------------------------------------------------

    pub(crate) fn to_snapshot(&self) -> crate::snapshot::EngineSnapshot {
        crate::snapshot::EngineSnapshot {
            power: self.power.clone(),
            components: self.components.clone(),
            queue: self.queue.clone(),
            burnout: self.burnout.clone(),
            pending: self.pending.clone(),
            activated: self.activated.clone(),
            current_tick: self.current_tick,
        }
    }

    pub(crate) fn from_snapshot(snapshot: crate::snapshot::EngineSnapshot) -> Self {
        Self {
            power: snapshot.power,
            components: snapshot.components,
            queue: snapshot.queue,
            burnout: snapshot.burnout,
            pending: snapshot.pending,
            activated: snapshot.activated,
            events: Vec::new(),
            current_tick: snapshot.current_tick,
        }
    }
}

impl Default for RedstoneEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::PRIORITY_RECALC;
    use voxelvolt_core::{Facing, GridWorld};

    fn lever_world(pos: BlockPos) -> GridWorld {
        let mut world = GridWorld::new();
        world.set(pos, BlockKind::Lever);
        world
    }

    #[test]
    fn test_toggle_lever_flips_power() {
        let pos = BlockPos::new(0, 1, 0);
        let world = lever_world(pos);
        let mut engine = RedstoneEngine::new();

        assert!(engine.toggle_lever(pos, &world));
        assert_eq!(engine.power_level(pos), MAX_POWER);
        assert!(!engine.toggle_lever(pos, &world));
        assert_eq!(engine.power_level(pos), 0);
    }

    #[test]
    fn test_toggle_lever_on_wrong_block_is_noop() {
        let mut world = GridWorld::new();
        let pos = BlockPos::new(0, 1, 0);
        world.set(pos, BlockKind::Solid);
        let mut engine = RedstoneEngine::new();

        assert!(!engine.toggle_lever(pos, &world));
        assert_eq!(engine.power_level(pos), 0);
        assert!(engine.component_state(pos).is_none());
    }

    #[test]
    fn test_repeater_delay_clamps() {
        let mut world = GridWorld::new();
        let pos = BlockPos::new(0, 1, 0);
        world.set(
            pos,
            BlockKind::Repeater {
                facing: Facing::East,
            },
        );
        let mut engine = RedstoneEngine::new();

        engine.set_repeater_delay(pos, 0, &world);
        assert_eq!(engine.component_state(pos).unwrap().delay, 1);
        engine.set_repeater_delay(pos, 9, &world);
        assert_eq!(engine.component_state(pos).unwrap().delay, 4);
    }

    #[test]
    fn test_remove_state_restores_defaults() {
        let pos = BlockPos::new(0, 1, 0);
        let world = lever_world(pos);
        let mut engine = RedstoneEngine::new();

        engine.toggle_lever(pos, &world);
        assert!(engine.component_state(pos).is_some());

        engine.remove_state(pos, &world);
        assert_eq!(engine.power_level(pos), 0);
        assert!(engine.component_state(pos).is_none());
    }

    #[test]
    fn test_schedule_update_fires_at_its_trigger_tick() {
        let mut world = GridWorld::new();
        let pos = BlockPos::new(0, 1, 0);
        world.set(pos, BlockKind::Wire);
        let mut engine = RedstoneEngine::new();

        // Stale power with no remaining source; only the scheduled
        // recomputation clears it.
        engine.power.insert(pos, 7);
        engine.schedule_update(pos, 3, PRIORITY_RECALC);
        assert_eq!(engine.scheduled_count(), 1);

        engine.tick(&world);
        engine.tick(&world);
        assert_eq!(engine.power_level(pos), 7, "not due yet");

        engine.tick(&world);
        assert_eq!(engine.power_level(pos), 0, "recalculated when due");
        assert_eq!(engine.scheduled_count(), 0);
    }

    #[test]
    fn test_strong_power_reads_source_neighbors() {
        let pos = BlockPos::new(0, 1, 0);
        let world = lever_world(pos);
        let mut engine = RedstoneEngine::new();

        engine.toggle_lever(pos, &world);
        assert_eq!(engine.strong_power(pos.up()), MAX_POWER);
        assert_eq!(engine.strong_power(pos.up().up()), 0);

        engine.toggle_lever(pos, &world);
        assert_eq!(engine.strong_power(pos.up()), 0);
    }

    #[test]
    fn test_reset_returns_to_tick_zero_with_empty_stores() {
        let pos = BlockPos::new(0, 1, 0);
        let world = lever_world(pos);
        let mut engine = RedstoneEngine::new();

        engine.toggle_lever(pos, &world);
        engine.tick(&world);
        engine.reset();

        assert_eq!(engine.current_tick(), SimTick::ZERO);
        assert_eq!(engine.power_level(pos), 0);
        assert_eq!(engine.pending_count(), 0);
        assert_eq!(engine.scheduled_count(), 0);
        assert!(engine.component_state(pos).is_none());
    }

    #[test]
    fn test_wire_neighbor_only_powers_block_above() {
        let mut world = GridWorld::new();
        let wire = BlockPos::new(0, 1, 0);
        world.set(wire, BlockKind::Wire);
        world.set(wire.up(), BlockKind::Solid);
        world.set(wire.offset(Facing::East), BlockKind::Solid);

        let mut engine = RedstoneEngine::new();
        engine.power.insert(wire, 12);

        assert!(engine.is_block_powered(wire.up(), &world));
        assert!(!engine.is_block_powered(wire.offset(Facing::East), &world));
        assert!(!engine.is_block_powered(wire.down(), &world));
    }
}
