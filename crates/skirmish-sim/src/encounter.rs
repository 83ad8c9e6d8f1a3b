//! Encounter gating: spawn zones and the gates around them.
//!
//! Both listen to the engine's bus through their own subscription, taken when
//! they are added and dropped when they are removed. Events are drained once
//! per tick after the registry sweep.

use glam::Vec3;

use skirmish_core::enums::ActorKind;
use skirmish_core::events::{Cue, GameEvent};

use crate::event_bus::{EventBus, Subscription};

/// A batch of enemy spawn points that fires once when the player enters it.
#[derive(Debug)]
pub struct SpawnZone {
    pub id: u32,
    pub locations: Vec<Vec3>,
    /// Gates locked when the zone fires.
    pub gates: Vec<u32>,
    pub one_time_only: bool,
    consumed: bool,
    subscription: Subscription<GameEvent>,
}

impl SpawnZone {
    pub fn new(
        id: u32,
        locations: Vec<Vec3>,
        gates: Vec<u32>,
        one_time_only: bool,
        bus: &mut EventBus<GameEvent>,
    ) -> Self {
        Self {
            id,
            locations,
            gates,
            one_time_only,
            consumed: false,
            subscription: bus.subscribe(),
        }
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Mark the zone consumed. Returns false if it already fired.
    pub fn trigger(&mut self) -> bool {
        if self.consumed {
            return false;
        }
        self.consumed = true;
        true
    }

    /// Drain pending events. Reset re-arms the zone unless it is one-time-only.
    pub fn handle_events(&mut self) {
        for event in self.subscription.drain() {
            if event == GameEvent::EncounterReset && !self.one_time_only {
                self.consumed = false;
            }
        }
    }

    /// Release the bus subscription.
    pub fn detach(self, bus: &mut EventBus<GameEvent>) {
        bus.unsubscribe(self.subscription.id);
    }
}

/// A barrier. Kill gates open once no enemy is left alive; key gates only
/// open through an explicit unlock.
#[derive(Debug)]
pub struct Gate {
    pub id: u32,
    pub key_gate: bool,
    locked: bool,
    subscription: Subscription<GameEvent>,
}

impl Gate {
    /// Gates start open.
    pub fn new(id: u32, key_gate: bool, bus: &mut EventBus<GameEvent>) -> Self {
        Self {
            id,
            key_gate,
            locked: false,
            subscription: bus.subscribe(),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool, cues: &mut Vec<Cue>) {
        if self.locked == locked {
            return;
        }
        self.locked = locked;
        log::debug!("Gate {} {}.", self.id, if locked { "locked" } else { "unlocked" });
        cues.push(Cue::GateChanged {
            gate: self.id,
            locked,
        });
    }

    /// Drain pending events against the number of enemies still alive.
    /// Only enemy kills count; breakables and the player never open a gate.
    pub fn handle_events(&mut self, enemies_alive: usize, cues: &mut Vec<Cue>) {
        for event in self.subscription.drain() {
            match event {
                GameEvent::ActorSlain {
                    kind: ActorKind::Enemy,
                    ..
                } => {
                    if self.locked && !self.key_gate && enemies_alive == 0 {
                        self.set_locked(false, cues);
                    }
                }
                GameEvent::ActorSlain { .. } => {}
                GameEvent::EncounterReset => {
                    if self.key_gate {
                        self.set_locked(true, cues);
                    }
                }
            }
        }
    }

    pub fn detach(self, bus: &mut EventBus<GameEvent>) {
        bus.unsubscribe(self.subscription.id);
    }
}
