use bevy::prelude::*;
use smallvec::SmallVec;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionId(pub u16); // internal index (array position)

#[derive(Debug, Clone)]
pub struct ActionMeta {
    pub id: ActionId,
    pub name: String,
    pub description: String,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionState {
    pub pressed: bool,
    pub just_pressed: bool,
    pub just_released: bool,
}
impl ActionState {
    pub fn clear_transitions(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
    }
}

/// Keys that must all be held for a binding to fire, canonically sorted.
pub type Chord = SmallVec<[KeyCode; 2]>;

#[derive(Debug, Clone)]
pub struct Binding {
    pub id: u32,
    pub action: ActionId,
    pub keys: Chord,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BindingRuntime {
    pub active: bool,
    pub just_pressed: bool,
    pub just_released: bool,
}

/// Named actions and the key chords bound to them, plus their per-frame state.
#[derive(Resource, Debug, Default)]
pub struct InputMap {
    pub actions: Vec<ActionMeta>,
    pub name_to_id: HashMap<String, ActionId>,
    pub bindings: Vec<Binding>,
    pub bindings_runtime: Vec<BindingRuntime>,
    pub chord_map: HashMap<Chord, u32>,
    pub states: Vec<ActionState>,
}

impl InputMap {
    pub fn get_state(&self, name: &str) -> Option<&ActionState> {
        self.name_to_id
            .get(name)
            .and_then(|id| self.states.get(id.0 as usize))
    }
    pub fn pressed(&self, name: &str) -> bool {
        self.get_state(name).is_some_and(|s| s.pressed)
    }
    pub fn just_pressed(&self, name: &str) -> bool {
        self.get_state(name).is_some_and(|s| s.just_pressed)
    }
    pub fn just_released(&self, name: &str) -> bool {
        self.get_state(name).is_some_and(|s| s.just_released)
    }
    pub fn bindings_for(&self, name: &str) -> impl Iterator<Item = &Binding> + '_ {
        let id = self.name_to_id.get(name).copied();
        self.bindings
            .iter()
            .filter(move |b| Some(b.action) == id)
    }
}
