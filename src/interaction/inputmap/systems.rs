//! Systems for input action evaluation.
use bevy::prelude::*;
use super::types::*;

/// Fold keyboard state into binding runtimes, then into action states.
pub fn system_evaluate_bindings(keyboard: Res<ButtonInput<KeyCode>>, mut input_map: ResMut<InputMap>) {
    let map = &mut *input_map;
    let total_bindings = map.bindings.len();
    if map.bindings_runtime.len() < total_bindings {
        map.bindings_runtime.resize(total_bindings, BindingRuntime::default());
    }
    for st in &mut map.states {
        st.clear_transitions();
    }

    let mut active = vec![false; map.actions.len()];
    let mut fired = vec![false; map.actions.len()];
    for (binding, rt) in map.bindings.iter().zip(map.bindings_runtime.iter_mut()) {
        let now = binding.keys.iter().all(|k| keyboard.pressed(*k));
        rt.just_pressed = now && !rt.active;
        rt.just_released = !now && rt.active;
        rt.active = now;
        let slot = binding.action.0 as usize;
        active[slot] |= now;
        fired[slot] |= rt.just_pressed;
    }

    for (i, st) in map.states.iter_mut().enumerate() {
        let was = st.pressed;
        st.pressed = active[i];
        // A second chord for the same action also counts as a fresh press.
        st.just_pressed = fired[i];
        st.just_released = was && !active[i];
    }
}
