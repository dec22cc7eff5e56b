use super::types::*;
use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
pub struct ParsedInputConfig {
    pub input_map: InputMap,
    pub errors: Vec<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ActionDecl {
    description: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct RootToml {
    actions: Option<HashMap<String, ActionDecl>>,
    bindings: Option<HashMap<String, Vec<String>>>,
}

/// Parse an input map from TOML:
///
/// ```toml
/// [actions]
/// MoveLeft = { description = "Slide tiles left" }
///
/// [bindings]
/// MoveLeft = ["Key:ArrowLeft", "Key:A"]
/// ```
///
/// Problems are collected in `errors`; valid parts are still returned.
pub fn parse_input_toml(raw: &str) -> ParsedInputConfig {
    let mut result = ParsedInputConfig::default();
    let root: RootToml = match toml::from_str(raw) {
        Ok(r) => r,
        Err(e) => {
            result.errors.push(format!("Top-level parse: {e}"));
            return result;
        }
    };

    // Sorted so action ids do not depend on hash order.
    let mut declared: Vec<(String, ActionDecl)> = root.actions.unwrap_or_default().into_iter().collect();
    declared.sort_by(|a, b| a.0.cmp(&b.0));
    let mut input_map = InputMap::default();
    for (name, decl) in declared {
        if !validate_action_name(&name) {
            result.errors.push(format!("Invalid action name '{name}': must be PascalCase"));
            continue;
        }
        let id = ActionId(input_map.actions.len() as u16);
        input_map.actions.push(ActionMeta {
            id,
            name: name.clone(),
            description: decl.description.unwrap_or_default(),
        });
        input_map.name_to_id.insert(name, id);
        input_map.states.push(ActionState::default());
    }

    let mut bindings: Vec<(String, Vec<String>)> = root.bindings.unwrap_or_default().into_iter().collect();
    bindings.sort_by(|a, b| a.0.cmp(&b.0));
    let mut binding_id: u32 = 0;
    for (action_name, list) in bindings {
        let Some(aid) = input_map.name_to_id.get(&action_name).copied() else {
            result.errors.push(format!("Binding references unknown action '{action_name}'"));
            continue;
        };
        for spec in &list {
            match parse_binding(spec) {
                Ok(mut keys) => {
                    keys.sort_by_key(|k| keycode_rank(*k));
                    if let Some(&existing) = input_map.chord_map.get(&keys) {
                        let owner = input_map.bindings[existing as usize].action;
                        result.errors.push(format!(
                            "[binding {action_name} '{spec}'] chord already bound to '{}'",
                            input_map.actions[owner.0 as usize].name
                        ));
                        continue;
                    }
                    input_map.chord_map.insert(keys.clone(), binding_id);
                    input_map.bindings.push(Binding { id: binding_id, action: aid, keys });
                    binding_id += 1;
                }
                Err(err) => result.errors.push(format!("[binding {action_name} '{spec}'] {err}")),
            }
        }
    }
    input_map.bindings_runtime = vec![BindingRuntime::default(); input_map.bindings.len()];
    result.input_map = input_map;
    result
}

fn validate_action_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.is_empty() || !bytes[0].is_ascii_uppercase() {
        return false;
    }
    name.chars().all(|c| c.is_ascii_alphanumeric())
}

fn parse_binding(spec: &str) -> Result<Chord, String> {
    let mut keys = Chord::new();
    let mut seen: HashSet<KeyCode> = HashSet::new();
    for part in spec.split('+') {
        let p = part.trim();
        if p.is_empty() {
            continue;
        }
        let key = parse_token(p)?;
        if !seen.insert(key) {
            return Err(format!("Duplicate key in chord: {key:?}"));
        }
        keys.push(key);
    }
    if keys.is_empty() {
        return Err("Empty binding".into());
    }
    Ok(keys)
}

fn parse_token(s: &str) -> Result<KeyCode, String> {
    match s.strip_prefix("Key:") {
        Some(rest) => parse_keycode(rest),
        None => Err(format!("Unrecognized token '{s}' (expected Key:<name>)")),
    }
}

fn parse_keycode(name: &str) -> Result<KeyCode, String> {
    let kc = match name {
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "A" | "KeyA" => KeyCode::KeyA,
        "D" | "KeyD" => KeyCode::KeyD,
        "S" | "KeyS" => KeyCode::KeyS,
        "W" | "KeyW" => KeyCode::KeyW,
        "H" | "KeyH" => KeyCode::KeyH,
        "J" | "KeyJ" => KeyCode::KeyJ,
        "K" | "KeyK" => KeyCode::KeyK,
        "L" | "KeyL" => KeyCode::KeyL,
        "Numpad2" => KeyCode::Numpad2,
        "Numpad4" => KeyCode::Numpad4,
        "Numpad6" => KeyCode::Numpad6,
        "Numpad8" => KeyCode::Numpad8,
        "Space" => KeyCode::Space,
        "Enter" => KeyCode::Enter,
        "Escape" => KeyCode::Escape,
        "ShiftLeft" => KeyCode::ShiftLeft,
        "ShiftRight" => KeyCode::ShiftRight,
        "ControlLeft" => KeyCode::ControlLeft,
        "ControlRight" => KeyCode::ControlRight,
        other => return Err(format!("Unsupported KeyCode '{other}' (extend parser)")),
    };
    Ok(kc)
}

// Modifiers first so "ControlLeft+KeyA" and "KeyA+ControlLeft" share one chord.
fn keycode_rank(k: KeyCode) -> u16 {
    use bevy::input::keyboard::KeyCode::*;
    match k {
        ControlLeft => 1,
        ControlRight => 2,
        ShiftLeft => 3,
        ShiftRight => 4,
        ArrowLeft => 10,
        ArrowRight => 11,
        ArrowUp => 12,
        ArrowDown => 13,
        Numpad2 => 20,
        Numpad4 => 21,
        Numpad6 => 22,
        Numpad8 => 23,
        KeyA => 100,
        KeyD => 101,
        KeyH => 102,
        KeyJ => 103,
        KeyK => 104,
        KeyL => 105,
        KeyS => 106,
        KeyW => 107,
        Space => 200,
        Enter => 201,
        Escape => 202,
        _ => 1000,
    }
}
