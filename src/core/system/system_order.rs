//! Central system ordering labels to make update sequence explicit.
//! Stages (high-level):
//! 1. Input actions evaluated (PreUpdate, see `InputActionUpdateSet`)
//! 2. MoveInput (direction actions -> move requests -> slide start)
//! 3. Slide frames (FixedUpdate, one animation step per tick)
//! 4. BoardRender (tile sprites follow the board)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct MoveInputSet; // translate actions into move requests

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct BoardRenderSet; // sync visuals after gameplay mutated the board
