use tile_merge::core::config::GameConfig;
use tile_merge::interaction::inputmap::parse::parse_input_toml;

#[test]
fn shipped_config_parses_cleanly() {
    let cfg = GameConfig::load_from_file("assets/config/game.ron").expect("shipped config parses");
    assert_eq!(cfg, GameConfig::default());
    assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
}

#[test]
fn layered_local_override_wins() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let local = dir.path().join("game.local.ron");
    std::fs::write(&local, "(animation: (move_velocity: 40.0), spawn: (seed: Some(9)))").unwrap();
    let (cfg, used, errors) = GameConfig::load_layered(["assets/config/game.ron", local.to_str().unwrap()]);
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(used.len(), 2);
    assert_eq!(cfg.animation.move_velocity, 40.0);
    assert_eq!(cfg.animation.fps, 130.0);
    assert_eq!(cfg.spawn.seed, Some(9));
    assert_eq!(cfg.geometry().step, 40.0);
}

#[test]
fn shipped_input_map_binds_arrows_and_wasd() {
    let raw = std::fs::read_to_string("assets/config/input.toml").expect("input map present");
    let parsed = parse_input_toml(&raw);
    assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
    assert_eq!(parsed.input_map.actions.len(), 4);
    assert_eq!(parsed.input_map.bindings.len(), 8);
}
