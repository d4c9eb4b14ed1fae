use walker::{parse_config, Config, Script, ScriptStep, Session};

const SCRIPT: &str = r#"
[[step]]
action = "walk"
seconds = 0.5

[[step]]
action = "look"
yaw_deg = 90.0

[[step]]
action = "insert"
join_index = 1
template_id = "battery_room_mk1"
level = 0

[[step]]
action = "add_level"
direction = "above"
index = 2
level = 0

[[step]]
action = "wait"
seconds = 0.25
"#;

#[test]
fn empty_config_uses_defaults() {
    let cfg = parse_config("").unwrap();
    assert_eq!(cfg, Config::default());
    assert!((cfg.session.frame_hz - 60.0).abs() < 1e-6);
    assert!(!cfg.session.autosave);
}

#[test]
fn config_overrides_only_named_values() {
    let cfg = parse_config(
        r#"
        [hull]
        eye_height_m = 1.6

        [session]
        frame_hz = 30.0
        autosave = true
        "#,
    )
    .unwrap();
    assert!((cfg.hull.eye_height_m - 1.6).abs() < 1e-6);
    assert!((cfg.hull.deck_height_m - 2.6).abs() < 1e-6);
    assert!((cfg.session.dt() - 1.0 / 30.0).abs() < 1e-6);
    assert!(cfg.session.autosave);
}

#[test]
fn bad_config_is_an_error() {
    assert!(parse_config("[session]\nframe_hz = \"fast\"").is_err());
}

#[test]
fn script_steps_expand_into_frames() {
    let script = Script::parse(SCRIPT).unwrap();
    assert_eq!(script.steps.len(), 5);
    assert!(matches!(script.steps[0], ScriptStep::Walk { forward, strafe, .. } if forward == 1.0 && strafe == 0.0));

    let walk = script.steps[0].inputs(60.0);
    assert_eq!(walk.len(), 30);
    assert!(walk.iter().all(|i| i.forward == 1.0 && i.mutation.is_none()));

    let look = script.steps[1].inputs(60.0);
    assert_eq!(look.len(), 1);
    assert!((look[0].yaw_delta - std::f32::consts::FRAC_PI_2).abs() < 1e-5);

    assert!(script.steps[2].is_mutation());
    let insert = script.steps[2].inputs(60.0);
    assert_eq!(insert.len(), 1);
    assert!(insert[0].mutation.is_some());

    assert_eq!(script.steps[4].inputs(60.0).len(), 15);
}

#[test]
fn unknown_step_is_rejected() {
    assert!(Script::parse("[[step]]\naction = \"fly\"\n").is_err());
}

#[test]
fn session_counts_applied_and_refused_edits() {
    let mut session = Session::new(&Config::default(), None).unwrap();
    let script = Script::parse(SCRIPT).unwrap();
    session.run_script(&script).unwrap();

    let summary = session.summary();
    assert_eq!(summary.frames_run, 30 + 1 + 1 + 1 + 15);
    // The battery room is not a ladder, so adding a level is refused.
    assert_eq!(summary.mutations_applied, 1);
    assert_eq!(summary.mutations_refused, 1);
    assert_eq!(summary.toasts[0], "Inserted battery_room_mk1");
    assert_eq!(summary.toasts[1], "Module 2 on level 0 is not a ladder room");
    assert_eq!(summary.layout.level_chain_ids["0"].len(), 3);

    let json = serde_json::to_string(&summary).unwrap();
    assert!(json.contains("\"frames_run\":48"), "{json}");
}

#[test]
fn walking_aft_stops_at_the_cockpit_bulkhead() {
    let mut session = Session::new(&Config::default(), None).unwrap();
    let script = Script::parse("[[step]]\naction = \"walk\"\nseconds = 3.0\n").unwrap();
    session.run_script(&script).unwrap();

    let world = session.world();
    let p = world.agent().position;
    assert!(world.is_occupiable(p), "{p:?}");
    assert!(p.z > -4.0, "should have walked aft, at {p:?}");
    assert!(p.z < -3.44 + 1e-3, "walked through the bulkhead to {p:?}");
    assert!(p.x.abs() < 1e-5);
}

#[test]
fn idle_frames_leave_the_agent_alone() {
    let mut session = Session::new(&Config::default(), None).unwrap();
    let start = session.world().agent().position;
    session.idle(20).unwrap();
    assert_eq!(session.frames_run(), 20);
    assert_eq!(session.world().agent().position, start);
}
