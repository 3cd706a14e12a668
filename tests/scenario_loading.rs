use pixel_town::{
    engine::{Engine, EngineSettings},
    scenario::ScenarioLoader,
    spatial::TileKind,
};

fn load_fixture() -> pixel_town::Scenario {
    ScenarioLoader::new(env!("CARGO_MANIFEST_DIR"))
        .load("scenarios/pixel_town.yaml")
        .expect("bundled scenario should load")
}

#[test]
fn bundled_scenario_builds_default_town() {
    let scenario = load_fixture();
    assert_eq!(scenario.name, "pixel-town");
    assert_eq!(scenario.frames(None), 1200);

    let world = scenario.build_world();
    assert_eq!(world.map().width(), 50);
    assert_eq!(world.map().height(), 25);
    assert_eq!(world.population(), 5);
    assert_eq!(world.max_agents(), 10);
    assert_eq!(world.resources().wood, 100.0);
    assert_eq!(world.resources().food, 150.0);
    assert_eq!(world.clock().time_string(), "08:00");
    assert!(!world.map().cells_of_kind(TileKind::Tree).is_empty());

    let names: Vec<&str> = world.agents().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Alex", "Sam", "Taylor", "Jordan", "Casey"]);
}

#[test]
fn same_seed_replays_identically() {
    let scenario = load_fixture();
    let run = || {
        let mut world = scenario.build_world();
        let mut engine = Engine::town(EngineSettings {
            scenario_name: scenario.name.clone(),
            seed: scenario.seed,
        });
        engine.add_agent(&mut world);
        engine.run(&mut world, 600).expect("run succeeds");
        serde_json::to_string(&world.snapshot(&scenario.name)).expect("snapshot encodes")
    };
    assert_eq!(run(), run());
}

#[test]
fn hook_receives_a_snapshot_per_frame() {
    let scenario = load_fixture();
    let mut world = scenario.build_world();
    let mut engine = Engine::town(EngineSettings {
        scenario_name: scenario.name.clone(),
        seed: scenario.seed,
    });

    let mut frames = Vec::new();
    engine
        .run_with_hook(&mut world, 12, |snapshot| {
            assert_eq!(snapshot.scenario, "pixel-town");
            assert_eq!(snapshot.map.tiles.len(), 50 * 25);
            frames.push(snapshot.frame);
        })
        .expect("run succeeds");

    assert_eq!(frames.len(), 12);
    assert_eq!(frames.first().copied(), Some(1));
    assert_eq!(frames.last().copied(), Some(12));
    // Two clock advances at speed 1.
    assert_eq!(world.clock().minutes(), 482);
}
