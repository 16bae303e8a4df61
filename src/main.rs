//! Cliffhop entry point
//!
//! Headless demo: loads the built-in level, runs a scripted session at a
//! fixed timestep and logs what the simulation reports. A real frontend
//! drives the same API with rendering attached; this binary exists so the
//! whole loop (profile, run state, level, tick, events, save) can be
//! watched from a terminal with `RUST_LOG=info`.

use cliffhop::consts::{MAX_SUBSTEPS, SIM_DT};
use cliffhop::persistence::FileStore;
use cliffhop::sim::{tick, GameEvent, LevelDescription, LevelState, Outcome, TickInput};
use cliffhop::{Profile, RunState};

/// Demo pacing: the host loop runs at 60 Hz, the sim at 120
const FRAME_DT: f32 = 1.0 / 60.0;
/// Give up on the scripted session after this much simulated time
const DEMO_TIME_LIMIT: f32 = 45.0;
/// HP for every run
const MAX_HP: u32 = 3;
/// Levels this build ships (the demo only plays the first)
const LEVEL_COUNT: u32 = 5;
/// Where the demo keeps its profile
const PROFILE_PATH: &str = "cliffhop_profile.json";

const DEMO_LEVEL: &str = r#"{
    "number": 1,
    "player_spawn": [-240.0, -30.0],
    "bounds": { "min_x": -320.0, "max_x": 480.0 },
    "static_platforms": [
        { "pos": [0.0, 20.0], "size": [960.0, 40.0] },
        { "pos": [420.0, -40.0], "size": [120.0, 16.0] }
    ],
    "moving_platforms": [
        { "origin": [160.0, -70.0], "size": [90.0, 14.0], "axis": "horizontal", "range": 70.0, "speed": 55.0 }
    ],
    "one_way_platforms": [
        { "origin": [-60.0, -80.0], "width": 140.0 }
    ],
    "collectibles": [
        [-160.0, -26.0], [-100.0, -26.0], [-40.0, -26.0],
        [20.0, -26.0], [80.0, -26.0], [140.0, -26.0]
    ],
    "heal_pickups": [[200.0, -26.0]],
    "hostiles": [
        { "variant": "patrolling", "pos": [320.0, -16.0], "half_range": 60.0, "speed": 60.0 },
        { "variant": "hopping", "pos": [250.0, -16.0], "impulse": 380.0, "interval": 1.6 },
        { "variant": "flying", "pos": [0.0, -160.0], "amplitude": 28.0, "frequency": 2.2, "speed": 45.0 }
    ],
    "goal": { "kind": "collect_all" },
    "seed": 7
}"#;

/// One fixed-timestep session: accumulator plus substep cap, one-shot
/// inputs cleared after the ticks that consumed them.
struct Session {
    state: LevelState,
    run: RunState,
    input: TickInput,
    accumulator: f32,
}

impl Session {
    fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            events.extend(tick(&mut self.state, &mut self.run, &self.input, SIM_DT));
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.jump = false;
        }
        events
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::HpChanged { hp } => log::info!("HP is now {hp}"),
        GameEvent::PlayerDamaged {
            hp, hostile_kind, ..
        } => log::info!("Hit by a {hostile_kind} hostile, {hp} HP left"),
        GameEvent::PickupCollected { kind } => log::debug!("Picked up {kind:?}"),
        GameEvent::CollectiblesChanged { collected, total } => {
            log::info!("Collectibles: {collected}/{total}")
        }
        GameEvent::LevelWon {
            level,
            collected,
            total,
            hp,
        } => log::info!("Level {level} won with {hp} HP ({collected}/{total} collected)"),
        GameEvent::LevelLost { level, .. } => log::info!("Level {level} lost"),
    }
}

fn main() {
    env_logger::init();
    log::info!("Cliffhop demo starting...");

    let mut store = FileStore::new(PROFILE_PATH);
    let mut profile = Profile::load(&store);
    let mut run = RunState::from_profile(&profile, MAX_HP, LEVEL_COUNT);

    let desc = match LevelDescription::from_json(DEMO_LEVEL) {
        Ok(desc) => desc,
        Err(e) => {
            log::error!("Demo level failed to load: {e}");
            return;
        }
    };
    run.select_level(desc.number);

    let state = match LevelState::start(&desc, &mut run) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Demo level failed to load: {e}");
            return;
        }
    };
    let mut session = Session {
        state,
        run,
        input: TickInput::default(),
        accumulator: 0.0,
    };

    // Scripted pilot: hold right, hop every couple of seconds, retry once
    // after a loss
    let mut retried = false;
    let mut frame: u64 = 0;
    while session.state.elapsed < DEMO_TIME_LIMIT {
        session.input.move_dir = 1.0;
        if frame % 120 == 0 {
            session.input.jump = true;
        }

        for event in session.update(FRAME_DT) {
            log_event(&event);
        }

        match session.state.outcome {
            Outcome::Playing => {}
            Outcome::Won => break,
            Outcome::Lost => {
                if retried {
                    break;
                }
                retried = true;
                match LevelState::restart(&desc, &mut session.run) {
                    Ok(state) => {
                        log::info!(
                            "Retrying with {} HP (checkpoint)",
                            session.run.current_hp()
                        );
                        session.state = state;
                        session.accumulator = 0.0;
                    }
                    Err(e) => {
                        log::error!("Restart failed: {e}");
                        break;
                    }
                }
            }
        }
        frame += 1;
    }

    profile.absorb_run(&session.run);
    profile.save(&mut store);

    match session.state.outcome {
        Outcome::Won => println!(
            "Demo finished: won with {} HP, profile saved to {PROFILE_PATH}",
            session.run.current_hp(),
        ),
        Outcome::Lost => println!("Demo finished: out of HP"),
        Outcome::Playing => println!("Demo finished: time limit reached"),
    }
}
