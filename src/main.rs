//! Vector Arena headless demo
//!
//! Runs the simulation with a scripted autopilot and prints the final frame
//! as JSON. Usage: `vector-arena [settings.json]`, log level via `RUST_LOG`.

use vector_arena::sim::{GameEngine, TickInput, TickOutcome};
use vector_arena::{LogAudio, Settings, angle_of, normalize_angle};

/// Aim tolerance before the autopilot opens fire (radians)
const FIRE_CONE: f32 = 0.15;
/// Dead zone for turning (radians)
const TURN_DEAD_ZONE: f32 = 0.05;

type DemoEngine = GameEngine<TickInput, LogAudio>;

/// Turns toward the nearest enemy, fires when aimed, thrusts in short bursts
#[derive(Debug, Default)]
struct Autopilot {
    frame: u32,
}

impl Autopilot {
    fn plan(&mut self, engine: &DemoEngine) -> TickInput {
        self.frame = self.frame.wrapping_add(1);

        let Some(player) = engine.player() else {
            return TickInput::default();
        };
        let pos = player.body.pos;
        let nearest = engine.enemies().min_by(|a, b| {
            a.body
                .pos
                .distance_squared(pos)
                .total_cmp(&b.body.pos.distance_squared(pos))
        });
        let Some(enemy) = nearest else {
            return TickInput::default();
        };

        let aim = angle_of(enemy.body.pos - pos).unwrap_or(player.body.rotation);
        let error = normalize_angle(aim - player.body.rotation);

        TickInput {
            rotate_left: error < -TURN_DEAD_ZONE,
            rotate_right: error > TURN_DEAD_ZONE,
            thrust: self.frame % 90 < 15,
            fire: error.abs() < FIRE_CONE,
        }
    }
}

fn main() {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    log::info!("Vector Arena demo starting (seed {})", settings.seed);

    let mut audio = LogAudio::new();
    audio.set_muted(settings.muted);

    let mut engine = GameEngine::from_settings(&settings, TickInput::default(), audio);
    engine.start();

    let dt = settings.effective_frame_dt();
    let mut pilot = Autopilot::default();
    let mut last_wave = engine.state().wave;
    let mut last_score = engine.state().score;

    for frame in 0..settings.demo_frames {
        let input = pilot.plan(&engine);
        *engine.input_mut() = input;
        let outcome = engine.update(dt);

        let state = engine.state();
        if state.wave != last_wave {
            log::info!("Frame {frame}: reached wave {}", state.wave);
            last_wave = state.wave;
        }
        if state.score != last_score {
            log::info!("Frame {frame}: score {}", state.score);
            last_score = state.score;
        }
        if outcome == TickOutcome::GameOver {
            log::info!("Frame {frame}: game over");
            break;
        }
    }

    let state = engine.state();
    log::info!(
        "Demo finished: score {}, wave {}, lives {}",
        state.score,
        state.wave,
        state.lives
    );

    match serde_json::to_string_pretty(&engine.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            log::error!("Failed to serialize snapshot: {err}");
            std::process::exit(1);
        }
    }
}
