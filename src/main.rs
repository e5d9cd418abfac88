use std::io;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;

use tilt_snake::config::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, FRAME_INTERVAL_MS, GridSize, THEME_CLASSIC,
};
use tilt_snake::engine::Engine;
use tilt_snake::game::{GameState, GameStatus};
use tilt_snake::input::{GameInput, InputHandler};
use tilt_snake::renderer;
use tilt_snake::sensor::TiltSensor;
use tilt_snake::settings::{Settings, load_settings, settings_path};
use tilt_snake::terminal_runtime::TerminalSession;
use tilt_snake::tilt::{Calibration, TiltResolver};
use tilt_snake::ui::hud::HudInfo;

#[derive(Debug, Parser)]
#[command(version, about = "Tilt-controlled terminal Snake")]
struct Cli {
    /// Disable the accelerometer and play with the keyboard only.
    #[arg(long = "no-sensor")]
    no_sensor: bool,

    /// I2C device node for the accelerometer (overrides settings file).
    #[arg(long)]
    device: Option<PathBuf>,

    /// Tilt threshold in raw sensor units (overrides settings file).
    #[arg(long)]
    threshold: Option<i16>,

    /// Seed for deterministic food placement.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!(
                "Warning: ignoring unreadable settings file {}: {error}",
                settings_path().display()
            );
            Settings::default()
        }
    };

    let sensor = if cli.no_sensor {
        None
    } else {
        open_sensor(&cli, &settings)
    };

    run(&cli, &settings, sensor)
}

fn run(cli: &Cli, settings: &Settings, sensor: Option<Box<dyn TiltSensor>>) -> io::Result<()> {
    let bounds = GridSize {
        width: DEFAULT_GRID_WIDTH,
        height: DEFAULT_GRID_HEIGHT,
    };
    let state = match cli.seed {
        Some(seed) => GameState::new_with_seed(bounds, seed),
        None => GameState::new(bounds),
    };
    let resolver = TiltResolver {
        calibration: Calibration {
            offset_x: settings.offset_x,
            offset_y: settings.offset_y,
        },
        threshold: cli.threshold.unwrap_or(settings.threshold),
    };

    let mut engine = Engine::new(state, resolver);
    let tilt_enabled = sensor.is_some();
    if let Some(sensor) = sensor {
        engine = engine.with_sensor(sensor);
    }

    let mut session = TerminalSession::enter()?;
    let mut input = InputHandler::new();
    let tick_interval = Duration::from_millis(settings.tick_interval_ms);
    let mut last_tick = Instant::now();

    loop {
        session.terminal_mut().draw(|frame| {
            renderer::render(
                frame,
                engine.state(),
                HudInfo {
                    theme: &THEME_CLASSIC,
                    tilt_enabled,
                },
            );
        })?;

        if let Some(game_input) = input.poll_input()? {
            match game_input {
                GameInput::Quit => break,
                GameInput::Pause => engine.toggle_pause(),
                GameInput::Restart => {
                    if engine.state().status == GameStatus::GameOver {
                        engine.restart();
                        last_tick = Instant::now();
                    }
                }
                GameInput::Direction(direction) => engine.request_heading(direction),
            }
        }

        if last_tick.elapsed() >= tick_interval {
            engine.tick();
            last_tick = Instant::now();
        }

        thread::sleep(Duration::from_millis(FRAME_INTERVAL_MS));
    }

    Ok(())
}

#[cfg(feature = "i2c")]
fn open_sensor(cli: &Cli, settings: &Settings) -> Option<Box<dyn TiltSensor>> {
    use tilt_snake::sensor::I2cTiltSensor;

    let device = cli.device.as_ref().unwrap_or(&settings.device);
    match I2cTiltSensor::open(device) {
        Ok(sensor) => Some(Box::new(sensor)),
        Err(error) => {
            eprintln!("Warning: tilt input unavailable, keyboard only: {error}");
            None
        }
    }
}

#[cfg(not(feature = "i2c"))]
fn open_sensor(cli: &Cli, _settings: &Settings) -> Option<Box<dyn TiltSensor>> {
    if cli.device.is_some() {
        eprintln!("Warning: built without the `i2c` feature, --device has no effect");
    }
    None
}
