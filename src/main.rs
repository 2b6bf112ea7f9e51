use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use arcade::GameError;
use arcade::engine::state::{GameState, StateManager};
use arcade::engine::timestep::Timer;
use arcade::game::states::lander::LanderState;
use arcade::game::states::pong::PongState;
use arcade::game::states::showcase::ShowcaseState;
use arcade::levels::loader::{LevelData, load_level};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Demo {
    Lander,
    Pong,
    Showcase,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Small 2D physics demos", long_about = None)]
struct Args {
    /// Which demo to run
    #[arg(short, long, value_enum, default_value_t = Demo::Lander)]
    demo: Demo,

    /// Level file for the lander demo; the built-in level is used when omitted
    #[arg(short, long)]
    level: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), GameError> {
    // Initialize the event loop
    let event_loop = EventLoop::new();

    let window = WindowBuilder::new()
        .with_title("Arcade")
        .with_inner_size(winit::dpi::LogicalSize::new(640, 480))
        .build(&event_loop)?;

    let mut state_manager = StateManager::new(window)?;

    let state: Box<dyn GameState> = match args.demo {
        Demo::Lander => {
            let level = match &args.level {
                Some(path) => load_level(path)?,
                None => LevelData::default(),
            };
            Box::new(LanderState::new(&level, &mut state_manager)?)
        }
        Demo::Pong => Box::new(PongState::new(&mut state_manager)),
        Demo::Showcase => Box::new(ShowcaseState::new(&mut state_manager)),
    };
    log::info!("Starting {:?} demo", args.demo);
    state_manager.change_state(state);

    // Wall-clock time between frames
    let mut timer = Timer::new();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::WindowEvent { event, window_id } if window_id == state_manager.window.id() => {
                if state_manager.handle_window_event(&event) {
                    log::info!("Exit requested");
                    *control_flow = ControlFlow::Exit;
                } else if let WindowEvent::Focused(focused) = event {
                    log::debug!("Window focus: {}", focused);
                }
            }
            Event::MainEventsCleared => {
                let dt = timer.delta();
                state_manager.update(dt);

                if state_manager.is_finished() {
                    log::info!("Demo finished");
                    *control_flow = ControlFlow::Exit;
                    return;
                }

                state_manager.window.request_redraw();
            }
            Event::RedrawRequested(window_id) if window_id == state_manager.window.id() => {
                match state_manager.render() {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => state_manager.resize(state_manager.size),
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of GPU memory");
                        *control_flow = ControlFlow::Exit;
                    }
                    Err(e) => log::warn!("{:?}", e),
                }
            }
            _ => (),
        }
    })
}
