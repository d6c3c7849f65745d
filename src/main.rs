//! Spectrobars - microphone-driven 3D bar graph
//!
//! Bar heights follow the live spectrum, a rolling-average beat detector
//! pumps them on every hit, and a rainbow gradient scrolls across the row.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use spectrobars::audio::{MicrophoneInput, SpectrumSource, WavFileInput};
use spectrobars::bars::BarField;
use spectrobars::camera::CameraSystem;
use spectrobars::cli::Args;
use spectrobars::clock::SystemClock;
use spectrobars::controls::ControlAction;
use spectrobars::logging;
use spectrobars::params::{AnalyserConfig, BeatConfig, RenderConfig, VisualSettings};
use spectrobars::rendering::{RenderSystem, Uniforms};
use spectrobars::visualizer::Visualizer;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,
    camera: CameraSystem,
    bars: BarField,

    // Audio-reactive state
    source: Box<dyn SpectrumSource>,
    visualizer: Visualizer,
    settings: VisualSettings,

    // Configuration
    render_config: RenderConfig,

    // Time tracking
    clock: SystemClock,

    /// First fatal error raised inside the event loop
    failure: Option<anyhow::Error>,
}

impl App {
    fn new(source: Box<dyn SpectrumSource>, settings: VisualSettings) -> Result<Self> {
        let render_config = RenderConfig::default();
        let visualizer = Visualizer::new(source.bin_count(), BeatConfig::default())
            .context("invalid beat detector configuration")?;

        Ok(Self {
            window: None,
            render_system: None,
            camera: CameraSystem::new(&render_config),
            bars: BarField::new(&settings, render_config.initial_bar_color),
            source,
            visualizer,
            settings,
            render_config,
            clock: SystemClock::new(),
            failure: None,
        })
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title("Spectrobars")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create window")?,
        );

        let render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            self.settings.bar_count,
        ))
        .context("failed to initialize renderer")?;

        let (width, height) = render_system.size();
        self.camera.resize(width, height);

        info!("running; press ESC to quit");

        self.window = Some(window);
        self.render_system = Some(render_system);
        Ok(())
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode) {
        if key == KeyCode::Escape {
            event_loop.exit();
            return;
        }
        if let Some(action) = ControlAction::from_key(key) {
            if action.apply(&mut self.settings) {
                self.bars.rebuild(&self.settings);
            }
        }
    }

    /// Run one frame through the pipeline and draw it
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(render_system) = self.render_system.as_mut() else {
            return;
        };

        let report = self.visualizer.tick(
            self.source.as_mut(),
            &self.clock,
            &self.settings,
            self.bars.len(),
        );
        self.bars.apply(&report.output);

        let uniforms = Uniforms {
            view_proj: self.camera.view_proj().to_cols_array_2d(),
            ambient: [self.render_config.ambient_intensity, 0.0, 0.0, 0.0],
        };
        render_system.update_uniforms(&uniforms);
        render_system.update_instances(&self.bars.instances());

        match render_system.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = render_system.size();
                render_system.resize(width, height);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => warn!("render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }
        if let Err(e) = self.init_window(event_loop) {
            self.failure = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(render_system) = self.render_system.as_mut() {
                    render_system.resize(size.width, size.height);
                }
                self.camera.resize(size.width, size.height);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(key),
                        ..
                    },
                ..
            } => self.handle_key(event_loop, key),
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }
}

/// Open the WAV file or microphone named on the command line
fn open_source(args: &Args) -> Result<Box<dyn SpectrumSource>> {
    let config = AnalyserConfig::default();
    let source: Box<dyn SpectrumSource> = match &args.input {
        Some(path) => Box::new(
            WavFileInput::open(path, config)
                .with_context(|| format!("failed to open {}", path.display()))?,
        ),
        None => Box::new(
            MicrophoneInput::open(args.device.as_deref(), config)
                .context("microphone access denied or unavailable")?,
        ),
    };
    Ok(source)
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(&args.log_level);

    let settings = args.visual_settings().context("invalid settings")?;
    let source = open_source(&args)?;

    info!(
        bars = settings.bar_count,
        bins = source.bin_count(),
        "starting spectrobars"
    );

    let mut app = App::new(source, settings)?;
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop
        .run_app(&mut app)
        .context("event loop terminated abnormally")?;

    match app.failure.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
