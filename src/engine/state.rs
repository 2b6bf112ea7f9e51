use winit::event::WindowEvent;
use winit::window::Window;
use wgpu::{Device, Queue, Surface, SurfaceConfiguration};

use crate::engine::draw_list::DrawList;
use crate::engine::graphics::SpriteRenderer;
use crate::engine::program::{ShaderProgram, TextureId, TextureLoader};
use crate::engine::texture::TextureSource;
use crate::error::GameError;

// GameState trait defines what all game states must implement
pub trait GameState {
    // Process window events like key presses; true asks to exit
    fn handle_event(&mut self, event: &WindowEvent) -> bool;

    // Update game logic
    fn update(&mut self, dt: f32);

    // Issue this frame's sprite draws
    fn render(&self, program: &mut dyn ShaderProgram);

    fn clear_color(&self) -> wgpu::Color;

    // Shown in the window title bar
    fn title(&self) -> String;

    fn is_finished(&self) -> bool {
        false
    }
}

// StateManager holds our graphics resources and the current game state
pub struct StateManager {
    // Declared before the window so it is dropped first
    pub surface: Surface,
    pub window: Window,
    pub device: Device,
    pub queue: Queue,
    pub config: SurfaceConfiguration,
    pub size: winit::dpi::PhysicalSize<u32>,
    renderer: SpriteRenderer,
    draws: DrawList,
    current_state: Option<Box<dyn GameState>>,
    title: String,
}

impl StateManager {
    // Create the GPU resources for the given window
    pub fn new(window: Window) -> Result<Self, GameError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            dx12_shader_compiler: Default::default(),
        });

        // The surface is stored next to the window it was created from
        let surface = unsafe { instance.create_surface(&window) }
            .map_err(|e| GameError::Graphics(format!("failed to create surface: {}", e)))?;

        let adapter = futures::executor::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| GameError::Graphics("no suitable graphics adapter".to_string()))?;

        log::info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = futures::executor::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                features: wgpu::Features::empty(),
                limits: wgpu::Limits::default(),
                label: None,
            },
            None,
        ))
        .map_err(|e| GameError::Graphics(format!("failed to create device: {}", e)))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| GameError::Graphics("surface reports no formats".to_string()))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps.present_modes.first().copied().unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
        };

        if size.width > 0 && size.height > 0 {
            surface.configure(&device, &config);
        }

        let renderer = SpriteRenderer::new(&device, surface_format);

        Ok(Self {
            surface,
            window,
            device,
            queue,
            config,
            size,
            renderer,
            draws: DrawList::new(),
            current_state: None,
            title: String::new(),
        })
    }

    // Handle window events and pass them to the current state
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => true,
            WindowEvent::Resized(physical_size) => {
                self.resize(*physical_size);
                false
            }
            WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                self.resize(**new_inner_size);
                false
            }
            // Let the current state handle other events
            _ => self
                .current_state
                .as_mut()
                .is_some_and(|state| state.handle_event(event)),
        }
    }

    // Handle window resize
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            log::debug!("Resizing surface to {}x{}", new_size.width, new_size.height);
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    // Update the current state
    pub fn update(&mut self, dt: f32) {
        let Some(state) = self.current_state.as_mut() else {
            return;
        };
        state.update(dt);

        let title = state.title();
        if title != self.title {
            self.window.set_title(&title);
            self.title = title;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.current_state.as_ref().is_some_and(|state| state.is_finished())
    }

    // Render the current state
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let Some(state) = self.current_state.as_ref() else {
            return Ok(());
        };

        let frame = self.surface.get_current_texture()?;
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

        self.draws.clear();
        state.render(&mut self.draws);
        self.renderer
            .flush(&self.device, &self.queue, &view, state.clear_color(), &self.draws);

        frame.present();
        Ok(())
    }

    // Switch to a new state
    pub fn change_state(&mut self, new_state: Box<dyn GameState>) {
        self.current_state = Some(new_state);
    }
}

impl TextureLoader for StateManager {
    fn load_texture(&mut self, source: &TextureSource) -> TextureId {
        let rgba = source.decode_or_placeholder();
        let label = source.path.as_deref().unwrap_or("solid");
        self.renderer.add_texture(&self.device, &self.queue, &rgba, label)
    }
}
