//! Simulation builder and winit application shell.
//!
//! [`Simulation`] configures a field and runs it in a window. The per-frame
//! path is: advance the field one tick, rebuild the instance lists, render,
//! request the next frame. Everything runs on the event-loop thread; the
//! pointer and resize handlers only write shared state that the next tick
//! reads.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::error::RunError;
use crate::field::{FieldConfig, Link, ParticleField, SpawnFn};
use crate::follower::{Follower, SpringParams};
use crate::gpu::{DotInstance, GpuState, LinkInstance};
use crate::input::PointerTracker;
use crate::particle::Particle;
use crate::spawn::SpawnContext;
use crate::time::Time;
use crate::visuals::VisualConfig;

/// Hard ceiling on the link instance buffer, for configs with huge counts.
const LINK_BUFFER_CAP: usize = 100_000;

/// A particle field application builder.
///
/// Use method chaining to configure, then call [`run`](Self::run) to open a
/// window and animate until it is closed.
///
/// ```no_run
/// use dotfield::Simulation;
///
/// fn main() -> Result<(), dotfield::RunError> {
///     Simulation::new()
///         .with_particle_count(50)
///         .with_title("ambient background")
///         .run()
/// }
/// ```
pub struct Simulation {
    config: FieldConfig,
    visuals: VisualConfig,
    spawner: Option<SpawnFn>,
    title: String,
    window_size: (u32, u32),
}

impl Simulation {
    /// Create a simulation with default settings.
    pub fn new() -> Self {
        Self {
            config: FieldConfig::default(),
            visuals: VisualConfig::default(),
            spawner: None,
            title: "dotfield".to_string(),
            window_size: (1280, 720),
        }
    }

    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.config.count = count;
        self
    }

    /// Set the maximum distance at which two particles are linked.
    pub fn with_link_radius(mut self, radius: f32) -> Self {
        self.config.link_radius = radius;
        self
    }

    /// Set the radius of pointer influence.
    pub fn with_pointer_radius(mut self, radius: f32) -> Self {
        self.config.pointer_radius = radius;
        self
    }

    /// Replace the whole field configuration.
    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    /// Adjust the visual configuration.
    pub fn with_visuals(mut self, f: impl FnOnce(&mut VisualConfig)) -> Self {
        f(&mut self.visuals);
        self
    }

    /// Set a custom particle spawner, called once per particle on creation
    /// and again on every resize.
    pub fn with_spawner<F>(mut self, spawner: F) -> Self
    where
        F: Fn(&mut SpawnContext) -> Particle + Send + Sync + 'static,
    {
        self.spawner = Some(Box::new(spawner));
        self
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Run the simulation. Blocks until the window is closed.
    pub fn run(self) -> Result<(), RunError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;
        Ok(())
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    settings: Simulation,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    field: Option<ParticleField>,
    follower: Option<Follower>,
    follower_primed: bool,
    pointer: PointerTracker,
    time: Time,
    dots: Vec<DotInstance>,
    links: Vec<Link>,
    link_instances: Vec<LinkInstance>,
}

impl App {
    fn new(settings: Simulation) -> Self {
        Self {
            settings,
            window: None,
            gpu: None,
            field: None,
            follower: None,
            follower_primed: false,
            pointer: PointerTracker::new(),
            time: Time::new(),
            dots: Vec::new(),
            links: Vec::new(),
            link_instances: Vec::new(),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(gpu), Some(field)) = (self.gpu.as_mut(), self.field.as_mut()) else {
            return;
        };

        let delta = self.time.tick();
        let pointer = self.pointer.position();

        field.step(pointer);

        if let (Some(follower), Some(target)) = (self.follower.as_mut(), pointer) {
            if self.follower_primed {
                // Large deltas after a stall would destabilize the spring.
                follower.step(target, delta.min(0.1));
            } else {
                follower.snap_to(target);
                self.follower_primed = true;
            }
        }

        self.dots.clear();
        self.dots.extend(field.particles().iter().map(|p| DotInstance {
            position: p.position.to_array(),
            radius: p.radius,
            glow: p.glow,
        }));
        if let Some(follower) = self.follower.as_ref().filter(|_| self.follower_primed) {
            self.dots.push(DotInstance {
                position: follower.position().to_array(),
                radius: self.settings.visuals.follower_radius / 6.0,
                glow: 0.6,
            });
        }

        field.collect_links(&mut self.links);
        self.link_instances.clear();
        self.link_instances.extend(self.links.iter().map(|l| LinkInstance {
            a: l.a.to_array(),
            b: l.b.to_array(),
            opacity: l.opacity,
            _pad: [0.0; 3],
        }));

        match gpu.render(&self.dots, &self.link_instances) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.resize(winit::dpi::PhysicalSize {
                    width: gpu.config.width,
                    height: gpu.config.height,
                });
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, shutting down");
                event_loop.exit();
                return;
            }
            Err(e) => log::warn!("render error: {e:?}"),
        }

        if self.time.frame() % 600 == 0 {
            log::debug!("fps {:.1}", self.time.fps());
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (width, height) = self.settings.window_size;
        let window_attrs = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(width, height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::warn!("window creation failed, field stays dormant: {err}");
                return;
            }
        };
        self.window = Some(window.clone());

        // The field exists only once the surface is sized and usable; on GPU
        // failure nothing is spawned and no frames are scheduled.
        let size = window.inner_size();
        let field = match self.settings.spawner.take() {
            Some(spawner) => ParticleField::with_spawner(
                self.settings.config.clone(),
                size.width as f32,
                size.height as f32,
                spawner,
            ),
            None => ParticleField::new(
                self.settings.config.clone(),
                size.width as f32,
                size.height as f32,
            ),
        };

        let max_dots = field.len() as u32 + 1;
        let max_links = field.max_links().min(LINK_BUFFER_CAP) as u32;
        match pollster::block_on(GpuState::new(
            window,
            &self.settings.visuals,
            max_dots,
            max_links,
        )) {
            Ok(gpu) => {
                log::info!(
                    "field up: {} particles on a {}x{} surface",
                    field.len(),
                    size.width,
                    size.height
                );
                if self.settings.visuals.follower_enabled {
                    self.follower = Some(Follower::new(
                        glam::Vec2::new(size.width as f32 * 0.5, size.height as f32 * 0.5),
                        SpringParams::default(),
                    ));
                }
                self.gpu = Some(gpu);
                self.field = Some(field);
            }
            Err(err) => {
                log::warn!("GPU unavailable, dot field disabled: {err}");
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.pointer.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
                if let Some(field) = &mut self.field {
                    field.resize(physical_size.width as f32, physical_size.height as f32);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Release the GPU state before the window so nothing can draw to a
        // dead surface; after this no frame callbacks run.
        self.gpu = None;
        self.field = None;
        self.follower = None;
        self.window = None;
        log::debug!("field torn down");
    }
}
