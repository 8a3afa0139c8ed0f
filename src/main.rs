use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::Instant;

use anyhow::{Result, anyhow};
use log::{debug, info};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use maze_caster::camera::Camera;
use maze_caster::config::Config;
use maze_caster::input::{Action, Controls, RunState, classify};
use maze_caster::player::Player;
use maze_caster::renderer;
use maze_caster::scaler::{ScaleLut, blit_nearest_stretch, build_scale_lut};
use maze_caster::world::World;

struct App {
    config: Config,
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    world: World,
    player: Player,
    camera: Camera,
    controls: Controls,
    state: RunState,
    // Set when the window or surface could not be created; returned from main.
    error: Option<anyhow::Error>,

    // Fixed-size internal framebuffer, stretched onto the surface
    fb: Vec<u32>,
    scale_lut: ScaleLut,

    next_frame: Instant,

    // HUD
    frame_counter: u32,
    last_fps_print: Instant,
}

impl App {
    fn new(config: Config) -> Self {
        let fb = vec![0; config.screen_width * config.screen_height];
        Self {
            window: None,
            surface: None,
            world: World::default(),
            player: Player::new(config.start),
            camera: Camera::new(config.fov),
            controls: Controls::default(),
            state: RunState::Running,
            error: None,
            fb,
            scale_lut: ScaleLut::empty(),
            next_frame: Instant::now(),
            frame_counter: 0,
            last_fps_print: Instant::now(),
            config,
        }
    }

    fn quit(&mut self, event_loop: &ActiveEventLoop, reason: &'static str) {
        if self.state == RunState::Running {
            info!("quitting: {reason}");
        }
        self.state = self.state.after(&Action::Quit(reason));
        event_loop.exit();
    }

    // Reported once, by main's error return.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.error = Some(err);
        self.quit(event_loop, "fatal error");
    }

    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let size = LogicalSize::new(
            self.config.screen_width as f64,
            self.config.screen_height as f64,
        );
        let mut attributes = Window::default_attributes()
            .with_title(self.config.title)
            .with_inner_size(size)
            .with_resizable(false);
        if let Some(position) = centered_position(event_loop, size) {
            attributes = attributes.with_position(position);
        }

        let window = Rc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| anyhow!("could not create window: {e}"))?,
        );
        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| anyhow!("could not create graphics context: {e}"))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| anyhow!("could not create window surface: {e}"))?;

        let inner = window.inner_size();
        info!(
            "opened {}x{} window ({}x{} physical)",
            self.config.screen_width, self.config.screen_height, inner.width, inner.height
        );

        self.surface = Some(surface);
        self.window = Some(window);
        Ok(())
    }

    /// Movement for one frame, from the keys held right now.
    fn tick(&mut self) {
        let controls = &self.controls;
        self.player
            .apply_moves(&self.world, |dir| controls.is_held(dir), self.config.tile_size);
    }

    fn draw(&mut self, id: WindowId) -> Result<()> {
        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return Ok(()),
        };

        let size = window.inner_size();
        let (Some(dw), Some(dh)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(()); // Minimized window, skip drawing
        };
        surface
            .resize(dw, dh)
            .map_err(|e| anyhow!("could not resize surface: {e}"))?;

        let (dw, dh) = (dw.get() as usize, dh.get() as usize);
        if self.scale_lut.dst_size() != (dw, dh) {
            self.scale_lut = build_scale_lut(
                dw,
                dh,
                self.config.screen_width,
                self.config.screen_height,
            );
        }

        renderer::render_frame(
            &mut self.fb,
            self.config.screen_width,
            self.config.screen_height,
            &self.world,
            &self.player,
            &self.camera,
            self.config.tile_size,
        );

        let mut buf = surface
            .buffer_mut()
            .map_err(|e| anyhow!("could not map surface buffer: {e}"))?;
        blit_nearest_stretch(
            &mut buf,
            dw,
            &self.fb,
            self.config.screen_width,
            &self.scale_lut,
        );
        buf.present()
            .map_err(|e| anyhow!("could not present frame: {e}"))?;

        self.count_frame();
        Ok(())
    }

    fn count_frame(&mut self) {
        self.frame_counter += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_print).as_secs_f32();
        if elapsed >= 1.0 {
            debug!("FPS: {:.1}", self.frame_counter as f32 / elapsed);
            self.frame_counter = 0;
            self.last_fps_print = now;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.open_window(event_loop) {
            self.fail(event_loop, err);
            return;
        }
        self.next_frame = Instant::now();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if let WindowEvent::RedrawRequested = event {
            if self.state == RunState::Done {
                return;
            }
            if let Err(err) = self.draw(id) {
                self.fail(event_loop, err);
            }
            return;
        }

        let action = classify(&event);
        match action {
            Action::Quit(reason) => self.quit(event_loop, reason),
            _ => self.controls.apply(&action),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.state == RunState::Done {
            return;
        }

        // All queued events have been handled; step and redraw once per frame interval.
        let now = Instant::now();
        if now >= self.next_frame {
            self.next_frame = now + self.config.frame_interval();
            self.tick();
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}

/// Top-left corner that centers a window of `size` on the primary monitor.
fn centered_position(
    event_loop: &ActiveEventLoop,
    size: LogicalSize<f64>,
) -> Option<PhysicalPosition<i32>> {
    let monitor = event_loop
        .primary_monitor()
        .or_else(|| event_loop.available_monitors().next())?;
    let window = size.to_physical::<i32>(monitor.scale_factor());
    let screen = monitor.size();
    let origin = monitor.position();
    Some(PhysicalPosition::new(
        origin.x + (screen.width as i32 - window.width) / 2,
        origin.y + (screen.height as i32 - window.height) / 2,
    ))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::default();
    info!(
        "starting {:?}: {}x{} at {} fps, tile {} px",
        config.title, config.screen_width, config.screen_height, config.fps, config.tile_size
    );

    let event_loop = EventLoop::new().map_err(|e| anyhow!("could not start event loop: {e}"))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop
        .run_app(&mut app)
        .map_err(|e| anyhow!("event loop failed: {e}"))?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
