use std::sync::Arc;

use glam::Vec2;
use instant::Instant;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::cat::{Cat, CAT_SIZE};
use crate::daynight::DayNightState;
use crate::particles::ZzzParticles;
use crate::render::instance::{frames, pack_rgba, SpriteInstance};
use crate::render::sky_pipeline::SkyUniform;
use crate::render::GpuState;
use crate::sky::Sky;
use crate::ui::UiOverlay;

/// Initial window size (logical pixels).
const WINDOW_WIDTH: f64 = 1280.0;
const WINDOW_HEIGHT: f64 = 800.0;
/// How often to log FPS (seconds).
const FPS_LOG_INTERVAL: f64 = 5.0;
/// Ground strip height in pixels.
const SURFACE_HEIGHT: f32 = 96.0;
/// Orange coat, straight alpha.
const CAT_COLOR: u32 = pack_rgba(253, 186, 116, 255);

// ---------------------------------------------------------------------------
// Frame timing
// ---------------------------------------------------------------------------

struct FrameStats {
    frame_count: u64,
    last_log_time: Instant,
    frame_time_sum: f64,
    frame_time_min: f64,
    frame_time_max: f64,
    frames_since_log: u32,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            frame_count: 0,
            last_log_time: Instant::now(),
            frame_time_sum: 0.0,
            frame_time_min: f64::MAX,
            frame_time_max: 0.0,
            frames_since_log: 0,
        }
    }

    fn record_frame(&mut self, dt: f64) {
        self.frame_count += 1;
        self.frames_since_log += 1;
        self.frame_time_sum += dt;
        self.frame_time_min = self.frame_time_min.min(dt);
        self.frame_time_max = self.frame_time_max.max(dt);

        let elapsed = self.last_log_time.elapsed().as_secs_f64();
        if elapsed >= FPS_LOG_INTERVAL {
            let avg_ms = (self.frame_time_sum / self.frames_since_log as f64) * 1000.0;
            let fps = self.frames_since_log as f64 / elapsed;
            log::info!(
                "FPS: {:.0} | avg: {:.2}ms | min: {:.2}ms | max: {:.2}ms | total frames: {}",
                fps,
                avg_ms,
                self.frame_time_min * 1000.0,
                self.frame_time_max * 1000.0,
                self.frame_count,
            );
            self.last_log_time = Instant::now();
            self.frame_time_sum = 0.0;
            self.frame_time_min = f64::MAX;
            self.frame_time_max = 0.0;
            self.frames_since_log = 0;
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Top-level application state.
struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    ui: Option<UiOverlay>,

    // Scene
    cat: Option<Cat>,
    sky: Option<Sky>,
    daynight: DayNightState,
    zzz: ZzzParticles,

    // RNG (shared, deterministic per session)
    rng: fastrand::Rng,

    // Input
    cursor: Vec2,
    /// Touch id currently driving the drag, so a second finger can't steal it.
    active_touch: Option<u64>,

    // Frame timing
    last_frame_time: Option<Instant>,
    frame_stats: FrameStats,

    // Screen dimensions
    screen_w: u32,
    screen_h: u32,

    // Reusable instance buffer (avoid per-frame allocation)
    instance_buf: Vec<SpriteInstance>,
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            gpu: None,
            ui: None,
            cat: None,
            sky: None,
            daynight: DayNightState::new(),
            zzz: ZzzParticles::new(),
            rng: fastrand::Rng::new(),
            cursor: Vec2::ZERO,
            active_touch: None,
            last_frame_time: None,
            frame_stats: FrameStats::new(),
            screen_w: 0,
            screen_h: 0,
            instance_buf: Vec::with_capacity(512),
        }
    }

    fn viewport(&self) -> Vec2 {
        Vec2::new(self.screen_w as f32, self.screen_h as f32)
    }

    /// A press from mouse or touch. Routed to the cat unless egui claims it.
    fn handle_press(&mut self, pointer: Vec2) -> bool {
        if let Some(ui) = &self.ui {
            if ui.wants_pointer() {
                return false;
            }
        }
        match &mut self.cat {
            Some(cat) => cat.pointer_down(pointer, Instant::now()),
            None => false,
        }
    }

    /// Advance simulation state and rebuild the sprite buffer.
    fn simulate(&mut self, dt: f32, now: Instant) {
        self.daynight.update();

        if let Some(sky) = &mut self.sky {
            sky.update(dt);
        }

        let viewport = self.viewport();
        let Some(cat) = &mut self.cat else {
            return;
        };
        cat.update(now);

        // Zzz glyphs rise from above the cat's head.
        let anchor = cat.origin() + Vec2::new(CAT_SIZE.x - 20.0, -10.0);
        self.zzz.spawn(anchor, cat.zzz_visible(), &mut self.rng, dt);
        self.zzz.update(dt);

        // --- Rebuild sprite buffer: background first, cat and Zzz on top ---
        self.instance_buf.clear();
        if let Some(sky) = &self.sky {
            sky.build_instances(&self.daynight, viewport, &mut self.instance_buf);
        }

        let frame = if cat.is_sleeping() {
            frames::CAT_SLEEPING
        } else {
            frames::CAT_AWAKE
        };
        self.instance_buf.push(SpriteInstance {
            position: cat.center().into(),
            half_size: [CAT_SIZE.x * 0.5, CAT_SIZE.y * 0.5 * cat.breathe_scale(now)],
            color: CAT_COLOR,
            frame,
            rotation: 0.0,
        });

        self.zzz.build_instances(&mut self.instance_buf);
    }

    fn sky_uniform(&self) -> SkyUniform {
        let d = &self.daynight;
        let surface_frac = if self.screen_h > 0 {
            (SURFACE_HEIGHT / self.screen_h as f32).min(1.0)
        } else {
            0.0
        };
        SkyUniform {
            top_color: [d.sky_top[0], d.sky_top[1], d.sky_top[2], 1.0],
            bottom_color: [d.sky_bottom[0], d.sky_bottom[1], d.sky_bottom[2], 1.0],
            surface_color: [d.surface[0], d.surface[1], d.surface[2], 1.0],
            params: [surface_frac, 0.0, 0.0, 0.0],
        }
    }

    /// Render one frame: sky pass, sprite pass, egui pass.
    fn redraw(&mut self) {
        let now = Instant::now();
        if let Some(last) = self.last_frame_time {
            let dt = now.duration_since(last).as_secs_f64();
            self.frame_stats.record_frame(dt);
            self.simulate(dt as f32, now);
        }
        self.last_frame_time = Some(now);

        let sky_uniform = self.sky_uniform();

        let (Some(window), Some(gpu), Some(ui)) =
            (self.window.clone(), &mut self.gpu, &mut self.ui)
        else {
            return;
        };

        gpu.update_instances(&self.instance_buf);
        gpu.update_sky(&sky_uniform);

        let (primitives, textures_delta, screen_descriptor) =
            ui.run_frame(&window, self.screen_w, self.screen_h);

        let Some(mut frame) = gpu.begin_frame() else {
            return;
        };

        let extra_cmd_bufs = ui.prepare_egui(
            &gpu.device,
            &gpu.queue,
            &mut frame.encoder,
            &primitives,
            &textures_delta,
            &screen_descriptor,
        );

        gpu.draw_sky(&mut frame.encoder, &frame.view);
        gpu.draw_sprites(&mut frame.encoder, &frame.view);
        {
            let mut pass = GpuState::begin_egui_pass(&mut frame.encoder, &frame.view);
            ui.render_egui(&mut pass, &primitives, &screen_descriptor);
        }

        gpu.finish_frame(frame.encoder, frame.output, extra_cmd_bufs);
        ui.free_textures(&textures_delta);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title("sleepycat")
            .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .expect("failed to create window"),
        );

        let size = window.inner_size();
        self.screen_w = size.width;
        self.screen_h = size.height;

        log::info!("Window created: {}x{}", size.width, size.height);

        let gpu = GpuState::new(window.clone());
        let ui = UiOverlay::new(&window, &gpu);
        self.gpu = Some(gpu);
        self.ui = Some(ui);
        log::info!("wgpu + sprite pipeline initialized");

        let viewport = Vec2::new(size.width as f32, size.height as f32);
        self.cat = Some(Cat::new(viewport));
        self.sky = Some(Sky::new(viewport));
        log::info!(
            "Scene ready: {} stars, hour {:.1}",
            self.sky.as_ref().map_or(0, Sky::star_count),
            self.daynight.hour,
        );

        event_loop.set_control_flow(ControlFlow::Poll);
        self.window = Some(window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // egui gets first look at every event (panel clicks, hover).
        if let (Some(ui), Some(window)) = (&mut self.ui, &self.window) {
            let window = window.clone();
            ui.on_window_event(&window, &event);
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                }
                self.screen_w = new_size.width;
                self.screen_h = new_size.height;

                let viewport = self.viewport();
                if let Some(cat) = &mut self.cat {
                    cat.clamp_to(viewport);
                }
                if let Some(sky) = &mut self.sky {
                    sky.regenerate(viewport);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                let viewport = self.viewport();
                if let Some(cat) = &mut self.cat {
                    cat.pointer_move(self.cursor, viewport);
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => {
                    let pointer = self.cursor;
                    self.handle_press(pointer);
                }
                ElementState::Released => {
                    if let Some(cat) = &mut self.cat {
                        cat.pointer_up();
                    }
                }
            },
            WindowEvent::Touch(touch) => {
                let pointer = Vec2::new(touch.location.x as f32, touch.location.y as f32);
                match touch.phase {
                    TouchPhase::Started => {
                        if self.active_touch.is_none() && self.handle_press(pointer) {
                            self.active_touch = Some(touch.id);
                        }
                    }
                    TouchPhase::Moved => {
                        if self.active_touch == Some(touch.id) {
                            let viewport = self.viewport();
                            if let Some(cat) = &mut self.cat {
                                cat.pointer_move(pointer, viewport);
                            }
                        }
                    }
                    TouchPhase::Ended | TouchPhase::Cancelled => {
                        if self.active_touch == Some(touch.id) {
                            self.active_touch = None;
                            if let Some(cat) = &mut self.cat {
                                cat.pointer_up();
                            }
                        }
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }
}

/// Entry point — create event loop and run.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new();
    event_loop.run_app(&mut app)?;
    Ok(())
}
