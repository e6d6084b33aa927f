mod cursor;
mod render;
mod sim;
mod sprites;
mod viewport;

use glam::{Vec2, Vec4};
use instant::Instant;
use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

use app_core::{
    FrameEvent, InteractionEvent, NodeId, Scene, Session, SessionConfig, DISPLAY_HEIGHT,
    DISPLAY_WIDTH, TABLE_Y_FRAC,
};

use crate::cursor::{hover_quad, CursorVisual};
use crate::render::{GpuState, Quad, Shape};
use crate::sim::SimulatedHand;
use crate::sprites::SpriteMirror;
use crate::viewport::Letterbox;

const BACKDROP: Vec4 = Vec4::new(0.10, 0.07, 0.14, 1.0);
const TABLE: Vec4 = Vec4::new(0.30, 0.19, 0.12, 1.0);

/// Everything the window drives, minus the GPU.
struct App {
    session: Session,
    mirror: SpriteMirror,
    hand: SimulatedHand,
    cursor: CursorVisual,
    clock: Instant,
    last_frame: Instant,
    title: String,
    quads: Vec<Quad>,
}

impl App {
    fn new(seed: u64) -> anyhow::Result<Self> {
        let scene = Scene::potion_table()?;
        let mut mirror = SpriteMirror::for_scene(&scene);
        let mut session = Session::new(SessionConfig::default(), scene);
        session.sync(&mut mirror);
        let cursor = CursorVisual::new(session.gesture().cursor());
        // the simulated detector needs no warm-up
        session.mark_ready();
        let now = Instant::now();
        Ok(Self {
            session,
            mirror,
            hand: SimulatedHand::new(seed),
            cursor,
            clock: now,
            last_frame: now,
            title: String::new(),
            quads: Vec::new(),
        })
    }

    fn pointer_moved(&mut self, px: Vec2, letterbox: Letterbox) {
        self.hand.move_to(letterbox.to_display(px));
    }

    /// Sample the hand, advance the session one tick and rebuild the sprite
    /// list.
    fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_frame;
        self.last_frame = now;

        let timestamp_ms = (now - self.clock).as_secs_f64() * 1000.0;
        let landmarks = self.hand.sample();
        self.session.on_landmarks(timestamp_ms, landmarks.as_deref());

        for ev in self.session.tick(dt, &mut self.mirror) {
            match ev {
                FrameEvent::Interaction(InteractionEvent::Grabbed(id)) => {
                    log::debug!("[app] grabbed {id:?}")
                }
                FrameEvent::Interaction(InteractionEvent::Released { object, on_target }) => {
                    log::info!("[app] released {object:?} (on target: {on_target})")
                }
                FrameEvent::ReactionFinished(node) => log::info!("[app] {node:?} settled"),
            }
        }

        let gesture = self.session.gesture();
        if gesture.has_hand() {
            self.cursor.follow(gesture.cursor());
        }

        self.quads.clear();
        backdrop(&mut self.quads);
        self.mirror.quads(&mut self.quads);
        if gesture.has_hand() && self.session.interaction().held().is_none() {
            let hovered = self.session.interaction().hovered();
            let bounds = hovered.and_then(|id| self.session.scene().bounds(NodeId::Object(id)));
            if let Some(b) = bounds {
                self.quads.push(hover_quad(b));
            }
        }
        self.cursor
            .quads(gesture.pinching(), gesture.has_hand(), &mut self.quads);
    }

    /// Window title carrying the status line, or `None` if unchanged.
    fn title_update(&mut self) -> Option<&str> {
        let status = self.session.status().message();
        let title = match self.session.notice() {
            Some(notice) => format!("{status} | {notice}"),
            None => status.to_string(),
        };
        if title == self.title {
            return None;
        }
        self.title = title;
        Some(&self.title)
    }
}

fn backdrop(out: &mut Vec<Quad>) {
    let display = Vec2::new(DISPLAY_WIDTH, DISPLAY_HEIGHT);
    out.push(Quad::new(display * 0.5, display, BACKDROP, Shape::Rect));
    let table_y = TABLE_Y_FRAC * DISPLAY_HEIGHT;
    let table = Vec2::new(DISPLAY_WIDTH, DISPLAY_HEIGHT - table_y);
    let center = Vec2::new(DISPLAY_WIDTH * 0.5, table_y + table.y * 0.5);
    out.push(Quad::new(center, table, TABLE, Shape::Rect));
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut app = App::new(rand::random())?;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(app.session.status().message())
        .with_inner_size(LogicalSize::new(DISPLAY_WIDTH * 0.6, DISPLAY_HEIGHT * 0.6))
        .build(&event_loop)?;

    let mut state = pollster::block_on(GpuState::new(&window))?;
    log::info!("[app] mouse = index fingertip, hold left button or Space to pinch, J = jitter");

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => state.resize(size),
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::CursorMoved { position, .. } => {
                let px = Vec2::new(position.x as f32, position.y as f32);
                app.pointer_moved(px, state.letterbox());
            }
            WindowEvent::CursorLeft { .. } => app.hand.leave(),
            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => app.hand.set_button(button_state == ElementState::Pressed),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: key_state,
                        repeat,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Space => app.hand.set_key(key_state == ElementState::Pressed),
                KeyCode::KeyJ if key_state == ElementState::Pressed && !repeat => {
                    let on = app.hand.toggle_jitter();
                    log::info!("[sim] jitter {}", if on { "on" } else { "off" });
                }
                KeyCode::Escape => elwt.exit(),
                _ => {}
            },
            _ => {}
        },
        Event::AboutToWait => {
            app.frame();
            if let Some(title) = app.title_update() {
                state.window.set_title(title);
            }
            match state.render(&app.quads) {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    state.resize(state.window.inner_size())
                }
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(e) => log::warn!("[gpu] {e:?}"),
            }
        }
        _ => {}
    })?;
    Ok(())
}
