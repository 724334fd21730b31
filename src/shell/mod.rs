//! The window shell: a GLFW window displaying a fixed logical RGB pixel
//! buffer at 60 fps, with per-frame keyboard state.
//!
//! Front-ends hand [`Shell::run`] a frame callback and draw by writing
//! RGB triplets into the buffer; the shell owns event polling, frame
//! pacing, and the GL upload.

use std::collections::HashMap;
use std::{thread, time};

use glfw::Context as _;
use thiserror::Error;
use tracing::debug;

mod gl;
mod keys;

use gl::Gl;
pub use keys::Key;

const FRAME_NANOS: u128 = 1_000_000_000 / 60;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("failed to initialize GLFW: {0}")]
    Init(#[from] glfw::InitError),
    #[error("failed to create a window")]
    CreateWindow,
}

#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
enum PressedState {
    JustPressed,
    Pressed,
    JustReleased,
}

pub struct Shell {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,

    gl: Gl,

    width: u32,
    height: u32,
}

impl Shell {
    /// Opens a window for a `width` x `height` logical pixel buffer. The
    /// window itself is sized to fit the primary monitor with some
    /// margin; the buffer is scaled into it with letterboxing.
    pub fn new(width: u32, height: u32, title: &str) -> Result<Self, ShellError> {
        let mut glfw = glfw::init(|error, description| {
            glfw::fail_on_errors(error, description);
        })?;

        glfw.window_hint(glfw::WindowHint::ContextVersionMajor(3));
        glfw.window_hint(glfw::WindowHint::ContextVersionMinor(3));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(
            glfw::OpenGlProfileHint::Core,
        ));

        let window = glfw.with_primary_monitor(|glfw, monitor| {
            let monitor_size = monitor
                .and_then(|monitor| monitor.get_video_mode())
                .map_or((960, 720), |mode| (mode.width, mode.height));

            let (window_width, window_height) =
                fit_to_monitor(width, height, monitor_size.0, monitor_size.1);

            glfw.create_window(
                window_width,
                window_height,
                title,
                glfw::WindowMode::Windowed,
            )
        });
        let (mut window, events) = window.ok_or(ShellError::CreateWindow)?;

        window.set_key_polling(true);
        window.set_close_polling(true);
        window.set_size_polling(true);
        window.make_current();

        let mut gl = Gl::new(width, height, |s| window.get_proc_address(s) as _);
        let window_size = window.get_size();
        gl.set_viewport(window_size.0 as u32, window_size.1 as u32);

        glfw.set_swap_interval(glfw::SwapInterval::Sync(1));

        debug!(width, height, "shell window up");

        Ok(Self {
            glfw,
            window,
            events,

            gl,

            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Runs the frame loop until the callback calls [`Context::exit`] or
    /// the window is closed. The callback fires at a fixed 60 fps and
    /// draws into the RGB pixel buffer it is handed.
    pub fn run<F>(&mut self, mut handle_frame: F)
    where
        F: FnMut(&mut Context, &mut [u8]),
    {
        let mut pixels = vec![0u8; (self.width * self.height) as usize * 3];
        let mut key_states: HashMap<Key, PressedState> = HashMap::new();
        let mut current_frame: u64 = 0;
        let mut will_exit = false;

        let start = time::Instant::now();
        let mut next_frame_time = start.elapsed().as_nanos() + FRAME_NANOS;

        loop {
            self.glfw.poll_events();

            for (_, event) in glfw::flush_messages(&self.events) {
                match event {
                    glfw::WindowEvent::Key(key, _, action, _) => {
                        let Some(key) = Key::from_glfw(key) else {
                            continue;
                        };
                        let state = match action {
                            // repeats re-trigger, matching held-key scrolling
                            glfw::Action::Press | glfw::Action::Repeat => {
                                PressedState::JustPressed
                            }
                            glfw::Action::Release => PressedState::JustReleased,
                        };
                        key_states.insert(key, state);
                    }
                    glfw::WindowEvent::Size(window_width, window_height) => {
                        self.gl
                            .set_viewport(window_width as u32, window_height as u32);
                    }
                    glfw::WindowEvent::Close => will_exit = true,
                    _ => {}
                }
            }

            let cur_time = start.elapsed().as_nanos();
            while cur_time >= next_frame_time {
                next_frame_time += FRAME_NANOS;

                let mut ctx = Context {
                    width: self.width,
                    height: self.height,
                    current_frame,
                    key_states: &key_states,
                    will_exit,
                };
                handle_frame(&mut ctx, &mut pixels);
                will_exit = ctx.will_exit;
                current_frame += 1;

                // just-pressed/released states last exactly one frame
                key_states.retain(|_, state| *state != PressedState::JustReleased);
                for state in key_states.values_mut() {
                    if *state == PressedState::JustPressed {
                        *state = PressedState::Pressed;
                    }
                }
            }

            if will_exit {
                return;
            }

            self.gl.draw(&pixels);
            self.window.swap_buffers();

            let cur_time = start.elapsed().as_nanos();
            if cur_time < next_frame_time {
                thread::sleep(time::Duration::from_nanos(
                    (next_frame_time - cur_time) as u64,
                ));
            }
        }
    }
}

impl Drop for Shell {
    fn drop(&mut self) {
        self.gl.deinit();
    }
}

/// Window size that fits the logical dimensions into the monitor with a
/// margin, preserving aspect ratio.
fn fit_to_monitor(
    width: u32,
    height: u32,
    monitor_width: u32,
    monitor_height: u32,
) -> (u32, u32) {
    let margin = 0.2 * f32::min(monitor_width as f32, monitor_height as f32);
    let fit_scale = f32::min(
        (monitor_width as f32 - margin) / width as f32,
        (monitor_height as f32 - margin) / height as f32,
    )
    .max(1.0);
    (
        (width as f32 * fit_scale) as u32,
        (height as f32 * fit_scale) as u32,
    )
}

/// Per-frame view of the shell handed to the frame callback.
pub struct Context<'a> {
    width: u32,
    height: u32,
    current_frame: u64,

    key_states: &'a HashMap<Key, PressedState>,

    will_exit: bool,
}

impl<'a> Context<'a> {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn current_frame(&self) -> u64 {
        self.current_frame
    }

    #[inline]
    pub fn exit(&mut self) {
        self.will_exit = true;
    }

    #[inline]
    pub fn will_exit(&self) -> bool {
        self.will_exit
    }

    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.key_states
            .get(&key)
            .map_or(false, |state| *state != PressedState::JustReleased)
    }

    pub fn is_key_just_pressed(&self, key: Key) -> bool {
        self.key_states
            .get(&key)
            .map_or(false, |state| *state == PressedState::JustPressed)
    }

    pub fn is_key_just_released(&self, key: Key) -> bool {
        self.key_states
            .get(&key)
            .map_or(false, |state| *state == PressedState::JustReleased)
    }
}
