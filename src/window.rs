//! Window and GL context setup shared by every lesson.
//!
//! A lesson opens one [`Window`], keeps it for the whole process and drives
//! its loop with [`Window::poll`] and [`Window::swap`].

use failure;
use gl;
use sdl2;
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use std::os::raw::c_void;
use std::time::Instant;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "Failed to initialize SDL: {}", _0)]
    Init(String),
    #[fail(display = "Failed to create window: {}", _0)]
    CreateWindow(String),
    #[fail(display = "Failed to create GL context: {}", _0)]
    CreateContext(String),
    #[fail(display = "Failed to load GL functions")]
    LoadGl,
}

/// Settings for the lesson window. Defaults match the tutorial: an 800x600
/// resizable window on an OpenGL 3.3 core context.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub gl_version: (u8, u8),
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title: "Window".into(),
            width: 800,
            height: 600,
            gl_version: (3, 3),
            resizable: true,
        }
    }
}

impl WindowConfig {
    pub fn new(title: &str) -> WindowConfig {
        WindowConfig {
            title: title.into(),
            ..WindowConfig::default()
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> WindowConfig {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_gl_version(mut self, major: u8, minor: u8) -> WindowConfig {
        self.gl_version = (major, minor);
        self
    }

    pub fn resizable(mut self, resizable: bool) -> WindowConfig {
        self.resizable = resizable;
        self
    }
}

/// What happened since the last [`Window::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame {
    pub should_close: bool,
    pub resized: Option<(i32, i32)>,
}

impl Frame {
    fn apply(&mut self, event: &Event) {
        match *event {
            Event::Quit { .. }
            | Event::KeyDown {
                keycode: Some(Keycode::Escape),
                ..
            } => self.should_close = true,
            Event::Window {
                win_event: WindowEvent::Resized(w, h),
                ..
            }
            | Event::Window {
                win_event: WindowEvent::SizeChanged(w, h),
                ..
            } => self.resized = Some((w, h)),
            _ => {}
        }
    }
}

/// Entry points that must resolve for the loader to count as initialized.
const LOADER_PROBES: [&str; 3] = ["glClear", "glCreateShader", "glGenVertexArrays"];

pub struct Window {
    // field order is drop order: the context must go before the window
    gl: gl::Gl,
    _gl_context: sdl2::video::GLContext,
    window: sdl2::video::Window,
    event_pump: sdl2::EventPump,
    _video: sdl2::VideoSubsystem,
    _sdl: sdl2::Sdl,
    started: Instant,
}

impl Window {
    pub fn open(config: &WindowConfig) -> Result<Window, failure::Error> {
        let sdl = sdl2::init().map_err(Error::Init)?;
        let video = sdl.video().map_err(Error::Init)?;

        {
            let gl_attr = video.gl_attr();
            gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
            gl_attr.set_context_version(config.gl_version.0, config.gl_version.1);
            if cfg!(target_os = "macos") {
                gl_attr.set_context_flags().forward_compatible().set();
            }
        }

        let mut builder = video.window(&config.title, config.width, config.height);
        builder.opengl();
        if config.resizable {
            builder.resizable();
        }
        let window = builder
            .build()
            .map_err(|e| Error::CreateWindow(e.to_string()))?;

        let gl_context = window.gl_create_context().map_err(Error::CreateContext)?;
        window
            .gl_make_current(&gl_context)
            .map_err(Error::CreateContext)?;

        let mut probes_found = 0;
        let gl = gl::Gl::load_with(|s| {
            let ptr = video.gl_get_proc_address(s) as *const c_void;
            if !ptr.is_null() && LOADER_PROBES.contains(&s) {
                probes_found += 1;
            }
            ptr
        });
        if probes_found < LOADER_PROBES.len() {
            return Err(Error::LoadGl.into());
        }

        let event_pump = sdl.event_pump().map_err(Error::Init)?;

        info!(
            "opened \"{}\" {}x{} with OpenGL {}.{} core",
            config.title, config.width, config.height, config.gl_version.0, config.gl_version.1
        );

        Ok(Window {
            gl,
            _gl_context: gl_context,
            window,
            event_pump,
            _video: video,
            _sdl: sdl,
            started: Instant::now(),
        })
    }

    pub fn gl(&self) -> &gl::Gl {
        &self.gl
    }

    /// Current drawable size in pixels.
    pub fn drawable_size(&self) -> (i32, i32) {
        let (w, h) = self.window.drawable_size();
        (w as i32, h as i32)
    }

    /// Drains pending input. ESC and the close button both end the loop.
    pub fn poll(&mut self) -> Frame {
        let mut frame = Frame::default();
        for event in self.event_pump.poll_iter() {
            frame.apply(&event);
        }
        if frame.should_close {
            debug!("close requested");
        }
        if let Some((w, h)) = frame.resized {
            debug!("resized to {}x{}", w, h);
        }
        frame
    }

    pub fn swap(&self) {
        self.window.gl_swap_window();
    }

    /// Seconds since the window was opened.
    pub fn elapsed(&self) -> f32 {
        let elapsed = self.started.elapsed();
        elapsed.as_secs() as f32 + elapsed.subsec_nanos() as f32 * 1e-9
    }
}

/// Oscillates between 0 and 1 with time; drives the uniform color lesson.
pub fn pulse(t: f32) -> f32 {
    (t.sin() + 1.0) * 0.5
}

/// Oscillates between -0.5 and 0.5 with time; drives the shader class lesson.
pub fn sway(t: f32) -> f32 {
    t.sin() * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_800_by_600_gl33() {
        let config = WindowConfig::default();
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.gl_version, (3, 3));
        assert!(config.resizable);
    }

    #[test]
    fn builder_overrides_fields() {
        let config = WindowConfig::new("Triangle")
            .with_size(640, 480)
            .with_gl_version(4, 1)
            .resizable(false);
        assert_eq!(config.title, "Triangle");
        assert_eq!((config.width, config.height), (640, 480));
        assert_eq!(config.gl_version, (4, 1));
        assert!(!config.resizable);
    }

    #[test]
    fn escape_and_quit_close_the_window() {
        let mut frame = Frame::default();
        frame.apply(&Event::KeyDown {
            timestamp: 0,
            window_id: 1,
            keycode: Some(Keycode::Escape),
            scancode: None,
            keymod: sdl2::keyboard::Mod::NOMOD,
            repeat: false,
        });
        assert!(frame.should_close);

        let mut frame = Frame::default();
        frame.apply(&Event::Quit { timestamp: 0 });
        assert!(frame.should_close);
    }

    #[test]
    fn other_keys_keep_running() {
        let mut frame = Frame::default();
        frame.apply(&Event::KeyDown {
            timestamp: 0,
            window_id: 1,
            keycode: Some(Keycode::Space),
            scancode: None,
            keymod: sdl2::keyboard::Mod::NOMOD,
            repeat: false,
        });
        assert_eq!(frame, Frame::default());
    }

    #[test]
    fn resize_is_reported() {
        let mut frame = Frame::default();
        frame.apply(&Event::Window {
            timestamp: 0,
            window_id: 1,
            win_event: WindowEvent::Resized(1024, 768),
        });
        assert_eq!(frame.resized, Some((1024, 768)));
        assert!(!frame.should_close);
    }

    #[test]
    fn pulse_stays_in_unit_range() {
        for i in 0..1000 {
            let g = pulse(i as f32 * 0.01);
            assert!(g >= 0.0 && g <= 1.0, "pulse out of range: {}", g);
        }
        assert!((pulse(0.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn sway_stays_within_half() {
        for i in 0..1000 {
            let d = sway(i as f32 * 0.01);
            assert!(d >= -0.5 && d <= 0.5, "sway out of range: {}", d);
        }
        assert_eq!(sway(0.0), 0.0);
    }
}
