//! Open a window, keep the viewport in sync with its size, clear it every
//! frame and close on ESC.

extern crate failure;
extern crate gl_steps;

use gl_steps::debug::failure_to_string;
use gl_steps::logging::{init_logging, LoggingConfig};
use gl_steps::render_gl::{ColorBuffer, Viewport};
use gl_steps::window::{Window, WindowConfig};

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(e) = run() {
        println!("{}", failure_to_string(e));
        std::process::exit(1);
    }
}

fn run() -> Result<(), failure::Error> {
    let mut window = Window::open(&WindowConfig::new("Window"))?;
    let gl = window.gl().clone();

    let (w, h) = window.drawable_size();
    let mut viewport = Viewport::for_window(w, h);
    viewport.set_used(&gl);

    let color_buffer = ColorBuffer::default();
    color_buffer.set_used(&gl);

    loop {
        let frame = window.poll();
        if frame.should_close {
            break;
        }
        if let Some((w, h)) = frame.resized {
            viewport.update_size(w, h);
            viewport.set_used(&gl);
        }

        color_buffer.clear(&gl);

        window.swap();
    }

    Ok(())
}
