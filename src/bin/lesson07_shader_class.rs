//! Load the shader pair from `assets/shaders`, next to the executable, and
//! set a uniform by name through the program wrapper.

extern crate failure;
extern crate gl;
extern crate gl_steps;

use gl_steps::debug::failure_to_string;
use gl_steps::logging::{init_logging, LoggingConfig};
use gl_steps::render_gl::buffer::{ArrayBuffer, ElementArrayBuffer, VertexArray};
use gl_steps::render_gl::data::{ColoredVertex, Vertex};
use gl_steps::render_gl::{ColorBuffer, Program, Viewport};
use gl_steps::resources::Resources;
use gl_steps::window::{sway, Window, WindowConfig};
use std::path::Path;

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(e) = run() {
        println!("{}", failure_to_string(e));
        std::process::exit(1);
    }
}

fn run() -> Result<(), failure::Error> {
    let res = Resources::from_relative_exe_path(Path::new("assets"))?;

    let mut window = Window::open(&WindowConfig::new("Shader Class"))?;
    let gl = window.gl().clone();

    let (w, h) = window.drawable_size();
    let mut viewport = Viewport::for_window(w, h);
    viewport.set_used(&gl);

    let shader_program = Program::from_files(&gl, &res, "shaders/shader.vs", "shaders/shader.fs")?;

    let vertices = [
        // position           // color
        ColoredVertex::new((-0.5, -0.5, 0.0), (1.0, 0.0, 0.0)),
        ColoredVertex::new((0.5, -0.5, 0.0), (0.0, 1.0, 0.0)),
        ColoredVertex::new((0.0, 0.5, 0.0), (0.0, 0.0, 1.0)),
    ];
    let indices: [u32; 3] = [0, 1, 2];

    let vbo = ArrayBuffer::new(&gl);
    let ebo = ElementArrayBuffer::new(&gl);
    let vao = VertexArray::new(&gl);

    vao.bind();
    vbo.bind();
    vbo.static_draw_data(&vertices);
    ebo.bind();
    ebo.static_draw_data(&indices);
    ColoredVertex::vertex_attrib_pointers(&gl);
    vbo.unbind();
    vao.unbind();

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

        shader_program.set_used();
        shader_program.set_float("delta", sway(window.elapsed()))?;

        vao.bind();
        unsafe {
            gl.DrawElements(
                gl::TRIANGLES,
                indices.len() as gl::types::GLsizei,
                gl::UNSIGNED_INT,
                std::ptr::null(),
            );
        }

        window.swap();
    }

    Ok(())
}
