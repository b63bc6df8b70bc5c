//! Record the buffer binding and attribute layout in a vertex array object
//! and draw the triangle with it.

extern crate failure;
extern crate gl;
extern crate gl_steps;

use gl_steps::debug::failure_to_string;
use gl_steps::logging::{init_logging, LoggingConfig};
use gl_steps::render_gl::buffer::{ArrayBuffer, VertexArray};
use gl_steps::render_gl::data::{PositionVertex, Vertex};
use gl_steps::render_gl::{ColorBuffer, Program, Shader, ShaderKind, Viewport};
use gl_steps::window::{Window, WindowConfig};
use std::ffi::CString;

const VERTEX_SHADER: &str = "#version 330 core
layout (location = 0) in vec3 aPos;

void main()
{
  gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0f);
}
";

const FRAGMENT_SHADER: &str = "#version 330 core
out vec4 FragColor;

void main()
{
  FragColor = vec4(1.0f, 0.5f, 0.2f, 1.0f);
}
";

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(e) = run() {
        println!("{}", failure_to_string(e));
        std::process::exit(1);
    }
}

fn run() -> Result<(), failure::Error> {
    let mut window = Window::open(&WindowConfig::new("VAO"))?;
    let gl = window.gl().clone();

    let (w, h) = window.drawable_size();
    let mut viewport = Viewport::for_window(w, h);
    viewport.set_used(&gl);

    let vertex_shader =
        Shader::compile_reporting(&gl, &CString::new(VERTEX_SHADER)?, ShaderKind::Vertex);
    let fragment_shader =
        Shader::compile_reporting(&gl, &CString::new(FRAGMENT_SHADER)?, ShaderKind::Fragment);
    let shader_program = Program::link_reporting(&gl, &[&vertex_shader, &fragment_shader]);
    drop(vertex_shader);
    drop(fragment_shader);

    let vertices = [
        PositionVertex::new(0.0, 0.5, 0.0),
        PositionVertex::new(-0.5, -0.5, 0.0),
        PositionVertex::new(0.5, -0.5, 0.0),
    ];

    let vbo = ArrayBuffer::new(&gl);
    let vao = VertexArray::new(&gl);

    vao.bind();
    vbo.bind();
    vbo.static_draw_data(&vertices);
    PositionVertex::vertex_attrib_pointers(&gl);
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
        vao.bind();
        unsafe {
            gl.DrawArrays(gl::TRIANGLES, 0, vertices.len() as gl::types::GLsizei);
        }

        window.swap();
    }

    Ok(())
}
