//! Two shapes, two programs: an orange triangle drawn from a plain vertex
//! buffer and a green rectangle whose four corners are reused through an
//! element buffer.

extern crate failure;
extern crate gl;
extern crate gl_steps;

use gl_steps::debug::failure_to_string;
use gl_steps::logging::{init_logging, LoggingConfig};
use gl_steps::render_gl::buffer::{ArrayBuffer, ElementArrayBuffer, VertexArray};
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

const ORANGE_FRAGMENT_SHADER: &str = "#version 330 core
out vec4 FragColor;

void main()
{
  FragColor = vec4(1.0f, 0.5f, 0.2f, 1.0f);
}
";

const GREEN_FRAGMENT_SHADER: &str = "#version 330 core
out vec4 FragColor;

void main()
{
  FragColor = vec4(0.5f, 1.0f, 0.2f, 1.0f);
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
    let mut window = Window::open(&WindowConfig::new("EBO"))?;
    let gl = window.gl().clone();

    let (w, h) = window.drawable_size();
    let mut viewport = Viewport::for_window(w, h);
    viewport.set_used(&gl);

    let vertex_shader =
        Shader::compile_reporting(&gl, &CString::new(VERTEX_SHADER)?, ShaderKind::Vertex);
    let orange_fragment_shader = Shader::compile_reporting(
        &gl,
        &CString::new(ORANGE_FRAGMENT_SHADER)?,
        ShaderKind::Fragment,
    );
    let green_fragment_shader = Shader::compile_reporting(
        &gl,
        &CString::new(GREEN_FRAGMENT_SHADER)?,
        ShaderKind::Fragment,
    );
    let orange_program = Program::link_reporting(&gl, &[&vertex_shader, &orange_fragment_shader]);
    let green_program = Program::link_reporting(&gl, &[&vertex_shader, &green_fragment_shader]);
    drop(vertex_shader);
    drop(orange_fragment_shader);
    drop(green_fragment_shader);

    let triangle_vertices = [
        PositionVertex::new(-0.5, 0.75, 0.0),
        PositionVertex::new(-0.9, -0.75, 0.0),
        PositionVertex::new(-0.1, -0.75, 0.0),
    ];

    let triangle_vbo = ArrayBuffer::new(&gl);
    let triangle_vao = VertexArray::new(&gl);

    triangle_vao.bind();
    triangle_vbo.bind();
    triangle_vbo.static_draw_data(&triangle_vertices);
    PositionVertex::vertex_attrib_pointers(&gl);
    triangle_vbo.unbind();
    triangle_vao.unbind();

    let square_vertices = [
        PositionVertex::new(0.1, -0.4, 0.0),
        PositionVertex::new(0.1, 0.4, 0.0),
        PositionVertex::new(0.9, -0.4, 0.0),
        PositionVertex::new(0.9, 0.4, 0.0),
    ];
    let square_indices: [u32; 6] = [
        0, 1, 2, // first triangle
        1, 2, 3, // second triangle
    ];

    let square_vbo = ArrayBuffer::new(&gl);
    let square_ebo = ElementArrayBuffer::new(&gl);
    let square_vao = VertexArray::new(&gl);

    square_vao.bind();
    square_vbo.bind();
    square_vbo.static_draw_data(&square_vertices);
    // the element buffer binding is recorded in the bound VAO
    square_ebo.bind();
    square_ebo.static_draw_data(&square_indices);
    PositionVertex::vertex_attrib_pointers(&gl);
    square_vbo.unbind();
    square_vao.unbind();

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

        orange_program.set_used();
        triangle_vao.bind();
        unsafe {
            gl.DrawArrays(gl::TRIANGLES, 0, triangle_vertices.len() as gl::types::GLsizei);
        }

        green_program.set_used();
        square_vao.bind();
        unsafe {
            gl.DrawElements(
                gl::TRIANGLES,
                square_indices.len() as gl::types::GLsizei,
                gl::UNSIGNED_INT,
                std::ptr::null(),
            );
        }

        window.swap();
    }

    Ok(())
}
