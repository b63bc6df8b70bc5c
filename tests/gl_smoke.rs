//! Checks against a real OpenGL 3.3 context. They need a display, so they are
//! ignored by default: `cargo test -- --ignored`.

extern crate gl;
extern crate gl_steps;

use gl_steps::render_gl::buffer::{ArrayBuffer, ElementArrayBuffer, VertexArray};
use gl_steps::render_gl::data::{ColoredVertex, Vertex};
use gl_steps::render_gl::{Error, Program, Shader, ShaderKind};
use gl_steps::resources::Resources;
use gl_steps::window::{Window, WindowConfig};
use std::ffi::CString;
use std::path::PathBuf;

const VALID_VERTEX: &str = "#version 330 core
layout (location = 0) in vec3 aPos;
void main() { gl_Position = vec4(aPos, 1.0); }
";

const INVALID_FRAGMENT: &str = "#version 330 core
out vec4 FragColor;
void main() { FragColor = vec4(1.0, 0.5, 0.2) }
";

const FRAGMENT_WITHOUT_MAIN: &str = "#version 330 core
out vec4 FragColor;
void shade() { FragColor = vec4(1.0); }
";

fn assets() -> Resources {
    Resources::from_path(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets"))
}

// One test function: SDL wants a single video init on one thread.
#[test]
#[ignore]
fn gl_context_smoke() {
    let window = Window::open(&WindowConfig::new("smoke").with_size(320, 240)).unwrap();
    let gl = window.gl().clone();

    let (w, h) = window.drawable_size();
    assert!(w > 0 && h > 0);

    // valid source compiles
    let vertex = Shader::compile(&gl, &CString::new(VALID_VERTEX).unwrap(), ShaderKind::Vertex);
    assert!(vertex.id() > 0);
    assert_eq!(vertex.compile_log(), None);
    assert_eq!(vertex.kind(), ShaderKind::Vertex);

    // invalid source leaves a log and the strict path reports it
    let broken = Shader::compile(
        &gl,
        &CString::new(INVALID_FRAGMENT).unwrap(),
        ShaderKind::Fragment,
    );
    assert!(broken.compile_log().map_or(false, |log| !log.is_empty()));
    assert!(Shader::from_frag_source(&gl, &CString::new(INVALID_FRAGMENT).unwrap()).is_err());

    // a compiled shader without main fails at link time
    let no_main = Shader::compile(
        &gl,
        &CString::new(FRAGMENT_WITHOUT_MAIN).unwrap(),
        ShaderKind::Fragment,
    );
    let unlinked = Program::link(&gl, &[&vertex, &no_main]);
    assert!(unlinked.link_log().is_some());
    assert!(!unlinked.has_uniform("delta"));

    // the shader class program links and exposes its uniform
    let program = Program::from_files(&gl, &assets(), "shaders/shader.vs", "shaders/shader.fs")
        .unwrap();
    assert_eq!(program.link_log(), None);
    assert!(program.has_uniform("delta"));

    program.set_used();
    program.set_float("delta", 0.25).unwrap();
    match program.set_int("delta", 1) {
        Err(Error::UniformTypeMismatch { expected, .. }) => assert_eq!(expected, "int"),
        other => panic!("unexpected result: {:?}", other.err()),
    }
    match program.set_vec4("color", [0.0, 1.0, 0.0, 1.0]) {
        Err(Error::UnknownUniform { name }) => assert_eq!(name, "color"),
        other => panic!("unexpected result: {:?}", other.err()),
    }

    // a full draw leaves no GL error behind
    let vertices = [
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

    unsafe {
        gl.Clear(gl::COLOR_BUFFER_BIT);
        gl.DrawElements(gl::TRIANGLES, 3, gl::UNSIGNED_INT, std::ptr::null());
        assert_eq!(gl.GetError(), gl::NO_ERROR);
    }
    vao.unbind();
    window.swap();
}
