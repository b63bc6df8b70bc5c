extern crate gl;
extern crate gl_steps;

use gl_steps::render_gl::{Error, Program, Shader};
use gl_steps::resources::Resources;
use std::path::PathBuf;

fn assets() -> Resources {
    Resources::from_path(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets"))
}

// No context: these paths must fail before any GL call is made.
fn unloaded_gl() -> gl::Gl {
    gl::Gl::load_with(|_| std::ptr::null())
}

#[test]
fn lesson_shaders_are_shipped() {
    let res = assets();
    let vertex = res.load_string("shaders/shader.vs").unwrap();
    let fragment = res.load_string("shaders/shader.fs").unwrap();

    assert!(vertex.starts_with("#version 330 core"));
    assert!(vertex.contains("uniform float delta;"));
    assert!(fragment.contains("out vec4 FragColor;"));
}

#[test]
fn unknown_extension_is_rejected() {
    let gl = unloaded_gl();
    match Shader::from_res(&gl, &assets(), "shaders/shader.glsl") {
        Err(Error::CanNotDetermineShaderTypeForResource { name }) => {
            assert_eq!(name, "shaders/shader.glsl")
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("shader should not load"),
    }
}

#[test]
fn missing_file_names_the_resource() {
    let gl = unloaded_gl();
    match Program::from_files(&gl, &assets(), "shaders/missing.vs", "shaders/shader.fs") {
        Err(Error::ResourceLoad { name, .. }) => assert_eq!(name, "shaders/missing.vs"),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("program should not load"),
    }
}

#[test]
fn from_res_looks_for_vert_and_frag() {
    let gl = unloaded_gl();
    match Program::from_res(&gl, &assets(), "shaders/shader") {
        Err(Error::ResourceLoad { name, .. }) => assert_eq!(name, "shaders/shader.vert"),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("program should not load"),
    }
}
