use gl;
use resources::{self, Resources};
use std;
use std::collections::HashMap;
use std::ffi::{CStr, CString};

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "Failed to load resource {}", name)]
    ResourceLoad {
        name: String,
        #[cause]
        inner: resources::Error,
    },
    #[fail(display = "Can not determine shader type for resource {}", name)]
    CanNotDetermineShaderTypeForResource { name: String },
    #[fail(display = "Failed to compile shader {}: {}", name, message)]
    CompileError { name: String, message: String },
    #[fail(display = "Failed to link program {}: {}", name, message)]
    LinkError { name: String, message: String },
    #[fail(display = "Program has no active uniform named {}", name)]
    UnknownUniform { name: String },
    #[fail(display = "Uniform {} has type {:#x}, not {}", name, actual, expected)]
    UniformTypeMismatch {
        name: String,
        expected: &'static str,
        actual: gl::types::GLenum,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl ShaderKind {
    const EXTENSIONS: [(&'static str, ShaderKind); 4] = [
        (".vert", ShaderKind::Vertex),
        (".vs", ShaderKind::Vertex),
        (".frag", ShaderKind::Fragment),
        (".fs", ShaderKind::Fragment),
    ];

    pub fn from_resource_name(name: &str) -> Option<ShaderKind> {
        ShaderKind::EXTENSIONS
            .iter()
            .find(|&&(file_extension, _)| name.ends_with(file_extension))
            .map(|&(_, kind)| kind)
    }

    pub fn gl_enum(self) -> gl::types::GLenum {
        match self {
            ShaderKind::Vertex => gl::VERTEX_SHADER,
            ShaderKind::Fragment => gl::FRAGMENT_SHADER,
        }
    }

    /// Stage label used in compile diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            ShaderKind::Vertex => "VERTEX",
            ShaderKind::Fragment => "FRAGMENT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Uniform {
    location: gl::types::GLint,
    typ: gl::types::GLenum,
}

pub struct Program {
    gl: gl::Gl,
    id: gl::types::GLuint,
    link_log: Option<String>,
    uniforms: HashMap<String, Uniform>,
}

impl Program {
    /// Loads `name.vert` and `name.frag` and links them.
    pub fn from_res(gl: &gl::Gl, res: &Resources, name: &str) -> Result<Program, Error> {
        const POSSIBLE_EXT: [&str; 2] = [".vert", ".frag"];

        let resource_names = POSSIBLE_EXT
            .iter()
            .map(|file_extension| format!("{}{}", name, file_extension))
            .collect::<Vec<String>>();

        let shaders = resource_names
            .iter()
            .map(|resource_name| Shader::from_res(gl, res, resource_name))
            .collect::<Result<Vec<Shader>, Error>>()?;

        Program::from_shaders(gl, &shaders[..]).map_err(|message| Error::LinkError {
            name: name.into(),
            message,
        })
    }

    /// Compiles a vertex and a fragment shader from two named files and links them.
    pub fn from_files(
        gl: &gl::Gl,
        res: &Resources,
        vertex_name: &str,
        fragment_name: &str,
    ) -> Result<Program, Error> {
        let shaders = [
            Shader::from_res_as(gl, res, vertex_name, ShaderKind::Vertex)?,
            Shader::from_res_as(gl, res, fragment_name, ShaderKind::Fragment)?,
        ];

        Program::from_shaders(gl, &shaders).map_err(|message| Error::LinkError {
            name: format!("{} + {}", vertex_name, fragment_name),
            message,
        })
    }

    pub fn from_shaders(gl: &gl::Gl, shaders: &[Shader]) -> Result<Program, String> {
        let program = Program::link(gl, &shaders.iter().collect::<Vec<_>>());
        match program.link_log {
            Some(ref message) => Err(message.clone()),
            None => Ok(program),
        }
    }

    /// Links whatever it is given. A failed link still yields a program object
    /// (unusable for drawing) and the driver's log in `link_log`.
    pub fn link(gl: &gl::Gl, shaders: &[&Shader]) -> Program {
        let program_id = unsafe { gl.CreateProgram() };

        for shader in shaders {
            unsafe {
                gl.AttachShader(program_id, shader.id());
            }
        }

        unsafe {
            gl.LinkProgram(program_id);
        }

        let mut success: gl::types::GLint = 1;
        unsafe {
            gl.GetProgramiv(program_id, gl::LINK_STATUS, &mut success);
        }

        let link_log = if success == 0 {
            let mut len: gl::types::GLint = 0;
            unsafe {
                gl.GetProgramiv(program_id, gl::INFO_LOG_LENGTH, &mut len);
            }

            let mut error = vec![0u8; len.max(1) as usize];

            unsafe {
                gl.GetProgramInfoLog(
                    program_id,
                    len,
                    std::ptr::null_mut(),
                    error.as_mut_ptr() as *mut gl::types::GLchar,
                );
            }

            Some(info_log_to_string(&error))
        } else {
            None
        };

        for shader in shaders {
            unsafe {
                gl.DetachShader(program_id, shader.id());
            }
        }

        let uniforms = if link_log.is_none() {
            Program::get_uniforms(gl, program_id)
        } else {
            HashMap::new()
        };

        debug!(
            "program {} linked={} uniforms={:?}",
            program_id,
            link_log.is_none(),
            uniforms.keys().collect::<Vec<_>>()
        );

        Program {
            gl: gl.clone(),
            id: program_id,
            link_log,
            uniforms,
        }
    }

    /// Like [`Program::link`], but prints a failed link's log to stdout.
    pub fn link_reporting(gl: &gl::Gl, shaders: &[&Shader]) -> Program {
        let program = Program::link(gl, shaders);
        if let Some(log) = program.link_log() {
            warn!("program {} failed to link", program.id);
            println!("{}", link_failure_message(log));
        }
        program
    }

    pub fn id(&self) -> gl::types::GLuint {
        self.id
    }

    pub fn link_log(&self) -> Option<&str> {
        self.link_log.as_ref().map(|s| s.as_str())
    }

    pub fn set_used(&self) {
        unsafe {
            self.gl.UseProgram(self.id);
        }
    }

    fn get_uniforms(gl: &gl::Gl, id: gl::types::GLuint) -> HashMap<String, Uniform> {
        const NAME_CAPACITY: gl::types::GLsizei = 256;

        let mut uniforms = HashMap::new();

        let mut total: gl::types::GLint = 0;
        unsafe {
            gl.GetProgramiv(id, gl::ACTIVE_UNIFORMS, &mut total);
        }

        for index in 0..total {
            let mut name_len: gl::types::GLsizei = 0;
            let mut size: gl::types::GLint = 0;
            let mut typ: gl::types::GLenum = gl::ZERO;
            let mut name = vec![0u8; NAME_CAPACITY as usize];

            unsafe {
                gl.GetActiveUniform(
                    id,
                    index as gl::types::GLuint,
                    NAME_CAPACITY,
                    &mut name_len,
                    &mut size,
                    &mut typ,
                    name.as_mut_ptr() as *mut gl::types::GLchar,
                );
            }
            name.truncate(name_len.max(0) as usize);

            let name = match CString::new(name) {
                Ok(name) => name,
                Err(_) => continue,
            };
            let location = unsafe { gl.GetUniformLocation(id, name.as_ptr()) };

            // uniform blocks and optimized-out names have no location
            if location < 0 {
                continue;
            }

            uniforms.insert(
                name.to_string_lossy().into_owned(),
                Uniform { location, typ },
            );
        }

        uniforms
    }

    pub fn uniform_loc(&self, name: &CStr) -> gl::types::GLint {
        unsafe { self.gl.GetUniformLocation(self.id, name.as_ptr()) }
    }

    pub fn has_uniform(&self, name: &str) -> bool {
        self.uniforms.contains_key(name)
    }

    fn uniform(
        &self,
        name: &str,
        expected: &'static str,
        accepts: &[gl::types::GLenum],
    ) -> Result<gl::types::GLint, Error> {
        let uniform = self
            .uniforms
            .get(name)
            .ok_or_else(|| Error::UnknownUniform { name: name.into() })?;

        if !accepts.contains(&uniform.typ) {
            return Err(Error::UniformTypeMismatch {
                name: name.into(),
                expected,
                actual: uniform.typ,
            });
        }

        Ok(uniform.location)
    }

    /// Booleans travel as integers, as GLSL expects.
    pub fn set_bool(&self, name: &str, value: bool) -> Result<(), Error> {
        let location = self.uniform(name, "bool", &[gl::BOOL, gl::INT])?;
        unsafe {
            self.gl.Uniform1i(location, value as gl::types::GLint);
        }
        Ok(())
    }

    pub fn set_int(&self, name: &str, value: gl::types::GLint) -> Result<(), Error> {
        let location = self.uniform(
            name,
            "int",
            &[gl::INT, gl::BOOL, gl::SAMPLER_1D, gl::SAMPLER_2D, gl::SAMPLER_3D],
        )?;
        unsafe {
            self.gl.Uniform1i(location, value);
        }
        Ok(())
    }

    pub fn set_float(&self, name: &str, value: gl::types::GLfloat) -> Result<(), Error> {
        let location = self.uniform(name, "float", &[gl::FLOAT])?;
        unsafe {
            self.gl.Uniform1f(location, value);
        }
        Ok(())
    }

    pub fn set_vec3(&self, name: &str, value: [gl::types::GLfloat; 3]) -> Result<(), Error> {
        let location = self.uniform(name, "vec3", &[gl::FLOAT_VEC3])?;
        unsafe {
            self.gl.Uniform3f(location, value[0], value[1], value[2]);
        }
        Ok(())
    }

    pub fn set_vec4(&self, name: &str, value: [gl::types::GLfloat; 4]) -> Result<(), Error> {
        let location = self.uniform(name, "vec4", &[gl::FLOAT_VEC4])?;
        unsafe {
            self.gl.Uniform4f(location, value[0], value[1], value[2], value[3]);
        }
        Ok(())
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe {
            self.gl.DeleteProgram(self.id);
        }
    }
}

pub struct Shader {
    gl: gl::Gl,
    id: gl::types::GLuint,
    kind: ShaderKind,
    compile_log: Option<String>,
}

impl Shader {
    pub fn from_res(gl: &gl::Gl, res: &Resources, name: &str) -> Result<Shader, Error> {
        let kind = ShaderKind::from_resource_name(name).ok_or_else(|| {
            Error::CanNotDetermineShaderTypeForResource { name: name.into() }
        })?;

        Shader::from_res_as(gl, res, name, kind)
    }

    pub fn from_res_as(
        gl: &gl::Gl,
        res: &Resources,
        name: &str,
        kind: ShaderKind,
    ) -> Result<Shader, Error> {
        let source = res.load_cstring(name).map_err(|e| Error::ResourceLoad {
            name: name.into(),
            inner: e,
        })?;

        Shader::from_source(gl, &source, kind).map_err(|message| Error::CompileError {
            name: name.into(),
            message,
        })
    }

    pub fn from_source(gl: &gl::Gl, source: &CStr, kind: ShaderKind) -> Result<Shader, String> {
        let shader = Shader::compile(gl, source, kind);
        match shader.compile_log {
            Some(ref message) => Err(message.clone()),
            None => Ok(shader),
        }
    }

    pub fn from_vert_source(gl: &gl::Gl, source: &CStr) -> Result<Shader, String> {
        Shader::from_source(gl, source, ShaderKind::Vertex)
    }

    pub fn from_frag_source(gl: &gl::Gl, source: &CStr) -> Result<Shader, String> {
        Shader::from_source(gl, source, ShaderKind::Fragment)
    }

    /// Compiles whatever it is given. A failed compile still yields a shader
    /// object and the driver's log in `compile_log`.
    pub fn compile(gl: &gl::Gl, source: &CStr, kind: ShaderKind) -> Shader {
        let id = unsafe { gl.CreateShader(kind.gl_enum()) };
        unsafe {
            gl.ShaderSource(id, 1, &source.as_ptr(), std::ptr::null());
            gl.CompileShader(id);
        }

        let mut success: gl::types::GLint = 1;
        unsafe {
            gl.GetShaderiv(id, gl::COMPILE_STATUS, &mut success);
        }

        let compile_log = if success == 0 {
            let mut len: gl::types::GLint = 0;
            unsafe {
                gl.GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut len);
            }

            let mut error = vec![0u8; len.max(1) as usize];

            unsafe {
                gl.GetShaderInfoLog(
                    id,
                    len,
                    std::ptr::null_mut(),
                    error.as_mut_ptr() as *mut gl::types::GLchar,
                );
            }

            Some(info_log_to_string(&error))
        } else {
            None
        };

        debug!("{} shader {} compiled={}", kind.label(), id, compile_log.is_none());

        Shader {
            gl: gl.clone(),
            id,
            kind,
            compile_log,
        }
    }

    /// Like [`Shader::compile`], but prints a failed compile's log to stdout.
    pub fn compile_reporting(gl: &gl::Gl, source: &CStr, kind: ShaderKind) -> Shader {
        let shader = Shader::compile(gl, source, kind);
        if let Some(log) = shader.compile_log() {
            warn!("{} shader {} failed to compile", kind.label(), shader.id);
            println!("{}", compile_failure_message(kind, log));
        }
        shader
    }

    pub fn id(&self) -> gl::types::GLuint {
        self.id
    }

    pub fn kind(&self) -> ShaderKind {
        self.kind
    }

    pub fn compile_log(&self) -> Option<&str> {
        self.compile_log.as_ref().map(|s| s.as_str())
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.DeleteShader(self.id);
        }
    }
}

/// Formats a failed compile the way the lessons report it on stdout.
pub fn compile_failure_message(kind: ShaderKind, log: &str) -> String {
    format!("ERROR::SHADER::{}::COMPILATION_FAILED\n{}", kind.label(), log)
}

/// Formats a failed link the way the lessons report it on stdout.
pub fn link_failure_message(log: &str) -> String {
    format!("ERROR::SHADER::PROGRAM::LINKING_FAILED\n{}", log)
}

/// GL writes a terminating nul inside the reported length; drop it and
/// anything after it.
fn info_log_to_string(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).trim_end().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_kind_from_extension() {
        assert_eq!(
            ShaderKind::from_resource_name("shaders/triangle.vert"),
            Some(ShaderKind::Vertex)
        );
        assert_eq!(
            ShaderKind::from_resource_name("shaders/shader.vs"),
            Some(ShaderKind::Vertex)
        );
        assert_eq!(
            ShaderKind::from_resource_name("shaders/triangle.frag"),
            Some(ShaderKind::Fragment)
        );
        assert_eq!(
            ShaderKind::from_resource_name("shaders/shader.fs"),
            Some(ShaderKind::Fragment)
        );
        assert_eq!(ShaderKind::from_resource_name("shaders/shader.glsl"), None);
    }

    #[test]
    fn shader_kind_maps_to_gl_stage() {
        assert_eq!(ShaderKind::Vertex.gl_enum(), gl::VERTEX_SHADER);
        assert_eq!(ShaderKind::Fragment.gl_enum(), gl::FRAGMENT_SHADER);
    }

    #[test]
    fn info_log_stops_at_nul() {
        let mut raw = b"0:3(1): error: syntax error".to_vec();
        raw.push(0);
        raw.extend_from_slice(b"   ");
        assert_eq!(info_log_to_string(&raw), "0:3(1): error: syntax error");
    }

    #[test]
    fn failure_messages_name_the_stage() {
        assert_eq!(
            compile_failure_message(ShaderKind::Fragment, "bad"),
            "ERROR::SHADER::FRAGMENT::COMPILATION_FAILED\nbad"
        );
        assert_eq!(
            link_failure_message("no main"),
            "ERROR::SHADER::PROGRAM::LINKING_FAILED\nno main"
        );
    }
}
