mod shader;
pub use self::shader::{
    compile_failure_message, link_failure_message, Error, Program, Shader, ShaderKind,
};

mod viewport;
pub use self::viewport::Viewport;

mod color_buffer;
pub use self::color_buffer::ColorBuffer;

pub mod buffer;
pub mod data;
