use gl;
use std;
use std::marker::PhantomData;

pub trait BufferType {
    const BUFFER_TYPE: gl::types::GLenum;
}

/// Vertex buffer target.
pub struct BufferTypeArray;
impl BufferType for BufferTypeArray {
    const BUFFER_TYPE: gl::types::GLenum = gl::ARRAY_BUFFER;
}

/// Element (index) buffer target.
pub struct BufferTypeElementArray;
impl BufferType for BufferTypeElementArray {
    const BUFFER_TYPE: gl::types::GLenum = gl::ELEMENT_ARRAY_BUFFER;
}

pub struct Buffer<B>
where
    B: BufferType,
{
    gl: gl::Gl,
    vbo: gl::types::GLuint,
    _marker: PhantomData<B>,
}

pub type ArrayBuffer = Buffer<BufferTypeArray>;
pub type ElementArrayBuffer = Buffer<BufferTypeElementArray>;

impl<B> Buffer<B>
where
    B: BufferType,
{
    pub fn new(gl: &gl::Gl) -> Buffer<B> {
        let mut vbo: gl::types::GLuint = 0;
        unsafe {
            gl.GenBuffers(1, &mut vbo);
        }

        Buffer {
            gl: gl.clone(),
            vbo,
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> gl::types::GLuint {
        self.vbo
    }

    pub fn bind(&self) {
        unsafe {
            self.gl.BindBuffer(B::BUFFER_TYPE, self.vbo);
        }
    }

    pub fn unbind(&self) {
        unsafe {
            self.gl.BindBuffer(B::BUFFER_TYPE, 0);
        }
    }

    /// Uploads `data` to the currently bound buffer of this target.
    pub fn static_draw_data<T>(&self, data: &[T]) {
        unsafe {
            self.gl.BufferData(
                B::BUFFER_TYPE,
                byte_len(data) as gl::types::GLsizeiptr,
                data.as_ptr() as *const gl::types::GLvoid,
                gl::STATIC_DRAW,
            );
        }
    }
}

impl<B> Drop for Buffer<B>
where
    B: BufferType,
{
    fn drop(&mut self) {
        unsafe {
            self.gl.DeleteBuffers(1, &mut self.vbo);
        }
    }
}

pub struct VertexArray {
    gl: gl::Gl,
    vao: gl::types::GLuint,
}

impl VertexArray {
    pub fn new(gl: &gl::Gl) -> VertexArray {
        let mut vao: gl::types::GLuint = 0;
        unsafe {
            gl.GenVertexArrays(1, &mut vao);
        }

        VertexArray {
            gl: gl.clone(),
            vao,
        }
    }

    pub fn id(&self) -> gl::types::GLuint {
        self.vao
    }

    pub fn bind(&self) {
        unsafe {
            self.gl.BindVertexArray(self.vao);
        }
    }

    pub fn unbind(&self) {
        unsafe {
            self.gl.BindVertexArray(0);
        }
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe {
            self.gl.DeleteVertexArrays(1, &mut self.vao);
        }
    }
}

fn byte_len<T>(data: &[T]) -> usize {
    data.len() * std::mem::size_of::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_targets() {
        assert_eq!(BufferTypeArray::BUFFER_TYPE, gl::ARRAY_BUFFER);
        assert_eq!(BufferTypeElementArray::BUFFER_TYPE, gl::ELEMENT_ARRAY_BUFFER);
    }

    #[test]
    fn byte_len_counts_elements_times_size() {
        let vertices: [f32; 9] = [0.0; 9];
        let indices: [u32; 6] = [0, 1, 2, 1, 2, 3];
        assert_eq!(byte_len(&vertices), 36);
        assert_eq!(byte_len(&indices), 24);
        assert_eq!(byte_len::<u8>(&[]), 0);
    }
}
