//! Vertex layouts shared by the lessons.

use gl;
use std;

#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(C, packed)]
pub struct f32_f32_f32 {
    pub d0: f32,
    pub d1: f32,
    pub d2: f32,
}

impl f32_f32_f32 {
    pub fn new(d0: f32, d1: f32, d2: f32) -> f32_f32_f32 {
        f32_f32_f32 { d0, d1, d2 }
    }

    pub unsafe fn vertex_attrib_pointer(
        gl: &gl::Gl,
        stride: usize,
        location: usize,
        offset: usize,
    ) {
        gl.EnableVertexAttribArray(location as gl::types::GLuint);
        gl.VertexAttribPointer(
            location as gl::types::GLuint,
            3, // the number of components per generic vertex attribute
            gl::FLOAT,
            gl::FALSE,
            stride as gl::types::GLint,
            offset as *const gl::types::GLvoid,
        );
    }
}

impl From<(f32, f32, f32)> for f32_f32_f32 {
    fn from(other: (f32, f32, f32)) -> Self {
        f32_f32_f32::new(other.0, other.1, other.2)
    }
}

/// A vertex type that knows how to describe itself to the bound VAO.
pub trait Vertex: Sized {
    /// `(location, byte offset)` of every attribute, in location order.
    fn attributes() -> &'static [(usize, usize)];

    fn stride() -> usize {
        std::mem::size_of::<Self>()
    }

    /// Sets and enables every attribute pointer against the bound array buffer.
    fn vertex_attrib_pointers(gl: &gl::Gl) {
        let stride = Self::stride();
        for &(location, offset) in Self::attributes() {
            unsafe {
                f32_f32_f32::vertex_attrib_pointer(gl, stride, location, offset);
            }
        }
    }
}

#[derive(Copy, Clone, Debug)]
#[repr(C, packed)]
pub struct PositionVertex {
    pub pos: f32_f32_f32,
}

impl PositionVertex {
    pub fn new(x: f32, y: f32, z: f32) -> PositionVertex {
        PositionVertex {
            pos: (x, y, z).into(),
        }
    }
}

impl Vertex for PositionVertex {
    fn attributes() -> &'static [(usize, usize)] {
        const ATTRIBUTES: [(usize, usize); 1] = [(0, 0)];
        &ATTRIBUTES
    }
}

#[derive(Copy, Clone, Debug)]
#[repr(C, packed)]
pub struct ColoredVertex {
    pub pos: f32_f32_f32,
    pub clr: f32_f32_f32,
}

impl ColoredVertex {
    pub fn new(pos: (f32, f32, f32), clr: (f32, f32, f32)) -> ColoredVertex {
        ColoredVertex {
            pos: pos.into(),
            clr: clr.into(),
        }
    }
}

impl Vertex for ColoredVertex {
    fn attributes() -> &'static [(usize, usize)] {
        const ATTRIBUTES: [(usize, usize); 2] = [(0, 0), (1, 3 * 4)];
        &ATTRIBUTES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_vertex_is_three_floats() {
        assert_eq!(PositionVertex::stride(), 12);
        assert_eq!(PositionVertex::attributes(), &[(0, 0)]);
    }

    #[test]
    fn colored_vertex_interleaves_color_after_position() {
        assert_eq!(ColoredVertex::stride(), 24);
        assert_eq!(ColoredVertex::attributes(), &[(0, 0), (1, 12)]);
    }

    #[test]
    fn slice_of_vertices_is_tightly_packed() {
        let triangle = [
            ColoredVertex::new((-0.5, -0.5, 0.0), (1.0, 0.0, 0.0)),
            ColoredVertex::new((0.5, -0.5, 0.0), (0.0, 1.0, 0.0)),
            ColoredVertex::new((0.0, 0.5, 0.0), (0.0, 0.0, 1.0)),
        ];
        assert_eq!(std::mem::size_of_val(&triangle), 3 * 6 * 4);
    }

    #[test]
    fn tuple_conversion_keeps_order() {
        let v: f32_f32_f32 = (1.0, 2.0, 3.0).into();
        assert_eq!(v, f32_f32_f32::new(1.0, 2.0, 3.0));
    }
}
