use gl;

/// RGBA clear color, in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorBuffer {
    pub color: [f32; 4],
}

impl Default for ColorBuffer {
    fn default() -> Self {
        ColorBuffer::from_color(0.2, 0.3, 0.3)
    }
}

impl ColorBuffer {
    pub fn from_color(r: f32, g: f32, b: f32) -> ColorBuffer {
        ColorBuffer {
            color: [r, g, b, 1.0],
        }
    }

    pub fn update_color(&mut self, r: f32, g: f32, b: f32) {
        self.color = [r, g, b, 1.0];
    }

    pub fn set_used(&self, gl: &gl::Gl) {
        unsafe {
            gl.ClearColor(self.color[0], self.color[1], self.color[2], self.color[3]);
        }
    }

    pub fn clear(&self, gl: &gl::Gl) {
        unsafe {
            gl.Clear(gl::COLOR_BUFFER_BIT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_dark_teal() {
        assert_eq!(ColorBuffer::default().color, [0.2, 0.3, 0.3, 1.0]);
    }

    #[test]
    fn update_keeps_alpha_opaque() {
        let mut buffer = ColorBuffer::default();
        buffer.update_color(1.0, 0.5, 0.2);
        assert_eq!(buffer.color, [1.0, 0.5, 0.2, 1.0]);
    }
}
