//! One decoded pixel of a 4x4 block.

/// Represents a single RGBA8888 pixel color from a decoded block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Color8888 {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
    /// Alpha component (0-255)
    pub a: u8,
}

impl Color8888 {
    /// Constructs a new [`Color8888`] from the specified red, green, blue, and alpha components.
    ///
    /// # Examples
    ///
    /// ```
    /// use texdecode_common::color_8888::Color8888;
    ///
    /// let pixel = Color8888::new(255, 0, 0, 255);
    /// assert_eq!(pixel.r, 255);
    /// assert_eq!(pixel.a, 255);
    /// ```
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Writes the first `out.len()` channels in B, G, R, A order.
    ///
    /// A single byte output receives red, which carries gray and single channel data.
    #[inline]
    pub fn write_to(&self, out: &mut [u8]) {
        match out.len() {
            1 => out[0] = self.r,
            _ => {
                for (dst, src) in out.iter_mut().zip([self.b, self.g, self.r, self.a]) {
                    *dst = src;
                }
            }
        }
    }
}
