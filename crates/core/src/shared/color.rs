/// Opaque RGB marker tint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const NEUTRAL: Color = Color::rgb(255, 255, 255);
    pub const MALE: Color = Color::rgb(52, 152, 219);
    pub const FEMALE: Color = Color::rgb(255, 64, 129);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to [0, 1], as most renderers expect.
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::NEUTRAL
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_palette_values() {
        assert_eq!(Color::MALE, Color::rgb(52, 152, 219));
        assert_eq!(Color::FEMALE, Color::rgb(255, 64, 129));
        assert_eq!(Color::default(), Color::NEUTRAL);
    }

    #[test]
    fn test_to_unit() {
        let [r, g, b] = Color::FEMALE.to_unit();
        assert_relative_eq!(r, 1.0);
        assert_relative_eq!(g, 64.0 / 255.0);
        assert_relative_eq!(b, 129.0 / 255.0);
    }

    #[test]
    fn test_display_as_hex() {
        assert_eq!(Color::MALE.to_string(), "#3498db");
        assert_eq!(Color::NEUTRAL.to_string(), "#ffffff");
    }
}
