use yansi::Paint;

/// Color palette for consistent theming
pub struct ColorPalette {
    pub secondary: (u8, u8, u8), // Headers, emphasis
    pub value: (u8, u8, u8),     // Paths, configured values
}

impl ColorPalette {
    pub const CATPPUCCIN: Self = Self {
        secondary: (148, 226, 213), // Teal
        value: (137, 180, 250),     // Blue
    };
}

/// Formatting context for CLI output
pub struct FormatContext {
    pub use_color: bool,
    pub palette: ColorPalette,
}

impl FormatContext {
    pub fn new(use_color: bool) -> Self {
        Self { use_color, palette: ColorPalette::CATPPUCCIN }
    }

    pub fn from_env() -> Self {
        let use_color = std::env::var("NO_COLOR").is_err();
        Self::new(use_color)
    }

    pub fn format_header(&self, text: &str) -> String {
        if self.use_color {
            let (r, g, b) = self.palette.secondary;
            Paint::rgb(text, r, g, b).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn format_value(&self, text: &str) -> String {
        if self.use_color {
            let (r, g, b) = self.palette.value;
            Paint::rgb(text, r, g, b).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn format_error(&self, text: &str) -> String {
        if self.use_color {
            Paint::red(text).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_context_no_color() {
        let ctx = FormatContext::new(false);
        assert_eq!(ctx.format_header("Header"), "Header");
        assert_eq!(ctx.format_value("/tmp/notes"), "/tmp/notes");
        assert_eq!(ctx.format_error("boom"), "boom");
    }

    #[test]
    fn test_format_context_with_color() {
        let ctx = FormatContext::new(true);
        let header = ctx.format_header("Configuration");
        assert!(header.contains("Configuration"));
        assert!(header.len() > "Configuration".len()); // Has ANSI codes
    }
}
