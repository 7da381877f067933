/// Color scheme of a vote progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressVariant {
    For,
    Against,
    Other,
}

impl ProgressVariant {
    /// Unknown tags fall back to the neutral scheme. "aginst" is a legacy spelling.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "for" => ProgressVariant::For,
            "against" | "aginst" => ProgressVariant::Against,
            _ => ProgressVariant::Other,
        }
    }

    pub fn fill_color(&self) -> &'static str {
        match self {
            ProgressVariant::For => "var(--brand-color-green)",
            ProgressVariant::Against => "var(--brand-color-red)",
            ProgressVariant::Other => "var(--brand-gray-light-text)",
        }
    }

    pub fn track_color(&self) -> &'static str {
        match self {
            ProgressVariant::For => "var(--brand-color-green-translucent)",
            ProgressVariant::Against => "var(--brand-color-red-translucent)",
            ProgressVariant::Other => "var(--brand-gray-light-text-translucent)",
        }
    }
}

/// Track plus fill. The percentage is not clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressBar {
    pub variant: ProgressVariant,
    pub percentage: f64,
}

impl ProgressBar {
    pub fn new(variant: ProgressVariant, percentage: f64) -> Self {
        Self { variant, percentage }
    }

    pub fn fill_width(&self) -> String {
        format!("{}%", self.percentage)
    }

    pub fn track_style(&self) -> String {
        format!("background-color: {};", self.variant.track_color())
    }

    pub fn fill_style(&self) -> String {
        format!("width: {}; background-color: {};", self.fill_width(), self.variant.fill_color())
    }
}
