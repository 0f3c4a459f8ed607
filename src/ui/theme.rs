use ratatui::style::Color;

use crate::config::ColorsConfig;

/// Three-level severity used for gauges, percentages and row highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    /// low < 40, medium 40..=70, high > 70
    pub fn for_cpu(percent: f64) -> Self {
        if percent > 70.0 {
            Tier::High
        } else if percent >= 40.0 {
            Tier::Medium
        } else {
            Tier::Low
        }
    }

    /// low < 60, medium 60..=80, high > 80
    pub fn for_memory(percent: f64) -> Self {
        if percent > 80.0 {
            Tier::High
        } else if percent >= 60.0 {
            Tier::Medium
        } else {
            Tier::Low
        }
    }

    /// Row emphasis from a process's CPU share and estimated draw relative to TDP.
    pub fn for_process(cpu_percent: f64, watts: f64, cpu_tdp_watts: f64) -> Self {
        if cpu_percent > 50.0 || watts > 0.5 * cpu_tdp_watts {
            Tier::High
        } else if cpu_percent > 20.0 || watts > 0.2 * cpu_tdp_watts {
            Tier::Medium
        } else {
            Tier::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSupport {
    Auto,
    Truecolor,
    Color256,
    Mono,
}

impl ColorSupport {
    pub fn from_config_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "truecolor" | "24bit" => ColorSupport::Truecolor,
            "256" | "256color" => ColorSupport::Color256,
            "mono" | "monochrome" => ColorSupport::Mono,
            _ => ColorSupport::Auto,
        }
    }
}

pub fn detect_color_support() -> ColorSupport {
    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorSupport::Truecolor;
    }
    ColorSupport::Color256
}

pub fn resolve_color_support(config: &str) -> ColorSupport {
    let parsed = ColorSupport::from_config_str(config);
    if parsed == ColorSupport::Auto {
        detect_color_support()
    } else {
        parsed
    }
}

#[derive(Debug, Clone)]
pub struct TierOverrides {
    pub low: String,
    pub mid: String,
    pub high: String,
}

impl TierOverrides {
    pub fn from_config(colors: &ColorsConfig) -> Self {
        Self {
            low: colors.tier_low.clone(),
            mid: colors.tier_mid.clone(),
            high: colors.tier_high.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub header_accent_bg: Color,
    pub header_accent_fg: Color,
    pub status_ok: Color,
    pub status_err: Color,
    pub statusbar_bg: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub table_header_fg: Color,
    pub table_header_bg: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
    pub surface_bg: Color,
    pub gauge_unfilled: Color,
    pub tier_colors: [Color; 3],
}

impl Theme {
    pub fn from_config(theme_name: &str, tiers: &TierOverrides, support: ColorSupport) -> Self {
        let mut theme = match theme_name.to_lowercase().as_str() {
            "light" => Self::light(),
            "mono" => Self::mono(),
            _ => Self::dark(),
        };

        if support == ColorSupport::Mono {
            theme = Self::mono();
        }

        theme.apply_tier_overrides(tiers);
        theme.apply_color_support(support);
        theme
    }

    pub fn tier(&self, tier: Tier) -> Color {
        match tier {
            Tier::Low => self.tier_colors[0],
            Tier::Medium => self.tier_colors[1],
            Tier::High => self.tier_colors[2],
        }
    }

    fn apply_tier_overrides(&mut self, tiers: &TierOverrides) {
        let low = parse_hex_color(&tiers.low);
        let mid = parse_hex_color(&tiers.mid);
        let high = parse_hex_color(&tiers.high);

        if let (Some(low), Some(mid), Some(high)) = (low, mid, high) {
            self.tier_colors = [low, mid, high];
        }
    }

    fn apply_color_support(&mut self, support: ColorSupport) {
        let map = |c: Color| adapt_color(c, support);

        self.header_accent_bg = map(self.header_accent_bg);
        self.header_accent_fg = map(self.header_accent_fg);
        self.status_ok = map(self.status_ok);
        self.status_err = map(self.status_err);
        self.statusbar_bg = map(self.statusbar_bg);
        self.text_primary = map(self.text_primary);
        self.text_secondary = map(self.text_secondary);
        self.table_header_fg = map(self.table_header_fg);
        self.table_header_bg = map(self.table_header_bg);
        self.pill_key_bg = map(self.pill_key_bg);
        self.pill_key_fg = map(self.pill_key_fg);
        self.pill_desc_fg = map(self.pill_desc_fg);
        self.surface_bg = map(self.surface_bg);
        self.gauge_unfilled = map(self.gauge_unfilled);
        self.tier_colors = self.tier_colors.map(map);
    }

    pub fn dark() -> Self {
        Theme {
            name: "dark",
            header_accent_bg: Color::Green,
            header_accent_fg: Color::Black,
            status_ok: Color::Green,
            status_err: Color::Red,
            statusbar_bg: Color::DarkGray,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            table_header_fg: Color::Black,
            table_header_bg: Color::Rgb(103, 232, 249),
            pill_key_bg: Color::Yellow,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::DarkGray,
            gauge_unfilled: Color::DarkGray,
            tier_colors: [
                Color::Rgb(16, 185, 129),
                Color::Rgb(249, 115, 22),
                Color::Rgb(239, 68, 68),
            ],
        }
    }

    pub fn light() -> Self {
        Theme {
            name: "light",
            header_accent_bg: Color::Blue,
            header_accent_fg: Color::White,
            status_ok: Color::Rgb(0, 120, 0),
            status_err: Color::Red,
            statusbar_bg: Color::Rgb(220, 220, 220),
            text_primary: Color::Black,
            text_secondary: Color::DarkGray,
            table_header_fg: Color::White,
            table_header_bg: Color::Rgb(70, 130, 180),
            pill_key_bg: Color::Blue,
            pill_key_fg: Color::White,
            pill_desc_fg: Color::Black,
            surface_bg: Color::Rgb(200, 200, 200),
            gauge_unfilled: Color::Rgb(200, 200, 200),
            tier_colors: [
                Color::Rgb(60, 160, 60),
                Color::Rgb(200, 140, 0),
                Color::Rgb(200, 60, 60),
            ],
        }
    }

    pub fn mono() -> Self {
        Theme {
            name: "mono",
            header_accent_bg: Color::White,
            header_accent_fg: Color::Black,
            status_ok: Color::White,
            status_err: Color::White,
            statusbar_bg: Color::Black,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            table_header_fg: Color::Black,
            table_header_bg: Color::White,
            pill_key_bg: Color::White,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::Black,
            gauge_unfilled: Color::DarkGray,
            tier_colors: [Color::Gray, Color::White, Color::White],
        }
    }
}

fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if s.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&s[0..2], 16).ok()?;
    let g = u8::from_str_radix(&s[2..4], 16).ok()?;
    let b = u8::from_str_radix(&s[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

fn adapt_color(color: Color, support: ColorSupport) -> Color {
    match support {
        ColorSupport::Truecolor | ColorSupport::Auto => color,
        ColorSupport::Color256 => match color {
            Color::Rgb(r, g, b) => Color::Indexed(rgb_to_ansi256(r, g, b)),
            _ => color,
        },
        ColorSupport::Mono => match color {
            Color::Rgb(r, g, b) => {
                let luminance = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
                if luminance > 128.0 {
                    Color::White
                } else {
                    Color::Black
                }
            }
            Color::White | Color::Black | Color::Gray | Color::DarkGray => color,
            _ => Color::White,
        },
    }
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    let r = (r as f32 / 255.0 * 5.0).round() as u8;
    let g = (g as f32 / 255.0 * 5.0).round() as u8;
    let b = (b as f32 / 255.0 * 5.0).round() as u8;
    16 + 36 * r + 6 * g + b
}
