//! Colors, stroke/text styles and the room palette.

use plan_core::WallKind;

/// An opaque-or-translucent 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Color {
    /// Opaque color from RGB components.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let byte = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        match digits.len() {
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: byte(6)?,
            }),
            _ => None,
        }
    }

    /// `#rrggbb`, dropping alpha.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a 0.0-1.0 opacity.
    #[must_use]
    pub fn opacity(self) -> f32 {
        f32::from(self.a) / 255.0
    }

    pub(crate) fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

/// Surface background.
pub const BACKGROUND: Color = Color::rgb(0xff, 0xff, 0xff);
/// Grid line color.
pub const GRID_LINE: Color = Color::rgb(0xe5, 0xe7, 0xeb);
/// Room outline color.
pub const ROOM_OUTLINE: Color = Color::rgb(0x6b, 0x72, 0x80);
/// Fill for room types without a palette entry.
pub const DEFAULT_ROOM_FILL: Color = Color::rgb(0xf5, 0xf5, 0xf5);
/// Door opening cut.
pub const DOOR_CUT: Color = Color::rgb(0xff, 0xff, 0xff);
/// Door swing arc and leaf.
pub const DOOR_SWING: Color = Color::rgb(0x8b, 0x5c, 0x2a);
/// Window frame fill.
pub const WINDOW_FILL: Color = Color::rgb(0xbf, 0xdb, 0xfe);
/// Window frame outline and center line.
pub const WINDOW_FRAME: Color = Color::rgb(0x25, 0x63, 0xeb);
/// Room name and area text.
pub const LABEL_TEXT: Color = Color::rgb(0x1f, 0x29, 0x37);
/// Secondary label text.
pub const LABEL_MUTED: Color = Color::rgb(0x4b, 0x55, 0x63);
/// Dimension runs, ticks and labels.
pub const DIMENSION: Color = Color::rgb(0xef, 0x44, 0x44);
/// Corridor fill.
pub const CORRIDOR_FILL: Color = Color::rgb(0xfe, 0xf3, 0xc7);
/// Corridor outline.
pub const CORRIDOR_OUTLINE: Color = Color::rgb(0xd9, 0x77, 0x06);
/// Stair fill.
pub const STAIRS_FILL: Color = Color::rgb(0xd1, 0xd5, 0xdb);
/// Stair outline and treads.
pub const STAIRS_LINE: Color = Color::rgb(0x37, 0x41, 0x51);
/// Title text.
pub const TITLE_TEXT: Color = Color::rgb(0x11, 0x18, 0x27);

/// Fill color for a room category key.
///
/// Keys are matched case-insensitively with spaces and hyphens treated as
/// underscores. Unknown keys map to [`DEFAULT_ROOM_FILL`].
#[must_use]
pub fn room_fill(kind: &str) -> Color {
    let key: String = kind
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect();

    match key.as_str() {
        "living" | "living_room" | "family" | "family_room" => Color::rgb(0xfe, 0xf3, 0xe2),
        "bedroom" | "master_bedroom" | "guest_bedroom" => Color::rgb(0xe0, 0xf2, 0xfe),
        "kitchen" => Color::rgb(0xfc, 0xe7, 0xf3),
        "bathroom" | "bath" | "half_bath" | "powder" => Color::rgb(0xd1, 0xfa, 0xe5),
        "dining" | "dining_room" => Color::rgb(0xfe, 0xf9, 0xc3),
        "office" | "study" => Color::rgb(0xed, 0xe9, 0xfe),
        "garage" => Color::rgb(0xe5, 0xe7, 0xeb),
        "laundry" | "utility" => Color::rgb(0xcc, 0xfb, 0xf1),
        "closet" | "storage" | "pantry" => Color::rgb(0xf3, 0xf4, 0xf6),
        "hallway" | "hall" | "foyer" | "entry" => Color::rgb(0xfa, 0xfa, 0xf9),
        "balcony" | "patio" | "porch" => Color::rgb(0xec, 0xfc, 0xcb),
        _ => DEFAULT_ROOM_FILL,
    }
}

/// Stroke color for a wall category.
#[must_use]
pub fn wall_stroke(kind: WallKind) -> Color {
    match kind {
        WallKind::Exterior => Color::rgb(0x1f, 0x29, 0x37),
        WallKind::Interior => Color::rgb(0x4b, 0x55, 0x63),
        WallKind::Partition => Color::rgb(0x9c, 0xa3, 0xaf),
    }
}

/// Line end style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    /// Flat end at the endpoint.
    #[default]
    Butt,
    /// Flat end extended by half the width, so joined segments meet flush.
    Square,
    /// Rounded end.
    Round,
}

impl From<LineCap> for tiny_skia::LineCap {
    fn from(cap: LineCap) -> Self {
        match cap {
            LineCap::Butt => Self::Butt,
            LineCap::Square => Self::Square,
            LineCap::Round => Self::Round,
        }
    }
}

/// How a line or outline is stroked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: Color,
    /// Width in current surface units.
    pub width: f64,
    /// End cap.
    pub cap: LineCap,
}

impl StrokeStyle {
    /// Butt-capped stroke.
    #[must_use]
    pub const fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            cap: LineCap::Butt,
        }
    }

    /// Same stroke with another cap.
    #[must_use]
    pub const fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }
}

/// Horizontal text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Anchor at the start of the text.
    #[default]
    Left,
    /// Anchor at the middle.
    Center,
}

/// Vertical text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    /// Anchor on the alphabetic baseline.
    #[default]
    Alphabetic,
    /// Anchor at the vertical middle.
    Middle,
}

/// Font and placement for a text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in surface units.
    pub size: f64,
    /// Bold weight.
    pub bold: bool,
    /// Fill color.
    pub color: Color,
    /// Horizontal anchor.
    pub align: TextAlign,
    /// Vertical anchor.
    pub baseline: TextBaseline,
}

impl TextStyle {
    /// Regular text centered on its anchor point.
    #[must_use]
    pub const fn centered(size: f64, color: Color) -> Self {
        Self {
            size,
            bold: false,
            color,
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
        }
    }

    /// Same style in bold.
    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}
