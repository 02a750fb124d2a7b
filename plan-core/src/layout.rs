//! Floor layout data model.
//!
//! A [`FloorLayout`] is produced by an external layout engine and borrowed
//! read-only by the renderer. All lengths are in feet with a top-left origin.

use serde::{Deserialize, Serialize};

use crate::{PlanError, PlanResult};

/// Width and height of the drawable extent, in feet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Extent along the x axis.
    pub width: f64,
    /// Extent along the y axis.
    pub height: f64,
}

/// An axis-aligned rectangle in plan space (feet).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl PlanRect {
    /// Create a rectangle from its top-left corner and size.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if a plan point lies within this rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// A door or window anchored at a point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    /// Anchor X.
    pub x: f64,
    /// Anchor Y.
    pub y: f64,
    /// Opening width (door swing radius for doors).
    pub width: f64,
    /// Opening depth, usually the host wall thickness.
    pub height: f64,
    /// Rotation in degrees. Any value; see [`Opening::normalized_rotation`].
    #[serde(default)]
    pub rotation: f64,
    /// Cosmetic door style (`single`, `double`, `sliding`, ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Opening {
    /// Rotation folded into `[0, 360)`.
    #[must_use]
    pub fn normalized_rotation(&self) -> f64 {
        let r = self.rotation.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        if r >= 360.0 {
            0.0
        } else {
            r
        }
    }
}

/// A single room.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomLayout {
    /// Display name.
    pub name: String,
    /// Free-form category key, only used for the fill palette.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Doors belonging to this room.
    #[serde(default)]
    pub doors: Vec<Opening>,
    /// Windows belonging to this room.
    #[serde(default)]
    pub windows: Vec<Opening>,
}

impl RoomLayout {
    /// Create a room without openings.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: impl Into<String>, rect: PlanRect) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            doors: Vec::new(),
            windows: Vec::new(),
        }
    }

    /// The room footprint as a rectangle.
    #[must_use]
    pub fn rect(&self) -> PlanRect {
        PlanRect::new(self.x, self.y, self.width, self.height)
    }

    /// Floor area rounded to whole square feet.
    #[must_use]
    pub fn area_sq_ft(&self) -> f64 {
        (self.width * self.height).round()
    }

    /// Center point of the room.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check if a plan point lies within the room.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.rect().contains(x, y)
    }
}

/// Wall category. Controls stroke color only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum WallKind {
    /// Building envelope.
    Exterior,
    /// Load-bearing or full-height interior wall.
    #[default]
    Interior,
    /// Light partition.
    Partition,
}

impl WallKind {
    /// Parse a category key. Unknown keys fall back to [`WallKind::Interior`].
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "exterior" => Self::Exterior,
            "partition" => Self::Partition,
            _ => Self::Interior,
        }
    }
}

impl From<String> for WallKind {
    fn from(key: String) -> Self {
        Self::from_key(&key)
    }
}

/// A wall segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallLayout {
    /// Start X.
    pub x1: f64,
    /// Start Y.
    pub y1: f64,
    /// End X.
    pub x2: f64,
    /// End Y.
    pub y2: f64,
    /// Wall thickness in feet.
    pub thickness: f64,
    /// Wall category.
    #[serde(rename = "type", default)]
    pub kind: WallKind,
}

impl WallLayout {
    /// Segment length in feet.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.x2 - self.x1).hypot(self.y2 - self.y1)
    }
}

/// Non-room traversal geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Circulation {
    /// Corridor rectangles.
    #[serde(default)]
    pub corridors: Vec<PlanRect>,
    /// Stair footprint, if the floor has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stairs: Option<PlanRect>,
}

/// One floor of a building.
///
/// `boundingBox` is required on the wire; everything else may be omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorLayout {
    /// Level label, shown as the drawing title.
    #[serde(default)]
    pub level: String,
    /// Drawable extent.
    pub bounding_box: BoundingBox,
    /// Rooms in draw order.
    #[serde(default)]
    pub rooms: Vec<RoomLayout>,
    /// Walls in draw order.
    #[serde(default)]
    pub walls: Vec<WallLayout>,
    /// Corridors and stairs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circulation: Option<Circulation>,
}

impl FloorLayout {
    /// Create an empty floor with the given level name and extent.
    #[must_use]
    pub fn new(level: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            level: level.into(),
            bounding_box: BoundingBox { width, height },
            rooms: Vec::new(),
            walls: Vec::new(),
            circulation: None,
        }
    }

    /// Add a room.
    #[must_use]
    pub fn with_room(mut self, room: RoomLayout) -> Self {
        self.rooms.push(room);
        self
    }

    /// Add a wall.
    #[must_use]
    pub fn with_wall(mut self, wall: WallLayout) -> Self {
        self.walls.push(wall);
        self
    }

    /// Set corridors and stairs.
    #[must_use]
    pub fn with_circulation(mut self, circulation: Circulation) -> Self {
        self.circulation = Some(circulation);
        self
    }

    /// Corridor rectangles, empty when the floor has no circulation.
    #[must_use]
    pub fn corridors(&self) -> &[PlanRect] {
        self.circulation
            .as_ref()
            .map(|c| c.corridors.as_slice())
            .unwrap_or(&[])
    }

    /// Stair footprint, if any.
    #[must_use]
    pub fn stairs(&self) -> Option<&PlanRect> {
        self.circulation.as_ref().and_then(|c| c.stairs.as_ref())
    }

    /// Find the room at a plan point.
    ///
    /// Returns the last matching room, which is the one drawn on top.
    #[must_use]
    pub fn room_at(&self, x: f64, y: f64) -> Option<&RoomLayout> {
        self.rooms.iter().rev().find(|r| r.contains(x, y))
    }

    /// Check the documented geometric invariants.
    ///
    /// Every geometric field must be finite and non-negative, except opening
    /// rotation which only has to be finite. The bounding box, room sizes and
    /// wall thickness must be strictly positive. Geometry outside the
    /// bounding box is allowed. The renderer never calls this; hosts may use
    /// it before binding a layout.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidLayout`] describing the first violation.
    pub fn validate(&self) -> PlanResult<()> {
        let bb = &self.bounding_box;
        if !all_positive(&[bb.width, bb.height]) {
            return Err(invalid(format!(
                "bounding box must be positive, got {}x{}",
                bb.width, bb.height
            )));
        }

        for room in &self.rooms {
            if !non_negative(&[room.x, room.y]) || !all_positive(&[room.width, room.height]) {
                return Err(invalid(format!(
                    "room '{}' has invalid geometry",
                    room.name
                )));
            }
            for opening in room.doors.iter().chain(&room.windows) {
                let fields = [opening.x, opening.y, opening.width, opening.height];
                if !non_negative(&fields) || !opening.rotation.is_finite() {
                    return Err(invalid(format!(
                        "opening in room '{}' has invalid geometry",
                        room.name
                    )));
                }
            }
        }

        for (idx, wall) in self.walls.iter().enumerate() {
            if !non_negative(&[wall.x1, wall.y1, wall.x2, wall.y2])
                || !all_positive(&[wall.thickness])
            {
                return Err(invalid(format!("wall #{idx} has invalid geometry")));
            }
        }

        for rect in self.corridors().iter().chain(self.stairs()) {
            if !non_negative(&[rect.x, rect.y, rect.width, rect.height]) {
                return Err(invalid("circulation has invalid geometry".to_string()));
            }
        }

        Ok(())
    }

    /// Serialize the layout to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> PlanResult<String> {
        serde_json::to_string(self).map_err(PlanError::Serialization)
    }

    /// Deserialize a layout from JSON. Missing arrays become empty.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> PlanResult<Self> {
        serde_json::from_str(json).map_err(PlanError::Serialization)
    }
}

/// A multi-floor building as emitted by the layout engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanDocument {
    /// Floors, ground floor first.
    pub floors: Vec<FloorLayout>,
}

impl PlanDocument {
    /// Parse either a `{ "floors": [...] }` document or a bare floor.
    ///
    /// The shape is chosen by the presence of a `floors` key, so a malformed
    /// building reports its own error instead of being read as a floor.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not valid for the chosen shape.
    pub fn from_json(json: &str) -> PlanResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.get("floors").is_some() {
            Ok(serde_json::from_value(value)?)
        } else {
            let floor: FloorLayout = serde_json::from_value(value)?;
            Ok(Self {
                floors: vec![floor],
            })
        }
    }

    /// The first floor, if any.
    #[must_use]
    pub fn first_floor(&self) -> Option<&FloorLayout> {
        self.floors.first()
    }

    /// Find a floor by level name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::FloorNotFound`] if no floor matches.
    pub fn floor(&self, level: &str) -> PlanResult<&FloorLayout> {
        self.floors
            .iter()
            .find(|f| f.level.eq_ignore_ascii_case(level))
            .ok_or_else(|| PlanError::FloorNotFound(level.to_string()))
    }
}

fn non_negative(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite() && *v >= 0.0)
}

fn all_positive(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite() && *v > 0.0)
}

fn invalid(message: String) -> PlanError {
    PlanError::InvalidLayout(message)
}
