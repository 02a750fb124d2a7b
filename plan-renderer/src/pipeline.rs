//! Layered floor plan drawing.
//!
//! [`draw_floor_plan`] repaints the whole plan every time it is called. It
//! is a pure function of the layout, the view transform and the display
//! options: the same inputs always issue the same draw calls. Layers are
//! painted back to front in the order of [`Layer`]; later layers may cover
//! earlier ones.
//!
//! Everything after the clear is drawn inside one scope translated by the
//! view offset. Plan lengths are multiplied by the view scale explicitly, so
//! stroke widths and font sizes stay in screen pixels at every zoom level.

use plan_core::{DisplayOptions, FloorLayout, Opening, PlanRect, Point, ViewTransform};
use serde::{Deserialize, Serialize};

use crate::style::{
    self, LineCap, StrokeStyle, TextAlign, TextBaseline, TextStyle, BACKGROUND, CORRIDOR_FILL,
    CORRIDOR_OUTLINE, DIMENSION, DOOR_CUT, DOOR_SWING, GRID_LINE, LABEL_MUTED, LABEL_TEXT,
    ROOM_OUTLINE, STAIRS_FILL, STAIRS_LINE, TITLE_TEXT, WINDOW_FILL, WINDOW_FRAME,
};
use crate::surface::{DrawSurface, PixelRect, TransformScope};

/// Physical grid spacing in feet.
pub const GRID_SPACING_FT: f64 = 5.0;
/// Number of treads a stair footprint is divided into.
pub const STAIR_STEPS: u32 = 10;
/// Gap between the plan edge and a dimension run, in pixels.
pub const DIMENSION_GAP_PX: f64 = 20.0;
/// Half-length of a dimension end tick, in pixels.
pub const DIMENSION_TICK_PX: f64 = 5.0;
/// Vertical position of the title baseline above the plan origin, in pixels.
pub const TITLE_OFFSET_PX: f64 = 20.0;

/// Drawing layers, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Background clear.
    Clear,
    /// 5 ft grid.
    Grid,
    /// Room fills and outlines.
    Rooms,
    /// Wall segments.
    Walls,
    /// Door cuts, swings and leaves.
    Doors,
    /// Window frames.
    Windows,
    /// Room names and areas.
    Labels,
    /// Overall width and height runs.
    Dimensions,
    /// Corridor fills.
    Corridors,
    /// Stair footprint and treads.
    Stairs,
    /// Level title.
    Title,
}

/// What one frame drew.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Layers that ran, in paint order.
    pub layers: Vec<Layer>,
    /// Grid lines stroked.
    pub grid_lines: usize,
    /// Rooms filled and outlined.
    pub rooms_filled: usize,
    /// Walls stroked.
    pub walls_stroked: usize,
    /// Doors drawn.
    pub doors_drawn: usize,
    /// Windows drawn.
    pub windows_drawn: usize,
    /// Rooms labeled.
    pub rooms_labeled: usize,
    /// Dimension runs drawn.
    pub dimension_runs: usize,
    /// Corridors filled.
    pub corridors_filled: usize,
    /// Stair tread lines drawn.
    pub stair_treads: usize,
}

/// Paint one full frame of `layout` onto `surface`.
pub fn draw_floor_plan<S: DrawSurface + ?Sized>(
    surface: &mut S,
    layout: &FloorLayout,
    view: ViewTransform,
    options: &DisplayOptions,
) -> FrameReport {
    let mut report = FrameReport::default();
    let scale = view.scale();

    surface.clear(BACKGROUND);
    report.layers.push(Layer::Clear);

    {
        let mut plan = TransformScope::new(surface);
        plan.translate(view.offset.x, view.offset.y);
        let s = &mut *plan;

        if options.show_grid {
            report.grid_lines = draw_grid(s, layout, scale);
            report.layers.push(Layer::Grid);
        }

        report.rooms_filled = draw_rooms(s, layout, scale);
        report.layers.push(Layer::Rooms);

        report.walls_stroked = draw_walls(s, layout, scale);
        report.layers.push(Layer::Walls);

        report.doors_drawn = draw_doors(s, layout, scale);
        report.layers.push(Layer::Doors);

        report.windows_drawn = draw_windows(s, layout, scale);
        report.layers.push(Layer::Windows);

        if options.show_room_labels {
            report.rooms_labeled = draw_labels(s, layout, scale);
            report.layers.push(Layer::Labels);
        }

        if options.show_dimensions {
            report.dimension_runs = draw_dimensions(s, layout, scale);
            report.layers.push(Layer::Dimensions);
        }

        report.corridors_filled = draw_corridors(s, layout, scale);
        report.layers.push(Layer::Corridors);

        if let Some(stairs) = layout.stairs() {
            report.stair_treads = draw_stairs(s, stairs, scale);
            report.layers.push(Layer::Stairs);
        }

        draw_title(s, layout);
        report.layers.push(Layer::Title);
    }

    tracing::debug!(
        rooms = report.rooms_filled,
        walls = report.walls_stroked,
        doors = report.doors_drawn,
        windows = report.windows_drawn,
        scale,
        "Drew floor '{}'",
        layout.level
    );
    report
}

fn pixel_rect(rect: &PlanRect, scale: f64) -> PixelRect {
    PixelRect::new(
        rect.x * scale,
        rect.y * scale,
        rect.width * scale,
        rect.height * scale,
    )
}

/// Number of grid steps covering `extent`, guarding against runaway loops on
/// absurd bounding boxes.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn grid_steps(extent: f64) -> usize {
    if !extent.is_finite() || extent <= 0.0 {
        return 0;
    }
    ((extent / GRID_SPACING_FT).floor() as usize).min(10_000)
}

#[allow(clippy::cast_precision_loss)]
fn draw_grid<S: DrawSurface + ?Sized>(s: &mut S, layout: &FloorLayout, scale: f64) -> usize {
    let bb = layout.bounding_box;
    let (w, h) = (bb.width * scale, bb.height * scale);
    let stroke = StrokeStyle::new(GRID_LINE, 0.5);
    let mut lines = 0;

    for i in 0..=grid_steps(bb.width) {
        let x = i as f64 * GRID_SPACING_FT * scale;
        s.stroke_line(Point::new(x, 0.0), Point::new(x, h), &stroke);
        lines += 1;
    }
    for i in 0..=grid_steps(bb.height) {
        let y = i as f64 * GRID_SPACING_FT * scale;
        s.stroke_line(Point::new(0.0, y), Point::new(w, y), &stroke);
        lines += 1;
    }

    tracing::trace!("Grid: {lines} lines");
    lines
}

fn draw_rooms<S: DrawSurface + ?Sized>(s: &mut S, layout: &FloorLayout, scale: f64) -> usize {
    let outline = StrokeStyle::new(ROOM_OUTLINE, 1.0);
    for room in &layout.rooms {
        let rect = pixel_rect(&room.rect(), scale);
        s.fill_rect(rect, style::room_fill(&room.kind));
        s.stroke_rect(rect, &outline);
    }
    layout.rooms.len()
}

fn draw_walls<S: DrawSurface + ?Sized>(s: &mut S, layout: &FloorLayout, scale: f64) -> usize {
    for wall in &layout.walls {
        let stroke = StrokeStyle::new(style::wall_stroke(wall.kind), wall.thickness * scale)
            .with_cap(LineCap::Square);
        s.stroke_line(
            Point::new(wall.x1 * scale, wall.y1 * scale),
            Point::new(wall.x2 * scale, wall.y2 * scale),
            &stroke,
        );
    }
    layout.walls.len()
}

/// Open a scope at the opening's anchor, rotated into its local frame.
fn opening_frame<'a, S: DrawSurface + ?Sized>(
    s: &'a mut S,
    opening: &Opening,
    scale: f64,
) -> TransformScope<'a, S> {
    let mut local = TransformScope::new(s);
    local.translate(opening.x * scale, opening.y * scale);
    local.rotate(opening.normalized_rotation());
    local
}

fn draw_doors<S: DrawSurface + ?Sized>(s: &mut S, layout: &FloorLayout, scale: f64) -> usize {
    let swing = StrokeStyle::new(DOOR_SWING, 1.0);
    let mut count = 0;

    for door in layout.rooms.iter().flat_map(|r| &r.doors) {
        let width = door.width * scale;
        let depth = door.height * scale;
        let mut local = opening_frame(s, door, scale);

        local.fill_rect(PixelRect::new(0.0, -depth / 2.0, width, depth), DOOR_CUT);
        local.stroke_arc(Point::new(0.0, 0.0), width, 0.0, 90.0, &swing);
        local.stroke_line(Point::new(0.0, 0.0), Point::new(0.0, width), &swing);
        count += 1;
    }
    count
}

fn draw_windows<S: DrawSurface + ?Sized>(s: &mut S, layout: &FloorLayout, scale: f64) -> usize {
    let frame = StrokeStyle::new(WINDOW_FRAME, 1.0);
    let mut count = 0;

    for window in layout.rooms.iter().flat_map(|r| &r.windows) {
        let width = window.width * scale;
        let depth = window.height * scale;
        let mut local = opening_frame(s, window, scale);

        let rect = PixelRect::new(0.0, -depth / 2.0, width, depth);
        local.fill_rect(rect, WINDOW_FILL);
        local.stroke_rect(rect, &frame);
        local.stroke_line(Point::new(0.0, 0.0), Point::new(width, 0.0), &frame);
        count += 1;
    }
    count
}

fn draw_labels<S: DrawSurface + ?Sized>(s: &mut S, layout: &FloorLayout, scale: f64) -> usize {
    let name_style = TextStyle::centered(12.0, LABEL_TEXT).bold();
    let area_style = TextStyle::centered(10.0, LABEL_MUTED);

    for room in &layout.rooms {
        let (cx, cy) = room.center();
        let (cx, cy) = (cx * scale, cy * scale);
        s.fill_text(&room.name, Point::new(cx, cy - 7.0), &name_style);
        s.fill_text(
            &format!("{:.0} sq ft", room.area_sq_ft()),
            Point::new(cx, cy + 8.0),
            &area_style,
        );
    }
    layout.rooms.len()
}

/// Feet with one decimal and a foot mark, e.g. `40.0'`.
#[must_use]
pub fn format_feet(feet: f64) -> String {
    format!("{feet:.1}'")
}

fn draw_dimensions<S: DrawSurface + ?Sized>(s: &mut S, layout: &FloorLayout, scale: f64) -> usize {
    let bb = layout.bounding_box;
    let (w, h) = (bb.width * scale, bb.height * scale);
    let stroke = StrokeStyle::new(DIMENSION, 1.0);
    let label = TextStyle::centered(11.0, DIMENSION);
    let tick = DIMENSION_TICK_PX;

    // Width, below the plan.
    let y = h + DIMENSION_GAP_PX;
    s.stroke_line(Point::new(0.0, y), Point::new(w, y), &stroke);
    s.stroke_line(Point::new(0.0, y - tick), Point::new(0.0, y + tick), &stroke);
    s.stroke_line(Point::new(w, y - tick), Point::new(w, y + tick), &stroke);
    s.fill_text(&format_feet(bb.width), Point::new(w / 2.0, y + 12.0), &label);

    // Height, right of the plan, label reading bottom to top.
    let x = w + DIMENSION_GAP_PX;
    s.stroke_line(Point::new(x, 0.0), Point::new(x, h), &stroke);
    s.stroke_line(Point::new(x - tick, 0.0), Point::new(x + tick, 0.0), &stroke);
    s.stroke_line(Point::new(x - tick, h), Point::new(x + tick, h), &stroke);
    {
        let mut rotated = TransformScope::new(&mut *s);
        rotated.translate(x + 12.0, h / 2.0);
        rotated.rotate(-90.0);
        rotated.fill_text(&format_feet(bb.height), Point::new(0.0, 0.0), &label);
    }

    2
}

fn draw_corridors<S: DrawSurface + ?Sized>(s: &mut S, layout: &FloorLayout, scale: f64) -> usize {
    let outline = StrokeStyle::new(CORRIDOR_OUTLINE, 1.0);
    for corridor in layout.corridors() {
        let rect = pixel_rect(corridor, scale);
        s.fill_rect(rect, CORRIDOR_FILL);
        s.stroke_rect(rect, &outline);
    }
    layout.corridors().len()
}

fn draw_stairs<S: DrawSurface + ?Sized>(s: &mut S, stairs: &PlanRect, scale: f64) -> usize {
    let rect = pixel_rect(stairs, scale).normalized();
    let line = StrokeStyle::new(STAIRS_LINE, 1.0);

    s.fill_rect(rect, STAIRS_FILL);
    s.stroke_rect(rect, &line);

    let tread = rect.height / f64::from(STAIR_STEPS);
    let mut treads = 0;
    for i in 1..STAIR_STEPS {
        let y = rect.y + tread * f64::from(i);
        s.stroke_line(Point::new(rect.x, y), Point::new(rect.x + rect.width, y), &line);
        treads += 1;
    }

    s.fill_text(
        "STAIRS",
        rect.center(),
        &TextStyle::centered(10.0, STAIRS_LINE).bold(),
    );
    treads
}

fn draw_title<S: DrawSurface + ?Sized>(s: &mut S, layout: &FloorLayout) {
    let style = TextStyle {
        size: 16.0,
        bold: true,
        color: TITLE_TEXT,
        align: TextAlign::Left,
        baseline: TextBaseline::Alphabetic,
    };
    s.fill_text(&layout.level, Point::new(0.0, -TITLE_OFFSET_PX), &style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::{DrawCommand, RecordingSurface};
    use plan_core::{RoomLayout, SurfaceSize, WallKind, WallLayout};

    fn render(layout: &FloorLayout, options: &DisplayOptions) -> (RecordingSurface, FrameReport) {
        let mut surface = RecordingSurface::new(SurfaceSize::default());
        let view = ViewTransform::new(10.0, Point::new(50.0, 50.0));
        let report = draw_floor_plan(&mut surface, layout, view, options);
        (surface, report)
    }

    #[test]
    fn test_empty_layout_paints_grid_and_title() {
        let layout = FloorLayout::new("Ground Floor", 40.0, 30.0);
        let (surface, report) = render(&layout, &DisplayOptions::default());

        assert_eq!(report.rooms_filled, 0);
        assert_eq!(report.grid_lines, 9 + 7);
        assert!(surface.texts().any(|t| t == "Ground Floor"));
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn test_layer_order_with_everything_enabled() {
        let layout = FloorLayout::new("L1", 20.0, 20.0).with_circulation(plan_core::Circulation {
            corridors: vec![PlanRect::new(0.0, 10.0, 20.0, 3.0)],
            stairs: Some(PlanRect::new(15.0, 0.0, 4.0, 10.0)),
        });
        let (_, report) = render(&layout, &DisplayOptions::default());
        assert_eq!(
            report.layers,
            vec![
                Layer::Clear,
                Layer::Grid,
                Layer::Rooms,
                Layer::Walls,
                Layer::Doors,
                Layer::Windows,
                Layer::Labels,
                Layer::Dimensions,
                Layer::Corridors,
                Layer::Stairs,
                Layer::Title,
            ]
        );
        assert_eq!(report.stair_treads, 9);
        assert_eq!(report.corridors_filled, 1);
    }

    #[test]
    fn test_optional_layers_skipped() {
        let layout = FloorLayout::new("L1", 20.0, 20.0);
        let (surface, report) = render(&layout, &DisplayOptions::default().bare());
        assert_eq!(
            report.layers,
            vec![
                Layer::Clear,
                Layer::Rooms,
                Layer::Walls,
                Layer::Doors,
                Layer::Windows,
                Layer::Corridors,
                Layer::Title,
            ]
        );
        assert_eq!(report.grid_lines, 0);
        assert_eq!(surface.texts().count(), 1);
    }

    #[test]
    fn test_wall_stroke_width_and_cap() {
        let layout = FloorLayout::new("L1", 20.0, 20.0).with_wall(WallLayout {
            x1: 0.0,
            y1: 0.0,
            x2: 20.0,
            y2: 0.0,
            thickness: 0.5,
            kind: WallKind::Exterior,
        });
        let (surface, _) = render(&layout, &DisplayOptions::default().bare());
        let wall = surface
            .commands()
            .find_map(|c| match c {
                DrawCommand::Line { from, to, stroke } if stroke.cap == LineCap::Square => {
                    Some((*from, *to, *stroke))
                }
                _ => None,
            })
            .expect("wall line");
        assert_eq!(wall.0, Point::new(0.0, 0.0));
        assert_eq!(wall.1, Point::new(200.0, 0.0));
        assert!((wall.2.width - 5.0).abs() < f64::EPSILON);
        assert_eq!(wall.2.color, style::wall_stroke(WallKind::Exterior));
    }

    #[test]
    fn test_door_drawn_in_rotated_local_frame() {
        let mut room = RoomLayout::new("Bed", "bedroom", PlanRect::new(0.0, 0.0, 12.0, 10.0));
        room.doors.push(Opening {
            x: 4.0,
            y: 10.0,
            width: 3.0,
            height: 0.5,
            rotation: -90.0,
            kind: Some("single".to_string()),
        });
        let layout = FloorLayout::new("L1", 20.0, 20.0).with_room(room);
        let (surface, report) = render(&layout, &DisplayOptions::default().bare());
        assert_eq!(report.doors_drawn, 1);

        let arc = surface
            .draws()
            .iter()
            .find(|d| matches!(d.command, DrawCommand::Arc { .. }))
            .expect("swing arc");
        if let DrawCommand::Arc { radius, .. } = arc.command {
            assert!((radius - 30.0).abs() < f64::EPSILON);
        }
        // Local origin is the door anchor in screen space.
        let origin = arc.to_surface(Point::new(0.0, 0.0));
        assert!((origin.x - 90.0).abs() < 1e-3);
        assert!((origin.y - 150.0).abs() < 1e-3);
        // Rotated by 270 degrees: local +x points up the screen.
        let along = arc.to_surface(Point::new(10.0, 0.0));
        assert!((along.x - 90.0).abs() < 1e-3);
        assert!((along.y - 140.0).abs() < 1e-3);

        let cut = surface
            .draws()
            .iter()
            .find(|d| matches!(d.command, DrawCommand::FillRect { color, .. } if color == DOOR_CUT))
            .expect("wall cut");
        let DrawCommand::FillRect { rect, .. } = cut.command else {
            unreachable!()
        };
        assert_eq!(rect, PixelRect::new(0.0, -2.5, 30.0, 5.0));
        assert_eq!(cut.transform, arc.transform);

        let leaf = surface
            .draws()
            .iter()
            .find(|d| matches!(d.command, DrawCommand::Line { stroke, .. } if stroke.color == DOOR_SWING))
            .expect("door leaf");
        let DrawCommand::Line { from, to, .. } = leaf.command else {
            unreachable!()
        };
        assert_eq!((from, to), (Point::new(0.0, 0.0), Point::new(0.0, 30.0)));
        // Local +y points right after the rotation.
        let tip = leaf.to_surface(to);
        assert!((tip.x - 120.0).abs() < 1e-3);
        assert!((tip.y - 150.0).abs() < 1e-3);
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn test_window_drawn_in_rotated_local_frame() {
        let mut room = RoomLayout::new("Bed", "bedroom", PlanRect::new(0.0, 0.0, 12.0, 10.0));
        room.windows.push(Opening {
            x: 2.0,
            y: 0.0,
            width: 4.0,
            height: 0.5,
            rotation: 90.0,
            kind: None,
        });
        let layout = FloorLayout::new("L1", 20.0, 20.0).with_room(room);
        let (surface, report) = render(&layout, &DisplayOptions::default().bare());
        assert_eq!(report.windows_drawn, 1);

        let window: Vec<_> = surface
            .draws()
            .iter()
            .filter(|d| match d.command {
                DrawCommand::FillRect { color, .. } => color == WINDOW_FILL,
                DrawCommand::StrokeRect { stroke, .. } | DrawCommand::Line { stroke, .. } => {
                    stroke.color == WINDOW_FRAME
                }
                _ => false,
            })
            .collect();
        assert_eq!(window.len(), 3);

        let pane = PixelRect::new(0.0, -2.5, 40.0, 5.0);
        assert!(matches!(window[0].command, DrawCommand::FillRect { rect, .. } if rect == pane));
        assert!(matches!(window[1].command, DrawCommand::StrokeRect { rect, .. } if rect == pane));
        let DrawCommand::Line { from, to, .. } = window[2].command else {
            panic!("expected center line, got {:?}", window[2].command);
        };
        assert_eq!((from, to), (Point::new(0.0, 0.0), Point::new(40.0, 0.0)));

        // Anchor (2, 0) ft at 10 px/ft plus the (50, 50) offset.
        let origin = window[2].to_surface(from);
        assert!((origin.x - 70.0).abs() < 1e-3);
        assert!((origin.y - 50.0).abs() < 1e-3);
        // Rotated by 90 degrees: local +x points down the screen.
        let end = window[2].to_surface(to);
        assert!((end.x - 70.0).abs() < 1e-3);
        assert!((end.y - 90.0).abs() < 1e-3);
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn test_labels_show_rounded_area() {
        let room = RoomLayout::new("Office", "office", PlanRect::new(0.0, 0.0, 10.4, 10.0));
        let layout = FloorLayout::new("L1", 20.0, 20.0).with_room(room);
        let options = DisplayOptions {
            show_room_labels: true,
            ..DisplayOptions::default().bare()
        };
        let (surface, report) = render(&layout, &options);
        assert_eq!(report.rooms_labeled, 1);
        let texts: Vec<_> = surface.texts().collect();
        assert!(texts.contains(&"Office"));
        assert!(texts.contains(&"104 sq ft"));
    }

    #[test]
    fn test_dimension_labels() {
        let layout = FloorLayout::new("L1", 40.0, 30.5);
        let options = DisplayOptions {
            show_dimensions: true,
            ..DisplayOptions::default().bare()
        };
        let (surface, report) = render(&layout, &options);
        assert_eq!(report.dimension_runs, 2);
        let texts: Vec<_> = surface.texts().collect();
        assert!(texts.contains(&"40.0'"));
        assert!(texts.contains(&"30.5'"));
    }

    #[test]
    fn test_report_serializes_layer_names() {
        let layout = FloorLayout::new("L1", 10.0, 10.0);
        let (_, report) = render(&layout, &DisplayOptions::default().bare());
        let json = serde_json::to_value(&report).expect("serialize");
        assert_eq!(json["layers"][0], "clear");
        assert_eq!(json["layers"][6], "title");
        assert_eq!(json["grid_lines"], 0);
    }

    #[test]
    fn test_format_feet() {
        assert_eq!(format_feet(12.0), "12.0'");
        assert_eq!(format_feet(7.24), "7.2'");
    }
}
