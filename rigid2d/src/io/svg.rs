use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result, ensure};
use log::info;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Circle as SvgCircle, Group, Path as SvgPath, Text, Title};

use crate::geometry::geo_traits::{CircleShape, Shape, Transformable};
use crate::geometry::primitives::{AaRect, Complex, Vector2};
use crate::geometry::shapes::{AnyShape, RoundedRectangle};

/// Number of segments used to approximate a quarter circle
const ARC_SEGMENTS: usize = 8;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgDrawOptions {
    ///The theme to use for the svg
    #[serde(default)]
    pub theme: SvgTheme,
    ///Draw the bounding box of every shape
    #[serde(default)]
    pub bboxes: bool,
    ///Mark the center of every shape, with a tick towards its orientation
    #[serde(default)]
    pub centers: bool,
    ///Mark the cached boundary points of every shape
    #[serde(default)]
    pub points: bool,
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgTheme::default(),
            bboxes: false,
            centers: true,
            points: false,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgTheme {
    pub stroke_width_multiplier: f32,
    pub shape_fill: Color,
    pub shape_fill_opacity: f32,
    pub shape_stroke: Color,
    pub bbox_stroke: Color,
    pub marker_fill: Color,
}

impl Default for SvgTheme {
    fn default() -> Self {
        SvgTheme::EARTH_TONES
    }
}

impl SvgTheme {
    pub const EARTH_TONES: SvgTheme = SvgTheme {
        stroke_width_multiplier: 2.0,
        shape_fill: Color(0xFF, 0xC8, 0x79),
        shape_fill_opacity: 0.7,
        shape_stroke: Color(0xCC, 0x82, 0x4A),
        bbox_stroke: Color(0x2D, 0x2D, 0x2D),
        marker_fill: Color(0xFF, 0x00, 0x00),
    };

    pub const GRAY: SvgTheme = SvgTheme {
        stroke_width_multiplier: 2.5,
        shape_fill: Color(0xD3, 0xD3, 0xD3),
        shape_fill_opacity: 0.9,
        shape_stroke: Color(0x7A, 0x7A, 0x7A),
        bbox_stroke: Color(0x63, 0x63, 0x63),
        marker_fill: Color(0x00, 0x00, 0x00),
    };
}

/// RGB color, (de)serialized as a `#RRGGBB` hex string
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Color(pub u8, pub u8, pub u8);

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        ensure!(
            hex.len() == 6 && hex.is_ascii(),
            "expected a color in the form #RRGGBB, got {s:?}"
        );
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).with_context(|| format!("invalid color channel in {s:?}"))
        };
        Ok(Color(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<<S as Serializer>::Ok, <S as Serializer>::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{self}"))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as Deserializer<'de>>::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Renders `shapes` into a single document, in world coordinates with the y-axis pointing up.
pub fn shapes_to_svg(shapes: &[AnyShape], options: SvgDrawOptions, title: &str) -> Document {
    let bbox = shapes
        .iter()
        .map(|s| s.bbox())
        .reduce(AaRect::bounding_rect)
        .unwrap_or(AaRect::from_center(Vector2::ZERO, Vector2::ONE));
    //pad degenerate (segment-only) scenes so the viewbox never collapses
    let vbox = AaRect::from_center(
        bbox.centroid(),
        Vector2::new(bbox.width(), bbox.height()).max(Vector2::ONE) * 0.55,
    );

    let theme = &options.theme;
    let stroke_width = f32::min(vbox.width(), vbox.height()) * 0.001 * theme.stroke_width_multiplier;
    let marker_radius = stroke_width * 2.0;

    let (shape_fill, shape_fill_opacity) = (theme.shape_fill.to_string(), theme.shape_fill_opacity.to_string());
    let (shape_stroke, bbox_stroke) = (theme.shape_stroke.to_string(), theme.bbox_stroke.to_string());
    let marker_fill = theme.marker_fill.to_string();
    let (full_stroke, half_stroke) = (stroke_width.to_string(), (0.5 * stroke_width).to_string());
    let dash = format!("{} {}", 1.0 * stroke_width, 2.0 * stroke_width);

    let shape_style = [
        ("fill", shape_fill.as_str()),
        ("fill-opacity", shape_fill_opacity.as_str()),
        ("stroke", shape_stroke.as_str()),
        ("stroke-width", full_stroke.as_str()),
        ("stroke-linejoin", "round"),
    ];
    let bbox_style = [
        ("fill", "none"),
        ("stroke", bbox_stroke.as_str()),
        ("stroke-width", half_stroke.as_str()),
        ("stroke-dasharray", dash.as_str()),
    ];
    let marker_style = [("fill", marker_fill.as_str())];
    let tick_style = [("stroke", marker_fill.as_str()), ("stroke-width", full_stroke.as_str())];

    //flip the y-axis, svg points it down
    let mut shapes_group = Group::new().set("id", "shapes").set("transform", "scale(1 -1)");

    for (i, shape) in shapes.iter().enumerate() {
        let mut group = Group::new()
            .set("id", format!("{}_{i}", shape.kind()))
            .add(Title::new(format!(
                "{}, center: {}, orientation: {}, area: {:.3}",
                shape.kind(),
                shape.center(),
                shape.orientation(),
                shape.area()
            )));

        group = match shape {
            AnyShape::Circle(circle) => group.add(circle_element(circle.center(), circle.radius(), &shape_style)),
            _ => group.add(data_to_path(shape_data(shape), &shape_style)),
        };

        if options.bboxes {
            group = group.add(data_to_path(aa_rect_data(shape.bbox()), &bbox_style));
        }
        if options.points {
            for p in boundary_points(shape) {
                group = group.add(circle_element(p, marker_radius, &marker_style));
            }
        }
        if options.centers {
            let tick = orientation_tick(shape.center(), shape.orientation(), marker_radius * 4.0);
            group = group
                .add(circle_element(shape.center(), marker_radius, &marker_style))
                .add(data_to_path(tick, &tick_style));
        }
        shapes_group = shapes_group.add(group);
    }

    let label = {
        let font_size = f32::min(vbox.width(), vbox.height()) * 0.025;
        Text::new(format!("shapes: {} | {}", shapes.len(), title))
            .set("x", vbox.x_min)
            .set("y", -vbox.y_max + font_size)
            .set("font-size", font_size)
            .set("font-family", "monospace")
            .set("font-weight", "500")
    };

    let vbox_svg = (vbox.x_min, -vbox.y_max, vbox.width(), vbox.height());

    Document::new()
        .set("viewBox", vbox_svg)
        .add(shapes_group)
        .add(label)
}

/// Writes `document` to `path`
pub fn write_svg(document: &Document, path: &Path) -> Result<()> {
    svg::save(path, document).with_context(|| format!("failed to write svg file {}", path.display()))?;
    info!(
        "svg written to {:?}",
        fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
    );
    Ok(())
}

pub fn data_to_path(data: Data, params: &[(&str, &str)]) -> SvgPath {
    let mut path = SvgPath::new();
    for param in params {
        path = path.set(param.0, param.1)
    }
    path.set("d", data)
}

fn circle_element(center: Vector2, radius: f32, params: &[(&str, &str)]) -> SvgCircle {
    let mut circle = SvgCircle::new()
        .set("cx", center.x)
        .set("cy", center.y)
        .set("r", radius);
    for param in params {
        circle = circle.set(param.0, param.1)
    }
    circle
}

/// Outline of a shape as path data, closed unless the shape is a segment
pub fn shape_data(shape: &AnyShape) -> Data {
    match shape {
        AnyShape::LineSegment(segment) => Data::new()
            .move_to::<(f32, f32)>(segment.point_a().into())
            .line_to::<(f32, f32)>(segment.point_b().into()),
        AnyShape::RoundedRectangle(rect) => polygon_data(&rounded_rectangle_outline(rect)),
        AnyShape::Circle(circle) => {
            //approximated, only used when a circle is drawn as a path
            let outline = (0..4 * ARC_SEGMENTS)
                .map(|i| {
                    let angle = std::f32::consts::TAU * i as f32 / (4 * ARC_SEGMENTS) as f32;
                    circle.center() + Complex::from_angle(angle).direction() * circle.radius()
                })
                .collect::<Vec<_>>();
            polygon_data(&outline)
        }
        _ => polygon_data(&boundary_points(shape)),
    }
}

pub fn polygon_data(points: &[Vector2]) -> Data {
    let Some((first, rest)) = points.split_first() else {
        return Data::new();
    };
    let mut data = Data::new().move_to::<(f32, f32)>((*first).into());
    for p in rest {
        data = data.line_to::<(f32, f32)>((*p).into());
    }
    data.close()
}

pub fn aa_rect_data(rect: AaRect) -> Data {
    Data::new()
        .move_to((rect.x_min, rect.y_min))
        .line_to((rect.x_max, rect.y_min))
        .line_to((rect.x_max, rect.y_max))
        .line_to((rect.x_min, rect.y_max))
        .close()
}

fn orientation_tick(center: Vector2, orientation: Complex, length: f32) -> Data {
    let end = center + orientation.normalized().direction() * length;
    Data::new()
        .move_to::<(f32, f32)>(center.into())
        .line_to::<(f32, f32)>(end.into())
}

/// Cached boundary points of a shape, empty for circles
fn boundary_points(shape: &AnyShape) -> Vec<Vector2> {
    match shape {
        AnyShape::LineSegment(s) => s.points().to_vec(),
        AnyShape::Triangle(t) => t.points().to_vec(),
        AnyShape::RegularTriangle(t) => t.points().to_vec(),
        AnyShape::Square(s) => s.points().to_vec(),
        AnyShape::Rectangle(r) => r.points().to_vec(),
        AnyShape::RoundedRectangle(r) => r.points().to_vec(),
        AnyShape::RegularPolygon(p) => p.points().to_vec(),
        AnyShape::Circle(_) => vec![],
    }
}

/// Straight edges joined by polyline approximations of the corner arcs
fn rounded_rectangle_outline(rect: &RoundedRectangle) -> Vec<Vector2> {
    if rect.corner_radius() == 0.0 {
        return rect.points().to_vec();
    }
    let orientation = rect.orientation();
    let mut outline = Vec::with_capacity(4 * (ARC_SEGMENTS + 1));
    for (corner, center) in rect.corner_centers().iter().enumerate() {
        //arc of corner A starts at the right edge, every next corner is a quarter turn further
        let start_angle = corner as f32 * std::f32::consts::FRAC_PI_2;
        for i in 0..=ARC_SEGMENTS {
            let angle = start_angle + std::f32::consts::FRAC_PI_2 * i as f32 / ARC_SEGMENTS as f32;
            let local = Complex::from_angle(angle).direction() * rect.corner_radius();
            outline.push(*center + local.rotated_by(orientation));
        }
    }
    outline
}
