//! Classification of elements by how their geometry absorbs a transform
use flatvg_ast::element::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Elements whose geometry can't absorb a transform
pub enum Unsupported {
    /// `<image>`
    Image,
    /// `<use>`
    Use,
    /// `<clipPath>`
    ClipPath,
    /// `<linearGradient>`, when fused as an element rather than through a shape's fill
    LinearGradient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The kind of geometry an element has
pub enum ShapeKind {
    /// Any element with path data, whatever it's tag
    Path,
    /// `<rect>`
    Rect,
    /// `<circle>`
    Circle,
    /// `<ellipse>`
    Ellipse,
    /// `<polygon>`
    Polygon,
    /// `<polyline>`
    Polyline,
    /// `<text>`
    Text,
    /// `<tspan>`
    Tspan,
    /// `<g>`
    Group,
    /// An element that keeps it's transform as an attribute
    Unsupported(Unsupported),
    /// Any other element, such as `<svg>`
    Other,
}

impl ShapeKind {
    /// Classifies the element from it's current tag and attributes
    pub fn of(element: &Element) -> Self {
        if element.has_attribute("d") {
            return Self::Path;
        }
        match element.local_name().as_str() {
            "polygon" => Self::Polygon,
            "polyline" => Self::Polyline,
            "circle" => Self::Circle,
            "ellipse" => Self::Ellipse,
            "rect" => Self::Rect,
            "text" => Self::Text,
            "tspan" => Self::Tspan,
            "image" => Self::Unsupported(Unsupported::Image),
            "use" => Self::Unsupported(Unsupported::Use),
            "clipPath" => Self::Unsupported(Unsupported::ClipPath),
            "linearGradient" => Self::Unsupported(Unsupported::LinearGradient),
            "g" => Self::Group,
            _ => Self::Other,
        }
    }
}

#[test]
fn shape_kind() {
    let element = Element::create("circle");
    assert_eq!(ShapeKind::of(&element), ShapeKind::Circle);
    element.set_attribute("d", "M0 0");
    assert_eq!(ShapeKind::of(&element), ShapeKind::Path);

    assert_eq!(
        ShapeKind::of(&Element::create("svg:use")),
        ShapeKind::Unsupported(Unsupported::Use)
    );
    assert_eq!(ShapeKind::of(&Element::create("g")), ShapeKind::Group);
    assert_eq!(
        ShapeKind::of(&Element::create("radialGradient")),
        ShapeKind::Other
    );
}
