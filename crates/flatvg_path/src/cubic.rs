//! Paths where every drawn segment is a cubic Bézier curve
use flatvg_parse::transform::Matrix;

use crate::{command::Data, Path};

/// An `x`, `y` coordinate
pub type Point = [f64; 2];

#[derive(Debug, Clone, PartialEq)]
/// A run of connected cubic segments, started by a move
pub struct Subpath {
    /// The point the subpath moves to before drawing
    pub start: Point,
    /// The first control point, second control point, and end point of each segment
    pub segments: Vec<[Point; 3]>,
    /// Whether the subpath is closed back to it's start
    pub closed: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
/// A path converted so that lines, quadratics, and arcs are all cubic Bézier curves.
///
/// Unlike other path commands, the shape of a cubic curve is exactly preserved by mapping
/// it's points through an affine transform.
pub struct CubicPath(pub Vec<Subpath>);

impl Subpath {
    fn new(start: Point) -> Self {
        Self {
            start,
            segments: vec![],
            closed: false,
        }
    }

    fn end(&self) -> Point {
        self.segments.last().map_or(self.start, |[_, _, end]| *end)
    }

    fn line_to(&mut self, to: Point) {
        let from = self.end();
        self.segments.push([from, to, to]);
    }

    fn quad_to(&mut self, control: Point, to: Point) {
        let from = self.end();
        self.segments
            .push([elevate(from, control), elevate(to, control), to]);
    }

    fn arc_to(&mut self, args: [f64; 7]) {
        let [rx, ry, x_rotation, large_arc, sweep, x, y] = args;
        let from = self.end();
        let svg_arc = kurbo::SvgArc {
            from: kurbo::Point::new(from[0], from[1]),
            to: kurbo::Point::new(x, y),
            radii: kurbo::Vec2::new(rx, ry),
            x_rotation: x_rotation.to_radians(),
            large_arc: large_arc != 0.0,
            sweep: sweep != 0.0,
        };

        match kurbo::Arc::from_svg_arc(&svg_arc) {
            Some(arc) => {
                arc.to_cubic_beziers(0.1, |p1, p2, p| {
                    self.segments
                        .push([[p1.x, p1.y], [p2.x, p2.y], [p.x, p.y]]);
                });
            }
            None => {
                log::debug!("arc to {x},{y} is degenerate, drawing as a line");
                self.line_to([x, y]);
            }
        }
    }
}

/// The cubic control point two thirds of the way from `end` to the quadratic `control`
fn elevate(end: Point, control: Point) -> Point {
    [
        (end[0] + 2.0 * control[0]) / 3.0,
        (end[1] + 2.0 * control[1]) / 3.0,
    ]
}

fn reflect(point: Point, about: Point) -> Point {
    [2.0 * about[0] - point[0], 2.0 * about[1] - point[1]]
}

/// Returns the open subpath being drawn, starting a new one at `at` if the last was closed
fn open_subpath<'a>(
    current: &'a mut Option<Subpath>,
    subpaths: &mut Vec<Subpath>,
    at: Point,
) -> &'a mut Subpath {
    if current.as_ref().is_some_and(|subpath| subpath.closed) {
        subpaths.extend(current.take());
    }
    current.get_or_insert_with(|| Subpath::new(at))
}

impl Path {
    /// Converts the path into absolute cubic Bézier segments.
    ///
    /// Lines become cubics with control points at their ends, quadratics are elevated, and
    /// arcs are approximated with one or more cubics.
    pub fn to_cubic(&self) -> CubicPath {
        let mut subpaths = vec![];
        let mut current: Option<Subpath> = None;
        let mut position = [0.0, 0.0];
        let mut last_cubic_control: Option<Point> = None;
        let mut last_quad_control: Option<Point> = None;

        for command in self.to_absolute().0 {
            let command = command.as_explicit();
            if let Data::MoveTo(to) = command {
                subpaths.extend(current.take());
                current = Some(Subpath::new(*to));
                position = *to;
                last_cubic_control = None;
                last_quad_control = None;
                continue;
            }
            if let Data::ClosePath = command {
                if let Some(subpath) = current.as_mut() {
                    subpath.closed = true;
                    position = subpath.start;
                }
                last_cubic_control = None;
                last_quad_control = None;
                continue;
            }

            let subpath = open_subpath(&mut current, &mut subpaths, position);
            let mut cubic_control = None;
            let mut quad_control = None;
            match *command {
                Data::LineTo(to) => subpath.line_to(to),
                Data::HorizontalLineTo([x]) => subpath.line_to([x, subpath.end()[1]]),
                Data::VerticalLineTo([y]) => subpath.line_to([subpath.end()[0], y]),
                Data::CubicBezierTo([x1, y1, x2, y2, x, y]) => {
                    subpath.segments.push([[x1, y1], [x2, y2], [x, y]]);
                    cubic_control = Some([x2, y2]);
                }
                Data::SmoothBezierTo([x2, y2, x, y]) => {
                    let from = subpath.end();
                    let first = last_cubic_control.map_or(from, |control| reflect(control, from));
                    subpath.segments.push([first, [x2, y2], [x, y]]);
                    cubic_control = Some([x2, y2]);
                }
                Data::QuadraticBezierTo([x1, y1, x, y]) => {
                    subpath.quad_to([x1, y1], [x, y]);
                    quad_control = Some([x1, y1]);
                }
                Data::SmoothQuadraticBezierTo(to) => {
                    let from = subpath.end();
                    let control = last_quad_control.map_or(from, |control| reflect(control, from));
                    subpath.quad_to(control, to);
                    quad_control = Some(control);
                }
                Data::ArcTo(args) => subpath.arc_to(args),
                ref command => unreachable!("{command:?} should be absolute and drawing"),
            }
            position = subpath.end();
            last_cubic_control = cubic_control;
            last_quad_control = quad_control;
        }
        subpaths.extend(current);
        CubicPath(subpaths)
    }
}

impl CubicPath {
    /// Maps every point of the path through the transform
    pub fn transform(&mut self, matrix: &Matrix) {
        let map = |[x, y]: &mut Point| {
            let (new_x, new_y) = matrix.apply(*x, *y);
            *x = new_x;
            *y = new_y;
        };
        for subpath in &mut self.0 {
            map(&mut subpath.start);
            subpath.segments.iter_mut().flatten().for_each(map);
        }
    }
}

impl From<CubicPath> for Path {
    fn from(value: CubicPath) -> Self {
        let mut data = vec![];
        for subpath in value.0 {
            data.push(Data::MoveTo(subpath.start));
            data.extend(
                subpath
                    .segments
                    .into_iter()
                    .map(|[[x1, y1], [x2, y2], [x, y]]| Data::CubicBezierTo([x1, y1, x2, y2, x, y])),
            );
            if subpath.closed {
                data.push(Data::ClosePath);
            }
        }
        Path(data)
    }
}

#[cfg(test)]
mod test {
    use flatvg_parse::{transform::Matrix, Parse};
    use pretty_assertions::assert_eq;

    use crate::Path;

    fn fuse(definition: &str, matrix: &Matrix) -> String {
        let mut cubic = Path::parse_string(definition).unwrap().to_cubic();
        cubic.transform(matrix);
        Path::from(cubic).to_string()
    }

    #[test]
    fn lines() {
        assert_eq!(
            fuse("M0 0 L10 0 V10 h-10 z", &Matrix::IDENTITY),
            "M0 0 C0 0 10 0 10 0 C10 0 10 10 10 10 C10 10 0 10 0 10 Z"
        );
        assert_eq!(
            fuse("M0 0 L10 0", &Matrix::translate(5.0, 5.0)),
            "M5 5 C5 5 15 5 15 5"
        );
    }

    #[test]
    fn curves() {
        assert_eq!(
            fuse("M0 0 Q3 3 6 0 T12 0", &Matrix::IDENTITY),
            "M0 0 C2 2 4 2 6 0 C8 -2 10 -2 12 0"
        );
        assert_eq!(
            fuse("M0 0 C0 1 2 1 2 0 S4 -1 4 0", &Matrix::scale(2.0, 1.0)),
            "M0 0 C0 1 4 1 4 0 C4 -1 8 -1 8 0"
        );
    }

    #[test]
    fn subpaths() {
        let cubic = Path::parse_string("M0 0 L1 0 Z L0 1 M5 5")
            .unwrap()
            .to_cubic();
        assert_eq!(cubic.0.len(), 3);
        assert!(cubic.0[0].closed);
        assert_eq!(cubic.0[1].start, [0.0, 0.0]);
        assert_eq!(cubic.0[1].segments.len(), 1);
        assert_eq!(cubic.0[2].start, [5.0, 5.0]);
        assert!(cubic.0[2].segments.is_empty());
    }

    #[test]
    fn arcs() {
        let cubic = Path::parse_string("M0 0 A10 10 0 0 1 20 0")
            .unwrap()
            .to_cubic();
        let segments = &cubic.0[0].segments;
        assert!(!segments.is_empty());
        let [_, _, end] = segments[segments.len() - 1];
        assert!((end[0] - 20.0).abs() < 1e-9 && end[1].abs() < 1e-9);

        // zero radii are drawn as a line
        assert_eq!(
            Path::from(Path::parse_string("M0 0 A0 0 0 0 1 20 0").unwrap().to_cubic())
                .to_string(),
            "M0 0 C0 0 20 0 20 0"
        );
    }
}
