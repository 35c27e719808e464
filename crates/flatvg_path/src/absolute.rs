//! Conversion of relative commands to their absolute equivalent
use crate::{command::Data, Path};

impl Path {
    #[must_use]
    /// Returns an equivalent path where every command goes to an absolute position.
    ///
    /// Implicit commands stay implicit, so the result has the same number of commands.
    pub fn to_absolute(&self) -> Self {
        let mut current = [0.0, 0.0];
        let mut start = [0.0, 0.0];
        let data = self
            .0
            .iter()
            .map(|command| {
                let absolute = to_absolute(command.as_explicit(), current);
                match &absolute {
                    Data::MoveTo([x, y]) => {
                        current = [*x, *y];
                        start = current;
                    }
                    Data::ClosePath => current = start,
                    Data::HorizontalLineTo([x]) => current[0] = *x,
                    Data::VerticalLineTo([y]) => current[1] = *y,
                    other => {
                        let args = other.args();
                        current = [args[args.len() - 2], args[args.len() - 1]];
                    }
                }
                if command.is_implicit() {
                    Data::Implicit(Box::new(absolute))
                } else {
                    absolute
                }
            })
            .collect();
        Self(data)
    }
}

fn to_absolute(command: &Data, [x, y]: [f64; 2]) -> Data {
    match *command {
        Data::MoveBy([dx, dy]) => Data::MoveTo([x + dx, y + dy]),
        Data::LineBy([dx, dy]) => Data::LineTo([x + dx, y + dy]),
        Data::HorizontalLineBy([dx]) => Data::HorizontalLineTo([x + dx]),
        Data::VerticalLineBy([dy]) => Data::VerticalLineTo([y + dy]),
        Data::CubicBezierBy([x1, y1, x2, y2, dx, dy]) => {
            Data::CubicBezierTo([x + x1, y + y1, x + x2, y + y2, x + dx, y + dy])
        }
        Data::SmoothBezierBy([x2, y2, dx, dy]) => {
            Data::SmoothBezierTo([x + x2, y + y2, x + dx, y + dy])
        }
        Data::QuadraticBezierBy([x1, y1, dx, dy]) => {
            Data::QuadraticBezierTo([x + x1, y + y1, x + dx, y + dy])
        }
        Data::SmoothQuadraticBezierBy([dx, dy]) => Data::SmoothQuadraticBezierTo([x + dx, y + dy]),
        Data::ArcBy([rx, ry, angle, large_arc, sweep, dx, dy]) => {
            Data::ArcTo([rx, ry, angle, large_arc, sweep, x + dx, y + dy])
        }
        ref command => command.clone(),
    }
}
