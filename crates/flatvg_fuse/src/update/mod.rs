//! Routines rewriting the geometry of each kind of shape under a transform
mod ellipse;
mod gradient;
mod path;
mod points;
mod rect;
mod text;

use flatvg_ast::element::Element;
use flatvg_parse::{
    length::{convert_length, Unit},
    number::{format_number, round_to},
    transform::Matrix,
};

use crate::{
    error::Error,
    scale,
    shape::ShapeKind,
    walk::Walker,
    warning::Warning,
};

/// Coefficients closer than this are considered equal
pub(crate) const TOLERANCE: f64 = 1e-6;

/// An attribute the element's geometry depends on which can't be converted to user units
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Unconvertible {
    pub attribute: &'static str,
    pub value: String,
}

/// Rewrites the element's geometry so that it's drawn as if `matrix` were applied to it,
/// returning the transform it's children inherit.
///
/// When the geometry depends on a value that can't be converted to user units, the element
/// is left as is and keeps `matrix` as it's `transform`.
///
/// # Errors
///
/// If the path data of the element can't be parsed
pub(crate) fn dispatch(
    element: &Element,
    kind: ShapeKind,
    matrix: &Matrix,
    walker: &mut Walker<'_>,
) -> Result<Matrix, Error> {
    let geometry = match kind {
        ShapeKind::Path => {
            path::update(element, matrix)?;
            scale::stroke_width(element, matrix);
            Ok(())
        }
        ShapeKind::Polygon | ShapeKind::Polyline => {
            points::update(element, matrix).map(|()| scale::stroke_width(element, matrix))
        }
        ShapeKind::Circle | ShapeKind::Ellipse => {
            ellipse::update(element, kind, matrix, &mut *walker.warnings)
                .map(|()| gradient::update_fill(element, matrix, walker))
        }
        ShapeKind::Rect => {
            rect::update(element, matrix).map(|()| scale::stroke_width(element, matrix))
        }
        ShapeKind::Text => {
            text::update_text(element, matrix).map(|()| scale::font_size(element, matrix))
        }
        ShapeKind::Tspan => {
            text::update_tspan(element, matrix).map(|()| scale::font_size(element, matrix))
        }
        ShapeKind::Unsupported(_) => {
            element.set_attribute("transform", matrix.to_string());
            walker.warnings.warn(Warning::UnsupportedElement {
                tag: element.local_name(),
                id: element.id(),
            });
            Ok(())
        }
        ShapeKind::Group | ShapeKind::Other => {
            scale::stroke_width(element, matrix);
            Ok(())
        }
    };

    let Err(Unconvertible { attribute, value }) = geometry else {
        return Ok(*matrix);
    };
    log::debug!(
        "keeping transform of <{}>, `{attribute}` of `{value}` has no user units",
        element.local_name()
    );
    element.set_attribute("transform", matrix.to_string());
    walker.warnings.warn(Warning::UnconvertibleLength {
        tag: element.local_name(),
        id: element.id(),
        attribute: attribute.to_string(),
        value,
    });
    Ok(Matrix::IDENTITY)
}

/// Reads a numeric attribute in user units, defaulting to `default` when absent
fn number(
    element: &Element,
    attribute: &'static str,
    default: f64,
) -> Result<f64, Unconvertible> {
    let Some(value) = element.get_attribute(attribute) else {
        return Ok(default);
    };
    convert_length(&value, Unit::Px)
        .ok()
        .ok_or_else(|| Unconvertible { attribute, value })
}

fn set_number(element: &Element, attribute: &str, value: f64) {
    element.set_attribute(attribute, format_number(value));
}

/// Keeps the rotation of `matrix` as a `transform` about the given point, since the element's
/// attributes can't express it
fn set_rotation(element: &Element, matrix: &Matrix, x: f64, y: f64) {
    let angle = matrix.rotation_degrees();
    if angle.abs() <= TOLERANCE {
        return;
    }
    element.set_attribute(
        "transform",
        format!(
            "rotate({},{},{})",
            format_number(round_to(angle, 6)),
            format_number(round_to(x, 6)),
            format_number(round_to(y, 6)),
        ),
    );
}
