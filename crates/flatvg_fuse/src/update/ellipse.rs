use flatvg_ast::element::Element;
use flatvg_parse::transform::Matrix;

use super::{number, set_number, Unconvertible, TOLERANCE};
use crate::{
    shape::ShapeKind,
    warning::{Warning, Warnings},
};

fn is_equal(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE
}

/// Updates the centre and radii of a circle or ellipse.
///
/// Translations and uniform scales are exact. Anything else is fitted to the mapped bounding
/// box, promoting circles to ellipses when needed.
pub(super) fn update(
    element: &Element,
    kind: ShapeKind,
    matrix: &Matrix,
    warnings: &mut dyn Warnings,
) -> Result<(), Unconvertible> {
    let is_circle = kind == ShapeKind::Circle;
    let cx = number(element, "cx", 0.0)?;
    let cy = number(element, "cy", 0.0)?;
    let (rx, ry) = if is_circle {
        let r = number(element, "r", 0.0)?;
        (r, r)
    } else {
        (number(element, "rx", 0.0)?, number(element, "ry", 0.0)?)
    };

    if is_equal(matrix.b, 0.0) && is_equal(matrix.c, 0.0) && is_equal(matrix.a, matrix.d) {
        let (new_cx, new_cy) = matrix.apply(cx, cy);
        if is_circle {
            set_number(element, "r", rx * matrix.a.abs());
        } else {
            set_number(element, "rx", rx * matrix.a.abs());
            set_number(element, "ry", ry * matrix.d.abs());
        }
        set_number(element, "cx", new_cx);
        set_number(element, "cy", new_cy);
        return Ok(());
    }

    let (x1, y1) = matrix.apply(cx - rx, cy - ry);
    let (x2, y2) = matrix.apply(cx + rx, cy - ry);
    let (x3, y3) = matrix.apply(cx + rx, cy + ry);
    let edge_x = (x1 - x2).hypot(y1 - y2);
    let edge_y = (x2 - x3).hypot(y2 - y3);

    set_number(element, "cx", (x1 + x3) / 2.0);
    set_number(element, "cy", (y1 + y3) / 2.0);

    let is_round = is_equal(edge_x, edge_y);
    if !is_round && (is_circle || !is_equal(x2, x3) || !is_equal(y1, y2)) {
        warnings.warn(Warning::ApproximateShape {
            tag: element.local_name(),
            id: element.id(),
        });
    }

    if is_circle && is_round {
        set_number(element, "r", edge_x / 2.0);
        return Ok(());
    }
    if is_circle {
        log::debug!("promoting circle to ellipse");
        element.set_local_name("ellipse");
        element.remove_attribute("r");
    }
    set_number(element, "rx", edge_x / 2.0);
    set_number(element, "ry", edge_y / 2.0);
    Ok(())
}

#[cfg(test)]
mod test {
    use flatvg_ast::element::Element;
    use flatvg_parse::transform::Matrix;
    use pretty_assertions::assert_eq;

    use crate::{shape::ShapeKind, warning::Warning};

    fn shape(tag: &str, attributes: &[(&str, &str)]) -> Element {
        let element = Element::create(tag);
        for (name, value) in attributes {
            element.set_attribute(name, *value);
        }
        element
    }

    fn number(element: &Element, name: &str) -> f64 {
        element.get_attribute(name).unwrap().parse().unwrap()
    }

    #[test]
    fn uniform_scale() {
        let mut warnings: Vec<Warning> = vec![];
        let element = shape("ellipse", &[("cx", "1"), ("cy", "1"), ("rx", "2"), ("ry", "1")]);
        let matrix = Matrix::translate(1.0, 1.0).multiply(&Matrix::scale(2.0, 2.0));
        super::update(&element, ShapeKind::Ellipse, &matrix, &mut warnings).unwrap();
        assert_eq!(element.get_attribute("cx").as_deref(), Some("3"));
        assert_eq!(element.get_attribute("cy").as_deref(), Some("3"));
        assert_eq!(element.get_attribute("rx").as_deref(), Some("4"));
        assert_eq!(element.get_attribute("ry").as_deref(), Some("2"));

        // a flip keeps radii positive
        let element = shape("circle", &[("r", "2")]);
        super::update(&element, ShapeKind::Circle, &Matrix::scale(-1.0, -1.0), &mut warnings)
            .unwrap();
        assert_eq!(element.get_attribute("r").as_deref(), Some("2"));
        assert!(warnings.is_empty());
    }

    #[test]
    fn promotion() {
        let mut warnings: Vec<Warning> = vec![];
        let element = shape("circle", &[("id", "c"), ("r", "1")]);
        super::update(&element, ShapeKind::Circle, &Matrix::scale(2.0, 1.0), &mut warnings)
            .unwrap();
        assert_eq!(element.local_name(), "ellipse");
        assert_eq!(element.get_attribute("r"), None);
        assert_eq!(element.get_attribute("rx").as_deref(), Some("2"));
        assert_eq!(element.get_attribute("ry").as_deref(), Some("1"));
        assert_eq!(
            warnings,
            vec![Warning::ApproximateShape {
                tag: String::from("circle"),
                id: Some(String::from("c")),
            }]
        );
    }

    #[test]
    fn rotation() {
        let mut warnings: Vec<Warning> = vec![];
        let element = shape("circle", &[("cx", "1"), ("r", "1")]);
        super::update(
            &element,
            ShapeKind::Circle,
            &Matrix::rotate(90.0, 0.0, 0.0),
            &mut warnings,
        )
        .unwrap();
        assert_eq!(element.local_name(), "circle");
        assert!(number(&element, "cx").abs() < 1e-9);
        assert!((number(&element, "cy") - 1.0).abs() < 1e-9);
        assert!((number(&element, "r") - 1.0).abs() < 1e-9);
        assert!(warnings.is_empty());
    }

    #[test]
    fn axis_aligned_ellipse() {
        let mut warnings: Vec<Warning> = vec![];
        let element = shape("ellipse", &[("rx", "1"), ("ry", "1")]);
        super::update(&element, ShapeKind::Ellipse, &Matrix::scale(3.0, 1.0), &mut warnings)
            .unwrap();
        assert_eq!(element.get_attribute("rx").as_deref(), Some("3"));
        assert_eq!(element.get_attribute("ry").as_deref(), Some("1"));
        assert!(warnings.is_empty());
    }

    #[test]
    fn skew() {
        let mut warnings: Vec<Warning> = vec![];
        let element = shape("ellipse", &[("rx", "2"), ("ry", "1")]);
        super::update(&element, ShapeKind::Ellipse, &Matrix::skew_x(30.0), &mut warnings)
            .unwrap();
        assert_eq!(warnings.len(), 1);
    }
}
