use flatvg_ast::element::Element;
use flatvg_parse::transform::Matrix;

use super::{number, set_number, set_rotation, Unconvertible};

/// Scales the rect about it's mapped centre.
///
/// Any rotation is kept as a `rotate` transform about the new centre.
pub(super) fn update(element: &Element, matrix: &Matrix) -> Result<(), Unconvertible> {
    let x = number(element, "x", 0.0)?;
    let y = number(element, "y", 0.0)?;
    let width = number(element, "width", 0.0)?;
    let height = number(element, "height", 0.0)?;
    let rx = number(element, "rx", 0.0)?;
    let ry = number(element, "ry", 0.0)?;

    let sx = matrix.scale_x();
    let sy = matrix.scale_y();
    let (cx, cy) = matrix.apply(x + width / 2.0, y + height / 2.0);

    set_number(element, "x", cx - width * sx / 2.0);
    set_number(element, "y", cy - height * sy / 2.0);
    set_number(element, "width", width * sx);
    set_number(element, "height", height * sy);
    if rx > 0.0 {
        set_number(element, "rx", rx * sx);
    }
    if ry > 0.0 {
        set_number(element, "ry", ry * sy);
    }

    set_rotation(element, matrix, cx, cy);
    Ok(())
}

#[cfg(test)]
mod test {
    use flatvg_ast::element::Element;
    use flatvg_parse::transform::Matrix;
    use pretty_assertions::assert_eq;

    use crate::update::Unconvertible;

    fn rect(attributes: &[(&str, &str)]) -> Element {
        let element = Element::create("rect");
        for (name, value) in attributes {
            element.set_attribute(name, *value);
        }
        element
    }

    #[test]
    fn scale() {
        let element = rect(&[
            ("x", "1"),
            ("y", "1"),
            ("width", "2"),
            ("height", "2"),
            ("rx", "0.5"),
        ]);
        super::update(&element, &Matrix::scale(2.0, 3.0)).unwrap();
        let get = |name| element.get_attribute(name);
        assert_eq!(get("x").as_deref(), Some("2"));
        assert_eq!(get("y").as_deref(), Some("3"));
        assert_eq!(get("width").as_deref(), Some("4"));
        assert_eq!(get("height").as_deref(), Some("6"));
        assert_eq!(get("rx").as_deref(), Some("1"));
        assert_eq!(get("ry"), None);
        assert_eq!(get("transform"), None);
    }

    #[test]
    fn defaults() {
        let element = rect(&[("width", "10")]);
        super::update(&element, &Matrix::translate(5.0, 5.0)).unwrap();
        assert_eq!(element.get_attribute("x").as_deref(), Some("5"));
        assert_eq!(element.get_attribute("y").as_deref(), Some("5"));
        assert_eq!(element.get_attribute("height").as_deref(), Some("0"));

        // relative lengths can't be scaled, so nothing is changed
        let element = rect(&[("x", "1"), ("width", "100%"), ("height", "100%")]);
        assert_eq!(
            super::update(&element, &Matrix::translate(5.0, 5.0)),
            Err(Unconvertible {
                attribute: "width",
                value: String::from("100%"),
            })
        );
        assert_eq!(element.get_attribute("x").as_deref(), Some("1"));
        assert_eq!(element.get_attribute("width").as_deref(), Some("100%"));
        assert_eq!(element.get_attribute("y"), None);
    }
}
