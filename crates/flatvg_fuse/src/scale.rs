//! Rescaling of lengths that have no direction, such as `stroke-width` and `font-size`
use flatvg_ast::element::Element;
use flatvg_parse::{
    length::{convert_length, Unit},
    list::NumberList,
    number::format_number,
    style::StyleMap,
    transform::Matrix,
    Parse,
};

use crate::update::Unconvertible;

/// Scales `stroke-width` of the element's attributes and style
pub fn stroke_width(element: &Element, matrix: &Matrix) {
    property(element, "stroke-width", matrix.area_scale());
}

/// Scales `font-size` of the element's attributes and style
pub fn font_size(element: &Element, matrix: &Matrix) {
    property(element, "font-size", matrix.area_scale());
}

/// Scales a length property, whether declared in `style` or as a presentation attribute.
///
/// The scaled value is written as a number of user units. Values which can't be converted to
/// user units, such as percentages, are left as is.
fn property(element: &Element, name: &str, scale: f64) {
    if let Some(style) = element.get_attribute("style") {
        let mut declarations = StyleMap::parse(&style);
        if let Some(value) = declarations.get(name).and_then(|value| scaled(value, scale)) {
            declarations.set(name, value);
            element.set_attribute("style", declarations.to_string());
        }
    }

    if let Some(value) = element.get_attribute(name) {
        if let Some(value) = scaled(&value, scale) {
            element.set_attribute(name, value);
        }
    }
}

fn scaled(value: &str, scale: f64) -> Option<String> {
    match convert_length(value, Unit::Px) {
        Ok(length) => Some(format_number(length * scale)),
        Err(err) => {
            log::debug!("not scaling length `{value}`: {err}");
            None
        }
    }
}

/// Returns each number of a list attribute, such as `dx`, scaled by the area scale of
/// `matrix`, leaving the attribute as is.
///
/// # Errors
///
/// If the list contains something other than numbers
pub(crate) fn list(
    element: &Element,
    name: &'static str,
    matrix: &Matrix,
) -> Result<Option<String>, Unconvertible> {
    let Some(value) = element.get_attribute(name) else {
        return Ok(None);
    };
    let Ok(mut list) = NumberList::parse_string(&value) else {
        return Err(Unconvertible {
            attribute: name,
            value,
        });
    };
    list.scale(matrix.area_scale());
    Ok(Some(list.to_string()))
}

#[cfg(test)]
mod test {
    use flatvg_ast::element::Element;
    use flatvg_parse::transform::Matrix;

    #[test]
    fn stroke_width() {
        let element = Element::create("path");
        element.set_attribute("stroke-width", "2");
        element.set_attribute("style", "fill:none;stroke-width:3px");
        super::stroke_width(&element, &Matrix::scale(2.0, 2.0));
        assert_eq!(element.get_attribute("stroke-width").as_deref(), Some("4"));
        assert_eq!(
            element.get_attribute("style").as_deref(),
            Some("fill:none;stroke-width:6")
        );

        // area scale of a non-uniform scale
        let element = Element::create("g");
        element.set_attribute("stroke-width", "1in");
        super::stroke_width(&element, &Matrix::scale(4.0, 1.0));
        assert_eq!(element.get_attribute("stroke-width").as_deref(), Some("192"));
    }

    #[test]
    fn unconvertible_lengths() {
        let element = Element::create("text");
        element.set_attribute("style", "font-size:1em");
        element.set_attribute("font-size", "inherit");
        element.set_attribute("stroke-width", "50%");
        super::font_size(&element, &Matrix::scale(2.0, 2.0));
        super::stroke_width(&element, &Matrix::scale(2.0, 2.0));
        assert_eq!(element.get_attribute("style").as_deref(), Some("font-size:1em"));
        assert_eq!(element.get_attribute("font-size").as_deref(), Some("inherit"));
        assert_eq!(element.get_attribute("stroke-width").as_deref(), Some("50%"));
    }

    #[test]
    fn list() {
        let element = Element::create("tspan");
        element.set_attribute("dx", "1,2 3-4");
        let scale = Matrix::scale(2.0, 2.0);
        assert_eq!(
            super::list(&element, "dx", &scale).unwrap().as_deref(),
            Some("2 4 6 -8")
        );
        assert_eq!(element.get_attribute("dx").as_deref(), Some("1,2 3-4"));
        assert_eq!(super::list(&element, "dy", &scale).unwrap(), None);

        element.set_attribute("dy", "1 two");
        assert!(super::list(&element, "dy", &Matrix::IDENTITY).is_err());
    }
}
