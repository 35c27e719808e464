//! Fusing a shape's transform into the gradient it's filled with
use flatvg_ast::element::Element;
use flatvg_parse::{
    length::{convert_length, Unit},
    number::format_number,
    style::StyleMap,
    transform::{Matrix, TransformList},
    Parse,
};

use super::TOLERANCE;
use crate::{walk::Walker, warning::Warning};

const USER_SPACE_ON_USE: &str = "userSpaceOnUse";

/// Updates the `userSpaceOnUse` gradient the element is filled with, if any.
///
/// A gradient is only fused once per pass. Failures, and gradients shared with a shape fused
/// under another transform, are reported as a warning and leave the gradient as is.
pub(super) fn update_fill(element: &Element, matrix: &Matrix, walker: &mut Walker<'_>) {
    let Some(id) = fill_reference(element) else {
        return;
    };
    let Some(gradient) = walker.index.get(&id) else {
        log::debug!("fill references unknown gradient #{id}");
        return;
    };

    let result = match walker.gradients.get(&id) {
        Some(fused) if is_same(fused, matrix) => {
            log::debug!("gradient #{id} is already fused");
            return;
        }
        Some(_) => Err(format!(
            "#{id} is shared with a shape under a different transform"
        )),
        None => update(gradient, matrix),
    };
    match result {
        Ok(true) => {
            walker.gradients.insert(id, *matrix);
        }
        Ok(false) => {}
        Err(reason) => walker.warnings.warn(Warning::GradientResolution {
            id: element.id(),
            reason,
        }),
    }
}

fn is_same(left: &Matrix, right: &Matrix) -> bool {
    [
        left.a - right.a,
        left.b - right.b,
        left.c - right.c,
        left.d - right.d,
        left.e - right.e,
        left.f - right.f,
    ]
    .iter()
    .all(|delta| delta.abs() <= TOLERANCE)
}

/// Returns the id of a `url(#id)` fill, where the `style` attribute takes precedence
fn fill_reference(element: &Element) -> Option<String> {
    let fill = element
        .get_attribute("style")
        .and_then(|style| StyleMap::parse(&style).get("fill").map(String::from))
        .or_else(|| element.get_attribute("fill"))?;
    let url = fill.trim().strip_prefix("url(")?.strip_suffix(')')?.trim();
    let url = url.trim_matches(|char| char == '"' || char == '\'');
    Some(url.strip_prefix('#')?.to_string())
}

/// Fuses the matrix into the gradient, returning whether it's a `userSpaceOnUse` gradient
/// that was changed
fn update(gradient: &Element, matrix: &Matrix) -> Result<bool, String> {
    if gradient.get_attribute("gradientUnits").as_deref() != Some(USER_SPACE_ON_USE) {
        return Ok(false);
    }
    let existing = match gradient.get_attribute("gradientTransform") {
        Some(value) => TransformList::parse_string(&value)
            .map_err(|err| format!("invalid `gradientTransform`: {err}"))?
            .to_matrix(),
        None => Matrix::IDENTITY,
    };

    match gradient.local_name().as_str() {
        "linearGradient" => linear(gradient, &matrix.multiply(&existing))?,
        "radialGradient" => radial(gradient, &existing, matrix)?,
        name => {
            log::debug!("fill references <{name}>, which isn't a gradient");
            return Ok(false);
        }
    }
    gradient.remove_attribute("gradientTransform");
    Ok(true)
}

fn coordinate(gradient: &Element, name: &str) -> Result<f64, String> {
    let value = gradient
        .get_attribute(name)
        .ok_or_else(|| format!("missing `{name}`"))?;
    convert_length(&value, Unit::Px).map_err(|err| format!("invalid `{name}`: {err}"))
}

fn set_point(gradient: &Element, [x_name, y_name]: [&str; 2], (x, y): (f64, f64)) {
    gradient.set_attribute(x_name, format_number(x));
    gradient.set_attribute(y_name, format_number(y));
}

fn linear(gradient: &Element, matrix: &Matrix) -> Result<(), String> {
    let start = matrix.apply(coordinate(gradient, "x1")?, coordinate(gradient, "y1")?);
    let end = matrix.apply(coordinate(gradient, "x2")?, coordinate(gradient, "y2")?);
    set_point(gradient, ["x1", "y1"], start);
    set_point(gradient, ["x2", "y2"], end);
    Ok(())
}

fn radial(gradient: &Element, existing: &Matrix, matrix: &Matrix) -> Result<(), String> {
    let cx = coordinate(gradient, "cx")?;
    let cy = coordinate(gradient, "cy")?;
    let fx = if gradient.has_attribute("fx") {
        coordinate(gradient, "fx")?
    } else {
        cx
    };
    let fy = if gradient.has_attribute("fy") {
        coordinate(gradient, "fy")?
    } else {
        cy
    };
    let r = coordinate(gradient, "r")?;

    let mut centre = (cx, cy);
    let mut focus = (fx, fy);
    let mut radius = r;
    for step in [existing, matrix] {
        centre = step.apply(centre.0, centre.1);
        focus = step.apply(focus.0, focus.1);
        radius *= (step.scale_x() + step.scale_y()) / 2.0;
    }

    set_point(gradient, ["cx", "cy"], centre);
    set_point(gradient, ["fx", "fy"], focus);
    gradient.set_attribute("r", format_number(radius));
    Ok(())
}

#[cfg(test)]
mod test {
    use flatvg_ast::element::Element;
    use flatvg_parse::transform::Matrix;
    use pretty_assertions::assert_eq;

    fn gradient(tag: &str, attributes: &[(&str, &str)]) -> Element {
        let element = Element::create(tag);
        for (name, value) in attributes {
            element.set_attribute(name, *value);
        }
        element
    }

    #[test]
    fn fill_reference() {
        let element = Element::create("circle");
        assert_eq!(super::fill_reference(&element), None);
        element.set_attribute("fill", "url(#a)");
        assert_eq!(super::fill_reference(&element).as_deref(), Some("a"));
        element.set_attribute("style", "stroke:none;fill: url('#b')");
        assert_eq!(super::fill_reference(&element).as_deref(), Some("b"));
        element.set_attribute("style", "fill:red");
        assert_eq!(super::fill_reference(&element), None);
    }

    #[test]
    fn radial() {
        let element = gradient(
            "radialGradient",
            &[
                ("gradientUnits", "userSpaceOnUse"),
                ("cx", "1"),
                ("cy", "0"),
                ("r", "1"),
                ("gradientTransform", "translate(1,0)"),
            ],
        );
        assert_eq!(super::update(&element, &Matrix::scale(2.0, 2.0)), Ok(true));
        let get = |name| element.get_attribute(name);
        assert_eq!(get("cx").as_deref(), Some("4"));
        assert_eq!(get("cy").as_deref(), Some("0"));
        assert_eq!(get("fx").as_deref(), Some("4"));
        assert_eq!(get("fy").as_deref(), Some("0"));
        assert_eq!(get("r").as_deref(), Some("2"));
        assert_eq!(get("gradientTransform"), None);
    }

    #[test]
    fn linear() {
        let element = gradient(
            "linearGradient",
            &[
                ("gradientUnits", "userSpaceOnUse"),
                ("x1", "0"),
                ("y1", "0"),
                ("x2", "10"),
                ("y2", "0"),
                ("gradientTransform", "scale(2)"),
            ],
        );
        super::update(&element, &Matrix::translate(5.0, 5.0)).unwrap();
        let get = |name| element.get_attribute(name);
        assert_eq!(get("x1").as_deref(), Some("5"));
        assert_eq!(get("y1").as_deref(), Some("5"));
        assert_eq!(get("x2").as_deref(), Some("25"));
        assert_eq!(get("y2").as_deref(), Some("5"));
        assert_eq!(get("gradientTransform"), None);
    }

    #[test]
    fn unchanged() {
        let element = gradient("linearGradient", &[("x1", "0"), ("x2", "1")]);
        assert_eq!(super::update(&element, &Matrix::scale(2.0, 2.0)), Ok(false));
        assert_eq!(element.get_attribute("x2").as_deref(), Some("1"));

        let element = gradient(
            "radialGradient",
            &[("gradientUnits", "userSpaceOnUse"), ("cx", "0"), ("cy", "0")],
        );
        assert_eq!(
            super::update(&element, &Matrix::scale(2.0, 2.0)),
            Err(String::from("missing `r`"))
        );
        assert_eq!(element.get_attribute("cx").as_deref(), Some("0"));
    }
}
