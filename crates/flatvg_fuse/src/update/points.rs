use flatvg_ast::element::Element;
use flatvg_parse::{number::format_number, transform::Matrix, Parse};
use itertools::Itertools;

use super::Unconvertible;

/// Maps each `x,y` pair of `points` through `matrix`.
///
/// Tokens without a comma are kept as is.
pub(super) fn update(element: &Element, matrix: &Matrix) -> Result<(), Unconvertible> {
    let Some(points) = element.get_attribute("points") else {
        return Ok(());
    };

    let mut mapped = Vec::new();
    for token in points.split_whitespace() {
        let Some((x, y)) = token.split_once(',') else {
            log::debug!("points token `{token}` isn't an `x,y` pair, leaving it in place");
            mapped.push(token.to_string());
            continue;
        };
        let (Ok(x), Ok(y)) = (f64::parse_string(x), f64::parse_string(y)) else {
            return Err(Unconvertible {
                attribute: "points",
                value: points,
            });
        };
        let (x, y) = matrix.apply(x, y);
        mapped.push(format!("{},{}", format_number(x), format_number(y)));
    }
    element.set_attribute("points", mapped.iter().join(" "));
    Ok(())
}

#[test]
fn points() {
    let element = Element::create("polygon");
    element.set_attribute("points", " 0,0  10,0 10,10 ");
    update(&element, &Matrix::translate(1.0, 2.0)).unwrap();
    assert_eq!(
        element.get_attribute("points").as_deref(),
        Some("1,2 11,2 11,12")
    );

    // space separated coordinates are left in place
    element.set_attribute("points", "0 0 10 0");
    update(&element, &Matrix::translate(1.0, 2.0)).unwrap();
    assert_eq!(element.get_attribute("points").as_deref(), Some("0 0 10 0"));

    element.set_attribute("points", "0,a");
    assert!(update(&element, &Matrix::IDENTITY).is_err());
    assert_eq!(element.get_attribute("points").as_deref(), Some("0,a"));
}
