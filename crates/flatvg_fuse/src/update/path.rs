use flatvg_ast::element::Element;
use flatvg_parse::{transform::Matrix, Parse};
use flatvg_path::Path;

use crate::error::Error;

/// Maps every point of the path data through `matrix`.
///
/// Lines, quadratics, and arcs are written as cubic curves, which stay exact under any
/// affine transform.
pub(super) fn update(element: &Element, matrix: &Matrix) -> Result<(), Error> {
    let Some(d) = element.get_attribute("d") else {
        return Ok(());
    };
    let path = Path::parse_string(&d).map_err(|err| Error::PathData {
        value: d.clone(),
        reason: err.to_string(),
    })?;

    let mut cubic = path.to_cubic();
    cubic.transform(matrix);
    element.set_attribute("d", Path::from(cubic).to_string());
    Ok(())
}
