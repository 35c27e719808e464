use flatvg_ast::element::Element;
use flatvg_parse::transform::Matrix;

use super::{number, set_number, set_rotation, Unconvertible};
use crate::scale;

/// Moves the text's anchor, keeping any rotation as a `rotate` transform about it
pub(super) fn update_text(element: &Element, matrix: &Matrix) -> Result<(), Unconvertible> {
    let x = number(element, "x", 0.0)?;
    let y = number(element, "y", 0.0)?;
    let deltas = Deltas::new(element, matrix)?;

    let (x, y) = matrix.apply(x, y);
    set_number(element, "x", x);
    set_number(element, "y", y);
    set_rotation(element, matrix, x, y);
    deltas.set(element);
    Ok(())
}

/// Moves the span's anchor, which falls back to the parent's anchor
pub(super) fn update_tspan(element: &Element, matrix: &Matrix) -> Result<(), Unconvertible> {
    let parent = element.parent_element();
    let inherited = |name| match &parent {
        Some(parent) => number(parent, name, 0.0),
        None => Ok(0.0),
    };
    let x = if element.has_attribute("x") {
        number(element, "x", 0.0)?
    } else {
        inherited("x")?
    };
    let y = if element.has_attribute("y") {
        number(element, "y", 0.0)?
    } else {
        inherited("y")?
    };
    let deltas = Deltas::new(element, matrix)?;

    let (x, y) = matrix.apply(x, y);
    set_number(element, "x", x);
    set_number(element, "y", y);
    deltas.set(element);
    Ok(())
}

/// The scaled `dx` and `dy` lists, read before anything is written
struct Deltas {
    dx: Option<String>,
    dy: Option<String>,
}

impl Deltas {
    fn new(element: &Element, matrix: &Matrix) -> Result<Self, Unconvertible> {
        Ok(Self {
            dx: scale::list(element, "dx", matrix)?,
            dy: scale::list(element, "dy", matrix)?,
        })
    }

    fn set(self, element: &Element) {
        if let Some(dx) = self.dx {
            element.set_attribute("dx", dx);
        }
        if let Some(dy) = self.dy {
            element.set_attribute("dy", dy);
        }
    }
}
