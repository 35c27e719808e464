//! Depth-first traversal composing and fusing transforms
use std::collections::HashMap;

use flatvg_ast::element::Element;
use flatvg_parse::{transform::{Matrix, TransformList}, Parse};

use crate::{
    error::Error,
    index::IdIndex,
    shape::ShapeKind,
    update::{self, TOLERANCE},
    warning::Warnings,
    FuseTransforms,
};

/// Prefixes of attributes written by editors which are dropped from paths
const EDITOR_PREFIXES: [&str; 2] = ["sodipodi", "inkscape"];

/// The state of a single pass over a document
pub(crate) struct Walker<'a> {
    pub options: &'a FuseTransforms,
    pub index: IdIndex,
    pub warnings: &'a mut dyn Warnings,
    /// The gradients fused so far, by id, with the transform they were fused with
    pub gradients: HashMap<String, Matrix>,
}

impl Walker<'_> {
    /// Fuses the element and it's descendants, where `inherited` is the transform of it's ancestors
    pub fn fuse(&mut self, element: &Element, inherited: &Matrix) -> Result<(), Error> {
        let matrix = compose(inherited, element)?;

        if self.options.remove_editor_data && element.local_name() == "path" {
            remove_editor_data(element);
        }

        let inherited = if matrix.is_identity(TOLERANCE) {
            log::trace!("skipping <{}> with no transform", element.local_name());
            matrix
        } else {
            update::dispatch(element, ShapeKind::of(element), &matrix, self)?
        };

        for child in element.children() {
            self.fuse(&child, &inherited)?;
        }
        Ok(())
    }
}

/// Returns the transform of the element composed with it's ancestors', removing it's
/// `transform` attribute
///
/// # Errors
///
/// If the `transform` attribute is malformed
pub fn compose(inherited: &Matrix, element: &Element) -> Result<Matrix, Error> {
    let Some(value) = element.remove_attribute("transform") else {
        return Ok(*inherited);
    };
    let local = TransformList::parse_string(&value).map_err(|err| Error::Transform {
        value: value.clone(),
        reason: err.to_string(),
    })?;
    Ok(inherited.multiply(&local.to_matrix()))
}

fn remove_editor_data(element: &Element) {
    element.retain_attributes(|attr| {
        let name = attr.name.to_string();
        let namespace = attr.namespace.as_deref().unwrap_or_default();
        let is_editor_data = EDITOR_PREFIXES
            .iter()
            .any(|prefix| name.contains(prefix) || namespace.contains(prefix));
        if is_editor_data {
            log::debug!("removing editor attribute {name}");
        }
        !is_editor_data
    });
}
