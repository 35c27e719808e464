//! Non-fatal notices raised while fusing a document
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A notice that the result of fusing an element may not be what's expected
pub enum Warning {
    /// A circle or ellipse was transformed into a shape it's attributes can't describe, so the
    /// closest ellipse is used instead
    ApproximateShape {
        /// The tag name of the element
        tag: String,
        /// The id of the element
        id: Option<String>,
    },
    /// The element can't absorb a transform, so it's kept as a `transform` attribute
    UnsupportedElement {
        /// The tag name of the element
        tag: String,
        /// The id of the element
        id: Option<String>,
    },
    /// The element's geometry depends on a value with no user units, such as a percentage, so
    /// the transform is kept as a `transform` attribute
    UnconvertibleLength {
        /// The tag name of the element
        tag: String,
        /// The id of the element
        id: Option<String>,
        /// The name of the attribute
        attribute: String,
        /// The value of the attribute
        value: String,
    },
    /// The gradient referenced by a shape's fill couldn't be updated
    GradientResolution {
        /// The id of the shape referencing the gradient
        id: Option<String>,
        /// Why the update failed
        reason: String,
    },
}

/// A channel for warnings that shouldn't stop a document from being fused
pub trait Warnings {
    /// Reports the warning
    fn warn(&mut self, warning: Warning);
}

impl Warnings for Vec<Warning> {
    fn warn(&mut self, warning: Warning) {
        self.push(warning);
    }
}

#[derive(Debug, Default, Clone)]
/// Reports warnings with [`log::warn`]
pub struct LogWarnings {
    /// The name of the document being fused, which is prefixed to each warning
    pub source: Option<String>,
}

impl Warnings for LogWarnings {
    fn warn(&mut self, warning: Warning) {
        match &self.source {
            Some(source) => log::warn!("{source}: {warning}"),
            None => log::warn!("{warning}"),
        }
    }
}

struct Id<'a>(&'a Option<String>);

impl Display for Id<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(id) => f.write_fmt(format_args!("#{id}")),
            None => f.write_str("without id"),
        }
    }
}

impl Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApproximateShape { tag, id } => f.write_fmt(format_args!(
                "<{tag}> ({}) is approximate only, try converting it to a path first for better results",
                Id(id)
            )),
            Self::UnsupportedElement { tag, id } => f.write_fmt(format_args!(
                "<{tag}> ({}) is not supported. The transform is kept on the element, but it's children are still fused",
                Id(id)
            )),
            Self::UnconvertibleLength {
                tag,
                id,
                attribute,
                value,
            } => f.write_fmt(format_args!(
                "<{tag}> ({}) has a `{attribute}` of `{value}`, which can't be converted to user units. The transform is kept on the element",
                Id(id)
            )),
            Self::GradientResolution { id, reason } => f.write_fmt(format_args!(
                "the gradient filling ({}) couldn't be updated: {reason}",
                Id(id)
            )),
        }
    }
}

#[test]
fn display() {
    assert_eq!(
        Warning::UnsupportedElement {
            tag: String::from("image"),
            id: Some(String::from("photo")),
        }
        .to_string(),
        "<image> (#photo) is not supported. The transform is kept on the element, but it's children are still fused"
    );
    assert_eq!(
        Warning::GradientResolution {
            id: None,
            reason: String::from("missing `r`"),
        }
        .to_string(),
        "the gradient filling (without id) couldn't be updated: missing `r`"
    );
    assert_eq!(
        Warning::UnconvertibleLength {
            tag: String::from("rect"),
            id: None,
            attribute: String::from("width"),
            value: String::from("100%"),
        }
        .to_string(),
        "<rect> (without id) has a `width` of `100%`, which can't be converted to user units. The transform is kept on the element"
    );

    let mut warnings = LogWarnings {
        source: Some(String::from("icon.svg")),
    };
    warnings.warn(Warning::ApproximateShape {
        tag: String::from("circle"),
        id: None,
    });
}
