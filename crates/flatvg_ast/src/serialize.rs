//! Functions for serializing XML trees
use std::io::Write;

use crate::{
    node::{NodeData, Ref},
    xmlwriter::{Error, XmlWriter},
};

pub use crate::xmlwriter::{Indent, Options};

/// Serializes the node and it's descendants to a string
///
/// # Errors
///
/// If the underlying serialization fails
pub fn to_string(node: &Ref, options: Options) -> Result<String, Error> {
    let bytes = serialize_into(node, Vec::new(), options)?;
    String::from_utf8(bytes).map_err(Error::UTF8)
}

/// Serializes the node and it's descendants into the writer, returning the writer back
///
/// # Errors
///
/// If writing fails
pub fn serialize_into<W: Write>(node: &Ref, writer: W, options: Options) -> Result<W, Error> {
    let mut xml = XmlWriter::new(writer, options);
    serialize_node(node, &mut xml)?;
    xml.end_document()
}

fn serialize_node<W: Write>(node: &Ref, xml: &mut XmlWriter<W>) -> Result<(), Error> {
    match &node.data {
        NodeData::Document => {
            for child in node.child_nodes() {
                serialize_node(&child, xml)?;
            }
        }
        NodeData::Element { name, attrs } => {
            let name = name.borrow().to_string();
            xml.start_element(&name)?;
            for attr in attrs.borrow().iter() {
                xml.write_attribute(&attr.name.to_string(), &attr.value)?;
            }

            // mixed content is written verbatim
            let preserve = !xml.preserves_whitespaces() && node.has_text_child();
            if preserve {
                xml.set_preserve_whitespaces(true);
            }
            for child in node.child_nodes() {
                serialize_node(&child, xml)?;
            }
            xml.end_element()?;
            if preserve {
                xml.set_preserve_whitespaces(false);
            }
        }
        NodeData::Text { contents } => xml.write_text(&contents.borrow())?,
        NodeData::Comment { contents } => xml.write_comment(contents)?,
        NodeData::ProcessingInstruction { target, contents } => {
            xml.write_processing_instruction(target, contents.as_deref())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{to_string, Indent, Options};
    use crate::parse::parse;

    #[test]
    fn serialize() {
        let document = parse(
            r#"<?xml-stylesheet href="a.css"?>
<svg xmlns="http://www.w3.org/2000/svg">
  <!--shapes-->
  <g><rect x="1" data-label="a &amp; b"/></g>
  <text x="1">Hello <tspan>world</tspan></text>
</svg>"#,
        )
        .unwrap();

        assert_eq!(
            to_string(&document, Options::default()).unwrap(),
            r#"<?xml-stylesheet href="a.css"?>
<svg xmlns="http://www.w3.org/2000/svg">
    <!--shapes-->
    <g>
        <rect x="1" data-label="a &amp; b"/>
    </g>
    <text x="1">Hello <tspan>world</tspan></text>
</svg>
"#
        );

        assert_eq!(
            to_string(
                &document,
                Options {
                    indent: Indent::None,
                    ..Options::default()
                }
            )
            .unwrap(),
            r#"<?xml-stylesheet href="a.css"?><svg xmlns="http://www.w3.org/2000/svg"><!--shapes--><g><rect x="1" data-label="a &amp; b"/></g><text x="1">Hello <tspan>world</tspan></text></svg>"#
        );
    }
}
