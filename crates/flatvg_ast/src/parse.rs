//! Parsing methods using roxmltree
//!
//! # Quirks
//!
//! Roxmltree has some notable quirks
//!
//! - Doctypes are dropped, with their entities expanded in place
//! - Duplicate namespace uris are merged
use std::{cell::RefCell, fmt::Display};

use crate::{
    name::{Attribute, QualName},
    node::{Node, NodeData, Ref},
};

const XML_PREFIX: &str = "xml";
const MAX_DEPTH: u32 = 1024;

/// Elements where whitespace only text is meaningful
const WHITESPACE_ELEMENTS: [&str; 3] = ["text", "tspan", "textPath"];

#[derive(Debug)]
/// The errors which may occur while parsing a document with roxmltree.
pub enum ParseError {
    /// The document parsed had a depth greater than 1024 elements
    NodesLimitReached,
    /// The document couldn't be parsed by roxmltree
    ROXML(roxmltree::Error),
}

/// Parses an xml document into a mutable tree, returning the document node.
///
/// # Errors
///
/// If the document is malformed or the depth of the tree is too deep
pub fn parse(source: &str) -> Result<Ref, ParseError> {
    let xml = roxmltree::Document::parse_with_options(
        source,
        roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        },
    )
    .map_err(ParseError::ROXML)?;

    let document = Node::new(NodeData::Document);
    parse_xml_node_children(&document, xml.root(), 0)?;
    Ok(document)
}

fn parse_xml_node_children(node: &Ref, parent: roxmltree::Node, depth: u32) -> Result<(), ParseError> {
    for xml_child in parent.children() {
        if let Some(child) = parse_xml_node(xml_child, depth)? {
            Node::append_child(node, child);
        }
    }
    Ok(())
}

fn parse_xml_node(node: roxmltree::Node, depth: u32) -> Result<Option<Ref>, ParseError> {
    if depth > MAX_DEPTH {
        return Err(ParseError::NodesLimitReached);
    }

    let child = match node.node_type() {
        roxmltree::NodeType::Root => return Ok(None),
        roxmltree::NodeType::PI => {
            let Some(pi) = node.pi() else { return Ok(None) };
            Node::new(NodeData::ProcessingInstruction {
                target: pi.target.to_string(),
                contents: pi.value.map(String::from),
            })
        }
        roxmltree::NodeType::Element => parse_element(node),
        roxmltree::NodeType::Comment => Node::new(NodeData::Comment {
            contents: node.text().unwrap_or_default().to_string(),
        }),
        roxmltree::NodeType::Text => return Ok(parse_text(node)),
    };
    parse_xml_node_children(&child, node, depth + 1)?;
    Ok(Some(child))
}

fn parse_element(xml_node: roxmltree::Node) -> Ref {
    let tag_name = xml_node.tag_name();
    let prefix = tag_name
        .namespace()
        .and_then(|uri| xml_node.lookup_prefix(uri));
    let name = QualName::new(prefix, tag_name.name());

    let mut attrs: Vec<Attribute> = xml_node
        .namespaces()
        .filter(|ns| is_new_namespace(xml_node, ns))
        .map(|ns| Attribute {
            name: match ns.name() {
                Some(prefix) => QualName::new(Some("xmlns"), prefix),
                None => QualName::new(None, "xmlns"),
            },
            namespace: None,
            value: ns.uri().to_string(),
        })
        .collect();
    attrs.extend(xml_node.attributes().map(|attr| {
        let namespace = attr.namespace();
        let prefix = namespace.and_then(|uri| xml_node.lookup_prefix(uri));
        Attribute {
            name: QualName::new(prefix, attr.name()),
            namespace: namespace.map(String::from),
            value: attr.value().to_string(),
        }
    }));

    Node::new(NodeData::Element {
        name: RefCell::new(name),
        attrs: RefCell::new(attrs),
    })
}

/// Whether the namespace is declared on this element rather than inherited from it's parent
fn is_new_namespace(xml_node: roxmltree::Node, ns: &roxmltree::Namespace) -> bool {
    if ns.name() == Some(XML_PREFIX) {
        return false;
    }
    xml_node.parent_element().is_none_or(|parent| {
        !parent
            .namespaces()
            .any(|parent_ns| parent_ns.name() == ns.name() && parent_ns.uri() == ns.uri())
    })
}

fn parse_text(text: roxmltree::Node) -> Option<Ref> {
    let contents = text.text()?;
    if contents.trim().is_empty() {
        let parent_name = text.parent_element().map(|parent| parent.tag_name().name());
        if !parent_name.is_some_and(|name| WHITESPACE_ELEMENTS.contains(&name)) {
            return None;
        }
    }
    Some(Node::new(NodeData::Text {
        contents: RefCell::new(contents.to_string()),
    }))
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NodesLimitReached => f.write_str("The depth of the document parsed was too deep"),
            Self::ROXML(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{parse, ParseError};
    use crate::node::NodeData;

    #[test]
    fn parse_roxmltree() {
        let source = r#"<?xml-stylesheet href="a.css"?>
<svg xmlns="http://www.w3.org/2000/svg" xmlns:sodipodi="http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd" width="300">
  <!-- shapes -->
  <rect sodipodi:type="rect" width="100" />
  <text x="1"> <tspan>hello</tspan></text>
</svg>"#;
        let document = parse(source).unwrap();
        let children = document.child_nodes();
        assert_eq!(children.len(), 2);
        assert!(matches!(
            &children[0].data,
            NodeData::ProcessingInstruction { target, .. } if target == "xml-stylesheet"
        ));

        let svg = document.document_element().unwrap();
        assert_eq!(svg.local_name(), "svg");
        let mut attributes = svg
            .attributes()
            .iter()
            .map(|attr| (attr.name.to_string(), attr.value.clone()))
            .collect::<Vec<_>>();
        attributes.sort();
        assert_eq!(
            attributes,
            vec![
                (String::from("width"), String::from("300")),
                (
                    String::from("xmlns"),
                    String::from("http://www.w3.org/2000/svg")
                ),
                (
                    String::from("xmlns:sodipodi"),
                    String::from("http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd")
                ),
            ]
        );

        // the comment, rect, and text survive; whitespace between them doesn't
        assert_eq!(svg.node().child_nodes().len(), 3);
        let children = svg.children();
        let rect = &children[0];
        assert_eq!(rect.qual_name().prefix, None);
        assert_eq!(rect.attributes().len(), 2);
        assert_eq!(rect.get_attribute("sodipodi:type").as_deref(), Some("rect"));
        assert_eq!(
            rect.attributes()[0].namespace.as_deref(),
            Some("http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd")
        );

        // whitespace within text is kept
        let text = &children[1];
        assert_eq!(text.node().child_nodes().len(), 2);
        assert_eq!(text.node().text_content(), " hello");
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(parse("<svg>"), Err(ParseError::ROXML(_))));
        assert!(matches!(parse(""), Err(ParseError::ROXML(_))));
    }
}
