//! A mutable element tree for SVG documents.
//!
//! Documents are parsed with [`parse::parse`], edited in place through the [`element::Element`]
//! wrapper, and written back out with [`serialize::to_string`].
//!
//! ```
//! use flatvg_ast::{parse::parse, serialize::{to_string, Options}};
//!
//! let document = parse(r#"<svg xmlns="http://www.w3.org/2000/svg"><rect x="1"/></svg>"#).unwrap();
//! let root = document.document_element().unwrap();
//! root.children()[0].set_attribute("x", "2");
//! assert_eq!(
//!     to_string(&document, Options::default()).unwrap(),
//!     "<svg xmlns=\"http://www.w3.org/2000/svg\">\n    <rect x=\"2\"/>\n</svg>\n"
//! );
//! ```
pub mod element;
pub mod name;
pub mod node;
pub mod parse;
pub mod serialize;
pub mod xmlwriter;
