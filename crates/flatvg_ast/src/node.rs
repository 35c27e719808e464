//! Nodes of the document tree.
use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use crate::{
    element::Element,
    name::{Attribute, QualName},
};

/// A shared reference to a node
pub type Ref = Rc<Node>;

#[derive(Debug)]
/// The contents of a node, depending on it's type
pub enum NodeData {
    /// The root of a document, containing the document element
    Document,
    /// An element such as `<rect x="1"/>`
    Element {
        /// The tag name of the element
        name: RefCell<QualName>,
        /// The attributes of the element in document order
        attrs: RefCell<Vec<Attribute>>,
    },
    /// Character data
    Text {
        /// The unescaped text
        contents: RefCell<String>,
    },
    /// A comment such as `<!-- ... -->`
    Comment {
        /// The text within the comment
        contents: String,
    },
    /// A processing instruction, such as `<?xml-stylesheet ... ?>`
    ProcessingInstruction {
        /// The target of the instruction
        target: String,
        /// The data following the target
        contents: Option<String>,
    },
}

#[derive(Debug)]
/// A node of the document tree.
///
/// Children are owned by their parent, while the parent is only weakly referenced.
pub struct Node {
    /// The parent of the node, if attached
    pub parent: RefCell<Option<Weak<Node>>>,
    /// The children of the node in document order
    pub children: RefCell<Vec<Ref>>,
    /// The contents of the node
    pub data: NodeData,
}

impl Node {
    /// Creates a detached node
    pub fn new(data: NodeData) -> Ref {
        Rc::new(Self {
            parent: RefCell::new(None),
            children: RefCell::new(vec![]),
            data,
        })
    }

    /// Attaches `child` as the last child of `parent`
    pub fn append_child(parent: &Ref, child: Ref) {
        *child.parent.borrow_mut() = Some(Rc::downgrade(parent));
        parent.children.borrow_mut().push(child);
    }

    /// Returns the parent of the node, if it's still attached to a live parent
    pub fn parent_node(&self) -> Option<Ref> {
        self.parent.borrow().as_ref().and_then(Weak::upgrade)
    }

    /// Returns a snapshot of the node's children.
    ///
    /// Changes to the tree after the snapshot is taken are not reflected in it.
    pub fn child_nodes(&self) -> Vec<Ref> {
        self.children.borrow().clone()
    }

    /// Returns the first element child of the node
    pub fn document_element(self: &Rc<Self>) -> Option<Element> {
        if matches!(self.data, NodeData::Element { .. }) {
            return Element::new(self.clone());
        }
        self.children.borrow().iter().find_map(|child| Element::new(child.clone()))
    }

    /// Returns the text of the node and all of it's descendants
    pub fn text_content(&self) -> String {
        match &self.data {
            NodeData::Text { contents } => contents.borrow().clone(),
            NodeData::Comment { contents } => contents.clone(),
            _ => self
                .children
                .borrow()
                .iter()
                .map(|child| child.text_content())
                .collect(),
        }
    }

    /// Whether any direct child of the node is text
    pub fn has_text_child(&self) -> bool {
        self.children
            .borrow()
            .iter()
            .any(|child| matches!(child.data, NodeData::Text { .. }))
    }
}

#[test]
fn tree() {
    let document = Node::new(NodeData::Document);
    let element = Node::new(NodeData::Element {
        name: RefCell::new(QualName::new(None, "svg")),
        attrs: RefCell::new(vec![]),
    });
    let text = Node::new(NodeData::Text {
        contents: RefCell::new(String::from("hello")),
    });
    Node::append_child(&document, element.clone());
    Node::append_child(&element, text.clone());

    assert!(Rc::ptr_eq(&text.parent_node().unwrap(), &element));
    assert!(document.parent_node().is_none());
    assert_eq!(document.text_content(), "hello");
    assert!(element.has_text_child());
    assert_eq!(
        document.document_element().map(|e| e.local_name()),
        Some(String::from("svg"))
    );
}
