//! A wrapper for nodes known to be elements
use std::{cell::RefCell, rc::Rc};

use crate::{
    name::{Attribute, QualName},
    node::{Node, NodeData, Ref},
};

#[derive(Clone, Debug)]
/// An element of the document tree.
///
/// Cloning an element clones the reference, not the underlying node.
pub struct Element(Ref);

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Element {
    /// Upcasts the node as an element, if it is one
    pub fn new(node: Ref) -> Option<Self> {
        match node.data {
            NodeData::Element { .. } => Some(Self(node)),
            _ => None,
        }
    }

    /// Creates a detached element with the given tag name
    pub fn create(name: &str) -> Self {
        Self(Node::new(NodeData::Element {
            name: RefCell::new(QualName::parse(name)),
            attrs: RefCell::new(vec![]),
        }))
    }

    /// Returns the underlying node
    pub fn node(&self) -> &Ref {
        &self.0
    }

    fn name(&self) -> &RefCell<QualName> {
        match &self.0.data {
            NodeData::Element { name, .. } => name,
            _ => unreachable!("element wraps a non-element node"),
        }
    }

    fn attrs(&self) -> &RefCell<Vec<Attribute>> {
        match &self.0.data {
            NodeData::Element { attrs, .. } => attrs,
            _ => unreachable!("element wraps a non-element node"),
        }
    }

    /// Returns the tag name, including any prefix
    pub fn qual_name(&self) -> QualName {
        self.name().borrow().clone()
    }

    /// Returns the tag name without it's prefix, such as `rect`
    pub fn local_name(&self) -> String {
        self.name().borrow().local.clone()
    }

    /// Renames the element, keeping it's prefix
    pub fn set_local_name(&self, local: &str) {
        self.name().borrow_mut().local = local.to_string();
    }

    /// Returns the value of the attribute with the given qualified name
    pub fn get_attribute(&self, name: &str) -> Option<String> {
        self.attrs()
            .borrow()
            .iter()
            .find(|attr| attr.name.matches(name))
            .map(|attr| attr.value.clone())
    }

    /// Whether the element has an attribute with the given qualified name
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attrs()
            .borrow()
            .iter()
            .any(|attr| attr.name.matches(name))
    }

    /// Sets the value of an attribute, appending it if it doesn't exist yet
    pub fn set_attribute(&self, name: &str, value: impl Into<String>) {
        let value = value.into();
        let mut attrs = self.attrs().borrow_mut();
        match attrs.iter_mut().find(|attr| attr.name.matches(name)) {
            Some(attr) => attr.value = value,
            None => attrs.push(Attribute::new(name, value)),
        }
    }

    /// Removes an attribute, returning it's value if it existed
    pub fn remove_attribute(&self, name: &str) -> Option<String> {
        let mut attrs = self.attrs().borrow_mut();
        let index = attrs.iter().position(|attr| attr.name.matches(name))?;
        Some(attrs.remove(index).value)
    }

    /// Removes every attribute for which `f` returns `false`
    pub fn retain_attributes<F: FnMut(&Attribute) -> bool>(&self, f: F) {
        self.attrs().borrow_mut().retain(f);
    }

    /// Returns a snapshot of the element's attributes
    pub fn attributes(&self) -> Vec<Attribute> {
        self.attrs().borrow().clone()
    }

    /// Returns the value of the `id` attribute
    pub fn id(&self) -> Option<String> {
        self.get_attribute("id")
    }

    /// Returns a snapshot of the element's child elements
    pub fn children(&self) -> Vec<Element> {
        self.0
            .children
            .borrow()
            .iter()
            .filter_map(|child| Element::new(child.clone()))
            .collect()
    }

    /// Returns the parent, if it's an element
    pub fn parent_element(&self) -> Option<Element> {
        self.0.parent_node().and_then(Element::new)
    }

    /// Returns the element's descendant elements in document order, excluding itself
    pub fn descendants(&self) -> Vec<Element> {
        let mut result = vec![];
        let mut stack: Vec<Element> = self.children().into_iter().rev().collect();
        while let Some(element) = stack.pop() {
            stack.extend(element.children().into_iter().rev());
            result.push(element);
        }
        result
    }

    /// Attaches `child` as the last child of this element
    pub fn append_child(&self, child: &Element) {
        Node::append_child(&self.0, child.0.clone());
    }
}

#[test]
fn element() {
    let svg = Element::create("svg");
    let g = Element::create("g");
    let rect = Element::create("rect");
    let circle = Element::create("circle");
    svg.append_child(&g);
    g.append_child(&rect);
    svg.append_child(&circle);

    assert_eq!(
        svg.descendants()
            .iter()
            .map(Element::local_name)
            .collect::<Vec<_>>(),
        vec!["g", "rect", "circle"]
    );
    assert_eq!(rect.parent_element(), Some(g.clone()));
    assert_eq!(svg.parent_element(), None);

    rect.set_attribute("x", "1");
    rect.set_attribute("sodipodi:type", "arc");
    rect.set_attribute("x", "2");
    assert_eq!(rect.get_attribute("x").as_deref(), Some("2"));
    assert!(rect.has_attribute("sodipodi:type"));
    assert!(!rect.has_attribute("type"));
    rect.retain_attributes(|attr| attr.name.prefix.is_none());
    assert_eq!(rect.attributes().len(), 1);
    assert_eq!(rect.remove_attribute("x").as_deref(), Some("2"));
    assert_eq!(rect.remove_attribute("x"), None);

    circle.set_local_name("ellipse");
    assert_eq!(circle.local_name(), "ellipse");
}
