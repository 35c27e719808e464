//! Lookup of elements by their `id`
use std::collections::HashMap;

use flatvg_ast::element::Element;

#[derive(Debug, Default)]
/// The elements of a document keyed by id, where the first element in document order wins
pub struct IdIndex(HashMap<String, Element>);

impl IdIndex {
    /// Indexes the root and all of it's descendants
    pub fn new(root: &Element) -> Self {
        let mut index = HashMap::new();
        for element in std::iter::once(root.clone()).chain(root.descendants()) {
            if let Some(id) = element.id() {
                index.entry(id).or_insert(element);
            }
        }
        Self(index)
    }

    /// Returns the element with the given id
    pub fn get(&self, id: &str) -> Option<&Element> {
        self.0.get(id)
    }
}

#[test]
fn first_match_wins() {
    let svg = Element::create("svg");
    let first = Element::create("rect");
    let second = Element::create("circle");
    first.set_attribute("id", "a");
    second.set_attribute("id", "a");
    svg.append_child(&first);
    svg.append_child(&second);

    let index = IdIndex::new(&svg);
    assert_eq!(index.get("a"), Some(&first));
    assert_eq!(index.get("b"), None);
}
