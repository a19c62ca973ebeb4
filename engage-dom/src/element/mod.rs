mod content;
mod node;

pub use content::Content;
pub use node::Element;

/// Find an element by id in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id.as_deref() == Some(id) {
        return Some(root);
    }

    root.child_elements().iter().find_map(|child| find_element(child, id))
}
