mod flex;
mod rect;

pub use flex::layout;
pub use rect::Rect;

use crate::element::Element;

/// Computed geometry, shaped exactly like the element tree it was built from.
///
/// `children[i]` is the layout of the element's `i`-th child, absolute
/// children included.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayoutNode {
    pub rect: Rect,
    pub children: Vec<LayoutNode>,
}

impl LayoutNode {
    /// Rect of the element with `id`, walking both trees in step.
    pub fn find(&self, root: &Element, id: &str) -> Option<Rect> {
        if root.id.as_deref() == Some(id) {
            return Some(self.rect);
        }
        root.child_elements()
            .iter()
            .zip(&self.children)
            .find_map(|(child, node)| node.find(child, id))
    }
}

/// Area inside border and padding.
pub(crate) fn inner_rect(element: &Element, rect: Rect) -> Rect {
    let border = element.style.border_size();
    rect.shrink(
        element.padding.top + border,
        element.padding.right + border,
        element.padding.bottom + border,
        element.padding.left + border,
    )
}
