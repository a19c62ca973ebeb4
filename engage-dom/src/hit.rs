use crate::element::Element;
use crate::layout::LayoutNode;

/// Ids of the elements under `(x, y)`, deepest first.
///
/// At each level only the topmost child containing the point is followed
/// (higher z_index first, then later in tree order), so an overlay covering
/// the page hides the page from clicks. Elements without an id are walked
/// through but not reported.
pub fn hit_path(layout: &LayoutNode, root: &Element, x: u16, y: u16) -> Vec<String> {
    let mut path = Vec::new();
    collect_hits(root, layout, x, y, &mut path);
    path.reverse();
    path
}

fn collect_hits(element: &Element, node: &LayoutNode, x: u16, y: u16, path: &mut Vec<String>) -> bool {
    if !node.rect.contains(x, y) {
        return false;
    }
    if let Some(id) = &element.id {
        path.push(id.clone());
    }

    let children = element.child_elements();
    let mut order: Vec<usize> = (0..children.len().min(node.children.len())).collect();
    order.sort_by_key(|&i| std::cmp::Reverse((children[i].z_index, i)));

    for i in order {
        if collect_hits(&children[i], &node.children[i], x, y, path) {
            break;
        }
    }

    true
}
