use crate::buffer::{Buffer, Cell};
use crate::element::{Content, Element};
use crate::layout::{LayoutNode, Rect, inner_rect};
use crate::text::{align_offset, char_width, display_width, truncate_to_width};
use crate::types::{Backdrop, Overflow, Rgb, TextWrap};

/// An element ready to paint, with its effective z_index, tree order and clip.
struct RenderItem<'a> {
    element: &'a Element,
    rect: Rect,
    z_index: i16,
    tree_order: usize,
    clip: Rect,
}

/// Paint `root` into `buf` using a layout computed for the same tree.
///
/// Elements are painted by z_index, ties broken by tree order. Children
/// inherit their parent's z_index as a minimum, so an overlay subtree stays
/// above the page it covers.
pub fn render_to_buffer(root: &Element, layout: &LayoutNode, buf: &mut Buffer) {
    let screen = Rect::from_size(buf.width(), buf.height());
    let mut list = Vec::new();
    let mut order = 0;
    collect_elements(root, layout, &mut list, &mut order, root.z_index, screen);

    list.sort_by_key(|item| (item.z_index, item.tree_order));

    for item in &list {
        render_element(item, buf);
    }
}

fn collect_elements<'a>(
    element: &'a Element,
    node: &LayoutNode,
    list: &mut Vec<RenderItem<'a>>,
    order: &mut usize,
    parent_z_index: i16,
    clip: Rect,
) {
    let z_index = element.z_index.max(parent_z_index);
    list.push(RenderItem {
        element,
        rect: node.rect,
        z_index,
        tree_order: *order,
        clip,
    });
    *order += 1;

    let child_clip = if element.overflow == Overflow::Visible {
        clip
    } else {
        clip.intersection(&inner_rect(element, node.rect))
    };

    for (child, child_node) in element.child_elements().iter().zip(&node.children) {
        collect_elements(child, child_node, list, order, z_index, child_clip);
    }
}

fn render_element(item: &RenderItem, buf: &mut Buffer) {
    let element = item.element;

    if let Backdrop::Dim(amount) = element.backdrop {
        for cell in buf.cells_mut() {
            cell.fg = cell.fg.darken(amount);
            cell.bg = cell.bg.darken(amount);
        }
    }

    let visible = item.rect.intersection(&item.clip);
    if visible.is_empty() {
        return;
    }

    if let Some(bg) = &element.style.background {
        fill_rect(buf, visible, bg.to_rgb());
    }

    render_border(element, item.rect, item.clip, buf);

    if let Content::Text(text) = &element.content {
        render_text(text, element, item.rect, item.clip, buf);
    }
}

fn fill_rect(buf: &mut Buffer, rect: Rect, bg: Rgb) {
    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            if let Some(cell) = buf.get_mut(x, y) {
                cell.bg = bg;
                cell.char = ' ';
            }
        }
    }
}

fn render_text(text: &str, element: &Element, rect: Rect, clip: Rect, buf: &mut Buffer) {
    let fg = element.style.fg_rgb();
    let inner = inner_rect(element, rect).intersection(&clip);
    if inner.is_empty() {
        return;
    }

    for (line_index, line) in text.lines().enumerate() {
        let Some(y) = inner.y.checked_add(line_index as u16) else {
            break;
        };
        if y >= inner.bottom() {
            break;
        }

        let line = match element.text_wrap {
            TextWrap::Truncate => truncate_to_width(line, inner.width as usize),
            TextWrap::NoWrap => line.to_string(),
        };
        let offset = align_offset(display_width(&line), inner.width as usize, element.text_align);
        let mut x = inner.x.saturating_add(offset as u16);

        for ch in line.chars() {
            if x >= inner.right() {
                break;
            }
            let bg = element.style.bg_over(buf.get(x, y).map(|c| c.bg).unwrap_or_default());
            if let Some(cell) = buf.get_mut(x, y) {
                *cell = Cell {
                    char: ch,
                    fg,
                    bg,
                    style: element.style.text_style,
                };
            }
            x = x.saturating_add(char_width(ch).max(1) as u16);
        }
    }
}

fn render_border(element: &Element, rect: Rect, clip: Rect, buf: &mut Buffer) {
    let Some([tl, tr, bl, br, h, v]) = element.style.border_glyphs() else {
        return;
    };
    if rect.width < 2 || rect.height < 2 {
        return;
    }

    let fg = element.style.fg_rgb();
    let mut set = |x: u16, y: u16, ch: char| {
        if clip.contains(x, y) {
            if let Some(cell) = buf.get_mut(x, y) {
                cell.char = ch;
                cell.fg = fg;
            }
        }
    };

    let right = rect.right() - 1;
    let bottom = rect.bottom() - 1;
    set(rect.x, rect.y, tl);
    set(right, rect.y, tr);
    set(rect.x, bottom, bl);
    set(right, bottom, br);
    for x in (rect.x + 1)..right {
        set(x, rect.y, h);
        set(x, bottom, h);
    }
    for y in (rect.y + 1)..bottom {
        set(rect.x, y, v);
        set(right, y, v);
    }
}
