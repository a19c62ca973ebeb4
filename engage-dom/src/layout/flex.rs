use super::{LayoutNode, Rect, inner_rect};
use crate::element::{Content, Element};
use crate::text::display_width;
use crate::types::{Align, Direction, Justify, Overflow, Position, Size};

pub fn layout(element: &Element, available: Rect) -> LayoutNode {
    layout_element(element, available)
}

fn layout_element(element: &Element, available: Rect) -> LayoutNode {
    let rect = if element.position == Position::Absolute {
        let x = available.x.saturating_add_signed(element.left.unwrap_or(0));
        let y = available.y.saturating_add_signed(element.top.unwrap_or(0));
        let width = resolve_size(element.width, available.width, element, true);
        let height = resolve_size(element.height, available.height, element, false);
        Rect::new(x, y, width, height)
    } else {
        let m = &element.margin;
        let after_margin = available.shrink(m.top, m.right, m.bottom, m.left);
        let width = resolve_size(element.width, after_margin.width, element, true);
        let height = resolve_size(element.height, after_margin.height, element, false);
        Rect::new(after_margin.x, after_margin.y, width, height)
    };

    LayoutNode {
        rect,
        children: layout_children(element, rect),
    }
}

fn layout_children(element: &Element, rect: Rect) -> Vec<LayoutNode> {
    let children = element.child_elements();
    if children.is_empty() {
        return Vec::new();
    }

    let inner = inner_rect(element, rect);
    let is_row = element.direction == Direction::Row;
    let main_size = if is_row { inner.width } else { inner.height };
    let cross_size = if is_row { inner.height } else { inner.width };
    let scrolls = !is_row && element.overflow == Overflow::Scroll;

    let flow: Vec<&Element> = children
        .iter()
        .filter(|c| c.position != Position::Absolute)
        .collect();
    let gap_total = element
        .gap
        .saturating_mul(flow.len().saturating_sub(1) as u16);

    // First pass: fixed sizes and flex weights
    let mut fixed_total = 0u16;
    let mut flex_weights = 0u16;
    for child in &flow {
        let (before, after) = main_margins(child, is_row);
        fixed_total = fixed_total.saturating_add(before + after);
        match main_axis(child, is_row) {
            Size::Fill => flex_weights += 1,
            Size::Flex(weight) => flex_weights += weight.max(1),
            size => {
                fixed_total = fixed_total.saturating_add(fixed_main(size, child, is_row, main_size))
            }
        }
    }
    let remaining = main_size.saturating_sub(fixed_total.saturating_add(gap_total));

    // Second pass: main-axis size of every flow child, (main, margin_before, margin_after)
    let mut sizes: Vec<(u16, u16, u16)> = Vec::with_capacity(flow.len());
    let mut total_child_size = 0u16;
    for child in &flow {
        let (before, after) = main_margins(child, is_row);
        let main = match main_axis(child, is_row) {
            Size::Fill => flex_share(remaining, 1, flex_weights),
            Size::Flex(weight) => flex_share(remaining, weight.max(1), flex_weights),
            size => fixed_main(size, child, is_row, main_size),
        };
        let (min_main, max_main) = limits(child, is_row);
        let main = min_main.map_or(main, |m| main.max(m));
        let main = max_main.map_or(main, |m| main.min(m));

        sizes.push((main, before, after));
        total_child_size = total_child_size.saturating_add(main + before + after);
    }

    let extra_space = main_size.saturating_sub(total_child_size.saturating_add(gap_total));
    let (start_offset, between_gap) = match element.justify {
        Justify::Start => (0, element.gap),
        Justify::End => (extra_space, element.gap),
        Justify::Center => (extra_space / 2, element.gap),
        Justify::SpaceBetween if flow.len() > 1 => {
            (0, extra_space / (flow.len() - 1) as u16 + element.gap)
        }
        Justify::SpaceBetween => (0, element.gap),
    };

    let mut flow_rects = Vec::with_capacity(flow.len());
    let mut offset = start_offset;
    for (child, &(main, before, after)) in flow.iter().zip(&sizes) {
        let (cross_before, cross_after) = main_margins(child, !is_row);
        let child_align = element.align;
        let available_cross = cross_size.saturating_sub(cross_before + cross_after);

        let cross = match main_axis(child, !is_row) {
            Size::Fixed(n) => n,
            Size::Fill | Size::Flex(_) => available_cross,
            Size::Auto if child_align == Align::Stretch => available_cross,
            Size::Auto => estimate_size(child, !is_row).min(available_cross),
            Size::Percent(p) => (cross_size as f32 * p) as u16,
        };
        let (min_cross, max_cross) = limits(child, !is_row);
        let cross = min_cross.map_or(cross, |m| cross.max(m));
        let cross = max_cross.map_or(cross, |m| cross.min(m));
        let cross = cross.min(available_cross);

        let cross_offset = cross_before
            + match child_align {
                Align::Start | Align::Stretch => 0,
                Align::Center => available_cross.saturating_sub(cross) / 2,
                Align::End => available_cross.saturating_sub(cross),
            };

        let child_rect = if is_row {
            let main = main.min(main_size.saturating_sub(offset.saturating_add(before)));
            Rect::new(
                inner.x.saturating_add(offset).saturating_add(before),
                inner.y.saturating_add(cross_offset),
                main,
                cross,
            )
        } else if scrolls {
            let start = offset as i32 + before as i32 - element.scroll_offset as i32;
            scrolled_rect(inner, start, main, cross_offset, cross)
        } else {
            let main = main.min(main_size.saturating_sub(offset.saturating_add(before)));
            Rect::new(
                inner.x.saturating_add(cross_offset),
                inner.y.saturating_add(offset).saturating_add(before),
                cross,
                main,
            )
        };
        flow_rects.push(child_rect);

        offset = offset
            .saturating_add(before + main + after)
            .saturating_add(between_gap);
    }

    // Stitch flow and absolute children back together in tree order
    let mut flow_rects = flow_rects.into_iter();
    children
        .iter()
        .map(|child| {
            if child.position == Position::Absolute {
                layout_element(child, rect)
            } else {
                let child_rect = flow_rects.next().unwrap_or_default();
                LayoutNode {
                    rect: child_rect,
                    children: layout_children(child, child_rect),
                }
            }
        })
        .collect()
}

/// Place a child of a vertically scrolled column. Children that start above
/// the viewport collapse to zero height, so scrolling moves whole children.
fn scrolled_rect(inner: Rect, start: i32, main: u16, cross_offset: u16, cross: u16) -> Rect {
    let x = inner.x.saturating_add(cross_offset);
    if start < 0 {
        return Rect::new(x, inner.y, cross, 0);
    }
    let y = inner.y.saturating_add(start.min(u16::MAX as i32) as u16);
    Rect::new(x, y, cross, main)
}

fn main_axis(element: &Element, is_row: bool) -> Size {
    if is_row { element.width } else { element.height }
}

fn main_margins(element: &Element, is_row: bool) -> (u16, u16) {
    if is_row {
        (element.margin.left, element.margin.right)
    } else {
        (element.margin.top, element.margin.bottom)
    }
}

fn limits(element: &Element, is_width: bool) -> (Option<u16>, Option<u16>) {
    if is_width {
        (element.min_width, element.max_width)
    } else {
        (element.min_height, element.max_height)
    }
}

fn fixed_main(size: Size, child: &Element, is_row: bool, main_size: u16) -> u16 {
    match size {
        Size::Fixed(n) => n,
        Size::Auto => estimate_size(child, is_row),
        Size::Percent(p) => (main_size as f32 * p) as u16,
        Size::Fill | Size::Flex(_) => 0,
    }
}

fn flex_share(remaining: u16, weight: u16, total_weight: u16) -> u16 {
    if total_weight == 0 {
        return 0;
    }
    (remaining as u32 * weight as u32 / total_weight as u32) as u16
}

fn resolve_size(size: Size, available: u16, element: &Element, is_width: bool) -> u16 {
    let base = match size {
        Size::Fixed(n) => n.min(available),
        Size::Fill | Size::Flex(_) => available,
        Size::Auto => estimate_size(element, is_width).min(available),
        Size::Percent(p) => ((available as f32 * p) as u16).min(available),
    };

    let (min, max) = limits(element, is_width);
    let with_min = min.map_or(base, |m| base.max(m));
    let with_max = max.map_or(with_min, |m| with_min.min(m));

    with_max.min(available)
}

/// Intrinsic size along one axis, used for `Size::Auto`.
fn estimate_size(element: &Element, is_width: bool) -> u16 {
    if let Size::Fixed(n) = main_axis(element, is_width) {
        return n;
    }

    let border_size = element.style.border_size() * 2;
    let padding = if is_width {
        element.padding.horizontal_total()
    } else {
        element.padding.vertical_total()
    };

    let content_size = match &element.content {
        Content::Text(text) => {
            if is_width {
                text.lines().map(display_width).max().unwrap_or(0) as u16
            } else {
                text.lines().count().max(1) as u16
            }
        }
        Content::Children(children) => {
            let along_main = (element.direction == Direction::Row) == is_width;
            let sizes = children
                .iter()
                .filter(|c| c.position != Position::Absolute)
                .map(|c| {
                    let (before, after) = main_margins(c, is_width);
                    estimate_size(c, is_width) + before + after
                });
            if along_main {
                let count = children
                    .iter()
                    .filter(|c| c.position != Position::Absolute)
                    .count();
                let gap_total = element.gap * count.saturating_sub(1) as u16;
                sizes.sum::<u16>() + gap_total
            } else {
                sizes.max().unwrap_or(0)
            }
        }
        Content::None => 0,
    };

    let (min, max) = limits(element, is_width);
    let size = content_size + padding + border_size;
    let size = min.map_or(size, |m| size.max(m));
    max.map_or(size, |m| size.min(m))
}
