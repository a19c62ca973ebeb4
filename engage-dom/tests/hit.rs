use engage_dom::{Element, Position, Rect, Size, hit_path, layout};

fn screen(with_overlay: bool) -> Element {
    let page = Element::text("Add").id("btn").clickable(true);
    let overlay = Element::box_()
        .id("backdrop")
        .position(Position::Absolute)
        .left(0)
        .top(0)
        .width(Size::Fill)
        .height(Size::Fill)
        .z_index(10)
        .child(
            Element::box_()
                .id("panel")
                .width(Size::Fixed(6))
                .height(Size::Fixed(3)),
        );

    let root = Element::box_()
        .id("root")
        .width(Size::Fixed(20))
        .height(Size::Fixed(10))
        .child(page);
    if with_overlay { root.child(overlay) } else { root }
}

#[test]
fn test_hit_path_is_deepest_first() {
    let root = screen(false);
    let node = layout(&root, Rect::from_size(20, 10));

    assert_eq!(hit_path(&node, &root, 0, 0), vec!["btn", "root"]);
    assert_eq!(hit_path(&node, &root, 10, 5), vec!["root"]);
    assert!(hit_path(&node, &root, 30, 30).is_empty());
}

#[test]
fn test_overlay_hides_page_from_clicks() {
    let root = screen(true);
    let node = layout(&root, Rect::from_size(20, 10));

    assert_eq!(hit_path(&node, &root, 1, 0), vec!["panel", "backdrop", "root"]);
    assert_eq!(hit_path(&node, &root, 10, 5), vec!["backdrop", "root"]);
}

#[test]
fn test_elements_without_id_are_skipped() {
    let root = Element::box_()
        .id("root")
        .width(Size::Fixed(5))
        .height(Size::Fixed(1))
        .child(Element::row().child(Element::text("x").id("leaf")));
    let node = layout(&root, Rect::from_size(5, 1));

    assert_eq!(hit_path(&node, &root, 0, 0), vec!["leaf", "root"]);
}
