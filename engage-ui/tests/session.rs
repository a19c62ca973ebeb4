use engage_dom::{Element, Event, Key, Modifiers, Rect, Size};
use engage_ui::runtime::{ClickEvent, Context, KeyEvent, Page, Router, Session};
use engage_ui::{Document, Overlay, OverlayConfig, State};

const VIEWPORT: Rect = Rect::new(0, 0, 80, 24);

/// A page with one button that opens a dialog.
struct DialogPage {
    open: State<bool>,
    overlay: Overlay,
    keys: State<Vec<Key>>,
}

impl DialogPage {
    fn new(document: &Document) -> Self {
        let open = State::new(false);
        let handle = open.clone();
        Self {
            overlay: Overlay::new("dialog", document, OverlayConfig::new().title("Dialog"), move || {
                handle.set(false)
            }),
            open,
            keys: State::new(Vec::new()),
        }
    }
}

impl Page for DialogPage {
    fn element(&mut self, cx: &mut Context) -> Element {
        let dialog = self
            .overlay
            .render(self.open.get(), cx.viewport(), Element::text("Are you sure?"));
        Element::col()
            .id("root")
            .width(Size::Fill)
            .height(Size::Fill)
            .child(Element::text("Open").id("open").clickable(true))
            .child(Element::text("Elsewhere").id("elsewhere").clickable(true))
            .child(Element::text("Nowhere").id("nowhere").clickable(true))
            .child(Element::text(format!("keys: {}", self.keys.with(Vec::len))).id("keys"))
            .child_opt(dialog)
    }

    fn on_key(&mut self, event: &KeyEvent, cx: &mut Context) {
        self.keys.update(|keys| keys.push(event.key));
        match event.key {
            Key::Char('q') => cx.quit(),
            Key::Char('n') => cx.navigate("/other"),
            _ => {}
        }
    }

    fn on_click(&mut self, event: &mut ClickEvent, cx: &mut Context) {
        self.overlay.handle_click(event);
        if event.is_stopped() {
            return;
        }
        if event.hits("open") {
            self.open.set(true);
        } else if event.hits("elsewhere") {
            cx.navigate("/other");
        } else if event.hits("nowhere") {
            cx.navigate("/missing");
        }
    }
}

struct OtherPage;

impl Page for OtherPage {
    fn element(&mut self, _cx: &mut Context) -> Element {
        Element::text("other page").id("other")
    }
}

fn session() -> Session {
    let router = Router::new()
        .route("/", DialogPage::new)
        .route("/other", |_: &Document| OtherPage);
    let mut session = Session::new(router, "/", VIEWPORT).expect("route exists");
    session.frame();
    session
}

#[test]
fn test_unknown_initial_route_is_an_error() {
    let result = Session::new(Router::new(), "/nope", VIEWPORT);
    assert!(result.is_err());
}

#[test]
fn test_open_dialog_then_escape() {
    let mut session = session();

    assert!(session.click_on("open"));
    session.frame();
    assert!(session.document().is_scroll_locked());
    assert!(session.buffer().to_text().contains("Are you sure?"));

    session.press(Key::Escape);
    session.frame();
    assert!(!session.document().is_scroll_locked());
    assert!(!session.buffer().to_text().contains("Are you sure?"));
}

#[test]
fn test_escape_is_not_seen_by_page_while_dialog_open() {
    let mut session = session();
    session.click_on("open");
    session.frame();

    session.press(Key::Escape);
    session.frame();
    assert!(session.root().text_content().contains(&"keys: 0"));

    session.press(Key::Escape);
    session.frame();
    assert!(session.root().text_content().contains(&"keys: 1"));
}

#[test]
fn test_backdrop_click_closes_and_panel_click_does_not() {
    let mut session = session();
    session.click_on("open");
    session.frame();

    assert!(session.click_on("dialog-body"));
    session.frame();
    assert!(session.document().is_scroll_locked());

    session.handle_event(Event::Click {
        x: 0,
        y: 23,
        button: engage_dom::MouseButton::Left,
    });
    session.frame();
    assert!(!session.document().is_scroll_locked());
}

#[test]
fn test_page_buttons_unreachable_under_dialog() {
    let mut session = session();
    session.click_on("open");
    session.frame();

    // "elsewhere" sits at (0, 1), under the backdrop
    session.handle_event(Event::Click {
        x: 0,
        y: 1,
        button: engage_dom::MouseButton::Left,
    });
    session.frame();

    assert_eq!(session.path(), "/");
}

#[test]
fn test_navigation_unmounts_previous_page() {
    let mut session = session();
    session.click_on("open");
    session.frame();
    assert!(session.document().is_scroll_locked());

    // Leave while the dialog is still open
    session.press(Key::Char('n'));
    session.frame();

    assert_eq!(session.path(), "/other");
    assert!(!session.document().is_scroll_locked());
    assert_eq!(session.document().key_listener_count(), 0);
    assert_eq!(session.root().text_content(), vec!["other page"]);
}

#[test]
fn test_click_navigation() {
    let mut session = session();

    session.click_on("elsewhere");
    session.frame();

    assert_eq!(session.path(), "/other");
}

#[test]
fn test_unknown_route_keeps_current_page() {
    let mut session = session();

    session.click_on("nowhere");
    session.frame();

    assert_eq!(session.path(), "/");
}

#[test]
fn test_ctrl_c_quits() {
    let mut session = session();
    session.handle_event(Event::Key {
        key: Key::Char('c'),
        modifiers: Modifiers::ctrl(),
    });
    assert!(session.should_quit());
}

#[test]
fn test_page_can_quit() {
    let mut session = session();
    session.press(Key::Char('q'));
    assert!(session.should_quit());
}

#[test]
fn test_resize_changes_viewport() {
    let mut session = session();
    session.handle_event(Event::Resize {
        width: 100,
        height: 30,
    });
    session.frame();

    assert_eq!(session.viewport(), Rect::new(0, 0, 100, 30));
    assert_eq!(session.layout().rect, Rect::new(0, 0, 100, 30));
}
