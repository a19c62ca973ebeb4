//! Ticket categories: list, search, add, edit and delete.
//!
//! The add and edit dialogs share one pair of text fields. Deleting always
//! goes through a confirmation dialog, which can stack on top of the edit
//! dialog.

use engage_ui::prelude::*;
use log::info;

use super::shell::{Section, handle_shell_click, shell};
use crate::app::{Services, routes};
use crate::fixtures::{self, Category};

pub const ADD_ID: &str = "add-category";
pub const SEARCH_ID: &str = "category-search";
pub const PREV_ID: &str = "categories-prev";
pub const NEXT_ID: &str = "categories-next";
pub const PAGE_LABEL_ID: &str = "categories-page";
pub const SAVE_ID: &str = "category-form-save";
pub const CANCEL_ID: &str = "category-form-cancel";
pub const FORM_DELETE_ID: &str = "category-form-delete";
pub const DELETE_CONFIRM_ID: &str = "category-delete-confirm";
pub const DELETE_CANCEL_ID: &str = "category-delete-cancel";

const TABLE_ID: &str = "categories";
const PER_PAGE: usize = 5;
const NAME_MAX: usize = 50;
const DESCRIPTION_MAX: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormMode {
    Add,
    Edit(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Name,
    Description,
}

impl Focus {
    fn field(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
        }
    }
}

fn category_columns() -> Vec<Column<Category>> {
    vec![
        Column::new("name", "Name", |c: &Category, _| {
            Element::text(c.name.clone())
                .text_wrap(TextWrap::Truncate)
                .style(Style::new().foreground(theme::TEXT).bold())
        })
        .width(Size::Flex(2)),
        Column::new("description", "Description", |c: &Category, _| {
            Element::text(c.description.clone())
                .text_wrap(TextWrap::Truncate)
                .style(Style::new().foreground(theme::TEXT_MUTED))
        })
        .width(Size::Flex(3)),
        Column::new("created", "Created", |c: &Category, _| Element::text(c.created_at.clone()))
            .width(Size::Fixed(17)),
        Column::new("actions", "", |c: &Category, _| {
            Element::row()
                .gap(1)
                .child(icon_button(format!("edit-{}", c.id), "✎", theme::PRIMARY))
                .child(icon_button(format!("delete-{}", c.id), "✕", theme::ERROR))
        })
        .width(Size::Fixed(5))
        .align(TextAlign::Right),
    ]
}

fn form_footer(with_delete: bool) -> Element {
    let delete = with_delete.then(|| button(FORM_DELETE_ID, "Delete", ButtonVariant::Danger, false));
    Element::row()
        .gap(1)
        .child_opt(delete)
        .child(button(CANCEL_ID, "Cancel", ButtonVariant::Secondary, false))
        .child(button(SAVE_ID, "Save", ButtonVariant::Primary, false))
}

pub struct CategoriesPage {
    services: Services,
    categories: Vec<Category>,
    table: Table<Category>,
    search: TextField,
    pagination: Pagination,
    scroll: PageScroll,
    name: TextField,
    description: TextField,
    focus: Focus,
    errors: FormErrors,
    form: State<Option<FormMode>>,
    confirm: State<Option<u32>>,
    add_dialog: Overlay,
    edit_dialog: Overlay,
    delete_dialog: Overlay,
    toast_open: State<bool>,
    toast: Toast,
}

impl CategoriesPage {
    pub fn new(document: &Document, services: Services) -> Self {
        services.load_user();

        let form = State::new(None);
        let confirm = State::new(None);
        let toast_open = State::new(false);

        let close = form.clone();
        let add_dialog = Overlay::new(
            "category-add",
            document,
            OverlayConfig::new().title("Add category").footer(form_footer(false)),
            move || close.set(None),
        );
        let close = form.clone();
        let edit_dialog = Overlay::new(
            "category-edit",
            document,
            OverlayConfig::new().title("Edit category").footer(form_footer(true)),
            move || close.set(None),
        );
        let close = confirm.clone();
        let delete_dialog = Overlay::new(
            "category-delete",
            document,
            OverlayConfig::new()
                .title("Delete category")
                .size(OverlaySize::Sm)
                .z_index(theme::layer::OVERLAY + 10)
                .footer(
                    Element::row()
                        .gap(1)
                        .child(button(DELETE_CANCEL_ID, "Cancel", ButtonVariant::Secondary, false))
                        .child(button(DELETE_CONFIRM_ID, "Delete", ButtonVariant::Danger, false)),
                ),
            move || close.set(None),
        );
        let dismiss = toast_open.clone();

        Self {
            services,
            categories: fixtures::categories(),
            table: Table::new(TABLE_ID, category_columns()).empty_message("No categories found"),
            search: TextField::new(SEARCH_ID, "Search").placeholder("Name or description"),
            pagination: Pagination::new(PER_PAGE),
            scroll: PageScroll::new(),
            name: TextField::new("category-name", "Name").placeholder("e.g. Billing"),
            description: TextField::new("category-description", "Description")
                .placeholder("What belongs in this category"),
            focus: Focus::Name,
            errors: FormErrors::new(),
            form,
            confirm,
            add_dialog,
            edit_dialog,
            delete_dialog,
            toast: Toast::new("categories-toast", ToastLevel::Success, "", move || dismiss.set(false))
                .with_duration(engage_ui::toast::DEFAULT_TOAST_DURATION),
            toast_open,
        }
    }

    fn visible(&self) -> Vec<&Category> {
        fuzzy_filter(self.search.value(), &self.categories, |c| {
            format!("{} {}", c.name, c.description)
        })
        .into_iter()
        .map(|i| &self.categories[i])
        .collect()
    }

    fn find(&self, id: u32) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    fn notify(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast.set_message(level, message);
        self.toast_open.set(true);
    }

    fn open_form(&mut self, mode: FormMode) {
        let (name, description) = match mode {
            FormMode::Add => (String::new(), String::new()),
            FormMode::Edit(id) => match self.find(id) {
                Some(category) => (category.name.clone(), category.description.clone()),
                None => return,
            },
        };
        self.name.clear();
        self.description.clear();
        self.name.set_value(name);
        self.description.set_value(description);
        self.errors.clear();
        self.focus = Focus::Name;
        self.form.set(Some(mode));
    }

    fn focused_field(&mut self) -> &mut TextField {
        match self.focus {
            Focus::Name => &mut self.name,
            Focus::Description => &mut self.description,
        }
    }

    fn show_errors(&mut self) {
        self.name.set_error(self.errors.get("name").map(str::to_string));
        self.description.set_error(self.errors.get("description").map(str::to_string));
    }

    fn save(&mut self) {
        let Some(mode) = self.form.get() else {
            return;
        };
        let editing = match mode {
            FormMode::Add => None,
            FormMode::Edit(id) => Some(id),
        };
        let taken: Vec<String> = self
            .categories
            .iter()
            .filter(|c| Some(c.id) != editing)
            .map(|c| c.name.to_lowercase())
            .collect();

        let name = self.name.value().trim().to_string();
        let description = self.description.value().trim().to_string();
        let result = Validator::new()
            .field("name", &name)
            .required("Name is required")
            .max_length(NAME_MAX, format!("Name must be at most {NAME_MAX} characters"))
            .rule(
                move |v| !taken.contains(&v.to_lowercase()),
                "A category with this name already exists",
            )
            .field("description", &description)
            .max_length(
                DESCRIPTION_MAX,
                format!("Description must be at most {DESCRIPTION_MAX} characters"),
            )
            .validate();
        if !result.is_valid() {
            self.errors = FormErrors::from_result(&result);
            self.show_errors();
            return;
        }

        match mode {
            FormMode::Add => {
                let id = self.categories.iter().map(|c| c.id).max().unwrap_or(0) + 1;
                info!("created category {id}");
                self.categories.insert(
                    0,
                    Category {
                        id,
                        name: name.clone(),
                        description,
                        created_at: fixtures::timestamp(),
                    },
                );
                self.pagination.set_page(1, self.categories.len());
                self.notify(ToastLevel::Success, format!("Created \"{name}\""));
            }
            FormMode::Edit(id) => {
                let Some(category) = self.categories.iter_mut().find(|c| c.id == id) else {
                    self.form.set(None);
                    return;
                };
                category.name = name.clone();
                category.description = description;
                info!("updated category {id}");
                self.notify(ToastLevel::Success, format!("Updated \"{name}\""));
            }
        }
        self.form.set(None);
    }

    fn delete_confirmed(&mut self) {
        let Some(id) = self.confirm.get() else {
            return;
        };
        self.confirm.set(None);
        if self.form.get().is_some() {
            self.form.set(None);
        }

        let Some(index) = self.categories.iter().position(|c| c.id == id) else {
            return;
        };
        let removed = self.categories.remove(index);
        info!("deleted category {id}");
        let total = self.visible().len();
        self.pagination.clamp(total);
        self.notify(ToastLevel::Success, format!("Deleted \"{}\"", removed.name));
    }

    fn form_body(&self) -> Element {
        Element::col()
            .child(self.name.element(self.focus == Focus::Name))
            .child(self.description.element(self.focus == Focus::Description))
    }

    fn delete_body(&self, id: Option<u32>) -> Element {
        let name = id.and_then(|id| self.find(id)).map(|c| c.name.clone()).unwrap_or_default();
        Element::col()
            .child(Element::text(format!("Delete \"{name}\"?")).style(Style::new().foreground(theme::TEXT)))
            .child(
                Element::text("Tickets keep their history but lose this category.")
                    .style(Style::new().foreground(theme::TEXT_MUTED)),
            )
    }

    fn on_form_key(&mut self, event: &KeyEvent) {
        match event.key {
            Key::Tab | Key::BackTab => {
                self.focus = match self.focus {
                    Focus::Name => Focus::Description,
                    Focus::Description => Focus::Name,
                };
            }
            Key::Enter => self.save(),
            _ => {
                let focus = self.focus;
                let field = self.focused_field();
                if field.handle_key(event) && field.error().is_some() {
                    field.set_error(None);
                    self.errors.clear_field(focus.field());
                }
            }
        }
    }

    fn on_form_click(&mut self, event: &mut ClickEvent) {
        if event.hits(SAVE_ID) {
            self.save();
        } else if event.hits(CANCEL_ID) {
            self.form.set(None);
        } else if event.hits(FORM_DELETE_ID) {
            if let Some(FormMode::Edit(id)) = self.form.get() {
                self.confirm.set(Some(id));
            }
        } else if event.hits(self.name.id()) {
            self.focus = Focus::Name;
        } else if event.hits(self.description.id()) {
            self.focus = Focus::Description;
        } else {
            self.add_dialog.handle_click(event);
            self.edit_dialog.handle_click(event);
        }
    }
}

impl Page for CategoriesPage {
    fn element(&mut self, cx: &mut Context) -> Element {
        let total = self.visible().len();
        self.pagination.clamp(total);
        let visible: Vec<Category> = self.visible().into_iter().cloned().collect();
        let rows = self.pagination.slice(&visible);

        let toolbar = Element::row()
            .width(Size::Fill)
            .gap(1)
            .align(Align::End)
            .child(self.search.element(self.form.get().is_none()))
            .child(button(ADD_ID, "+ Add category", ButtonVariant::Primary, false));

        let pager = Element::row()
            .width(Size::Fill)
            .gap(1)
            .child(
                Element::text(self.pagination.label(total))
                    .id(PAGE_LABEL_ID)
                    .width(Size::Fill)
                    .style(Style::new().foreground(theme::TEXT_MUTED)),
            )
            .child(button(PREV_ID, "‹ Prev", ButtonVariant::Secondary, !self.pagination.has_prev()))
            .child(button(NEXT_ID, "Next ›", ButtonVariant::Secondary, !self.pagination.has_next(total)));

        let content = Element::col()
            .overflow(Overflow::Scroll)
            .scroll_offset(self.scroll.offset())
            .gap(1)
            .child(toolbar)
            .child(self.table.render(rows))
            .child(pager);

        let form = self.form.get();
        let confirm = self.confirm.get();
        let viewport = cx.viewport();
        let add = self.add_dialog.render(form == Some(FormMode::Add), viewport, self.form_body());
        let edit = self.edit_dialog.render(
            matches!(form, Some(FormMode::Edit(_))),
            viewport,
            self.form_body(),
        );
        let delete = self
            .delete_dialog
            .render(confirm.is_some(), viewport, self.delete_body(confirm));
        let toast = self.toast.render(self.toast_open.get(), viewport);

        let user = self.services.user.get();
        shell(Section::Settings, "Categories", user.as_ref(), content)
            .child_opt(add)
            .child_opt(edit)
            .child_opt(delete)
            .child_opt(toast)
    }

    fn on_key(&mut self, event: &KeyEvent, cx: &mut Context) {
        if self.confirm.get().is_some() {
            if event.key == Key::Enter {
                self.delete_confirmed();
            }
            return;
        }
        if self.form.get().is_some() {
            self.on_form_key(event);
            return;
        }

        let total = self.visible().len();
        if event.is_ctrl('n') {
            self.open_form(FormMode::Add);
            return;
        }
        match event.key {
            Key::Escape => cx.navigate(routes::SETTINGS),
            Key::PageDown => self.pagination.next(total),
            Key::PageUp => self.pagination.prev(total),
            _ => {
                if self.search.handle_key(event) {
                    self.pagination.set_page(1, total);
                    self.scroll.reset();
                }
            }
        }
    }

    fn on_click(&mut self, event: &mut ClickEvent, cx: &mut Context) {
        self.toast.handle_click(event);
        if event.is_stopped() {
            return;
        }

        // The topmost dialog owns every click while it is open
        if self.confirm.get().is_some() {
            if event.hits(DELETE_CONFIRM_ID) {
                self.delete_confirmed();
            } else if event.hits(DELETE_CANCEL_ID) {
                self.confirm.set(None);
            } else {
                self.delete_dialog.handle_click(event);
            }
            return;
        }
        if self.form.get().is_some() {
            self.on_form_click(event);
            return;
        }

        if handle_shell_click(event, &self.services, cx) {
            return;
        }
        let total = self.visible().len();
        if event.hits(ADD_ID) {
            self.open_form(FormMode::Add);
        } else if event.hits(PREV_ID) {
            self.pagination.prev(total);
        } else if event.hits(NEXT_ID) {
            self.pagination.next(total);
        } else if let Some(id) = event.hit_with_prefix("edit-").and_then(|id| id.parse().ok()) {
            self.open_form(FormMode::Edit(id));
        } else if let Some(id) = event.hit_with_prefix("delete-").and_then(|id| id.parse().ok()) {
            self.confirm.set(Some(id));
        }
    }

    fn on_scroll(&mut self, event: &ScrollEvent, cx: &mut Context) {
        if self.delete_dialog.handle_scroll(event)
            || self.add_dialog.handle_scroll(event)
            || self.edit_dialog.handle_scroll(event)
        {
            return;
        }
        // toolbar, table, pager
        self.scroll.scroll_by(event.delta, 2, cx.document());
    }
}
