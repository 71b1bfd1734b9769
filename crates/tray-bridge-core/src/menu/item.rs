use crate::{CoreResult, menu::parse};

/// What a menu entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItemKind {
    /// Horizontal divider. Carries no label or identifier.
    Separator,
    /// Clickable leaf.
    Action,
    /// Nested menu holding `children`.
    Submenu,
}

/// One entry of a menu description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Display text.
    pub label: String,
    /// Opaque identifier reported back on activation.
    pub id: String,
    /// Whether the entry can be clicked.
    pub enabled: bool,
    /// Entry kind.
    pub kind: MenuItemKind,
    /// Ordered children. Only populated for submenus.
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    /// Divider line.
    pub fn separator() -> Self {
        Self {
            label: String::new(),
            id: String::new(),
            enabled: true,
            kind: MenuItemKind::Separator,
            children: Vec::new(),
        }
    }

    /// Enabled leaf action.
    pub fn action(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            id: id.into(),
            enabled: true,
            kind: MenuItemKind::Action,
            children: Vec::new(),
        }
    }

    /// Enabled submenu.
    pub fn submenu(id: impl Into<String>, label: impl Into<String>, children: Vec<MenuItem>) -> Self {
        Self {
            label: label.into(),
            id: id.into(),
            enabled: true,
            kind: MenuItemKind::Submenu,
            children,
        }
    }

    /// Same item with `enabled` replaced.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Ordered menu tree, in on-screen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuDescription {
    items: Vec<MenuItem>,
}

impl MenuDescription {
    /// Build from already-validated items.
    pub(crate) fn from_items(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// Parse the JSON wire format. All-or-nothing.
    #[track_caller]
    pub fn parse(payload: &str) -> CoreResult<Self> {
        parse::parse_description(payload)
    }

    /// Validate a tree built in code with the same rules as [`Self::parse`].
    #[track_caller]
    pub fn from_tree(items: Vec<MenuItem>) -> CoreResult<Self> {
        parse::validate_tree(&items)?;
        Ok(Self::from_items(items))
    }

    /// Top-level items.
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Whether the menu has no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find a leaf action by identifier anywhere in the tree.
    pub fn find_action(&self, id: &str) -> Option<&MenuItem> {
        fn walk<'a>(items: &'a [MenuItem], id: &str) -> Option<&'a MenuItem> {
            items.iter().find_map(|item| match item.kind {
                MenuItemKind::Action if item.id == id => Some(item),
                MenuItemKind::Submenu => walk(&item.children, id),
                _ => None,
            })
        }
        walk(&self.items, id)
    }
}
