mod item;
mod parse;

pub use {
    item::{MenuDescription, MenuItem, MenuItemKind},
    parse::MAX_MENU_DEPTH,
};
