//! JSON wire format for menu descriptions.
//!
//! ```json
//! [
//!   {"type": "action", "label": "Settings...", "id": "settings", "enabled": true},
//!   {"type": "separator"},
//!   {"type": "submenu", "label": "Services", "id": "services", "children": [ ... ]}
//! ]
//! ```

use crate::{
    BridgeError, CoreResult,
    menu::{MenuDescription, MenuItem, MenuItemKind},
};

use std::{collections::HashSet, panic::Location};

use error_location::ErrorLocation;
use serde::Deserialize;

/// Deepest submenu nesting accepted.
pub const MAX_MENU_DEPTH: usize = 16;

#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(rename = "type")]
    kind: Option<String>,
    label: Option<String>,
    id: Option<String>,
    enabled: Option<bool>,
    children: Option<Vec<RawItem>>,
}

#[track_caller]
fn failure(reason: String) -> BridgeError {
    BridgeError::ParseFailure {
        reason,
        location: ErrorLocation::from(Location::caller()),
    }
}

#[track_caller]
pub(crate) fn parse_description(payload: &str) -> CoreResult<MenuDescription> {
    let raw: Vec<RawItem> = serde_json::from_str(payload)
        .map_err(|e| failure(format!("menu payload is not an array of items: {}", e)))?;

    let items = convert_level(raw, 1, "")?;
    Ok(MenuDescription::from_items(items))
}

#[track_caller]
fn convert_level(raw: Vec<RawItem>, depth: usize, path: &str) -> CoreResult<Vec<MenuItem>> {
    if depth > MAX_MENU_DEPTH {
        return Err(failure(format!(
            "menu nesting at {} exceeds {} levels",
            path, MAX_MENU_DEPTH
        )));
    }

    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(raw.len());

    for (index, entry) in raw.into_iter().enumerate() {
        let here = if path.is_empty() {
            index.to_string()
        } else {
            format!("{}.{}", path, index)
        };

        let kind = match entry.kind.as_deref() {
            Some("separator") => MenuItemKind::Separator,
            Some("action") => MenuItemKind::Action,
            Some("submenu") => MenuItemKind::Submenu,
            Some(other) => return Err(failure(format!("item {}: unknown type {:?}", here, other))),
            None => return Err(failure(format!("item {}: missing type", here))),
        };

        if kind == MenuItemKind::Separator {
            items.push(MenuItem::separator());
            continue;
        }

        let label = entry
            .label
            .filter(|l| !l.is_empty())
            .ok_or_else(|| failure(format!("item {}: missing label", here)))?;
        let id = entry
            .id
            .filter(|i| !i.is_empty())
            .ok_or_else(|| failure(format!("item {}: missing id", here)))?;

        if !seen.insert(id.clone()) {
            return Err(failure(format!("item {}: duplicate sibling id {:?}", here, id)));
        }

        let children = match kind {
            MenuItemKind::Submenu => {
                convert_level(entry.children.unwrap_or_default(), depth + 1, &here)?
            }
            _ => Vec::new(),
        };

        items.push(MenuItem {
            label,
            id,
            enabled: entry.enabled.unwrap_or(true),
            kind,
            children,
        });
    }

    Ok(items)
}

/// Apply the wire-format rules to a tree built in code.
#[track_caller]
pub(crate) fn validate_tree(items: &[MenuItem]) -> CoreResult<()> {
    #[track_caller]
    fn level(items: &[MenuItem], depth: usize) -> CoreResult<()> {
        if depth > MAX_MENU_DEPTH {
            return Err(failure(format!("menu nesting exceeds {} levels", MAX_MENU_DEPTH)));
        }
        let mut seen = HashSet::new();
        for item in items.iter().filter(|i| i.kind != MenuItemKind::Separator) {
            if item.label.is_empty() || item.id.is_empty() {
                return Err(failure(format!("item {:?} needs both label and id", item.id)));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(failure(format!("duplicate sibling id {:?}", item.id)));
            }
            if item.kind == MenuItemKind::Submenu {
                level(&item.children, depth + 1)?;
            }
        }
        Ok(())
    }
    level(items, 1)
}
