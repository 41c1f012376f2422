use crate::icon::{Icon, IconName};
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ItemId(String);

crate::impl_string_newtype!(ItemId);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Label(String);

crate::impl_string_newtype!(Label);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct LinkTarget(String);

crate::impl_string_newtype!(LinkTarget);

/// A launcher entry. Anything with children is a group, everything else a
/// leaf.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "ItemConfig")]
pub struct MenuItem {
    pub id: ItemId,
    pub label: Label,
    pub target: Option<LinkTarget>,
    pub icon: Option<Icon>,
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    pub fn leaf(id: impl Into<String>, label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(id),
            label: Label::new(label),
            target: Some(LinkTarget::new(target)),
            icon: None,
            children: Vec::new(),
        }
    }

    pub fn group(id: impl Into<String>, label: impl Into<String>, children: Vec<MenuItem>) -> Self {
        Self {
            id: ItemId::new(id),
            label: Label::new(label),
            target: None,
            icon: None,
            children,
        }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Top-level group `id`, provided it has something to disclose.
pub fn find_group<'a>(items: &'a [MenuItem], id: &ItemId) -> Option<&'a MenuItem> {
    items.iter().find(|item| &item.id == id && item.is_group())
}

/// Cuts the tree down to two levels. Nested groups below the top level are
/// replaced by their leaves, in depth-first order; a nested group that has a
/// target of its own stays as a leaf in front of them.
pub fn normalize(items: Vec<MenuItem>) -> Vec<MenuItem> {
    items
        .into_iter()
        .map(|mut item| {
            let children = std::mem::take(&mut item.children);
            children
                .into_iter()
                .for_each(|child| flatten_into(child, &mut item.children));
            item
        })
        .collect()
}

fn flatten_into(mut item: MenuItem, out: &mut Vec<MenuItem>) {
    let children = std::mem::take(&mut item.children);
    if children.is_empty() {
        out.push(item);
        return;
    }

    log::warn!(
        "Nested group '{}' is deeper than two levels, flattening {} children",
        item.id,
        children.len()
    );
    if item.target.is_some() {
        out.push(item);
    }
    for child in children {
        flatten_into(child, out);
    }
}

#[derive(Deserialize)]
struct ItemConfig {
    id: Option<ItemId>,
    label: Label,
    #[serde(alias = "target")]
    url: Option<LinkTarget>,
    icon: Option<IconName>,
    #[serde(alias = "img")]
    image: Option<PathBuf>,
    #[serde(default)]
    children: Vec<MenuItem>,
}

impl From<ItemConfig> for MenuItem {
    fn from(cfg: ItemConfig) -> Self {
        let id = cfg
            .id
            .unwrap_or_else(|| ItemId::new(cfg.label.to_lowercase()));
        // an image wins over a theme icon
        let icon = cfg
            .image
            .map(Icon::Image)
            .or_else(|| cfg.icon.map(Icon::Symbol));

        Self {
            id,
            label: cfg.label,
            target: cfg.url,
            icon,
            children: cfg.children,
        }
    }
}
