use derive_more::{AsRef, Deref, Display, From, Into};
use freedesktop_icons::lookup;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Theme icon used when an item's own icon cannot be found.
pub const FALLBACK_ICON: &str = "insert-link";
const LOOKUP_SIZE: u16 = 128;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct IconName(String);

crate::impl_string_newtype!(IconName);

/// What an item shows in its sector. Only the renderer looks at this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    Symbol(IconName),
    Image(PathBuf),
}

static CACHE: OnceLock<RwLock<HashMap<IconName, Option<PathBuf>>>> = OnceLock::new();

pub fn find_icon_path(icon_name: &IconName) -> Option<PathBuf> {
    if icon_name.is_empty() {
        return None;
    }

    let path = Path::new(icon_name.as_str());
    if path.is_absolute() && path.exists() {
        return Some(path.to_path_buf());
    }

    let cache = CACHE.get_or_init(|| RwLock::new(HashMap::new()));
    if let Some(hit) = cache.read().get(icon_name) {
        return hit.clone();
    }

    let found = lookup(icon_name.as_str())
        .with_size(LOOKUP_SIZE)
        .with_scale(1)
        .find();
    if found.is_none() {
        log::debug!("Icon '{}' not found in theme", icon_name);
    }
    cache.write().insert(icon_name.clone(), found.clone());
    found
}

/// Resolves an item icon to a file, falling back to the generic link icon.
pub fn resolve(icon: Option<&Icon>) -> Option<PathBuf> {
    let own = match icon {
        Some(Icon::Image(path)) => path.exists().then(|| path.clone()),
        Some(Icon::Symbol(name)) => find_icon_path(name),
        None => None,
    };
    own.or_else(|| find_icon_path(&IconName::from(FALLBACK_ICON)))
}

/// Drops memoised theme lookups, e.g. after the icon theme changed.
pub fn clear_cache() {
    if let Some(cache) = CACHE.get() {
        cache.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_resolves_to_nothing() {
        assert_eq!(find_icon_path(&IconName::from("")), None);
    }

    #[test]
    fn existing_image_is_used_as_is() {
        let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        assert_eq!(
            resolve(Some(&Icon::Image(manifest.clone()))),
            Some(manifest.clone())
        );

        let name = IconName::new(manifest.to_string_lossy());
        assert_eq!(find_icon_path(&name), Some(manifest));
    }
}
