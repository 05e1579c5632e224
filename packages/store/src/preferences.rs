use crate::keys;
use crate::models::Theme;
use crate::storage::KeyValueStore;

/// Saved theme, light when nothing (or garbage) is stored.
pub fn load_theme<S: KeyValueStore + ?Sized>(store: &S) -> Theme {
    store
        .get(keys::THEME)
        .map(|s| Theme::parse(&s))
        .unwrap_or_default()
}

pub fn save_theme<S: KeyValueStore + ?Sized>(store: &S, theme: Theme) {
    store.set(keys::THEME, theme.as_str());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn test_theme_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(load_theme(&store), Theme::Light);

        save_theme(&store, Theme::Dark);
        assert_eq!(store.get(keys::THEME).as_deref(), Some("dark"));
        assert_eq!(load_theme(&store), Theme::Dark);
    }
}
