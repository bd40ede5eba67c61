//! Persisted theme store
//!
//! ThemeStore owns the one theme selection of a running app.
//! - Reads persisted state once at construction, migrating stale schema versions
//! - Writes document markers synchronously with every commit, before
//!   subscribers are notified, so layout reads see the new theme immediately
//! - Persists every commit; storage failures are logged and the in-memory
//!   state stays authoritative for the session

use std::fmt;
use std::rc::Rc;

use scorpion_core::{DocumentHost, KeyValueStore, Signal, Subscription};
use tracing::{debug, info, warn};

use crate::config::ThemeConfig;
use crate::keys::*;
use crate::theme::{parse_flag, ThemeName, ThemeState};

/// Theme store for one running app
pub struct ThemeStore {
    storage: Rc<dyn KeyValueStore>,
    document: Rc<dyn DocumentHost>,
    config: ThemeConfig,
    state: Signal<ThemeState>,
}

impl fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeStore")
            .field("state", &self.state.get())
            .field("schema_version", &self.config.schema_version)
            .finish_non_exhaustive()
    }
}

impl ThemeStore {
    /// Load the persisted theme and sync the document.
    ///
    /// Whatever was resolved (including defaults that replaced invalid or
    /// stale values) is written back to storage.
    pub fn load(
        storage: Rc<dyn KeyValueStore>,
        document: Rc<dyn DocumentHost>,
        config: ThemeConfig,
    ) -> Self {
        let initial = resolve_initial(storage.as_ref(), &config);
        debug!(
            theme = %initial.theme_name,
            retro_dark = initial.retro_dark,
            "ThemeStore::load"
        );

        let store = Self {
            storage,
            document,
            config,
            state: Signal::new(initial),
        };
        store.apply_document(initial);
        store.persist(initial);
        store
    }

    // ========== Reads ==========

    /// Get the current state
    pub fn get(&self) -> ThemeState {
        self.state.get()
    }

    /// Get the active theme name
    pub fn theme(&self) -> ThemeName {
        self.state.with(|s| s.theme_name)
    }

    /// Get the retro dark flag (meaningful only under retro)
    pub fn retro_dark(&self) -> bool {
        self.state.with(|s| s.retro_dark)
    }

    /// Schema version this store persists with
    pub fn schema_version(&self) -> &str {
        &self.config.schema_version
    }

    /// Reactive handle to the state
    pub fn signal(&self) -> Signal<ThemeState> {
        self.state.clone()
    }

    /// Subscribe to committed changes
    pub fn subscribe(&self, f: impl Fn(&ThemeState) + 'static) -> Subscription {
        self.state.subscribe(f)
    }

    // ========== Mutations ==========

    /// Set the theme
    pub fn set_theme(&self, name: ThemeName) {
        let next = ThemeState {
            theme_name: name,
            ..self.get()
        };
        self.commit(next);
    }

    /// Set the theme from an untrusted name.
    ///
    /// Unrecognized names fall back to modern with a warning instead of being
    /// rejected.
    pub fn set_theme_str(&self, name: &str) {
        let parsed = name.parse().unwrap_or_else(|err| {
            warn!(%err, "ThemeStore::set_theme - falling back to modern");
            ThemeName::Modern
        });
        self.set_theme(parsed);
    }

    /// Flip between modern and retro
    pub fn toggle_theme(&self) {
        self.set_theme(self.theme().toggle());
    }

    /// Set the retro dark flag
    pub fn set_retro_dark(&self, flag: bool) {
        let next = ThemeState {
            retro_dark: flag,
            ..self.get()
        };
        self.commit(next);
    }

    /// Flip the retro dark flag
    pub fn toggle_retro_dark(&self) {
        self.set_retro_dark(!self.retro_dark());
    }

    fn commit(&self, next: ThemeState) {
        if self.state.with(|current| *current == next) {
            return;
        }

        debug!(
            theme = %next.theme_name,
            retro_dark = next.retro_dark,
            "ThemeStore::commit"
        );

        // Markers first: subscribers may read layout synchronously
        self.apply_document(next);
        self.persist(next);
        self.state.set(next);
    }

    fn apply_document(&self, state: ThemeState) {
        let doc = &self.document;
        doc.set_root_attribute(THEME_ATTRIBUTE, state.theme_name.as_str());
        doc.toggle_root_class(RETRO_CLASS, state.theme_name.is_retro());
        if state.dark_mode_active() {
            doc.set_root_attribute(RETRO_DARK_ATTRIBUTE, "true");
        } else {
            doc.remove_root_attribute(RETRO_DARK_ATTRIBUTE);
        }
    }

    fn persist(&self, state: ThemeState) {
        let writes = [
            (THEME_NAME_KEY, state.theme_name.as_str()),
            (RETRO_DARK_KEY, if state.retro_dark { "true" } else { "false" }),
        ];
        for (key, value) in writes {
            if let Err(err) = self.storage.set(key, value) {
                warn!(%err, key, "ThemeStore - failed to persist, keeping in-memory state");
            }
        }
    }
}

/// Read a key, treating storage faults as "never stored"
fn read(storage: &dyn KeyValueStore, key: &str) -> Option<String> {
    storage.get(key).unwrap_or_else(|err| {
        warn!(%err, key, "ThemeStore - failed to read persisted value");
        None
    })
}

fn resolve_initial(storage: &dyn KeyValueStore, config: &ThemeConfig) -> ThemeState {
    let stored_version = read(storage, SCHEMA_VERSION_KEY);
    if stored_version.as_deref() != Some(config.schema_version.as_str()) {
        info!(
            stored = stored_version.as_deref().unwrap_or("<none>"),
            expected = %config.schema_version,
            "ThemeStore - schema version changed, resetting theme"
        );
        for key in [THEME_NAME_KEY, RETRO_DARK_KEY] {
            if let Err(err) = storage.remove(key) {
                warn!(%err, key, "ThemeStore - failed to clear stale value");
            }
        }
        if let Err(err) = storage.set(SCHEMA_VERSION_KEY, &config.schema_version) {
            warn!(%err, "ThemeStore - failed to write schema version");
        }
        return ThemeState::default();
    }

    let theme_name = match read(storage, THEME_NAME_KEY) {
        None => ThemeName::default(),
        Some(raw) => raw.parse().unwrap_or_else(|err| {
            warn!(%err, "ThemeStore - invalid persisted theme, using default");
            ThemeName::default()
        }),
    };

    let retro_dark = match read(storage, RETRO_DARK_KEY) {
        None => false,
        Some(raw) => parse_flag(&raw).unwrap_or_else(|err| {
            warn!(%err, "ThemeStore - invalid persisted dark flag, using false");
            false
        }),
    };

    ThemeState {
        theme_name,
        retro_dark,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorpion_core::{MemoryDocument, MemoryStore};

    fn current_store(entries: &[(&str, &str)]) -> Rc<MemoryStore> {
        let mut all: Vec<(String, String)> = vec![(
            SCHEMA_VERSION_KEY.to_string(),
            crate::CURRENT_SCHEMA_VERSION.to_string(),
        )];
        all.extend(entries.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        Rc::new(MemoryStore::with_entries(all))
    }

    #[test]
    fn test_resolve_reads_valid_values() {
        let storage = current_store(&[(THEME_NAME_KEY, "modern"), (RETRO_DARK_KEY, "true")]);
        let state = resolve_initial(storage.as_ref(), &ThemeConfig::default());
        assert_eq!(state, ThemeState::new(ThemeName::Modern, true));
    }

    #[test]
    fn test_resolve_unparsable_flag_defaults_false() {
        let storage = current_store(&[(THEME_NAME_KEY, "retro"), (RETRO_DARK_KEY, "1")]);
        let state = resolve_initial(storage.as_ref(), &ThemeConfig::default());
        assert_eq!(state, ThemeState::new(ThemeName::Retro, false));
    }

    #[test]
    fn test_unchanged_commit_skips_side_effects() {
        let storage = current_store(&[(THEME_NAME_KEY, "retro")]);
        let document = Rc::new(MemoryDocument::new());
        let store = ThemeStore::load(storage.clone(), document.clone(), ThemeConfig::default());

        let notified = Rc::new(std::cell::Cell::new(0));
        let n = notified.clone();
        let _sub = store.subscribe(move |_| n.set(n.get() + 1));

        store.set_theme(ThemeName::Retro);
        store.set_retro_dark(false);
        assert_eq!(notified.get(), 0);
    }
}
