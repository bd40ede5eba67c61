//! Theme provisioning scope
//!
//! The store is created by the root of the UI tree and provided to everything
//! below it. Reading it anywhere else is an integration bug and panics.

use std::rc::Rc;

use scorpion_core::{provide, try_use_context, ProvideGuard};

use crate::state::ThemeStore;

/// Provides a [`ThemeStore`] while alive
#[derive(Debug)]
pub struct ThemeProvider {
    store: Rc<ThemeStore>,
    _guard: ProvideGuard,
}

impl ThemeProvider {
    pub fn new(store: Rc<ThemeStore>) -> Self {
        let guard = provide(Rc::clone(&store));
        Self {
            store,
            _guard: guard,
        }
    }

    pub fn store(&self) -> &Rc<ThemeStore> {
        &self.store
    }
}

/// Get the provided theme store.
///
/// # Panics
///
/// Panics if no [`ThemeProvider`] is alive on this thread.
#[track_caller]
pub fn use_app_theme() -> Rc<ThemeStore> {
    match try_use_app_theme() {
        Some(store) => store,
        None => panic!("use_app_theme must be used within ThemeProvider"),
    }
}

/// Get the provided theme store, if any
pub fn try_use_app_theme() -> Option<Rc<ThemeStore>> {
    try_use_context::<ThemeStore>()
}
