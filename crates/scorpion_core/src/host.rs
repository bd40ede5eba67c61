//! Host bundles
//!
//! [`Host`] groups the four host services behind trait objects so controllers
//! can be mounted against the browser or the headless implementations alike.

use std::rc::Rc;

use crate::document::{DocumentHost, MemoryDocument};
use crate::scheduler::{ManualScheduler, Scheduler};
use crate::storage::{KeyValueStore, MemoryStore};
use crate::viewport::{MemoryViewport, ViewportHost};

/// The services one running app uses
#[derive(Clone)]
pub struct Host {
    pub storage: Rc<dyn KeyValueStore>,
    pub document: Rc<dyn DocumentHost>,
    pub viewport: Rc<dyn ViewportHost>,
    pub scheduler: Rc<dyn Scheduler>,
}

/// In-memory host with concrete handles for driving and inspecting it.
#[derive(Clone)]
pub struct HeadlessHost {
    pub storage: Rc<MemoryStore>,
    pub document: Rc<MemoryDocument>,
    pub viewport: Rc<MemoryViewport>,
    pub scheduler: Rc<ManualScheduler>,
}

impl HeadlessHost {
    /// Empty storage and document at the given viewport width
    pub fn new(width: f64) -> Self {
        Self::with_storage(width, MemoryStore::new())
    }

    pub fn with_storage(width: f64, storage: MemoryStore) -> Self {
        Self {
            storage: Rc::new(storage),
            document: Rc::new(MemoryDocument::new()),
            viewport: Rc::new(MemoryViewport::new(width)),
            scheduler: Rc::new(ManualScheduler::new()),
        }
    }

    /// Type-erased view of the same services
    pub fn host(&self) -> Host {
        Host {
            storage: self.storage.clone(),
            document: self.document.clone(),
            viewport: self.viewport.clone(),
            scheduler: self.scheduler.clone(),
        }
    }
}

impl From<&HeadlessHost> for Host {
    fn from(headless: &HeadlessHost) -> Self {
        headless.host()
    }
}
