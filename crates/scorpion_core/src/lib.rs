//! Scorpion Core Runtime
//!
//! This crate provides the foundational primitives shared by the Scorpion UI
//! documentation site:
//!
//! - **Host abstractions**: key-value storage, the document root, the viewport
//!   and a frame/timer scheduler, each behind a trait so the same orchestration
//!   code runs in the browser and headless
//! - **Reactive Signals**: values with change subscriptions
//! - **Provisioning scope**: explicit `provide` / `use_context` instead of hidden
//!   global singletons
//! - **State Machines**: typed transition tables with wildcard transitions
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use scorpion_core::{HeadlessHost, Scheduler, Signal};
//!
//! let host = HeadlessHost::new(1280.0);
//! let ticks = Signal::new(0u32);
//!
//! let counter = ticks.clone();
//! host.scheduler.set_timeout(
//!     Duration::from_millis(100),
//!     Box::new(move || {
//!         counter.update(|n| n + 1);
//!     }),
//! );
//!
//! host.scheduler.advance(Duration::from_millis(100));
//! assert_eq!(ticks.get(), 1);
//! ```

pub mod context;
pub mod document;
pub mod error;
pub mod fsm;
pub mod host;
pub mod scheduler;
pub mod signal;
pub mod storage;
pub mod viewport;

pub use context::{provide, try_use_context, use_context, ProvideGuard};
pub use document::{DocumentHost, MemoryDocument, ScrollBehavior, ScrollPosition, ScrollTarget};
pub use error::{HostError, Result};
pub use fsm::{StateMachine, StateMachineBuilder};
pub use host::{HeadlessHost, Host};
pub use scheduler::{ManualScheduler, Scheduler, TaskId};
pub use signal::{Signal, Subscription, SubscriptionId};
pub use storage::{KeyValueStore, MemoryStore};
pub use viewport::{ListenerId, MediaQuery, MemoryViewport, ViewportHost};
