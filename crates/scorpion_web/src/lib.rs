//! # Scorpion Web
//!
//! Browser host for Scorpion UI. Implements the `scorpion_core` host traits on
//! `window.localStorage`, `document.documentElement`, `matchMedia`,
//! `ResizeObserver`, `setTimeout` and `requestAnimationFrame`, and exports
//! [`ScorpionApp`] to JavaScript.
//!
//! Only the helpers in [`url`] compile on native targets.
//!
//! ```js
//! import init, { ScorpionApp } from "./scorpion_web.js";
//!
//! await init();
//! const app = ScorpionApp.mount();
//! app.navigate("/components/buttons");
//! console.log(JSON.parse(app.snapshot_json()));
//! ```

pub mod url;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod document;
#[cfg(target_arch = "wasm32")]
mod scheduler;
#[cfg(target_arch = "wasm32")]
mod storage;
#[cfg(target_arch = "wasm32")]
mod viewport;

#[cfg(target_arch = "wasm32")]
pub use app::{web_host, ScorpionApp};
#[cfg(target_arch = "wasm32")]
pub use document::WebDocument;
#[cfg(target_arch = "wasm32")]
pub use scheduler::WebScheduler;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
#[cfg(target_arch = "wasm32")]
pub use viewport::WebViewport;
