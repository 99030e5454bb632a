//! # State Module
//!
//! Application state for the command-line front end.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────┐        ┌──────────────────────────────┐      │
//! │  │     ConfigState      │        │        SessionState          │      │
//! │  │                      │        │                              │      │
//! │  │  layout defaults     │───────►│  Arc<Mutex<Session>>         │      │
//! │  │  output format       │ seeds  │  settings + image            │      │
//! │  │  debounce window     │        │  generation counter          │      │
//! │  └──────────────────────┘        └──────────────────────────────┘      │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • ConfigState: read-only after load                                   │
//! │  • SessionState: shared by the stdin reader and the scheduler          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{ConfigState, LayoutSection, OutputSettings, WatchSettings};
pub use session::{Session, SessionState};
