//! Core types, configuration, and capability traits shared by the Clinio
//! client stack.
//!
//! The browser runtime (location, navigation, persistent storage, user-facing
//! notifications) is modeled as injected capabilities so that tenant
//! resolution and HTTP error policy stay testable outside a browser host.

pub mod browser;
pub mod config;
pub mod credentials;
pub mod events;

pub use browser::{FixedLocation, Navigator};
pub use config::{ClientConfig, Mode};
pub use credentials::{
    CredentialStore, MemoryCredentialStore, AUTH_TOKEN_KEY, USER_DATA_KEY,
};
pub use events::{ChannelSink, ClientEvent, EventSink, MemorySink, NullSink};
