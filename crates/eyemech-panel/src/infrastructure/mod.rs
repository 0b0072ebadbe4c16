//! Infrastructure layer for the control panel.
//!
//! Contains OS-facing adapters: the serial transport and port enumeration,
//! event-script loading from disk, and runtime settings.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `eyemech_core`, but MUST NOT be imported by the `application` layer.

pub mod config;
pub mod event_script;
pub mod serial;
