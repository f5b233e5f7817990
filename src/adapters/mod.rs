//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements | Connects to                   |
//! |-------------|------------|-------------------------------|
//! | `log_sink`  | EventSink  | Serial log output             |
//! | `store`     | ConfigPort | SPIFFS files / in-memory map  |
//! | `time`      | Clock      | ESP32 system timer + SNTP     |
//!
//! Output pins live in [`crate::drivers::output`].

pub mod log_sink;
pub mod store;
pub mod time;
