//! Storage primitives shared by the repositories and services.

pub mod atomic_toml;

pub use atomic_toml::TomlDocument;
