//! Storefront domain
pub mod value_objects;
pub mod aggregates;
pub mod events;
pub mod services;
