//! Infrastructure layer: record stores, configuration, and application services.

pub mod config;
pub mod dao;
pub mod error;
pub mod services;


pub use config::{StoreConfig, connect_order_table_dao};
pub use error::{ServiceError, StoreError};
