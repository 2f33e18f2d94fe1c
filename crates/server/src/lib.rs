pub mod bootstrap;
pub mod error;
pub mod health;
pub mod images;
pub mod recommend;

pub use bootstrap::{bootstrap, bootstrap_with_config, Application, BootstrapError};
