pub mod db;
pub mod models;
pub mod time_serde;

mod error;

pub use error::{Error, Result};
