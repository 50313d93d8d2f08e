pub mod db;
pub mod models;
mod programs;
mod tables;
mod users;

pub use db::{Database, DatabaseError};
pub use tables::*;
