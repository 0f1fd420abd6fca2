pub mod application;
pub mod cli;
pub mod domain;
pub mod http;
pub mod notification;
pub mod storage;

pub use application::{AppError, BankService};
pub use domain::*;
pub use storage::Repository;
