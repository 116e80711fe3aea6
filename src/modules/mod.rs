pub mod analytics;
pub mod auth;
pub mod classes;
pub mod students;
pub mod teachers;
pub mod value_types;

pub use self::auth::model::{Principal, Role};
