pub mod db;

pub mod budgets;
pub mod expenses;
pub mod ratios;
pub mod recommendation;
pub mod statistics;
pub mod users;

pub mod categories;
pub mod constants;
pub mod context;
pub mod errors;
pub mod jobs;
pub mod schema;

pub use categories::Category;
pub use context::{initialize_context, ServiceContext};
pub use errors::{Error, Result};
