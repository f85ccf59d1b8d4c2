pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod startup;


pub use crate::error::{Result as ServerErrorResult, ServerError};
pub use crate::routes::build_router;
pub use crate::startup::{Services, build_jwt_validator, start_services};
