pub mod login;
pub mod sign;

pub use login::{ApiErrorBody, Customer, LoginData, LoginRequest, LoginResponse};
pub use sign::{SignRequest, SignResponse};
