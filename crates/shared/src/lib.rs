mod error;
pub use error::AppError;

mod env;
pub use env::AppEnv;

pub mod similarity;
