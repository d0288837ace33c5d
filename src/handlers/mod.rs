pub mod error;

pub use error::on_error;
