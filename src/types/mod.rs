//! Type definitions for ghportfolio

mod error;
mod github;
mod series;

pub use error::*;
pub use github::*;
pub use series::*;
