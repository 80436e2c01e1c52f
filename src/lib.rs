#[cfg(test)]
mod test;

pub mod extract;
pub mod extractor;
pub mod locate;
pub mod render;
pub mod snapshot;

pub mod grid;
pub mod layout;
pub mod selection;
pub mod subdomain;

pub mod error;
pub mod parameters;
pub mod utils;

pub use error::{Error, Result};
