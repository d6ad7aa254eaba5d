pub mod anneal;
pub mod color;
pub mod config;
pub mod consts;
pub mod error;
pub mod filter;
pub mod interaction;
pub mod linalg;
pub mod meanfield;
pub mod palette;
pub mod pyramid;
