#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::significant_drop_tightening,
    clippy::future_not_send
)]

pub mod config;
pub mod renderable;
pub mod skin;
pub mod texture;
mod utils;

pub use utils::{error, http_client, png};
