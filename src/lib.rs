pub mod api;
pub mod cli;
pub mod client;
pub mod model;
pub mod store;
pub mod trace;
pub mod util;
