pub mod controller;
pub mod thumbnail;
pub mod time;
