pub mod client;
pub mod game;
pub mod ports;
pub mod protocol;
