pub mod stores;
pub mod transports;
