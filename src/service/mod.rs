pub mod asset;
pub mod bootstrap;
pub mod codec;
pub mod timezone;
