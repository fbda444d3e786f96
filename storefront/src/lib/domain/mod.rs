pub mod access;
pub mod account;
pub mod gate;
pub mod routing;
