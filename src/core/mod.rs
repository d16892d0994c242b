//! Configuration, decoding and the scan loop

pub mod config;
pub mod scan;
pub mod validator;
