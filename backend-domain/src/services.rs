// Domain services

pub mod policy;

pub use policy::*;
