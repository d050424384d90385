pub mod client;
pub mod crd;
pub mod error;
pub mod source;

#[cfg(test)]
pub mod fixture;
