pub mod duck;
pub mod vsphere_source;
