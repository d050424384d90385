use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Kubernetes(#[from] kn_vsphere_kubernetes::error::Error),

    #[error(transparent)]
    Trace(#[from] kn_vsphere_trace::error::Error),

    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),
}
