use kube::config::{InferConfigError, KubeconfigError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid options")]
    Validation(#[from] ValidationError),

    #[error("failed to get namespace")]
    Configuration(#[from] ConfigError),

    #[error("failed to create source")]
    Api(#[source] kube::Error),

    #[error("std::io::Error")]
    StdIo(#[source] std::io::Error),
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("'name' requires a nonempty name provided with the --name option")]
    MissingName,

    #[error("'address' requires a nonempty address provided with the --address option")]
    MissingAddress,

    #[error("'secret-ref' requires a nonempty secret reference provided with the --secret-ref option")]
    MissingSecretRef,

    #[error("sink requires an URI\nand/or a nonempty API version --sink-api-version option,\nwith a nonempty kind --sink-kind option,\nand with a nonempty name with the --sink-name")]
    InvalidSink,

    #[error("failed to parse source address, an absolute URL such as https://vc.local is required: {0}")]
    InvalidAddress(#[source] url::ParseError),

    #[error("failed to parse sink address: {0}")]
    InvalidSinkUri(#[source] url::ParseError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load kubeconfig: {0}")]
    Kubeconfig(#[source] KubeconfigError),

    #[error("failed to infer client configuration: {0}")]
    InferConfig(#[source] InferConfigError),

    #[error("failed to build client: {0}")]
    Client(#[source] kube::Error),

    #[error("no default namespace in the current context")]
    EmptyNamespace,
}
