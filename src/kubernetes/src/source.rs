use std::io::Write;

use chrono::Duration;
use k8s_openapi::api::core::v1::LocalObjectReference;
use kube::{api::PostParams, core::ObjectMeta, Api};
use url::Url;

use crate::{
    client::Clients,
    crd::{
        duck::{Destination, KReference},
        vsphere_source::{CheckpointConfig, VSphereSource, VSphereSourceSpec},
    },
    error::{Error, ValidationError},
};

pub const CHECKPOINT_DEFAULT_AGE_SECONDS: i64 = 5 * 60;
pub const CHECKPOINT_DEFAULT_PERIOD_SECONDS: i64 = 10;

// Base used only to check that a sink URI relative to a reference is well formed.
const RELATIVE_URI_BASE: &str = "http://sink.invalid/";

/// Options of the `source` command as given on the command line.
#[derive(Debug, Clone)]
pub struct SourceOptions {
    pub namespace: String,
    pub name: String,
    pub address: String,
    pub skip_tls_verify: bool,
    pub secret_ref: String,

    pub sink_uri: String,
    pub sink_api_version: String,
    pub sink_kind: String,
    pub sink_name: String,

    pub checkpoint_max_age: Duration,
    pub checkpoint_period: Duration,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            namespace: String::new(),
            name: String::new(),
            address: String::new(),
            skip_tls_verify: false,
            secret_ref: String::new(),
            sink_uri: String::new(),
            sink_api_version: String::new(),
            sink_kind: String::new(),
            sink_name: String::new(),
            checkpoint_max_age: Duration::seconds(CHECKPOINT_DEFAULT_AGE_SECONDS),
            checkpoint_period: Duration::seconds(CHECKPOINT_DEFAULT_PERIOD_SECONDS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkCoordinates {
    pub api_version: String,
    pub kind: String,
    pub name: String,
}

/// Where a source delivers its events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkSpec {
    // Kept as given, the parsed form is only used for validation.
    Uri(String),
    Reference(SinkCoordinates),
    // The URI may be relative to the referenced object.
    ReferenceWithUri(SinkCoordinates, String),
}

impl SinkSpec {
    pub fn destination(&self, namespace: &str) -> Destination {
        match self {
            SinkSpec::Uri(uri) => Destination {
                reference: None,
                uri: Some(uri.clone()),
            },
            SinkSpec::Reference(coordinates) => Destination {
                reference: Some(coordinates.reference(namespace)),
                uri: None,
            },
            SinkSpec::ReferenceWithUri(coordinates, uri) => Destination {
                reference: Some(coordinates.reference(namespace)),
                uri: Some(uri.clone()),
            },
        }
    }
}

impl SinkCoordinates {
    fn reference(&self, namespace: &str) -> KReference {
        KReference {
            api_version: self.api_version.clone(),
            kind: self.kind.clone(),
            namespace: Some(namespace.to_string()),
            name: self.name.clone(),
        }
    }
}

/// Options that passed validation, ready to be turned into a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSource {
    pub name: String,
    pub address: String,
    pub skip_tls_verify: bool,
    pub secret_ref: String,
    pub sink: SinkSpec,
    pub checkpoint: CheckpointConfig,
}

impl ValidatedSource {
    pub fn into_resource(self, namespace: &str) -> VSphereSource {
        VSphereSource {
            metadata: ObjectMeta {
                namespace: Some(namespace.to_string()),
                name: Some(self.name),
                ..Default::default()
            },
            spec: VSphereSourceSpec {
                sink: self.sink.destination(namespace),
                ce_overrides: None,
                address: self.address,
                skip_tls_verify: self.skip_tls_verify,
                secret_ref: LocalObjectReference {
                    name: Some(self.secret_ref),
                },
                checkpoint_config: self.checkpoint,
            },
            status: None,
        }
    }
}

impl SourceOptions {
    pub fn validate(&self) -> Result<ValidatedSource, ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.address.is_empty() {
            return Err(ValidationError::MissingAddress);
        }
        if self.secret_ref.is_empty() {
            return Err(ValidationError::MissingSecretRef);
        }
        let sink = self.sink_spec()?;
        Url::parse(&self.address).map_err(ValidationError::InvalidAddress)?;

        Ok(ValidatedSource {
            name: self.name.clone(),
            address: self.address.clone(),
            skip_tls_verify: self.skip_tls_verify,
            secret_ref: self.secret_ref.clone(),
            sink,
            checkpoint: CheckpointConfig::from_durations(
                self.checkpoint_max_age,
                self.checkpoint_period,
            ),
        })
    }

    pub fn sink_spec(&self) -> Result<SinkSpec, ValidationError> {
        let coordinates = [&self.sink_api_version, &self.sink_kind, &self.sink_name];
        let all_empty = coordinates.iter().all(|c| c.is_empty());
        let all_set = coordinates.iter().all(|c| !c.is_empty());

        let reference = match (all_empty, all_set) {
            (true, _) => None,
            (_, true) => Some(SinkCoordinates {
                api_version: self.sink_api_version.clone(),
                kind: self.sink_kind.clone(),
                name: self.sink_name.clone(),
            }),
            _ => return Err(ValidationError::InvalidSink),
        };

        match (self.sink_uri.as_str(), reference) {
            ("", None) => Err(ValidationError::InvalidSink),
            ("", Some(reference)) => Ok(SinkSpec::Reference(reference)),
            (uri, None) => {
                Url::parse(uri).map_err(ValidationError::InvalidSinkUri)?;
                Ok(SinkSpec::Uri(uri.to_string()))
            }
            (uri, Some(reference)) => {
                let base = Url::parse(RELATIVE_URI_BASE).map_err(ValidationError::InvalidSinkUri)?;
                base.join(uri).map_err(ValidationError::InvalidSinkUri)?;
                Ok(SinkSpec::ReferenceWithUri(reference, uri.to_string()))
            }
        }
    }
}

/// Creates a VSphereSource from `options` and reports the result to `out`.
/// Nothing is sent to the API server unless the options are valid.
#[tracing::instrument(skip_all, fields(name = %options.name))]
pub async fn execute<W: Write>(
    clients: &Clients,
    options: &SourceOptions,
    out: &mut W,
) -> Result<(), Error> {
    let validated = options.validate()?;
    let ns = clients.namespace(&options.namespace)?;
    let source = validated.into_resource(&ns);

    tracing::debug!(namespace = %ns, sink = ?source.spec.sink, "create VSphereSource");

    let sources = Api::<VSphereSource>::namespaced(clients.client().clone(), &ns);
    sources
        .create(&PostParams::default(), &source)
        .await
        .map_err(Error::Api)?;

    tracing::info!(namespace = %ns, "created VSphereSource");

    writeln!(out, "Created source").map_err(Error::StdIo)?;
    Ok(())
}
