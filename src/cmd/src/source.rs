use chrono::Duration;
use clap::Parser;

use kn_vsphere_kubernetes::{
    client::{ClientConfig, Clients},
    source::{execute, SourceOptions},
};

use crate::{duration::parse_duration, error::Error};

const EXAMPLES: &str = "Examples:
  # Create the source in the default namespace, sending events to the specified sink URI
  kn vsphere source --name source --address https://my-vsphere-endpoint.local --skip-tls-verify --secret-ref vsphere-credentials --sink-uri http://where.to.send.stuff

  # Create the source in the specified namespace, sending events to the specified service
  kn vsphere source --namespace ns --name source --address https://my-vsphere-endpoint.local --skip-tls-verify --secret-ref vsphere-credentials --sink-api-version v1 --sink-kind Service --sink-name the-service-name

  # Create the source with custom checkpoint behavior
  kn vsphere source --namespace ns --name source --address https://my-vsphere-endpoint.local --secret-ref vsphere-credentials --sink-api-version v1 --sink-kind Service --sink-name the-service-name --checkpoint-age 1h --checkpoint-period 30s";

#[derive(Debug, Clone, Parser)]
#[command(
    about = "Create a vSphere source to react to vSphere events",
    after_help = EXAMPLES
)]
pub struct SourceCmd {
    #[arg(
        short = 'n',
        long,
        default_value = "",
        help = "namespace of the source to create (default namespace if omitted)"
    )]
    pub namespace: String,

    #[arg(long, default_value = "", help = "name of the source to create")]
    pub name: String,

    #[arg(
        short = 'a',
        long,
        default_value = "",
        help = "URL of ESXi or vCenter instance to connect to (same as VC_URL)"
    )]
    pub address: String,

    #[arg(
        short = 'k',
        long = "skip-tls-verify",
        help = "disables certificate verification for the source address (same as VC_INSECURE)"
    )]
    pub skip_tls_verify: bool,

    #[arg(
        short = 's',
        long = "secret-ref",
        default_value = "",
        help = "reference to the Kubernetes secret for the vSphere credentials needed for the source address"
    )]
    pub secret_ref: String,

    #[arg(
        short = 'u',
        long = "sink-uri",
        default_value = "",
        help = "sink URI (can be absolute, or relative to the referred sink resource)"
    )]
    pub sink_uri: String,

    #[arg(long = "sink-api-version", default_value = "", help = "sink API version")]
    pub sink_api_version: String,

    #[arg(long = "sink-kind", default_value = "", help = "sink kind")]
    pub sink_kind: String,

    #[arg(long = "sink-name", default_value = "", help = "sink name")]
    pub sink_name: String,

    #[arg(
        long = "checkpoint-age",
        value_parser = parse_duration,
        help = "maximum allowed age for replaying events determined by last successful event in checkpoint [default: 5m0s]"
    )]
    pub checkpoint_age: Option<Duration>,

    #[arg(
        long = "checkpoint-period",
        value_parser = parse_duration,
        help = "period between saving checkpoints [default: 10s]"
    )]
    pub checkpoint_period: Option<Duration>,
}

impl From<SourceCmd> for SourceOptions {
    fn from(cmd: SourceCmd) -> Self {
        let defaults = SourceOptions::default();
        SourceOptions {
            namespace: cmd.namespace,
            name: cmd.name,
            address: cmd.address,
            skip_tls_verify: cmd.skip_tls_verify,
            secret_ref: cmd.secret_ref,
            sink_uri: cmd.sink_uri,
            sink_api_version: cmd.sink_api_version,
            sink_kind: cmd.sink_kind,
            sink_name: cmd.sink_name,
            checkpoint_max_age: cmd.checkpoint_age.unwrap_or(defaults.checkpoint_max_age),
            checkpoint_period: cmd.checkpoint_period.unwrap_or(defaults.checkpoint_period),
        }
    }
}

pub fn start(config: ClientConfig, options: SourceOptions) -> Result<(), Error> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(Error::Runtime)?
        .block_on(run(config, options))
}

#[tracing::instrument(skip_all)]
async fn run(config: ClientConfig, options: SourceOptions) -> Result<(), Error> {
    // Bad flags are reported before the kubeconfig is read.
    options
        .validate()
        .map_err(kn_vsphere_kubernetes::error::Error::Validation)?;

    let clients = Clients::load(&config).await?;
    let mut stdout = std::io::stdout();
    execute(&clients, &options, &mut stdout).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use clap::Parser;

    use kn_vsphere_kubernetes::source::SourceOptions;

    use super::SourceCmd;

    #[test]
    fn works_source_cmd_defaults() {
        let cmd = SourceCmd::try_parse_from(["source"]).unwrap();
        let options = SourceOptions::from(cmd);
        assert!(options.namespace.is_empty());
        assert!(options.name.is_empty());
        assert!(!options.skip_tls_verify);
        assert_eq!(options.checkpoint_max_age, Duration::seconds(300));
        assert_eq!(options.checkpoint_period, Duration::seconds(10));
    }

    #[test]
    fn works_source_cmd_short_flags() {
        let cmd = SourceCmd::try_parse_from([
            "source",
            "-n",
            "ns",
            "--name",
            "source",
            "-a",
            "https://vc.local",
            "-k",
            "-s",
            "vsphere-credentials",
            "-u",
            "http://sink",
            "--checkpoint-age",
            "1h",
            "--checkpoint-period",
            "30s",
        ])
        .unwrap();
        let options = SourceOptions::from(cmd);
        assert_eq!(options.namespace, "ns");
        assert_eq!(options.name, "source");
        assert_eq!(options.address, "https://vc.local");
        assert!(options.skip_tls_verify);
        assert_eq!(options.secret_ref, "vsphere-credentials");
        assert_eq!(options.sink_uri, "http://sink");
        assert_eq!(options.checkpoint_max_age, Duration::hours(1));
        assert_eq!(options.checkpoint_period, Duration::seconds(30));
    }

    #[test]
    fn works_source_cmd_sink_reference() {
        let cmd = SourceCmd::try_parse_from([
            "source",
            "--sink-api-version",
            "v1",
            "--sink-kind",
            "Service",
            "--sink-name",
            "the-service-name",
        ])
        .unwrap();
        assert_eq!(cmd.sink_api_version, "v1");
        assert_eq!(cmd.sink_kind, "Service");
        assert_eq!(cmd.sink_name, "the-service-name");
        assert!(cmd.sink_uri.is_empty());
    }

    #[test]
    fn fails_source_cmd_invalid_duration() {
        let res = SourceCmd::try_parse_from(["source", "--checkpoint-age", "10"]);
        assert!(res.is_err());
    }
}
