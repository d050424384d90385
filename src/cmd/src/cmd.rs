use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use kn_vsphere_kubernetes::client::ClientConfig;
use kn_vsphere_trace::init::{prepare_tracing, TraceConfig};

use crate::{error::Error, source::SourceCmd};

#[derive(Parser, Debug)]
#[command(
    name = "kn-vsphere",
    author,
    version,
    about = "Knative plugin to create vSphere event sources",
    long_about = None
)]
pub struct Cmd {
    #[arg(
        short,
        long,
        global = true,
        required = false,
        default_value = "warn",
        help = "Log level(trace, debug, info, warn, error)"
    )]
    pub level: String,

    #[arg(
        value_enum,
        short = 'd',
        long,
        global = true,
        required = false,
        default_value = "plain",
        help = "Log display format"
    )]
    pub format: Format,

    #[arg(long = "log-file", global = true, help = "Log output file path")]
    pub log_file: Option<String>,

    #[arg(long, global = true, help = "Path to the kubeconfig file")]
    pub kubeconfig: Option<PathBuf>,

    #[arg(long, global = true, help = "Name of the kubeconfig context to use")]
    pub context: Option<String>,

    #[clap(subcommand)]
    pub sub: SubCmd,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Format {
    Plain,
    Json,
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Plain => write!(f, "plain"),
            Format::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum SubCmd {
    Source(SourceCmd),
    Version,
}

pub fn run() -> Result<(), Error> {
    let command = Cmd::parse();

    let trace_conf = TraceConfig {
        level: command.level,
        format: command.format.to_string(),
        file: command.log_file,
    };

    match command.sub {
        SubCmd::Version => println!("{}", env!("CARGO_PKG_VERSION")),
        SubCmd::Source(s) => {
            prepare_tracing(trace_conf)?;
            let config = ClientConfig {
                kubeconfig: command.kubeconfig,
                context: command.context,
            };
            crate::source::start(config, s.into())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cmd, Format, SubCmd};

    #[test]
    fn works_cmd_global_flags() {
        let cmd = Cmd::try_parse_from([
            "kn-vsphere",
            "source",
            "--name",
            "s",
            "-l",
            "debug",
            "-d",
            "json",
            "--kubeconfig",
            "/tmp/kubeconfig",
            "--context",
            "kind-kind",
        ])
        .unwrap();
        assert_eq!(cmd.level, "debug");
        assert!(matches!(cmd.format, Format::Json));
        assert_eq!(
            cmd.kubeconfig.as_deref(),
            Some(std::path::Path::new("/tmp/kubeconfig"))
        );
        assert_eq!(cmd.context.as_deref(), Some("kind-kind"));
        match cmd.sub {
            SubCmd::Source(s) => assert_eq!(s.name, "s"),
            _ => panic!("expected source subcommand"),
        }
    }

    #[test]
    fn works_cmd_defaults() {
        let cmd = Cmd::try_parse_from(["kn-vsphere", "version"]).unwrap();
        assert_eq!(cmd.level, "warn");
        assert_eq!(cmd.format.to_string(), "plain");
        assert!(cmd.kubeconfig.is_none());
        assert!(matches!(cmd.sub, SubCmd::Version));
    }
}
