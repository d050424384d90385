use std::path::PathBuf;

use kube::{
    config::{KubeConfigOptions, Kubeconfig},
    Client, Config,
};

use crate::error::{ConfigError, Error};

#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    // Explicit kubeconfig path. KUBECONFIG and ~/.kube/config are used when unset.
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
}

/// Kubernetes clients shared by the plugin commands.
/// Also resolves the namespace a command targets.
#[derive(Clone)]
pub struct Clients {
    client: Client,
}

impl Clients {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    #[tracing::instrument(skip_all)]
    pub async fn load(config: &ClientConfig) -> Result<Self, Error> {
        let options = KubeConfigOptions {
            context: config.context.clone(),
            ..Default::default()
        };
        let kube_config = match config.kubeconfig.as_ref() {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading kubeconfig");
                let kubeconfig = Kubeconfig::read_from(path).map_err(ConfigError::Kubeconfig)?;
                Config::from_custom_kubeconfig(kubeconfig, &options)
                    .await
                    .map_err(ConfigError::Kubeconfig)?
            }
            None if config.context.is_some() => Config::from_kubeconfig(&options)
                .await
                .map_err(ConfigError::Kubeconfig)?,
            None => Config::infer().await.map_err(ConfigError::InferConfig)?,
        };
        let client = Client::try_from(kube_config).map_err(ConfigError::Client)?;
        Ok(Self::new(client))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Returns `explicit` as is, or the default namespace of the client when it is empty.
    pub fn namespace(&self, explicit: &str) -> Result<String, Error> {
        if !explicit.is_empty() {
            return Ok(explicit.to_string());
        }
        let ns = self.client.default_namespace();
        if ns.is_empty() {
            return Err(Error::Configuration(ConfigError::EmptyNamespace));
        }
        Ok(ns.to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        client::Clients,
        error::{ConfigError, Error},
    };

    #[tokio::test]
    async fn works_namespace() {
        let (clients, _fakeserver) = Clients::test();
        let cases = [("", "default"), ("ns", "ns"), ("kube-system", "kube-system")];
        for (explicit, expected) in cases {
            assert_eq!(clients.namespace(explicit).unwrap(), expected);
        }
    }

    #[tokio::test]
    async fn fails_namespace_without_default() {
        let (clients, _fakeserver) = Clients::test_with_namespace("");
        let res = clients.namespace("");
        assert!(matches!(
            res,
            Err(Error::Configuration(ConfigError::EmptyNamespace))
        ));
    }
}
