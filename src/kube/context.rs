use std::{path::PathBuf, time::Duration};

use anyhow::{anyhow, Result};
use kube::{
    config::{KubeConfigOptions, Kubeconfig, KubeconfigError, NamedContext},
    Client, Config,
};

use crate::logger;

use super::KubeClient;

pub fn read_kubeconfig(path: Option<PathBuf>) -> Result<Kubeconfig, KubeconfigError> {
    if let Some(path) = path {
        Kubeconfig::read_from(path)
    } else {
        Kubeconfig::read()
    }
}

fn find_context<'a>(kubeconfig: &'a Kubeconfig, name: &str) -> Result<&'a NamedContext> {
    kubeconfig
        .contexts
        .iter()
        .find(|ctx| ctx.name == name)
        .ok_or_else(|| anyhow!("Cannot find context {}", name))
}

/// 指定されたコンテキスト、current-context、先頭のコンテキストの順に探す
pub fn read_context(kubeconfig: &Kubeconfig, context: Option<&str>) -> Result<NamedContext> {
    let context = match context.or(kubeconfig.current_context.as_deref()) {
        Some(name) => find_context(kubeconfig, name)?,
        None => kubeconfig
            .contexts
            .first()
            .ok_or_else(|| anyhow!("Empty contexts"))?,
    };

    Ok(context.clone())
}

#[derive(Debug, Default, Clone)]
pub struct ClusterConnection {
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
    pub request_timeout: Option<Duration>,
}

impl ClusterConnection {
    /// Resolves the target context and builds a client for it.
    ///
    /// Returns the client together with the context name it talks to.
    pub async fn connect(&self) -> Result<(KubeClient, String)> {
        let kubeconfig = read_kubeconfig(self.kubeconfig.clone())?;

        let context = read_context(&kubeconfig, self.context.as_deref())?;

        let options = KubeConfigOptions {
            context: Some(context.name.to_string()),
            ..Default::default()
        };

        let mut config = Config::from_custom_kubeconfig(kubeconfig, &options).await?;

        if let Some(timeout) = self.request_timeout {
            config.read_timeout = Some(timeout);
        }

        logger!(
            info,
            "context={} cluster_url={} read_timeout={:?}",
            context.name,
            config.cluster_url,
            config.read_timeout
        );

        let client = Client::try_from(config)?;

        Ok((KubeClient::new(client), context.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn setup_kubeconfig(current_context: Option<&str>) -> Kubeconfig {
        let mut kubeconfig = Kubeconfig::from_yaml(indoc! {
            "
            apiVersion: v1
            kind: Config
            clusters:
              - name: kind
                cluster:
                  server: https://127.0.0.1:6443
            contexts:
              - name: kind-dev
                context:
                  cluster: kind
                  user: admin
              - name: kind-prod
                context:
                  cluster: kind
                  user: admin
            users:
              - name: admin
                user:
                  token: dummy
            "
        })
        .unwrap();

        kubeconfig.current_context = current_context.map(ToString::to_string);

        kubeconfig
    }

    #[test]
    fn 指定したコンテキストを返す() {
        let kubeconfig = setup_kubeconfig(Some("kind-dev"));

        let actual = read_context(&kubeconfig, Some("kind-prod")).unwrap();

        assert_eq!(actual.name, "kind-prod");
    }

    #[test]
    fn 指定がないときcurrent_contextを返す() {
        let kubeconfig = setup_kubeconfig(Some("kind-prod"));

        let actual = read_context(&kubeconfig, None).unwrap();

        assert_eq!(actual.name, "kind-prod");
    }

    #[test]
    fn current_contextがないとき先頭のコンテキストを返す() {
        let kubeconfig = setup_kubeconfig(None);

        let actual = read_context(&kubeconfig, None).unwrap();

        assert_eq!(actual.name, "kind-dev");
    }

    #[test]
    fn 存在しないコンテキストを指定したときエラーを返す() {
        let kubeconfig = setup_kubeconfig(None);

        let actual = read_context(&kubeconfig, Some("unknown"));

        assert_eq!(
            actual.unwrap_err().to_string(),
            "Cannot find context unknown"
        );
    }
}
