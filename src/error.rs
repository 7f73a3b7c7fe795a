pub use anyhow::Result;

use thiserror::Error as TError;

/// Which listing call against the cluster failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterRequest {
    Namespaces,
    Pods(String),
    ConfigMaps(String),
    Secrets(String),
}

impl std::fmt::Display for ClusterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Namespaces => write!(f, "namespaces"),
            Self::Pods(ns) => write!(f, "pods in namespace {}", ns),
            Self::ConfigMaps(ns) => write!(f, "configmaps in namespace {}", ns),
            Self::Secrets(ns) => write!(f, "secrets in namespace {}", ns),
        }
    }
}

#[derive(Debug, TError)]
pub enum Error {
    #[error("ClusterAPIError: failed to list {request}: {source}")]
    ClusterApi {
        request: ClusterRequest,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl Error {
    pub fn cluster_api(request: ClusterRequest, source: anyhow::Error) -> Self {
        Self::ClusterApi {
            request,
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(ClusterRequest::Namespaces, "namespaces")]
    #[case(ClusterRequest::Pods("default".into()), "pods in namespace default")]
    #[case(ClusterRequest::ConfigMaps("kube-system".into()), "configmaps in namespace kube-system")]
    #[case(ClusterRequest::Secrets("app".into()), "secrets in namespace app")]
    fn requestの表示(#[case] request: ClusterRequest, #[case] expected: &str) {
        assert_eq!(request.to_string(), expected);
    }

    #[test]
    fn cluster_apiエラーは失敗したリクエストと原因を含む() {
        let err = Error::cluster_api(
            ClusterRequest::Pods("default".into()),
            anyhow::anyhow!("connection refused"),
        );

        assert_eq!(
            err.to_string(),
            "ClusterAPIError: failed to list pods in namespace default: connection refused"
        );
    }
}
