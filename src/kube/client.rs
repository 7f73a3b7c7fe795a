use anyhow::Result;
use async_trait::async_trait;
use k8s_openapi::{
    api::core::v1::{ConfigMap, Namespace, Pod, Secret},
    NamespaceResourceScope,
};
use kube::{api::ListParams, Api, Client, Resource};
use serde::de::DeserializeOwned;

use crate::logger;

#[derive(Clone)]
pub struct KubeClient {
    client: Client,
}

impl KubeClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn list_namespaced<K>(&self, namespace: &str) -> Result<Vec<K>>
    where
        K: Resource<DynamicType = (), Scope = NamespaceResourceScope>
            + Clone
            + DeserializeOwned
            + std::fmt::Debug,
    {
        let api: Api<K> = Api::namespaced(self.client.clone(), namespace);

        logger!(debug, "HTTP request GET {}", api.resource_url());

        let list = api.list(&ListParams::default()).await?;

        Ok(list.items)
    }
}

/// 検出処理が利用するクラスタの読み取り口
///
/// 一覧の取得順はAPIサーバーの返却順をそのまま返す。
#[async_trait]
pub trait ClusterReader: Send + Sync {
    async fn list_namespaces(&self) -> Result<Vec<Namespace>>;

    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>>;

    async fn list_configmaps(&self, namespace: &str) -> Result<Vec<ConfigMap>>;

    async fn list_secrets(&self, namespace: &str) -> Result<Vec<Secret>>;
}

#[async_trait]
impl ClusterReader for KubeClient {
    async fn list_namespaces(&self) -> Result<Vec<Namespace>> {
        let api: Api<Namespace> = Api::all(self.client.clone());

        logger!(debug, "HTTP request GET {}", api.resource_url());

        let list = api.list(&ListParams::default()).await?;

        Ok(list.items)
    }

    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>> {
        self.list_namespaced(namespace).await
    }

    async fn list_configmaps(&self, namespace: &str) -> Result<Vec<ConfigMap>> {
        self.list_namespaced(namespace).await
    }

    async fn list_secrets(&self, namespace: &str) -> Result<Vec<Secret>> {
        self.list_namespaced(namespace).await
    }
}

#[cfg(test)]
pub mod mock {
    use super::{ClusterReader, ConfigMap, Namespace, Pod, Result, Secret};
    use mockall::mock;

    mock! {
        pub TestClusterReader {}

        #[async_trait::async_trait]
        impl ClusterReader for TestClusterReader {
            async fn list_namespaces(&self) -> Result<Vec<Namespace>>;
            async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>>;
            async fn list_configmaps(&self, namespace: &str) -> Result<Vec<ConfigMap>>;
            async fn list_secrets(&self, namespace: &str) -> Result<Vec<Secret>>;
        }
    }

    #[macro_export]
    macro_rules! mock_expect {
        ($client:ident, list_namespaces, $ret:expr) => {
            $client.expect_list_namespaces().returning(|| $ret);
        };
        ($client:ident, $method:ident, [$(($with:expr, $ret:expr)),*]) => {
            $(
                $crate::mock_expect!($client, $method, $with, $ret);
            )*
        };
        ($client:ident, list_pods, $with:expr, $ret:expr) => {
            $client.expect_list_pods().with($with).returning(|_| $ret);
        };
        ($client:ident, list_configmaps, $with:expr, $ret:expr) => {
            $client.expect_list_configmaps().with($with).returning(|_| $ret);
        };
        ($client:ident, list_secrets, $with:expr, $ret:expr) => {
            $client.expect_list_secrets().with($with).returning(|_| $ret);
        };
    }
}
