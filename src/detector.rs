mod exclusion;
mod references;
mod scanner;

pub use exclusion::SystemAllowList;
pub use references::{collect_references, PodReferences, UsageSet};
pub use scanner::{scan_namespace, NamespaceScan};

use std::collections::BTreeSet;

use kube::ResourceExt as _;
use serde::Serialize;

use crate::{
    error::{ClusterRequest, Error},
    kube::ClusterReader,
    logger,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ResourceKind {
    ConfigMap,
    Secret,
}

/// A ConfigMap or Secret identified by name and namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceRef {
    pub name: String,
    pub namespace: String,
}

impl ResourceRef {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

/// Cluster wide result, in namespace scan order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct UnusedResult {
    pub configmaps: Vec<ResourceRef>,
    pub secrets: Vec<ResourceRef>,
}

impl UnusedResult {
    fn extend(&mut self, namespace: &str, scan: NamespaceScan) {
        self.configmaps.extend(
            scan.configmaps
                .into_iter()
                .map(|name| ResourceRef::new(name, namespace)),
        );

        self.secrets.extend(
            scan.secrets
                .into_iter()
                .map(|name| ResourceRef::new(name, namespace)),
        );
    }

    pub fn is_empty(&self) -> bool {
        self.configmaps.is_empty() && self.secrets.is_empty()
    }
}

/// Namespaces to visit.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum NamespaceScope {
    /// Every namespace returned by the cluster.
    #[default]
    All,
    /// Only the given namespaces, in the given order.
    Only(Vec<String>),
}

impl From<Option<Vec<String>>> for NamespaceScope {
    /// Empty names are dropped and repeated names keep their first position.
    fn from(value: Option<Vec<String>>) -> Self {
        match value {
            Some(namespaces) => {
                let mut seen = BTreeSet::new();

                Self::Only(
                    namespaces
                        .into_iter()
                        .filter(|ns| !ns.is_empty() && seen.insert(ns.clone()))
                        .collect(),
                )
            }
            None => Self::All,
        }
    }
}

/// Walks the cluster namespace by namespace and collects unused
/// ConfigMaps and Secrets.
///
/// Requests are issued one after another. The first failed request
/// aborts the scan and nothing found so far is returned.
pub struct Detector<'a, C> {
    client: &'a C,
    allow_list: &'a SystemAllowList,
    scope: NamespaceScope,
}

impl<'a, C> Detector<'a, C>
where
    C: ClusterReader,
{
    pub fn new(client: &'a C, allow_list: &'a SystemAllowList) -> Self {
        Self {
            client,
            allow_list,
            scope: NamespaceScope::All,
        }
    }

    pub fn scope(mut self, scope: NamespaceScope) -> Self {
        self.scope = scope;
        self
    }

    async fn target_namespaces(&self) -> Result<Vec<String>, Error> {
        match &self.scope {
            NamespaceScope::Only(namespaces) => Ok(namespaces.clone()),
            NamespaceScope::All => {
                let namespaces = self
                    .client
                    .list_namespaces()
                    .await
                    .map_err(|e| Error::cluster_api(ClusterRequest::Namespaces, e))?;

                Ok(namespaces.iter().map(|ns| ns.name_any()).collect())
            }
        }
    }

    async fn scan(&self, namespace: &str) -> Result<NamespaceScan, Error> {
        let pods = self
            .client
            .list_pods(namespace)
            .await
            .map_err(|e| Error::cluster_api(ClusterRequest::Pods(namespace.to_string()), e))?;

        let configmaps = self
            .client
            .list_configmaps(namespace)
            .await
            .map_err(|e| {
                Error::cluster_api(ClusterRequest::ConfigMaps(namespace.to_string()), e)
            })?;

        let secrets = self
            .client
            .list_secrets(namespace)
            .await
            .map_err(|e| Error::cluster_api(ClusterRequest::Secrets(namespace.to_string()), e))?;

        logger!(
            debug,
            "namespace={} pods={} configmaps={} secrets={}",
            namespace,
            pods.len(),
            configmaps.len(),
            secrets.len()
        );

        Ok(scan_namespace(&pods, &configmaps, &secrets, self.allow_list))
    }

    pub async fn run(&self) -> Result<UnusedResult, Error> {
        let namespaces = self.target_namespaces().await?;

        logger!(info, "scanning {} namespaces", namespaces.len());

        let mut result = UnusedResult::default();

        for namespace in &namespaces {
            let scan = self.scan(namespace).await?;

            for (kind, unused) in [
                (ResourceKind::ConfigMap, &scan.configmaps),
                (ResourceKind::Secret, &scan.secrets),
            ] {
                logger!(
                    info,
                    "namespace={} kind={} unused={}",
                    namespace,
                    kind,
                    unused.len()
                );
            }

            result.extend(namespace, scan);
        }

        Ok(result)
    }
}
