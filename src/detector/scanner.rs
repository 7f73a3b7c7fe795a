use k8s_openapi::api::core::v1::{ConfigMap, Pod, Secret};
use kube::ResourceExt as _;

use super::{
    exclusion::SystemAllowList,
    references::{collect_references, PodReferences, UsageSet},
    ResourceKind,
};

/// Unused names found in a single namespace, in listing order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NamespaceScan {
    pub configmaps: Vec<String>,
    pub secrets: Vec<String>,
}

fn unused_names<'a>(
    names: impl Iterator<Item = String> + 'a,
    used: &'a UsageSet,
    allow_list: &'a SystemAllowList,
    kind: ResourceKind,
) -> impl Iterator<Item = String> + 'a {
    names
        .filter(move |name| !used.contains(name))
        .filter(move |name| !allow_list.is_system_managed(kind, name))
}

/// Computes the ConfigMaps and Secrets of one namespace that no pod in
/// the same namespace references.
///
/// An empty pod list is valid: every resource that is not allow-listed
/// is then reported.
pub fn scan_namespace(
    pods: &[Pod],
    configmaps: &[ConfigMap],
    secrets: &[Secret],
    allow_list: &SystemAllowList,
) -> NamespaceScan {
    let used = pods
        .iter()
        .map(collect_references)
        .fold(PodReferences::default(), |mut acc, refs| {
            acc.merge(refs);
            acc
        });

    NamespaceScan {
        configmaps: unused_names(
            configmaps.iter().map(|cm| cm.name_any()),
            &used.configmaps,
            allow_list,
            ResourceKind::ConfigMap,
        )
        .collect(),
        secrets: unused_names(
            secrets.iter().map(|secret| secret.name_any()),
            &used.secrets,
            allow_list,
            ResourceKind::Secret,
        )
        .collect(),
    }
}
