use std::collections::BTreeSet;

use super::ResourceKind;

/// Names that are never reported as unused, whatever references them.
///
/// Built once from the configuration before scanning starts and only
/// read afterwards.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SystemAllowList {
    configmaps: BTreeSet<String>,
    secrets: BTreeSet<String>,
}

impl SystemAllowList {
    pub fn new(
        configmaps: impl IntoIterator<Item = impl Into<String>>,
        secrets: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            configmaps: configmaps.into_iter().map(Into::into).collect(),
            secrets: secrets.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact name match against the list of the given kind.
    pub fn is_system_managed(&self, kind: ResourceKind, name: &str) -> bool {
        match kind {
            ResourceKind::ConfigMap => self.configmaps.contains(name),
            ResourceKind::Secret => self.secrets.contains(name),
        }
    }
}

#[allow(clippy::bool_assert_comparison)]
#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn allow_list() -> SystemAllowList {
        SystemAllowList::new(
            [
                "kube-root-ca.crt",
                "cluster-info",
                "kubelet-config",
                "kubeadm-config",
            ],
            ["foobar"],
        )
    }

    #[rstest]
    #[case::empty_string("", false)]
    #[case::non_system_configmap("my-configmap", false)]
    #[case::system_configmap("cluster-info", true)]
    #[case::root_ca("kube-root-ca.crt", true)]
    #[case::prefix_only("cluster-info-2", false)]
    fn configmapの判定(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(
            allow_list().is_system_managed(ResourceKind::ConfigMap, name),
            expected
        );
    }

    #[rstest]
    #[case::listed("foobar", true)]
    #[case::not_listed("db-secret", false)]
    fn secretの判定(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(
            allow_list().is_system_managed(ResourceKind::Secret, name),
            expected
        );
    }

    #[test]
    fn 種類ごとに別のリストで判定する() {
        let allow_list = allow_list();

        assert_eq!(
            allow_list.is_system_managed(ResourceKind::Secret, "cluster-info"),
            false
        );
        assert_eq!(
            allow_list.is_system_managed(ResourceKind::ConfigMap, "foobar"),
            false
        );
    }

    #[test]
    fn 空のリストは何も除外しない() {
        let allow_list = SystemAllowList::default();

        assert_eq!(
            allow_list.is_system_managed(ResourceKind::ConfigMap, "cluster-info"),
            false
        );
    }
}
