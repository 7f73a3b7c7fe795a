use std::collections::BTreeSet;

use k8s_openapi::api::core::v1::{EnvFromSource, EnvVar, Pod, Volume};

/// Names referenced by pods for one resource kind.
pub type UsageSet = BTreeSet<String>;

/// ConfigMap and Secret names one or more pods depend on.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PodReferences {
    pub configmaps: UsageSet,
    pub secrets: UsageSet,
}

impl PodReferences {
    pub fn merge(&mut self, other: PodReferences) {
        self.configmaps.extend(other.configmaps);
        self.secrets.extend(other.secrets);
    }

    fn insert_configmap(&mut self, name: &str) {
        if !name.is_empty() {
            self.configmaps.insert(name.to_string());
        }
    }

    fn insert_secret(&mut self, name: &str) {
        if !name.is_empty() {
            self.secrets.insert(name.to_string());
        }
    }

    fn collect_volume(&mut self, volume: &Volume) {
        if let Some(cm) = &volume.config_map {
            self.insert_configmap(&cm.name);
        }

        if let Some(name) = volume.secret.as_ref().and_then(|s| s.secret_name.as_ref()) {
            self.insert_secret(name);
        }

        let projections = volume
            .projected
            .as_ref()
            .and_then(|p| p.sources.as_ref())
            .into_iter()
            .flatten();

        for projection in projections {
            if let Some(cm) = &projection.config_map {
                self.insert_configmap(&cm.name);
            }

            if let Some(secret) = &projection.secret {
                self.insert_secret(&secret.name);
            }
        }
    }

    fn collect_env(&mut self, env_from: Option<&Vec<EnvFromSource>>, env: Option<&Vec<EnvVar>>) {
        for source in env_from.into_iter().flatten() {
            if let Some(cm) = &source.config_map_ref {
                self.insert_configmap(&cm.name);
            }

            if let Some(secret) = &source.secret_ref {
                self.insert_secret(&secret.name);
            }
        }

        let value_from = env
            .into_iter()
            .flatten()
            .filter_map(|var| var.value_from.as_ref());

        for source in value_from {
            if let Some(key_ref) = &source.config_map_key_ref {
                self.insert_configmap(&key_ref.name);
            }

            if let Some(key_ref) = &source.secret_key_ref {
                self.insert_secret(&key_ref.name);
            }
        }
    }
}

/// Collects every ConfigMap and Secret a pod references through its
/// volumes and the environment of its containers.
///
/// Init and ephemeral containers are inspected the same way as regular
/// containers. Sources that are neither ConfigMap nor Secret backed are
/// ignored.
pub fn collect_references(pod: &Pod) -> PodReferences {
    let mut refs = PodReferences::default();

    let Some(spec) = &pod.spec else {
        return refs;
    };

    for volume in spec.volumes.iter().flatten() {
        refs.collect_volume(volume);
    }

    let containers = spec
        .containers
        .iter()
        .chain(spec.init_containers.iter().flatten());

    for container in containers {
        refs.collect_env(container.env_from.as_ref(), container.env.as_ref());
    }

    for container in spec.ephemeral_containers.iter().flatten() {
        refs.collect_env(container.env_from.as_ref(), container.env.as_ref());
    }

    refs
}
