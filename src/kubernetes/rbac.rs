// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The cluster-admin binding held for the duration of an install/uninstall cycle

use crate::config::Config;
use crate::constants::rbac::{API_GROUP, BINDING_NAME, CLUSTER_ROLE};
use crate::error::Result;
use k8s_openapi::api::rbac::v1::{ClusterRoleBinding, RoleRef, Subject};
use kube::{
    api::{DeleteParams, ObjectMeta, PostParams},
    Api, Client,
};
use tracing::{debug, info, instrument};

/// The namespaced service account being granted cluster-admin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIdentity {
    pub namespace: String,
    pub name: String,
}

impl ServiceIdentity {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl From<&Config> for ServiceIdentity {
    fn from(config: &Config) -> Self {
        Self::new(&config.namespace, &config.service_account)
    }
}

/// Creates and removes the `kwok-provider` ClusterRoleBinding
pub struct AccessBinder {
    client: Client,
    subject: ServiceIdentity,
}

impl AccessBinder {
    pub fn new(client: Client, subject: ServiceIdentity) -> Self {
        Self { client, subject }
    }

    pub fn subject(&self) -> &ServiceIdentity {
        &self.subject
    }

    fn api(&self) -> Api<ClusterRoleBinding> {
        Api::all(self.client.clone())
    }

    /// The binding between `cluster-admin` and the configured service account
    pub fn binding(&self) -> ClusterRoleBinding {
        ClusterRoleBinding {
            metadata: ObjectMeta {
                name: Some(BINDING_NAME.to_string()),
                ..Default::default()
            },
            role_ref: RoleRef {
                api_group: API_GROUP.to_string(),
                kind: "ClusterRole".to_string(),
                name: CLUSTER_ROLE.to_string(),
            },
            subjects: Some(vec![Subject {
                kind: "ServiceAccount".to_string(),
                namespace: Some(self.subject.namespace.clone()),
                name: self.subject.name.clone(),
                ..Default::default()
            }]),
        }
    }

    /// Create the binding. An existing binding is a conflict, not a success.
    #[instrument(skip(self), fields(subject = %format!("{}/{}", self.subject.namespace, self.subject.name)))]
    pub async fn bind(&self) -> Result<()> {
        self.api()
            .create(&PostParams::default(), &self.binding())
            .await?;
        info!(
            "Bound {} to service account {}/{}",
            CLUSTER_ROLE, self.subject.namespace, self.subject.name
        );
        Ok(())
    }

    /// Delete the binding. A binding that is already gone counts as deleted.
    #[instrument(skip(self))]
    pub async fn unbind(&self) -> Result<()> {
        match self.api().delete(BINDING_NAME, &DeleteParams::default()).await {
            Ok(_) => {
                info!("Deleted ClusterRoleBinding {}", BINDING_NAME);
                Ok(())
            }
            Err(kube::Error::Api(err)) if err.code == 404 => {
                debug!("ClusterRoleBinding {} already absent", BINDING_NAME);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
