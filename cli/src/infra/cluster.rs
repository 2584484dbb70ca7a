//! Kubernetes adapter backed by `kube`'s dynamic API.
//!
//! Every call builds an `Api<DynamicObject>` for the locator, so no
//! compile-time resource types are needed.

use kube::api::{Api, ApiResource, DeleteParams, DynamicObject, PostParams};
use kube::Client;
use serde_json::Value;

use crate::application::ports::ClusterApi;
use crate::domain::{ClusterError, ResourceLocator};

/// `ClusterApi` over a `kube::Client`.
#[derive(Clone)]
pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    /// Connect using the ambient kubeconfig or in-cluster credentials.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::Unreachable` if no usable configuration exists.
    pub async fn connect() -> Result<Self, ClusterError> {
        let client = Client::try_default().await.map_err(classify)?;
        tracing::debug!(namespace = client.default_namespace(), "kubernetes client created");
        Ok(Self { client })
    }

    #[must_use]
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    fn api(&self, locator: &ResourceLocator, namespace: &str) -> Api<DynamicObject> {
        let resource = ApiResource {
            group: locator.group.clone(),
            version: locator.version.clone(),
            api_version: locator.api_version(),
            kind: locator.kind.clone(),
            plural: locator.plural.clone(),
        };
        Api::namespaced_with(self.client.clone(), namespace, &resource)
    }
}

impl ClusterApi for KubeCluster {
    async fn create(
        &self,
        locator: &ResourceLocator,
        namespace: &str,
        body: &Value,
    ) -> Result<(), ClusterError> {
        let object = to_object(body)?;
        self.api(locator, namespace)
            .create(&PostParams::default(), &object)
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn resource_version(
        &self,
        locator: &ResourceLocator,
        namespace: &str,
        name: &str,
    ) -> Result<String, ClusterError> {
        let live = self
            .api(locator, namespace)
            .get(name)
            .await
            .map_err(classify)?;
        Ok(live.metadata.resource_version.unwrap_or_default())
    }

    async fn replace(
        &self,
        locator: &ResourceLocator,
        namespace: &str,
        name: &str,
        body: &Value,
    ) -> Result<(), ClusterError> {
        let object = to_object(body)?;
        self.api(locator, namespace)
            .replace(name, &PostParams::default(), &object)
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn delete(
        &self,
        locator: &ResourceLocator,
        namespace: &str,
        name: &str,
    ) -> Result<(), ClusterError> {
        self.api(locator, namespace)
            .delete(name, &DeleteParams::default())
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn server_version(&self) -> Result<String, ClusterError> {
        let info = self.client.apiserver_version().await.map_err(classify)?;
        Ok(info.git_version)
    }
}

fn to_object(body: &Value) -> Result<DynamicObject, ClusterError> {
    serde_json::from_value(body.clone()).map_err(|e| ClusterError::Rejected {
        code: 400,
        reason: "BadRequest".to_string(),
        message: format!("object is not a valid Kubernetes resource: {e}"),
    })
}

/// Map a `kube::Error` onto the port's error classification.
fn classify(err: kube::Error) -> ClusterError {
    match err {
        kube::Error::Api(resp) if resp.reason == "AlreadyExists" => ClusterError::AlreadyExists,
        kube::Error::Api(resp) if resp.reason == "NotFound" || resp.code == 404 => {
            ClusterError::NotFound
        }
        kube::Error::Api(resp) => ClusterError::Rejected {
            code: resp.code,
            reason: resp.reason,
            message: resp.message,
        },
        other => ClusterError::Unreachable(other.to_string()),
    }
}
