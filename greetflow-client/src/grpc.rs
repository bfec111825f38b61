//! gRPC implementation of [`WorkflowService`].

use async_trait::async_trait;
use greetflow_core::TransportError;
use greetflow_proto::generated::*;
use greetflow_proto::{WorkflowService, WorkflowServiceClient};
use std::time::Duration;
use tonic::transport::{Channel, Endpoint};
use tracing::debug;

/// gRPC-based workflow service client
#[derive(Clone)]
pub struct GrpcWorkflowServiceClient {
    client: WorkflowServiceClient<Channel>,
    endpoint: String,
}

impl GrpcWorkflowServiceClient {
    /// Connect to `address` (`host:port` or a full URL).
    pub async fn connect(
        address: impl AsRef<str>,
        connect_timeout: Duration,
    ) -> Result<Self, TransportError> {
        let endpoint = normalize_endpoint(address.as_ref());
        let channel = Endpoint::from_shared(endpoint.clone())
            .map_err(|e| TransportError::InvalidEndpoint(format!("{endpoint}: {e}")))?
            .connect_timeout(connect_timeout)
            .connect()
            .await
            .map_err(|e| TransportError::connection_failed(endpoint.clone(), e))?;

        debug!(endpoint = %endpoint, "connected to workflow service");
        Ok(Self {
            client: WorkflowServiceClient::new(channel),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Prefix `http://` when `address` carries no scheme.
pub fn normalize_endpoint(address: &str) -> String {
    let address = address.trim();
    if address.contains("://") {
        address.to_string()
    } else {
        format!("http://{address}")
    }
}

#[async_trait]
impl WorkflowService for GrpcWorkflowServiceClient {
    async fn start_workflow_execution(
        &self,
        request: StartWorkflowExecutionRequest,
    ) -> Result<StartWorkflowExecutionResponse, TransportError> {
        let mut client = self.client.clone();
        Ok(client.start_workflow_execution(request).await?.into_inner())
    }

    async fn get_workflow_execution_result(
        &self,
        request: GetWorkflowExecutionResultRequest,
    ) -> Result<GetWorkflowExecutionResultResponse, TransportError> {
        let mut client = self.client.clone();
        Ok(client.get_workflow_execution_result(request).await?.into_inner())
    }

    async fn request_cancel_workflow_execution(
        &self,
        request: RequestCancelWorkflowExecutionRequest,
    ) -> Result<RequestCancelWorkflowExecutionResponse, TransportError> {
        let mut client = self.client.clone();
        Ok(client
            .request_cancel_workflow_execution(request)
            .await?
            .into_inner())
    }

    async fn poll_workflow_task(
        &self,
        request: PollWorkflowTaskRequest,
    ) -> Result<PollWorkflowTaskResponse, TransportError> {
        let mut client = self.client.clone();
        Ok(client.poll_workflow_task(request).await?.into_inner())
    }

    async fn respond_workflow_task_completed(
        &self,
        request: RespondWorkflowTaskCompletedRequest,
    ) -> Result<RespondWorkflowTaskCompletedResponse, TransportError> {
        let mut client = self.client.clone();
        Ok(client
            .respond_workflow_task_completed(request)
            .await?
            .into_inner())
    }

    async fn poll_activity_task(
        &self,
        request: PollActivityTaskRequest,
    ) -> Result<PollActivityTaskResponse, TransportError> {
        let mut client = self.client.clone();
        Ok(client.poll_activity_task(request).await?.into_inner())
    }

    async fn respond_activity_task_completed(
        &self,
        request: RespondActivityTaskCompletedRequest,
    ) -> Result<RespondActivityTaskCompletedResponse, TransportError> {
        let mut client = self.client.clone();
        Ok(client
            .respond_activity_task_completed(request)
            .await?
            .into_inner())
    }

    async fn respond_activity_task_failed(
        &self,
        request: RespondActivityTaskFailedRequest,
    ) -> Result<RespondActivityTaskFailedResponse, TransportError> {
        let mut client = self.client.clone();
        Ok(client
            .respond_activity_task_failed(request)
            .await?
            .into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_port_gets_http_scheme() {
        assert_eq!(normalize_endpoint("localhost:7233"), "http://localhost:7233");
        assert_eq!(
            normalize_endpoint("https://flow.example.com:443"),
            "https://flow.example.com:443"
        );
    }

    #[tokio::test]
    async fn unreachable_service_is_a_connection_failure() {
        // Port 1 is reserved and refuses connections on loopback.
        let err = GrpcWorkflowServiceClient::connect("127.0.0.1:1", Duration::from_millis(500))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, TransportError::ConnectionFailed { .. }));
    }
}
