//! Amazon SQS queue

use super::{models::encode_message, traits::SubqueryQueue};
use crate::{config::QueueConfig, db::AwsCredential, Error, Result};
use async_trait::async_trait;
use aws_sdk_sqs::{
    config::{BehaviorVersion, Credentials, Region},
    error::DisplayErrorContext,
    operation::purge_queue::PurgeQueueError,
    Client,
};
use search_url::Subquery;
use std::time::Duration;

const CREDENTIAL_PROVIDER: &str = "aws_credentials";

/// SQS queue resolved by name at connect time.
#[derive(Debug, Clone)]
pub struct SqsQueue {
    client: Client,
    name: String,
    url: String,
    purge_settle: Duration,
}

impl SqsQueue {
    /// Open an SQS session with the stored credential and resolve the queue URL.
    pub async fn connect(credential: &AwsCredential, config: &QueueConfig) -> Result<Self> {
        let credentials = Credentials::new(
            credential.access_key_id.clone(),
            credential.secret_access_key.clone(),
            None,
            None,
            CREDENTIAL_PROVIDER,
        );

        let mut builder = aws_sdk_sqs::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(credential.region_name.clone()))
            .credentials_provider(credentials);
        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint.clone());
        }
        let client = Client::from_conf(builder.build());

        let output = client
            .get_queue_url()
            .queue_name(&config.name)
            .send()
            .await
            .map_err(|e| sqs_error("GetQueueUrl", e))?;
        let url = output
            .queue_url()
            .ok_or_else(|| Error::Queue(format!("no URL returned for queue '{}'", config.name)))?
            .to_string();

        tracing::info!(
            queue = %config.name,
            region = %credential.region_name,
            "Connected to SQS"
        );

        Ok(Self {
            client,
            name: config.name.clone(),
            url,
            purge_settle: config.purge_settle(),
        })
    }
}

#[async_trait]
impl SubqueryQueue for SqsQueue {
    fn name(&self) -> &str {
        &self.name
    }

    /// Returns once the purge has settled.
    ///
    /// SQS acknowledges `PurgeQueue` immediately but keeps deleting for up to
    /// 60 seconds, including messages sent during that time.
    async fn purge(&self) -> Result<()> {
        self.client
            .purge_queue()
            .queue_url(&self.url)
            .send()
            .await
            .map_err(|e| purge_error(&self.name, e.as_service_error(), e.to_string()))?;

        wait_for_purge(&self.name, self.purge_settle).await;
        Ok(())
    }

    async fn send(&self, subquery: &Subquery) -> Result<()> {
        let body = encode_message(subquery)?;
        let output = self
            .client
            .send_message()
            .queue_url(&self.url)
            .message_body(body)
            .send()
            .await
            .map_err(|e| sqs_error("SendMessage", e))?;

        tracing::trace!(
            message_id = output.message_id().unwrap_or_default(),
            "SQS accepted message"
        );
        Ok(())
    }
}

/// Block until a purge issued now can no longer delete new messages.
async fn wait_for_purge(queue: &str, settle: Duration) {
    if settle.is_zero() {
        return;
    }
    tracing::info!(
        queue = %queue,
        settle_seconds = settle.as_secs(),
        "Waiting for queue purge to finish"
    );
    tokio::time::sleep(settle).await;
}

fn purge_error(queue: &str, service_error: Option<&PurgeQueueError>, detail: String) -> Error {
    match service_error {
        Some(e) if e.is_purge_queue_in_progress() => Error::PurgeInProgress(queue.to_string()),
        Some(e) => sqs_error("PurgeQueue", e),
        None => Error::Queue(format!("PurgeQueue failed: {detail}")),
    }
}

fn sqs_error<E>(operation: &str, err: E) -> Error
where
    E: std::error::Error,
{
    Error::Queue(format!("{operation} failed: {}", DisplayErrorContext(err)))
}
