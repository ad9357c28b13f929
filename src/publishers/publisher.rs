use crate::pool::ChannelPool;
use crate::publishers::ProductEvent;
use lapin::options::BasicPublishOptions;
use lapin::{BasicProperties, Channel};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;
use uuid::Uuid;

/// A high-level interface to publish product events.
///
/// Events are JSON-encoded and published to the default exchange with the
/// pool's queue name as routing key, so they land directly on the queue
/// every pooled channel has declared.
///
/// # How do I build a `Publisher`?
///
/// `Publisher` provides a fluent API to add configuration step-by-step, known as
/// "builder pattern" in Rust.
/// The starting point is [`Publisher::builder`].
///
/// # Examples
///
/// Check the `publish` demo in the `demos` directory to see `Publisher` in action.
pub struct Publisher {
    /// Channel pool providing the underlying AMQP channels.
    channel_pool: Arc<ChannelPool>,
    /// Timeout on publishing.
    timeout: std::time::Duration,
}

impl Publisher {
    /// Start building a [`Publisher`].
    ///
    /// You will need a connected channel pool.
    pub fn builder(channel_pool: Arc<ChannelPool>) -> PublisherBuilder {
        PublisherBuilder::new(channel_pool)
    }

    /// Publish a product event to RabbitMq.
    ///
    /// The event is stamped with a `message_id` and a timestamp (unless the
    /// caller-provided properties already carry them) and published with
    /// persistent delivery mode.
    pub async fn publish(&self, event: &ProductEvent) -> Result<(), PublisherError> {
        self.publish_with_properties(event, BasicProperties::default())
            .await
    }

    /// Publish a product event to RabbitMq with custom AMQP properties.
    pub async fn publish_with_properties(
        &self,
        event: &ProductEvent,
        properties: BasicProperties,
    ) -> Result<(), PublisherError> {
        let payload = serde_json::to_vec(event).map_err(PublisherError::Serialization)?;
        let properties = if properties.content_type().is_none() {
            properties.with_content_type("application/json".into())
        } else {
            properties
        };
        let properties = stamp_amqp_properties(properties);

        let publish_future = async {
            let channel = self
                .channel_pool
                .channel()
                .map_err(|e| PublisherError::GenericError(e.into()))?;
            publish(channel, &payload, self.channel_pool.queue_name(), properties).await
        };

        match tokio::time::timeout(self.timeout, publish_future).await {
            Ok(result) => result,
            Err(_) => Err(PublisherError::TimeoutError),
        }
    }
}

/// Error returned when trying to publish an event using `Publisher`.
#[derive(thiserror::Error, Debug)]
pub enum PublisherError {
    #[error("Failed to serialize the product event payload")]
    Serialization(#[source] serde_json::Error),
    #[error("Generic error encountered when interacting with the RabbitMq broker")]
    GenericError(#[source] anyhow::Error),
    #[error("The timeout threshold was reached while trying to publish the message")]
    TimeoutError,
}

/// A builder for [`Publisher`].
///
/// Use [`Publisher::builder`] as entrypoint.
pub struct PublisherBuilder {
    channel_pool: Arc<ChannelPool>,
    timeout: std::time::Duration,
}

impl PublisherBuilder {
    fn new(channel_pool: Arc<ChannelPool>) -> Self {
        Self {
            channel_pool,
            timeout: std::time::Duration::from_secs(3),
        }
    }

    /// Timeout applied when attempting to publish an event.
    /// Defaults to 3 seconds if left unspecified.
    #[must_use]
    pub fn publish_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Finalise the builder and get an instance of [`Publisher`].
    pub fn build(self) -> Publisher {
        Publisher {
            channel_pool: self.channel_pool,
            timeout: self.timeout,
        }
    }
}

/// Publish a payload on the default RabbitMq exchange, routed straight to
/// the named queue.
#[tracing::instrument(level = "debug", skip(channel, payload))]
async fn publish(
    channel: &Channel,
    payload: &[u8],
    routing_key: &str,
    properties: BasicProperties,
) -> Result<(), PublisherError> {
    // Delivery mode: Non-persistent (1) or persistent (2).
    let properties = properties.with_delivery_mode(2);

    channel
        .basic_publish(
            "",
            routing_key,
            BasicPublishOptions::default(),
            payload,
            properties,
        )
        .await
        .map_err(|e| PublisherError::GenericError(e.into()))?
        .await
        .map_err(|e| PublisherError::GenericError(e.into()))?;

    Ok(())
}

/// Inject the current timestamp and a `message_id` into the AMQP properties,
/// keeping any value the caller already set.
fn stamp_amqp_properties(properties: BasicProperties) -> BasicProperties {
    let current_timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|ct| ct.as_secs());

    let properties = if let Some(ct) = current_timestamp {
        let ts = *properties.timestamp();
        properties.with_timestamp(ts.unwrap_or(ct))
    } else {
        warn!("System time is before 1970");
        properties
    };

    let message_id = properties.message_id().clone();
    properties.with_message_id(message_id.unwrap_or_else(|| Uuid::new_v4().to_string().into()))
}
