use lapin::options::QueueDeclareOptions;
use lapin::types::FieldTable;
use lapin::{Channel, Connection};
use tracing::info;

use crate::amqp::ConnectionFactory;

use super::round_robin::RoundRobin;
use super::{Error, RetryPolicy};

/// The queue every channel in the pool is bound to.
pub const PRODUCT_EVENTS_QUEUE: &str = "product_events";

/// How a [`ChannelPool`] should be provisioned.
///
/// The defaults match the storefront backend: 20 channels bound to the
/// `product_events` queue, with up to 10 connection attempts 3 seconds apart.
#[derive(Debug, Clone)]
pub struct PoolOptions {
    /// The queue each channel declares on creation.
    pub queue_name: String,
    /// Number of channels provisioned up-front. Must be at least 1 for the
    /// pool to be usable.
    pub pool_size: usize,
    /// Retry behaviour for the initial connection.
    pub retry: RetryPolicy,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            queue_name: PRODUCT_EVENTS_QUEUE.into(),
            pool_size: 20,
            retry: RetryPolicy::default(),
        }
    }
}

/// A fixed-size pool of AMQP channels sharing one broker connection,
/// handed out in round-robin order.
///
/// The pool is provisioned eagerly by [`ChannelPool::connect`]: one
/// connection, then `pool_size` channels, each declaring the configured
/// queue so publishing can start immediately. There is no teardown
/// operation; the connection and its channels live as long as the pool
/// value and are torn down when it is dropped.
pub struct ChannelPool {
    // Keeps the underlying TCP connection alive for as long as the pool.
    _connection: Connection,
    channels: RoundRobin<Channel>,
    queue_name: String,
}

impl ChannelPool {
    /// Establish the broker connection and provision the whole channel pool.
    ///
    /// Connection establishment and channel provisioning are retried as one
    /// unit under `options.retry`: any failure tears the attempt down, and
    /// after the configured interval the next attempt starts from a fresh
    /// connection. When the budget runs out the last failure is returned as
    /// [`Error::RetriesExhausted`].
    pub async fn connect(factory: &ConnectionFactory, options: PoolOptions) -> Result<Self, Error> {
        let PoolOptions {
            queue_name,
            pool_size,
            retry,
        } = options;

        let (connection, channels) = retry
            .run(|| provision(factory, &queue_name, pool_size))
            .await?;

        info!(
            "Connected to RabbitMq successfully, {} channels initialized",
            channels.len()
        );
        Ok(Self {
            _connection: connection,
            channels: RoundRobin::new(channels),
            queue_name,
        })
    }

    /// The next channel in round-robin order.
    ///
    /// Never suspends. Fails with [`Error::EmptyPool`] only if the pool was
    /// built with `pool_size` zero.
    pub fn channel(&self) -> Result<&Channel, Error> {
        self.channels.next_slot()
    }

    /// The queue every pooled channel has declared.
    pub fn queue_name(&self) -> &str {
        &self.queue_name
    }

    /// Number of channels in the pool.
    pub fn size(&self) -> usize {
        self.channels.len()
    }
}

/// One connection attempt: a fresh connection plus the full set of channels,
/// each asserting the queue's existence.
async fn provision(
    factory: &ConnectionFactory,
    queue_name: &str,
    pool_size: usize,
) -> Result<(Connection, Vec<Channel>), anyhow::Error> {
    let connection = factory.new_connection().await?;
    let mut channels = Vec::with_capacity(pool_size);
    for _ in 0..pool_size {
        let channel = connection.create_channel().await?;
        channel
            .queue_declare(
                queue_name,
                QueueDeclareOptions::default(),
                FieldTable::default(),
            )
            .await?;
        channels.push(channel);
    }
    Ok((connection, channels))
}
