//! An eager, fixed-size pool of [`lapin::Channel`]s sharing one broker connection.
//!
//! This module provides two key guarantees:
//! - Channels are provisioned up-front and bound to the product-events queue,
//!   so publishing never pays per-call connection overhead.
//! - Channels are handed out in strict round-robin order, fairly spreading
//!   traffic across the pool even with parallel callers.
//!
//! ```rust,no_run
//! use bakery_events::amqp::{configuration::BrokerSettings, ConnectionFactory};
//! use bakery_events::pool::{ChannelPool, PoolOptions};
//!
//! // Function for asyncness.
//! async fn example() -> anyhow::Result<()> {
//!     // initialize rabbitmq connection details and config.
//!     let settings = BrokerSettings::default();
//!     let factory = ConnectionFactory::new_from_config(&settings);
//!
//!     // connect and provision the whole pool, retrying on failure.
//!     let pool = ChannelPool::connect(&factory, PoolOptions::default()).await?;
//!
//!     // get the next channel in round-robin order.
//!     let channel = pool.channel()?;
//!     Ok(())
//! }
//! ```

mod channel;
mod error;
mod retry;
mod round_robin;

pub use channel::{ChannelPool, PoolOptions, PRODUCT_EVENTS_QUEUE};
pub use error::Error;
pub use retry::RetryPolicy;
