//! `bakery-events` is the messaging backbone of the bakery storefront backend,
//! built on top of [`lapin`].
//!
//! It connects to a RabbitMQ broker, eagerly provisions a fixed-size pool of
//! channels bound to the `product_events` queue, and hands them out in
//! round-robin order so the CRUD API layer can publish catalog changes without
//! per-call connection overhead.
//!
//! [`ChannelPool`](crate::pool::ChannelPool) and
//! [`Publisher`](crate::publishers::Publisher) are the best starting points to
//! learn what the crate provides and how to leverage it.
//!
//! ## Examples
//!
//! Check the `demos` directory to see the library in action.

pub mod products;
pub mod publishers;

pub mod amqp;
pub mod pool;
