//! Facilities to fan out product events to the RabbitMq queue. Check out [`Publisher`] as a starting point.
mod product_event;
mod publisher;

pub use product_event::{ProductEvent, ProductEventKind};
pub use publisher::{Publisher, PublisherBuilder, PublisherError};
