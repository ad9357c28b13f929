use std::sync::Arc;

use bakery_events::amqp::{configuration::BrokerSettings, ConnectionFactory};
use bakery_events::pool::{ChannelPool, Error, PoolOptions};
use bakery_events::products::Product;
use bakery_events::publishers::{ProductEvent, Publisher};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Connection parameters come from the RABBITMQ_* environment variables,
    // falling back to the defaults of the official RabbitMq Docker image.
    let settings = BrokerSettings::from_env()?;
    let factory = ConnectionFactory::new_from_config(&settings);

    // Connect and provision the whole channel pool up-front.
    // The default options match the storefront backend: 20 channels bound to
    // the `product_events` queue, with up to 10 connection attempts spaced
    // 3 seconds apart.
    let pool = match ChannelPool::connect(&factory, PoolOptions::default()).await {
        Ok(pool) => Arc::new(pool),
        // An exhausted retry budget comes back as a typed error instead of
        // killing the process; whether that is fatal is the embedder's call.
        // For this backend, it is.
        Err(error @ Error::RetriesExhausted { .. }) => {
            eprintln!("{error}. Exiting...");
            std::process::exit(1);
        }
        Err(error) => return Err(error.into()),
    };

    let publisher = Publisher::builder(pool)
        .publish_timeout(std::time::Duration::from_secs(3))
        .build();

    let product = Product {
        id: 1,
        name: "Gulab Jamun".into(),
        category: "sweets".into(),
        price: 6.5,
        stock: 42,
        image: "https://cdn.example.com/gulab-jamun.png".into(),
    };
    product
        .validate()
        .map_err(|violations| format!("invalid product: {violations:?}"))?;

    publisher.publish(&ProductEvent::created(product)).await?;
    println!("Product event published to the product_events queue.");

    Ok(())
}
