use log::{info, warn};
use mongodb::{
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client,
};
use std::sync::Arc;
use std::time::Duration;

/// Builds a pooled client and pings `database`. A failed ping only warns; the
/// driver reconnects lazily.
pub async fn create_mongo_client(uri: &str, database: &str) -> mongodb::error::Result<Arc<Client>> {
    let mut client_options = ClientOptions::parse(uri).await?;

    client_options.app_name = Some("travel-planner-api".to_string());
    client_options.connect_timeout = Some(Duration::from_secs(10));
    client_options.server_selection_timeout = Some(Duration::from_secs(10));
    client_options.max_pool_size = Some(10);
    client_options.min_pool_size = Some(1);

    // Set the server API if using MongoDB 5.0+
    let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
    client_options.server_api = Some(server_api);

    let client = Client::with_options(client_options)?;

    match client
        .database(database)
        .run_command(mongodb::bson::doc! {"ping": 1})
        .await
    {
        Ok(_) => info!("Connected to MongoDB database '{}'", database),
        Err(e) => {
            warn!("Connected to MongoDB but ping failed: {}", e);
            warn!("Saved plans may be unavailable until the database is reachable");
        }
    }

    Ok(Arc::new(client))
}
