use std::sync::Arc;

use anyhow::{anyhow, Result};
use jersey_hub_engine::{
    firestore::{FirestoreCollection, FirestoreConfig},
    view::{derive_view, ViewParams},
    CatalogApi,
    ErrorHandler,
    SnapshotHandler,
};

use crate::{formatting::products_table, WatchParams};

/// Subscribe to the live catalog and print the derived view on every snapshot until Ctrl-C.
pub async fn watch_catalog(params: WatchParams) -> Result<()> {
    let view_params = ViewParams {
        search_text: params.search,
        active_filter: params.filter.parse().map_err(|e| anyhow!("{e}"))?,
        sort_key: params.sort.parse().map_err(|e| anyhow!("{e}"))?,
    };
    let config = FirestoreConfig::new_from_env_or_default();
    let collection =
        FirestoreCollection::new(config).map_err(|e| anyhow!("Error creating the Firestore client: {e}"))?;
    let api = CatalogApi::new(collection);
    let on_snapshot: SnapshotHandler = Arc::new(move |products| {
        let view_params = view_params.clone();
        Box::pin(async move {
            let view = derive_view(&products, &view_params);
            println!("--- {} of {} product(s) ---", view.len(), products.len());
            products_table(&view).printstd();
        })
    });
    let on_error: ErrorHandler = Arc::new(|err| {
        Box::pin(async move {
            eprintln!("The catalog feed died: {err}");
        })
    });
    let handle = api.subscribe(on_snapshot, on_error).await.map_err(|e| anyhow!("Could not subscribe: {e}"))?;
    println!("Watching the catalog. Ctrl-C to stop.");
    tokio::signal::ctrl_c().await?;
    handle.cancel().await;
    println!("Bye!");
    Ok(())
}
