//! Adapter contract checks against a live database.

use super::helpers::{connect, namespace};
use reviewhub::storage::ports::KeyValueStore;
use serde_json::json;

#[tokio::test(flavor = "multi_thread")]
async fn prefix_scan_follows_first_insertion() -> eyre::Result<()> {
    let Some(store) = connect().await else {
        return Ok(());
    };
    let prefix = format!("{}:", namespace());

    store.set(&format!("{prefix}b"), json!("b1")).await?;
    store.set(&format!("{prefix}a"), json!("a")).await?;
    store.set(&format!("{prefix}b"), json!("b2")).await?;

    let values = store.get_by_prefix(&prefix).await?;

    eyre::ensure!(values == vec![json!("b2"), json!("a")], "got {values:?}");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn prefix_scan_treats_wildcards_literally() -> eyre::Result<()> {
    let Some(store) = connect().await else {
        return Ok(());
    };
    let base = namespace();

    store.set(&format!("{base}%x"), json!(1)).await?;
    store.set(&format!("{base}_x"), json!(2)).await?;
    store.set(&format!("{base}zx"), json!(3)).await?;

    let values = store.get_by_prefix(&format!("{base}%")).await?;

    eyre::ensure!(values == vec![json!(1)], "got {values:?}");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn compare_and_swap_honours_expectations() -> eyre::Result<()> {
    let Some(store) = connect().await else {
        return Ok(());
    };
    let key = format!("{}:cas", namespace());

    eyre::ensure!(store.compare_and_swap(&key, None, json!(1)).await?);
    eyre::ensure!(!store.compare_and_swap(&key, None, json!(2)).await?);
    eyre::ensure!(!store.compare_and_swap(&key, Some(json!(9)), json!(3)).await?);
    eyre::ensure!(store.compare_and_swap(&key, Some(json!(1)), json!(4)).await?);

    eyre::ensure!(store.get(&key).await? == Some(json!(4)));
    eyre::ensure!(store.get(&format!("{key}-missing")).await?.is_none());
    Ok(())
}
