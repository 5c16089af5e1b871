//! MongoDB side of the pipeline: connect, wipe the collection, bulk-insert
//! batches.

use log::{debug, info};
use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection};

use crate::error_handling::MigrationError;
use crate::table::{row_to_document, Table};

/// Connects to the destination server and resolves the target collection.
///
/// The driver connects lazily, so the database is pinged here to make an
/// unreachable or unauthorized server fail in the connect stage rather than
/// at the first write.
pub async fn connect(
    uri: &str,
    database: &str,
    collection: &str,
) -> Result<Collection<Document>, MigrationError> {
    let client = Client::with_uri_str(uri)
        .await
        .map_err(MigrationError::Connect)?;
    let db = client.database(database);
    db.run_command(doc! { "ping": 1 })
        .await
        .map_err(MigrationError::Connect)?;

    // The URI may embed credentials, so it is never logged
    info!("Connected to database {:?}", database);
    Ok(db.collection::<Document>(collection))
}

/// Deletes every document in the collection. Returns the deleted count.
pub async fn clear_collection(collection: &Collection<Document>) -> Result<u64, MigrationError> {
    let result = collection
        .delete_many(doc! {})
        .await
        .map_err(MigrationError::Reset)?;
    Ok(result.deleted_count)
}

/// Writes the table into the collection in fixed-size bulk inserts.
///
/// Batches go out strictly in source order, one at a time. On failure the
/// error records how many batches were already committed; those are not
/// rolled back. Returns the number of batches written.
pub async fn insert_batches(
    collection: &Collection<Document>,
    table: &Table,
    batch_size: usize,
) -> Result<usize, MigrationError> {
    let mut written = 0usize;
    for batch in table.batches(batch_size) {
        let documents: Vec<Document> = batch
            .iter()
            .map(|row| row_to_document(&table.columns, row))
            .collect();

        collection
            .insert_many(documents)
            .await
            .map_err(|source| MigrationError::Write {
                batches_written: written,
                source,
            })?;
        written += 1;
        debug!("Inserted batch {} ({} documents)", written, batch.len());
    }
    Ok(written)
}
