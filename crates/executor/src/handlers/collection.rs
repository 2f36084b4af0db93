//! Collection command handlers.

use docstore_primitives::DocumentStore;

use super::collection_name;
use crate::convert::convert_result;
use crate::types::{CollectionInfoResponse, CollectionSettings};
use crate::{Output, Result};

/// Handle CreateCollection command.
pub fn create_collection(
    store: &DocumentStore,
    collection: String,
    settings: Option<CollectionSettings>,
) -> Result<Output> {
    let name = collection_name(&collection)?;
    convert_result(store.create_collection(&name, settings.unwrap_or_default()))?;
    Ok(Output::Acknowledged)
}

/// Handle CollectionExists command.
pub fn collection_exists(store: &DocumentStore, collection: String) -> Result<Output> {
    let name = collection_name(&collection)?;
    Ok(Output::Bool(store.collection_exists(&name)))
}

/// Handle DropCollection command.
pub fn drop_collection(store: &DocumentStore, collection: String) -> Result<Output> {
    let name = collection_name(&collection)?;
    convert_result(store.drop_collection(&name))?;
    Ok(Output::Acknowledged)
}

/// Handle Count command.
pub fn count(store: &DocumentStore, collection: String) -> Result<Output> {
    let name = collection_name(&collection)?;
    Ok(Output::Count(convert_result(store.count(&name))?))
}

/// Handle CollectionInfo command.
pub fn collection_info(store: &DocumentStore, collection: String) -> Result<Output> {
    let name = collection_name(&collection)?;
    let info = convert_result(store.collection_info(&name))?;
    Ok(Output::CollectionInfo(CollectionInfoResponse {
        index: info.name.to_string(),
        settings: info.settings,
        created_at: info.created_at.as_micros(),
        docs_count: info.count,
    }))
}

/// Handle ListCollections command.
pub fn list_collections(store: &DocumentStore) -> Result<Output> {
    Ok(Output::Collections(
        store
            .list_collections()
            .into_iter()
            .map(String::from)
            .collect(),
    ))
}
