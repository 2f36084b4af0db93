//! Document command handlers.
//!
//! Update dispatch:
//!
//! | Body | Store operation |
//! |------|-----------------|
//! | `doc` | `update` |
//! | `doc` + `if_version` | `update_if_version` |
//! | `doc` + `upsert` or `doc_as_upsert` | `update_scripted` with a merge transform |
//! | `script` (+ `upsert`) | `update_scripted` with the compiled script |

use docstore_core::{CollectionName, Document, DocumentId, Version};
use docstore_primitives::script::{check_lang, Script};
use docstore_primitives::{DocumentStore, GetResult, WriteResult};

use super::{collection_name, document_id};
use crate::convert::convert_result;
use crate::types::{GetResponse, OpType, ScriptSpec, UpdateBody, WriteResponse};
use crate::{Error, Output, Result};

fn write_output(written: WriteResult) -> Output {
    Output::Write(WriteResponse {
        index: written.key.collection.to_string(),
        id: written.key.id.to_string(),
        version: written.version.as_u64(),
        result: written.result,
    })
}

fn get_output(read: GetResult) -> Output {
    Output::Get(GetResponse {
        index: read.key.collection.to_string(),
        id: read.key.id.to_string(),
        version: read.version.map(|v| v.as_u64()),
        found: read.found,
        source: read.document,
    })
}

/// Handle Index command.
pub fn index(
    store: &DocumentStore,
    collection: String,
    id: Option<String>,
    document: Document,
    op_type: OpType,
) -> Result<Output> {
    let name = collection_name(&collection)?;
    let id = id.as_deref().map(document_id).transpose()?;
    let written = match op_type {
        OpType::Create => store.create(&name, document, id),
        OpType::Index => store.index(&name, document, id),
    };
    Ok(write_output(convert_result(written)?))
}

/// Handle Get command.
pub fn get(store: &DocumentStore, collection: String, id: String) -> Result<Output> {
    let name = collection_name(&collection)?;
    let id = document_id(&id)?;
    Ok(get_output(convert_result(store.get(&name, &id))?))
}

/// Handle Exists command.
pub fn exists(store: &DocumentStore, collection: String, id: String) -> Result<Output> {
    let name = collection_name(&collection)?;
    let id = document_id(&id)?;
    Ok(Output::Bool(store.exists(&name, &id)))
}

/// Handle Update command.
pub fn update(
    store: &DocumentStore,
    collection: String,
    id: String,
    body: UpdateBody,
) -> Result<Output> {
    let name = collection_name(&collection)?;
    let id = document_id(&id)?;

    let UpdateBody {
        doc,
        script,
        upsert,
        doc_as_upsert,
        if_version,
    } = body;

    let written = match (doc, script) {
        (Some(doc), None) => update_doc(store, &name, &id, doc, upsert, doc_as_upsert, if_version)?,
        (None, Some(script)) => {
            if doc_as_upsert {
                return Err(Error::invalid_input("doc_as_upsert requires doc"));
            }
            if if_version.is_some() {
                return Err(Error::invalid_input(
                    "if_version cannot be combined with script",
                ));
            }
            update_script(store, &name, &id, script, upsert)?
        }
        (Some(_), Some(_)) => {
            return Err(Error::invalid_input(
                "update body must not contain both doc and script",
            ))
        }
        (None, None) => {
            return Err(Error::invalid_input(
                "update body requires either doc or script",
            ))
        }
    };
    Ok(write_output(written))
}

fn update_doc(
    store: &DocumentStore,
    name: &CollectionName,
    id: &DocumentId,
    doc: Document,
    upsert: Option<Document>,
    doc_as_upsert: bool,
    if_version: Option<u64>,
) -> Result<WriteResult> {
    let upsert = if doc_as_upsert { Some(doc.clone()) } else { upsert };

    match (upsert, if_version) {
        (Some(_), Some(_)) => Err(Error::invalid_input(
            "if_version cannot be combined with upsert",
        )),
        (Some(upsert), None) => convert_result(store.update_scripted(
            name,
            id,
            |current| Ok(current.merged(doc)),
            Some(upsert),
        )),
        (None, Some(expected)) => {
            convert_result(store.update_if_version(name, id, doc, Version::new(expected)))
        }
        (None, None) => convert_result(store.update(name, id, doc)),
    }
}

fn update_script(
    store: &DocumentStore,
    name: &CollectionName,
    id: &DocumentId,
    spec: ScriptSpec,
    upsert: Option<Document>,
) -> Result<WriteResult> {
    let body = spec.into_body();
    check_lang(&body.lang)?;
    let script = Script::compile(body.source)?;
    let params = body.params;

    convert_result(store.update_scripted(
        name,
        id,
        |current| script.execute(current, &params).map_err(Into::into),
        upsert,
    ))
}
