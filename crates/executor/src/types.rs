//! Request and response payload types.
//!
//! These are the bodies carried by [`Command`](crate::Command) and
//! [`Output`](crate::Output). Field names follow the document-service wire
//! shape (`_index`, `_id`, `_version`, `_source`) so JSON produced here can be
//! compared directly with responses from such a service.

use serde::{Deserialize, Serialize};

use docstore_core::Document;
use docstore_primitives::script::DEFAULT_LANG;

pub use docstore_primitives::ResultCode;
pub use docstore_storage::CollectionSettings;

/// How an index request treats an existing document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpType {
    /// Fail with a conflict if the id is taken
    #[default]
    Create,
    /// Create, or fully replace an existing document
    Index,
}

/// Body of an update request.
///
/// Exactly one of `doc` and `script` must be set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateBody {
    /// Partial document merged into the stored one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<Document>,
    /// Script run against the stored document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<ScriptSpec>,
    /// Document stored as-is when the target does not exist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upsert: Option<Document>,
    /// Use `doc` as the upsert document
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub doc_as_upsert: bool,
    /// Apply only if the stored version equals this
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub if_version: Option<u64>,
}

impl UpdateBody {
    /// Body that merges `doc`
    pub fn doc(doc: Document) -> Self {
        UpdateBody {
            doc: Some(doc),
            ..Default::default()
        }
    }

    /// Body that runs `script`
    pub fn script(script: impl Into<ScriptSpec>) -> Self {
        UpdateBody {
            script: Some(script.into()),
            ..Default::default()
        }
    }

    /// Add an upsert document
    pub fn with_upsert(mut self, upsert: Document) -> Self {
        self.upsert = Some(upsert);
        self
    }
}

/// Script given inline or with language and parameters.
///
/// ```json
/// "script": "ctx._source.in_stock--"
/// "script": {"source": "ctx._source.in_stock -= params.n", "params": {"n": 2}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptSpec {
    /// Bare source text
    Inline(String),
    /// Full form
    Full(ScriptBody),
}

impl ScriptSpec {
    /// Normalize into the full form
    pub fn into_body(self) -> ScriptBody {
        match self {
            ScriptSpec::Inline(source) => ScriptBody::new(source),
            ScriptSpec::Full(body) => body,
        }
    }
}

impl From<&str> for ScriptSpec {
    fn from(source: &str) -> Self {
        ScriptSpec::Inline(source.to_string())
    }
}

impl From<String> for ScriptSpec {
    fn from(source: String) -> Self {
        ScriptSpec::Inline(source)
    }
}

impl From<ScriptBody> for ScriptSpec {
    fn from(body: ScriptBody) -> Self {
        ScriptSpec::Full(body)
    }
}

/// Full script form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptBody {
    /// Source text
    pub source: String,
    /// Script language; only `painless` is accepted
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Values readable as `params.*`
    #[serde(default)]
    pub params: Document,
}

fn default_lang() -> String {
    DEFAULT_LANG.to_string()
}

impl ScriptBody {
    /// Script with default language and no parameters
    pub fn new(source: impl Into<String>) -> Self {
        ScriptBody {
            source: source.into(),
            lang: default_lang(),
            params: Document::new(),
        }
    }

    /// Set the parameters
    pub fn with_params(mut self, params: Document) -> Self {
        self.params = params;
        self
    }
}

/// Response to a write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteResponse {
    /// Collection written
    #[serde(rename = "_index")]
    pub index: String,
    /// Document id written
    #[serde(rename = "_id")]
    pub id: String,
    /// Version after the write
    #[serde(rename = "_version")]
    pub version: u64,
    /// `created` or `updated`
    pub result: ResultCode,
}

/// Response to a read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetResponse {
    /// Collection read
    #[serde(rename = "_index")]
    pub index: String,
    /// Document id read
    #[serde(rename = "_id")]
    pub id: String,
    /// Current version, when found
    #[serde(rename = "_version", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    /// Whether the document exists
    pub found: bool,
    /// Stored document, when found
    #[serde(rename = "_source", default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Document>,
}

/// Summary of one collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfoResponse {
    /// Collection name
    #[serde(rename = "_index")]
    pub index: String,
    /// Settings given at creation
    pub settings: CollectionSettings,
    /// Creation time, microseconds since the Unix epoch
    pub created_at: u64,
    /// Number of documents
    pub docs_count: u64,
}
