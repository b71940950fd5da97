use serde::{Deserialize, Serialize};

/// Request body for creating a file search store.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoreRequest {
    pub display_name: String,
}

/// A file search store (semantic-search corpus).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSearchStore {
    /// Resource name, e.g. `fileSearchStores/abc123`.
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// A file uploaded to the Files API, pending import into a store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// Resource name, e.g. `files/xyz789`.
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// Envelope returned by the media upload endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub file: UploadedFile,
}

/// Request body for importing an uploaded file into a store.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportFileRequest {
    pub file_name: String,
}

/// A long-running operation.
#[derive(Debug, Clone, Deserialize)]
pub struct Operation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub error: Option<OperationError>,
}

/// Error payload of a failed operation.
#[derive(Debug, Clone, Deserialize)]
pub struct OperationError {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}
