/// Storage errors for the domain layer.
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage.read")]
    Read,
    #[error("storage.write")]
    Write,
    #[error("storage.malformed")]
    Malformed,
}
