// ============================================================================
// Cart Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("Cart is empty")]
    Empty,

    #[error("Invalid cart document: {0}")]
    InvalidDocument(#[from] serde_json::Error),
}
