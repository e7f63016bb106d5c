use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout cancelled")]
    Cancelled,
    #[error("edge {edge} references object #{object}, which is not in the graph")]
    UnknownObject { edge: usize, object: usize },
}
