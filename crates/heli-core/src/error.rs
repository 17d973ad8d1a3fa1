use crate::scene::NodeId;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("scene already has a node named `{0}`")]
    DuplicateNode(&'static str),
    #[error("unknown scene node {0:?}")]
    UnknownNode(NodeId),
    #[error("viewport has no area ({width}x{height})")]
    EmptyViewport { width: u32, height: u32 },
}
