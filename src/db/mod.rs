//! Storage backends: the vector store and the conversation log.

pub mod conversations;
pub mod vector_store;

pub use conversations::{ConversationExport, ConversationStore, StoredMessage};
pub use vector_store::{FlatIndex, StoreStatus, VectorIndex, VectorStore};
