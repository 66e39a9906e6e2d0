mod embedder;
mod persistent_store;
mod vector_store;

pub use embedder::Embedder;
pub use persistent_store::PersistentStore;
pub use vector_store::{VectorPayload, VectorPoint, VectorQuery, VectorSearchResult, VectorStore};
