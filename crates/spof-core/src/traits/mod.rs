//! Collaborator traits: the only coupling between the detection core and a database.

pub mod dic_store;
pub mod graph_store;

pub use dic_store::InheritedDicStore;
pub use graph_store::GraphStore;
