pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod memory;

pub use memory::InMemoryObjectStore;
pub use r#trait::ObjectStore;

#[cfg(test)]
mod tests;
