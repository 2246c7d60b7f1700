use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    /// `register` called after `seal()`.
    #[error("registry is sealed: no further records may be registered")]
    Sealed,

    /// Two distinct payloads were registered under the same hash.
    #[error("hash {0} already registered with a different record")]
    HashCollision(u64),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
