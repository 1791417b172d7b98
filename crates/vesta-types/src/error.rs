use thiserror::Error;

pub type Result<T> = std::result::Result<T, TypeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// The null type is a subtype of every reference type; its supertype
    /// set is not representable.
    #[error("the null type has no supertype set")]
    NullHasNoSupertypes,

    #[error("unknown class `{0}`")]
    UnknownClass(String),
}
