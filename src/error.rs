use thiserror::Error;

/// Errors raised by the scene-graph core.
///
/// Numeric degeneracy (a singular matrix passed to `invert`) is deliberately
/// *not* represented here: it occurs on hot per-frame paths and is signalled by
/// value (`bool` / `Option`) so callers can branch on it cheaply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A matrix whose bottom row is not `[0, 0, 0, 1]` was passed to an
    /// operation that requires an affine transform.
    #[error("matrix is not affine")]
    NotAffine,

    /// An object handle did not resolve to a live node in the scene arena.
    #[error("unknown object handle")]
    UnknownObject,

    /// A component handle did not resolve to a live component.
    #[error("unknown component handle")]
    UnknownComponent,

    /// Reparenting was rejected because it would make a node an ancestor of
    /// itself.
    #[error("reparenting would create a cycle in the scene graph")]
    HierarchyCycle,
}

pub type Result<T> = std::result::Result<T, Error>;
