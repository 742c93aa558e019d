/// Ways a sprite operation can fail.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, thiserror::Error)]
pub enum SpriteError {
    /// The kinematic body has no position bound yet.
    #[error("kinematic body is not bound to a position")]
    UnboundState,
    /// The shared position is currently borrowed by someone else.
    #[error("position is in use by another writer")]
    PositionInUse,
}
