/// A result type defaulting to the crate [`enum@Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// All errors `acuid` can produce.
///
/// Packing, scrambling, and encoding are total functions, so the only thing that can go wrong is
/// the operating system refusing to hand out random bytes. That failure is never papered over with
/// zero or predictable padding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The random number source failed to produce bytes.
    #[error("could not obtain random bytes: {0}")]
    Entropy(#[from] rand::Error),
}
