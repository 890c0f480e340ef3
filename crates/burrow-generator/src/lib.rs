pub mod random;
pub mod seq;

pub use random::RandomGenerator;
pub use seq::SeqGenerator;

use burrow_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// Collisions with stored codes are the store's problem: it checks each
/// candidate and asks for another one a bounded number of times.
pub trait Generator: Send + Sync + 'static {
    /// Generates a candidate short code.
    fn generate(&self) -> ShortCode;
}

impl<G: Generator + ?Sized> Generator for Box<G> {
    fn generate(&self) -> ShortCode {
        (**self).generate()
    }
}
