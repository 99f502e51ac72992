/// A builder stage that can be finalized into an immutable product.
///
/// Finalizing borrows the stage: it stays open for further changes and can
/// be built again, each call producing an independent product.
pub trait Staged {
    type Product;

    /// Copies the stage's current field values into a new product
    fn build(&self) -> Self::Product;
}
