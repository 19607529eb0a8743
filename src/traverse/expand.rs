//! The expand capability
//!
//! A traversal never inspects nodes itself. It asks an [`Expand`] for the
//! ordered children of each node it descends into, once per node.

use std::convert::Infallible;

/// Supplies the ordered children of a node.
///
/// Children must come back in a stable order for the traversal output to be
/// reproducible. An error aborts the traversal and is handed to the consumer
/// as is.
pub trait Expand<N> {
    type Error;

    fn expand(
        &mut self,
        node: &N,
    ) -> Result<Vec<N>, Self::Error>;
}

impl<N, X: Expand<N> + ?Sized> Expand<N> for &mut X {
    type Error = X::Error;

    fn expand(
        &mut self,
        node: &N,
    ) -> Result<Vec<N>, Self::Error> {
        (**self).expand(node)
    }
}

/// [`Expand`] backed by an infallible closure. See [`from_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FromFn<F>(F);

/// [`Expand`] backed by a fallible closure. See [`try_from_fn`].
#[derive(Debug, Clone, Copy)]
pub struct TryFromFn<F>(F);

/// Wrap a closure returning the children of a node.
///
/// # Examples
///
/// ```
/// use ordo::traverse::{from_fn, Expand};
///
/// let mut halves = from_fn(|n: &u32| if *n > 1 { vec![n / 2] } else { vec![] });
/// assert_eq!(halves.expand(&8).unwrap(), vec![4]);
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F> {
    FromFn(f)
}

/// Wrap a closure that may fail while listing the children of a node.
pub fn try_from_fn<F>(f: F) -> TryFromFn<F> {
    TryFromFn(f)
}

impl<N, F, I> Expand<N> for FromFn<F>
where
    F: FnMut(&N) -> I,
    I: IntoIterator<Item = N>,
{
    type Error = Infallible;

    fn expand(
        &mut self,
        node: &N,
    ) -> Result<Vec<N>, Infallible> {
        Ok((self.0)(node).into_iter().collect())
    }
}

impl<N, F, I, E> Expand<N> for TryFromFn<F>
where
    F: FnMut(&N) -> Result<I, E>,
    I: IntoIterator<Item = N>,
{
    type Error = E;

    fn expand(
        &mut self,
        node: &N,
    ) -> Result<Vec<N>, E> {
        (self.0)(node).map(|children| children.into_iter().collect())
    }
}
