//! Walking error chains
//!
//! An error links to zero, one or many further errors. Single links come
//! from `Error::source` (and the custom payload of an `io::Error`); multiple
//! links come from registered [`MultiCause`](crate::MultiCause) types.

use std::error::Error;

use crate::StatusResolver;

/// The errors directly beneath one error
#[derive(Debug)]
pub enum Links<'a> {
    /// No further causes
    Leaf,
    /// Exactly one wrapped cause
    One(&'a (dyn Error + 'static)),
    /// Independent joined causes, in order
    Many(Vec<&'a (dyn Error + 'static)>),
}

/// Depth-first, pre-order iterator over an error graph
///
/// Yields the starting error first, then each cause before its siblings.
#[derive(Debug)]
pub struct Chain<'a> {
    resolver: &'a StatusResolver,
    stack: Vec<&'a (dyn Error + 'static)>,
}

impl<'a> Chain<'a> {
    pub(crate) fn new(resolver: &'a StatusResolver, err: &'a (dyn Error + 'static)) -> Self {
        Self {
            resolver,
            stack: vec![err],
        }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let err = self.stack.pop()?;

        match self.resolver.links(err) {
            Links::Leaf => {}
            Links::One(cause) => self.stack.push(cause),
            Links::Many(causes) => self.stack.extend(causes.into_iter().rev()),
        }

        Some(err)
    }
}

/// Find the first error of type `T` anywhere in the chain
pub fn find<'a, T: Error + 'static>(err: &'a (dyn Error + 'static)) -> Option<&'a T> {
    crate::global().chain(err).find_map(|e| e.downcast_ref::<T>())
}

/// Whether any error in the chain satisfies `predicate`
pub fn contains(err: &(dyn Error + 'static), predicate: impl FnMut(&(dyn Error + 'static)) -> bool) -> bool {
    crate::global().chain(err).any(predicate)
}
