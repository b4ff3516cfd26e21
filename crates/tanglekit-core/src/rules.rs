//! Validation rules for variable-length wire collections.
//!
//! Every collection on the wire declares an element count range and,
//! where the protocol demands it, byte-wise lexical ordering and
//! uniqueness. Ordering and uniqueness are judged on the *serialized*
//! bytes of each element, never on in-memory field values.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::error::Error;

/// How a collection's elements must be ordered on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementOrder {
    Unordered,
    Lexical,
}

/// Declarative per-collection constraints.
#[derive(Debug, Clone, Copy)]
pub struct ArrayRules {
    pub min: usize,
    pub max: usize,
    pub ordering: ElementOrder,
    pub unique: bool,
}

impl ArrayRules {
    pub const fn new(min: usize, max: usize, ordering: ElementOrder, unique: bool) -> Self {
        Self {
            min,
            max,
            ordering,
            unique,
        }
    }

    /// Checks the element count against the declared range.
    pub fn check_count(&self, actual: usize) -> Result<(), Error> {
        if actual < self.min {
            return Err(Error::MinNotReached {
                min: self.min,
                actual,
            });
        }
        if actual > self.max {
            return Err(Error::MaxExceeded {
                max: self.max,
                actual,
            });
        }
        Ok(())
    }

    /// Checks ordering and uniqueness over the serialized element bytes.
    ///
    /// With both lexical order and uniqueness a single pass suffices: each
    /// element must compare strictly greater than its predecessor.
    pub fn check_elements<T: AsRef<[u8]>>(&self, elements: &[T]) -> Result<(), Error> {
        match (self.ordering, self.unique) {
            (ElementOrder::Lexical, true) => {
                for (index, pair) in elements.windows(2).enumerate() {
                    match pair[0].as_ref().cmp(pair[1].as_ref()) {
                        Ordering::Less => {}
                        Ordering::Equal => {
                            return Err(Error::UniquenessViolation { index: index + 1 })
                        }
                        Ordering::Greater => {
                            return Err(Error::OrderViolation { index: index + 1 })
                        }
                    }
                }
                Ok(())
            }
            (ElementOrder::Lexical, false) => {
                for (index, pair) in elements.windows(2).enumerate() {
                    if pair[0].as_ref() > pair[1].as_ref() {
                        return Err(Error::OrderViolation { index: index + 1 });
                    }
                }
                Ok(())
            }
            (ElementOrder::Unordered, true) => {
                let mut seen = HashSet::with_capacity(elements.len());
                for (index, element) in elements.iter().enumerate() {
                    if !seen.insert(element.as_ref()) {
                        return Err(Error::UniquenessViolation { index });
                    }
                }
                Ok(())
            }
            (ElementOrder::Unordered, false) => Ok(()),
        }
    }

    /// Count plus element checks in one call.
    pub fn check<T: AsRef<[u8]>>(&self, elements: &[T]) -> Result<(), Error> {
        self.check_count(elements.len())?;
        self.check_elements(elements)
    }
}
