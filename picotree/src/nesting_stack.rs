// SPDX-License-Identifier: Apache-2.0

use alloc::vec::Vec;

/// Trait for depth counters - tracks nesting depth.
///
/// This trait provides overflow-safe operations for tracking JSON nesting depth.
/// Implemented for all unsigned integer types. The largest representable
/// value of the counter is the default depth limit of a [`NestingStack`].
pub trait DepthCounter: core::fmt::Debug + Copy + PartialOrd {
    /// Create a zero depth value
    fn zero() -> Self;

    /// Largest depth representable by this counter
    fn max_value() -> Self;

    /// Increment depth, returning (new_value, overflow_occurred)
    fn increment(self) -> (Self, bool);

    /// Decrement depth, returning (new_value, underflow_occurred)
    fn decrement(self) -> (Self, bool);

    /// Check if depth is zero
    fn is_zero(self) -> bool;

    /// Depth as a plain count, saturating on narrow platforms
    fn as_usize(self) -> usize;
}

macro_rules! impl_depth_counter {
    ($($t:ty),*) => {
        $(
            impl DepthCounter for $t {
                #[inline]
                fn zero() -> Self { 0 }

                #[inline]
                fn max_value() -> Self { <$t>::MAX }

                #[inline]
                fn increment(self) -> (Self, bool) { self.overflowing_add(1) }

                #[inline]
                fn decrement(self) -> (Self, bool) { self.overflowing_sub(1) }

                #[inline]
                fn is_zero(self) -> bool { self == 0 }

                #[inline]
                fn as_usize(self) -> usize { usize::try_from(self).unwrap_or(usize::MAX) }
            }
        )*
    };
}

// Implement for all unsigned integer types
impl_depth_counter!(u8, u16, u32, u64, u128, usize);

/// Errors reported by [`NestingStack`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    /// The stack already holds `limit` entries.
    DepthExceeded { limit: usize },
    /// `pop` was called on an empty stack.
    Underflow,
    /// `top` was called on an empty stack.
    Empty,
}

/// Bounded-depth stack of currently open containers, innermost on top.
///
/// The stack owns its entries. Pushing fails once `limit` entries are held,
/// which bounds the memory a deeply nested (or hostile) document can claim.
#[derive(Debug)]
pub struct NestingStack<T, D: DepthCounter = u8> {
    entries: Vec<T>,
    depth: D,
    limit: D,
}

impl<T, D: DepthCounter> NestingStack<T, D> {
    /// Creates a stack limited to the largest depth `D` can count.
    pub fn new() -> Self {
        Self::with_limit(D::max_value())
    }

    /// Creates a stack that holds at most `limit` entries.
    pub fn with_limit(limit: D) -> Self {
        NestingStack {
            entries: Vec::new(),
            depth: D::zero(),
            limit,
        }
    }

    pub fn push(&mut self, item: T) -> Result<(), StackError> {
        if self.is_full() {
            return Err(StackError::DepthExceeded {
                limit: self.limit.as_usize(),
            });
        }
        let (new_depth, overflow) = self.depth.increment();
        if overflow {
            return Err(StackError::DepthExceeded {
                limit: self.limit.as_usize(),
            });
        }
        self.entries.push(item);
        self.depth = new_depth;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<T, StackError> {
        let item = self.entries.pop().ok_or(StackError::Underflow)?;
        let (new_depth, _underflow) = self.depth.decrement();
        self.depth = new_depth;
        Ok(item)
    }

    pub fn top(&self) -> Result<&T, StackError> {
        self.entries.last().ok_or(StackError::Empty)
    }

    pub fn top_mut(&mut self) -> Result<&mut T, StackError> {
        self.entries.last_mut().ok_or(StackError::Empty)
    }

    pub fn is_empty(&self) -> bool {
        self.depth.is_zero()
    }

    pub fn is_full(&self) -> bool {
        self.depth >= self.limit
    }

    /// Number of entries currently held.
    pub fn depth(&self) -> usize {
        self.depth.as_usize()
    }

    pub fn limit(&self) -> usize {
        self.limit.as_usize()
    }
}

impl<T, D: DepthCounter> Default for NestingStack<T, D> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_order() {
        let mut stack: NestingStack<u32> = NestingStack::new();
        assert!(stack.is_empty());
        stack.push(1).unwrap();
        stack.push(2).unwrap();
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.top(), Ok(&2));
        assert_eq!(stack.pop(), Ok(2));
        assert_eq!(stack.pop(), Ok(1));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_empty_stack_errors() {
        let mut stack: NestingStack<u32> = NestingStack::new();
        assert_eq!(stack.pop(), Err(StackError::Underflow));
        assert_eq!(stack.top(), Err(StackError::Empty));
        assert_eq!(stack.top_mut(), Err(StackError::Empty));
        // Repeated underflow leaves the stack usable
        assert_eq!(stack.pop(), Err(StackError::Underflow));
        stack.push(7).unwrap();
        assert_eq!(stack.top(), Ok(&7));
    }

    #[test]
    fn test_limit_rejects_without_pushing() {
        let mut stack: NestingStack<u32, u8> = NestingStack::with_limit(2);
        stack.push(1).unwrap();
        assert!(!stack.is_full());
        stack.push(2).unwrap();
        assert!(stack.is_full());
        assert_eq!(stack.push(3), Err(StackError::DepthExceeded { limit: 2 }));
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.top(), Ok(&2));
    }

    #[test]
    fn test_default_limit_is_counter_max() {
        let stack: NestingStack<(), u8> = NestingStack::new();
        assert_eq!(stack.limit(), 255);
        let stack: NestingStack<(), u16> = NestingStack::default();
        assert_eq!(stack.limit(), 65535);
    }

    #[test]
    fn test_fill_u8_counter() {
        let mut stack: NestingStack<usize, u8> = NestingStack::new();
        for i in 0..255 {
            stack.push(i).unwrap();
        }
        assert!(stack.is_full());
        assert_eq!(
            stack.push(255),
            Err(StackError::DepthExceeded { limit: 255 })
        );
        for i in (0..255).rev() {
            assert_eq!(stack.pop(), Ok(i));
        }
        assert!(stack.is_empty());
    }

    #[test]
    fn test_depth_counter_overflow_flags() {
        assert_eq!(u8::MAX.increment(), (0, true));
        assert_eq!(0u8.decrement(), (u8::MAX, true));
        assert_eq!(5u16.increment(), (6, false));
        assert!(u32::zero().is_zero());
        assert_eq!(u64::MAX.as_usize(), usize::MAX);
    }
}
