//! Buffer acquisition and the grow-and-retry loop.
//!
//! Every buffer comes from one of three sources, picked by size:
//!
//! - below `stack_threshold`: a call-scoped stack buffer (`stackalloc`),
//!   reclaimed when the attempt returns;
//! - below `pool_threshold`: a buffer borrowed from a [`BufferPool`] and
//!   returned by a drop guard;
//! - otherwise: a fresh heap buffer.
//!
//! Small fragments dominate, so the common case is a single stack attempt.

mod pool;

use alloc::vec;

pub use pool::{BufferPool, DEFAULT_RETAINED_BUFFERS, PooledBuffer};

use crate::{FormatError, FormatterOptions};

/// Outcome of one attempt to produce a value from a candidate buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferAllocationResult<T> {
    /// The buffer was large enough.
    Sufficient(T),
    /// The buffer was too small; `required`, when known, is a lower bound on
    /// the size that would succeed.
    Insufficient {
        /// Size hint for the next attempt.
        required: Option<usize>,
    },
}

/// Produces a result from a candidate buffer and immutable state.
///
/// Implemented for closures `FnMut(&mut [char], &S) ->
/// BufferAllocationResult<T>`; annotate the closure's parameter types so
/// they are inferred as higher-ranked.
pub trait BufferProcessor<S: ?Sized> {
    /// The value a sufficient attempt produces.
    type Output;

    /// Makes one attempt against `buffer`.
    fn process(&mut self, buffer: &mut [char], state: &S) -> BufferAllocationResult<Self::Output>;
}

impl<S, T, F> BufferProcessor<S> for F
where
    S: ?Sized,
    F: FnMut(&mut [char], &S) -> BufferAllocationResult<T>,
{
    type Output = T;

    #[inline]
    fn process(&mut self, buffer: &mut [char], state: &S) -> BufferAllocationResult<T> {
        self(buffer, state)
    }
}

/// Where a buffer of a given size comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferSource {
    /// A call-scoped stack buffer.
    Stack,
    /// A buffer borrowed from the allocator's [`BufferPool`].
    Pooled,
    /// A fresh heap allocation.
    Heap,
}

/// Tiered buffer acquisition plus the bounded grow-and-retry loop.
#[derive(Debug, Clone, Copy)]
pub struct BufferAllocator<'p> {
    options: FormatterOptions,
    pool: &'p BufferPool,
}

static SHARED: BufferAllocator<'static> = BufferAllocator {
    options: FormatterOptions::DEFAULT,
    pool: &pool::SHARED,
};

impl BufferAllocator<'static> {
    /// An allocator drawing pooled buffers from [`BufferPool::shared`].
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidOptions`] when `options` fail
    /// [`FormatterOptions::validate`].
    pub fn new(options: FormatterOptions) -> Result<Self, FormatError> {
        Self::with_pool(options, BufferPool::shared())
    }

    /// The allocator with default options used by rendering and the free
    /// builder functions.
    #[must_use]
    pub fn shared() -> &'static BufferAllocator<'static> {
        &SHARED
    }
}

impl<'p> BufferAllocator<'p> {
    /// An allocator drawing pooled buffers from `pool`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidOptions`] when `options` fail
    /// [`FormatterOptions::validate`].
    pub fn with_pool(options: FormatterOptions, pool: &'p BufferPool) -> Result<Self, FormatError> {
        options.validate()?;
        Ok(Self { options, pool })
    }

    /// The options this allocator was built with.
    #[must_use]
    pub fn options(&self) -> &FormatterOptions {
        &self.options
    }

    /// The pool mid-sized buffers are borrowed from.
    #[must_use]
    pub fn pool(&self) -> &'p BufferPool {
        self.pool
    }

    /// The tier a buffer of `size` chars is taken from.
    #[must_use]
    pub fn source_for(&self, size: usize) -> BufferSource {
        if size < self.options.stack_threshold {
            BufferSource::Stack
        } else if size < self.options.pool_threshold {
            BufferSource::Pooled
        } else {
            BufferSource::Heap
        }
    }

    /// Runs `f` with a zeroed buffer of exactly `size` chars from the
    /// appropriate tier. The buffer is released when `f` returns or unwinds.
    pub fn with_buffer<R>(&self, size: usize, f: impl FnOnce(&mut [char]) -> R) -> R {
        if size == 0 {
            return f(&mut []);
        }
        let source = self.source_for(size);
        log::trace!("acquiring {size} char buffer from {source:?}");
        match source {
            BufferSource::Stack => stackalloc::stackalloc(size, '\0', f),
            BufferSource::Pooled => {
                let mut buffer = self.pool.acquire(size);
                f(&mut buffer[..])
            }
            BufferSource::Heap => {
                let mut buffer = vec!['\0'; size];
                f(&mut buffer[..])
            }
        }
    }

    /// Runs `processor` against buffers of growing size until it succeeds.
    ///
    /// The first buffer holds `max(initial_buffer_length, hint)` chars. After
    /// each insufficient attempt the size grows by `growth_factor` (or to the
    /// processor's `required` hint, if larger), capped at
    /// `maximum_buffer_length`. A required length `L` within the maximum is
    /// reached in at most `ceil(log_growth(L / initial)) + 1` attempts.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::CapacityExceeded`] when an attempt at the
    /// maximum size still fails, or when the processor reports a requirement
    /// beyond the maximum.
    pub fn allocate<S, P>(&self, hint: usize, state: &S, mut processor: P) -> Result<P::Output, FormatError>
    where
        S: ?Sized,
        P: BufferProcessor<S>,
    {
        let maximum = self.options.maximum_buffer_length;
        let mut size = self.options.initial_buffer_length.max(hint).min(maximum);
        let mut attempt = 1_usize;

        loop {
            let required = match self.with_buffer(size, |buffer| processor.process(buffer, state)) {
                BufferAllocationResult::Sufficient(value) => return Ok(value),
                BufferAllocationResult::Insufficient { required } => required,
            };

            if size >= maximum || required.is_some_and(|required| required > maximum) {
                log::warn!(
                    "giving up after {attempt} attempts: {size} char buffer insufficient \
                     (required {required:?}, maximum {maximum})"
                );
                return Err(FormatError::CapacityExceeded { maximum });
            }

            let next = self.grow(size, required);
            log::debug!("attempt {attempt} with {size} chars insufficient, retrying with {next}");
            size = next;
            attempt += 1;
        }
    }

    fn grow(&self, size: usize, required: Option<usize>) -> usize {
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        let grown = (size as f64 * self.options.growth_factor).ceil() as usize;
        grown
            .max(size + 1)
            .max(required.unwrap_or(0))
            .min(self.options.maximum_buffer_length)
    }
}
