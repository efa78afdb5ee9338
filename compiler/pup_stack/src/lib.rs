//! Stack growth for recursive walks over values and types.
//!
//! Type checks, structural equality and rendering all recurse through nested
//! arrays, hashes and alias targets. Configuration data can nest deeply, so
//! each recursive step in those walks goes through [`ensure_sufficient_stack`].
//!
//! Native targets grow the stack with `stacker`; WASM calls straight through.

/// Remaining stack below which we grow (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    enum Nested {
        Leaf,
        Wrap(Box<Nested>),
    }

    fn depth(n: &Nested) -> usize {
        ensure_sufficient_stack(|| match n {
            Nested::Leaf => 0,
            Nested::Wrap(inner) => depth(inner) + 1,
        })
    }

    #[test]
    fn test_deeply_nested_structure() {
        let mut value = Nested::Leaf;
        for _ in 0..100_000 {
            value = Nested::Wrap(Box::new(value));
        }
        assert_eq!(depth(&value), 100_000);

        // Drop iteratively; the derived drop would recurse 100k frames deep.
        while let Nested::Wrap(inner) = value {
            value = *inner;
        }
    }

    #[test]
    fn test_passes_through_result() {
        let result: Result<i32, &str> = ensure_sufficient_stack(|| Ok(7));
        assert_eq!(result, Ok(7));
    }
}
