//! Ordered dispatch descriptors.
//!
//! A descriptor is the list of `(patterns, handler)` entries registered for
//! one operator or function. Entries are scanned in registration order and
//! the first whose patterns all admit the operands wins: order is the
//! priority, so `(String, Regexp)` must be added before `(Any, Any)`.

use std::fmt;

use tracing::trace;

use pup_ir::Span;
use pup_runtime::{dispatch_mismatch, wrong_argument_count, EvalError, RecursionGuard, Type};

use super::call::Operand;

/// One registered signature.
#[derive(Clone, Debug)]
pub struct Entry<H> {
    patterns: Vec<Type>,
    handler: H,
}

impl<H> Entry<H> {
    pub fn patterns(&self) -> &[Type] {
        &self.patterns
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    fn arity(&self) -> usize {
        self.patterns.len()
    }

    fn matches(&self, operands: &[Operand], guard: &mut RecursionGuard) -> bool {
        self.patterns.len() == operands.len()
            && self
                .patterns
                .iter()
                .zip(operands)
                .all(|(pattern, operand)| pattern.is_instance(&operand.value, guard))
    }

    /// `String` for one pattern, `(String, Regexp)` for several.
    fn signature(&self) -> String {
        render_tuple(self.patterns.iter().map(ToString::to_string))
    }
}

/// Why a descriptor found no handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchError {
    /// No entry takes this many operands.
    Arity { accepted: Vec<usize>, found: usize },
    /// Entries of the right arity exist but none admits the operands.
    NoMatch {
        expected: Vec<String>,
        found: String,
        /// First operand no entry accepts in its position, if any.
        position: Option<usize>,
    },
}

impl DispatchError {
    /// Convert to an [`EvalError`] for `name`, spanned at the offending
    /// operand when one can be singled out, else at `span`.
    pub fn into_eval_error(self, name: &str, operands: &[Operand], span: Span) -> EvalError {
        match self {
            DispatchError::Arity { accepted, found } => {
                let expected = super::join_alternatives(accepted.iter().map(ToString::to_string));
                let at = operands.get(accepted.iter().copied().max().unwrap_or(0));
                wrong_argument_count(name, &expected, found).with_span(at.map_or(span, |o| o.span))
            }
            DispatchError::NoMatch {
                expected,
                found,
                position,
            } => {
                let at = position.and_then(|i| operands.get(i));
                dispatch_mismatch(name, &expected, &found).with_span(at.map_or(span, |o| o.span))
            }
        }
    }
}

/// Ordered signatures for one operator or function.
#[derive(Clone)]
pub struct Descriptor<H> {
    name: String,
    entries: Vec<Entry<H>>,
}

impl<H> Descriptor<H> {
    pub fn new(name: impl Into<String>) -> Self {
        Descriptor {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append an entry. It matches only after every earlier entry.
    pub fn add(&mut self, patterns: impl Into<Vec<Type>>, handler: H) -> &mut Self {
        self.entries.push(Entry {
            patterns: patterns.into(),
            handler,
        });
        self
    }

    pub fn entries(&self) -> &[Entry<H>] {
        &self.entries
    }

    /// Distinct operand counts accepted, ascending.
    pub fn arities(&self) -> Vec<usize> {
        let mut arities: Vec<usize> = self.entries.iter().map(Entry::arity).collect();
        arities.sort_unstable();
        arities.dedup();
        arities
    }

    /// Select the handler for `operands`: the first entry, in registration
    /// order, whose every pattern admits the corresponding operand.
    pub fn resolve(&self, operands: &[Operand]) -> Result<&H, DispatchError> {
        let mut guard = RecursionGuard::new();
        let mut candidates = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.arity() == operands.len())
            .peekable();
        if candidates.peek().is_none() {
            return Err(DispatchError::Arity {
                accepted: self.arities(),
                found: operands.len(),
            });
        }
        for (index, entry) in candidates {
            let matched = entry.matches(operands, &mut guard);
            trace!(
                descriptor = %self.name,
                index,
                signature = %entry.signature(),
                matched,
                "scan entry"
            );
            if matched {
                return Ok(&entry.handler);
            }
        }
        Err(self.no_match(operands, &mut guard))
    }

    #[cold]
    fn no_match(&self, operands: &[Operand], guard: &mut RecursionGuard) -> DispatchError {
        let same_arity = || self.entries.iter().filter(|e| e.arity() == operands.len());
        let position = (0..operands.len()).find(|&i| {
            !same_arity().any(|entry| entry.patterns[i].is_instance(&operands[i].value, guard))
        });
        DispatchError::NoMatch {
            expected: same_arity().map(Entry::signature).collect(),
            found: render_tuple(operands.iter().map(|o| o.value.type_name().to_string())),
            position,
        }
    }
}

impl<H> fmt::Debug for Descriptor<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("name", &self.name)
            .field(
                "entries",
                &self.entries.iter().map(Entry::signature).collect::<Vec<_>>(),
            )
            .finish()
    }
}

fn render_tuple(items: impl Iterator<Item = String>) -> String {
    let items: Vec<String> = items.collect();
    if items.len() == 1 {
        items.concat()
    } else {
        format!("({})", items.join(", "))
    }
}
