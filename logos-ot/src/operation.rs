//! The `Operation` value type and its builder.
//!
//! An operation walks a base document from left to right:
//!
//! ```text
//!  base:    h e l l o   w o r l d
//!           └retain(5)┘ ins(" there") └─retain(6)─┘
//!  target:  h e l l o   t h e r e   w o r l d
//! ```
//!
//! Lengths count Unicode scalar values, not bytes.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{OtError, Result};

/// One atomic edit step.
///
/// Serialized as a single-key object: `{"retain": 5}`, `{"insert": "x"}` or
/// `{"delete": 2}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// Keep the next `n` characters.
    Retain(usize),
    /// Insert text at the cursor.
    Insert(String),
    /// Drop the next `n` characters.
    Delete(usize),
}

impl Step {
    /// Number of characters this step covers (base side for retain/delete,
    /// target side for insert).
    pub fn len(&self) -> usize {
        match self {
            Step::Retain(n) | Step::Delete(n) => *n,
            Step::Insert(text) => char_len(text),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Step::Retain(n) | Step::Delete(n) => *n == 0,
            Step::Insert(text) => text.is_empty(),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Retain(n) => write!(f, "retain({n})"),
            Step::Insert(text) => write!(f, "insert({text:?})"),
            Step::Delete(n) => write!(f, "delete({n})"),
        }
    }
}

/// An edit against a document of `base_len` characters producing a document
/// of `target_len` characters.
///
/// Built with [`Operation::new`] followed by the consuming
/// [`retain`](Operation::retain) / [`insert`](Operation::insert) /
/// [`delete`](Operation::delete) methods. Base positions that no step covers
/// yet are retained, so a freshly created operation is the identity.
#[derive(Debug, Clone)]
pub struct Operation {
    /// Explicit steps, canonical (merged, no empty steps).
    steps: Vec<Step>,
    /// Required length of the input document.
    base_len: usize,
    /// Length of the output document.
    target_len: usize,
    /// Base characters covered by explicit retain/delete steps.
    consumed: usize,
}

impl Operation {
    /// Empty operation over a document of `base_len` characters.
    pub fn new(base_len: usize) -> Self {
        Self {
            steps: Vec::new(),
            base_len,
            target_len: base_len,
            consumed: 0,
        }
    }

    /// `[Retain(len)]`, the explicit identity.
    pub fn identity(len: usize) -> Self {
        Self::new(len).retain(len)
    }

    /// Keep the next `n` characters. `retain(0)` is a no-op.
    pub fn retain(mut self, n: usize) -> Self {
        self.push(Step::Retain(n));
        self
    }

    /// Insert `text` at the cursor. Empty text is a no-op.
    pub fn insert(mut self, text: impl Into<String>) -> Self {
        self.push(Step::Insert(text.into()));
        self
    }

    /// Delete the next `n` characters. `delete(0)` is a no-op.
    pub fn delete(mut self, n: usize) -> Self {
        self.push(Step::Delete(n));
        self
    }

    /// Append a step, merging it into the last step when both are of the
    /// same kind.
    pub(crate) fn push(&mut self, step: Step) {
        if step.is_empty() {
            return;
        }

        match &step {
            Step::Retain(n) => self.consumed += n,
            Step::Insert(text) => self.target_len += char_len(text),
            Step::Delete(n) => {
                self.consumed += n;
                self.target_len = self.target_len.saturating_sub(*n);
            }
        }

        match (self.steps.last_mut(), &step) {
            (Some(Step::Retain(last)), Step::Retain(n)) => {
                *last += n;
                return;
            }
            (Some(Step::Insert(last)), Step::Insert(text)) => {
                last.push_str(text);
                return;
            }
            (Some(Step::Delete(last)), Step::Delete(n)) => {
                *last += n;
                return;
            }
            _ => {}
        }
        self.steps.push(step);
    }

    /// [`push`](Self::push) for untrusted counts: fails instead of letting
    /// the covered length, the target length or a merged step overflow.
    pub(crate) fn try_push(&mut self, step: Step) -> Result<()> {
        let overflow = || OtError::InvalidPayload(format!("{step} overflows the operation length"));

        match &step {
            Step::Retain(n) | Step::Delete(n) => {
                self.consumed.checked_add(*n).ok_or_else(overflow)?;
            }
            Step::Insert(text) => {
                self.target_len.checked_add(char_len(text)).ok_or_else(overflow)?;
            }
        }
        if let (Some(Step::Retain(last)), Step::Retain(n))
        | (Some(Step::Delete(last)), Step::Delete(n)) = (self.steps.last(), &step)
        {
            last.checked_add(*n).ok_or_else(overflow)?;
        }

        self.push(step);
        Ok(())
    }

    /// Base characters covered by explicit retain/delete steps.
    #[inline]
    pub(crate) fn consumed(&self) -> usize {
        self.consumed
    }

    // ---------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------

    #[inline]
    pub fn base_len(&self) -> usize {
        self.base_len
    }

    #[inline]
    pub fn target_len(&self) -> usize {
        self.target_len
    }

    /// Canonical steps, with any uncovered base tail spelled out as a final
    /// retain. Borrowed when nothing is pending.
    pub fn steps(&self) -> Cow<'_, [Step]> {
        let tail = self.pending_tail();
        if tail == 0 {
            return Cow::Borrowed(&self.steps);
        }

        let mut steps = self.steps.clone();
        match steps.last_mut() {
            Some(Step::Retain(last)) => *last += tail,
            _ => steps.push(Step::Retain(tail)),
        }
        Cow::Owned(steps)
    }

    /// Base characters not yet covered by an explicit step.
    #[inline]
    fn pending_tail(&self) -> usize {
        self.base_len.saturating_sub(self.consumed)
    }

    /// `true` if applying this operation never changes a document.
    pub fn is_noop(&self) -> bool {
        self.steps.iter().all(|step| matches!(step, Step::Retain(_)))
    }

    /// Reject operations whose steps walk past the end of the base.
    pub(crate) fn check(&self) -> Result<()> {
        if self.consumed > self.base_len {
            return Err(OtError::Overrun {
                base_len: self.base_len,
                consumed: self.consumed,
            });
        }
        Ok(())
    }
}

impl PartialEq for Operation {
    fn eq(&self, other: &Self) -> bool {
        self.base_len == other.base_len
            && self.target_len == other.target_len
            && self.steps() == other.steps()
    }
}

impl Eq for Operation {}

impl Extend<Step> for Operation {
    fn extend<I: IntoIterator<Item = Step>>(&mut self, steps: I) {
        for step in steps {
            self.push(step);
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}→{}]", self.base_len, self.target_len)?;
        for step in self.steps().iter() {
            write!(f, " {step}")?;
        }
        Ok(())
    }
}

/// Length of `text` in characters.
#[inline]
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}
