//! Transformation of concurrent operations.
//!
//! Given `a` and `b` made against the same document, produce `a'` and `b'`
//! so that both application orders converge:
//!
//! ```text
//!            a
//!     S ──────────▸ Sa
//!     │             │
//!   b │             │ b'
//!     ▾             ▾
//!     Sb ─────────▸ Sab
//!            a'
//! ```

use crate::cursor::StepCursor;
use crate::error::{OtError, Result};
use crate::operation::{Operation, Step};

impl Operation {
    /// Transform `self` and `other`, two operations against the same base,
    /// into `(self', other')` with
    /// `apply(apply(S, self), other') == apply(apply(S, other), self')`.
    ///
    /// When both insert at the same position, `self`'s text ends up first.
    pub fn transform(&self, other: &Self) -> Result<(Self, Self)> {
        self.check()?;
        other.check()?;
        if self.base_len() != other.base_len() {
            return Err(OtError::BaseLengthMismatch {
                left: self.base_len(),
                right: other.base_len(),
            });
        }

        let mut a_prime = Operation::new(other.target_len());
        let mut b_prime = Operation::new(self.target_len());

        let mut a = StepCursor::new(self.steps().into_owned());
        let mut b = StepCursor::new(other.steps().into_owned());

        loop {
            match (a.head(), b.head()) {
                (None, None) => break,
                (Some(Step::Insert(text)), _) => {
                    let step = Step::Insert(text.clone());
                    b_prime.push(Step::Retain(step.len()));
                    a_prime.push(step);
                    a.skip_step();
                }
                (_, Some(Step::Insert(text))) => {
                    let step = Step::Insert(text.clone());
                    a_prime.push(Step::Retain(step.len()));
                    b_prime.push(step);
                    b.skip_step();
                }
                (Some(Step::Retain(i)), Some(Step::Retain(j))) => {
                    let n = (*i).min(*j);
                    a_prime.push(Step::Retain(n));
                    b_prime.push(Step::Retain(n));
                    a.advance(n);
                    b.advance(n);
                }
                (Some(Step::Delete(i)), Some(Step::Delete(j))) => {
                    // Both removed the same span; neither side deletes it again.
                    let n = (*i).min(*j);
                    a.advance(n);
                    b.advance(n);
                }
                (Some(Step::Delete(i)), Some(Step::Retain(j))) => {
                    let n = (*i).min(*j);
                    a_prime.push(Step::Delete(n));
                    a.advance(n);
                    b.advance(n);
                }
                (Some(Step::Retain(i)), Some(Step::Delete(j))) => {
                    let n = (*i).min(*j);
                    b_prime.push(Step::Delete(n));
                    a.advance(n);
                    b.advance(n);
                }
                (None, Some(_)) | (Some(_), None) => {
                    // Normalized steps cover the whole base, so equal base
                    // lengths run out together.
                    return Err(OtError::BaseLengthMismatch {
                        left: self.base_len(),
                        right: other.base_len(),
                    });
                }
            }
        }

        Ok((a_prime, b_prime))
    }
}

/// Rebase `op2` onto the document produced by `op1`, both made against the
/// same base.
///
/// `priority` belongs to `op2`: when both operations insert at the same
/// position, `op2`'s text goes first if `priority` is `true` and second
/// otherwise. `transform(a, b, true)` and `transform(b, a, false)` therefore
/// agree on the order and converge.
pub fn transform(op1: &Operation, op2: &Operation, priority: bool) -> Result<Operation> {
    if op1.base_len() != op2.base_len() {
        return Err(OtError::BaseLengthMismatch {
            left: op1.base_len(),
            right: op2.base_len(),
        });
    }

    if priority {
        let (op2_prime, _) = op2.transform(op1)?;
        Ok(op2_prime)
    } else {
        let (_, op2_prime) = op1.transform(op2)?;
        Ok(op2_prime)
    }
}
