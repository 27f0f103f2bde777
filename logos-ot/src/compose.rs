use crate::cursor::StepCursor;
use crate::error::{OtError, Result};
use crate::operation::{Operation, Step};

impl Operation {
    /// Merge `self` followed by `next` into one operation, so that
    /// `apply(S, self.compose(next)) == apply(apply(S, self), next)`.
    ///
    /// `next` must be made against the document `self` produces.
    pub fn compose(&self, next: &Self) -> Result<Self> {
        self.check()?;
        next.check()?;
        if self.target_len() != next.base_len() {
            return Err(OtError::ChainLengthMismatch {
                first_target: self.target_len(),
                second_base: next.base_len(),
            });
        }

        let mut composed = Operation::new(self.base_len());
        let mut a = StepCursor::new(self.steps().into_owned());
        let mut b = StepCursor::new(next.steps().into_owned());

        loop {
            match (a.head(), b.head()) {
                (None, None) => break,
                // Text deleted by the first never reaches the second.
                (Some(Step::Delete(n)), _) => {
                    composed.push(Step::Delete(*n));
                    a.skip_step();
                }
                // Text inserted by the second did not exist for the first.
                (_, Some(Step::Insert(text))) => {
                    composed.push(Step::Insert(text.clone()));
                    b.skip_step();
                }
                (Some(Step::Retain(i)), Some(Step::Retain(j))) => {
                    let n = (*i).min(*j);
                    composed.push(Step::Retain(n));
                    a.advance(n);
                    b.advance(n);
                }
                (Some(Step::Retain(i)), Some(Step::Delete(j))) => {
                    let n = (*i).min(*j);
                    composed.push(Step::Delete(n));
                    a.advance(n);
                    b.advance(n);
                }
                (Some(Step::Insert(text)), Some(Step::Retain(j))) => {
                    let n = (*j).min(text.chars().count());
                    composed.push(Step::Insert(text.chars().take(n).collect()));
                    a.advance(n);
                    b.advance(n);
                }
                (Some(Step::Insert(text)), Some(Step::Delete(j))) => {
                    let n = (*j).min(text.chars().count());
                    a.advance(n);
                    b.advance(n);
                }
                (None, Some(_)) | (Some(_), None) => {
                    return Err(OtError::ChainLengthMismatch {
                        first_target: self.target_len(),
                        second_base: next.base_len(),
                    });
                }
            }
        }

        Ok(composed)
    }
}
