use crate::error::{OtError, Result};
use crate::operation::{char_len, Operation, Step};

impl Operation {
    /// Build the undo of this operation.
    ///
    /// `text` is the document the operation was applied to; deleted spans are
    /// restored from it. The inverse maps `target_len` back to `base_len`.
    pub fn invert(&self, text: &str) -> Result<Self> {
        self.check()?;

        let actual = char_len(text);
        if actual != self.base_len() {
            return Err(OtError::LengthMismatch {
                expected: self.base_len(),
                actual,
            });
        }

        let mut inverse = Operation::new(self.target_len());
        let mut chars = text.chars();
        for step in self.steps().iter() {
            match step {
                Step::Retain(n) => {
                    inverse.push(Step::Retain(*n));
                    chars.by_ref().take(*n).for_each(drop);
                }
                Step::Insert(inserted) => inverse.push(Step::Delete(char_len(inserted))),
                Step::Delete(n) => {
                    inverse.push(Step::Insert(chars.by_ref().take(*n).collect()));
                }
            }
        }

        Ok(inverse)
    }
}
