use crate::error::{OtError, Result};
use crate::operation::{char_len, Operation, Step};

impl Operation {
    /// Apply this operation to `text`, returning the edited document.
    ///
    /// `text` must be exactly `base_len` characters long. The steps always
    /// cover the whole base, so nothing is silently appended or dropped.
    pub fn apply(&self, text: &str) -> Result<String> {
        self.check()?;

        let actual = char_len(text);
        if actual != self.base_len() {
            return Err(OtError::LengthMismatch {
                expected: self.base_len(),
                actual,
            });
        }

        let mut out = String::with_capacity(text.len());
        let mut chars = text.chars();
        for step in self.steps().iter() {
            match step {
                Step::Retain(n) => out.extend(chars.by_ref().take(*n)),
                Step::Insert(inserted) => out.push_str(inserted),
                Step::Delete(n) => {
                    chars.by_ref().take(*n).for_each(drop);
                }
            }
        }

        // `check` and the length test above mean the steps cover the whole text.
        debug_assert_eq!(chars.count(), 0);

        Ok(out)
    }
}
