use crate::operation::{char_len, Step};

/// Walks a step list while allowing the head step to be partially consumed.
///
/// Shared by the two-cursor merges in `transform` and `compose`.
pub(crate) struct StepCursor {
    rest: std::vec::IntoIter<Step>,
    head: Option<Step>,
}

impl StepCursor {
    pub(crate) fn new(steps: Vec<Step>) -> Self {
        let mut rest = steps.into_iter();
        let head = rest.next();
        Self { rest, head }
    }

    #[inline]
    pub(crate) fn head(&self) -> Option<&Step> {
        self.head.as_ref()
    }

    /// Drop the head step entirely.
    #[inline]
    pub(crate) fn skip_step(&mut self) {
        self.head = self.rest.next();
    }

    /// Consume `n` characters of the head step. Moves to the next step once
    /// the head is exhausted.
    pub(crate) fn advance(&mut self, n: usize) {
        let remainder = match self.head.take() {
            Some(Step::Retain(k)) if k > n => Some(Step::Retain(k - n)),
            Some(Step::Delete(k)) if k > n => Some(Step::Delete(k - n)),
            Some(Step::Insert(text)) if char_len(&text) > n => {
                Some(Step::Insert(text.chars().skip(n).collect()))
            }
            _ => None,
        };
        self.head = remainder.or_else(|| self.rest.next());
    }
}
