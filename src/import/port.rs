use crate::error::WriteBackError;

/// The only mutation points into the rendered roster.
///
/// Calls arrive strictly in row order; each call must have completed its
/// effect on the roster before it returns.
pub trait WriteBackPort<H> {
    /// Fill the mark field of the entry behind `handle`.
    fn apply_mark(&mut self, handle: &H, mark: &str) -> Result<(), WriteBackError>;
    /// Attach observation text; only called with non-empty text.
    fn apply_observation(&mut self, handle: &H, text: &str) -> Result<(), WriteBackError>;
    /// Called once after the last row.
    fn commit(&mut self) -> Result<(), WriteBackError>;
}

impl<H, P: WriteBackPort<H> + ?Sized> WriteBackPort<H> for &mut P {
    fn apply_mark(&mut self, handle: &H, mark: &str) -> Result<(), WriteBackError> {
        (**self).apply_mark(handle, mark)
    }

    fn apply_observation(&mut self, handle: &H, text: &str) -> Result<(), WriteBackError> {
        (**self).apply_observation(handle, text)
    }

    fn commit(&mut self) -> Result<(), WriteBackError> {
        (**self).commit()
    }
}
