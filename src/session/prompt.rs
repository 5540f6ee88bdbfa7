//! Confirmation prompt collaborator.

/// Asks the user whether unsaved edits may be discarded.
///
/// Closures returning `bool` implement this directly:
///
/// ```
/// use rust_bingo::session::ConfirmPrompt;
///
/// let mut always = || true;
/// assert!(always.confirm_discard());
/// ```
pub trait ConfirmPrompt {
    /// Return true to discard unsaved edits.
    fn confirm_discard(&mut self) -> bool;
}

impl<F> ConfirmPrompt for F
where
    F: FnMut() -> bool,
{
    fn confirm_discard(&mut self) -> bool {
        self()
    }
}
