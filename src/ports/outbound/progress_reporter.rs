/// ProgressReporter port for reporting progress during recipe generation
///
/// Messages go to the user (e.g. stderr) and never mix with the recipe
/// written to stdout.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports progress through a sequence of steps
    ///
    /// # Arguments
    /// * `current` - Current step (1-based)
    /// * `total` - Total number of steps
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a warning or error message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
