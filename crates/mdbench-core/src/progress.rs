/// Progress events emitted while a benchmark batch runs.
#[derive(Debug, Clone)]
pub enum Progress {
    /// A named phase of a single entry has begun (loading inputs, executing
    /// the protocol, extracting performance).
    PhaseStart { name: &'static str },
    PhaseFinish,

    /// The batch loop is starting over `total` manifest entries.
    BatchStart { total: u64 },
    /// One manifest entry is starting.
    EntryStart { name: String },
    /// The current manifest entry finished (successfully or not).
    EntryFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards progress events to an optional callback.
///
/// The core never renders progress itself; the CLI installs a callback that
/// drives its progress bar.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
