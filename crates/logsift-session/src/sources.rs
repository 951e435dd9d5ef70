use anyhow::Result;
use std::io::Write;

/// Produces the raw log feed, one line at a time.
///
/// The sequence is lazy, unbounded and non-restartable; `Ok(None)` means the
/// external producer exited and ends the session.
#[allow(async_fn_in_trait)]
pub trait LogLineSource {
    async fn next_line(&mut self) -> Result<Option<String>>;
}

/// Takes one finite snapshot of the process table per call.
///
/// Invoked repeatedly while the session tries to (re)acquire the target
/// process, so a snapshot must be restartable.
#[allow(async_fn_in_trait)]
pub trait ProcessListingSource {
    async fn snapshot(&mut self) -> Result<Vec<String>>;
}

/// Single key→value query against the device's property store
#[allow(async_fn_in_trait)]
pub trait DevicePropertyLookup {
    async fn get(&self, key: &str) -> Result<String>;
}

/// Ordered, append-only destination for rendered output
pub trait OutputSink {
    fn write_text(&mut self, text: &str) -> std::io::Result<()>;
}

// Any writer works as a sink; the bin hands in locked stdout, tests a Vec.
impl<W: Write> OutputSink for W {
    fn write_text(&mut self, text: &str) -> std::io::Result<()> {
        self.write_all(text.as_bytes())?;
        self.flush()
    }
}
