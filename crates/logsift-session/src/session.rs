use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info};

use logsift_types::{DeviceProps, FilterConfig, LogRecord};

use crate::color::TagColorizer;
use crate::filter::TagFilter;
use crate::parser::parse_line;
use crate::render::Renderer;
use crate::resolver::resolve_pid;
use crate::sources::{DevicePropertyLookup, LogLineSource, OutputSink, ProcessListingSource};

/// Delay between process-listing snapshots while waiting for the target
/// process to come back. There is no give-up path; the session waits as long
/// as it takes.
const RESOLVE_RETRY_DELAY: Duration = Duration::from_millis(250);

// Device property keys shown in the copy & paste header
const PROP_MANUFACTURER: &str = "ro.product.manufacturer";
const PROP_SDK: &str = "ro.build.version.sdk";
const PROP_SERIAL: &str = "ro.serialno";
const PROP_ABI: &str = "ro.product.cpu.abi";

/// Follows the target process' pid across its lifecycle.
///
/// Unbound until the first successful resolution, then bound to one pid at a
/// time. Restart and kill signatures in the log feed unbind the tracker and
/// trigger a blocking re-resolution against fresh process listings.
pub struct SessionTracker {
    package: String,
    current_pid: Option<String>,
}

impl SessionTracker {
    pub fn new(package: &str) -> Self {
        Self {
            package: package.to_string(),
            current_pid: None,
        }
    }

    pub fn current_pid(&self) -> Option<&str> {
        self.current_pid.as_deref()
    }

    /// Initial acquisition: one snapshot, one resolution attempt.
    ///
    /// Failure is not an error; the session just runs unbound and renders
    /// every line until a later signature rebinds it.
    pub async fn bind_initial<P: ProcessListingSource>(&mut self, listing: &mut P) -> Result<()> {
        let rows = listing.snapshot().await?;
        self.current_pid = resolve_pid(&self.package, rows.iter().map(String::as_str));

        match &self.current_pid {
            Some(pid) => info!(package = %self.package, pid = %pid, "target process acquired"),
            None => debug!(package = %self.package, "target process not running, showing all lines"),
        }

        Ok(())
    }

    /// Feed one record through the tracker.
    ///
    /// Returns whether the record passes the pid comparison. A record
    /// carrying a restart or kill signature is judged against the pid it
    /// named before re-resolution replaces it.
    pub async fn observe<P: ProcessListingSource>(
        &mut self,
        record: &LogRecord,
        listing: &mut P,
    ) -> Result<bool> {
        let Some(pid) = self.current_pid.clone() else {
            // Never resolved: show everything rather than nothing.
            return Ok(true);
        };

        let pass = record.pid == pid;

        if Self::is_lifecycle_signature(record, &pid) {
            debug!(pid = %pid, tag = %record.tag, "target process ended, re-resolving");
            self.current_pid = None;
            self.reacquire(listing).await?;
        }

        Ok(pass)
    }

    fn is_lifecycle_signature(record: &LogRecord, pid: &str) -> bool {
        // The system log announces restarts and kills of the followed
        // process under these two tags.
        if record.tag == "ActivityManager" {
            return record.message.starts_with(&format!("Killing {pid}"));
        }

        if record.tag == "Process" {
            return record.message == format!("Sending signal. PID: {pid} SIG: 9");
        }

        false
    }

    /// Retry resolution until the process shows up again.
    ///
    /// Blocks the whole pipeline on purpose: nothing buffers the raw feed
    /// while the target is gone.
    async fn reacquire<P: ProcessListingSource>(&mut self, listing: &mut P) -> Result<()> {
        loop {
            let rows = listing.snapshot().await?;
            if let Some(pid) = resolve_pid(&self.package, rows.iter().map(String::as_str)) {
                info!(package = %self.package, pid = %pid, "target process reacquired");
                self.current_pid = Some(pid);
                return Ok(());
            }

            tokio::time::sleep(RESOLVE_RETRY_DELAY).await;
        }
    }
}

/// Fetch the device identity consumed by the copy & paste header
async fn fetch_device_props<D: DevicePropertyLookup>(props: &D) -> Result<DeviceProps> {
    Ok(DeviceProps {
        manufacturer: props.get(PROP_MANUFACTURER).await?,
        sdk: props.get(PROP_SDK).await?,
        serial: props.get(PROP_SERIAL).await?,
        abi: props.get(PROP_ABI).await?,
    })
}

/// Run one log session to completion.
///
/// Drives every incoming line through parse → track → filter → colorize →
/// render until the log feed ends. All session state lives in this task;
/// collaborator failures are fatal and propagate to the caller.
pub async fn run_session<L, P, D, O>(
    config: FilterConfig,
    package: &str,
    mut log_lines: L,
    mut listing: P,
    props: &D,
    out: &mut O,
) -> Result<()>
where
    L: LogLineSource,
    P: ProcessListingSource,
    D: DevicePropertyLookup,
    O: OutputSink,
{
    let device = if config.copy_paste {
        fetch_device_props(props).await?
    } else {
        DeviceProps::default()
    };

    let renderer = Renderer::new(config.clone(), package, device);
    let filter = TagFilter::new(&config);
    let mut colorizer = TagColorizer::new();
    let mut tracker = SessionTracker::new(package);

    tracker.bind_initial(&mut listing).await?;

    while let Some(raw) = log_lines.next_line().await? {
        let record = parse_line(&raw);

        if !tracker.observe(&record, &mut listing).await? {
            continue;
        }

        let tag = renderer.display_tag(&record.tag);
        if !filter.should_render(&tag) {
            continue;
        }

        let color = colorizer.color_for(&tag);
        let tag = colorizer.collapse(&tag);
        renderer.render(&record, &tag, color, out)?;
    }

    debug!("log feed ended, session over");
    Ok(())
}
