use anyhow::Result;
use clap::Parser;

use logsift_adb::{AdbShell, DeviceSelector};
use logsift_session::run_session;
use logsift_types::{DEFAULT_TAG_WIDTH, FilterConfig};

/// Logsift - Filter logcat output down to a single application's process
#[derive(Parser, Debug)]
#[command(name = "logsift")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Examples:\n  \
    logsift -p com.example.app -i EGL_emulation -i System\n  \
    logsift -p com.example.app --cp\n  \
    logsift --current")]
struct Args {
    /// Package name (application id) to filter by
    #[arg(short = 'p', long = "package", value_name = "PACKAGE")]
    package: Option<String>,

    /// Show messages only, no tag or priority metadata
    #[arg(short = 'r', long = "raw")]
    raw: bool,

    /// Only show messages with this tag (repeatable)
    #[arg(short = 't', long = "tag", value_name = "TAG")]
    tags: Vec<String>,

    /// Ignore messages with this tag (repeatable)
    #[arg(short = 'i', long = "ignore", value_name = "TAG")]
    ignore: Vec<String>,

    /// Copy & paste friendly output
    #[arg(long = "cp")]
    copy_paste: bool,

    /// Use the first device connected over USB (adb -d)
    #[arg(short = 'd', long = "dev", conflicts_with = "emu")]
    dev: bool,

    /// Use the first running emulator (adb -e)
    #[arg(short = 'e', long = "emu")]
    emu: bool,

    /// Filter by the currently focused application
    #[arg(long)]
    current: bool,

    /// Width of the tag column
    #[arg(long, default_value_t = DEFAULT_TAG_WIDTH, value_name = "COLS")]
    tag_width: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing for debugging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Run the session
    let result = run(args).await;

    // Handle any errors
    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
    }

    result
}

async fn run(args: Args) -> Result<()> {
    let device = if args.dev {
        DeviceSelector::Usb
    } else if args.emu {
        DeviceSelector::Emulator
    } else {
        DeviceSelector::Any
    };

    let shell = AdbShell::new(device);

    // An empty package never resolves, which makes the session render the
    // whole feed; that is the deliberate no-target fallback.
    let mut package = args.package.unwrap_or_default();
    if args.current {
        if let Some(focused) = shell.focused_package().await? {
            package = focused;
        }
    }

    let config = FilterConfig {
        include_tags: args.tags.into_iter().collect(),
        exclude_tags: args.ignore.into_iter().collect(),
        raw: args.raw,
        copy_paste: args.copy_paste,
        tag_width: args.tag_width,
    };

    let logcat = shell.logcat()?;
    let listing = shell.process_listing();
    let mut stdout = std::io::stdout().lock();

    run_session(config, &package, logcat, listing, &shell, &mut stdout).await
}
