//! compat-report: check extension API members against a support descriptor.
//!
//! Usage:
//!   compat-report <descriptor> <runtime> <version> <area> <member>...
//!
//! Prints one line per member, `ok` or the first failing segment, and exits
//! with status 1 when any member is unsupported. Live presence is not
//! considered; only the descriptor is consulted.

use anyhow::{bail, Context};
use std::sync::Arc;
use webext_compat::{DescriptorLoader, RuntimeIdentity, SupportResolver};

fn print_usage() {
    eprintln!(
        r#"compat-report: support descriptor checker

USAGE:
    compat-report <DESCRIPTOR> <RUNTIME> <VERSION> <AREA> <MEMBER>...

EXAMPLE:
    compat-report browser-compat.json chrome 54.0 tabs query goBack onUpdated.addListener

ENVIRONMENT:
    RUST_LOG    log filter (e.g. webext_compat=debug)"#
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("warn".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        return Ok(());
    }
    if args.len() < 5 {
        print_usage();
        bail!("expected a descriptor, runtime, version, area and at least one member");
    }
    let (descriptor_path, runtime_name, version, area) = (&args[0], &args[1], &args[2], &args[3]);

    let descriptor = DescriptorLoader::new()?
        .load_from_file(descriptor_path)
        .await
        .with_context(|| format!("loading descriptor {}", descriptor_path))?;

    let runtime = RuntimeIdentity::builder(runtime_name.as_str())
        .version(version.as_str())
        .build();
    let resolver = SupportResolver::new(Arc::new(descriptor));

    let mut unsupported = 0usize;
    for member in &args[4..] {
        let diagnostic = resolver.check_static(area, member, &runtime);
        if diagnostic.is_resolved() {
            println!("{}.{}: ok", area, member);
        } else {
            unsupported += 1;
            println!("{}.{}: {}", area, member, diagnostic);
        }
    }

    if unsupported > 0 {
        eprintln!(
            "{} of {} member(s) unsupported on {} {}",
            unsupported,
            args.len() - 4,
            runtime.title(),
            runtime.version()
        );
        std::process::exit(1);
    }
    Ok(())
}
