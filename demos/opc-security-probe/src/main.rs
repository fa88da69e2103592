//! OPC Security Probe
//!
//! Initializes process security the way an OPC Classic client does at
//! startup, then shows how one attribute value is copied and how its
//! timestamp is marshalled.
//!
//! Run with: cargo run --bin opc-security-probe -- --auth-level integrity --time-as-utc

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use opc_classic::{
    ApplicationConfig, ApplicationInstance, AttributeValue, AuthenticationLevel, BrowseFilter,
    ImpersonationLevel, InitializationState, NodeKind, Value,
};

#[derive(Parser)]
#[command(name = "opc-security-probe")]
#[command(about = "Initialize OPC Classic client security and inspect the value model")]
struct Args {
    /// Authentication level (default, none, connect, call, packet, integrity, privacy)
    #[arg(short, long, default_value = "integrity")]
    auth_level: AuthenticationLevel,

    /// Impersonation level (default, anonymous, identify, impersonate, delegate)
    #[arg(short, long, default_value = "identify")]
    impersonation: ImpersonationLevel,

    /// Keep timestamps in UTC instead of local time
    #[arg(long)]
    time_as_utc: bool,

    /// Call the initializer this many times
    #[arg(short, long, default_value = "2")]
    repeat: u32,

    /// Browse filter to demonstrate (all, branch, item)
    #[arg(short, long, default_value = "item")]
    filter: BrowseFilter,
}

#[cfg(windows)]
fn provider() -> opc_classic::ComSecurityProvider {
    opc_classic::ComSecurityProvider::new()
}

#[cfg(not(windows))]
fn provider() -> opc_classic::InProcessSecurityProvider {
    opc_classic::InProcessSecurityProvider::new()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    if !args.auth_level.meets(AuthenticationLevel::HARDENED_MINIMUM) {
        warn!(
            "authentication level {} is below {}; hardened DCOM servers will reject calls",
            args.auth_level,
            AuthenticationLevel::HARDENED_MINIMUM
        );
    }

    let config = ApplicationConfig::default()
        .with_time_as_utc(args.time_as_utc)
        .with_impersonation(args.impersonation);
    let app = ApplicationInstance::with_config(config, provider());

    for attempt in 1..=args.repeat.max(1) {
        app.initialize_security(args.auth_level)?;
        info!("initialize_security call {} returned", attempt);
    }

    match app.state() {
        InitializationState::Committed(level) => info!(
            "security committed: {} (signing={}, encryption={}, datagram={})",
            level,
            level.requires_signing(),
            level.requires_encryption(),
            level.effective_for_datagram()
        ),
        other => warn!("unexpected security state: {:?}", other),
    }

    let mut reading = AttributeValue::new();
    info!("fresh value: {} @ {}", reading.value(), reading.timestamp());

    reading.set_value(vec![Value::from(12.5f64), Value::from(13.0f64)]);
    let now = if app.time_as_utc() {
        chrono::Utc::now().naive_utc()
    } else {
        chrono::Local::now().naive_local()
    };
    reading.set_timestamp(now);

    let mut copy = reading.deep_clone()?;
    if let Some(items) = copy.value_mut().as_array_mut() {
        items[0] = Value::from(0.0f64);
    }
    info!("original: {}  copy: {}", reading.value(), copy.value());

    let time = app.time_config();
    let filetime = reading.marshal_timestamp(&time)?;
    info!(
        "timestamp {} marshals to {:?} (time_as_utc={})",
        reading.timestamp(),
        filetime,
        time.as_utc
    );

    for kind in [NodeKind::Branch, NodeKind::Item] {
        info!("filter {} admits {:?}: {}", args.filter, kind, args.filter.admits(&kind));
    }
    info!("filter {} wire value: {}", args.filter, args.filter.to_wire());

    Ok(())
}
