mod capture;
mod config;
mod inspector;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use bytes::BytesMut;
use capture::CaptureReader;
use config::InspectConfig;
use inspector::Inspector;
use lodestone_protocol_core::ErrorKind;
use lodestone_protocol_v1_19_3::registries;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config/inspect.toml"));
    let config = InspectConfig::load(&config_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let context = match &config.sound_table {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading sound table {}", path.display()))?;
            let sounds = registries::sound_table_from_json(&json)?;
            info!("Loaded {} sounds from {}", sounds.len(), path.display());
            lodestone_protocol_core::CodecContext::new(registries::level_events(), sounds)
        }
        None => registries::codec_context(),
    };
    let codec = Arc::new(lodestone_protocol_v1_19_3::codec_with_context(context)?);
    info!(
        "Inspecting {} as {} (protocol {})",
        config.capture.display(),
        codec.minecraft_version(),
        codec.protocol_version()
    );

    let data = std::fs::read(&config.capture)
        .with_context(|| format!("reading capture {}", config.capture.display()))?;
    let mut reader = CaptureReader::new(BytesMut::from(&data[..]), config.max_frame_size);
    let mut inspector = Inspector::new(codec);
    inspector.skip_to(config.initial_state.path())?;

    loop {
        let offset = reader.offset();
        let Some(record) = reader.next_record()? else {
            break;
        };
        if let Err(e) = inspector.feed(record) {
            error!("Record at offset {}: {}", offset, e);
            // Past an unknown id the sessions may be in the wrong state
            if config.stop_on_error || e.kind() == ErrorKind::UnknownOpcode {
                return Err(e.into());
            }
        }
    }

    let stats = inspector.stats();
    info!(
        "Done: {} decoded, {} failed, {} re-encoded differently, final state {}",
        stats.decoded,
        stats.failed,
        stats.mismatched,
        inspector.state()
    );
    for (name, count) in &stats.by_name {
        info!("  {:<28} {}", name, count);
    }
    Ok(())
}
