use crate::config::{LogSection, LoggingConfig};
use std::{
    io::{IsTerminal, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::Level;
use tracing_subscriber::{
    filter::FilterFn, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry,
};

use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

const DEFAULT_SECTION: &str = "default";

fn parse_tracing_level(s: &str) -> Option<Level> {
    match s.to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        "off" | "none" => None,
        _ => Some(Level::INFO),
    }
}

/// True if `target` is `crate_name` itself or one of its submodules.
fn matches_crate_prefix(target: &str, crate_name: &str) -> bool {
    target == crate_name
        || (target.starts_with(crate_name) && target[crate_name.len()..].starts_with("::"))
}

/// Which section a log target belongs to. Named sections win; everything
/// else falls through to "default".
#[derive(Clone)]
struct SectionRoute {
    named: Arc<Vec<String>>,
    owner: Option<String>,
}

impl SectionRoute {
    fn owns(&self, target: &str) -> bool {
        let owner = self
            .named
            .iter()
            .filter(|name| matches_crate_prefix(target, name))
            .max_by_key(|name| name.len());
        match (&self.owner, owner) {
            (None, None) => true,
            (Some(mine), Some(found)) => mine == found,
            _ => false,
        }
    }

    fn filter(self, max_level: Level) -> FilterFn<impl Fn(&tracing::Metadata<'_>) -> bool> {
        FilterFn::new(move |meta: &tracing::Metadata<'_>| {
            meta.level() <= &max_level && self.owns(meta.target())
        })
    }
}

// -------- rotating file writer --------

#[derive(Clone)]
struct RotWriter(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl<'a> fmt::MakeWriter<'a> for RotWriter {
    type Writer = RotWriter;
    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

impl Write for RotWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| std::io::Error::other("log file writer poisoned"))?
            .write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0
            .lock()
            .map_err(|_| std::io::Error::other("log file writer poisoned"))?
            .flush()
    }
}

/// Relative log paths live under `base_dir` (the server home dir).
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

fn file_limit(section: &LogSection) -> FileLimit {
    FileLimit::MaxFiles(section.max_backups.unwrap_or(3).max(1))
}

fn create_rotating_writer(
    log_path: &Path,
    section: &LogSection,
) -> Result<RotWriter, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let max_bytes = section.max_size_mb.unwrap_or(100).saturating_mul(1024 * 1024);
    let rot = FileRotate::new(
        log_path,
        AppendTimestamp::default(file_limit(section)),
        ContentLimit::BytesSurpassed(usize::try_from(max_bytes).unwrap_or(usize::MAX)),
        Compression::None,
        #[cfg(unix)]
        None,
    );

    Ok(RotWriter(Arc::new(Mutex::new(rot))))
}

// -------- layer assembly --------

fn console_layer(route: SectionRoute, section: &LogSection, ansi: bool) -> Option<BoxedLayer> {
    let level = parse_tracing_level(&section.console_level)?;
    Some(
        fmt::layer()
            .with_ansi(ansi)
            .with_target(true)
            .with_level(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_filter(route.filter(level))
            .boxed(),
    )
}

fn file_layer(
    name: &str,
    route: SectionRoute,
    section: &LogSection,
    base_dir: &Path,
) -> Option<BoxedLayer> {
    if section.file.trim().is_empty() {
        return None;
    }
    let level = parse_tracing_level(&section.file_level)?;
    let log_path = resolve_log_path(&section.file, base_dir);

    let writer = match create_rotating_writer(&log_path, section) {
        Ok(w) => w,
        Err(e) => {
            // Subscriber is not installed yet.
            eprintln!(
                "Failed to init log file for '{}': {} ({})",
                name,
                log_path.to_string_lossy(),
                e
            );
            return None;
        }
    };

    Some(
        fmt::layer()
            .json()
            .with_ansi(false)
            .with_target(true)
            .with_level(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_writer(writer)
            .with_filter(route.filter(level))
            .boxed(),
    )
}

fn build_layers(cfg: &LoggingConfig, base_dir: &Path, ansi: bool) -> Vec<BoxedLayer> {
    let mut named: Vec<String> = cfg
        .keys()
        .filter(|k| k.as_str() != DEFAULT_SECTION)
        .cloned()
        .collect();
    named.sort();
    let named = Arc::new(named);

    let mut layers = Vec::new();
    for (name, section) in cfg {
        let route = SectionRoute {
            named: named.clone(),
            owner: (name != DEFAULT_SECTION).then(|| name.clone()),
        };
        layers.extend(console_layer(route.clone(), section, ansi));
        layers.extend(file_layer(name, route, section, base_dir));
    }
    layers
}

/// Install the global subscriber.
///
/// Each `logging.<name>` section owns the targets under `<name>::`; the
/// `default` section owns the rest. Console output is text, files are JSON
/// lines with size-based rotation. Relative file paths resolve against
/// `base_dir`.
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    let _ = tracing_log::LogTracer::init();

    if cfg.is_empty() {
        init_default_logging();
        return;
    }

    let ansi = std::io::stdout().is_terminal();
    let layers = build_layers(cfg, base_dir, ansi);
    let _ = Registry::default().with(layers).try_init();
}

fn init_default_logging() {
    let _ = fmt()
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .try_init();
}
