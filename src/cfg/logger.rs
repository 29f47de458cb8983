// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{fs, path::Path, sync::Arc};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{Event, Subscriber, field::Field};
use tracing_appender::{
    non_blocking::{NonBlocking, WorkerGuard},
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, FmtContext, FormatEvent, FormatFields, format::Writer},
    layer::SubscriberExt,
    registry::LookupSpan,
};

use crate::cfg::enums::{LogOutput, OutputFormat};

#[derive(Debug, Deserialize, Clone)]
struct LoggerFile {
    logger: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    pub level: String,
    pub output: LogOutput,
    #[serde(default = "default_format")]
    pub format: OutputFormat,
    #[serde(default)]
    pub is_show_line: bool,
    #[serde(default)]
    pub is_show_module_path: bool,
    #[serde(default)]
    pub is_show_target: bool,
    pub file: Option<LogFileConfig>,
}

fn default_format() -> OutputFormat {
    OutputFormat::Json
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogFileConfig {
    pub path: String,
    pub rotation_frequency: Option<String>,
}

/// One JSON log line.
#[derive(Serialize)]
struct LogEntry {
    timestamp: String,
    level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    module_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    spans: Vec<String>,
    fields: Map<String, Value>,
}

struct JsonFormatter {
    config: Arc<LogConfig>,
}

impl<S, N> FormatEvent<S, N> for JsonFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let mut visitor = JsonVisitor::default();
        event.record(&mut visitor);

        let spans = ctx
            .event_scope()
            .map(|scope| scope.from_root().map(|s| s.name().to_string()).collect())
            .unwrap_or_default();

        let meta = event.metadata();
        let cfg = &self.config;
        let entry = LogEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            level: meta.level().to_string(),
            target: cfg.is_show_target.then(|| meta.target().to_string()),
            module_path: cfg
                .is_show_module_path
                .then(|| meta.module_path().unwrap_or_default().to_string()),
            line: if cfg.is_show_line { meta.line() } else { None },
            spans,
            fields: visitor.fields,
        };
        writeln!(
            writer,
            "{}",
            serde_json::to_string(&entry).map_err(|_| std::fmt::Error)?
        )
    }
}

#[derive(Default)]
struct JsonVisitor {
    fields: Map<String, Value>,
}

impl tracing::field::Visit for JsonVisitor {
    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name().to_string(), json!(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name().to_string(), json!(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name().to_string(), json!(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields.insert(field.name().to_string(), json!(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.fields
            .insert(field.name().to_string(), json!(format!("{value:?}")));
    }
}

fn rotation(freq: Option<&str>) -> Rotation {
    match freq {
        Some("minutely") => Rotation::MINUTELY,
        Some("hourly") => Rotation::HOURLY,
        Some("daily") => Rotation::DAILY,
        _ => Rotation::NEVER,
    }
}

fn writer(config: &LogConfig) -> Result<(NonBlocking, WorkerGuard)> {
    Ok(match config.output {
        LogOutput::Stdout => tracing_appender::non_blocking(std::io::stdout()),
        LogOutput::Stderr => tracing_appender::non_blocking(std::io::stderr()),
        LogOutput::File => {
            let file = config
                .file
                .as_ref()
                .context("logger output is `file` but no `file` section is given")?;
            let path = Path::new(&file.path);
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            let Some(name) = path.file_name() else {
                bail!("log file path {:?} has no file name", file.path);
            };
            let appender =
                RollingFileAppender::new(rotation(file.rotation_frequency.as_deref()), dir, name);
            tracing_appender::non_blocking(appender)
        },
    })
}

/// Install the global subscriber described by the YAML file at
/// `config_path`. Keep the returned guard alive to flush buffered lines.
pub fn init_logger(config_path: &str) -> Result<WorkerGuard> {
    let content = fs::read_to_string(config_path)
        .with_context(|| format!("failed to read logger config {config_path}"))?;
    let config: LoggerFile = serde_yaml::from_str(&content)
        .with_context(|| format!("failed to parse logger config {config_path}"))?;
    let config = config.logger;

    let (non_blocking, guard) = writer(&config)?;
    let env_filter =
        EnvFilter::try_new(&config.level).context("failed to parse log level from config")?;

    let layer = fmt::layer().with_writer(non_blocking);
    match config.format {
        OutputFormat::Json => {
            let layer = layer.event_format(JsonFormatter {
                config: Arc::new(config.clone()),
            });
            let subscriber = tracing_subscriber::registry().with(env_filter).with(layer);
            tracing::subscriber::set_global_default(subscriber)
        },
        OutputFormat::Plain => {
            let layer = layer
                .with_ansi(false)
                .with_target(config.is_show_target)
                .with_line_number(config.is_show_line)
                .with_file(config.is_show_module_path);
            let subscriber = tracing_subscriber::registry().with(env_filter).with(layer);
            tracing::subscriber::set_global_default(subscriber)
        },
    }
    .context("failed to set global default subscriber")?;

    Ok(guard)
}
