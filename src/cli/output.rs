/// Output formatting: JSON, compact JSON and table modes. TTY detection.
///
/// JSON modes serialize the payload returned by the service unchanged, so the
/// same input always renders to the same bytes.
use std::io::{self, IsTerminal, Write};

use comfy_table::{Cell, Table, presets::UTF8_BORDERS_ONLY};
use serde::Serialize;
use serde_json::Value;

use super::args::OutputFormat;
use crate::types::{ErrorOutput, ObjectPermissions, ObjectType, PermissionLevels};

/// Resolve the effective output format, handling `--json` flag and TTY auto-detection.
#[must_use]
pub fn resolve_format(fmt: OutputFormat, json_flag: bool) -> OutputFormat {
    if json_flag {
        return OutputFormat::Json;
    }
    if fmt == OutputFormat::Auto {
        if io::stdout().is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        fmt
    }
}

/// Output context passed to all formatters.
#[derive(Debug, Clone, Copy)]
pub struct OutputCtx {
    pub format: OutputFormat,
    pub no_header: bool,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub fn new(fmt: OutputFormat, json_flag: bool, no_header: bool) -> Self {
        Self {
            format: resolve_format(fmt, json_flag),
            no_header,
        }
    }
}

// --- Object permissions ---

/// Write an object's permissions.
///
/// JSON modes print `raw` as the service returned it. The table is built from
/// the lenient view; a payload without the expected shape falls back to JSON.
///
/// # Errors
///
/// Returns any I/O error from `out`.
pub fn write_permissions(raw: &Value, ctx: &OutputCtx, out: &mut dyn Write) -> io::Result<()> {
    match ctx.format {
        OutputFormat::Json => write_json(out, raw),
        OutputFormat::Compact => write_compact_json(out, raw),
        OutputFormat::Table | OutputFormat::Auto => match ObjectPermissions::view(raw) {
            Some(perms) => write_permissions_table(&perms, ctx, out),
            None => write_json(out, raw),
        },
    }
}

fn write_permissions_table(
    perms: &ObjectPermissions,
    ctx: &OutputCtx,
    out: &mut dyn Write,
) -> io::Result<()> {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    if !ctx.no_header {
        table.set_header(["PRINCIPAL", "KIND", "PERMISSION", "INHERITED FROM"]);
    }

    for entry in perms.entries() {
        let (name, kind) = entry
            .principal()
            .map_or(("", ""), |p| (p.name(), p.kind()));
        if entry.grants().is_empty() {
            table.add_row([name, kind, "", ""]);
        }
        for grant in entry.grants() {
            let from = match (grant.inherited, &grant.inherited_from_object) {
                (Some(true), Some(sources)) => sources.join(", "),
                (Some(true), None) => "(inherited)".to_owned(),
                _ => String::new(),
            };
            table.add_row([
                Cell::new(name),
                Cell::new(kind),
                Cell::new(grant.permission_level.as_deref().unwrap_or_default()),
                Cell::new(from),
            ]);
        }
    }

    let title = perms.title();
    if !ctx.no_header && !title.is_empty() {
        writeln!(out, "{title}")?;
    }
    writeln!(out, "{table}")
}

// --- Permission levels ---

/// Write a permission-level catalog.
///
/// # Errors
///
/// Returns any I/O error from `out`.
pub fn write_permission_levels(
    raw: &Value,
    ctx: &OutputCtx,
    out: &mut dyn Write,
) -> io::Result<()> {
    let levels = match ctx.format {
        OutputFormat::Json => return write_json(out, raw),
        OutputFormat::Compact => return write_compact_json(out, raw),
        OutputFormat::Table | OutputFormat::Auto => match PermissionLevels::view(raw) {
            Some(levels) => levels,
            None => return write_json(out, raw),
        },
    };

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    if !ctx.no_header {
        table.set_header(["LEVEL", "DESCRIPTION"]);
    }
    for level in levels.levels() {
        table.add_row([
            level.permission_level.as_deref().unwrap_or_default(),
            level.description.as_deref().unwrap_or_default(),
        ]);
    }
    writeln!(out, "{table}")
}

// --- Object types ---

/// Write the supported object types.
///
/// # Errors
///
/// Returns any I/O error from `out`.
pub fn write_object_types(
    types: &[ObjectType],
    ctx: &OutputCtx,
    out: &mut dyn Write,
) -> io::Result<()> {
    match ctx.format {
        OutputFormat::Json => write_json(out, types),
        OutputFormat::Compact => write_compact_json(out, types),
        OutputFormat::Table | OutputFormat::Auto => {
            let mut table = Table::new();
            table.load_preset(UTF8_BORDERS_ONLY);
            if !ctx.no_header {
                table.set_header(["TYPE", "REPORTED AS"]);
            }
            for ty in types {
                table.add_row([ty.as_path(), ty.singular()]);
            }
            writeln!(out, "{table}")
        }
    }
}

// --- Error output ---

/// Write a structured error to stderr.
pub fn write_error(err: &ErrorOutput, format: OutputFormat, json_flag: bool) {
    let fmt = resolve_format(format, json_flag);
    let stderr = io::stderr();
    let mut out = stderr.lock();
    match fmt {
        OutputFormat::Json | OutputFormat::Compact => {
            let s = serde_json::to_string_pretty(err).unwrap_or_default();
            let _ = writeln!(out, "{s}");
        }
        _ => {
            let _ = writeln!(out, "Error: {}", err.error.message);
        }
    }
}

// --- Stage timer ---

/// A RAII timer that logs elapsed milliseconds on drop.
///
/// Visible with `--debug` or `RUST_LOG=dbperms=debug`.
pub struct StageTimer {
    label: &'static str,
    start: std::time::Instant,
}

impl StageTimer {
    /// Start a named timer.
    #[must_use]
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for StageTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!(stage = self.label, elapsed_ms, "stage finished");
    }
}

// --- Generic JSON helpers ---

/// Pretty JSON with two-space indentation and a trailing newline.
///
/// # Errors
///
/// Returns an I/O error if serialization or the write fails.
pub fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> io::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    writeln!(out, "{s}")
}

fn write_compact_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> io::Result<()> {
    let s = serde_json::to_string(value)?;
    writeln!(out, "{s}")
}
