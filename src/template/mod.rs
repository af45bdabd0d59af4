//! # Template Module
//!
//! Renders configuration templates for a gamepad.
//!
//! A template is plain text with `<COMMAND>` placeholders. Each placeholder
//! is answered by a [`CommandResolver`]; a line containing an unsupported
//! command is emitted commented out with `# ` so the generated file still
//! loads.
//!
//! ## Example
//!
//! ```text
//! [axismap]
//! <AXISMAP:-lefty>=y1        ->   -ABS_Y=y1
//! [evdev-keymap]
//! <MAP_BUTTON:guide>=guide   ->   # Unsupported gamepad mapping: guide=guide
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{PadmapError, Result};
use crate::resolve::command::{CommandResolver, CommandResult};

/// Extension of per-device templates in a template directory.
pub const TEMPLATE_EXTENSION: &str = "tpl";

/// Prefix written in front of lines with unsupported commands.
pub const COMMENT_PREFIX: &str = "# ";

/// Line counts of one rendered template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Lines read from the template
    pub lines: usize,
    /// Lines emitted commented out
    pub commented: usize,
}

/// Substitutes every `<COMMAND>` placeholder in one line.
///
/// # Returns
///
/// The substituted line and whether any command in it was unsupported.
///
/// # Examples
///
/// ```
/// use padmap::device::snapshot::CapabilitySnapshot;
/// use padmap::resolve::command::CommandResolver;
/// use padmap::template::substitute_line;
///
/// let snapshot = CapabilitySnapshot::default();
/// let resolver = CommandResolver::new("/dev/input/event0", None, &snapshot);
///
/// let (line, unsupported) = substitute_line(&resolver, "evdev=<MAP_EVDEV> <keep>");
/// assert_eq!(line, "evdev=/dev/input/event0 <keep>");
/// assert!(!unsupported);
/// ```
#[must_use]
pub fn substitute_line(resolver: &CommandResolver<'_>, line: &str) -> (String, bool) {
    let mut result = String::with_capacity(line.len());
    let mut unsupported = false;
    let mut rest = line;

    while let Some(start) = rest.find('<') {
        let Some(len) = rest[start + 1..].find('>') else {
            break;
        };
        let end = start + 1 + len;
        let command = &rest[start + 1..end];
        result.push_str(&rest[..start]);

        match resolver.execute(command) {
            CommandResult::Found(value) => result.push_str(&value),
            CommandResult::NotFound => result.push_str(&rest[start..=end]),
            CommandResult::Unsupported(value) => {
                result.push_str(&value);
                unsupported = true;
            }
        }
        rest = &rest[end + 1..];
    }

    result.push_str(rest);
    (result, unsupported)
}

/// Renders a template stream line by line.
///
/// Unsupported lines are written with [`COMMENT_PREFIX`]; if such a line
/// substitutes to nothing it is dropped.
///
/// # Errors
///
/// Returns an error if reading the template or writing the output fails.
pub fn render<R: BufRead, W: Write>(
    resolver: &CommandResolver<'_>,
    reader: R,
    mut writer: W,
) -> Result<RenderStats> {
    let mut stats = RenderStats::default();

    for line in reader.lines() {
        let line = line?;
        stats.lines += 1;

        let (substituted, unsupported) = substitute_line(resolver, &line);
        if !unsupported {
            writeln!(writer, "{}", substituted)?;
        } else if !substituted.is_empty() {
            writeln!(writer, "{}{}", COMMENT_PREFIX, substituted)?;
            stats.commented += 1;
        }
    }

    writer.flush()?;
    Ok(stats)
}

/// Renders `template` into `output` for one gamepad.
///
/// # Arguments
///
/// * `resolver` - Command resolver for the gamepad
/// * `template` - Template file to read
/// * `output` - File to create or truncate
///
/// # Errors
///
/// Returns [`PadmapError::Template`] if either file cannot be opened, or an
/// I/O error if rendering fails part way.
pub fn render_file(resolver: &CommandResolver<'_>, template: &Path, output: &Path) -> Result<RenderStats> {
    let input = File::open(template).map_err(|e| {
        PadmapError::Template(format!("Cannot open template {}: {}", template.display(), e))
    })?;
    let out = File::create(output).map_err(|e| {
        PadmapError::Template(format!("Cannot create output {}: {}", output.display(), e))
    })?;

    let stats = render(resolver, BufReader::new(input), BufWriter::new(out))?;
    info!(
        "Rendered {} -> {} ({} lines, {} commented)",
        template.display(),
        output.display(),
        stats.lines,
        stats.commented
    );
    Ok(stats)
}

/// Output file for the `index`-th gamepad.
///
/// The first gamepad writes to `base`; later ones insert their index before
/// the last `.` of the path, or append it when there is none.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use padmap::template::output_path_for;
///
/// assert_eq!(output_path_for(Path::new("pad.ini"), 0), PathBuf::from("pad.ini"));
/// assert_eq!(output_path_for(Path::new("pad.ini"), 2), PathBuf::from("pad2.ini"));
/// assert_eq!(output_path_for(Path::new("pad"), 1), PathBuf::from("pad1"));
/// ```
#[must_use]
pub fn output_path_for(base: &Path, index: usize) -> PathBuf {
    if index == 0 {
        return base.to_path_buf();
    }

    let base = base.to_string_lossy();
    match base.rfind('.') {
        Some(dot) => PathBuf::from(format!("{}{}{}", &base[..dot], index, &base[dot..])),
        None => PathBuf::from(format!("{}{}", base, index)),
    }
}

/// Picks the template for a GUID.
///
/// Uses `<dir>/<guid>.tpl` when a template directory is given and that file
/// exists, otherwise `default`.
#[must_use]
pub fn select_template(dir: Option<&Path>, guid: &str, default: &Path) -> PathBuf {
    if let Some(dir) = dir {
        let candidate = dir.join(format!("{}.{}", guid, TEMPLATE_EXTENSION));
        if candidate.is_file() {
            debug!("Using device template {}", candidate.display());
            return candidate;
        }
    }
    default.to_path_buf()
}
