//! # shellrun Console Charset Resolution (`common::system::charset`)
//!
//! File: cli/src/common/system/charset.rs
//!
//! ## Overview
//!
//! Works out which encoding the host console uses so process output can be
//! decoded correctly. Detection runs a short diagnostic command (a "probe") and
//! parses its text output:
//!
//! - **Windows**: `cmd /c chcp` prints something like `Active code page: 936`.
//!   The first run of digits is the code page; `936` is GBK, `437` is decoded as
//!   ISO-8859-1 and everything else (including `65001`) as UTF-8.
//! - **Linux / other**: `locale` prints `VAR="value"` lines. The first recognized
//!   variable whose value carries an encoding suffix (`zh_CN.GBK`,
//!   `en_US.UTF-8@euro`) decides.
//!
//! ## Failure policy
//!
//! Resolution never fails. A probe that cannot be spawned, produces nothing
//! useful or names an encoding we cannot decode yields UTF-8.
//!
//! The parsing functions are pure and take captured text, so they are tested
//! with literal fixtures on any host.
//!
use crate::common::encoding::Charset;
use crate::common::process::{capture_stdout, invocation};
use crate::common::system::platform::Platform;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, error};

/// Probe reporting the active Windows console code page.
pub const DEFAULT_WINDOWS_PROBE: &str = "cmd /c chcp";
/// Probe reporting POSIX locale settings.
pub const DEFAULT_POSIX_PROBE: &str = "locale";
/// Locale variables consulted, highest priority first.
pub const DEFAULT_LOCALE_VARIABLES: &[&str] = &["LC_MESSAGES", "LC_CTYPE", "LANG"];

/// Which diagnostic commands to run and which locale lines to trust.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSettings {
    pub windows_probe: String,
    pub posix_probe: String,
    pub locale_variables: Vec<String>,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            windows_probe: DEFAULT_WINDOWS_PROBE.to_string(),
            posix_probe: DEFAULT_POSIX_PROBE.to_string(),
            locale_variables: DEFAULT_LOCALE_VARIABLES
                .iter()
                .map(|v| v.to_string())
                .collect(),
        }
    }
}

impl ProbeSettings {
    /// The probe command line for `platform`.
    pub fn probe_for(&self, platform: Platform) -> &str {
        if platform.is_windows() {
            &self.windows_probe
        } else {
            &self.posix_probe
        }
    }
}

fn code_page_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[0-9]+").expect("code page pattern is valid"))
}

/// Extracts the first run of digits from `chcp` output.
pub fn parse_code_page(output: &str) -> Option<u32> {
    code_page_pattern()
        .find(output)
        .and_then(|m| m.as_str().parse().ok())
}

/// Maps a Windows console code page to the charset used to decode it.
pub fn charset_for_code_page(code_page: u32) -> Charset {
    match code_page {
        936 => Charset::Gbk,
        437 => Charset::Latin1,
        _ => Charset::Utf8,
    }
}

/// Finds the encoding label in `locale` output.
///
/// Variables are tried in the given order. For each, the first line of the form
/// `VAR=value` is taken; quotes are removed and the label is the text after the
/// first `.`, up to an `@modifier`. Case is preserved.
pub fn parse_locale_encoding<S: AsRef<str>>(output: &str, variables: &[S]) -> Option<String> {
    variables.iter().find_map(|variable| {
        let variable = variable.as_ref();
        output
            .lines()
            .find_map(|line| {
                line.trim_start()
                    .strip_prefix(variable)
                    .and_then(|rest| rest.strip_prefix('='))
            })
            .and_then(encoding_from_locale_value)
    })
}

fn encoding_from_locale_value(value: &str) -> Option<String> {
    let unquoted = value.trim().replace('"', "");
    let unquoted = unquoted.trim_matches('\'');
    let (_, suffix) = unquoted.split_once('.')?;
    let label = suffix.split('@').next().unwrap_or_default().trim();
    if label.is_empty() {
        None
    } else {
        Some(label.to_string())
    }
}

/// Turns captured probe output into a charset for `platform`.
pub fn charset_from_probe_output(
    platform: Platform,
    output: &str,
    settings: &ProbeSettings,
) -> Charset {
    if platform.is_windows() {
        return parse_code_page(output)
            .map(charset_for_code_page)
            .unwrap_or_default();
    }
    match parse_locale_encoding(output, &settings.locale_variables) {
        Some(label) => Charset::from_label(&label).unwrap_or_else(|| {
            debug!(label = %label, "Unrecognized locale encoding, using UTF-8");
            Charset::Utf8
        }),
        None => Charset::Utf8,
    }
}

/// Runs the platform's probe and resolves the console charset.
///
/// Never fails: any problem running the probe resolves to UTF-8.
pub fn detect_charset(platform: Platform, settings: &ProbeSettings) -> Charset {
    let probe = settings.probe_for(platform);
    let charset = match invocation::direct(probe).and_then(|inv| capture_stdout(&inv)) {
        Ok(output) => {
            debug!(probe, output = %output.trim(), "Charset probe output");
            charset_from_probe_output(platform, &output, settings)
        }
        Err(e) => {
            error!(probe, error = %e, "Charset probe failed, falling back to UTF-8");
            Charset::Utf8
        }
    };
    debug!(%platform, %charset, "Resolved output charset");
    charset
}
