//! # shellrun Invocation Building (`common::process::invocation`)
//!
//! File: cli/src/common/process/invocation.rs
//!
//! ## Overview
//!
//! Turns caller-supplied command strings into `Invocation`s, the concrete
//! program + arguments handed to `std::process::Command`. Building is pure and
//! takes the `Platform` as a parameter, so both the Windows and the POSIX rules
//! are tested on any host.
//!
//! ## Rules
//!
//! - **Windows, single command**: `cmd /c <command>`. The command text is passed
//!   to `cmd` verbatim (`raw_arg`), so `a && b` chains are interpreted by `cmd`.
//! - **Windows, sequence**: entries joined with ` && ` into one `cmd /c` call.
//! - **Other platforms, single command**: split into program + arguments with
//!   POSIX quoting rules and spawned directly, without a shell. Unbalanced
//!   quotes are rejected with `ShellrunError::Parse` and nothing is spawned, so
//!   `echo don't` fails while `echo "don't"` runs.
//! - **Other platforms, sequence**: one independent invocation per entry, in order.
//!
use crate::common::system::platform::Platform;
use crate::core::error::{ExecResult, ShellrunError};
use std::process::Command;

/// Command interpreter used on Windows.
pub const WINDOWS_SHELL: &str = "cmd";
/// Flag telling the interpreter to run the rest of the line and exit.
pub const WINDOWS_SHELL_FLAG: &str = "/c";
/// Logical AND-sequencing token.
pub const AND_TOKEN: &str = "&&";

/// A fully built process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    /// Passed to the program unquoted after `args` (Windows chains).
    raw_tail: Option<String>,
    command_line: String,
}

impl Invocation {
    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn raw_tail(&self) -> Option<&str> {
        self.raw_tail.as_deref()
    }

    /// The command line as logged and reported in errors.
    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    /// Builds the `std::process::Command` for this invocation.
    pub(crate) fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(tail) = &self.raw_tail {
            #[cfg(windows)]
            {
                use std::os::windows::process::CommandExt;
                command.raw_arg(tail);
            }
            #[cfg(not(windows))]
            {
                command.arg(tail);
            }
        }
        command
    }
}

/// Splits `command` into program + arguments and spawns it without a shell.
///
/// `command_line()` of the result is `command` exactly as given.
pub fn direct(command: &str) -> ExecResult<Invocation> {
    if command.trim().is_empty() {
        return Err(ShellrunError::EmptyCommand);
    }
    let mut parts = shell_words::split(command)
        .map_err(|e| ShellrunError::Parse {
            command: command.to_string(),
            reason: e.to_string(),
        })?
        .into_iter();
    let program = parts.next().ok_or(ShellrunError::EmptyCommand)?;
    Ok(Invocation {
        program,
        args: parts.collect(),
        raw_tail: None,
        command_line: command.to_string(),
    })
}

/// Wraps `command` in the Windows command interpreter.
pub fn windows_wrapped(command: &str) -> ExecResult<Invocation> {
    let command = command.trim();
    if command.is_empty() {
        return Err(ShellrunError::EmptyCommand);
    }
    Ok(Invocation {
        program: WINDOWS_SHELL.to_string(),
        args: vec![WINDOWS_SHELL_FLAG.to_string()],
        raw_tail: Some(command.to_string()),
        command_line: format!("{WINDOWS_SHELL} {WINDOWS_SHELL_FLAG} {command}"),
    })
}

/// Builds the invocation for one command string.
pub fn single(platform: Platform, command: &str) -> ExecResult<Invocation> {
    if platform.is_windows() {
        windows_wrapped(command)
    } else {
        direct(command)
    }
}

/// Joins commands with the AND-sequencing token.
pub fn join_chain<S: AsRef<str>>(commands: &[S]) -> String {
    let separator = format!(" {AND_TOKEN} ");
    commands
        .iter()
        .map(|c| c.as_ref().trim())
        .collect::<Vec<_>>()
        .join(separator.as_str())
}

/// Builds the invocations for an ordered command sequence.
///
/// Windows yields at most one entry (the whole chain); other platforms yield one
/// entry per command, each built independently so one bad entry does not stop
/// the rest. An empty sequence yields nothing.
pub fn sequence<S: AsRef<str>>(platform: Platform, commands: &[S]) -> Vec<ExecResult<Invocation>> {
    if commands.is_empty() {
        return Vec::new();
    }
    if platform.is_windows() {
        if commands.iter().any(|c| c.as_ref().trim().is_empty()) {
            return vec![Err(ShellrunError::EmptyCommand)];
        }
        return vec![windows_wrapped(&join_chain(commands))];
    }
    commands
        .iter()
        .map(|c| direct(c.as_ref()))
        .collect()
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_windows_is_wrapped() {
        let inv = single(Platform::Windows, "ping qq.com").unwrap();
        assert_eq!(inv.program(), "cmd");
        assert_eq!(inv.args(), ["/c"]);
        assert_eq!(inv.raw_tail(), Some("ping qq.com"));
        assert_eq!(inv.command_line(), "cmd /c ping qq.com");
    }

    #[test]
    fn test_single_posix_chain_is_unmodified() {
        let line = "sudo cd /etc && sudo cd /web && sudo ls -l";
        let inv = single(Platform::Linux, line).unwrap();
        assert_eq!(inv.command_line(), line);
        assert_eq!(inv.program(), "sudo");
        assert_eq!(
            inv.args(),
            ["cd", "/etc", "&&", "sudo", "cd", "/web", "&&", "sudo", "ls", "-l"]
        );
        assert_eq!(inv.raw_tail(), None);
    }

    #[test]
    fn test_direct_respects_quotes() {
        let inv = direct("sh -c 'echo hello world'").unwrap();
        assert_eq!(inv.program(), "sh");
        assert_eq!(inv.args(), ["-c", "echo hello world"]);
    }

    #[test]
    fn test_direct_rejects_bad_input() {
        assert!(matches!(direct(""), Err(ShellrunError::EmptyCommand)));
        assert!(matches!(direct("   "), Err(ShellrunError::EmptyCommand)));
        assert!(matches!(
            single(Platform::Windows, " "),
            Err(ShellrunError::EmptyCommand)
        ));
        match direct("echo 'unterminated") {
            Err(ShellrunError::Parse { command, .. }) => assert_eq!(command, "echo 'unterminated"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_direct_apostrophe_needs_quoting() {
        assert!(matches!(direct("echo don't"), Err(ShellrunError::Parse { .. })));
        let inv = direct(r#"echo "don't""#).unwrap();
        assert_eq!(inv.args(), ["don't"]);
    }

    #[test]
    fn test_sequence_windows_single_entry() {
        let plan = sequence(Platform::Windows, &["dir"]);
        assert_eq!(plan.len(), 1);
        let inv = plan[0].as_ref().unwrap();
        assert_eq!(inv.command_line(), "cmd /c dir");
    }

    #[test]
    fn test_sequence_windows_joins_with_and() {
        let commands = ["ipconfig", "ping www.baidu.com", "dir"];
        let plan = sequence(Platform::Windows, &commands);
        assert_eq!(plan.len(), 1);
        let inv = plan[0].as_ref().unwrap();
        assert_eq!(inv.raw_tail(), Some("ipconfig && ping www.baidu.com && dir"));
        assert_eq!(
            inv.command_line(),
            "cmd /c ipconfig && ping www.baidu.com && dir"
        );
        assert_eq!(inv.command_line().matches("cmd /c").count(), 1);
        assert_eq!(inv.command_line().matches(AND_TOKEN).count(), commands.len() - 1);
    }

    #[test]
    fn test_sequence_windows_rejects_blank_entry() {
        let plan = sequence(Platform::Windows, &["dir", " "]);
        assert_eq!(plan.len(), 1);
        assert!(matches!(plan[0], Err(ShellrunError::EmptyCommand)));
    }

    #[test]
    fn test_sequence_posix_keeps_order() {
        let commands = vec!["uname -a".to_string(), "false".to_string(), "ls -l".to_string()];
        let plan = sequence(Platform::Linux, &commands);
        assert_eq!(plan.len(), commands.len());
        let lines: Vec<&str> = plan
            .iter()
            .map(|p| p.as_ref().unwrap().command_line())
            .collect();
        assert_eq!(lines, ["uname -a", "false", "ls -l"]);
    }

    #[test]
    fn test_sequence_posix_isolates_bad_entries() {
        let plan = sequence(Platform::Other, &["echo a", "", "echo b"]);
        assert_eq!(plan.len(), 3);
        assert!(plan[0].is_ok());
        assert!(matches!(plan[1], Err(ShellrunError::EmptyCommand)));
        assert!(plan[2].is_ok());
    }

    #[test]
    fn test_sequence_empty_is_noop() {
        let empty: [&str; 0] = [];
        assert!(sequence(Platform::Windows, &empty).is_empty());
        assert!(sequence(Platform::Linux, &empty).is_empty());
    }

    #[test]
    fn test_to_command_program_and_args() {
        let inv = direct("git status --short").unwrap();
        let cmd = inv.to_command();
        assert_eq!(cmd.get_program(), "git");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, ["status", "--short"]);
    }
}
