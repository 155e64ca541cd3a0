//! The static shell-command catalog, a subprocess execution wrapper, and a
//! best-effort system information collector.

use crate::error::CommandError;
use std::process::Command;

/// One catalog entry: a shell command with its description and the
/// platform(s) it applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEntry {
    pub command: &'static str,
    pub description: &'static str,
    pub platform: &'static str,
}

/// A named category with its ordered entries.
#[derive(Debug, Clone)]
pub struct CommandCategory {
    pub name: &'static str,
    pub entries: Vec<CommandEntry>,
}

/// Structured result of one subprocess invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub exit_code: i32,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub success: bool,
}

/// Collected host information. `distribution` is Linux-only and best-effort.
#[derive(Debug, Clone)]
pub struct SystemInfo {
    pub system: String,
    pub architecture: String,
    pub family: String,
    pub hostname: String,
    pub toolkit_version: String,
    pub distribution: Option<String>,
}

const fn entry(
    command: &'static str,
    description: &'static str,
    platform: &'static str,
) -> CommandEntry {
    CommandEntry {
        command,
        description,
        platform,
    }
}

/// Build the fixed catalog of common shell commands, grouped by category.
/// The catalog is constructed fresh on each call and never mutated; order is
/// stable.
pub fn common_commands() -> Vec<CommandCategory> {
    vec![
        CommandCategory {
            name: "file_operations",
            entries: vec![
                entry("ls -lah", "List all files with details and hidden files", "Linux/Mac"),
                entry("dir", "List files in directory", "Windows"),
                entry("cp -r source dest", "Copy directory recursively", "Linux/Mac"),
                entry("mv source dest", "Move or rename files", "Linux/Mac"),
                entry("rm -rf directory", "Remove directory and contents", "Linux/Mac"),
                entry("find . -name '*.txt'", "Find all .txt files in current directory", "Linux/Mac"),
            ],
        },
        CommandCategory {
            name: "system_info",
            entries: vec![
                entry("uname -a", "Display system information", "Linux/Mac"),
                entry("systeminfo", "Display detailed system information", "Windows"),
                entry("df -h", "Display disk usage in human-readable format", "Linux/Mac"),
                entry("free -h", "Display memory usage", "Linux"),
                entry("top", "Display running processes", "Linux/Mac"),
            ],
        },
        CommandCategory {
            name: "network",
            entries: vec![
                entry("ping google.com", "Test network connectivity", "All"),
                entry("curl -I https://example.com", "Get HTTP headers from URL", "Linux/Mac"),
                entry("wget https://example.com/file", "Download file from URL", "Linux/Mac"),
                entry("ifconfig", "Display network interface configuration", "Linux/Mac"),
                entry("ipconfig", "Display network configuration", "Windows"),
            ],
        },
        CommandCategory {
            name: "git",
            entries: vec![
                entry("git status", "Check repository status", "All"),
                entry("git add .", "Stage all changes", "All"),
                entry("git commit -m 'message'", "Commit staged changes", "All"),
                entry("git push", "Push commits to remote", "All"),
                entry("git pull", "Pull changes from remote", "All"),
                entry("git log --oneline", "View commit history (compact)", "All"),
            ],
        },
        CommandCategory {
            name: "package_management",
            entries: vec![
                entry("pip install package_name", "Install Python package", "All"),
                entry("npm install package_name", "Install Node.js package", "All"),
                entry("apt-get update && apt-get install package", "Update and install package (Debian/Ubuntu)", "Linux"),
                entry("brew install package", "Install package using Homebrew", "Mac"),
            ],
        },
        CommandCategory {
            name: "compression",
            entries: vec![
                entry("tar -czf archive.tar.gz folder/", "Create compressed tar.gz archive", "Linux/Mac"),
                entry("tar -xzf archive.tar.gz", "Extract tar.gz archive", "Linux/Mac"),
                entry("zip -r archive.zip folder/", "Create zip archive", "All"),
                entry("unzip archive.zip", "Extract zip archive", "All"),
            ],
        },
        CommandCategory {
            name: "text_processing",
            entries: vec![
                entry("grep 'pattern' file.txt", "Search for pattern in file", "Linux/Mac"),
                entry("sed 's/old/new/g' file.txt", "Replace text in file", "Linux/Mac"),
                entry("awk '{print $1}' file.txt", "Print first column of file", "Linux/Mac"),
                entry("cat file1.txt file2.txt > combined.txt", "Concatenate files", "Linux/Mac"),
            ],
        },
        CommandCategory {
            name: "process_management",
            entries: vec![
                entry("ps aux", "List running processes with details", "Linux/Mac"),
                entry("kill -9 PID", "Force-terminate a process by id", "Linux/Mac"),
                entry("pkill process_name", "Terminate processes by name", "Linux/Mac"),
                entry("nohup command &", "Run a command immune to hangups", "Linux/Mac"),
                entry("taskkill /PID pid /F", "Force-terminate a process by id", "Windows"),
            ],
        },
    ]
}

/// Look up one category by name, or report the valid names.
pub fn category_by_name(name: &str) -> Result<CommandCategory, CommandError> {
    let catalog = common_commands();
    catalog
        .iter()
        .find(|c| c.name == name)
        .cloned()
        .ok_or_else(|| CommandError::UnknownCategory {
            name: name.to_string(),
            available: catalog.iter().map(|c| c.name.to_string()).collect(),
        })
}

/// Run a command through the platform shell (`sh -c` on Unix, `cmd /C` on
/// Windows). A failure to launch is converted into an [`ExecutionResult`]
/// with exit code -1 and the error text on stderr; this function never
/// returns an error.
pub fn execute_command(command: &str, capture_output: bool) -> ExecutionResult {
    let mut shell = if cfg!(windows) {
        let mut c = Command::new("cmd.exe");
        c.args(["/C", command]);
        c
    } else {
        let mut c = Command::new("sh");
        c.args(["-c", command]);
        c
    };

    if capture_output {
        match shell.output() {
            Ok(output) => ExecutionResult {
                exit_code: output.status.code().unwrap_or(-1),
                stdout: Some(String::from_utf8_lossy(&output.stdout).into_owned()),
                stderr: Some(String::from_utf8_lossy(&output.stderr).into_owned()),
                success: output.status.success(),
            },
            Err(e) => launch_failure(e),
        }
    } else {
        match shell.status() {
            Ok(status) => ExecutionResult {
                exit_code: status.code().unwrap_or(-1),
                stdout: None,
                stderr: None,
                success: status.success(),
            },
            Err(e) => launch_failure(e),
        }
    }
}

fn launch_failure(e: std::io::Error) -> ExecutionResult {
    ExecutionResult {
        exit_code: -1,
        stdout: None,
        stderr: Some(e.to_string()),
        success: false,
    }
}

/// Collect host information. On Linux the distribution pretty-name is read
/// from /etc/os-release; any read failure is swallowed.
pub fn get_system_info() -> SystemInfo {
    SystemInfo {
        system: std::env::consts::OS.to_string(),
        architecture: std::env::consts::ARCH.to_string(),
        family: std::env::consts::FAMILY.to_string(),
        hostname: gethostname::gethostname().to_string_lossy().into_owned(),
        toolkit_version: env!("CARGO_PKG_VERSION").to_string(),
        distribution: linux_distribution(),
    }
}

fn linux_distribution() -> Option<String> {
    if std::env::consts::OS != "linux" {
        return None;
    }
    let content = std::fs::read_to_string("/etc/os-release").ok()?;
    for line in content.lines() {
        if let Some(value) = line.strip_prefix("PRETTY_NAME=") {
            return Some(value.trim().trim_matches('"').to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_eight_stable_categories() {
        let catalog = common_commands();
        let names: Vec<&str> = catalog.iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec![
                "file_operations",
                "system_info",
                "network",
                "git",
                "package_management",
                "compression",
                "text_processing",
                "process_management",
            ]
        );
        assert!(catalog.iter().all(|c| !c.entries.is_empty()));
    }

    #[test]
    fn test_category_lookup() {
        let git = category_by_name("git").unwrap();
        assert_eq!(git.entries[0].command, "git status");

        let err = category_by_name("cooking").unwrap_err();
        let CommandError::UnknownCategory { available, .. } = err;
        assert_eq!(available.len(), 8);
    }

    #[test]
    fn test_execute_command_success() {
        let result = execute_command("echo hello", true);
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.stdout.as_deref().map(str::trim), Some("hello"));
    }

    #[test]
    fn test_execute_command_failure_never_errors() {
        let result = execute_command("definitely-not-a-real-binary-xyz", true);
        assert!(!result.success);
        assert_ne!(result.exit_code, 0);
    }

    #[test]
    fn test_execute_command_without_capture() {
        let result = execute_command("exit 0", false);
        assert!(result.success);
        assert!(result.stdout.is_none());
        assert!(result.stderr.is_none());
    }

    #[test]
    fn test_system_info_populated() {
        let info = get_system_info();
        assert!(!info.system.is_empty());
        assert!(!info.architecture.is_empty());
        assert!(!info.hostname.is_empty());
        assert!(!info.toolkit_version.is_empty());
    }
}
