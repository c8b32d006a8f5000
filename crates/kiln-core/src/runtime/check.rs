//! Runtime detection for Java and Maven

use anyhow::Result;
use regex::Regex;
use std::process::Command;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

/// Run a command and extract a version from its combined output
///
/// Stdout and stderr are scanned line by line against `pattern`; the first
/// capture group of the LAST matching line wins. Spawn failure or output
/// with no matching line yields `None`. Exit status is ignored: JVM tools
/// report versions on stderr and some exit non-zero for version queries.
pub fn probe_version(command: &str, args: &[&str], pattern: &Regex) -> Option<String> {
    let output = Command::new(command).args(args).output().ok()?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push('\n');
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    let mut version = None;
    for line in combined.lines() {
        if let Some(caps) = pattern.captures(line) {
            if let Some(group) = caps.get(1) {
                version = Some(group.as_str().to_string());
            }
        }
    }
    version
}

/// Check if a Java runtime is available
pub fn check_java() -> RuntimeInfo {
    // `java -version` prints e.g. `openjdk version "17.0.9" 2023-10-17` on stderr
    let pattern = Regex::new(r#"version "([^"]+)""#).expect("hard-coded regex compiles");

    match probe_version("java", &["-version"], &pattern) {
        Some(version) => RuntimeInfo {
            name: "Java",
            version: Some(version),
            available: true,
        },
        None => RuntimeInfo {
            name: "Java",
            version: None,
            available: false,
        },
    }
}

/// Check if Maven is available
pub fn check_maven() -> RuntimeInfo {
    // `mvn --version` prints e.g. `Apache Maven 3.9.6 (bc0240f3...)`
    let pattern = Regex::new(r"Apache Maven (\S+)").expect("hard-coded regex compiles");

    match probe_version("mvn", &["--version"], &pattern) {
        Some(version) => RuntimeInfo {
            name: "Maven",
            version: Some(version),
            available: true,
        },
        None => RuntimeInfo {
            name: "Maven",
            version: None,
            available: false,
        },
    }
}

/// Check every runtime a generation run needs, failing on any missing one
pub fn check_runtimes() -> Result<Vec<RuntimeInfo>> {
    let mut results = Vec::new();
    let mut missing = Vec::new();

    let java = check_java();
    if java.available {
        results.push(java);
    } else {
        missing.push("Java (install a JDK, e.g. from https://adoptium.net)");
    }

    let maven = check_maven();
    if maven.available {
        results.push(maven);
    } else {
        missing.push("Maven (install from https://maven.apache.org)");
    }

    if !missing.is_empty() {
        anyhow::bail!(
            "Missing required runtimes:\n{}",
            missing
                .iter()
                .map(|m| format!("  - {}", m))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_returns_last_matching_line() {
        let pattern = Regex::new(r"version (\S+)").unwrap();
        let version = probe_version(
            "sh",
            &["-c", "echo noise; echo version 1.2.3; echo version 4.5.6"],
            &pattern,
        );
        assert_eq!(version.as_deref(), Some("4.5.6"));
    }

    #[test]
    fn test_probe_reads_stderr() {
        let pattern = Regex::new(r"version (\S+)").unwrap();
        let version = probe_version("sh", &["-c", "echo version 9.9.9 1>&2"], &pattern);
        assert_eq!(version.as_deref(), Some("9.9.9"));
    }

    #[test]
    fn test_probe_ignores_exit_status() {
        let pattern = Regex::new(r"version (\S+)").unwrap();
        let version = probe_version("sh", &["-c", "echo version 2.0.0; exit 1"], &pattern);
        assert_eq!(version.as_deref(), Some("2.0.0"));
    }

    #[test]
    fn test_probe_no_match_is_none() {
        let pattern = Regex::new(r"version (\S+)").unwrap();
        assert_eq!(probe_version("sh", &["-c", "echo nothing"], &pattern), None);
    }

    #[test]
    fn test_probe_missing_binary_is_none() {
        let pattern = Regex::new(r"version (\S+)").unwrap();
        assert_eq!(
            probe_version("definitely-not-a-real-binary", &[], &pattern),
            None
        );
    }
}
