//! System memory detection
//!
//! Used to fill in slow memory when the user does not provide it.

#[cfg(target_os = "macos")]
use std::process::Command;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Auto-detect total system memory in GB
///
/// Returns `None` on unsupported platforms or if detection fails.
pub fn detect_system_memory_gb() -> Option<f64> {
    match total_memory_bytes() {
        Ok(bytes) => Some(bytes as f64 / BYTES_PER_GB),
        Err(e) => {
            tracing::debug!("system memory detection failed: {}", e);
            None
        }
    }
}

#[cfg(target_os = "macos")]
fn total_memory_bytes() -> anyhow::Result<u64> {
    let output = Command::new("sysctl").arg("-n").arg("hw.memsize").output()?;

    let memory_bytes: u64 = String::from_utf8(output.stdout)?.trim().parse()?;
    Ok(memory_bytes)
}

#[cfg(target_os = "linux")]
fn total_memory_bytes() -> anyhow::Result<u64> {
    let meminfo = std::fs::read_to_string("/proc/meminfo")?;
    parse_meminfo_total_kb(&meminfo)
        .map(|kb| kb * 1024)
        .ok_or_else(|| anyhow::anyhow!("MemTotal not found in /proc/meminfo"))
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
fn total_memory_bytes() -> anyhow::Result<u64> {
    anyhow::bail!("memory detection not supported on this platform")
}

/// Extract `MemTotal` (in kB) from the contents of `/proc/meminfo`
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_meminfo_total_kb(meminfo: &str) -> Option<u64> {
    meminfo
        .lines()
        .find(|line| line.starts_with("MemTotal:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|kb| kb.parse().ok())
}
