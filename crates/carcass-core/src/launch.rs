//! JVM launch arguments and start scripts

use std::path::Path;

use carcass_meta::{BackendDescriptor, BackendFamily, ProxyDescriptor, ProxyFamily};

/// Aikar's G1 tuning for game servers (https://mcflags.emc.gs)
const AIKAR_FLAGS: &[&str] = &[
    "-XX:+UseG1GC",
    "-XX:+ParallelRefProcEnabled",
    "-XX:MaxGCPauseMillis=200",
    "-XX:+UnlockExperimentalVMOptions",
    "-XX:+DisableExplicitGC",
    "-XX:+AlwaysPreTouch",
    "-XX:G1NewSizePercent=30",
    "-XX:G1MaxNewSizePercent=40",
    "-XX:G1HeapRegionSize=8M",
    "-XX:G1ReservePercent=20",
    "-XX:G1HeapWastePercent=5",
    "-XX:G1MixedGCCountTarget=4",
    "-XX:InitiatingHeapOccupancyPercent=15",
    "-XX:G1MixedGCLiveThresholdPercent=90",
    "-XX:G1RSetUpdatingPauseTimePercent=5",
    "-XX:SurvivorRatio=32",
    "-XX:+PerfDisableSharedMem",
    "-XX:MaxTenuringThreshold=1",
    "-Dusing.aikars.flags=https://mcflags.emc.gs",
    "-Daikars.new.flags=true",
];

/// Lighter G1 profile for proxies
const PROXY_FLAGS: &[&str] = &[
    "-XX:+UseG1GC",
    "-XX:G1HeapRegionSize=4M",
    "-XX:+UnlockExperimentalVMOptions",
    "-XX:+ParallelRefProcEnabled",
    "-XX:+AlwaysPreTouch",
];

fn launch_args(memory_mb: u32, flags: &[&str], jar: &str, trailing: &[&str]) -> String {
    let mut args = vec![format!("-Xms{memory_mb}M"), format!("-Xmx{memory_mb}M")];
    args.extend(flags.iter().map(|f| f.to_string()));
    args.push("-jar".to_string());
    args.push(format!("./{jar}"));
    args.extend(trailing.iter().map(|f| f.to_string()));
    args.join(" ")
}

/// `java` arguments for a backend.
pub fn backend_launch_args(backend: &BackendDescriptor) -> String {
    match backend.family {
        BackendFamily::Paper => launch_args(
            backend.memory_mb,
            AIKAR_FLAGS,
            backend.family.jar_name(),
            &["--nogui"],
        ),
    }
}

/// `java` arguments for the proxy.
pub fn proxy_launch_args(proxy: &ProxyDescriptor) -> String {
    match proxy.family {
        ProxyFamily::Waterfall => {
            launch_args(proxy.memory_mb, PROXY_FLAGS, proxy.family.jar_name(), &[])
        }
    }
}

/// Contents of `start.bat` and `start.ps1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartScripts {
    pub batch: String,
    pub powershell: String,
}

/// Start scripts running `java <args>` from `server_dir`.
pub fn start_scripts(server_dir: &Path, args: &str) -> StartScripts {
    let batch = format!("@echo off\r\njava {args}\r\npause\r\n");
    let powershell = format!(
        "Set-Location -Path {}\r\nStart-Process java -ArgumentList {}\r\n",
        powershell_quote(&server_dir.to_string_lossy()),
        powershell_quote(args)
    );
    StartScripts { batch, powershell }
}

/// Single-quoted PowerShell literal; embedded quotes are doubled.
fn powershell_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}
