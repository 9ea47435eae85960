//! # Site Server Utilities
//!
//! File: cli/src/commands/srv/utils.rs
//!
//! Startup helpers for `softsell srv`: a sanity check of the served directory
//! and detection of a LAN address for the banner.
//!
use std::net::{IpAddr, UdpSocket};
use std::path::Path;
use tracing::{debug, info, warn};

/// Entry page every built site is expected to have.
pub const INDEX_FILE: &str = "index.html";

/// Logs what is about to be served and warns when the entry page is missing.
///
/// Returns whether `index.html` exists in `path`.
pub fn check_site_directory(path: &Path) -> bool {
    match std::fs::read_dir(path) {
        Ok(entries) => {
            let mut entry_count = 0;
            for entry in entries.filter_map(std::result::Result::ok) {
                entry_count += 1;
                let kind = match entry.file_type() {
                    Ok(t) if t.is_dir() => "DIR ",
                    Ok(_) => "FILE",
                    Err(_) => "????",
                };
                debug!("  - {} : {}", kind, entry.file_name().to_string_lossy());
            }
            info!("Serving {} entries from {}", entry_count, path.display());
        }
        Err(e) => {
            warn!(
                "Could not read directory contents for '{}': {}",
                path.display(),
                e
            );
        }
    }

    let has_index = path.join(INDEX_FILE).is_file();
    if !has_index {
        warn!(
            "No {} in {}; only the /api routes will be useful",
            INDEX_FILE,
            path.display()
        );
    }
    has_index
}

/// Best-effort LAN address for the "Network URL" line, or `"localhost"`.
///
/// Connecting a UDP socket sends nothing; it only makes the OS pick the
/// outbound interface.
pub fn get_local_ip() -> String {
    let detected = UdpSocket::bind("0.0.0.0:0")
        .and_then(|socket| {
            socket.connect("192.0.2.1:80")?;
            socket.local_addr()
        })
        .map(|addr| addr.ip());

    match detected {
        Ok(ip) if !ip.is_loopback() && !ip.is_unspecified() => {
            debug!("Found local IP: {}", ip);
            ip.to_string()
        }
        Ok(_) => "localhost".to_string(),
        Err(e) => {
            debug!("Could not detect local network IP: {}", e);
            "localhost".to_string()
        }
    }
}

/// Whether `host` only accepts connections from this machine.
pub fn is_local_only(host: IpAddr) -> bool {
    host.is_loopback()
}
