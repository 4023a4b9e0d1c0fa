//! # Chat Server Utilities
//!
//! File: cli/src/commands/srv/utils.rs
//!
//! Startup banner and network address discovery for `clintongpt srv`.
//!
use super::config::ServerConfig;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};
use tracing::debug;

/// Best guess at this machine's address on the local network.
///
/// Connecting a UDP socket sends nothing; it only asks the OS which local
/// address would route to the given destination.
pub fn local_network_ip() -> Option<IpAddr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).ok()?;
    socket.connect((Ipv4Addr::new(192, 0, 2, 1), 9)).ok()?;
    let ip = socket.local_addr().ok()?.ip();
    debug!("Detected local network address: {}", ip);
    (!ip.is_loopback() && !ip.is_unspecified()).then_some(ip)
}

/// Lines printed when the server starts.
pub fn banner_lines(
    bot_name: &str,
    addr: SocketAddr,
    config: &ServerConfig,
    network_ip: Option<IpAddr>,
) -> Vec<String> {
    let rule = "=".repeat(65);
    let mut lines = vec![
        String::new(),
        rule.clone(),
        format!("💬 {} is listening", bot_name),
        format!("🌐 Local URL:         http://localhost:{}", addr.port()),
    ];
    // Only worth showing when the server is reachable from other machines.
    if let Some(ip) = network_ip.filter(|_| !addr.ip().is_loopback()) {
        lines.push(format!("🔗 Network URL:       http://{}:{}", ip, addr.port()));
    }
    lines.push(format!("⚙️  Binding to address: {}", addr));
    lines.push("📮 Chat endpoint:     POST /api/chat".to_string());
    if let Some(dir) = &config.static_dir {
        lines.push(format!("📂 Front end from:    {}", dir.display()));
    }
    lines.push(format!("🔒 CORS enabled:      {}", config.enable_cors));
    lines.push(rule);
    lines.push(String::new());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config(host: IpAddr, static_dir: Option<PathBuf>) -> ServerConfig {
        ServerConfig {
            port: 8000,
            host,
            enable_cors: true,
            static_dir,
        }
    }

    #[test]
    fn test_local_network_ip_is_not_loopback() {
        // May be None in sandboxes without a route.
        if let Some(ip) = local_network_ip() {
            assert!(!ip.is_loopback());
        }
    }

    #[test]
    fn test_banner_for_loopback_binding() {
        let host = IpAddr::V4(Ipv4Addr::LOCALHOST);
        let addr = SocketAddr::new(host, 8001);
        let lines = banner_lines(
            "ClintonGPT",
            addr,
            &config(host, None),
            Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7))),
        );
        let text = lines.join("\n");
        assert!(text.contains("ClintonGPT is listening"));
        assert!(text.contains("http://localhost:8001"));
        assert!(!text.contains("Network URL"));
        assert!(!text.contains("Front end from"));
    }

    #[test]
    fn test_banner_for_public_binding_with_front_end() {
        let host = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
        let addr = SocketAddr::new(host, 8000);
        let lines = banner_lines(
            "ClintonGPT",
            addr,
            &config(host, Some(PathBuf::from("/srv/ui"))),
            Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7))),
        );
        let text = lines.join("\n");
        assert!(text.contains("http://10.0.0.7:8000"));
        assert!(text.contains("/srv/ui"));
    }
}
