//! Web server command.

use console::style;

use crate::config::Settings;

/// Start the proxy server.
pub async fn cmd_serve(settings: &Settings) -> anyhow::Result<()> {
    println!(
        "{} Starting cumponidori server at http://{}",
        style("→").cyan(),
        settings.server.bind
    );
    println!("  Proxying {}", settings.portal.base_url);
    println!("  Press Ctrl+C to stop");

    crate::server::serve(settings).await
}

/// Normalize a bind address that can be:
/// - Just a port: "3001" -> 127.0.0.1:3001
/// - Just a host: "0.0.0.0" -> 0.0.0.0:3001
/// - Host and port: "0.0.0.0:3001" -> unchanged
pub fn normalize_bind_address(bind: &str) -> String {
    if let Ok(port) = bind.parse::<u16>() {
        return format!("127.0.0.1:{port}");
    }

    if let Some((_, port_str)) = bind.rsplit_once(':') {
        if port_str.parse::<u16>().is_ok() {
            return bind.to_string();
        }
    }

    format!("{bind}:3001")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_bind_address() {
        assert_eq!(normalize_bind_address("3005"), "127.0.0.1:3005");
        assert_eq!(normalize_bind_address("0.0.0.0"), "0.0.0.0:3001");
        assert_eq!(normalize_bind_address("0.0.0.0:8080"), "0.0.0.0:8080");
    }
}
