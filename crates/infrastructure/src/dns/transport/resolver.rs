use dot_lookup_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;

/// Resolves a hostname (or IP literal) to all its socket addresses.
pub async fn resolve_all(
    hostname: &str,
    port: u16,
    timeout: Duration,
) -> Result<Vec<SocketAddr>, DomainError> {
    let target = (hostname, port);
    let display = format!("{}:{}", hostname, port);

    let addrs_iter = tokio::time::timeout(timeout, tokio::net::lookup_host(target))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: display.clone(),
            phase: "resolving",
        })?
        .map_err(|e| DomainError::TransportConnect {
            server: display.clone(),
            reason: format!("address resolution failed: {}", e),
        })?;

    let addrs: Vec<SocketAddr> = addrs_iter.collect();

    if addrs.is_empty() {
        return Err(DomainError::TransportConnect {
            server: display,
            reason: "no addresses found".to_string(),
        });
    }

    Ok(addrs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ip_literal_resolves_without_lookup() {
        let addrs = resolve_all("127.0.0.1", 853, Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(addrs, vec!["127.0.0.1:853".parse::<SocketAddr>().unwrap()]);
    }

    #[tokio::test]
    async fn test_ipv6_literal() {
        let addrs = resolve_all("::1", 853, Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(addrs[0].port(), 853);
        assert!(addrs[0].is_ipv6());
    }
}
