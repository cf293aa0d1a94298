use tokio::net::TcpListener;

// Bind the configured port, optionally walking forward on conflicts
pub async fn bind(host: &str, port: u16, fallback: u16) -> std::io::Result<TcpListener> {
    let mut attempt = 0;
    loop {
        let addr = format!("{}:{}", host, port.saturating_add(attempt));
        match TcpListener::bind(&addr).await {
            Ok(listener) => return Ok(listener),
            Err(e) if e.kind() == std::io::ErrorKind::AddrInUse && attempt < fallback => {
                tracing::warn!("{} is in use, trying the next port", addr);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // an ephemeral port whose successor is free, so the fallback has somewhere to go
    async fn held_port() -> (TcpListener, u16) {
        loop {
            let held = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let port = held.local_addr().unwrap().port();
            if port == u16::MAX {
                continue;
            }
            if TcpListener::bind(("127.0.0.1", port + 1)).await.is_ok() {
                return (held, port);
            }
        }
    }

    #[tokio::test]
    async fn taken_port_fails_fast_without_fallback() {
        let (_held, port) = held_port().await;

        let err = bind("127.0.0.1", port, 0).await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::AddrInUse);
    }

    #[tokio::test]
    async fn fallback_moves_to_next_port() {
        let (_held, port) = held_port().await;

        let listener = bind("127.0.0.1", port, 1).await.unwrap();
        assert_eq!(listener.local_addr().unwrap().port(), port + 1);
    }

    #[tokio::test]
    async fn free_port_binds_directly() {
        let (held, port) = held_port().await;
        drop(held);

        let listener = bind("127.0.0.1", port, 3).await.unwrap();
        assert_eq!(listener.local_addr().unwrap().port(), port);
    }
}
