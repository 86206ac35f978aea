//! In-process object store for integration tests
//!
//! Serves path-style `GET`/`PUT /{bucket}/{key}` over plain HTTP/1.1, one
//! request per connection.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Clone, Default)]
pub struct MockStore {
    objects: Arc<Mutex<HashMap<String, String>>>,
    authorizations: Arc<Mutex<Vec<String>>>,
    reject_puts: bool,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object at `{bucket}/{key}`
    pub fn with_object(self, path: &str, body: &str) -> Self {
        self.objects
            .lock()
            .unwrap()
            .insert(path.to_string(), body.to_string());
        self
    }

    /// Answer every upload with 403
    pub fn rejecting_puts(mut self) -> Self {
        self.reject_puts = true;
        self
    }

    pub fn object(&self, path: &str) -> Option<String> {
        self.objects.lock().unwrap().get(path).cloned()
    }

    /// `Authorization` header of every request received so far
    pub fn authorizations(&self) -> Vec<String> {
        self.authorizations.lock().unwrap().clone()
    }

    /// Start serving on an ephemeral port and return the base URL
    pub async fn serve(&self) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let store = self.clone();

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let store = store.clone();
                tokio::spawn(async move { store.handle(stream).await });
            }
        });

        format!("http://{}", addr)
    }

    async fn handle(&self, mut stream: TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        let header_end = loop {
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
            match stream.read(&mut chunk).await {
                Ok(0) | Err(_) => return,
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let mut lines = head.lines();
        let mut request_line = lines.next().unwrap_or_default().split_whitespace();
        let method = request_line.next().unwrap_or_default().to_string();
        let path = request_line.next().unwrap_or_default().to_string();

        let mut content_length = 0;
        for line in lines {
            let Some((name, value)) = line.split_once(':') else {
                continue;
            };
            match name.trim().to_ascii_lowercase().as_str() {
                "content-length" => content_length = value.trim().parse().unwrap_or(0),
                "authorization" => self
                    .authorizations
                    .lock()
                    .unwrap()
                    .push(value.trim().to_string()),
                _ => {}
            }
        }

        while buf.len() < header_end + content_length {
            match stream.read(&mut chunk).await {
                Ok(0) | Err(_) => return,
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
            }
        }
        let body = String::from_utf8_lossy(&buf[header_end..header_end + content_length]).to_string();

        let key = path.trim_start_matches('/').to_string();
        let (status, reply) = match method.as_str() {
            "GET" => match self.object(&key) {
                Some(object) => ("200 OK", object),
                None => ("404 Not Found", "NoSuchKey".to_string()),
            },
            "PUT" if self.reject_puts => ("403 Forbidden", "AccessDenied".to_string()),
            "PUT" => {
                self.objects.lock().unwrap().insert(key, body);
                ("200 OK", String::new())
            }
            _ => ("405 Method Not Allowed", String::new()),
        };

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reply.len(),
            reply
        );
        let _ = stream.write_all(response.as_bytes()).await;
        let _ = stream.shutdown().await;
    }
}
