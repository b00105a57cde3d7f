//! Shared fixtures for scenmeta-download integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use zip::write::SimpleFileOptions;

/// Build an in-memory zip archive from `(name, contents)` pairs.
pub fn zip_fixture(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .expect("start zip entry");
        writer.write_all(contents.as_bytes()).expect("write zip entry");
    }
    writer.finish().expect("finish zip").into_inner()
}

/// A canned HTTP response served by [`serve`].
#[derive(Clone)]
pub struct Canned {
    pub status: u16,
    pub body: Vec<u8>,
    /// Overrides the advertised Content-Length.
    pub content_length: Option<usize>,
}

impl Canned {
    pub fn ok(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            body,
            content_length: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: b"not here".to_vec(),
            content_length: None,
        }
    }
}

/// Serve `response` to every connection on a loopback port.
///
/// Returns the base URL; the listener task lives until the runtime shuts down.
pub async fn serve(response: Canned) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind loopback");
    let addr: SocketAddr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            let response = response.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0_u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }

                let length = response.content_length.unwrap_or(response.body.len());
                let head = format!(
                    "HTTP/1.1 {} Fixture\r\nContent-Type: application/zip\r\nContent-Length: {length}\r\nConnection: close\r\n\r\n",
                    response.status
                );
                let _ = stream.write_all(head.as_bytes()).await;
                let _ = stream.write_all(&response.body).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    format!("http://{addr}")
}
