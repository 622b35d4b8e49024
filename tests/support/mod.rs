//! One-process fake of the Figma REST API for integration tests.

#![allow(dead_code)]

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct Route {
    pub path_prefix: &'static str,
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
}

impl Route {
    pub fn json(path_prefix: &'static str, status: u16, body: serde_json::Value) -> Self {
        Self {
            path_prefix,
            status,
            headers: vec![("Content-Type", "application/json".to_string())],
            body: body.to_string(),
        }
    }

    pub fn with_header(mut self, name: &'static str, value: &str) -> Self {
        self.headers.push((name, value.to_string()));
        self
    }
}

/// Serve `routes` on an ephemeral port until the runtime shuts down.
/// Returns the base URL. Unmatched paths get a 404.
pub async fn serve(routes: Vec<Route>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let routes = routes.clone();
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }
                let request = String::from_utf8_lossy(&buf);
                let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();

                let route = routes.iter().find(|r| path.starts_with(r.path_prefix));
                let response = match route {
                    Some(route) => render(route),
                    None => render(&Route::json(
                        "",
                        404,
                        serde_json::json!({ "status": 404, "err": "Not found" }),
                    )),
                };
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{addr}")
}

fn render(route: &Route) -> String {
    let mut head = format!("HTTP/1.1 {} {}\r\n", route.status, reason(route.status));
    for (name, value) in &route.headers {
        head.push_str(&format!("{name}: {value}\r\n"));
    }
    head.push_str(&format!(
        "Content-Length: {}\r\nConnection: close\r\n\r\n",
        route.body.len()
    ));
    head + &route.body
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        403 => "Forbidden",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// A document with one canvas and two frames, one of them off to the negative side.
pub fn sample_document() -> serde_json::Value {
    serde_json::json!({
        "name": "Marketing Site",
        "lastModified": "2024-05-01T10:00:00Z",
        "version": "42",
        "document": {
            "id": "0:0",
            "name": "Document",
            "type": "DOCUMENT",
            "children": [{
                "id": "0:1",
                "name": "Page 1",
                "type": "CANVAS",
                "backgroundColor": { "r": 0.898, "g": 0.898, "b": 0.898, "a": 1 },
                "children": [
                    {
                        "id": "1:2",
                        "name": "Home",
                        "type": "FRAME",
                        "absoluteBoundingBox": { "x": -100, "y": 0, "width": 1440, "height": 900 },
                        "backgroundColor": { "r": 1, "g": 1, "b": 1, "a": 1 },
                        "children": [
                            {
                                "id": "1:3",
                                "name": "Headline",
                                "type": "TEXT",
                                "characters": "Hi",
                                "style": { "fontSize": 24 },
                                "fills": [{ "type": "SOLID", "color": { "r": 0, "g": 0, "b": 0, "a": 1 } }],
                                "absoluteBoundingBox": { "x": 40, "y": 60, "width": 300, "height": 40 }
                            },
                            {
                                "id": "1:4",
                                "name": "Hero Box",
                                "type": "RECTANGLE",
                                "fills": [{ "type": "SOLID", "color": { "r": 1, "g": 0, "b": 0, "a": 1 } }],
                                "absoluteBoundingBox": { "x": 40, "y": 120, "width": 600, "height": 300 }
                            },
                            { "id": "1:5", "name": "Group", "type": "GROUP" }
                        ]
                    },
                    {
                        "id": "2:1",
                        "name": "About",
                        "type": "FRAME",
                        "absoluteBoundingBox": { "x": 1500, "y": 0, "width": 1440, "height": 900 }
                    }
                ]
            }]
        }
    })
}
