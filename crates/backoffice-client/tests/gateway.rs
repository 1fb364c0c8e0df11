use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

use backoffice_client::*;
use serde_json::json;

/// Answers exactly one request with `status_line` and `body`, returning the raw request.
fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        request
    });

    (format!("http://{addr}"), handle)
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let content_length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

#[test]
fn get_returns_status_and_body() {
    let (base, server) = serve_once("200 OK", r#"{"data":[{"id":1,"name":"Acme"}]}"#);
    let client = Client::new(ClientConfig::new(base));

    let response = client.get("buyers?page=1&page_size=1").unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.into_data(), json!([{ "id": 1, "name": "Acme" }]));

    let request = server.join().unwrap();
    assert!(
        request.starts_with("GET /api/v1/buyers?page=1&page_size=1 HTTP/1.1"),
        "{request}"
    );
}

#[test]
fn post_sends_json_body() {
    let (base, server) = serve_once("201 Created", r#"{"data":{"id":9}}"#);
    let client = Client::new(ClientConfig::new(base));

    let response = client
        .post("categories", &json!({ "name": "Garden" }))
        .unwrap();
    assert_eq!(response.data(), Some(&json!({ "id": 9 })));

    let request = server.join().unwrap();
    let lower = request.to_ascii_lowercase();
    assert!(request.starts_with("POST /api/v1/categories"), "{request}");
    assert!(lower.contains("content-type: application/json"), "{request}");
    assert!(request.ends_with(r#"{"name":"Garden"}"#), "{request}");
}

#[test]
fn not_found_is_status_error() {
    let (base, server) = serve_once("404 Not Found", r#"{"error":"no such seller"}"#);
    let client = Client::new(ClientConfig::new(base));

    let err = client.get("sellers/404").unwrap_err();
    assert_eq!(err.status(), Some(404));
    server.join().unwrap();
}

#[test]
fn unauthorized_marks_session() {
    let (base, server) = serve_once("401 Unauthorized", r#"{"error":"session expired"}"#);
    let client = Client::new(ClientConfig::new(base));

    match client.get("buyers") {
        Err(ClientError::AuthExpired(response)) => {
            assert_eq!(response.status, 401);
            assert_eq!(response.body, json!({ "error": "session expired" }));
        }
        other => panic!("expected auth expired, got {other:?}"),
    }
    assert!(client.session().is_logged_out());
    server.join().unwrap();
}

#[test]
fn unreachable_server_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = Client::new(ClientConfig::new(format!("http://{addr}")));
    assert!(matches!(client.get("buyers"), Err(ClientError::Network(_))));
}
