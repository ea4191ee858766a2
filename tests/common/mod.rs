use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::mpsc::{self, Receiver};
use std::thread;

/// One-shot HTTP server: answers a single request with `status` and `body`,
/// and hands back the request body it received.
pub struct StubServer {
    pub url: String,
    requests: Receiver<String>,
}

impl StubServer {
    pub fn respond(status: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let url = format!("http://{}/generate", listener.local_addr().unwrap());
        let (tx, rx) = mpsc::channel();
        let status = status.to_string();
        let body = body.to_string();

        thread::spawn(move || {
            let (stream, _) = listener.accept().expect("accept connection");
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap_or(0) == 0 {
                    break;
                }
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap_or(0);
                    }
                }
            }
            let mut request_body = vec![0u8; content_length];
            reader.read_exact(&mut request_body).expect("read request body");
            let _ = tx.send(String::from_utf8_lossy(&request_body).into_owned());

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let mut stream = stream;
            stream.write_all(response.as_bytes()).expect("write response");
            stream.flush().expect("flush response");
        });

        Self { url, requests: rx }
    }

    pub fn request_body(&self) -> serde_json::Value {
        let raw = self.requests.recv().expect("stub server saw a request");
        serde_json::from_str(&raw).expect("request body is JSON")
    }
}

/// URL on a port nothing listens on.
pub fn dead_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/generate")
}
