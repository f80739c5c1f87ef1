#![allow(dead_code)]

pub mod http {
    use std::io::{Read, Write};
    use std::net::{SocketAddr, TcpStream};
    use std::time::Duration;

    /// Write a raw HTTP request and read until the server closes or goes quiet.
    pub fn send_request(addr: &SocketAddr, req: &str) -> String {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(req.as_bytes()).unwrap();
        stream
            .set_read_timeout(Some(Duration::from_millis(2000)))
            .unwrap();
        let mut buf = Vec::new();
        loop {
            let mut tmp = [0u8; 1024];
            match stream.read(&mut tmp) {
                Ok(0) => break,
                Ok(n) => buf.extend_from_slice(&tmp[..n]),
                Err(ref e)
                    if e.kind() == std::io::ErrorKind::WouldBlock
                        || e.kind() == std::io::ErrorKind::TimedOut =>
                {
                    break
                }
                Err(e) => panic!("read error: {:?}", e),
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Split a raw response into (status, headers, body).
    pub fn parse_response(resp: &str) -> (u16, Vec<(String, String)>, String) {
        let (head, body) = resp.split_once("\r\n\r\n").unwrap_or((resp, ""));
        let mut status = 0;
        let mut headers = Vec::new();
        for line in head.lines() {
            if line.starts_with("HTTP/1.") {
                status = line
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or("0")
                    .parse()
                    .unwrap();
            } else if let Some((name, val)) = line.split_once(':') {
                headers.push((name.trim().to_ascii_lowercase(), val.trim().to_string()));
            }
        }
        (status, headers, body.to_string())
    }

    pub fn header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
        headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub mod routes {
    /// The zoo route table used across the integration tests.
    pub const ZOO_YAML: &str = r#"
methods: [GET, POST, PUT, PATCH, DELETE, HEAD, OPTIONS, TRACE]
middleware: [request_id]
routes:
  - { method: GET, path: "/", handler: root_handler }
  - { method: GET, path: /zoo/animals, handler: get_animals }
  - { method: POST, path: /zoo/animals, handler: create_animal }
  - { method: GET, path: "/zoo/animals/:id", handler: get_animal }
  - { method: PUT, path: "/zoo/animals/:id", handler: update_animal }
  - { method: PATCH, path: "/zoo/animals/:id", handler: patch_animal }
  - { method: DELETE, path: "/zoo/animals/:id", handler: delete_animal }
  - { method: HEAD, path: /zoo/health, handler: health_check }
  - { method: OPTIONS, path: /zoo/health, handler: supported_ops }
  - { method: TRACE, path: /zoo/health, handler: trace_route }
groups:
  - prefix: /api/v1
    middleware: [tracing]
    routes:
      - { method: GET, path: "/users/:user_id/posts/:post_id", handler: get_post }
"#;
}
