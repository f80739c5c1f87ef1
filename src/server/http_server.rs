use std::borrow::Cow;
use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tiny_http::{Header, Request, Response, Server};
use tracing::{debug, error, info, warn};

use super::response::HandlerResponse;
use super::service::AppService;
use crate::ids::RequestId;

/// Blocking HTTP front end for an [`AppService`].
///
/// A fixed pool of worker threads pulls requests off one listener and resolves them
/// against the shared, read-only service.
pub struct HttpServer(pub Arc<AppService>);

/// Handle to a running HTTP server
pub struct ServerHandle {
    addr: SocketAddr,
    server: Arc<Server>,
    shutdown: Arc<AtomicBool>,
    workers: Vec<JoinHandle<()>>,
}

impl ServerHandle {
    /// Address the listener is bound to (useful with port `0`).
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Poll the listener until it accepts connections.
    ///
    /// # Errors
    ///
    /// Returns `TimedOut` if the server is not reachable after ~250ms.
    pub fn wait_ready(&self) -> io::Result<()> {
        for _ in 0..50 {
            if TcpStream::connect(self.addr).is_ok() {
                return Ok(());
            }
            thread::sleep(Duration::from_millis(5));
        }
        Err(io::Error::new(io::ErrorKind::TimedOut, "server not ready"))
    }

    /// Stop accepting requests and wait for every worker to exit.
    pub fn stop(self) {
        self.shutdown.store(true, Ordering::SeqCst);
        for _ in &self.workers {
            self.server.unblock();
        }
        for worker in self.workers {
            if worker.join().is_err() {
                warn!("HTTP worker panicked during shutdown");
            }
        }
        info!(addr = %self.addr, "HTTP server stopped");
    }

    /// Block until every worker exits.
    ///
    /// # Errors
    ///
    /// Returns the panic payload of the first worker that panicked.
    pub fn join(self) -> thread::Result<()> {
        for worker in self.workers {
            worker.join()?;
        }
        Ok(())
    }
}

impl HttpServer {
    /// Bind `addr` and start `workers` threads (at least one).
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be resolved or bound.
    pub fn start(self, addr: &str, workers: usize) -> io::Result<ServerHandle> {
        let bind_addr = addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no socket address"))?;

        let server = Server::http(bind_addr).map_err(io::Error::other)?;
        let local_addr = server.server_addr().to_ip().unwrap_or(bind_addr);
        let server = Arc::new(server);
        let shutdown = Arc::new(AtomicBool::new(false));

        let workers = (0..workers.max(1))
            .map(|worker_id| {
                let server = Arc::clone(&server);
                let service = Arc::clone(&self.0);
                let shutdown = Arc::clone(&shutdown);
                thread::Builder::new()
                    .name(format!("segrouter-http-{worker_id}"))
                    .spawn(move || worker_loop(&server, &service, &shutdown))
            })
            .collect::<io::Result<Vec<_>>>()?;

        info!(addr = %local_addr, workers = workers.len(), "HTTP server listening");

        Ok(ServerHandle {
            addr: local_addr,
            server,
            shutdown,
            workers,
        })
    }
}

fn worker_loop(server: &Server, service: &AppService, shutdown: &AtomicBool) {
    while !shutdown.load(Ordering::SeqCst) {
        let request = match server.recv() {
            Ok(request) => request,
            // `unblock` during shutdown surfaces here as an error
            Err(_) if shutdown.load(Ordering::SeqCst) => break,
            Err(err) => {
                error!(error = %err, "Failed to receive request");
                continue;
            }
        };
        if shutdown.load(Ordering::SeqCst) {
            break;
        }
        serve_request(service, request);
    }
}

fn serve_request(service: &AppService, request: Request) {
    let method = request.method().to_string();
    let path = request_path(request.url()).into_owned();
    let request_id = RequestId::from_headers(
        request
            .headers()
            .iter()
            .map(|h| (h.field.as_str().as_str(), h.value.as_str())),
    )
    .unwrap_or_default();

    let response = service.handle_with_id(&method, &path, request_id);
    debug!(method = %method, path = %path, status = response.status, "Responding");

    if let Err(err) = request.respond(to_tiny_response(&response)) {
        warn!(error = %err, method = %method, path = %path, "Failed to write response");
    }
}

/// Path component of the request target, percent-decoded.
///
/// Decoding happens before splitting, so `%2F` becomes a segment separator. A path that
/// does not decode to UTF-8 is routed as sent.
fn request_path(url: &str) -> Cow<'_, str> {
    let raw = strip_query(url);
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded,
        Err(err) => {
            debug!(path = %raw, error = %err, "Path is not valid UTF-8 once decoded");
            Cow::Borrowed(raw)
        }
    }
}

fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}

fn to_tiny_response(response: &HandlerResponse) -> Response<io::Cursor<Vec<u8>>> {
    // `from_string` would add its own text/plain content type
    let mut out =
        Response::from_data(response.body_string().into_bytes()).with_status_code(response.status);
    if let Ok(content_type) = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        out.add_header(content_type);
    }
    for (name, value) in &response.headers {
        match Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            Ok(header) => out.add_header(header),
            Err(()) => warn!(header = %name, "Skipping invalid response header"),
        }
    }
    out
}
