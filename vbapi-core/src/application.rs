// Application bootstrapper and HTTP server

use crate::{Error, HttpRequest, HttpResponse, Router};
use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, body::Incoming as IncomingBody};
use hyper_util::rt::TokioIo;
use hyper_util::server::graceful::GracefulShutdown;
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

/// Default request body limit (64 KiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// How long shutdown waits for open connections before giving up
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Pause after a failed accept, so fd exhaustion does not spin the loop
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// The main application struct
pub struct Application {
    router: Arc<Router>,
    max_body_bytes: usize,
}

impl Application {
    /// Create an application serving `router`
    pub fn new(router: Router) -> Self {
        Self {
            router: Arc::new(router),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Set the request body limit in bytes
    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    /// Bind `addr` and serve until Ctrl-C or SIGTERM
    pub async fn listen(self, addr: SocketAddr) -> Result<(), Error> {
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve connections from `listener` until `shutdown` resolves, then
    /// drain the open connections.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), Error>
    where
        F: Future<Output = ()> + Send,
    {
        let local_addr = listener.local_addr()?;
        info!(address = %local_addr, "Server listening");

        let graceful = GracefulShutdown::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(connection) => connection,
                        Err(err) => {
                            accept_backoff(&err).await;
                            continue;
                        }
                    };

                    let router = self.router.clone();
                    let limit = self.max_body_bytes;
                    let service = service_fn(move |req: Request<IncomingBody>| {
                        let router = router.clone();
                        async move { handle_request(req, router, limit).await }
                    });

                    let connection = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service);
                    let connection = graceful.watch(connection);

                    tokio::spawn(async move {
                        if let Err(err) = connection.await {
                            debug!(peer = %peer, error = %err, "Error serving connection");
                        }
                    });
                }
                () = &mut shutdown => {
                    info!("Shutdown signal received, draining connections");
                    break;
                }
            }
        }

        drop(listener);

        tokio::select! {
            () = graceful.shutdown() => info!("Server stopped"),
            () = tokio::time::sleep(SHUTDOWN_GRACE) => {
                warn!(grace_secs = SHUTDOWN_GRACE.as_secs(), "Timed out waiting for connections to close");
            }
        }

        Ok(())
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

async fn accept_backoff(err: &std::io::Error) {
    warn!(
        error = %err,
        retry_ms = ACCEPT_BACKOFF.as_millis() as u64,
        "Failed to accept connection"
    );
    tokio::time::sleep(ACCEPT_BACKOFF).await;
}

/// Handle an incoming HTTP request
async fn handle_request(
    req: Request<IncomingBody>,
    router: Arc<Router>,
    max_body_bytes: usize,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (parts, body) = req.into_parts();

    let path = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| parts.uri.path().to_string());
    let mut request = HttpRequest::new(parts.method.as_str(), path);

    for (name, value) in &parts.headers {
        if let Ok(value) = value.to_str() {
            request.headers.insert(name.to_string(), value.to_string());
        }
    }

    let method = request.method.clone();
    let route_path = request.route_path().to_string();

    let response = match Limited::new(body, max_body_bytes).collect().await {
        Ok(collected) => {
            request.body = collected.to_bytes().to_vec();
            router.handle(request).await
        }
        Err(err) if err.downcast_ref::<LengthLimitError>().is_some() => {
            Error::PayloadTooLarge(format!("request body exceeds {} bytes", max_body_bytes))
                .into_response()
        }
        Err(err) => Error::BadRequest(format!("failed to read request body: {}", err))
            .into_response(),
    };

    info!(
        method = %method,
        path = %route_path,
        status = response.status,
        elapsed_us = started.elapsed().as_micros() as u64,
        "Handled request"
    );

    Ok(into_hyper_response(response))
}

fn into_hyper_response(response: HttpResponse) -> Response<Full<Bytes>> {
    let mut builder = Response::builder().status(response.status);
    for (key, value) in &response.headers {
        builder = builder.header(key.as_str(), value.as_str());
    }

    builder
        .body(Full::new(Bytes::from(response.body)))
        .unwrap_or_else(|err| {
            warn!(error = %err, "Failed to build response");
            let mut fallback = Response::new(Full::new(Bytes::new()));
            *fallback.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        })
}
