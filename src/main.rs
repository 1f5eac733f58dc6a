use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use socket2::{Domain, Protocol, Socket, Type};
use std::sync::Arc;
use tokio::net::TcpListener;

mod config;
mod events;
mod handler;
mod http;
mod logger;

use events::EventKind;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    // One logical worker: requests interleave at await points but never run
    // in parallel, so no shared mutable state needs locking.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let listener = create_reusable_listener(addr)?;

    // Context object: subscriber registry, route table, upstream client.
    // Built before the listener accepts, read-only thereafter.
    let state = Arc::new(config::AppState::new(&cfg));

    logger::log_server_start(&addr, &cfg);
    state.bus.publish(
        EventKind::Log,
        &format!("Server is listening on port {}", addr.port()),
    );

    // Use LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    local.run_until(serve(listener, state)).await
}

async fn serve(
    listener: TcpListener,
    state: Arc<config::AppState>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        match listener.accept().await {
            Ok((stream, _peer_addr)) => {
                let state = Arc::clone(&state);
                tokio::task::spawn_local(async move {
                    let io = TokioIo::new(stream);
                    let conn = http1::Builder::new().serve_connection(
                        io,
                        service_fn(move |req| {
                            let state = Arc::clone(&state);
                            async move { handler::handle_request(req, state).await }
                        }),
                    );
                    if let Err(err) = conn.await {
                        logger::log_connection_error(&err);
                    }
                });
            }
            Err(err) => logger::log_accept_error(&err),
        }
    }
}

/// Create a `TcpListener` with `SO_REUSEADDR` enabled, so the fixed port can
/// be rebound immediately after a restart instead of waiting out TIME_WAIT.
fn create_reusable_listener(addr: std::net::SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;

    // Non-blocking mode for async compatibility
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
