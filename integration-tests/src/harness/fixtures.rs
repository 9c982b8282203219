use std::net::SocketAddr;
use std::path::PathBuf;

pub fn fixture_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(file)
}

/// A request as a server would hand it over: the peer address in the
/// extensions and zero or more `X-Forwarded-For` lines.
pub fn request(peer: Option<&str>, forwarded_for: &[&str]) -> http::Request<()> {
    let mut builder = http::Request::builder().uri("/api");
    for value in forwarded_for {
        builder = builder.header("x-forwarded-for", *value);
    }

    let mut req = builder.body(()).expect("valid request");
    if let Some(peer) = peer {
        let addr: SocketAddr = peer.parse().expect("peer must be ip:port");
        req.extensions_mut().insert(addr);
    }
    req
}
