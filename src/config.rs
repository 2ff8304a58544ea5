use std::net::SocketAddr;

use anyhow::{Context, Result, bail};

use crate::proxy_handler::DEFAULT_UPSTREAM_URL;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    Static,
    Proxy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeMode {
    Lambda,
    Http,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub handler: HandlerKind,
    pub mode: ServeMode,
    pub bind: SocketAddr,
    pub upstream_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let handler = match lookup("CAMBIO_HANDLER").as_deref() {
            None | Some("static") => HandlerKind::Static,
            Some("proxy") => HandlerKind::Proxy,
            Some(other) => bail!("Unknown CAMBIO_HANDLER: {}", other),
        };

        let mode = match lookup("CAMBIO_MODE").as_deref() {
            Some("lambda") => ServeMode::Lambda,
            Some("http") => ServeMode::Http,
            Some(other) => bail!("Unknown CAMBIO_MODE: {}", other),
            None if lookup("AWS_LAMBDA_RUNTIME_API").is_some() => ServeMode::Lambda,
            None => ServeMode::Http,
        };

        let bind = lookup("CAMBIO_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind: SocketAddr = bind
            .parse()
            .with_context(|| format!("Invalid CAMBIO_BIND: {}", bind))?;

        let upstream_url =
            lookup("CAMBIO_UPSTREAM_URL").unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string());

        Ok(Self {
            handler,
            mode,
            bind,
            upstream_url,
        })
    }
}
