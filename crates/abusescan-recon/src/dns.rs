//! Forward resolution to a single IPv4 address.

use crate::error::{ReconError, ReconResult};
use async_trait::async_trait;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use tracing::debug;

/// Resolves a hostname or IP literal to the one IPv4 address that gets checked
#[async_trait]
pub trait Resolve: Send + Sync {
    /// Resolve `target` to its first IPv4 address.
    ///
    /// An IPv4 literal comes back unchanged without a lookup.
    async fn resolve_ipv4(&self, target: &str) -> ReconResult<Ipv4Addr>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}

/// First IPv4 entry of a lookup result, in the order the resolver returned it
pub fn first_ipv4(addrs: impl IntoIterator<Item = IpAddr>) -> Option<Ipv4Addr> {
    addrs.into_iter().find_map(|ip| match ip {
        IpAddr::V4(v4) => Some(v4),
        IpAddr::V6(v6) => v6.to_ipv4_mapped(),
    })
}

/// Handle targets that need no lookup. `Ok(None)` means "go ask the resolver".
fn literal(target: &str) -> ReconResult<Option<Ipv4Addr>> {
    if target.is_empty() {
        return Err(ReconError::Dns("empty hostname".into()));
    }
    if let Ok(v4) = target.parse::<Ipv4Addr>() {
        return Ok(Some(v4));
    }
    if let Ok(v6) = target.parse::<Ipv6Addr>() {
        return v6
            .to_ipv4_mapped()
            .map(Some)
            .ok_or_else(|| ReconError::NoIpv4Address(target.to_string()));
    }
    Ok(None)
}

/// Resolver backed by the operating system (`getaddrinfo`)
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

impl SystemResolver {
    /// Create a resolver using the system configuration
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Resolve for SystemResolver {
    async fn resolve_ipv4(&self, target: &str) -> ReconResult<Ipv4Addr> {
        let target = target.trim();
        if let Some(ip) = literal(target)? {
            return Ok(ip);
        }

        // Port 0 only satisfies the socket address API
        let addrs = tokio::net::lookup_host((target, 0))
            .await
            .map_err(|e| ReconError::Dns(format!("{target}: {e}")))?;

        let ip = first_ipv4(addrs.map(|a| a.ip()))
            .ok_or_else(|| ReconError::NoIpv4Address(target.to_string()))?;
        debug!(host = target, %ip, "resolved via system resolver");
        Ok(ip)
    }

    fn name(&self) -> &'static str {
        "system"
    }
}

#[cfg(feature = "hickory")]
pub use hickory_backend::DnsResolver;

#[cfg(feature = "hickory")]
mod hickory_backend {
    use super::{first_ipv4, literal, Resolve};
    use crate::error::{ReconError, ReconResult};
    use async_trait::async_trait;
    use hickory_resolver::TokioResolver;
    use std::net::Ipv4Addr;
    use tracing::debug;

    /// Resolver that queries the nameservers from the system configuration
    /// directly, bypassing the hosts file and nsswitch
    pub struct DnsResolver {
        inner: TokioResolver,
    }

    impl DnsResolver {
        /// Create a resolver from the system's `resolv.conf`
        pub fn new() -> ReconResult<Self> {
            let inner = TokioResolver::builder_tokio()
                .map_err(|e| ReconError::Setup(format!("failed to create resolver: {e}")))?
                .build();
            Ok(Self { inner })
        }
    }

    #[async_trait]
    impl Resolve for DnsResolver {
        async fn resolve_ipv4(&self, target: &str) -> ReconResult<Ipv4Addr> {
            let target = target.trim();
            if let Some(ip) = literal(target)? {
                return Ok(ip);
            }

            let response = self
                .inner
                .lookup_ip(target)
                .await
                .map_err(|e| ReconError::Dns(format!("{target}: {e}")))?;

            let ip = first_ipv4(response.iter())
                .ok_or_else(|| ReconError::NoIpv4Address(target.to_string()))?;
            debug!(host = target, %ip, "resolved via hickory");
            Ok(ip)
        }

        fn name(&self) -> &'static str {
            "dns"
        }
    }
}
