//! Host and process identity.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::OnceLock;

use rand::{rngs::OsRng, RngCore};

use crate::Result;

static DEFAULT_HOST: OnceLock<u32> = OnceLock::new();

/// Returns the default 32-bit host identity of this process, for examination.
///
/// The value is derived once from the network interfaces and cached for the life of the process:
/// the first global-unicast IPv4 address, else the low 32 bits of the first IPv6 address, else 32
/// random bits when no usable address exists.
///
/// # Errors
///
/// Returns an error only if no address is available and the system random source fails.
///
/// # Examples
///
/// ```rust
/// let addr = acuid::check_addr()?;
/// println!("{}", std::net::Ipv4Addr::from(addr));
/// # Ok::<(), acuid::Error>(())
/// ```
pub fn check_addr() -> Result<u32> {
    if let Some(host) = DEFAULT_HOST.get() {
        return Ok(*host);
    }
    let host = resolve()?;
    Ok(*DEFAULT_HOST.get_or_init(|| host))
}

/// Returns the low 16 bits of the operating system process id.
pub(crate) fn default_pid() -> u16 {
    std::process::id() as u16
}

fn resolve() -> Result<u32> {
    let addrs = match if_addrs::get_if_addrs() {
        Ok(ifaces) => ifaces
            .into_iter()
            .filter(|iface| !iface.is_loopback())
            .map(|iface| iface.ip())
            .collect(),
        Err(err) => {
            tracing::warn!(error = %err, "could not list network interfaces");
            Vec::new()
        }
    };

    if let Some(host) = select_host(addrs) {
        tracing::debug!(host = %Ipv4Addr::from(host), "resolved host identity");
        return Ok(host);
    }

    let mut bytes = [0u8; 4];
    OsRng.try_fill_bytes(&mut bytes)?;
    tracing::warn!("no usable network address; using a random host identity");
    Ok(u32::from_be_bytes(bytes))
}

/// Picks the host identity from a list of interface addresses.
///
/// IPv4 wins over IPv6, and within a family a global-unicast address wins over any other
/// non-loopback address. The first address of the winning kind is used.
fn select_host(addrs: impl IntoIterator<Item = IpAddr>) -> Option<u32> {
    let mut v4: Option<Ipv4Addr> = None;
    let mut v6: Option<Ipv6Addr> = None;

    for addr in addrs {
        let addr = match addr {
            IpAddr::V6(ip) => ip.to_ipv4_mapped().map_or(addr, IpAddr::V4),
            IpAddr::V4(_) => addr,
        };
        match addr {
            IpAddr::V4(ip) => prefer(&mut v4, ip, is_global_unicast_v4),
            IpAddr::V6(ip) => prefer(&mut v6, ip, is_global_unicast_v6),
        }
    }

    v4.map(u32::from).or_else(|| {
        v6.map(|ip| {
            let o = ip.octets();
            u32::from_be_bytes([o[12], o[13], o[14], o[15]])
        })
    })
}

fn prefer<T: Copy>(slot: &mut Option<T>, candidate: T, is_global: fn(&T) -> bool) {
    let replace = match slot {
        None => true,
        Some(current) => !is_global(current) && is_global(&candidate),
    };
    if replace {
        *slot = Some(candidate);
    }
}

fn is_global_unicast_v4(ip: &Ipv4Addr) -> bool {
    !(ip.is_unspecified()
        || ip.is_loopback()
        || ip.is_multicast()
        || ip.is_link_local()
        || ip.is_broadcast())
}

fn is_global_unicast_v6(ip: &Ipv6Addr) -> bool {
    let link_local = ip.segments()[0] & 0xffc0 == 0xfe80;
    !(ip.is_unspecified() || ip.is_loopback() || ip.is_multicast() || link_local)
}
