use std::net::{IpAddr, Ipv4Addr, UdpSocket};

/// Any routable address works; `connect` on UDP only selects a route.
const PROBE_TARGET: &str = "8.8.8.8:80";

/// The address other machines on the LAN can reach this host at.
///
/// Connecting a UDP socket sends nothing; it makes the OS pick the outgoing
/// interface, whose address is then read back. Falls back to loopback when
/// there is no route.
pub fn local_ip() -> IpAddr {
    match probe_route() {
        Ok(ip) if !ip.is_unspecified() => ip,
        Ok(_) => {
            tracing::debug!("route probe returned an unspecified address, using loopback");
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        }
        Err(e) => {
            tracing::debug!("route probe failed ({e}), using loopback");
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        }
    }
}

fn probe_route() -> std::io::Result<IpAddr> {
    let sock = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    sock.connect(PROBE_TARGET)?;
    Ok(sock.local_addr()?.ip())
}
