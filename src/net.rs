// Network bring-up
//
// The robot is unreachable without a routable address, so startup blocks
// until one exists. Connecting a UDP socket toward a public address picks
// the outbound interface without sending any traffic; the socket's local
// address is the one a browser on the LAN can reach.

use std::net::{IpAddr, Ipv4Addr, UdpSocket};

use tokio::time::sleep;
use tracing::{debug, info};

use crate::config::{NET_ATTEMPTS, NET_RETRY_INTERVAL};

#[derive(Debug, thiserror::Error)]
pub enum NetError {
    #[error("no routable address after {attempts} attempts")]
    NoAddress { attempts: u32 },
}

/// Block until the host has a routable local address, bounded by the retry
/// budget in `config`. Exhausting the budget is fatal to the caller: there
/// is no meaningful "serve with no address" state.
pub async fn wait_for_address() -> Result<IpAddr, NetError> {
    info!("Waiting for network...");
    for attempt in 1..=NET_ATTEMPTS {
        if let Some(addr) = local_address() {
            return Ok(addr);
        }
        debug!("No routable address yet (attempt {})", attempt);
        sleep(NET_RETRY_INTERVAL).await;
    }
    Err(NetError::NoAddress {
        attempts: NET_ATTEMPTS,
    })
}

/// The address the default route would use, if any
fn local_address() -> Option<IpAddr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).ok()?;
    socket.connect((Ipv4Addr::new(8, 8, 8, 8), 53)).ok()?;
    let addr = socket.local_addr().ok()?.ip();
    if addr.is_loopback() || addr.is_unspecified() {
        None
    } else {
        Some(addr)
    }
}
