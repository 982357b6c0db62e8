//! Synchronous client for the local REST API of a Philips Hue bridge.
//!
//! The bridge is addressed by its local IP and an access token ("username")
//! that has to be obtained once, out of band:
//!
//! 1. Visit <https://discovery.meethue.com/> to learn the bridge's local IP
//!    address, e.g. `{"id":"001788fffea44e06","internalipaddress":"192.168.1.244","port":443}`.
//! 2. Press the link button on the bridge.
//! 3. Within 30 seconds, send `POST https://<ip>/api` with the body
//!    `{"devicetype":"<name of your app>"}`. The answer
//!    `[{"success":{"username":"<token>"}}]` carries the long-lived token.
//!
//! With address and token at hand, a [`Bridge`] fetches the bridge's lights
//! once and lets you inspect and switch them:
//!
//! ```no_run
//! use huelight::Bridge;
//!
//! fn main() -> huelight::Result<()> {
//!     // Hue bridges serve a self-signed certificate, so accepting
//!     // it has to be opted into explicitly.
//!     let mut bridge = Bridge::builder("192.168.1.244", "my-token")
//!         .accept_invalid_certs(true)
//!         .connect()?;
//!     let desk = bridge.light_by_name("desk")?.clone();
//!     if !desk.is_on()? {
//!         bridge.turn_on(&desk)?;
//!     }
//!     Ok(())
//! }
//! ```
#[macro_use]
extern crate serde_derive;
pub mod error;
pub use error::{Error, Result};
pub mod lights;
pub use lights::{Light, LightState};
pub mod bridge;
pub use bridge::{Bridge, BridgeBuilder};
