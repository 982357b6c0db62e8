use std::time::Duration;

use log::{debug, warn};
use reqwest::blocking::Client;
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::lights::{lights_from_value, Light};

/// Configures and creates a [`Bridge`].
///
/// Hue bridges serve a self-signed certificate, so most setups will want
/// [`accept_invalid_certs`](BridgeBuilder::accept_invalid_certs). Older
/// firmware only speaks plain HTTP, which [`https`](BridgeBuilder::https)
/// can select.
pub struct BridgeBuilder {
	address: String,
	token: String,
	https: bool,
	accept_invalid_certs: bool,
	timeout: Option<Duration>,
}

impl BridgeBuilder {
	/// Whether to talk TLS to the bridge. On by default.
	pub fn https(mut self, https: bool) -> Self {
		self.https = https;
		self
	}

	/// Accept the bridge's self-signed certificate. Off by default.
	pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
		self.accept_invalid_certs = accept;
		self
	}

	/// Give up on a request after `timeout`. By default, requests
	/// block until the bridge answers.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}

	/// Creates the client without contacting the bridge.
	///
	/// The light list starts out empty until [`Bridge::refresh`] is called.
	pub fn build(self) -> Result<Bridge> {
		let mut client = Client::builder().danger_accept_invalid_certs(self.accept_invalid_certs);
		if let Some(timeout) = self.timeout {
			client = client.timeout(timeout);
		}
		let scheme = if self.https { "https" } else { "http" };
		Ok(Bridge {
			base: format!("{}://{}/api/{}", scheme, self.address, self.token),
			address: self.address,
			client: client.build()?,
			lights: Vec::new(),
		})
	}

	/// Creates the client and fetches the bridge's light list.
	pub fn connect(self) -> Result<Bridge> {
		let mut bridge = self.build()?;
		bridge.refresh()?;
		Ok(bridge)
	}
}

/// A Hue bridge, addressed by IP and access token.
///
/// The light list is fetched once on [`connect`](Bridge::connect) and kept
/// as a local snapshot. A successful power command patches the snapshot's
/// `on` field; everything else only changes on [`refresh`](Bridge::refresh).
pub struct Bridge {
	address: String,
	base: String,
	client: Client,
	lights: Vec<Light>,
}

impl Bridge {
	/// Starts configuring a client for the bridge at `address`,
	/// authorized by `token`.
	pub fn builder(address: impl Into<String>, token: impl Into<String>) -> BridgeBuilder {
		BridgeBuilder {
			address: address.into(),
			token: token.into(),
			https: true,
			accept_invalid_certs: false,
			timeout: None,
		}
	}

	/// Connects with default settings: HTTPS with certificate
	/// verification and no request timeout.
	pub fn connect(address: impl Into<String>, token: impl Into<String>) -> Result<Bridge> {
		Bridge::builder(address, token).connect()
	}

	/// The bridge's network address.
	pub fn address(&self) -> &str {
		&self.address
	}

	/// The lights known to this client, in the bridge's order.
	/// No network access; possibly stale.
	pub fn lights(&self) -> &[Light] {
		&self.lights
	}

	/// Replaces the light list with a fresh fetch from the bridge.
	pub fn refresh(&mut self) -> Result<()> {
		debug!("fetching lights from bridge {}", self.address);
		let answer: Value = self
			.client
			.get(&format!("{}/lights", self.base))
			.send()?
			.json()?;
		check_bridge_error(&answer)?;
		self.lights = lights_from_value(answer)?;
		debug!("bridge {} reported {} lights", self.address, self.lights.len());
		Ok(())
	}

	/// Finds a light by name, ignoring case. The first match in bridge
	/// order wins if several lights carry the same name.
	pub fn light_by_name(&self, name: &str) -> Result<&Light> {
		let wanted = name.to_lowercase();
		self.lights
			.iter()
			.find(|light| light.name.to_lowercase() == wanted)
			.ok_or_else(|| Error::LightNotFound(name.to_string()))
	}

	/// Switches a light on.
	pub fn turn_on(&mut self, light: &Light) -> Result<()> {
		self.set_power(light, true)
	}

	/// Switches a light off.
	pub fn turn_off(&mut self, light: &Light) -> Result<()> {
		self.set_power(light, false)
	}

	/// Switches a light on or off.
	///
	/// `light` must stem from this client's light list; it is matched
	/// against the snapshot by its captured id, so renamed or same-named
	/// lights cannot be confused. On success, the snapshot entry is
	/// patched to the commanded state.
	pub fn set_power(&mut self, light: &Light, on: bool) -> Result<()> {
		let position = self
			.lights
			.iter()
			.position(|cached| cached.id == light.id)
			.ok_or_else(|| Error::UnknownLight {
				id: light.id.clone(),
				name: light.name.clone(),
			})?;
		debug!(
			"switching light {} ({:?}) on bridge {} to on={}",
			light.id, light.name, self.address, on
		);
		let ack: Value = self
			.client
			.put(&format!("{}/lights/{}/state", self.base, light.id))
			.json(&json!({ "on": on }))
			.send()?
			.json()?;
		check_bridge_error(&ack)?;
		self.lights[position].state.on = Some(on);
		Ok(())
	}
}

/// API-level failures come back with status 200 as
/// `[{"error": {"type": .., "address": .., "description": ..}}]`.
fn check_bridge_error(answer: &Value) -> Result<()> {
	let entries = match answer.as_array() {
		Some(entries) => entries,
		None => return Ok(()),
	};
	for entry in entries {
		if let Some(error) = entry.get("error") {
			let description = error
				.get("description")
				.and_then(Value::as_str)
				.unwrap_or("unknown bridge error")
				.to_string();
			warn!("bridge refused a request: {}", description);
			return Err(Error::Bridge { description });
		}
	}
	Ok(())
}
