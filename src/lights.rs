use serde_json::{Map, Value};

use crate::error::{Error, Result};

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
/// Snapshot of a light, as fetched from the bridge
pub struct Light {
	/// Id the bridge addresses this light by, captured at decode time.
	/// For an array-shaped answer this is the 0-based position, for an
	/// object-shaped answer the object key (bridges count from "1").
	#[serde(skip)]
	pub id: String,
	pub name: String,
	pub state: LightState,
	/// Remaining bridge-assigned attributes (uniqueid, modelid, ...),
	/// passed through unexamined.
	#[serde(flatten)]
	pub attributes: Map<String, Value>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
/// Current state of a light
pub struct LightState {
	pub on: Option<bool>,
	/// Brightness
	pub bri: Option<u8>,
	pub reachable: Option<bool>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl Light {
	/// Whether the snapshot reports the light as switched on.
	///
	/// Fails if the bridge did not report an `on` field, which means
	/// the value did not come from a light list of this crate.
	pub fn is_on(&self) -> Result<bool> {
		self.state
			.on
			.ok_or_else(|| Error::NoPowerState(self.name.clone()))
	}
}

/// Decodes the answer of `GET /api/<token>/lights` into a light list.
///
/// The bridge may answer with an object keyed by light id or with a plain
/// array. Either way, each light is tagged with the id the bridge will
/// accept in the URL of a state change.
pub fn lights_from_value(value: Value) -> Result<Vec<Light>> {
	match value {
		Value::Array(records) => records
			.into_iter()
			.enumerate()
			.map(|(position, record)| {
				let mut light: Light = serde_json::from_value(record)?;
				light.id = position.to_string();
				Ok(light)
			})
			.collect(),
		Value::Object(records) => {
			let mut lights = records
				.into_iter()
				.map(|(id, record)| {
					let mut light: Light = serde_json::from_value(record)?;
					light.id = id;
					Ok(light)
				})
				.collect::<Result<Vec<Light>>>()?;
			// Restore the bridge's numbering: "2" before "10".
			lights.sort_by_key(|light| light.id.parse::<u64>().unwrap_or(u64::MAX));
			Ok(lights)
		}
		other => Err(Error::UnexpectedResponse(other.to_string())),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn array_answer_is_tagged_with_positions() {
		let lights = lights_from_value(json!([
			{"name": "Lamp", "state": {"on": false}},
			{"name": "Desk", "state": {"on": true}},
		]))
		.unwrap();

		assert_eq!(lights.len(), 2);
		assert_eq!(lights[0].id, "0");
		assert_eq!(lights[0].name, "Lamp");
		assert_eq!(lights[1].id, "1");
		assert_eq!(lights[1].state.on, Some(true));
	}

	#[test]
	fn object_answer_is_tagged_with_keys_in_numeric_order() {
		let lights = lights_from_value(json!({
			"10": {"name": "Hall", "state": {"on": false}},
			"2": {"name": "Desk", "state": {"on": true}},
			"1": {"name": "Lamp", "state": {"on": false}},
		}))
		.unwrap();

		let ids: Vec<&str> = lights.iter().map(|light| light.id.as_str()).collect();
		assert_eq!(ids, ["1", "2", "10"]);
		assert_eq!(lights[1].name, "Desk");
	}

	#[test]
	fn unknown_attributes_are_passed_through() {
		let lights = lights_from_value(json!([
			{
				"name": "Lamp",
				"state": {"on": true, "bri": 254, "colormode": "ct"},
				"uniqueid": "00:17:88:01",
				"modelid": "LCT007",
			},
		]))
		.unwrap();

		assert_eq!(lights[0].attributes["modelid"], json!("LCT007"));
		assert_eq!(lights[0].attributes["uniqueid"], json!("00:17:88:01"));
		assert_eq!(lights[0].state.bri, Some(254));
		assert_eq!(lights[0].state.extra["colormode"], json!("ct"));
	}

	#[test]
	fn is_on_reads_the_reported_state() {
		let lights = lights_from_value(json!([
			{"name": "Lamp", "state": {"on": true}},
		]))
		.unwrap();

		assert!(lights[0].is_on().unwrap());
	}

	#[test]
	fn is_on_fails_without_a_power_state() {
		let light = Light {
			name: "Ghost".to_string(),
			..Light::default()
		};

		match light.is_on() {
			Err(Error::NoPowerState(name)) => assert_eq!(name, "Ghost"),
			other => panic!("expected NoPowerState, got {:?}", other),
		}
	}

	#[test]
	fn scalar_answer_is_rejected() {
		match lights_from_value(json!("unauthorized")) {
			Err(Error::UnexpectedResponse(_)) => {}
			other => panic!("expected UnexpectedResponse, got {:?}", other),
		}
	}
}
