/// All error types that can occur when talking to a Hue bridge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The HTTP exchange with the bridge failed (connection, TLS, timeout).
	#[error("http error: {0}")]
	Http(#[from] reqwest::Error),

	/// The bridge answered with a body that is not valid JSON.
	#[error("malformed bridge response: {0}")]
	Json(#[from] serde_json::Error),

	/// The bridge answered with JSON of an unexpected shape.
	#[error("unexpected bridge response: {0}")]
	UnexpectedResponse(String),

	/// The bridge refused the request on the API level,
	/// e.g. because the token is not authorized.
	#[error("bridge error: {description}")]
	Bridge { description: String },

	/// No light with the given name is known to this client.
	#[error("no light named {0:?}")]
	LightNotFound(String),

	/// The given light does not stem from this client's light list.
	#[error("light {name:?} (id {id:?}) is not known to this bridge")]
	UnknownLight { id: String, name: String },

	/// The light's state carries no `on` field.
	#[error("light {0:?} reported no power state")]
	NoPowerState(String),
}

pub type Result<T> = std::result::Result<T, Error>;
