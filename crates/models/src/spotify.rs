//! Client model for the Spotify Web API.

use serde_json::json;
use tracing::info;
use vouch_session::api::{ApiResponse, ApiSession};
use vouch_session::error::Result;

const SEARCH_LIMIT: &str = "10";

/// Endpoint-group client over an [`ApiSession`].
///
/// Every operation requires the configured bearer token; with an empty
/// token the session raises before any network I/O.
pub struct SpotifyClient {
	session: ApiSession,
}

impl SpotifyClient {
	pub fn new(session: ApiSession) -> Self {
		Self { session }
	}

	/// `GET /search?q=<query>&type=artist&limit=10`
	pub async fn search_artists(&self, query: &str) -> Result<ApiResponse> {
		info!(query, "searching artists");
		self.session
			.get("/search", &[("q", query), ("type", "artist"), ("limit", SEARCH_LIMIT)])
			.await
	}

	/// `GET /artists/{id}`
	pub async fn artist(&self, artist_id: &str) -> Result<ApiResponse> {
		info!(artist_id, "getting artist");
		self.session.get(&format!("/artists/{artist_id}"), &[]).await
	}

	/// `GET /albums/{id}`
	pub async fn album(&self, album_id: &str) -> Result<ApiResponse> {
		info!(album_id, "getting album");
		self.session.get(&format!("/albums/{album_id}"), &[]).await
	}

	/// `GET /tracks/{id}`
	pub async fn track(&self, track_id: &str) -> Result<ApiResponse> {
		info!(track_id, "getting track");
		self.session.get(&format!("/tracks/{track_id}"), &[]).await
	}

	/// `GET /me`
	pub async fn current_user(&self) -> Result<ApiResponse> {
		info!("getting current user profile");
		self.session.get("/me", &[]).await
	}

	/// `PUT /me/following?type=artist&ids=...` with ids comma-joined in
	/// caller order.
	pub async fn follow_artists(&self, artist_ids: &[&str]) -> Result<ApiResponse> {
		info!(?artist_ids, "following artists");
		let ids = artist_ids.join(",");
		self.session
			.put("/me/following", &[("type", "artist"), ("ids", &ids)], None)
			.await
	}

	/// `DELETE /me/following?type=artist&ids=...`
	pub async fn unfollow_artists(&self, artist_ids: &[&str]) -> Result<ApiResponse> {
		info!(?artist_ids, "unfollowing artists");
		let ids = artist_ids.join(",");
		self.session
			.delete("/me/following", &[("type", "artist"), ("ids", &ids)])
			.await
	}

	/// `POST /users/{id}/playlists`. The description field is omitted from
	/// the body when `None`.
	pub async fn create_playlist(
		&self,
		user_id: &str,
		name: &str,
		public: bool,
		description: Option<&str>,
	) -> Result<ApiResponse> {
		info!(user_id, name, "creating playlist");
		let mut body = json!({ "name": name, "public": public });
		if let Some(description) = description {
			body["description"] = json!(description);
		}
		self.session
			.post(&format!("/users/{user_id}/playlists"), &[], Some(&body))
			.await
	}
}
