//! The signed-in state of the application
//!
//! A [`Session`] is created once and handed (behind an `Arc`) to every component
//! that authenticates its calls, instead of living in some global context. UIs that
//! need to react to sign-ins and sign-outs call [`Session::subscribe`] and watch the
//! receiver; dropping the receiver is the unsubscription.

use std::sync::Mutex;

use serde::Deserialize;

use crate::error::{StoreError, StoreResult};
use crate::resource::Resource;
use crate::rest::rejection;

static TOKEN_PATH: &str = "/auth/v1/token";
static LOGOUT_PATH: &str = "/auth/v1/logout";
static USER_PATH: &str = "/auth/v1/user";

/// The signed-in user, as the auth endpoint describes it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    id: String,
    email: String,
    is_admin: bool,
}

impl AuthUser {
    pub fn id(&self) -> &str { &self.id }
    pub fn email(&self) -> &str { &self.email }
    /// Whether the auth endpoint flags this user as an administrator
    pub fn is_admin(&self) -> bool { self.is_admin }
}

/// See [`Session::subscribe`]
pub type AuthStateReceiver = tokio::sync::watch::Receiver<Option<AuthUser>>;

// What the password grant answers
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: WireUser,
}

#[derive(Debug, Deserialize)]
struct WireUser {
    id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    app_metadata: WireAppMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct WireAppMetadata {
    #[serde(default)]
    admin: bool,
}

impl From<WireUser> for AuthUser {
    fn from(wire: WireUser) -> Self {
        Self {
            id: wire.id,
            email: wire.email,
            is_admin: wire.app_metadata.admin,
        }
    }
}

/// Holds the access token and the current user, and publishes every change
pub struct Session {
    resource: Resource,
    http: reqwest::Client,
    token: Mutex<Option<String>>,
    state: tokio::sync::watch::Sender<Option<AuthUser>>,
    // Kept so the channel stays open with no outside subscriber
    state_rx: AuthStateReceiver,
}

impl Session {
    /// A signed-out session against `resource`
    pub fn new(resource: Resource) -> Self {
        let (state, state_rx) = tokio::sync::watch::channel(None);
        Self {
            resource,
            http: reqwest::Client::new(),
            token: Mutex::new(None),
            state,
            state_rx,
        }
    }

    /// Resumes a session from a token the embedder kept around, by asking the auth
    /// endpoint who the token belongs to.
    ///
    /// Fails when the token is no longer accepted; start from [`Session::new`] and
    /// sign in again in that case.
    pub async fn connect(resource: Resource, access_token: String) -> StoreResult<Self> {
        let session = Self::new(resource);

        let url = session.resource.combine(USER_PATH).url().clone();
        let response = session
            .http
            .get(url)
            .header("apikey", session.resource.api_key().as_str())
            .bearer_auth(&access_token)
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(rejection(response).await);
        }

        let wire: WireUser = response
            .json()
            .await
            .map_err(|err| StoreError::BadResponse(err.to_string()))?;

        *session.token.lock().unwrap() = Some(access_token);
        session.publish(Some(wire.into()));
        Ok(session)
    }

    /// Exchanges credentials for an access token and publishes the new user.
    ///
    /// On failure nothing changes: a previously signed-in user stays signed in.
    pub async fn sign_in(&self, email: &str, password: &str) -> StoreResult<AuthUser> {
        let mut url = self.resource.combine(TOKEN_PATH).url().clone();
        url.set_query(Some("grant_type=password"));

        let body = serde_json::json!({ "email": email, "password": password });
        let response = self
            .http
            .post(url)
            .header("apikey", self.resource.api_key().as_str())
            .json(&body)
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(rejection(response).await);
        }

        let parsed: TokenResponse = response
            .json()
            .await
            .map_err(|err| StoreError::BadResponse(err.to_string()))?;

        let user = AuthUser::from(parsed.user);
        log::info!("Signed in as {}", user.email());
        *self.token.lock().unwrap() = Some(parsed.access_token);
        self.publish(Some(user.clone()));
        Ok(user)
    }

    /// Revokes the current token and publishes the signed-out state.
    ///
    /// The local state is only cleared once the endpoint accepted the revocation, so
    /// a failed sign-out leaves the session usable.
    pub async fn sign_out(&self) -> StoreResult<()> {
        let token = match self.access_token() {
            Some(token) => token,
            None => return Ok(()),
        };

        let url = self.resource.combine(LOGOUT_PATH).url().clone();
        let response = self
            .http
            .post(url)
            .header("apikey", self.resource.api_key().as_str())
            .bearer_auth(token)
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(rejection(response).await);
        }

        log::info!("Signed out");
        *self.token.lock().unwrap() = None;
        self.publish(None);
        Ok(())
    }

    /// The token calls should authenticate with, or `None` when signed out
    pub fn access_token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        self.state_rx.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current_user().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current_user().map(|user| user.is_admin()).unwrap_or(false)
    }

    /// A receiver holding the current `Option<AuthUser>`, updated on every sign-in
    /// and sign-out. Dropping it unsubscribes.
    pub fn subscribe(&self) -> AuthStateReceiver {
        self.state_rx.clone()
    }

    fn publish(&self, user: Option<AuthUser>) {
        let _ = self.state.send(user);
    }
}
