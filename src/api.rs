use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::Deserialize;

use crate::error::{BoardError, Membership};
use crate::model::Catalog;

/// The two (three, counting unregister) endpoints the board talks to.
#[async_trait(?Send)]
pub trait ActivityApi {
    async fn fetch_activities(&self) -> Result<Catalog, BoardError>;

    /// Returns the server's confirmation text.
    async fn signup(&self, activity: &str, email: &str) -> Result<String, BoardError>;

    async fn unregister(&self, activity: &str, email: &str) -> Result<String, BoardError>;
}

/// Body of a membership response. Either field may be absent.
#[derive(Debug, Default, Deserialize)]
struct MembershipReply {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

pub fn activities_url(api_base: &str) -> String {
    format!("{}/activities", api_base.trim_end_matches('/'))
}

pub fn membership_url(api_base: &str, action: Membership, activity: &str, email: &str) -> String {
    let verb = match action {
        Membership::Signup => "signup",
        Membership::Unregister => "unregister",
    };
    format!(
        "{}/{}/{}?email={}",
        activities_url(api_base),
        urlencoding::encode(activity),
        verb,
        urlencoding::encode(email)
    )
}

pub fn parse_catalog(ok: bool, status: u16, body: &str) -> Result<Catalog, BoardError> {
    if !ok {
        return Err(BoardError::load(format!("HTTP {}", status)));
    }
    serde_json::from_str(body).map_err(|e| BoardError::load(format!("invalid JSON: {}", e)))
}

/// The status code alone picks the branch; a body that is not the expected
/// JSON just means there is no server text to show.
pub fn interpret_membership(
    action: Membership,
    ok: bool,
    status: u16,
    body: &str,
    activity: &str,
    email: &str,
) -> Result<String, BoardError> {
    let reply: MembershipReply = serde_json::from_str(body).unwrap_or_default();
    if ok {
        Ok(reply.message.unwrap_or_else(|| match action {
            Membership::Signup => format!("Signed up {} for {}", email, activity),
            Membership::Unregister => format!("Unregistered {} from {}", email, activity),
        }))
    } else {
        Err(BoardError::Rejected { action, status, detail: reply.detail })
    }
}

/// `ActivityApi` over the browser's fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpActivityApi {
    api_base: String,
}

impl HttpActivityApi {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self { api_base: api_base.into().trim_end_matches('/').to_string() }
    }

    async fn membership(
        &self,
        action: Membership,
        activity: &str,
        email: &str,
    ) -> Result<String, BoardError> {
        let url = membership_url(&self.api_base, action, activity, email);
        let request = match action {
            Membership::Signup => Request::post(&url),
            Membership::Unregister => Request::delete(&url),
        };
        let resp = request
            .send()
            .await
            .map_err(|e| BoardError::TransportFailure { action, reason: e.to_string() })?;
        let body = read_body(&resp).await;
        interpret_membership(action, resp.ok(), resp.status(), &body, activity, email)
    }
}

async fn read_body(resp: &Response) -> String {
    match resp.text().await {
        Ok(body) => body,
        Err(e) => {
            log::warn!("could not read response body: {}", e);
            String::new()
        }
    }
}

#[async_trait(?Send)]
impl ActivityApi for HttpActivityApi {
    async fn fetch_activities(&self) -> Result<Catalog, BoardError> {
        let url = activities_url(&self.api_base);
        log::debug!("GET {}", url);
        let resp = Request::get(&url).send().await.map_err(BoardError::load)?;
        let body = resp.text().await.map_err(BoardError::load)?;
        parse_catalog(resp.ok(), resp.status(), &body)
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<String, BoardError> {
        self.membership(Membership::Signup, activity, email).await
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<String, BoardError> {
        self.membership(Membership::Unregister, activity, email).await
    }
}
