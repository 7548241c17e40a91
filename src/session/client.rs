//! # Authenticated site session
//!
//! [`GamerSession`] owns the HTTP client, its cookie jar and the CSRF token
//! state. Everything that needs to be logged in goes through it.
//!
//! ## Login
//!
//! Two methods are tried in order, the first success wins:
//! - **Password**: fetch `login.php`, pick up the hidden
//!   `alternativeCaptcha` value and post the credentials to `do_login.php`.
//! - **Cookies**: load a Netscape cookie jar exported from a browser.
//!
//! `cookies_first` swaps the order. Either way the session only counts as
//! logged in when `home.gamer.com.tw/setting/` is served without a redirect.
//!
//! ## CSRF tokens
//!
//! - The global token (cookie `ckBahamutCsrfToken`) is fetched once and
//!   sent as the `x-bahamut-csrf-token` header on `api.` mutations.
//! - `friend_del.php` wants a fresh token from `getCSRFToken.php` in the
//!   form body for every call.

use crate::{
    Error, Result,
    config::Settings,
    session::{
        Endpoints,
        cookies::{NetscapeCookie, load_cookie_file},
    },
    types::ListKind,
};
use regex::Regex;
use reqwest::{
    Client, RequestBuilder,
    cookie::{CookieStore, Jar},
    header::{self, HeaderMap, HeaderValue},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use url::Url;

/// Cookie holding the global CSRF token
pub const CSRF_COOKIE: &str = "ckBahamutCsrfToken";

/// Header the `api.` host expects the global token in
pub const CSRF_HEADER: &str = "x-bahamut-csrf-token";

/// Analytics cookie the login form expects to exist
const PLACEHOLDER_GA_COOKIE: &str = "_ga=GA1.1.135792468.2468013579";

const CAPTCHA_PATTERN: &str = r#"<input type="hidden" name="alternativeCaptcha" value="(\w+)""#;

/// Fallback token length when the cookie is missing
const CSRF_BODY_LEN: usize = 16;

/// Ways to authenticate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginMethod {
    Password,
    Cookies,
}

/// Logged-in HTTP session against the site
#[derive(Debug)]
pub struct GamerSession {
    settings: Arc<Settings>,
    client: Client,
    jar: Arc<Jar>,
    endpoints: Endpoints,
    /// Global CSRF token, once known
    csrf_token: RwLock<Option<String>>,
}

impl GamerSession {
    /// Build the HTTP client for the given settings.
    ///
    /// No request is made until one of the login methods is called.
    pub fn new(settings: Settings) -> Result<Self> {
        let endpoints = Endpoints::from_settings(&settings.endpoints)?;
        let jar = Arc::new(Jar::default());

        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("zh-TW,zh;q=0.9,en-US;q=0.8,en;q=0.7"),
        );

        let mut builder = Client::builder()
            .user_agent(settings.network.user_agent.clone())
            .default_headers(headers)
            .cookie_provider(jar.clone())
            .timeout(Duration::from_secs(settings.network.timeout_secs))
            // proxies come from the settings only
            .no_proxy();

        if let Some(proxy) = settings.get_proxy_url() {
            tracing::debug!("Using proxy {}", proxy);
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }

        let client = builder.build()?;

        Ok(Self {
            settings: Arc::new(settings),
            client,
            jar,
            endpoints,
            csrf_token: RwLock::new(None),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Login methods in the order they are tried
    pub fn login_methods(&self) -> Vec<LoginMethod> {
        if self.settings.account.cookies_first {
            vec![LoginMethod::Cookies, LoginMethod::Password]
        } else {
            vec![LoginMethod::Password, LoginMethod::Cookies]
        }
    }

    /// Try every login method until one succeeds
    pub async fn login(&self) -> bool {
        tracing::debug!("Logging in as {}", self.settings.account.account);

        for method in self.login_methods() {
            let success = match method {
                LoginMethod::Password => self.login_password().await,
                LoginMethod::Cookies => self.login_cookies().await,
            };

            if success {
                tracing::debug!("{:?} login succeeded", method);
                return true;
            }
            tracing::debug!("{:?} login failed", method);
        }

        tracing::error!("All login methods failed");
        false
    }

    /// Password login; `false` when no password is configured
    pub async fn login_password(&self) -> bool {
        if self.settings.account.password.is_empty() {
            tracing::debug!("No password configured, skipping password login");
            return false;
        }

        match self.try_login_password().await {
            Ok(success) => success,
            Err(e) => {
                tracing::error!("Password login error: {}", e);
                false
            }
        }
    }

    async fn try_login_password(&self) -> Result<bool> {
        for origin in self.endpoints.origins() {
            self.jar.add_cookie_str(PLACEHOLDER_GA_COOKIE, &origin);
        }

        let response = self
            .client
            .get(self.endpoints.login_page()?)
            .send()
            .await?
            .error_for_status()?;
        let page = response.text().await?;

        let Some(captcha) = extract_alternative_captcha(&page)? else {
            tracing::debug!("Login page has no alternativeCaptcha field");
            return Ok(false);
        };

        let account = &self.settings.account;
        self.client
            .post(self.endpoints.do_login()?)
            .form(&[
                ("userid", account.account.as_str()),
                ("password", account.password.as_str()),
                ("alternativeCaptcha", captcha.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        if let Some(token) = self.csrf_cookie() {
            *self.csrf_token.write().await = Some(token);
        }

        self.login_success().await
    }

    /// Cookie jar login; `false` when the file cannot be used
    pub async fn login_cookies(&self) -> bool {
        let path = &self.settings.account.cookie_path;
        let cookies = match load_cookie_file(path) {
            Ok(cookies) => cookies,
            Err(e) => {
                tracing::error!("Cannot load cookies: {}", e);
                return false;
            }
        };

        tracing::debug!("Loaded {} cookies from {}", cookies.len(), path.display());
        self.import_cookies(&cookies);

        match self.login_success().await {
            Ok(success) => success,
            Err(e) => {
                tracing::error!("Login check failed: {}", e);
                false
            }
        }
    }

    /// Add cookies to the jar for every site host
    pub fn import_cookies(&self, cookies: &[NetscapeCookie]) {
        let origins = self.endpoints.origins();
        for cookie in cookies {
            let entry = format!("{}={}; Path=/", cookie.name, cookie.value);
            for origin in &origins {
                self.jar.add_cookie_str(&entry, origin);
            }
        }
    }

    /// Logged in iff the settings page is served without a redirect
    pub async fn login_success(&self) -> Result<bool> {
        let url = self.endpoints.setting_page()?;
        tracing::debug!("Checking login status");

        let response = self.client.get(url.clone()).send().await?;
        let logged_in = response.url() == &url;

        tracing::debug!(
            "Login status: {}",
            if logged_in { "logged in" } else { "redirected" }
        );
        Ok(logged_in)
    }

    /// Value of a cookie the jar would send to `url`
    pub fn cookie_value(&self, url: &Url, name: &str) -> Option<String> {
        let header = self.jar.cookies(url)?;
        let header = header.to_str().ok()?;
        header.split(';').find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
    }

    fn csrf_cookie(&self) -> Option<String> {
        self.endpoints
            .origins()
            .iter()
            .find_map(|origin| self.cookie_value(origin, CSRF_COOKIE))
    }

    /// Current global token, if one has been fetched
    pub async fn csrf_token(&self) -> Option<String> {
        self.csrf_token.read().await.clone()
    }

    /// Global token, fetching it on first use
    pub async fn ensure_global_csrf(&self) -> Result<String> {
        if let Some(token) = self.csrf_token().await {
            return Ok(token);
        }
        self.update_global_csrf().await
    }

    /// Refresh the global CSRF token
    pub async fn update_global_csrf(&self) -> Result<String> {
        tracing::debug!("Refreshing global CSRF token");

        let response = self
            .client
            .get(self.endpoints.global_csrf()?)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;

        let token = self
            .csrf_cookie()
            .unwrap_or_else(|| body.trim().chars().take(CSRF_BODY_LEN).collect());

        if token.is_empty() {
            tracing::error!("No CSRF token returned");
            return Err(Error::csrf(
                "no CSRF token returned; refresh the cookies or use password login",
            ));
        }

        let entry = format!("{}={}; Path=/", CSRF_COOKIE, token);
        for origin in self.endpoints.origins() {
            self.jar.add_cookie_str(&entry, &origin);
        }
        *self.csrf_token.write().await = Some(token.clone());

        tracing::debug!("Global CSRF token updated");
        Ok(token)
    }

    /// Single-use token for `friend_del.php`
    pub async fn temp_csrf(&self) -> Result<String> {
        tracing::debug!("Fetching friend list CSRF token");
        let referer = self
            .endpoints
            .friend_list(&self.settings.account.account, ListKind::Blacklist)?;

        let response = self
            .client
            .get(self.endpoints.temp_csrf()?)
            .header(header::ACCEPT, "*/*")
            .header(header::REFERER, referer.as_str())
            .header(header::CONTENT_TYPE, "text/html; charset=UTF-8")
            .header("x-requested-with", "XMLHttpRequest")
            .send()
            .await?
            .error_for_status()?;

        let token = response.text().await?.trim().to_string();
        if token.is_empty() {
            return Err(Error::csrf(
                "friend list CSRF token is empty; refresh the cookies file",
            ));
        }
        Ok(token)
    }

    /// POST request carrying the global token header when known
    pub async fn post(&self, url: Url) -> RequestBuilder {
        let request = self.client.post(url);
        match self.csrf_token().await {
            Some(token) => request.header(CSRF_HEADER, token),
            None => request,
        }
    }
}

/// Hidden captcha value on the login form
pub fn extract_alternative_captcha(page: &str) -> Result<Option<String>> {
    let pattern = Regex::new(CAPTCHA_PATTERN).map_err(|e| Error::internal(e.to_string()))?;
    Ok(pattern
        .captures(page)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EndpointSettings;

    fn local_settings() -> Settings {
        let mut settings = Settings::default();
        settings.account.account = "tester".to_string();
        settings.endpoints = EndpointSettings::all("http://127.0.0.1:9");
        settings
    }

    #[test]
    fn test_extract_captcha() {
        let page = r#"<form><input type="hidden" name="alternativeCaptcha" value="abc123XYZ"></form>"#;
        assert_eq!(
            extract_alternative_captcha(page).unwrap(),
            Some("abc123XYZ".to_string())
        );
        assert_eq!(extract_alternative_captcha("<form></form>").unwrap(), None);
    }

    #[test]
    fn test_login_method_order() {
        let session = GamerSession::new(local_settings()).unwrap();
        assert_eq!(
            session.login_methods(),
            vec![LoginMethod::Password, LoginMethod::Cookies]
        );

        let mut settings = local_settings();
        settings.account.cookies_first = true;
        let session = GamerSession::new(settings).unwrap();
        assert_eq!(
            session.login_methods(),
            vec![LoginMethod::Cookies, LoginMethod::Password]
        );
    }

    #[test]
    fn test_import_cookies_scoped_to_site() {
        let session = GamerSession::new(local_settings()).unwrap();
        session.import_cookies(&[NetscapeCookie {
            domain: ".gamer.com.tw".to_string(),
            include_subdomains: true,
            path: "/".to_string(),
            secure: false,
            expires: None,
            name: "BAHAID".to_string(),
            value: "tester".to_string(),
            http_only: false,
        }]);

        let origin = Url::parse("http://127.0.0.1:9/").unwrap();
        assert_eq!(
            session.cookie_value(&origin, "BAHAID"),
            Some("tester".to_string())
        );

        let elsewhere = Url::parse("http://example.com/").unwrap();
        assert_eq!(session.cookie_value(&elsewhere, "BAHAID"), None);
    }

    #[tokio::test]
    async fn test_password_login_skipped_without_password() {
        let session = GamerSession::new(local_settings()).unwrap();
        assert!(!session.login_password().await);
    }

    #[tokio::test]
    async fn test_cookie_login_with_missing_file() {
        let mut settings = local_settings();
        settings.account.cookie_path = "/no/such/cookies.txt".into();
        let session = GamerSession::new(settings).unwrap();
        assert!(!session.login_cookies().await);
    }
}
