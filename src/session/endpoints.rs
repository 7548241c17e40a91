//! Site URLs
//!
//! Pages live on four hosts. Mutations on `api.` need the global CSRF
//! token, mutations on `home.` use a short-lived token from
//! `getCSRFToken.php`.

use crate::{Result, config::EndpointSettings, types::ListKind};
use url::Url;

/// Parsed base URLs of the site's hosts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    www: Url,
    home: Url,
    user: Url,
    api: Url,
}

impl Endpoints {
    /// Parse the configured base URLs
    pub fn from_settings(settings: &EndpointSettings) -> Result<Self> {
        Ok(Self {
            www: parse_base(&settings.www)?,
            home: parse_base(&settings.home)?,
            user: parse_base(&settings.user)?,
            api: parse_base(&settings.api)?,
        })
    }

    /// Distinct host roots, used to scope imported cookies
    pub fn origins(&self) -> Vec<Url> {
        let mut origins: Vec<Url> = Vec::new();
        for base in [&self.www, &self.home, &self.user, &self.api] {
            if !origins.iter().any(|o| o.origin() == base.origin()) {
                origins.push(base.clone());
            }
        }
        origins
    }

    /// Account settings page; anonymous visitors get redirected away
    pub fn setting_page(&self) -> Result<Url> {
        Ok(self.home.join("setting/")?)
    }

    pub fn login_page(&self) -> Result<Url> {
        Ok(self.user.join("login.php")?)
    }

    pub fn do_login(&self) -> Result<Url> {
        Ok(self.user.join("ajax/do_login.php")?)
    }

    pub fn global_csrf(&self) -> Result<Url> {
        Ok(self.www.join("ajax/get_csrf_token.php")?)
    }

    pub fn temp_csrf(&self) -> Result<Url> {
        Ok(self.home.join("ajax/getCSRFToken.php")?)
    }

    pub fn friend_add(&self) -> Result<Url> {
        Ok(self.api.join("user/v1/friend_add.php")?)
    }

    pub fn friend_del(&self) -> Result<Url> {
        Ok(self.home.join("ajax/friend_del.php")?)
    }

    /// `friendList.php?user=<account>&t=<page id>`
    pub fn friend_list(&self, account: &str, kind: ListKind) -> Result<Url> {
        let mut url = self.home.join("friendList.php")?;
        url.query_pairs_mut()
            .append_pair("user", account)
            .append_pair("t", &kind.page_id().to_string());
        Ok(url)
    }

    /// Profile summary of a single account
    pub fn block_info(&self, uid: &str) -> Result<Url> {
        let mut url = self.api.join("home/v1/block_list.php")?;
        url.query_pairs_mut().append_pair("userid", uid);
        Ok(url)
    }
}

/// Parse a base URL, forcing a trailing slash so `join` appends
fn parse_base(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_production_urls() {
        let endpoints = Endpoints::from_settings(&EndpointSettings::default()).unwrap();

        assert_eq!(
            endpoints.setting_page().unwrap().as_str(),
            "https://home.gamer.com.tw/setting/"
        );
        assert_eq!(
            endpoints.friend_add().unwrap().as_str(),
            "https://api.gamer.com.tw/user/v1/friend_add.php"
        );
        assert_eq!(
            endpoints.global_csrf().unwrap().as_str(),
            "https://www.gamer.com.tw/ajax/get_csrf_token.php"
        );
        assert_eq!(
            endpoints
                .friend_list("me", ListKind::Blacklist)
                .unwrap()
                .as_str(),
            "https://home.gamer.com.tw/friendList.php?user=me&t=5"
        );
        assert_eq!(
            endpoints.block_info("abc").unwrap().as_str(),
            "https://api.gamer.com.tw/home/v1/block_list.php?userid=abc"
        );
        assert_eq!(endpoints.origins().len(), 4);
    }

    #[test]
    fn test_single_base_without_trailing_slash() {
        let endpoints =
            Endpoints::from_settings(&EndpointSettings::all("http://127.0.0.1:8080")).unwrap();

        assert_eq!(
            endpoints.do_login().unwrap().as_str(),
            "http://127.0.0.1:8080/ajax/do_login.php"
        );
        assert_eq!(endpoints.origins().len(), 1);
    }

    #[test]
    fn test_base_with_prefix_path() {
        let endpoints =
            Endpoints::from_settings(&EndpointSettings::all("http://localhost/mock")).unwrap();
        assert_eq!(
            endpoints.friend_del().unwrap().as_str(),
            "http://localhost/mock/ajax/friend_del.php"
        );
    }

    #[test]
    fn test_invalid_base() {
        let result = Endpoints::from_settings(&EndpointSettings::all("::nope::"));
        assert!(result.is_err());
    }
}
