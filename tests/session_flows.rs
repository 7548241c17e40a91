//! Login and CSRF token flows against a mock site

mod common;

use baha_blacklist::{
    Error,
    session::{CSRF_COOKIE, GamerSession},
};
use common::helpers::{create_test_settings, write_cookie_file};
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LOGIN_PAGE: &str = r#"<html><form id="form-login">
<input type="hidden" name="alternativeCaptcha" value="cap7XYZ">
</form></html>"#;

async fn mount_logged_in(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/setting/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("settings"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_password_login() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/login.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LOGIN_PAGE))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/ajax/do_login.php"))
        .and(body_string_contains("userid=tester"))
        .and(body_string_contains("password=secret"))
        .and(body_string_contains("alternativeCaptcha=cap7XYZ"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", format!("{}=tok123; Path=/", CSRF_COOKIE).as_str())
                .set_body_string("{}"),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_logged_in(&server).await;

    let mut settings = create_test_settings(&server);
    settings.account.password = "secret".to_string();
    let session = GamerSession::new(settings).unwrap();

    assert!(session.login().await);
    assert_eq!(session.csrf_token().await.as_deref(), Some("tok123"));
}

#[tokio::test]
async fn test_cookie_login() {
    let server = MockServer::start().await;
    mount_logged_in(&server).await;

    let dir = TempDir::new().unwrap();
    let jar = dir.path().join("cookies.txt");
    write_cookie_file(&jar, "BAHARUNE", "rune-value");

    let mut settings = create_test_settings(&server);
    settings.account.cookie_path = jar;
    let session = GamerSession::new(settings).unwrap();

    assert!(session.login().await);
    let origin = url::Url::parse(&server.uri()).unwrap();
    assert_eq!(
        session.cookie_value(&origin, "BAHARUNE").as_deref(),
        Some("rune-value")
    );
}

#[tokio::test]
async fn test_redirect_means_logged_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/setting/"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/login.php"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/login.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string("please log in"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let jar = dir.path().join("cookies.txt");
    write_cookie_file(&jar, "BAHARUNE", "stale");

    let mut settings = create_test_settings(&server);
    settings.account.cookie_path = jar;
    let session = GamerSession::new(settings).unwrap();

    assert!(!session.login_success().await.unwrap());
    assert!(!session.login().await);
}

#[tokio::test]
async fn test_login_page_without_captcha() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/login.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/ajax/do_login.php"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut settings = create_test_settings(&server);
    settings.account.password = "secret".to_string();
    let session = GamerSession::new(settings).unwrap();

    assert!(!session.login_password().await);
}

#[tokio::test]
async fn test_global_csrf_from_cookie() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ajax/get_csrf_token.php"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", format!("{}=cookietoken; Path=/", CSRF_COOKIE).as_str())
                .set_body_string("bodytokenbodytokenbody"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = GamerSession::new(create_test_settings(&server)).unwrap();
    assert_eq!(session.ensure_global_csrf().await.unwrap(), "cookietoken");
    // cached after the first fetch
    assert_eq!(session.ensure_global_csrf().await.unwrap(), "cookietoken");
}

#[tokio::test]
async fn test_global_csrf_from_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ajax/get_csrf_token.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string("0123456789abcdefEXTRA"))
        .mount(&server)
        .await;

    let session = GamerSession::new(create_test_settings(&server)).unwrap();
    assert_eq!(
        session.update_global_csrf().await.unwrap(),
        "0123456789abcdef"
    );
    let origin = url::Url::parse(&server.uri()).unwrap();
    assert_eq!(
        session.cookie_value(&origin, CSRF_COOKIE).as_deref(),
        Some("0123456789abcdef")
    );
}

#[tokio::test]
async fn test_global_csrf_missing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ajax/get_csrf_token.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let session = GamerSession::new(create_test_settings(&server)).unwrap();
    assert!(matches!(
        session.update_global_csrf().await,
        Err(Error::Csrf(_))
    ));
}

#[tokio::test]
async fn test_temp_csrf() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ajax/getCSRFToken.php"))
        .and(header("x-requested-with", "XMLHttpRequest"))
        .respond_with(ResponseTemplate::new(200).set_body_string(" tmp456\n"))
        .mount(&server)
        .await;

    let session = GamerSession::new(create_test_settings(&server)).unwrap();
    assert_eq!(session.temp_csrf().await.unwrap(), "tmp456");
}
