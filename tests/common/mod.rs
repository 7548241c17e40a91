//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

/// Test helper functions
pub mod helpers {
    use baha_blacklist::{
        BlacklistClient, Settings,
        config::EndpointSettings,
        utils::Pacer,
    };
    use std::path::Path;
    use wiremock::MockServer;

    pub const ACCOUNT: &str = "tester";

    /// Settings with every host pointed at the mock server and no pauses
    pub fn create_test_settings(server: &MockServer) -> Settings {
        let mut settings = Settings::default();
        settings.account.account = ACCOUNT.to_string();
        settings.endpoints = EndpointSettings::all(server.uri());
        settings.pacing.min_sleep = 0.0;
        settings.pacing.max_sleep = 0.0;
        settings.network.timeout_secs = 5;
        settings
    }

    /// Client for the mock server with pauses disabled
    pub fn create_test_client(settings: Settings) -> BlacklistClient {
        BlacklistClient::new(settings)
            .expect("client builds")
            .with_pacer(Pacer::none())
    }

    /// Write a one-cookie Netscape jar
    pub fn write_cookie_file(path: &Path, name: &str, value: &str) {
        let content = format!(
            "# Netscape HTTP Cookie File\n.gamer.com.tw\tTRUE\t/\tFALSE\t0\t{}\t{}\n",
            name, value
        );
        std::fs::write(path, content).expect("cookie file written");
    }

    /// `friendList.php` page listing `uids`
    pub fn friend_list_page(uids: &[&str]) -> String {
        let rows: String = uids
            .iter()
            .map(|uid| {
                format!(
                    r#"<div class="user_box"><div class="user_id" data-origin="{0}">{0}</div></div>"#,
                    uid
                )
            })
            .collect();
        format!("<html><body>{}</body></html>", rows)
    }
}
