//! Mode runner
//!
//! Drives one blacklist run: log in, read the current block list, then
//! export, update and clean according to the requested [`Mode`]s.

use crate::{
    Error, Result,
    api::BlacklistClient,
    config::Settings,
    types::{BatchReport, Category, ListKind},
    utils::{Pacer, load_users, write_users},
    workflow::Mode,
};
use async_trait::async_trait;

/// Site operations used by [`run`]
#[async_trait]
pub trait BlacklistSite: Send + Sync {
    async fn login(&self) -> bool;

    async fn export_users(&self, kind: ListKind) -> Vec<String>;

    /// Users listed by a block list URL or file
    async fn load_source(&self, source: &str) -> Result<Vec<String>>;

    async fn add_users(
        &self,
        uids: &[String],
        skipped: &[String],
        category: &Category,
    ) -> Result<BatchReport>;

    async fn smart_remove_users(
        &self,
        uids: &[String],
        min_visits: u32,
        min_days: i64,
    ) -> Result<BatchReport>;
}

#[async_trait]
impl BlacklistSite for BlacklistClient {
    async fn login(&self) -> bool {
        BlacklistClient::login(self).await
    }

    async fn export_users(&self, kind: ListKind) -> Vec<String> {
        BlacklistClient::export_users(self, kind).await
    }

    async fn load_source(&self, source: &str) -> Result<Vec<String>> {
        load_users(source, self.session().client()).await
    }

    async fn add_users(
        &self,
        uids: &[String],
        skipped: &[String],
        category: &Category,
    ) -> Result<BatchReport> {
        BlacklistClient::add_users(self, uids, skipped, category).await
    }

    async fn smart_remove_users(
        &self,
        uids: &[String],
        min_visits: u32,
        min_days: i64,
    ) -> Result<BatchReport> {
        BlacklistClient::smart_remove_users(self, uids, min_visits, min_days).await
    }
}

/// What a run did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Block list read right after login
    pub existing: Vec<String>,
    /// Set when the update step sent requests
    pub added: Option<BatchReport>,
    /// Set when the clean step ran
    pub cleaned: Option<BatchReport>,
}

/// Run the requested modes against `site`
pub async fn run<S>(
    site: &S,
    settings: &Settings,
    modes: &[Mode],
    force_clean: bool,
) -> Result<RunSummary>
where
    S: BlacklistSite + ?Sized,
{
    let account = &settings.account.account;
    tracing::info!("Running {} for {}", describe(modes), account);

    if !site.login().await {
        return Err(Error::login(format!("could not log in as {}", account)));
    }

    let mut summary = RunSummary {
        existing: site.export_users(ListKind::Blacklist).await,
        ..RunSummary::default()
    };

    if modes.contains(&Mode::Export) {
        write_users(&settings.blacklist.destination, &summary.existing)?;
    }

    Pacer::from_settings(&settings.pacing).pause_min().await;

    if modes.contains(&Mode::Update) {
        let source = match site.load_source(&settings.blacklist.source).await {
            Ok(users) => users,
            Err(e) => {
                tracing::error!(
                    "Failed to load block list from {}: {}",
                    settings.blacklist.source,
                    e
                );
                Vec::new()
            }
        };

        if source.is_empty() {
            tracing::info!("Block list source is empty, nothing to update");
        } else {
            let report = site
                .add_users(&source, &summary.existing, &Category::Blacklist)
                .await?;
            summary.added = Some(report);
        }
    }

    if modes.contains(&Mode::Clean) {
        let clean = &settings.clean;
        if force_clean || summary.existing.len() > clean.friend_num {
            let report = site
                .smart_remove_users(&summary.existing, clean.min_visit, clean.min_day)
                .await?;
            summary.cleaned = Some(report);
        } else {
            tracing::info!(
                "Block list has {} entries (limit {}), skipping clean",
                summary.existing.len(),
                clean.friend_num
            );
        }
    }

    Ok(summary)
}

fn describe(modes: &[Mode]) -> String {
    modes
        .iter()
        .map(Mode::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OperationRecord, OperationStatus};
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct FakeSite {
        login_ok: bool,
        existing: Vec<String>,
        source: Option<Vec<String>>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeSite {
        fn new(existing: &[&str]) -> Self {
            Self {
                login_ok: true,
                existing: existing.iter().map(|s| s.to_string()).collect(),
                ..Self::default()
            }
        }

        fn with_source(mut self, source: &[&str]) -> Self {
            self.source = Some(source.iter().map(|s| s.to_string()).collect());
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn log(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl BlacklistSite for FakeSite {
        async fn login(&self) -> bool {
            self.log("login".into());
            self.login_ok
        }

        async fn export_users(&self, kind: ListKind) -> Vec<String> {
            self.log(format!("export {}", kind));
            self.existing.clone()
        }

        async fn load_source(&self, source: &str) -> Result<Vec<String>> {
            self.log(format!("load {}", source));
            self.source
                .clone()
                .ok_or_else(|| Error::internal("source unavailable"))
        }

        async fn add_users(
            &self,
            uids: &[String],
            skipped: &[String],
            _category: &Category,
        ) -> Result<BatchReport> {
            self.log(format!("add {} skip {}", uids.join(","), skipped.join(",")));
            let mut report = BatchReport::new();
            for uid in uids {
                if skipped.contains(uid) {
                    report.push(OperationRecord::skipped(uid));
                } else {
                    report.push(OperationRecord::new(uid, OperationStatus::Succeeded, "成功"));
                }
            }
            Ok(report)
        }

        async fn smart_remove_users(
            &self,
            uids: &[String],
            min_visits: u32,
            min_days: i64,
        ) -> Result<BatchReport> {
            self.log(format!("clean {} {} {}", uids.len(), min_visits, min_days));
            Ok(BatchReport::new())
        }
    }

    fn settings(dir: &TempDir) -> Settings {
        let mut settings = Settings::default();
        settings.account.account = "tester".into();
        settings.blacklist.source = "list.txt".into();
        settings.blacklist.destination = dir.path().join("out.txt");
        settings.pacing.min_sleep = 0.0;
        settings.pacing.max_sleep = 0.0;
        settings.clean.friend_num = 2;
        settings
    }

    #[tokio::test]
    async fn test_login_failure_stops_run() {
        let dir = TempDir::new().unwrap();
        let site = FakeSite::default();

        let err = run(&site, &settings(&dir), &Mode::ALL, false)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Login(_)));
        assert_eq!(site.calls(), vec!["login"]);
    }

    #[tokio::test]
    async fn test_full_run() {
        let dir = TempDir::new().unwrap();
        let settings = settings(&dir);
        let site = FakeSite::new(&["a", "b", "c"]).with_source(&["b", "d"]);

        let summary = run(&site, &settings, &Mode::ALL, false).await.unwrap();

        assert_eq!(
            site.calls(),
            vec![
                "login",
                "export blacklist",
                "load list.txt",
                "add b,d skip a,b,c",
                "clean 3 10 360",
            ]
        );
        assert_eq!(
            std::fs::read_to_string(&settings.blacklist.destination).unwrap(),
            "a\nb\nc\n"
        );
        let added = summary.added.unwrap();
        assert_eq!(added.count(OperationStatus::Skipped), 1);
        assert_eq!(added.count(OperationStatus::Succeeded), 1);
        assert!(summary.cleaned.is_some());
    }

    #[tokio::test]
    async fn test_clean_skipped_below_limit() {
        let dir = TempDir::new().unwrap();
        let settings = settings(&dir);
        let site = FakeSite::new(&["a", "b"]);

        let summary = run(&site, &settings, &[Mode::Clean], false).await.unwrap();
        assert!(summary.cleaned.is_none());
        assert!(!settings.blacklist.destination.exists());

        let summary = run(&site, &settings, &[Mode::Clean], true).await.unwrap();
        assert!(summary.cleaned.is_some());
    }

    #[tokio::test]
    async fn test_unavailable_source_skips_update() {
        let dir = TempDir::new().unwrap();
        let site = FakeSite::new(&["a"]);

        let summary = run(&site, &settings(&dir), &[Mode::Update], false)
            .await
            .unwrap();
        assert!(summary.added.is_none());
        assert_eq!(site.calls(), vec!["login", "export blacklist", "load list.txt"]);
    }

    #[tokio::test]
    async fn test_export_only() {
        let dir = TempDir::new().unwrap();
        let settings = settings(&dir);
        let site = FakeSite::new(&[]).with_source(&["x"]);

        let summary = run(&site, &settings, &[Mode::Export], false).await.unwrap();
        assert_eq!(summary, RunSummary::default());
        assert_eq!(
            std::fs::read_to_string(&settings.blacklist.destination).unwrap(),
            "\n"
        );
    }
}
