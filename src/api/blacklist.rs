//! Block list operations
//!
//! [`BlacklistClient`] wraps a [`GamerSession`] with the add, export,
//! lookup and remove calls. Batch calls are strictly sequential with a
//! random pause after every request, and give up once
//! [`MAX_CONSECUTIVE_FAILURES`] requests in a row have failed.

use crate::{
    Error, Result,
    api::parse::{
        ADD_SUCCESS_MARKER, REMOVE_SUCCESS_MARKER, parse_friend_list, parse_user_info,
        render_add_reply, today,
    },
    config::Settings,
    session::GamerSession,
    types::{BatchReport, Category, ListKind, OperationRecord, OperationStatus, UserInfo},
    utils::Pacer,
};
use std::collections::HashSet;

/// Failed requests in a row before a batch is aborted
pub const MAX_CONSECUTIVE_FAILURES: usize = 3;

/// Consecutive failure counter shared by the batch operations
#[derive(Debug, Default)]
struct FailureStreak {
    count: usize,
}

impl FailureStreak {
    fn check(&self, processed: usize, total: usize) -> Result<()> {
        if self.count >= MAX_CONSECUTIVE_FAILURES {
            tracing::error!(
                "{} consecutive failures, aborting ({}/{})",
                self.count,
                processed,
                total
            );
            return Err(Error::aborted(self.count, processed, total));
        }
        Ok(())
    }

    fn record(&mut self, record: &OperationRecord) {
        if record.status == OperationStatus::Failed {
            self.count += 1;
        } else {
            self.count = 0;
        }
    }
}

/// Block list client for one account
#[derive(Debug)]
pub struct BlacklistClient {
    session: GamerSession,
    pacer: Pacer,
}

impl BlacklistClient {
    /// Create a client; pauses follow the `pacing` settings
    pub fn new(settings: Settings) -> Result<Self> {
        let pacer = Pacer::from_settings(&settings.pacing);
        Ok(Self {
            session: GamerSession::new(settings)?,
            pacer,
        })
    }

    /// Replace the pause policy
    pub fn with_pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn session(&self) -> &GamerSession {
        &self.session
    }

    pub fn pacer(&self) -> &Pacer {
        &self.pacer
    }

    fn settings(&self) -> &Settings {
        self.session.settings()
    }

    /// Log in with the configured methods
    pub async fn login(&self) -> bool {
        self.session.login().await
    }

    /// Add one user to a list via `friend_add.php`
    pub async fn add_user(&self, uid: &str, category: &Category) -> Result<OperationRecord> {
        tracing::debug!("{} {}", category.action(), uid);

        self.session.ensure_global_csrf().await?;
        let response = self
            .session
            .post(self.session.endpoints().friend_add()?)
            .await
            .form(&[("uid", uid), ("category", category.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = response.json().await?;
        let message = render_add_reply(&body);

        let status = if message.contains(ADD_SUCCESS_MARKER) {
            tracing::debug!("{} {}: {}", category.action(), uid, message);
            OperationStatus::Succeeded
        } else {
            tracing::info!("{} {} was not accepted: {}", category.action(), uid, message);
            OperationStatus::Rejected
        };
        Ok(OperationRecord::new(uid, status, message))
    }

    /// Add every uid not already in `skipped`
    pub async fn add_users(
        &self,
        uids: &[String],
        skipped: &[String],
        category: &Category,
    ) -> Result<BatchReport> {
        let skipped: HashSet<&str> = skipped.iter().map(String::as_str).collect();
        let total = uids.len();
        let mut report = BatchReport::new();
        let mut streak = FailureStreak::default();

        tracing::info!("Starting to {} for {} users", category.action(), total);

        for (index, uid) in uids.iter().enumerate() {
            let position = index + 1;
            if skipped.contains(uid.as_str()) {
                tracing::debug!("{} is already in the list ({}/{})", uid, position, total);
                report.push(OperationRecord::skipped(uid));
                continue;
            }

            streak.check(position, total)?;

            let record = match self.add_user(uid, category).await {
                Ok(record) => {
                    tracing::info!("progress: {}/{}", position, total);
                    record
                }
                Err(e) => {
                    tracing::error!("{} failed: {} ({}/{})", uid, e, position, total);
                    OperationRecord::failed(uid, e)
                }
            };
            streak.record(&record);
            report.push(record);

            self.pacer.pause().await;
        }

        tracing::info!(
            "Adding finished, succeeded: {}/{}",
            report.success_count(),
            total
        );
        Ok(report)
    }

    /// uids on one of the account's lists; errors are logged and yield
    /// an empty list
    pub async fn export_users(&self, kind: ListKind) -> Vec<String> {
        let account = &self.settings().account.account;
        tracing::info!("Reading the {} list of {}", kind, account);

        match self.fetch_list(kind).await {
            Ok(uids) if uids.is_empty() => {
                tracing::info!("The {} list of {} is empty", kind, account);
                uids
            }
            Ok(uids) => {
                tracing::info!("Read {} entries", uids.len());
                uids
            }
            Err(e) => {
                tracing::error!("Failed to read the {} list of {}: {}", kind, account, e);
                Vec::new()
            }
        }
    }

    /// uids on one of the account's lists
    pub async fn fetch_list(&self, kind: ListKind) -> Result<Vec<String>> {
        let url = self
            .session
            .endpoints()
            .friend_list(&self.settings().account.account, kind)?;

        let html = self
            .session
            .client()
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_friend_list(&html)
    }

    /// Activity of a user, or safe defaults when it cannot be read
    pub async fn get_user_info(&self, uid: &str) -> UserInfo {
        tracing::debug!("Reading info of {}", uid);
        let min_visit = self.settings().clean.min_visit;

        match self.fetch_user_info(uid).await {
            Ok(Some(info)) => info,
            Ok(None) => {
                tracing::warn!("No user_info block for {}, keeping defaults", uid);
                UserInfo::fallback(uid, min_visit)
            }
            Err(e) => {
                tracing::error!("Failed to read info of {}: {}", uid, e);
                UserInfo::fallback(uid, min_visit)
            }
        }
    }

    /// Activity of a user from `block_list.php`
    pub async fn fetch_user_info(&self, uid: &str) -> Result<Option<UserInfo>> {
        let body: serde_json::Value = self
            .session
            .client()
            .get(self.session.endpoints().block_info(uid)?)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        parse_user_info(uid, &body, self.settings().clean.min_visit)
    }

    /// Remove one user from the block list via `friend_del.php`
    pub async fn remove_user(&self, uid: &str) -> Result<OperationRecord> {
        tracing::debug!("Removing {}", uid);
        let token = self.session.temp_csrf().await?;

        let message = self
            .session
            .post(self.session.endpoints().friend_del()?)
            .await
            .form(&[("fid", uid), ("token", token.as_str())])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let status = if message.contains(REMOVE_SUCCESS_MARKER) {
            tracing::debug!("Removed {}: {}", uid, message);
            OperationStatus::Succeeded
        } else {
            tracing::info!("Removing {} was not accepted: {}", uid, message);
            OperationStatus::Rejected
        };
        Ok(OperationRecord::new(uid, status, message))
    }

    /// Remove every uid
    pub async fn remove_users(&self, uids: &[String]) -> Result<BatchReport> {
        let total = uids.len();
        let mut report = BatchReport::new();
        let mut streak = FailureStreak::default();
        tracing::info!("Removing {} users", total);

        for (index, uid) in uids.iter().enumerate() {
            let position = index + 1;
            streak.check(position, total)?;

            let record = match self.remove_user(uid).await {
                Ok(record) => {
                    tracing::info!("progress: {}/{}", position, total);
                    record
                }
                Err(e) => {
                    tracing::error!("Removing {} failed: {} ({}/{})", uid, e, position, total);
                    OperationRecord::failed(uid, e)
                }
            };
            streak.record(&record);
            report.push(record);

            self.pacer.pause().await;
        }

        tracing::info!(
            "Removal finished, succeeded: {}/{}",
            report.success_count(),
            total
        );
        Ok(report)
    }

    /// Remove the user when inactive, otherwise keep it
    pub async fn smart_remove_user(
        &self,
        uid: &str,
        min_visits: u32,
        min_days: i64,
    ) -> Result<OperationRecord> {
        let info = self.get_user_info(uid).await;
        tracing::debug!("{}", info);

        let today = today();
        let reasons = info.removal_reasons(min_visits, min_days, today);
        if reasons.is_empty() {
            let message = format!(
                "kept (visits: {}, days since login: {})",
                info.visit_count,
                info.days_since_login(today)
            );
            tracing::debug!("{} {}", uid, message);
            return Ok(OperationRecord::new(uid, OperationStatus::Retained, message));
        }

        let record = self.remove_user(uid).await?;
        tracing::debug!(
            "{} removed: {}, reply: {}",
            uid,
            reasons.join(", "),
            record.message
        );
        Ok(record)
    }

    /// Check every uid and remove the inactive ones
    pub async fn smart_remove_users(
        &self,
        uids: &[String],
        min_visits: u32,
        min_days: i64,
    ) -> Result<BatchReport> {
        let total = uids.len();
        let mut report = BatchReport::new();
        let mut streak = FailureStreak::default();
        tracing::info!(
            "Checking {} users (min visits: {}, max days since login: {})",
            total,
            min_visits,
            min_days
        );

        for (index, uid) in uids.iter().enumerate() {
            let position = index + 1;
            streak.check(position, total)?;

            let record = match self.smart_remove_user(uid, min_visits, min_days).await {
                Ok(record) => {
                    tracing::info!("progress: {}/{}", position, total);
                    record
                }
                Err(e) => {
                    tracing::error!("Checking {} failed: {} ({}/{})", uid, e, position, total);
                    OperationRecord::failed(uid, e)
                }
            };
            streak.record(&record);
            report.push(record);

            self.pacer.pause().await;
        }

        tracing::info!(
            "Clean finished, removed: {}, kept: {}, failed: {}",
            report.count(OperationStatus::Succeeded),
            report.count(OperationStatus::Retained),
            report.count(OperationStatus::Failed) + report.count(OperationStatus::Rejected)
        );
        Ok(report)
    }
}
