//! Parsing of the site's HTML and JSON replies

use crate::{
    Error, Result,
    types::{UserInfo, serde_helpers::deserialize_flexible_u32},
};
use chrono::{Local, NaiveDate};
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;

/// Profile item holding the number of days the user visited
pub const VISIT_COUNT_LABEL: &str = "上站次數";

/// Profile item holding the last login date
pub const LAST_LOGIN_LABEL: &str = "上站日期";

/// Substring of a successful `friend_add.php` reply
pub const ADD_SUCCESS_MARKER: &str = "成功";

/// Substring of a successful `friend_del.php` reply
pub const REMOVE_SUCCESS_MARKER: &str = "D-ONE";

const USER_ID_SELECTOR: &str = "div.user_id";
const LOGIN_DATE_FORMAT: &str = "%Y-%m-%d";

/// uids listed on a `friendList.php` page
pub fn parse_friend_list(html: &str) -> Result<Vec<String>> {
    let selector = Selector::parse(USER_ID_SELECTOR)
        .map_err(|e| Error::internal(format!("invalid selector: {}", e)))?;
    let document = Html::parse_document(html);

    Ok(document
        .select(&selector)
        .filter_map(|element| element.value().attr("data-origin"))
        .map(|uid| uid.trim().to_string())
        .filter(|uid| !uid.is_empty())
        .collect())
}

/// Render the `data` field of a `friend_add.php` reply as text.
///
/// The whole body is rendered when `data` is missing.
pub fn render_add_reply(body: &Value) -> String {
    match body.get("data") {
        Some(data) => render_value(data),
        None => render_value(body),
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| format!("{}: {}", key, render_value(value)))
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct BlockListResponse {
    data: BlockListData,
}

#[derive(Debug, Deserialize)]
struct BlockListData {
    #[serde(default)]
    blocks: Vec<Block>,
}

#[derive(Debug, Deserialize)]
struct Block {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Value,
}

#[derive(Debug, Deserialize)]
struct UserInfoBlock {
    #[serde(default)]
    items: Vec<UserInfoItem>,
}

#[derive(Debug, Deserialize)]
struct UserInfoItem {
    name: String,
    #[serde(default)]
    value: Value,
}

#[derive(Debug, Deserialize)]
struct Counter(#[serde(deserialize_with = "deserialize_flexible_u32")] Option<u32>);

/// Activity figures from a `block_list.php` reply.
///
/// `Ok(None)` when the reply has no `user_info` block. Missing items fall
/// back to [`UserInfo::fallback`] values; malformed items are errors.
pub fn parse_user_info(uid: &str, body: &Value, min_visit: u32) -> Result<Option<UserInfo>> {
    let response: BlockListResponse = serde_json::from_value(body.clone())?;

    let Some(block) = response
        .data
        .blocks
        .into_iter()
        .find(|block| block.kind == "user_info")
    else {
        return Ok(None);
    };

    let block: UserInfoBlock = serde_json::from_value(block.data)?;
    let mut info = UserInfo::fallback(uid, min_visit);

    for item in block.items {
        match item.name.as_str() {
            VISIT_COUNT_LABEL => {
                if let Counter(Some(count)) = serde_json::from_value(item.value)? {
                    info.visit_count = count;
                }
            }
            LAST_LOGIN_LABEL => {
                let raw = item.value.as_str().ok_or_else(|| {
                    Error::site_response("block_list.php", "last login date is not a string")
                })?;
                info.last_login = NaiveDate::parse_from_str(raw.trim(), LOGIN_DATE_FORMAT)?;
            }
            _ => {}
        }
    }

    Ok(Some(info))
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const FRIEND_LIST: &str = r#"
<html><body>
  <div class="user_box">
    <div class="user_id" data-origin="alpha">alpha</div>
  </div>
  <div class="user_box">
    <div class="user_id" data-origin=" beta ">beta</div>
  </div>
  <div class="user_name" data-origin="not_a_uid"></div>
  <div class="user_id">no attribute</div>
</body></html>"#;

    #[test]
    fn test_parse_friend_list() {
        let uids = parse_friend_list(FRIEND_LIST).unwrap();
        assert_eq!(uids, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_parse_empty_friend_list() {
        assert!(parse_friend_list("<html></html>").unwrap().is_empty());
    }

    #[test]
    fn test_render_add_reply() {
        assert_eq!(
            render_add_reply(&json!({"data": {"ok": "加入黑名單成功"}})),
            "ok: 加入黑名單成功"
        );
        assert_eq!(render_add_reply(&json!({"data": "done"})), "done");
        assert_eq!(
            render_add_reply(&json!({"error": {"code": 403}})),
            "error: code: 403"
        );
    }

    fn user_info_body(items: Value) -> Value {
        json!({
            "data": {
                "blocks": [
                    {"type": "banner", "data": {}},
                    {"type": "user_info", "data": {"items": items}}
                ]
            }
        })
    }

    #[test]
    fn test_parse_user_info() {
        let body = user_info_body(json!([
            {"name": "暱稱", "value": "someone"},
            {"name": "上站次數", "value": "1,024"},
            {"name": "上站日期", "value": "2024-05-01"}
        ]));

        let info = parse_user_info("someone", &body, 10).unwrap().unwrap();
        assert_eq!(info.uid, "someone");
        assert_eq!(info.visit_count, 1024);
        assert_eq!(info.last_login, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }

    #[test]
    fn test_parse_user_info_numeric_counter() {
        let body = user_info_body(json!([{"name": "上站次數", "value": 3}]));
        let info = parse_user_info("u", &body, 10).unwrap().unwrap();
        assert_eq!(info.visit_count, 3);
        assert_eq!(info.last_login, today());
    }

    #[test]
    fn test_parse_user_info_missing_items_use_fallback() {
        let body = user_info_body(json!([]));
        let info = parse_user_info("u", &body, 10).unwrap().unwrap();
        assert_eq!(info, UserInfo::fallback("u", 10));
    }

    #[test]
    fn test_parse_user_info_without_block() {
        let body = json!({"data": {"blocks": [{"type": "banner"}]}});
        assert_eq!(parse_user_info("u", &body, 10).unwrap(), None);
    }

    #[test]
    fn test_parse_user_info_bad_date() {
        let body = user_info_body(json!([{"name": "上站日期", "value": "yesterday"}]));
        assert!(matches!(
            parse_user_info("u", &body, 10),
            Err(Error::DateParse(_))
        ));
    }

    #[test]
    fn test_parse_user_info_bad_shape() {
        assert!(parse_user_info("u", &json!({"error": "nope"}), 10).is_err());
    }
}
