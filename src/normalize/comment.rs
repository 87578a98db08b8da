use serde_json::Value;

use super::fields::{first_rich_text, first_text, first_user, now, text_or};
use crate::model::{Comment, User};

const BODY: &[&str] = &["comment", "body", "content", "bodyText"];

pub fn normalize_comment(raw: &Value) -> Comment {
    let created = first_text(raw, &["created", "created_at"]).unwrap_or_else(now);
    let updated =
        first_text(raw, &["updated", "updated_at"]).unwrap_or_else(|| created.clone());

    Comment {
        id: text_or(raw, &["id", "comment_id"], ""),
        author: first_user(raw, &["author", "user", "created_by"]).unwrap_or_else(User::unknown),
        body_text: first_rich_text(raw, BODY).unwrap_or_default(),
        created,
        updated,
    }
}
