//! Comment thread resolution.
//!
//! Replies stay independent entries in the renderer's annotation list and
//! point at their parent through `inReplyTo`.

use markup_model::{CommentRecord, ExternalAnnotation};

/// Collect the replies to `parent_id`, in sibling-list order.
pub fn resolve_comments(parent_id: &str, siblings: &[ExternalAnnotation]) -> Vec<CommentRecord> {
    siblings
        .iter()
        .filter(|entry| entry.in_reply_to.as_deref() == Some(parent_id))
        .map(|entry| CommentRecord {
            id: entry.id.clone(),
            title: entry.title_obj.text.clone(),
            date: entry.modification_date.clone(),
            content: entry.contents_obj.text.clone(),
        })
        .collect()
}
