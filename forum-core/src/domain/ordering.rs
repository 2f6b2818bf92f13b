//! Comment ordering engine.
//!
//! Pure and deterministic: the marked answer (when present in the
//! collection) sorts strictly first, everything else newest-first, ties
//! stable on input order.

use crate::domain::comment::CommentId;
use crate::domain::comment_loader::CommentView;

/// Order a comment collection for rendering.
///
/// Tolerates `marked_answer_id` being `None` or referencing a comment not in
/// the collection; both degrade to a plain descending-time sort. Idempotent:
/// re-applying to its own output yields the same order.
pub fn order_comments(
    mut comments: Vec<CommentView>,
    marked_answer_id: Option<&CommentId>,
) -> Vec<CommentView> {
    let marked = marked_answer_id
        .and_then(|marked| {
            comments
                .iter()
                .position(|view| view.comment.id() == marked)
        })
        .map(|index| comments.remove(index));

    // Vec::sort_by is stable, so equal timestamps keep their input order.
    comments.sort_by(|a, b| b.comment.created_at().cmp(&a.comment.created_at()));

    if let Some(view) = marked {
        comments.insert(0, view);
    }
    comments
}
