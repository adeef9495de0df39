//! Comment domain type, request payloads and payload validation.

use std::collections::BTreeMap;

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::EntityId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Required comment fields, in the order they are checked.
pub const REQUIRED_COMMENT_FIELDS: [&str; 4] = ["email", "body", "name", "productId"];

/// Reason reported when a comment payload carries no fields at all.
pub const EMPTY_COMMENT_REASON: &str = "Comment is absent or empty";

// ---------------------------------------------------------------------------
// Domain object
// ---------------------------------------------------------------------------

/// A comment attached to a product, as exposed to API clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub body: String,
    pub product_id: EntityId,
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Untrusted comment fields as received from a client.
///
/// Every field is optional at this stage; [`validate_comment`] turns a
/// complete payload into a [`NewComment`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub body: Option<String>,
    pub product_id: Option<EntityId>,
    /// Keys outside the comment fields. Only their presence matters.
    #[serde(flatten)]
    pub other: BTreeMap<String, IgnoredAny>,
}

impl CommentPayload {
    /// `true` when the client sent no keys at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.body.is_none()
            && self.product_id.is_none()
            && self.other.is_empty()
    }

    fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "email" => &self.email,
            "body" => &self.body,
            "name" => &self.name,
            "productId" => &self.product_id,
            _ => return None,
        };
        value.as_deref()
    }
}

/// Body of `PATCH /comments`: an optional target id plus partial fields.
///
/// Only `name`, `body` and `email` are updatable. When no row matches, the
/// same payload is re-validated as a full comment and inserted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPatch {
    pub id: Option<EntityId>,
    #[serde(flatten)]
    pub fields: CommentPayload,
}

impl CommentPatch {
    /// Updatable columns present in the payload, in fixed `name, body, email`
    /// order. Placeholders are bound in this order.
    pub fn updates(&self) -> Vec<(&'static str, &str)> {
        [
            ("name", self.fields.name.as_deref()),
            ("body", self.fields.body.as_deref()),
            ("email", self.fields.email.as_deref()),
        ]
        .into_iter()
        .filter_map(|(column, value)| value.map(|v| (column, v)))
        .collect()
    }

    /// Validate the patch body as a full comment. A sent `id` counts as a
    /// key, so `{"id": ..}` alone reports the first missing field.
    pub fn validate(&self) -> Result<NewComment, CoreError> {
        if self.id.is_some() {
            check_required_fields(&self.fields)
        } else {
            validate_comment(&self.fields)
        }
    }
}

/// A validated comment ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    pub name: String,
    pub email: String,
    pub body: String,
    pub product_id: EntityId,
}

impl NewComment {
    /// Attach a freshly generated id, producing the domain object.
    pub fn with_id(self, id: EntityId) -> Comment {
        Comment {
            id,
            name: self.name,
            email: self.email,
            body: self.body,
            product_id: self.product_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a comment payload.
///
/// Fails with [`EMPTY_COMMENT_REASON`] when the body had no keys, then reports
/// the first missing or empty field among [`REQUIRED_COMMENT_FIELDS`].
pub fn validate_comment(payload: &CommentPayload) -> Result<NewComment, CoreError> {
    if payload.is_empty() {
        return Err(CoreError::Validation(EMPTY_COMMENT_REASON.to_string()));
    }

    check_required_fields(payload)
}

fn check_required_fields(payload: &CommentPayload) -> Result<NewComment, CoreError> {
    for field in REQUIRED_COMMENT_FIELDS {
        if payload.field(field).map_or(true, str::is_empty) {
            return Err(CoreError::Validation(format!("Field {field} is absent")));
        }
    }

    Ok(NewComment {
        name: payload.name.clone().unwrap_or_default(),
        email: payload.email.clone().unwrap_or_default(),
        body: payload.body.clone().unwrap_or_default(),
        product_id: payload.product_id.clone().unwrap_or_default(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
