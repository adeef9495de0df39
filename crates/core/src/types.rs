/// Primary keys are opaque strings (UUID v4 in canonical text form).
pub type EntityId = String;

/// Generate a fresh primary key for a new row.
pub fn new_entity_id() -> EntityId {
    uuid::Uuid::new_v4().to_string()
}
