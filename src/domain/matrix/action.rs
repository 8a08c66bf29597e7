//! Improvement actions - the second family of X-Matrix columns.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ActionId, ValidationError};

/// An improvement action owned by a named person or team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    id: ActionId,
    description: String,
    owner: String,
}

impl ActionItem {
    /// Creates a new action; description and owner are required.
    pub fn new(
        description: impl Into<String>,
        owner: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(ValidationError::empty_field("description"));
        }
        let owner = owner.into();
        if owner.trim().is_empty() {
            return Err(ValidationError::empty_field("owner"));
        }
        Ok(Self {
            id: ActionId::new(),
            description,
            owner,
        })
    }

    pub fn id(&self) -> ActionId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_complete_fields() {
        let action = ActionItem::new("Introduce daily standup", "Ann").unwrap();
        assert_eq!(action.description(), "Introduce daily standup");
        assert_eq!(action.owner(), "Ann");
    }

    #[test]
    fn new_rejects_empty_description() {
        assert_eq!(
            ActionItem::new("", "Ann"),
            Err(ValidationError::empty_field("description"))
        );
    }

    #[test]
    fn new_rejects_empty_owner() {
        assert_eq!(
            ActionItem::new("Introduce daily standup", ""),
            Err(ValidationError::empty_field("owner"))
        );
    }
}
