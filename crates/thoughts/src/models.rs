use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationUser {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub normalized_email: String,
    pub display_name: String,
    pub created_at: OffsetDateTime,
}

/// A themed space that groups thoughts.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ThoughtHole {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: OffsetDateTime,
    pub modified_at: OffsetDateTime,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Thought {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub mood: Mood,
    pub likes: i32,
    pub views: i32,
    pub thought_hole_id: Uuid,
    pub application_user_id: Uuid,
    pub created_at: OffsetDateTime,
    pub modified_at: OffsetDateTime,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub body: String,
    pub parent_id: Uuid,
    pub parent_discriminator: Discriminator,
    pub application_user_id: Uuid,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "mood", rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Calm,
    Curious,
    Anxious,
}

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Angry,
        Mood::Calm,
        Mood::Curious,
        Mood::Anxious,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
            Mood::Calm => "calm",
            Mood::Curious => "curious",
            Mood::Anxious => "anxious",
        }
    }
}

/// Which kind of entity a comment hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "parent_discriminator", rename_all = "snake_case")]
pub enum Discriminator {
    Thought,
    ThoughtHole,
}

impl Discriminator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Discriminator::Thought => "thought",
            Discriminator::ThoughtHole => "thought_hole",
        }
    }
}
