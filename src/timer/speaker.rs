use uuid::Uuid;

/// One attendee's place in the speaking order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Speaker {
    pub id: Uuid,
    /// The attendee name.
    pub name: String,
    /// True once the attendee has finished their turn to speak.
    pub is_completed: bool,
}

impl Speaker {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_completed: false,
        }
    }

    /// Build the speaking order for a meeting. An empty attendee list
    /// becomes a single placeholder speaker so the per-speaker split is
    /// always defined.
    pub fn roster(attendees: &[String]) -> Vec<Speaker> {
        if attendees.is_empty() {
            vec![Speaker::new("Player 1")]
        } else {
            attendees.iter().map(Speaker::new).collect()
        }
    }
}
