/// Pad value for empty grid cells. Never a real token id.
pub const PADDING_SENTINEL: &str = "-1";

/// Cards in the standalone vote table (3 rows × 5 columns).
pub const NOUNS_PER_VOTE_TABLE: usize = 15;

/// Cards per tally column on the vote page (4 rows × 4 columns).
pub const NOUNS_PER_VOTE_CARD: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarSlot {
    Placeholder,
    Token(String),
}

impl AvatarSlot {
    pub fn token_id(&self) -> Option<&str> {
        match self {
            AvatarSlot::Token(id) => Some(id),
            AvatarSlot::Placeholder => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, AvatarSlot::Placeholder)
    }
}

/// Right-pad with placeholders, or truncate, to exactly `slots` entries.
pub fn pad_token_ids(ids: &[String], slots: usize) -> Vec<AvatarSlot> {
    ids.iter()
        .map(|id| id.as_str())
        .chain(std::iter::repeat(PADDING_SENTINEL))
        .take(slots)
        .map(|id| {
            if id == PADDING_SENTINEL {
                AvatarSlot::Placeholder
            } else {
                AvatarSlot::Token(id.to_string())
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    pub rows: usize,
    pub columns: usize,
}

impl GridShape {
    pub const TABLE: GridShape = GridShape { rows: 3, columns: 5 };
    pub const CARD: GridShape = GridShape { rows: 4, columns: 4 };

    pub fn slots(&self) -> usize {
        self.rows * self.columns
    }
}

/// Fixed-shape avatar layout for one side of a vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarGrid {
    pub shape: GridShape,
    pub slots: Vec<AvatarSlot>,
}

impl AvatarGrid {
    pub fn new(shape: GridShape, ids: &[String]) -> Self {
        Self { shape, slots: pad_token_ids(ids, shape.slots()) }
    }

    pub fn table(ids: &[String]) -> Self {
        Self::new(GridShape::TABLE, ids)
    }

    pub fn card(ids: &[String]) -> Self {
        Self::new(GridShape::CARD, ids)
    }

    pub fn rows(&self) -> Vec<&[AvatarSlot]> {
        self.slots.chunks(self.shape.columns).collect()
    }

    pub fn placeholder_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_placeholder()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| i.to_string()).collect()
    }

    #[test]
    fn pads_short_lists() {
        let slots = pad_token_ids(&ids(3), NOUNS_PER_VOTE_TABLE);
        assert_eq!(slots.len(), 15);
        assert_eq!(slots.iter().filter(|s| s.is_placeholder()).count(), 12);
        assert_eq!(slots[2], AvatarSlot::Token("2".into()));
        assert!(slots[3..].iter().all(|s| s.is_placeholder()));
    }

    #[test]
    fn truncates_long_lists() {
        let slots = pad_token_ids(&ids(40), NOUNS_PER_VOTE_CARD);
        assert_eq!(slots.len(), 16);
        assert!(slots.iter().all(|s| !s.is_placeholder()));
        assert_eq!(slots[15].token_id(), Some("15"));
    }

    #[test]
    fn placeholder_count_matches_formula() {
        for len in [0, 1, 15, 16, 17, 30] {
            let grid = AvatarGrid::card(&ids(len));
            assert_eq!(grid.placeholder_count(), 16 - len.min(16));
            let first_pad = grid.slots.iter().position(|s| s.is_placeholder()).unwrap_or(16);
            assert!(grid.slots[first_pad..].iter().all(|s| s.is_placeholder()));
        }
    }

    #[test]
    fn grid_shapes_are_fixed() {
        let table = AvatarGrid::table(&ids(1));
        assert_eq!(table.rows().len(), 3);
        assert!(table.rows().iter().all(|r| r.len() == 5));

        let card = AvatarGrid::card(&[]);
        assert_eq!(card.rows().len(), 4);
        assert!(card.rows().iter().all(|r| r.len() == 4));
    }
}
