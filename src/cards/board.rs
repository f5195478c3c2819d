//! The board: 24 cards, each of the 12 faces exactly twice.
//!
//! A board is shuffled once when the session is built and never changes
//! afterwards. Card positions are addressed with [`CardIndex`].

use serde::{Deserialize, Serialize};

use super::face::FaceId;
use crate::core::config::FACE_COUNT;
use crate::core::error::BoardError;
use crate::core::rng::GameRng;

/// Number of cards on the board.
pub const BOARD_SIZE: usize = FACE_COUNT * 2;

/// Position of a card on the board, always in `0..BOARD_SIZE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CardIndex(u8);

impl CardIndex {
    /// Create a card index.
    ///
    /// Panics if `index >= BOARD_SIZE`; hosts only dispatch indices taken
    /// from the layout.
    #[must_use]
    pub fn new(index: usize) -> Self {
        assert!(index < BOARD_SIZE, "card index {index} out of range");
        Self(index as u8)
    }

    /// Create a card index, or `None` if out of range.
    #[must_use]
    pub fn try_new(index: usize) -> Option<Self> {
        (index < BOARD_SIZE).then(|| Self(index as u8))
    }

    /// Get the position as a usize.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over every position on the board.
    pub fn all() -> impl Iterator<Item = CardIndex> {
        (0..BOARD_SIZE as u8).map(CardIndex)
    }
}

impl TryFrom<u8> for CardIndex {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(value as usize).ok_or_else(|| format!("card index {value} out of range"))
    }
}

impl From<CardIndex> for u8 {
    fn from(index: CardIndex) -> Self {
        index.0
    }
}

impl std::fmt::Display for CardIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The shuffled sequence of faces, one per card position.
///
/// Serializes as a plain list of face ids; deserializing goes through
/// [`Board::from_faces`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FaceId>", into = "Vec<FaceId>")]
pub struct Board {
    cards: Vec<FaceId>,
}

impl Board {
    /// Duplicate every face and shuffle the 24 cards.
    #[must_use]
    pub fn shuffled(rng: &mut GameRng) -> Self {
        let mut cards: Vec<FaceId> = FaceId::all().flat_map(|face| [face, face]).collect();
        rng.shuffle(&mut cards);
        Self { cards }
    }

    /// Build a board from a fixed order.
    ///
    /// The order must contain every face exactly twice.
    pub fn from_faces(cards: Vec<FaceId>) -> Result<Self, BoardError> {
        if cards.len() != BOARD_SIZE {
            return Err(BoardError::WrongCardCount {
                expected: BOARD_SIZE,
                found: cards.len(),
            });
        }

        let mut counts = [0usize; FACE_COUNT];
        for face in &cards {
            let slot = counts
                .get_mut(face.0 as usize)
                .ok_or(BoardError::FaceOutOfRange(face.0))?;
            *slot += 1;
        }

        if let Some((face, &count)) = counts.iter().enumerate().find(|(_, &c)| c != 2) {
            return Err(BoardError::UnpairedFace {
                face: face as u8,
                count,
            });
        }

        Ok(Self { cards })
    }

    /// Face at a position.
    #[must_use]
    pub fn face_at(&self, index: CardIndex) -> FaceId {
        self.cards[index.index()]
    }

    /// Do two distinct positions show the same face?
    #[must_use]
    pub fn is_pair(&self, a: CardIndex, b: CardIndex) -> bool {
        a != b && self.face_at(a) == self.face_at(b)
    }

    /// The other position holding the same face.
    #[must_use]
    pub fn partner_of(&self, index: CardIndex) -> CardIndex {
        let face = self.face_at(index);
        CardIndex::all()
            .find(|&other| other != index && self.face_at(other) == face)
            .unwrap_or(index)
    }

    /// Both positions of every face, in face-id order.
    #[must_use]
    pub fn pairs(&self) -> Vec<(CardIndex, CardIndex)> {
        FaceId::all()
            .filter_map(|face| {
                let mut positions = CardIndex::all().filter(|&i| self.face_at(i) == face);
                Some((positions.next()?, positions.next()?))
            })
            .collect()
    }

    /// Distinct faces in order of first appearance on the board.
    ///
    /// Hosts preload each image once, in this order.
    #[must_use]
    pub fn preload_order(&self) -> Vec<FaceId> {
        let mut seen = [false; FACE_COUNT];
        self.cards
            .iter()
            .copied()
            .filter(|face| !std::mem::replace(&mut seen[face.0 as usize], true))
            .collect()
    }

    /// Faces in position order.
    #[must_use]
    pub fn faces(&self) -> &[FaceId] {
        &self.cards
    }

    /// Iterate over `(position, face)`.
    pub fn iter(&self) -> impl Iterator<Item = (CardIndex, FaceId)> + '_ {
        CardIndex::all().zip(self.cards.iter().copied())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl TryFrom<Vec<FaceId>> for Board {
    type Error = BoardError;

    fn try_from(cards: Vec<FaceId>) -> Result<Self, Self::Error> {
        Self::from_faces(cards)
    }
}

impl From<Board> for Vec<FaceId> {
    fn from(board: Board) -> Self {
        board.cards
    }
}
