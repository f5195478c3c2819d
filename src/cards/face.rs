//! Faces: the 12 photos shown on the cards.
//!
//! `FaceId` is what the game compares; the asset string is only handed
//! back to the host for drawing.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::config::FACE_COUNT;
use crate::core::error::ConfigError;

/// Identifier of a face, an index into the [`FaceSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FaceId(pub u8);

impl FaceId {
    /// Create a new face ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Iterate over every face id.
    pub fn all() -> impl Iterator<Item = FaceId> {
        (0..FACE_COUNT as u8).map(FaceId)
    }
}

impl std::fmt::Display for FaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Face({})", self.0)
    }
}

/// Check that `faces` holds exactly [`FACE_COUNT`] distinct, non-empty entries.
pub(crate) fn validate_faces(faces: &[String]) -> Result<(), ConfigError> {
    if faces.len() != FACE_COUNT {
        return Err(ConfigError::WrongFaceCount {
            expected: FACE_COUNT,
            found: faces.len(),
        });
    }

    let mut seen = FxHashSet::default();
    for (i, face) in faces.iter().enumerate() {
        if face.is_empty() {
            return Err(ConfigError::EmptyFace(i));
        }
        if !seen.insert(face.as_str()) {
            return Err(ConfigError::DuplicateFace(face.clone()));
        }
    }

    Ok(())
}

/// The validated list of face assets supplied by the host.
///
/// Deserializes from a plain list and runs the same checks as [`FaceSet::new`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FaceSet {
    assets: Vec<String>,
}

impl FaceSet {
    /// Validate and wrap a list of assets.
    pub fn new<I, S>(assets: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let assets: Vec<String> = assets.into_iter().map(Into::into).collect();
        validate_faces(&assets)?;
        Ok(Self { assets })
    }

    /// Asset string for a face.
    #[must_use]
    pub fn asset(&self, face: FaceId) -> &str {
        &self.assets[face.0 as usize]
    }

    /// All assets in face-id order.
    #[must_use]
    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl TryFrom<Vec<String>> for FaceSet {
    type Error = ConfigError;

    fn try_from(assets: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(assets)
    }
}

impl From<FaceSet> for Vec<String> {
    fn from(faces: FaceSet) -> Self {
        faces.assets
    }
}
