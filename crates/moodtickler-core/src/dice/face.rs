//! Face axes of the die and face-up detection.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::mood::Mood;

/// One of the six faces, named by its outward local axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    /// Local +Y
    PosY,
    /// Local -Y
    NegY,
    /// Local +X
    PosX,
    /// Local -X
    NegX,
    /// Local +Z
    PosZ,
    /// Local -Z
    NegZ,
}

impl Face {
    /// All faces in axis order. Ties in face-up detection go to the earliest.
    pub const ALL: [Face; 6] = [
        Face::PosY,
        Face::NegY,
        Face::PosX,
        Face::NegX,
        Face::PosZ,
        Face::NegZ,
    ];

    /// Outward unit normal in body space.
    #[must_use]
    pub fn axis(self) -> Vec3 {
        match self {
            Face::PosY => Vec3::Y,
            Face::NegY => Vec3::NEG_Y,
            Face::PosX => Vec3::X,
            Face::NegX => Vec3::NEG_X,
            Face::PosZ => Vec3::Z,
            Face::NegZ => Vec3::NEG_Z,
        }
    }

    /// The mood printed on this face.
    #[must_use]
    pub fn mood(self) -> Mood {
        Mood::DIE_FACES[self as usize]
    }

    /// Upward alignment of this face for a body with `orientation`.
    #[must_use]
    pub fn alignment(self, orientation: Quat, up: Vec3) -> f32 {
        (orientation * self.axis()).dot(up)
    }
}

/// The face pointing most nearly along `up`, with its alignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceUp {
    /// Winning face
    pub face: Face,
    /// Dot product of the face normal (world space) with `up`
    pub alignment: f32,
}

/// Find the face whose world-space normal has the largest dot product with `up`.
///
/// Faces are scanned in [`Face::ALL`] order with a strict comparison, so equal
/// alignments resolve to the earlier face.
#[must_use]
pub fn face_up(orientation: Quat, up: Vec3) -> FaceUp {
    let mut best = FaceUp {
        face: Face::ALL[0],
        alignment: Face::ALL[0].alignment(orientation, up),
    };
    for face in &Face::ALL[1..] {
        let alignment = face.alignment(orientation, up);
        if alignment > best.alignment {
            best = FaceUp {
                face: *face,
                alignment,
            };
        }
    }
    best
}
