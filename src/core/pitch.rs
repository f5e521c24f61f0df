//! Pitch-class sets as chord symbols.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of pitch classes in twelve-tone equal temperament.
pub const PITCH_CLASSES: u8 = 12;

/// Highest valid MIDI note number.
const MIDI_NOTE_MAX: u8 = 127;

/// A chord reduced to its pitch classes relative to a root.
///
/// Offsets are stored sorted and deduplicated in `0..12`, so voicings that
/// differ only in octave or doubling map to the same symbol. This is the
/// canonical form an external chord-notation converter is expected to
/// produce (`"C:maj7"` becomes `{0, 4, 7, 11}`).
///
/// # Example
///
/// ```rust
/// use chordchain::core::PitchSet;
///
/// let voicing = PitchSet::from_midi_notes(&[48, 64, 67, 60]);
/// assert_eq!(voicing.classes(), &[0, 4, 7]);
/// assert_eq!(voicing.to_midi_notes(60), vec![60, 64, 67]);
/// assert_eq!(voicing.to_string(), "{0,4,7}");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PitchSet(Vec<u8>);

impl PitchSet {
    /// Build from arbitrary offsets, folding them into one octave.
    pub fn new(offsets: impl IntoIterator<Item = u8>) -> Self {
        let mut classes: Vec<u8> = offsets.into_iter().map(|o| o % PITCH_CLASSES).collect();
        classes.sort_unstable();
        classes.dedup();
        Self(classes)
    }

    /// Build from sounding MIDI notes, measuring offsets from the lowest note.
    pub fn from_midi_notes(notes: &[u8]) -> Self {
        let Some(&root) = notes.iter().min() else {
            return Self(Vec::new());
        };
        Self::new(notes.iter().map(|n| n - root))
    }

    /// Sorted pitch-class offsets.
    pub fn classes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Voice the set in close position above `root`.
    ///
    /// Notes that would exceed the MIDI range are dropped.
    pub fn to_midi_notes(&self, root: u8) -> Vec<u8> {
        self.0
            .iter()
            .filter_map(|&class| root.checked_add(class))
            .filter(|&note| note <= MIDI_NOTE_MAX)
            .collect()
    }
}

impl fmt::Display for PitchSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, class) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", class)?;
        }
        write!(f, "}}")
    }
}
