//! The mood catalog.
//!
//! Ten moods, each with a canned response (message, joke, on-screen action),
//! a chart colour, an emoji and a sound clip id. The first six are also the
//! faces of the die.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MoodError;

/// A selectable mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Happy
    Happy,
    /// Sad
    Sad,
    /// Angry
    Angry,
    /// Tired
    Tired,
    /// Excited
    Excited,
    /// Silly
    Silly,
    /// Anxious
    Anxious,
    /// Peaceful
    Peaceful,
    /// Confident
    Confident,
    /// Curious
    Curious,
}

/// Canned response and presentation hints for one mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodData {
    /// Greeting shown on the response card
    pub message: &'static str,
    /// A pun about the mood
    pub joke: &'static str,
    /// Description of the on-screen effect
    pub action: &'static str,
    /// Chart colour as `#RRGGBB`
    pub color: &'static str,
    /// Face emoji
    pub emoji: &'static str,
    /// Sound clip id (file stem under `sounds/`)
    pub sound_clip: &'static str,
}

impl MoodData {
    /// Path of the sound clip relative to an asset base URL, e.g. `"/sounds/bach-air.mp3"`.
    #[must_use]
    pub fn sound_path(&self, base_url: &str) -> String {
        let base = if base_url.is_empty() { "/" } else { base_url };
        let separator = if base.ends_with('/') { "" } else { "/" };
        format!("{base}{separator}sounds/{}.mp3", self.sound_clip)
    }
}

impl Mood {
    /// Number of moods in the catalog.
    pub const COUNT: usize = 10;

    /// Every mood, in catalog order.
    pub const ALL: [Mood; Self::COUNT] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Angry,
        Mood::Tired,
        Mood::Excited,
        Mood::Silly,
        Mood::Anxious,
        Mood::Peaceful,
        Mood::Confident,
        Mood::Curious,
    ];

    /// The six moods printed on the die, in face-axis order.
    pub const DIE_FACES: [Mood; 6] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Angry,
        Mood::Tired,
        Mood::Excited,
        Mood::Silly,
    ];

    /// Lowercase label, as stored in history.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
            Mood::Tired => "tired",
            Mood::Excited => "excited",
            Mood::Silly => "silly",
            Mood::Anxious => "anxious",
            Mood::Peaceful => "peaceful",
            Mood::Confident => "confident",
            Mood::Curious => "curious",
        }
    }

    /// Catalog entry for this mood.
    #[must_use]
    pub fn data(self) -> &'static MoodData {
        &CATALOG[self as usize]
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mood {
    type Err = MoodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|mood| mood.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MoodError::UnknownMood(s.to_string()))
    }
}

// Indexed by `Mood as usize`; order must match the enum.
static CATALOG: [MoodData; Mood::COUNT] = [
    MoodData {
        message: "Yay, you're happy! Let's make it even better with a dance party of sparkly unicorns! 🦄",
        joke: "Why did the happy banana go to school? To become a *ripe* scholar! 🍌",
        action: "Rainbow sparkles shower the screen with Mozart's Turkish March! ✨",
        color: "#FEF9C3",
        emoji: "😊",
        sound_clip: "Mozart-Turkish-March",
    },
    MoodData {
        message: "Oh no, a sad face! Let's turn that frown upside down with a big, squishy hug from a fluffy cloud! ☁️",
        joke: "Why did the sad potato sit alone? Because it couldn't find its *spud-tacular* match! 🥔",
        action: "Feathers tickle the screen with Chopin's Nocturne! 🪶",
        color: "#BFDBFE",
        emoji: "😢",
        sound_clip: "chopin-nocturne",
    },
    MoodData {
        message: "Grr, you're angry! Let's cool down with a silly parade of dancing penguins! 🐧",
        joke: "Why was the angry tomato red? Because it saw the salad dressing! 🍅",
        action: "Penguins waddle across the screen with Beethoven's 5th Symphony! 🐧",
        color: "#FECACA",
        emoji: "😡",
        sound_clip: "Beethoven-fifth",
    },
    MoodData {
        message: "Zzz, you're tired! Let's wake you up with a parade of sleepy sloths singing lullabies! 🦥",
        joke: "Why was the tired computer sleepy? It had too many *byte*-ful dreams! 💻",
        action: "Sloths snooze across the screen with Bach's Air on G String! 🦥",
        color: "#E9D5FF",
        emoji: "😴",
        sound_clip: "Bach-Air",
    },
    MoodData {
        message: "Woohoo, you're excited! Let's celebrate with a fireworks show of glittery stars! 🌟",
        joke: "Why was the excited puppy so bouncy? Because it heard about the *paws-ome* party! 🐶",
        action: "Stars burst across the screen with Vivaldi's Spring! 🌟",
        color: "#FBCFE8",
        emoji: "😍",
        sound_clip: "vivaldi-spring",
    },
    MoodData {
        message: "Hehe, you're feeling silly! Let's have a giggle fest with a crew of goofy clowns! 🤡",
        joke: "Why did the silly clown bring a ladder? To take the joke to the next *level*! 🤡",
        action: "Clowns juggle on the screen with Mozart's Eine Kleine Nachtmusik! 🤡",
        color: "#C7D2FE",
        emoji: "🤪",
        sound_clip: "mozart-nachtmusik",
    },
    MoodData {
        message: "Feeling butterflies? Let's turn them into a magical butterfly garden of calm! 🦋",
        joke: "Why don't butterflies tell secrets? Because they might *flutter* them out! 🤫",
        action: "Gentle butterflies float by with Debussy's Clair de Lune! 🦋",
        color: "#99F6E4",
        emoji: "😰",
        sound_clip: "debussy-claire",
    },
    MoodData {
        message: "Ahhh, tranquility! Let's float on a cloud of rainbow cotton candy! ☁️",
        joke: "What did the peaceful cloud say to the storm? 'Take it *breeze-y*!' ☁️",
        action: "Soft clouds drift by with Satie's Gymnopédie No.1! 🌈",
        color: "#BAE6FD",
        emoji: "😌",
        sound_clip: "satie-gymnopedie",
    },
    MoodData {
        message: "You're radiating confidence! Time for a superhero cape and victory dance! 💫",
        joke: "What did the confident pencil say? 'I'm getting to the *point*!' ✏️",
        action: "Stars and sparkles burst with Tchaikovsky's 1812 Overture! ⭐",
        color: "#FDE68A",
        emoji: "😎",
        sound_clip: "tchaikovsky-1812",
    },
    MoodData {
        message: "Curiosity sparkles in your eyes! Let's explore a world of wonder! 🔍",
        joke: "What did the curious cat say to the microscope? 'You really *magnify* my interests!' 🐱",
        action: "Magical question marks dance with Bach's Toccata and Fugue! ❓",
        color: "#A7F3D0",
        emoji: "🤔",
        sound_clip: "bach-toccata",
    },
];
