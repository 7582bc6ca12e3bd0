//! Interactive targets, text fields, transient effects and ambient tint.

use serde::{Deserialize, Serialize};

/// An element that reports clicks or pointer enter/leave to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// The whole entry view.
    EntryPage,
    /// The "that" link on the main view.
    ThatLink,
    /// Logo on the access view.
    Logo,
    /// Logo on the disclaimer view (hover target).
    DisclaimerLogo,
    /// Warning paragraph on the disclaimer view.
    WarningText,
    ApplyLink,
    DontLink,
    SubmitEmail,
    CancelLink,
    SoulLink,
    YesLink,
    /// Payment button carrying its amount.
    PaymentButton(u32),
    DoItLink,
    /// Question card by index.
    Question(usize),
}

/// Editable text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Search,
    Email,
}

/// Self-reverting visual mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Effect {
    /// Whole-surface glitch flash.
    Glitch,
    /// Colour inversion.
    Invert,
    /// Surface turned upside down.
    Rotate,
    /// Red underline on the email field.
    ErrorFlash,
    /// Falling characters.
    MatrixRain,
}

/// Ambient background colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Tint {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Formats the tint as a `#rrggbb` hex string.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
