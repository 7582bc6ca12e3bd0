//! The built-in experience: every view, its layout, and the registration
//! table wiring links and covert triggers to transitions.

use super::navigation::ViewRegistry;
use super::state::Settings;
use crate::detectors::chance::AmbientChance;
use crate::detectors::codeword::{Codeword, CodewordMatcher};
use crate::detectors::counter::ClickCounter;
use crate::detectors::hover::HoverDwell;
use crate::detectors::links::{
    BackLink, EntryGate, NavigateLink, PaymentButton, QuestionCard, RandomLink, SoulLink, YesLink,
};
use crate::detectors::morse::MorseDecoder;
use crate::detectors::{clicked, pointed, Input, InputKind, Registration};
use crate::domain::{Block, Effect, Field, Result, Surface, Target, ViewId};
use std::time::Duration;

pub const ENTRY: ViewId = ViewId::from_static("entry-page");
pub const MAIN: ViewId = ViewId::from_static("main-page");
pub const ACCESS: ViewId = ViewId::from_static("access-page");
pub const DISCLAIMER: ViewId = ViewId::from_static("disclaimer-page");
pub const APPLY: ViewId = ViewId::from_static("apply-page");
pub const REDEMPTION: ViewId = ViewId::from_static("redemption-page");
pub const QUESTIONS_VIEW: ViewId = ViewId::from_static("questions-page");
pub const PAYMENT: ViewId = ViewId::from_static("payment-page");
pub const SEARCH: ViewId = ViewId::from_static("search-page");
pub const VOID: ViewId = ViewId::from_static("void-page");
pub const ABYSS: ViewId = ViewId::from_static("abyss-page");
pub const FINAL: ViewId = ViewId::from_static("final-page");
pub const SECRET_1: ViewId = ViewId::from_static("secret-1");
pub const SECRET_2: ViewId = ViewId::from_static("secret-2");
pub const SECRET_3: ViewId = ViewId::from_static("secret-3");
pub const NOWHERE: ViewId = ViewId::from_static("nowhere");

/// Views reachable by the ambient-chance detour.
pub const MYSTERY_VIEWS: [ViewId; 2] = [VOID, ABYSS];

/// Views on which the pointer is hidden.
pub const CURSORLESS_VIEWS: [ViewId; 2] = [ABYSS, VOID];

pub const PAYMENT_AMOUNTS: [u32; 3] = [3, 5, 10];

pub const QUESTIONS: [&str; 20] = [
    "what is the meaning?",
    "where does it end?",
    "who are you?",
    "why are you here?",
    "what do you want?",
    "is this real?",
    "can you escape?",
    "do you believe?",
    "what is truth?",
    "are you alone?",
    "where is everyone?",
    "what happens next?",
    "is there hope?",
    "do you remember?",
    "when does it start?",
    "how did you get here?",
    "what did you lose?",
    "who is watching?",
    "can you see?",
    "is it over?",
];

pub const ANSWERS: [&str; 20] = [
    "there is no meaning, only experience",
    "it never ends",
    "you are everyone and no one",
    "you were invited",
    "what everyone wants: to belong",
    "as real as anything else",
    "no one escapes",
    "belief is optional",
    "truth is relative",
    "everyone is alone together",
    "they are here, watching",
    "nothing. everything continues",
    "hope is the first lie",
    "memory is unreliable",
    "it already started",
    "you have always been here",
    "nothing you can name",
    "everyone. no one.",
    "open your eyes",
    "it has just begun",
];

/// Display titles cycled by the ambient scheduler.
pub const TITLES: [&str; 8] = [
    "void",
    "v o i d",
    "...",
    "parallel web",
    "voided",
    "no access",
    "zeh ell",
    "z v u c k . c o m",
];

const fn link(label: &'static str, target: Target) -> Block {
    Block::Link { label, target }
}

const fn hotspot(label: &'static str, target: Target) -> Block {
    Block::Hotspot { label, target }
}

/// Every built-in view with its layout, entry view first.
#[must_use]
pub fn views() -> Vec<(ViewId, Surface)> {
    use Block::{Blank, Heading, Text, Whisper};

    let mut payment = vec![
        Heading("the price"),
        Text("everything has a price. choose yours."),
        Blank,
    ];
    payment.extend(PAYMENT_AMOUNTS.iter().map(|&amount| {
        let label = match amount {
            3 => "[ 3 ]",
            5 => "[ 5 ]",
            _ => "[ 10 ]",
        };
        link(label, Target::PaymentButton(amount))
    }));
    payment.push(Block::PaymentWidget);

    vec![
        (
            ENTRY,
            Surface::new(vec![
                Heading("hell.com"),
                Blank,
                Whisper("there is no public access"),
            ])
            .with_backdrop(Target::EntryPage),
        ),
        (
            MAIN,
            Surface::new(vec![
                Heading("hell.com"),
                Text("this is a parallel web."),
                Text("you are not looking for this. you are looking for"),
                link("that", Target::ThatLink),
            ]),
        ),
        (
            ACCESS,
            Surface::new(vec![
                hotspot("( hell.com )", Target::Logo),
                Blank,
                Text("access is by invitation only."),
            ]),
        ),
        (
            DISCLAIMER,
            Surface::new(vec![
                hotspot("( hell.com )", Target::DisclaimerLogo),
                Blank,
                hotspot(
                    "warning: what is seen here cannot be unseen.",
                    Target::WarningText,
                ),
                Blank,
                link("apply", Target::ApplyLink),
                link("don't", Target::DontLink),
            ]),
        ),
        (
            APPLY,
            Surface::new(vec![
                Heading("apply"),
                Text("leave an address. we will find you."),
                Block::Input(Field::Email),
                link("submit", Target::SubmitEmail),
                link("cancel", Target::CancelLink),
            ]),
        ),
        (
            REDEMPTION,
            Surface::new(vec![
                Heading("redemption"),
                Text("is there anything left to save?"),
                link("your soul", Target::SoulLink),
            ]),
        ),
        (
            QUESTIONS_VIEW,
            Surface::new(vec![
                Block::QuestionField,
                Whisper("are you ready?"),
                link("yes", Target::YesLink),
            ]),
        ),
        (PAYMENT, Surface::new(payment)),
        (
            SEARCH,
            Surface::new(vec![Heading("search"), Block::Input(Field::Search)]),
        ),
        (
            VOID,
            Surface::new(vec![
                Heading("void"),
                Text("nothing is here. nothing was ever here."),
                link("do it", Target::DoItLink),
            ]),
        ),
        (
            ABYSS,
            Surface::new(vec![Blank, Whisper("it looks back.")]),
        ),
        (
            FINAL,
            Surface::new(vec![Heading("received"), Text("we will be in touch.")]),
        ),
        (
            SECRET_1,
            Surface::new(vec![
                Heading("below the surface"),
                Text("you were not supposed to find this."),
                Whisper("... --- ..."),
            ]),
        ),
        (
            SECRET_2,
            Surface::new(vec![
                Heading("observer"),
                Text("someone is always watching."),
                Whisper(".-.. ..- -.-. .. ..-. . .-."),
            ]),
        ),
        (
            SECRET_3,
            Surface::new(vec![Heading("666"), Text("the last door.")]),
        ),
        (NOWHERE, Surface::new(vec![Blank, Whisper("nowhere")])),
    ]
}

/// Registers every built-in view.
///
/// # Errors
///
/// Returns [`NarrativeError::DuplicateView`](crate::domain::NarrativeError::DuplicateView)
/// if the catalog lists an id twice.
pub fn build_registry() -> Result<ViewRegistry> {
    let mut registry = ViewRegistry::new();
    for (id, surface) in views() {
        registry.register(id, surface)?;
    }
    Ok(registry)
}

/// The registration table, in evaluation order: overt links first, then the
/// covert recognizers.
#[must_use]
pub fn default_registrations(settings: &Settings) -> Vec<Registration> {
    vec![
        Registration::new(
            "entry",
            InputKind::Click,
            |input| clicked(input, Target::EntryPage),
            EntryGate::new(MAIN, Duration::from_secs(2)),
        ),
        Registration::new(
            "that-link",
            InputKind::Click,
            |input| clicked(input, Target::ThatLink),
            RandomLink::new(vec![ACCESS, REDEMPTION, SEARCH]),
        ),
        Registration::new(
            "logo",
            InputKind::Click,
            |input| clicked(input, Target::Logo),
            NavigateLink::new(DISCLAIMER),
        ),
        Registration::new(
            "apply-link",
            InputKind::Click,
            |input| clicked(input, Target::ApplyLink),
            NavigateLink::new(APPLY),
        ),
        Registration::new(
            "dont-link",
            InputKind::Click,
            |input| clicked(input, Target::DontLink),
            BackLink,
        ),
        Registration::new(
            "cancel-link",
            InputKind::Click,
            |input| clicked(input, Target::CancelLink),
            NavigateLink::new(DISCLAIMER),
        ),
        Registration::new(
            "soul-link",
            InputKind::Click,
            |input| clicked(input, Target::SoulLink),
            SoulLink::new(QUESTIONS_VIEW),
        ),
        Registration::new(
            "yes-link",
            InputKind::Click,
            |input| clicked(input, Target::YesLink),
            YesLink::new(PAYMENT),
        ),
        Registration::new(
            "payment-button",
            InputKind::Click,
            |input| {
                matches!(
                    input,
                    Input::Click {
                        target: Some(Target::PaymentButton(_)),
                        ..
                    }
                )
            },
            PaymentButton::new(VOID),
        ),
        Registration::new(
            "do-it-link",
            InputKind::Click,
            |input| clicked(input, Target::DoItLink),
            NavigateLink::new(PAYMENT),
        ),
        Registration::new(
            "question-card",
            InputKind::Click,
            |input| {
                matches!(
                    input,
                    Input::Click {
                        target: Some(Target::Question(_)),
                        ..
                    }
                )
            },
            QuestionCard,
        ),
        Registration::new(
            "logo-triple-click",
            InputKind::Click,
            |input| clicked(input, Target::Logo),
            ClickCounter::with_idle_reset(3, Duration::from_secs(1), SECRET_2),
        ),
        Registration::new(
            "warning-modifier-clicks",
            InputKind::Click,
            |input| {
                matches!(
                    input,
                    Input::Click {
                        target: Some(Target::WarningText),
                        modifier: true,
                    }
                )
            },
            ClickCounter::without_idle_reset(5, SECRET_3),
        ),
        Registration::new(
            "morse",
            InputKind::Click,
            |_| true,
            MorseDecoder::sos(SECRET_1),
        ),
        Registration::new(
            "disclaimer-hover",
            InputKind::Pointer,
            |input| pointed(input, Target::DisclaimerLogo),
            HoverDwell::new(Duration::from_secs(10), NOWHERE),
        ),
        Registration::new(
            "short-codewords",
            InputKind::Key,
            |_| true,
            CodewordMatcher::new(4, vec![Codeword::navigate("hell", ACCESS)]),
        ),
        Registration::new(
            "long-codewords",
            InputKind::Key,
            |_| true,
            CodewordMatcher::new(
                20,
                vec![
                    Codeword::navigate("void", SECRET_1),
                    Codeword::navigate("observer", SECRET_2),
                    Codeword::navigate("lucifer", SECRET_3),
                    Codeword::navigate("nowhere", NOWHERE),
                    Codeword::effect("1995", Effect::Invert, Duration::from_secs(3)),
                    Codeword::effect("parallel", Effect::Rotate, Duration::from_secs(2)),
                ],
            ),
        ),
        Registration::clock(
            "ambient-chance",
            AmbientChance::new(settings.mystery_chance, MYSTERY_VIEWS.to_vec()),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_holds_every_view_once() {
        let registry = build_registry().unwrap();
        assert_eq!(registry.len(), 16);
        assert_eq!(registry.views().next().map(|v| v.id), Some(ENTRY));
    }

    #[test]
    fn test_questions_pair_with_answers() {
        assert_eq!(QUESTIONS.len(), ANSWERS.len());
        assert_eq!(QUESTIONS.len(), crate::detectors::links::QUESTION_COUNT);
    }

    #[test]
    fn test_registration_names_are_unique() {
        let rows = default_registrations(&Settings::default());
        let names: HashSet<_> = rows.iter().map(Registration::name).collect();
        assert_eq!(names.len(), rows.len());
    }

    #[test]
    fn test_every_target_has_a_view() {
        let registry = build_registry().unwrap();
        let targets: HashSet<Target> = registry.views().flat_map(|v| v.surface.targets().collect::<Vec<_>>()).collect();
        for expected in [
            Target::EntryPage,
            Target::ThatLink,
            Target::Logo,
            Target::DisclaimerLogo,
            Target::WarningText,
            Target::ApplyLink,
            Target::DontLink,
            Target::SubmitEmail,
            Target::CancelLink,
            Target::SoulLink,
            Target::YesLink,
            Target::DoItLink,
        ] {
            assert!(targets.contains(&expected), "{expected:?} is not reachable");
        }
    }

    #[test]
    fn test_modifier_counter_ignores_plain_clicks() {
        let rows = default_registrations(&Settings::default());
        let row = rows.iter().find(|r| r.name() == "warning-modifier-clicks").unwrap();
        let plain = Input::Click { target: Some(Target::WarningText), modifier: false };
        let held = Input::Click { target: Some(Target::WarningText), modifier: true };
        assert!(!row.accepts(&plain));
        assert!(row.accepts(&held));
    }
}
