mod common;

use common::{click, engine, engine_on, send, tick, type_text};
use voidgate::app::catalog::{
    ABYSS, ACCESS, DISCLAIMER, ENTRY, MAIN, NOWHERE, PAYMENT, QUESTIONS_VIEW, REDEMPTION, SEARCH,
    SECRET_1, SECRET_2, SECRET_3, VOID,
};
use voidgate::app::random::ScriptedRandom;
use voidgate::domain::{Effect, Field, Target};
use voidgate::{Action, Event};

#[test]
fn test_entry_ignores_clicks_for_two_seconds() {
    let mut engine = engine(ScriptedRandom::new());

    click(&mut engine, 1_999, Some(Target::EntryPage));
    assert_eq!(engine.active_view(), &ENTRY);

    click(&mut engine, 2_000, Some(Target::EntryPage));
    assert_eq!(engine.active_view(), &MAIN);
    assert_eq!(engine.history(), &[ENTRY]);
}

#[test]
fn test_that_link_picks_a_random_destination() {
    let mut engine = engine_on(&MAIN, ScriptedRandom::new().with_indices([1]));
    click(&mut engine, 10, Some(Target::ThatLink));
    assert_eq!(engine.active_view(), &REDEMPTION);
}

#[test]
fn test_dont_link_goes_back() {
    let mut engine = engine_on(&ACCESS, ScriptedRandom::new());
    click(&mut engine, 10, Some(Target::Logo));
    assert_eq!(engine.active_view(), &DISCLAIMER);

    click(&mut engine, 20, Some(Target::DontLink));
    assert_eq!(engine.active_view(), &ACCESS);
    assert_eq!(engine.history(), &[ENTRY]);
}

#[test]
fn test_five_modifier_clicks_on_warning() {
    let mut engine = engine_on(&DISCLAIMER, ScriptedRandom::new());

    for i in 0..4 {
        send(
            &mut engine,
            i * 5_000,
            Event::Click { target: Some(Target::WarningText), modifier: true },
        );
        // Plain clicks never count.
        click(&mut engine, i * 5_000 + 1, Some(Target::WarningText));
    }
    assert_eq!(engine.active_view(), &DISCLAIMER);

    send(
        &mut engine,
        60_000,
        Event::Click { target: Some(Target::WarningText), modifier: true },
    );
    assert_eq!(engine.active_view(), &SECRET_3);
}

#[test]
fn test_short_codeword_from_anywhere() {
    let mut engine = engine(ScriptedRandom::new());
    type_text(&mut engine, 10, "hell");
    assert_eq!(engine.active_view(), &ACCESS);
}

#[test]
fn test_codewords_are_case_sensitive() {
    let mut engine = engine_on(&MAIN, ScriptedRandom::new());
    type_text(&mut engine, 10, "VOID");
    assert_eq!(engine.active_view(), &MAIN);

    type_text(&mut engine, 20, "observer");
    assert_eq!(engine.active_view(), &SECRET_2);
}

#[test]
fn test_effect_codeword_reverts() {
    let mut engine = engine_on(&MAIN, ScriptedRandom::new());

    let actions = type_text(&mut engine, 100, "1995");
    assert!(actions.contains(&Action::ApplyEffect { effect: Effect::Invert, duration_ms: 3_000 }));
    assert_eq!(engine.active_view(), &MAIN);

    assert!(!tick(&mut engine, 3_099).contains(&Action::ClearEffect(Effect::Invert)));
    assert!(tick(&mut engine, 3_100).contains(&Action::ClearEffect(Effect::Invert)));
}

#[test]
fn test_morse_sos_on_empty_space() {
    let mut engine = engine_on(&MAIN, ScriptedRandom::new());
    let gaps = [100, 100, 100, 500, 500, 500, 100, 100, 100];

    let mut now = 1_000;
    click(&mut engine, now, None);
    for gap in gaps {
        assert_eq!(engine.active_view(), &MAIN);
        now += gap;
        click(&mut engine, now, None);
    }
    assert_eq!(engine.active_view(), &SECRET_1);
}

#[test]
fn test_morse_pause_restarts_sequence() {
    let mut engine = engine_on(&MAIN, ScriptedRandom::new());

    let mut now = 1_000;
    click(&mut engine, now, None);
    for gap in [100, 100, 100, 500, 2_500, 100, 100, 100, 500, 500, 500] {
        now += gap;
        click(&mut engine, now, None);
    }
    assert_eq!(engine.active_view(), &MAIN);
}

#[test]
fn test_hover_dwell_on_disclaimer_logo() {
    let mut engine = engine_on(&DISCLAIMER, ScriptedRandom::new());

    send(&mut engine, 1_000, Event::PointerEnter(Target::DisclaimerLogo));
    send(&mut engine, 5_000, Event::PointerLeave(Target::DisclaimerLogo));
    tick(&mut engine, 20_000);
    assert_eq!(engine.active_view(), &DISCLAIMER);

    send(&mut engine, 21_000, Event::PointerEnter(Target::DisclaimerLogo));
    tick(&mut engine, 30_999);
    assert_eq!(engine.active_view(), &DISCLAIMER);
    tick(&mut engine, 31_000);
    assert_eq!(engine.active_view(), &NOWHERE);
}

#[test]
fn test_mystery_detour_never_leaves_entry() {
    let mut engine = engine(ScriptedRandom::new().with_chances([true; 256]));
    tick(&mut engine, 10 * 60_000);
    assert_eq!(engine.active_view(), &ENTRY);
    assert!(engine.history().is_empty());
}

#[test]
fn test_mystery_detour_returns() {
    let mut engine = engine_on(&MAIN, ScriptedRandom::new().with_chances([true; 256]));

    tick(&mut engine, 60_000);
    assert_eq!(engine.active_view(), &VOID);
    tick(&mut engine, 63_000);
    assert_eq!(engine.active_view(), &MAIN);
    assert_eq!(engine.history(), &[ENTRY]);
}

#[test]
fn test_search_matrix_rains_then_reveals() {
    let mut engine = engine_on(&SEARCH, ScriptedRandom::new());
    type_text(&mut engine, 100, "Matrix ");
    assert_eq!(engine.field_text(Field::Search), "Matrix ");

    let actions = send(&mut engine, 200, Event::Enter);
    assert!(actions.contains(&Action::ApplyEffect { effect: Effect::MatrixRain, duration_ms: 5_000 }));
    assert_eq!(engine.field_text(Field::Search), "");
    assert_eq!(engine.active_view(), &SEARCH);

    tick(&mut engine, 5_200);
    assert_eq!(engine.active_view(), &SECRET_2);
}

#[test]
fn test_search_without_results() {
    let mut engine = engine_on(&SEARCH, ScriptedRandom::new());
    type_text(&mut engine, 100, "nothing");
    send(&mut engine, 100, Event::Backspace);
    assert_eq!(engine.field_text(Field::Search), "nothin");

    let actions = send(&mut engine, 200, Event::Enter);
    assert!(actions.contains(&Action::SetPlaceholder {
        field: Field::Search,
        text: Some("no results found".to_string()),
    }));
    assert_eq!(engine.field_text(Field::Search), "");
    assert_eq!(engine.active_view(), &SEARCH);

    let actions = tick(&mut engine, 2_200);
    assert!(actions.contains(&Action::SetPlaceholder { field: Field::Search, text: None }));
}

#[test]
fn test_search_mapped_queries() {
    for (query, expected) in [("surface", &SECRET_1), ("666", &SECRET_3), ("answer", &ABYSS)] {
        let mut engine = engine_on(&SEARCH, ScriptedRandom::new());
        type_text(&mut engine, 100, query);
        send(&mut engine, 200, Event::Enter);
        assert_eq!(engine.active_view(), expected, "query {query}");
    }
}

#[test]
fn test_empty_search_does_nothing() {
    let mut engine = engine_on(&SEARCH, ScriptedRandom::new());
    assert!(send(&mut engine, 100, Event::Enter).is_empty());
}

#[test]
fn test_keys_outside_fields_edit_nothing() {
    let mut engine = engine_on(&MAIN, ScriptedRandom::new());
    let actions = type_text(&mut engine, 10, "abc");
    assert!(actions.is_empty());
    assert_eq!(engine.field_text(Field::Search), "");
}

#[test]
fn test_soul_reveals_questions_one_by_one() {
    let mut engine = engine_on(&REDEMPTION, ScriptedRandom::new());
    let actions = click(&mut engine, 1_000, Some(Target::SoulLink));
    assert_eq!(engine.active_view(), &QUESTIONS_VIEW);
    assert!(actions.contains(&Action::ClearQuestions));

    let shown = |actions: &[Action]| {
        actions
            .iter()
            .filter(|a| matches!(a, Action::ShowQuestion { .. }))
            .count()
    };
    assert_eq!(shown(&tick(&mut engine, 1_450)), 5);
    assert_eq!(shown(&tick(&mut engine, 2_900)), 15);

    let actions = click(&mut engine, 3_000, Some(Target::Question(3)));
    assert!(actions.contains(&Action::RevealAnswer { index: 3 }));
}

#[test]
fn test_yes_then_pay_then_void() {
    let mut engine = engine_on(&QUESTIONS_VIEW, ScriptedRandom::new());
    click(&mut engine, 0, Some(Target::YesLink));
    assert_eq!(engine.active_view(), &PAYMENT);
    assert!(tick(&mut engine, 100).contains(&Action::PlaceWidget { top_pct: 10, left_pct: 20 }));

    let actions = click(&mut engine, 1_000, Some(Target::PaymentButton(5)));
    assert!(actions.contains(&Action::ApplyEffect { effect: Effect::Glitch, duration_ms: 300 }));
    assert_eq!(engine.active_view(), &PAYMENT);

    tick(&mut engine, 1_300);
    assert_eq!(engine.active_view(), &VOID);
    click(&mut engine, 2_000, Some(Target::DoItLink));
    assert_eq!(engine.active_view(), &PAYMENT);
}

#[test]
fn test_cursor_hides_on_cursorless_views() {
    let mut engine = engine_on(&ABYSS, ScriptedRandom::new());

    assert_eq!(send(&mut engine, 10, Event::PointerMove), vec![Action::SetCursorHidden(true)]);
    assert!(send(&mut engine, 20, Event::PointerMove).is_empty());

    engine.go_back().unwrap();
    assert_eq!(send(&mut engine, 30, Event::PointerMove), vec![Action::SetCursorHidden(false)]);
    assert!(!engine.cursor_hidden());
}

#[test]
fn test_ambient_title_and_tint() {
    let mut engine = engine(ScriptedRandom::new());
    let actions = tick(&mut engine, 5_000);
    assert!(actions.contains(&Action::SetTitle("void".to_string())));
    assert!(actions.iter().any(|a| matches!(a, Action::SetTint(_))));
}

#[test]
fn test_unknown_view_leaves_state_untouched() {
    let mut engine = engine_on(&MAIN, ScriptedRandom::new());
    let missing = voidgate::domain::ViewId::from_static("secret-9");

    assert!(engine.go_to(&missing).is_err());
    assert_eq!(engine.active_view(), &MAIN);
    assert_eq!(engine.history(), &[ENTRY]);
}
