//! Search box on the search view.
//!
//! Queries are trimmed and lower-cased before matching. A handful of words
//! lead somewhere; everything else comes back empty.

use super::catalog::{ABYSS, ACCESS, QUESTIONS_VIEW, SECRET_1, SECRET_2, SECRET_3};
use super::context::Context;
use super::timers::Timer;
use super::Action;
use crate::detectors::links::reveal_questions;
use crate::domain::{Effect, Field, Result};
use std::time::Duration;

pub const MATRIX_LENGTH: Duration = Duration::from_secs(5);
pub const NO_RESULTS_LENGTH: Duration = Duration::from_secs(2);
pub const NO_RESULTS: &str = "no results found";

/// Runs the query currently in `text`, clearing it where the query calls for it.
///
/// # Errors
///
/// Propagates [`NarrativeError::UnknownView`](crate::domain::NarrativeError::UnknownView)
/// from the transition a query requests.
pub fn run_query(text: &mut String, cx: &mut Context<'_>) -> Result<()> {
    let query = text.trim().to_lowercase();
    tracing::debug!(query = %query, "search");

    match query.as_str() {
        "" => Ok(()),
        "matrix" => {
            clear(text, cx);
            cx.flash(Effect::MatrixRain, MATRIX_LENGTH);
            cx.schedule(MATRIX_LENGTH, Timer::Navigate(SECRET_2));
            Ok(())
        }
        "surface" => {
            clear(text, cx);
            cx.go_to(&SECRET_1)
        }
        "666" => {
            clear(text, cx);
            cx.go_to(&SECRET_3)
        }
        "redemption" => {
            cx.go_to(&QUESTIONS_VIEW)?;
            reveal_questions(cx);
            Ok(())
        }
        "hell" => cx.go_to(&ACCESS),
        "answer" => cx.go_to(&ABYSS),
        _ => {
            clear(text, cx);
            cx.emit(Action::SetPlaceholder {
                field: Field::Search,
                text: Some(NO_RESULTS.to_string()),
            });
            cx.schedule(NO_RESULTS_LENGTH, Timer::PlaceholderEnd(Field::Search));
            Ok(())
        }
    }
}

fn clear(text: &mut String, cx: &mut Context<'_>) {
    text.clear();
    cx.emit(Action::SetFieldText {
        field: Field::Search,
        text: String::new(),
    });
}
