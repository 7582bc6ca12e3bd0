#![allow(dead_code)]

use voidgate::app::random::ScriptedRandom;
use voidgate::app::Millis;
use voidgate::domain::{Target, ViewId};
use voidgate::{handle_event, Action, Engine, Event, Settings};

/// Started engine over the built-in catalog with scripted randomness.
pub fn engine(rng: ScriptedRandom) -> Engine {
    let mut engine = Engine::new(Settings::default(), Box::new(rng)).unwrap();
    engine.start(0);
    engine
}

/// Started engine already moved to `view`.
pub fn engine_on(view: &ViewId, rng: ScriptedRandom) -> Engine {
    let mut engine = engine(rng);
    engine.go_to(view).unwrap();
    engine
}

pub fn send(engine: &mut Engine, now: Millis, event: Event) -> Vec<Action> {
    handle_event(engine, now, &event).1
}

pub fn click(engine: &mut Engine, now: Millis, target: Option<Target>) -> Vec<Action> {
    send(engine, now, Event::Click { target, modifier: false })
}

pub fn type_text(engine: &mut Engine, now: Millis, text: &str) -> Vec<Action> {
    text.chars().flat_map(|c| send(engine, now, Event::Key(c))).collect()
}

pub fn tick(engine: &mut Engine, now: Millis) -> Vec<Action> {
    send(engine, now, Event::Tick)
}
