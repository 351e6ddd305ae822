use autostring::{reflect, Bracket, Engine, MethodSource, Settings, SourceRestriction};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

struct Person {
    name: String,
    age: Option<i32>,
}
reflect!(struct Person { name: String, age: Option<i32> });

struct Badge {
    owner: String,
}
impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X")
    }
}
reflect!(struct Badge { owner: String } with display);

enum Suit {
    Hearts,
    Spades,
}
reflect!(enum Suit { Hearts, Spades });

struct Team {
    label: String,
    members: Vec<Person>,
}
reflect!(struct Team { label: String, members: Vec<Person> });

#[test]
fn complex_type_with_default_settings() {
    let engine = Engine::new();
    let person = Person {
        name: "Alice".to_string(),
        age: None,
    };
    assert_eq!(engine.render(&person), "{name: \"Alice\", age: <null>}");
}

#[test]
fn complex_type_with_present_nullable() {
    let engine = Engine::new();
    let person = Person {
        name: "Bob".to_string(),
        age: Some(30),
    };
    assert_eq!(engine.render(&person), "{name: \"Bob\", age: 30}");
}

#[test]
fn enumerable_sorts_by_rendered_text() {
    let engine = Engine::new();
    assert_eq!(engine.render(&vec![5i32, 3]), "[3, 5]");
    // Textual sort, not numeric: "10" before "2".
    assert_eq!(engine.render(&vec![10i32, 2]), "[10, 2]");
}

#[test]
fn enumerable_permutations_render_identically() {
    let engine = Engine::new();
    assert_eq!(
        engine.render(&vec!["b".to_string(), "a".to_string()]),
        engine.render(&vec!["a".to_string(), "b".to_string()]),
    );
}

#[test]
fn enumerable_nulls_sort_first() {
    let engine = Engine::new();
    assert_eq!(
        engine.render(&vec![Some(2i32), None, Some(1)]),
        "[<null>, 1, 2]"
    );
}

#[test]
fn top_level_absent_value_uses_null_bracket() {
    let engine = Engine::new();
    assert_eq!(engine.render(&None::<i32>), "<null>");
    assert_eq!(engine.render(&None::<Person>), "<null>");
    assert_eq!(engine.render(&None::<Vec<String>>), "<null>");
}

#[test]
fn enumeration_renders_type_dot_variant() {
    let engine = Engine::new();
    assert_eq!(engine.render(&Suit::Hearts), "Suit.Hearts");
    assert_eq!(engine.render(&Suit::Spades), "Suit.Spades");
}

#[test]
fn enumeration_uses_primitive_bracket() {
    let engine = Engine::with_settings(
        Settings::new().with_primitive_bracket(Bracket::Parenthesis),
    );
    assert_eq!(engine.render(&Suit::Hearts), "(Suit.Hearts)");
}

#[test]
fn declared_display_used_under_default_policy() {
    let engine = Engine::new();
    let badge = Badge {
        owner: "Alice".to_string(),
    };
    assert_eq!(engine.render(&badge), "{X}");
    assert_eq!(
        engine.source_of::<Badge>(),
        Some(MethodSource::DeclaringMethod)
    );
}

#[test]
fn nested_records_render_recursively() {
    let engine = Engine::new();
    let team = Team {
        label: "ops".to_string(),
        members: vec![
            Person {
                name: "Bob".to_string(),
                age: Some(4),
            },
            Person {
                name: "Ann".to_string(),
                age: None,
            },
        ],
    };
    assert_eq!(
        engine.render(&team),
        "{label: \"ops\", members: [{name: \"Ann\", age: <null>}, {name: \"Bob\", age: 4}]}"
    );
}

#[test]
fn custom_override_wins() {
    let engine = Engine::new();
    engine.register_custom(|p: &Person| format!("Person named {}", p.name));
    let person = Person {
        name: "Ann".to_string(),
        age: None,
    };
    assert_eq!(engine.render(&person), "Person named Ann");
    assert_eq!(engine.source_of::<Person>(), Some(MethodSource::Custom));
}

#[test]
fn custom_override_sticky_across_settings_change() {
    let engine = Engine::new();
    engine.register_custom(|n: &i32| format!("#{n}"));
    let before = engine.resolve::<i32>();
    engine.set_settings(Settings::new().with_primitive_bracket(Bracket::Curly));
    let after = engine.resolve::<i32>();
    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(engine.render(&9), "#9");
}

#[test]
fn custom_override_removed_only_explicitly() {
    let engine = Engine::new();
    engine.register_custom(|n: &i32| format!("#{n}"));
    engine.reset(true);
    assert_eq!(engine.render(&9), "#9");
    engine.reset(false);
    assert_eq!(engine.render(&9), "9");
}

#[test]
fn settings_change_takes_effect_immediately() {
    let engine = Engine::new();
    assert_eq!(engine.render(&vec![1i32]), "[1]");
    engine.set_settings(Settings::new().with_enumerable_bracket(Bracket::Angle));
    assert_eq!(engine.render(&vec![1i32]), "<1>");
}

#[test]
fn null_settings_apply_everywhere() {
    let engine = Engine::with_settings(
        Settings::new()
            .with_null_text("missing")
            .with_null_bracket(Bracket::Square),
    );
    assert_eq!(engine.render(&None::<i32>), "[missing]");
    let person = Person {
        name: "Ann".to_string(),
        age: None,
    };
    assert_eq!(engine.render(&person), "{name: \"Ann\", age: [missing]}");
}

#[test]
fn settings_roundtrip_through_json() {
    let engine = Engine::new();
    let json = serde_json::to_string(&engine.settings()).unwrap();
    let parsed: Settings = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, engine.settings());
}

#[test]
fn facade_populates_cache_lazily() {
    let engine = Engine::new();
    assert!(engine.is_empty());
    let team = Team {
        label: "ops".to_string(),
        members: vec![],
    };
    engine.render(&team);
    // Team, String, Vec<Person>, and Person all resolved.
    assert!(engine.len() >= 4);
    assert_eq!(engine.source_of::<Team>(), Some(MethodSource::AutoMethod));
}

struct Gate;
reflect!(struct Gate {});

struct Fenced {
    first: String,
    gate: Gate,
    second: String,
}
reflect!(struct Fenced { first: String, gate: Gate, second: String });

struct Stamp {
    value: i32,
}
impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stamp:{}", self.value)
    }
}
reflect!(struct Stamp { value: i32 } with display);

struct Envelope {
    gate: Gate,
    stamp: Stamp,
}
reflect!(struct Envelope { gate: Gate, stamp: Stamp });

/// Installs a custom function for `Gate` that signals `entered` and then
/// blocks until `release` is set, pinning a render mid-flight.
fn install_gate(engine: &Engine, entered: &Arc<AtomicBool>, release: &Arc<AtomicBool>) {
    let entered = Arc::clone(entered);
    let release = Arc::clone(release);
    engine.register_custom(move |_: &Gate| {
        entered.store(true, Ordering::SeqCst);
        while !release.load(Ordering::SeqCst) {
            thread::yield_now();
        }
        "gate".to_string()
    });
}

#[test]
fn settings_change_waits_for_inflight_render() {
    let engine = Arc::new(Engine::new());
    let entered = Arc::new(AtomicBool::new(false));
    let release = Arc::new(AtomicBool::new(false));
    install_gate(&engine, &entered, &release);

    let renderer = thread::spawn({
        let engine = Arc::clone(&engine);
        move || {
            engine.render(&Fenced {
                first: "a".to_string(),
                gate: Gate,
                second: "b".to_string(),
            })
        }
    });
    while !entered.load(Ordering::SeqCst) {
        thread::yield_now();
    }
    let mutator = thread::spawn({
        let engine = Arc::clone(&engine);
        move || {
            engine.set_settings(Settings::new().with_string_bracket(Bracket::SingleQuote));
        }
    });
    // The mutation must block behind the pinned render.
    thread::sleep(Duration::from_millis(50));
    assert!(!mutator.is_finished());

    release.store(true, Ordering::SeqCst);
    let rendered = renderer.join().unwrap();
    mutator.join().unwrap();

    // The in-flight render saw only the old settings, even for the field
    // rendered after the mutation was requested.
    assert_eq!(rendered, "{first: \"a\", gate: gate, second: \"b\"}");
    // Renders started after the change see only the new settings.
    assert_eq!(engine.render(&"x".to_string()), "'x'");
}

#[test]
fn restriction_change_waits_for_inflight_render() {
    let engine = Arc::new(Engine::new());
    let entered = Arc::new(AtomicBool::new(false));
    let release = Arc::new(AtomicBool::new(false));
    install_gate(&engine, &entered, &release);

    let renderer = thread::spawn({
        let engine = Arc::clone(&engine);
        move || {
            engine.render(&Envelope {
                gate: Gate,
                stamp: Stamp { value: 7 },
            })
        }
    });
    while !entered.load(Ordering::SeqCst) {
        thread::yield_now();
    }
    let mutator = thread::spawn({
        let engine = Arc::clone(&engine);
        move || engine.set_restriction(SourceRestriction::AutoMethodOnly)
    });
    thread::sleep(Duration::from_millis(50));
    assert!(!mutator.is_finished());

    release.store(true, Ordering::SeqCst);
    let rendered = renderer.join().unwrap();
    mutator.join().unwrap();

    // The stamp field resolved after the mutation was requested, yet the
    // render still used the old permissive policy throughout.
    assert_eq!(rendered, "{gate: gate, stamp: {stamp:7}}");
    assert_eq!(engine.render(&Stamp { value: 7 }), "{value: 7}");
}
