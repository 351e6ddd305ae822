//! A walk-through of the engine: records, collections, nullables, custom
//! overrides, settings, and source restrictions.
//!
//! Run with `cargo run --example tour`.

use autostring::{reflect, Bracket, Engine, MethodSource, Settings, SourceRestriction};
use std::fmt;

struct Person {
    name: String,
    age: Option<u32>,
}
reflect!(struct Person { name: String, age: Option<u32> });

struct Team {
    title: String,
    members: Vec<Person>,
}
reflect!(struct Team { title: String, members: Vec<Person> });

struct Point {
    x: i32,
    y: i32,
}
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
reflect!(struct Point { x: i32, y: i32 } with display);

struct Waypoint {
    location: Point,
}
impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.location.fmt(f)
    }
}
reflect!(struct Waypoint { location: Point } with inherited display);

enum Suit {
    Hearts,
    Spades,
}
reflect!(enum Suit { Hearts, Spades });

fn main() {
    let engine = Engine::new();

    println!("== primitives and strings ==");
    println!("{}", engine.render(&42i32));
    println!("{}", engine.render(&3.5f64));
    println!("{}", engine.render(&"hello".to_string()));
    println!("{}", engine.render(&Suit::Hearts));

    println!("\n== nullables ==");
    println!("{}", engine.render(&Some(7i32)));
    println!("{}", engine.render(&None::<i32>));

    println!("\n== records ==");
    let alice = Person {
        name: "Alice".to_string(),
        age: None,
    };
    let bob = Person {
        name: "Bob".to_string(),
        age: Some(34),
    };
    println!("{}", engine.render(&alice));
    println!(
        "{}",
        engine.render(&Team {
            title: "core".to_string(),
            members: vec![alice, bob],
        })
    );

    println!("\n== collections sort textually, nulls first ==");
    println!("{}", engine.render(&vec![10, 2, 33]));
    println!("{}", engine.render(&vec![Some(3), None, Some(1)]));

    println!("\n== declared vs delegated conversions ==");
    let waypoint = Waypoint {
        location: Point { x: 1, y: 2 },
    };
    println!("{}", engine.render(&waypoint.location));
    println!("{}", engine.render(&waypoint));
    println!(
        "point source: {:?}",
        engine.source_of::<Point>().unwrap_or(MethodSource::Invalid)
    );

    println!("\n== restrictions ==");
    engine.set_restriction(SourceRestriction::AllowDeclaringMethod);
    println!("delegated display now ignored: {}", engine.render(&waypoint));
    engine.set_restriction(SourceRestriction::AutoMethodOnly);
    println!("declared display now ignored: {}", engine.render(&waypoint.location));
    engine.set_restriction(SourceRestriction::AllowAll);
    println!("both back: {}", engine.render(&waypoint));

    println!("\n== custom overrides ==");
    engine.register_custom(|p: &Point| format!("Point@{},{}", p.x, p.y));
    println!("{}", engine.render(&Point { x: 9, y: 9 }));
    engine.remove::<Point>();
    println!("{}", engine.render(&Point { x: 9, y: 9 }));

    println!("\n== settings ==");
    engine.set_settings(
        Settings::new()
            .with_null_text("missing")
            .with_null_bracket(Bracket::Square)
            .with_enumerable_bracket(Bracket::Parenthesis),
    );
    println!("{}", engine.render(&None::<i32>));
    println!("{}", engine.render(&vec![Some(2), None]));
}
