//! Timed key scripts for driving seats without a keyboard.
//!
//! One event per line: `<seconds> <down|up|tap> <KeyCode>`. Blank lines and
//! lines starting with `#` are skipped. `tap` is a down followed by an up on
//! the same tick.

use std::path::Path;

use gardener_core::keymap;
use gardener_core::player::Seat;
use gardener_orchard::controls::Controls;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEdge {
    Down,
    Up,
    Tap,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyEvent {
    pub at: f32,
    pub edge: KeyEdge,
    pub code: String,
}

#[derive(Debug)]
pub enum ScriptError {
    Io(std::io::Error),
    Parse { line: usize, message: String },
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read key script: {e}"),
            Self::Parse { line, message } => write!(f, "key script line {line}: {message}"),
        }
    }
}

impl std::error::Error for ScriptError {}

impl From<std::io::Error> for ScriptError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Events in time order, consumed as the match clock passes them.
#[derive(Debug, Clone, Default)]
pub struct KeyScript {
    events: Vec<KeyEvent>,
    next: usize,
}

impl KeyScript {
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ScriptError> {
        let mut events = Vec::new();
        for (i, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let err = |message: String| ScriptError::Parse {
                line: i + 1,
                message,
            };
            let mut parts = line.split_whitespace();
            let (Some(at), Some(edge), Some(code), None) =
                (parts.next(), parts.next(), parts.next(), parts.next())
            else {
                return Err(err(format!("expected `<seconds> <edge> <key>`, got `{line}`")));
            };
            let at: f32 = at
                .parse()
                .ok()
                .filter(|t: &f32| t.is_finite() && *t >= 0.0)
                .ok_or_else(|| err(format!("bad time `{at}`")))?;
            let edge = match edge {
                "down" => KeyEdge::Down,
                "up" => KeyEdge::Up,
                "tap" => KeyEdge::Tap,
                other => return Err(err(format!("unknown edge `{other}`"))),
            };
            events.push(KeyEvent {
                at,
                edge,
                code: code.to_string(),
            });
        }
        events.sort_by(|a, b| a.at.total_cmp(&b.at));
        Ok(Self { events, next: 0 })
    }

    /// Whether any scripted key belongs to `seat`.
    pub fn drives(&self, seat: Seat) -> bool {
        self.events
            .iter()
            .any(|e| keymap::lookup(&e.code).is_some_and(|(s, _)| s == seat))
    }

    /// Apply every event due at or before `now`.
    pub fn advance(&mut self, now: f32, controls: &mut Controls) {
        while let Some(event) = self.events.get(self.next)
            && event.at <= now
        {
            let known = match event.edge {
                KeyEdge::Down => controls.key_down(&event.code),
                KeyEdge::Up => controls.key_up(&event.code),
                KeyEdge::Tap => controls
                    .key_down(&event.code)
                    .and(controls.key_up(&event.code)),
            };
            if known.is_none() {
                tracing::debug!(code = %event.code, "Ignored unbound key in script");
            }
            self.next += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = "\
# walk right then open the table
0.5 down KeyD
1.0 up KeyD
1.2 tap KeyE
0.1 tap Numpad3
";

    #[test]
    fn parses_and_sorts() {
        let script = KeyScript::parse(SCRIPT).unwrap();
        assert_eq!(script.events.len(), 4);
        assert_eq!(script.events[0].code, "Numpad3");
        assert!(script.drives(Seat::One));
        assert!(script.drives(Seat::Two));
    }

    #[test]
    fn advance_applies_due_events() {
        let mut script = KeyScript::parse(SCRIPT).unwrap();
        let mut controls = Controls::new();

        script.advance(0.6, &mut controls);
        assert_eq!(controls.take_input(Seat::Two).select, vec![3]);
        assert!(controls.take_input(Seat::One).right);

        script.advance(1.3, &mut controls);
        let input = controls.take_input(Seat::One);
        assert!(!input.right);
        assert!(input.interact);
    }

    #[test]
    fn reports_bad_lines() {
        let err = KeyScript::parse("1.0 down KeyW\nsoon up KeyW").unwrap_err();
        assert!(matches!(err, ScriptError::Parse { line: 2, .. }));
        assert!(KeyScript::parse("1.0 hold KeyW").is_err());
        assert!(KeyScript::parse("1.0 down").is_err());
        assert!(KeyScript::parse("-1 down KeyW").is_err());
    }

    mod proptests {
        use proptest::prelude::*;

        use super::super::*;

        proptest! {
            #[test]
            fn parse_never_panics(content in "\\PC{0,200}") {
                let _ = KeyScript::parse(&content);
            }
        }
    }
}
