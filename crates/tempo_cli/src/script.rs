//! Animation script loading

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tempo_animation::{AnimationContext, AnimationScript};
use tempo_core::SlotStore;
use tracing::info;

/// Read and parse a script file
pub fn load_script(path: &Path) -> Result<AnimationScript> {
    if !path.is_file() {
        anyhow::bail!("No animation script found at {}", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let script = AnimationScript::parse(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    Ok(script)
}

/// Build a context for `script`: its declared slots, plus a logging stub for
/// every callback name it refers to
pub fn stub_context(script: &AnimationScript) -> Result<AnimationContext> {
    let mut ctx = AnimationContext::new();
    script
        .declare_slots(&mut ctx.slots)
        .context("Invalid [[slot]] declarations")?;

    for name in script.callback_names() {
        let owned = name.to_string();
        ctx.callbacks
            .register(name, move || info!("callback '{}'", owned));
    }

    Ok(ctx)
}

/// `name=value` pairs in declaration order
pub fn format_slots(slots: &SlotStore) -> String {
    slots
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempo_core::SlotValue;

    #[test]
    fn test_stub_context_registers_every_referenced_callback() {
        let script = AnimationScript::parse(
            r#"
[[slot]]
name = "x"
value = 0.0

[[step]]
kind = "execute"
callback = "ping"

[[step]]
kind = "wait"
duration = 1.0
on_finish = "pong"
"#,
        )
        .unwrap();

        let ctx = stub_context(&script).unwrap();
        assert_eq!(ctx.callbacks.names(), vec!["ping", "pong"]);
        assert_eq!(ctx.slots.len(), 1);
        assert!(script.build(&ctx).is_ok());
    }

    #[test]
    fn test_duplicate_slot_is_reported() {
        let script = AnimationScript::parse(
            r#"
[[slot]]
name = "x"
value = 0.0

[[slot]]
name = "x"
value = true
"#,
        )
        .unwrap();

        assert!(stub_context(&script).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = load_script(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(err.to_string().contains("No animation script found"));
    }

    #[test]
    fn test_format_slots_keeps_declaration_order() {
        let mut slots = SlotStore::new();
        slots.declare("b", SlotValue::Float(0.5)).unwrap();
        slots.declare("a", SlotValue::Bool(true)).unwrap();
        assert_eq!(format_slots(&slots), "b=0.500 a=true");
    }
}
